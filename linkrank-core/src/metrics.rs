use crate::graph::LinkGraph;
use petgraph::algo::tarjan_scc;
use petgraph::graph::DiGraph;
use serde::{Deserialize, Serialize};

/// How many entries the hub and authority leaderboards carry.
pub const TOP_LIST_LEN: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubEntry {
    pub url: String,
    pub out_degree: u64,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorityEntry {
    pub url: String,
    pub in_degree: u64,
    pub score: f64,
}

/// Structural statistics for a link graph. Field names are part of the
/// JSON contract with consumers; do not rename them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkMetrics {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub density: f64,
    pub avg_in_degree: f64,
    pub avg_out_degree: f64,
    pub avg_clustering_coefficient: f64,
    pub in_degree: Vec<u64>,
    pub out_degree: Vec<u64>,
    pub hub_scores: Vec<f64>,
    pub authority_scores: Vec<f64>,
    pub dangling_nodes: usize,
    pub isolated_nodes: usize,
    pub strongly_connected_nodes: usize,
    pub hubs: Vec<HubEntry>,
    pub authorities: Vec<AuthorityEntry>,
}

impl NetworkMetrics {
    /// Compute the full metrics block for `graph`. `urls` labels the
    /// nodes and must be index-aligned with the graph.
    pub fn compute(graph: &LinkGraph, urls: &[String]) -> Self {
        let n = graph.node_count();
        let nf = n as f64;

        let in_degree: Vec<u64> = (0..n).map(|node| graph.in_degree(node)).collect();
        let out_degree: Vec<u64> = (0..n).map(|node| graph.out_degree(node)).collect();

        let total_edges = graph.edge_count();
        let density = if n > 1 {
            total_edges as f64 / (n * (n - 1)) as f64
        } else {
            0.0
        };

        let avg_in_degree = if n > 0 {
            in_degree.iter().sum::<u64>() as f64 / nf
        } else {
            0.0
        };
        let avg_out_degree = if n > 0 {
            out_degree.iter().sum::<u64>() as f64 / nf
        } else {
            0.0
        };

        let clustering = clustering_coefficients(graph);
        let avg_clustering_coefficient = if n > 0 {
            clustering.iter().sum::<f64>() / nf
        } else {
            0.0
        };

        let hub_scores = normalized_scores(&out_degree);
        let authority_scores = normalized_scores(&in_degree);

        let dangling_nodes = out_degree.iter().filter(|&&degree| degree == 0).count();
        let isolated_nodes = (0..n)
            .filter(|&node| in_degree[node] == 0 && out_degree[node] == 0)
            .count();

        let hubs = top_hubs(urls, &out_degree, &hub_scores);
        let authorities = top_authorities(urls, &in_degree, &authority_scores);

        NetworkMetrics {
            total_nodes: n,
            total_edges,
            density,
            avg_in_degree,
            avg_out_degree,
            avg_clustering_coefficient,
            in_degree,
            out_degree,
            hub_scores,
            authority_scores,
            dangling_nodes,
            isolated_nodes,
            strongly_connected_nodes: strongly_connected_nodes(graph),
            hubs,
            authorities,
        }
    }
}

/// Degree divided by the maximum degree; all zeros when nothing links.
fn normalized_scores(degrees: &[u64]) -> Vec<f64> {
    let max = degrees.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return vec![0.0; degrees.len()];
    }
    degrees
        .iter()
        .map(|&degree| degree as f64 / max as f64)
        .collect()
}

/// Local clustering per node over the undirected projection of the
/// graph. Nodes with fewer than two neighbors contribute 0.
fn clustering_coefficients(graph: &LinkGraph) -> Vec<f64> {
    let n = graph.node_count();

    let neighbors: Vec<Vec<usize>> = (0..n)
        .map(|node| {
            (0..n)
                .filter(|&other| {
                    other != node
                        && (graph.has_edge(node, other) || graph.has_edge(other, node))
                })
                .collect()
        })
        .collect();

    (0..n)
        .map(|node| {
            let nbrs = &neighbors[node];
            let k = nbrs.len();
            if k < 2 {
                return 0.0;
            }

            let mut closed = 0usize;
            for (pos, &a) in nbrs.iter().enumerate() {
                for &b in &nbrs[pos + 1..] {
                    if graph.has_edge(a, b) || graph.has_edge(b, a) {
                        closed += 1;
                    }
                }
            }

            closed as f64 / (k * (k - 1) / 2) as f64
        })
        .collect()
}

/// Count of nodes that sit in a cycle with at least one other node.
fn strongly_connected_nodes(graph: &LinkGraph) -> usize {
    let n = graph.node_count();

    let mut digraph = DiGraph::<(), ()>::new();
    let nodes: Vec<_> = (0..n).map(|_| digraph.add_node(())).collect();

    for source in 0..n {
        for target in 0..n {
            if graph.has_edge(source, target) {
                digraph.add_edge(nodes[source], nodes[target], ());
            }
        }
    }

    tarjan_scc(&digraph)
        .into_iter()
        .filter(|component| component.len() >= 2)
        .map(|component| component.len())
        .sum()
}

fn top_hubs(urls: &[String], out_degree: &[u64], scores: &[f64]) -> Vec<HubEntry> {
    ranked_indices(out_degree)
        .into_iter()
        .map(|node| HubEntry {
            url: urls[node].clone(),
            out_degree: out_degree[node],
            score: scores[node],
        })
        .collect()
}

fn top_authorities(urls: &[String], in_degree: &[u64], scores: &[f64]) -> Vec<AuthorityEntry> {
    ranked_indices(in_degree)
        .into_iter()
        .map(|node| AuthorityEntry {
            url: urls[node].clone(),
            in_degree: in_degree[node],
            score: scores[node],
        })
        .collect()
}

/// Indices of the highest-degree nodes, ties broken by node order.
/// Zero-degree nodes never make the list.
fn ranked_indices(degrees: &[u64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..degrees.len()).filter(|&node| degrees[node] > 0).collect();
    order.sort_by(|&a, &b| degrees[b].cmp(&degrees[a]).then(a.cmp(&b)));
    order.truncate(TOP_LIST_LEN);
    order
}

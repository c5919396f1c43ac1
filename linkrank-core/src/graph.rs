use crate::error::{EngineError, Result};

/// Weighted directed link graph over a fixed node set.
///
/// Stored dense: `edges[i][j]` is the weight of the edge from node `i`
/// to node `j`. The diagonal is always zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkGraph {
    edges: Vec<Vec<u32>>,
}

impl LinkGraph {
    /// Build a 0/1 graph from per-node outbound link lists, as produced
    /// by link extraction. `links[i]` holds the target indices node `i`
    /// points at.
    pub fn from_links(node_count: usize, links: &[Vec<usize>]) -> Result<Self> {
        if links.len() != node_count {
            return Err(EngineError::ShapeMismatch {
                expected: node_count,
                detail: format!("got outbound link lists for {} nodes", links.len()),
            });
        }

        let mut edges = vec![vec![0u32; node_count]; node_count];
        for (source, targets) in links.iter().enumerate() {
            for &target in targets {
                if target >= node_count {
                    return Err(EngineError::ShapeMismatch {
                        expected: node_count,
                        detail: format!("link target {} out of range", target),
                    });
                }
                if target != source {
                    edges[source][target] = 1;
                }
            }
        }

        Ok(Self { edges })
    }

    /// Build from a caller-provided adjacency matrix. Entries must be
    /// finite non-negative integers; the diagonal is accepted but zeroed.
    pub fn from_matrix(node_count: usize, rows: &[Vec<f64>]) -> Result<Self> {
        if rows.len() != node_count {
            return Err(EngineError::ShapeMismatch {
                expected: node_count,
                detail: format!("got {} rows", rows.len()),
            });
        }

        let mut edges = vec![vec![0u32; node_count]; node_count];
        for (i, row) in rows.iter().enumerate() {
            if row.len() != node_count {
                return Err(EngineError::ShapeMismatch {
                    expected: node_count,
                    detail: format!("row {} has {} columns", i, row.len()),
                });
            }
            for (j, &value) in row.iter().enumerate() {
                if !value.is_finite()
                    || value < 0.0
                    || value.fract() != 0.0
                    || value > f64::from(u32::MAX)
                {
                    return Err(EngineError::InvalidValue { row: i, col: j, value });
                }
                if i != j {
                    edges[i][j] = value as u32;
                }
            }
        }

        Ok(Self { edges })
    }

    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge(&self, source: usize, target: usize) -> u32 {
        self.edges[source][target]
    }

    pub fn has_edge(&self, source: usize, target: usize) -> bool {
        self.edges[source][target] != 0
    }

    /// Number of distinct directed edges (non-zero entries).
    pub fn edge_count(&self) -> usize {
        self.edges
            .iter()
            .map(|row| row.iter().filter(|&&weight| weight != 0).count())
            .sum()
    }

    /// Sum of outbound edge weights for `source`.
    pub fn out_degree(&self, source: usize) -> u64 {
        self.edges[source].iter().map(|&weight| u64::from(weight)).sum()
    }

    /// Sum of inbound edge weights for `target`.
    pub fn in_degree(&self, target: usize) -> u64 {
        self.edges.iter().map(|row| u64::from(row[target])).sum()
    }

    pub fn rows(&self) -> &[Vec<u32>] {
        &self.edges
    }
}

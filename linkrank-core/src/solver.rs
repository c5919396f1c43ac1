use crate::error::{EngineError, Result};
use crate::graph::LinkGraph;
use tracing::debug;

/// L1 convergence threshold for the power iteration.
pub const CONVERGENCE_EPSILON: f64 = 1e-6;

/// Hard cap on the iteration budget a caller may request.
pub const MAX_ITERATION_CAP: usize = 1000;

pub const DAMPING_MIN: f64 = 0.10;
pub const DAMPING_MAX: f64 = 0.99;

pub const DEFAULT_DAMPING: f64 = 0.85;
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Validated PageRank tuning parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankParams {
    damping: f64,
    max_iterations: usize,
}

impl RankParams {
    pub fn new(damping: f64, max_iterations: usize) -> Result<Self> {
        if !damping.is_finite() || !(DAMPING_MIN..=DAMPING_MAX).contains(&damping) {
            return Err(EngineError::ParameterRange(format!(
                "damping factor {} must lie in [{}, {}]",
                damping, DAMPING_MIN, DAMPING_MAX
            )));
        }
        if max_iterations == 0 || max_iterations > MAX_ITERATION_CAP {
            return Err(EngineError::ParameterRange(format!(
                "max iterations {} must lie in [1, {}]",
                max_iterations, MAX_ITERATION_CAP
            )));
        }

        Ok(Self {
            damping,
            max_iterations,
        })
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }
}

impl Default for RankParams {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Weighted PageRank by power iteration.
///
/// Ranks start uniform at 1/N. Each round every node keeps the teleport
/// share (1-d)/N and receives the damped rank of its in-neighbors, split
/// in proportion to edge weight. Nodes with no outbound edges spread
/// their whole rank uniformly, so total mass stays at 1. Iteration stops
/// once the L1 change drops below [`CONVERGENCE_EPSILON`] or the budget
/// is spent.
pub fn pagerank(graph: &LinkGraph, params: RankParams) -> Result<Vec<f64>> {
    let n = graph.node_count();
    if n == 0 {
        return Ok(Vec::new());
    }

    let nf = n as f64;
    let damping = params.damping();
    let teleport = (1.0 - damping) / nf;

    let out_degrees: Vec<u64> = (0..n).map(|node| graph.out_degree(node)).collect();

    let mut ranks = vec![1.0 / nf; n];
    let mut next = vec![0.0; n];

    for iteration in 1..=params.max_iterations() {
        let dangling_mass: f64 = ranks
            .iter()
            .zip(&out_degrees)
            .filter(|&(_, &degree)| degree == 0)
            .map(|(rank, _)| rank)
            .sum();

        next.fill(teleport + damping * dangling_mass / nf);

        for source in 0..n {
            if out_degrees[source] == 0 {
                continue;
            }
            let share = damping * ranks[source] / out_degrees[source] as f64;
            for target in 0..n {
                let weight = graph.edge(source, target);
                if weight != 0 {
                    next[target] += share * f64::from(weight);
                }
            }
        }

        let delta: f64 = ranks
            .iter()
            .zip(next.iter())
            .map(|(old, new)| (new - old).abs())
            .sum();

        std::mem::swap(&mut ranks, &mut next);

        if ranks.iter().any(|rank| !rank.is_finite()) {
            return Err(EngineError::Computation(format!(
                "rank vector went non-finite at iteration {}",
                iteration
            )));
        }

        if delta < CONVERGENCE_EPSILON {
            debug!(
                "pagerank converged after {} iterations (delta {:.3e})",
                iteration, delta
            );
            return Ok(ranks);
        }
    }

    debug!(
        "pagerank stopped at the iteration cap of {}",
        params.max_iterations()
    );
    Ok(ranks)
}

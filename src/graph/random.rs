// src/graph/random.rs
//! Seeded Erdős–Rényi generation for null-model baselines.
//!
//! Attack curves on a real dependency graph only mean something next to a
//! random graph with the same node and edge budget, so `matched_to` derives
//! `p` from the graph under study. Same seed, same graph, byte for byte.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::{FractureError, Result};
use crate::graph::{DepGraph, GraphBuilder};

/// Directed G(n, p) without self-loops.
///
/// Uses geometric skips over the n*(n-1) candidate pairs, so the cost is
/// proportional to the number of edges drawn rather than n^2.
#[must_use]
pub fn erdos_renyi(name: &str, n: usize, p: f64, seed: u64) -> DepGraph {
    let mut builder = GraphBuilder::new(name);
    let labels: Vec<String> = (0..n).map(|i| format!("n{i}")).collect();
    for label in &labels {
        builder.add_node(label);
    }

    if n >= 2 && p > 0.0 {
        let pairs = (n * (n - 1)) as u64;
        let mut rng = SmallRng::seed_from_u64(seed);
        if p >= 1.0 {
            for k in 0..pairs {
                let (u, v) = pair_at(k, n);
                // Complete digraph; builder dedup never fires here.
                let _ = builder.add_edge(&labels[u], &labels[v]);
            }
        } else {
            let log_q = (-p).ln_1p();
            let mut k: i64 = -1;
            loop {
                // Skip length ~ Geometric(p).
                let u: f64 = rng.random();
                let skip = (u.ln() / log_q).floor() as i64;
                k += 1 + skip.max(0);
                if k as u64 >= pairs {
                    break;
                }
                let (s, t) = pair_at(k as u64, n);
                let _ = builder.add_edge(&labels[s], &labels[t]);
            }
        }
    }

    builder.build()
}

/// Random baseline with the same node count and expected edge count as `g`:
/// `p = E / (N * (N - 1))`, the density of a directed simple graph.
///
/// # Errors
/// Returns `EmptyGraph` when `g` has no nodes; density is undefined there.
pub fn matched_to(g: &DepGraph, seed: u64) -> Result<DepGraph> {
    if g.is_empty() {
        return Err(FractureError::EmptyGraph {
            graph: g.name().to_string(),
        });
    }
    let n = g.node_count();
    let p = if n < 2 {
        0.0
    } else {
        g.edge_count() as f64 / (n as f64 * (n as f64 - 1.0))
    };
    Ok(erdos_renyi(
        &format!("er-baseline({})", g.name()),
        n,
        p,
        seed,
    ))
}

/// Maps a flat pair index onto (row, col) skipping the diagonal.
fn pair_at(k: u64, n: usize) -> (usize, usize) {
    let row = (k / (n as u64 - 1)) as usize;
    let col = (k % (n as u64 - 1)) as usize;
    if col >= row {
        (row, col + 1)
    } else {
        (row, col)
    }
}

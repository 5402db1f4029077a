// src/metrics/paths.rs
//! Average shortest path length over the largest component.
//!
//! Exact all-pairs BFS is quadratic, which is fine for a JDK-sized graph
//! and hopeless for a kernel-sized one, so past `max_exact_sources` the
//! engine BFSes from a seeded random sample of sources instead. Sources are
//! processed in parallel; each worker owns its distance array.

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::error::{FractureError, Result};
use crate::graph::{AliveMask, DepGraph, NodeId};
use crate::metrics::components;

pub struct PathOptions {
    /// Follow edge direction instead of treating edges as undirected.
    pub directed: bool,
    /// Component sizes up to this run exact all-sources BFS.
    pub max_exact_sources: usize,
    /// Number of BFS sources when sampling.
    pub samples: usize,
    /// Seed for source sampling.
    pub seed: u64,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            directed: false,
            max_exact_sources: 1_000,
            samples: 512,
            seed: 42,
        }
    }
}

#[derive(Debug)]
pub struct PathSummary {
    pub average: f64,
    /// Longest shortest path seen from any used source; a lower bound on
    /// the diameter when sampling.
    pub max_distance: usize,
    pub lcc_size: usize,
    pub sources_used: usize,
    pub pairs_counted: u64,
    pub exact: bool,
}

/// Mean shortest-path distance over ordered reachable pairs in the largest
/// weakly connected component.
///
/// # Errors
/// Returns `DisconnectedGraph` when the graph has no edges at all; there is
/// no component to measure. A graph with edges always yields a value, even
/// if most of it is fragments.
pub fn average_shortest_path(g: &DepGraph, opts: &PathOptions) -> Result<PathSummary> {
    if g.edge_count() == 0 {
        return Err(FractureError::DisconnectedGraph {
            graph: g.name().to_string(),
        });
    }

    let mask = AliveMask::all_alive(g.node_count());
    let mut members = components::largest_component_members(g, &mask);
    let lcc_size = members.len();

    let exact = lcc_size <= opts.max_exact_sources;
    let sources: &[NodeId] = if exact {
        &members
    } else {
        let mut rng = SmallRng::seed_from_u64(opts.seed);
        members.shuffle(&mut rng);
        &members[..opts.samples.min(lcc_size)]
    };

    let (sum, pairs, max_distance) = sources
        .par_iter()
        .map(|&s| bfs_tally(g, s, opts.directed))
        .reduce(
            || (0u64, 0u64, 0usize),
            |a, b| (a.0 + b.0, a.1 + b.1, a.2.max(b.2)),
        );

    // Reachable pairs exist whenever the component has an edge, which it
    // does by construction here.
    let average = if pairs == 0 { 0.0 } else { sum as f64 / pairs as f64 };
    Ok(PathSummary {
        average,
        max_distance,
        lcc_size,
        sources_used: sources.len(),
        pairs_counted: pairs,
        exact,
    })
}

/// Sum of BFS distances from `source`, the count of reached nodes, and the
/// eccentricity. The source itself is not counted as a pair.
fn bfs_tally(g: &DepGraph, source: NodeId, directed: bool) -> (u64, u64, usize) {
    let mut dist = vec![u32::MAX; g.node_count()];
    let mut queue = VecDeque::new();
    dist[source as usize] = 0;
    queue.push_back(source);

    let (mut sum, mut reached, mut ecc) = (0u64, 0u64, 0usize);
    while let Some(u) = queue.pop_front() {
        let next = dist[u as usize] + 1;
        let mut visit = |v: NodeId| {
            if dist[v as usize] == u32::MAX {
                dist[v as usize] = next;
                sum += u64::from(next);
                reached += 1;
                ecc = ecc.max(next as usize);
                queue.push_back(v);
            }
        };
        for &v in g.out_neighbors(u) {
            visit(v);
        }
        if !directed {
            for &v in g.in_neighbors(u) {
                visit(v);
            }
        }
    }
    (sum, reached, ecc)
}

#[cfg(test)]
mod tests {
    use super::{average_shortest_path, PathOptions};
    use crate::error::FractureError;
    use crate::graph::GraphBuilder;

    #[test]
    fn path_graph_average() {
        // a - b - c: ordered pairs (6 of them) have distances 1,1,1,1,2,2.
        let mut b = GraphBuilder::new("p3");
        b.add_edge("a", "b").unwrap();
        b.add_edge("b", "c").unwrap();
        let s = average_shortest_path(&b.build(), &PathOptions::default()).unwrap();
        assert!((s.average - 8.0 / 6.0).abs() < 1e-12);
        assert_eq!(s.max_distance, 2);
        assert_eq!(s.lcc_size, 3);
        assert!(s.exact);
    }

    #[test]
    fn edgeless_graph_is_disconnected() {
        let mut b = GraphBuilder::new("lone");
        b.add_node("a");
        b.add_node("b");
        let err = average_shortest_path(&b.build(), &PathOptions::default()).unwrap_err();
        assert!(matches!(err, FractureError::DisconnectedGraph { .. }));
    }

    #[test]
    fn fragments_outside_the_lcc_are_ignored() {
        let mut b = GraphBuilder::new("t");
        b.add_edge("a", "b").unwrap();
        b.add_edge("b", "c").unwrap();
        b.add_edge("x", "y").unwrap();
        let s = average_shortest_path(&b.build(), &PathOptions::default()).unwrap();
        assert_eq!(s.lcc_size, 3);
        assert_eq!(s.pairs_counted, 6);
    }

    #[test]
    fn directed_mode_counts_reachable_pairs_only() {
        // a -> b -> c: only 3 ordered pairs are reachable with direction on.
        let mut b = GraphBuilder::new("p3");
        b.add_edge("a", "b").unwrap();
        b.add_edge("b", "c").unwrap();
        let opts = PathOptions {
            directed: true,
            ..PathOptions::default()
        };
        let s = average_shortest_path(&b.build(), &opts).unwrap();
        assert_eq!(s.pairs_counted, 3);
        assert!((s.average - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn sampling_is_deterministic_for_a_seed() {
        let mut b = GraphBuilder::new("chain");
        let labels: Vec<String> = (0..30).map(|i| format!("n{i}")).collect();
        for w in labels.windows(2) {
            b.add_edge(&w[0], &w[1]).unwrap();
        }
        let g = b.build();
        let opts = PathOptions {
            max_exact_sources: 10,
            samples: 8,
            seed: 7,
            ..PathOptions::default()
        };
        let a = average_shortest_path(&g, &opts).unwrap();
        let b2 = average_shortest_path(&g, &opts).unwrap();
        assert!(!a.exact);
        assert_eq!(a.sources_used, 8);
        assert!((a.average - b2.average).abs() < 1e-12);
    }
}

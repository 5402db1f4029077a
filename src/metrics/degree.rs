// src/metrics/degree.rs
//! Degree distributions and hub extraction.

use std::collections::BTreeMap;

use crate::graph::{DepGraph, NodeId};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum DegreeKind {
    In,
    Out,
    Total,
}

fn degree_of(g: &DepGraph, id: NodeId, kind: DegreeKind) -> usize {
    match kind {
        DegreeKind::In => g.in_degree(id),
        DegreeKind::Out => g.out_degree(id),
        DegreeKind::Total => g.total_degree(id),
    }
}

/// Histogram of degree -> node count.
#[must_use]
pub fn distribution(g: &DepGraph, kind: DegreeKind) -> BTreeMap<usize, usize> {
    let mut hist = BTreeMap::new();
    for id in g.node_ids() {
        *hist.entry(degree_of(g, id, kind)).or_insert(0) += 1;
    }
    hist
}

/// Mean degree of the chosen kind. Zero on an empty graph.
#[must_use]
pub fn mean(g: &DepGraph, kind: DegreeKind) -> f64 {
    if g.is_empty() {
        return 0.0;
    }
    let edges = g.edge_count() as f64;
    let nodes = g.node_count() as f64;
    match kind {
        // Every edge contributes one in- and one out-endpoint.
        DegreeKind::In | DegreeKind::Out => edges / nodes,
        DegreeKind::Total => 2.0 * edges / nodes,
    }
}

/// Maximum degree of the chosen kind. Zero on an empty graph.
#[must_use]
pub fn max(g: &DepGraph, kind: DegreeKind) -> usize {
    g.node_ids()
        .map(|id| degree_of(g, id, kind))
        .max()
        .unwrap_or(0)
}

/// Top `k` nodes by out-degree: the heavy includers. Ties break toward the
/// lower node id, which is first-seen order in the input.
#[must_use]
pub fn top_hubs(g: &DepGraph, k: usize) -> Vec<(NodeId, usize)> {
    let mut ranked: Vec<(NodeId, usize)> =
        g.node_ids().map(|id| (id, g.out_degree(id))).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(k);
    ranked
}

// src/graph/builder.rs
//! Mutable accumulation stage for dependency graphs.
//!
//! The builder interns string labels to dense `u32` ids and collects edges;
//! `build` freezes everything into the immutable [`DepGraph`] adjacency
//! structure. Unknown endpoints are interned implicitly on `add_edge`, so a
//! plain edge list is enough to define a graph.

use std::collections::{HashMap, HashSet};

use crate::error::{FractureError, Result};
use crate::graph::model::DepGraph;
use crate::graph::NodeId;

pub struct GraphBuilder {
    name: String,
    labels: Vec<String>,
    index: HashMap<String, NodeId>,
    edges: Vec<(NodeId, NodeId)>,
    seen: HashSet<(NodeId, NodeId)>,
    strict_edges: bool,
    keep_self_loops: bool,
    self_loops_dropped: usize,
    duplicates_merged: usize,
}

impl GraphBuilder {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            labels: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
            seen: HashSet::new(),
            strict_edges: false,
            keep_self_loops: false,
            self_loops_dropped: 0,
            duplicates_merged: 0,
        }
    }

    /// Rejects exact duplicate edges instead of merging them silently.
    #[must_use]
    pub fn strict_edges(mut self, strict: bool) -> Self {
        self.strict_edges = strict;
        self
    }

    /// Keeps self-loop edges. Off by default: a file including itself is
    /// noise for every downstream metric.
    #[must_use]
    pub fn keep_self_loops(mut self, keep: bool) -> Self {
        self.keep_self_loops = keep;
        self
    }

    /// Interns a node label, returning its id. Idempotent.
    pub fn add_node(&mut self, label: &str) -> NodeId {
        if let Some(&id) = self.index.get(label) {
            return id;
        }
        let id = u32::try_from(self.labels.len()).expect("node count exceeds u32 range");
        self.labels.push(label.to_string());
        self.index.insert(label.to_string(), id);
        id
    }

    /// Adds a directed dependency edge, interning both endpoints.
    ///
    /// # Errors
    /// Returns `DuplicateEdge` when strict mode is on and the exact edge was
    /// already inserted. In the default mode duplicates merge silently.
    pub fn add_edge(&mut self, source: &str, target: &str) -> Result<()> {
        let u = self.add_node(source);
        let v = self.add_node(target);

        if u == v && !self.keep_self_loops {
            self.self_loops_dropped += 1;
            return Ok(());
        }

        if !self.seen.insert((u, v)) {
            if self.strict_edges {
                return Err(FractureError::DuplicateEdge {
                    source: source.to_string(),
                    target: target.to_string(),
                });
            }
            self.duplicates_merged += 1;
            return Ok(());
        }

        self.edges.push((u, v));
        Ok(())
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Self-loops discarded so far (zero when `keep_self_loops` is set).
    #[must_use]
    pub fn self_loops_dropped(&self) -> usize {
        self.self_loops_dropped
    }

    /// Duplicate edges merged so far (zero in strict mode).
    #[must_use]
    pub fn duplicates_merged(&self) -> usize {
        self.duplicates_merged
    }

    /// Freezes the accumulated nodes and edges into an immutable graph.
    ///
    /// Runs in O(V + E): one counting pass per direction, one fill pass,
    /// then an in-place sort of each adjacency slice for deterministic
    /// iteration order.
    #[must_use]
    pub fn build(self) -> DepGraph {
        let n = self.labels.len();
        let mut out_offsets = vec![0u32; n + 1];
        let mut in_offsets = vec![0u32; n + 1];

        for &(u, v) in &self.edges {
            out_offsets[u as usize + 1] += 1;
            in_offsets[v as usize + 1] += 1;
        }
        for i in 0..n {
            out_offsets[i + 1] += out_offsets[i];
            in_offsets[i + 1] += in_offsets[i];
        }

        let mut out_targets = vec![0u32; self.edges.len()];
        let mut in_sources = vec![0u32; self.edges.len()];
        let mut out_cursor = out_offsets.clone();
        let mut in_cursor = in_offsets.clone();

        for &(u, v) in &self.edges {
            out_targets[out_cursor[u as usize] as usize] = v;
            out_cursor[u as usize] += 1;
            in_sources[in_cursor[v as usize] as usize] = u;
            in_cursor[v as usize] += 1;
        }

        for i in 0..n {
            let (a, b) = (out_offsets[i] as usize, out_offsets[i + 1] as usize);
            out_targets[a..b].sort_unstable();
            let (a, b) = (in_offsets[i] as usize, in_offsets[i + 1] as usize);
            in_sources[a..b].sort_unstable();
        }

        DepGraph::from_parts(
            self.name,
            self.labels,
            self.index,
            out_offsets,
            out_targets,
            in_offsets,
            in_sources,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_idempotent() {
        let mut b = GraphBuilder::new("t");
        let a1 = b.add_node("a.c");
        let a2 = b.add_node("a.c");
        assert_eq!(a1, a2);
        assert_eq!(b.node_count(), 1);
    }

    #[test]
    fn duplicate_edges_merge_by_default() {
        let mut b = GraphBuilder::new("t");
        b.add_edge("a", "b").unwrap();
        b.add_edge("a", "b").unwrap();
        assert_eq!(b.edge_count(), 1);
        assert_eq!(b.duplicates_merged(), 1);
    }

    #[test]
    fn strict_mode_rejects_duplicates() {
        let mut b = GraphBuilder::new("t").strict_edges(true);
        b.add_edge("a", "b").unwrap();
        let err = b.add_edge("a", "b").unwrap_err();
        assert!(matches!(err, FractureError::DuplicateEdge { .. }));
    }

    #[test]
    fn self_loops_dropped_unless_kept() {
        let mut b = GraphBuilder::new("t");
        b.add_edge("a", "a").unwrap();
        assert_eq!(b.edge_count(), 0);
        assert_eq!(b.self_loops_dropped(), 1);

        let mut b = GraphBuilder::new("t").keep_self_loops(true);
        b.add_edge("a", "a").unwrap();
        assert_eq!(b.edge_count(), 1);
    }

    #[test]
    fn build_produces_sorted_adjacency() {
        let mut b = GraphBuilder::new("t");
        // Interning order fixes ids: a=0, b=1, c=2. Insert out of id order.
        b.add_node("a");
        b.add_node("b");
        b.add_node("c");
        b.add_edge("a", "c").unwrap();
        b.add_edge("a", "b").unwrap();
        let g = b.build();
        let a = g.node_id("a").unwrap();
        assert_eq!(g.out_neighbors(a), &[1, 2]);
    }
}

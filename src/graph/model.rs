// src/graph/model.rs
//! The immutable dependency graph.
//!
//! Nodes are files (C) or classes (Java); a directed edge `u -> v` means
//! "u includes/imports v". Adjacency is stored CSR-style in both directions
//! and never mutated after construction: attack simulation layers an
//! [`AliveMask`](crate::graph::AliveMask) over this structure instead of
//! deleting anything, so one graph serves any number of concurrent runs.

use std::collections::HashMap;

use crate::error::{FractureError, Result};
use crate::graph::NodeId;

#[derive(Debug)]
pub struct DepGraph {
    name: String,
    labels: Vec<String>,
    index: HashMap<String, NodeId>,
    out_offsets: Vec<u32>,
    out_targets: Vec<u32>,
    in_offsets: Vec<u32>,
    in_sources: Vec<u32>,
}

impl DepGraph {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        name: String,
        labels: Vec<String>,
        index: HashMap<String, NodeId>,
        out_offsets: Vec<u32>,
        out_targets: Vec<u32>,
        in_offsets: Vec<u32>,
        in_sources: Vec<u32>,
    ) -> Self {
        debug_assert_eq!(out_offsets.len(), labels.len() + 1);
        debug_assert_eq!(in_offsets.len(), labels.len() + 1);
        debug_assert_eq!(out_targets.len(), in_sources.len());
        Self {
            name,
            labels,
            index,
            out_offsets,
            out_targets,
            in_offsets,
            in_sources,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.out_targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label of a node id. Panics on an out-of-range id; ids only come from
    /// this graph, so that is a caller bug, not an input error.
    #[must_use]
    pub fn label(&self, id: NodeId) -> &str {
        &self.labels[id as usize]
    }

    /// Resolves a label to its node id.
    ///
    /// # Errors
    /// Returns `NodeNotFound` if the label is absent.
    pub fn node_id(&self, label: &str) -> Result<NodeId> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| FractureError::NodeNotFound {
                id: label.to_string(),
            })
    }

    /// Ids of the nodes this node depends on (out-edges). O(1) slice lookup.
    #[must_use]
    pub fn out_neighbors(&self, id: NodeId) -> &[NodeId] {
        let a = self.out_offsets[id as usize] as usize;
        let b = self.out_offsets[id as usize + 1] as usize;
        &self.out_targets[a..b]
    }

    /// Ids of the nodes that depend on this node (in-edges).
    #[must_use]
    pub fn in_neighbors(&self, id: NodeId) -> &[NodeId] {
        let a = self.in_offsets[id as usize] as usize;
        let b = self.in_offsets[id as usize + 1] as usize;
        &self.in_sources[a..b]
    }

    /// Lazy sequence of labels this node depends on.
    ///
    /// # Errors
    /// Returns `NodeNotFound` if the label is absent.
    pub fn neighbors<'a>(
        &'a self,
        label: &str,
    ) -> Result<impl Iterator<Item = &'a str> + std::fmt::Debug + 'a> {
        let id = self.node_id(label)?;
        Ok(self.out_neighbors(id).iter().map(|&t| self.label(t)))
    }

    /// Lazy sequence of labels that depend on this node.
    ///
    /// # Errors
    /// Returns `NodeNotFound` if the label is absent.
    pub fn dependents<'a>(&'a self, label: &str) -> Result<impl Iterator<Item = &'a str> + 'a> {
        let id = self.node_id(label)?;
        Ok(self.in_neighbors(id).iter().map(|&s| self.label(s)))
    }

    /// (in, out) degree for a label.
    ///
    /// # Errors
    /// Returns `NodeNotFound` if the label is absent.
    pub fn degree(&self, label: &str) -> Result<(usize, usize)> {
        let id = self.node_id(label)?;
        Ok((self.in_degree(id), self.out_degree(id)))
    }

    #[must_use]
    pub fn out_degree(&self, id: NodeId) -> usize {
        (self.out_offsets[id as usize + 1] - self.out_offsets[id as usize]) as usize
    }

    #[must_use]
    pub fn in_degree(&self, id: NodeId) -> usize {
        (self.in_offsets[id as usize + 1] - self.in_offsets[id as usize]) as usize
    }

    /// Undirected degree (in + out), the convention metrics and targeted
    /// attacks rank by.
    #[must_use]
    pub fn total_degree(&self, id: NodeId) -> usize {
        self.in_degree(id) + self.out_degree(id)
    }

    /// True if the directed edge `u -> v` exists. O(log deg(u)).
    #[must_use]
    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.out_neighbors(u).binary_search(&v).is_ok()
    }

    /// True if `u` and `v` are adjacent in either direction.
    #[must_use]
    pub fn connected(&self, u: NodeId, v: NodeId) -> bool {
        self.has_edge(u, v) || self.has_edge(v, u)
    }

    /// All node ids, 0..n.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        0..self.node_count() as NodeId
    }

    /// All directed edges as (source, target) id pairs.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.node_ids()
            .flat_map(move |u| self.out_neighbors(u).iter().map(move |&v| (u, v)))
    }

    /// Undirected neighbor set of a node: sorted, deduplicated union of in-
    /// and out-neighbors with the node itself removed. Allocates; intended
    /// for clustering-style metrics, not hot loops.
    #[must_use]
    pub fn undirected_neighbors(&self, id: NodeId) -> Vec<NodeId> {
        let outs = self.out_neighbors(id);
        let ins = self.in_neighbors(id);
        let mut merged = Vec::with_capacity(outs.len() + ins.len());

        // Both inputs are sorted; merge keeps the result sorted.
        let (mut i, mut j) = (0, 0);
        while i < outs.len() && j < ins.len() {
            let next = match outs[i].cmp(&ins[j]) {
                std::cmp::Ordering::Less => {
                    i += 1;
                    outs[i - 1]
                }
                std::cmp::Ordering::Greater => {
                    j += 1;
                    ins[j - 1]
                }
                std::cmp::Ordering::Equal => {
                    i += 1;
                    j += 1;
                    outs[i - 1]
                }
            };
            if next != id && merged.last() != Some(&next) {
                merged.push(next);
            }
        }
        for &v in &outs[i..] {
            if v != id && merged.last() != Some(&v) {
                merged.push(v);
            }
        }
        for &v in &ins[j..] {
            if v != id && merged.last() != Some(&v) {
                merged.push(v);
            }
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::GraphBuilder;

    fn triangle() -> super::DepGraph {
        let mut b = GraphBuilder::new("tri");
        b.add_edge("a", "b").unwrap();
        b.add_edge("b", "c").unwrap();
        b.add_edge("c", "a").unwrap();
        b.build()
    }

    #[test]
    fn degrees_and_neighbors() {
        let g = triangle();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.degree("a").unwrap(), (1, 1));
        let deps: Vec<&str> = g.neighbors("a").unwrap().collect();
        assert_eq!(deps, vec!["b"]);
        let dependents: Vec<&str> = g.dependents("a").unwrap().collect();
        assert_eq!(dependents, vec!["c"]);
    }

    #[test]
    fn unknown_label_is_an_error() {
        let g = triangle();
        let err = g.neighbors("missing.h").unwrap_err();
        assert!(err.to_string().contains("missing.h"));
    }

    #[test]
    fn has_edge_is_directional() {
        let g = triangle();
        let a = g.node_id("a").unwrap();
        let b = g.node_id("b").unwrap();
        assert!(g.has_edge(a, b));
        assert!(!g.has_edge(b, a));
        assert!(g.connected(b, a));
    }

    #[test]
    fn undirected_neighbors_dedup_both_directions() {
        let mut b = GraphBuilder::new("t");
        b.add_edge("a", "b").unwrap();
        b.add_edge("b", "a").unwrap();
        b.add_edge("a", "c").unwrap();
        let g = b.build();
        let a = g.node_id("a").unwrap();
        assert_eq!(g.undirected_neighbors(a).len(), 2);
    }

    #[test]
    fn edge_iterator_covers_all_edges() {
        let g = triangle();
        assert_eq!(g.edges().count(), 3);
    }
}

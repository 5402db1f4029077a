// src/metrics/components.rs
//! Weak connectivity under a removal mask.
//!
//! Edge direction is ignored here: for robustness purposes a component is a
//! set of nodes that still touch each other at all. Everything is computed
//! against an [`AliveMask`], so the attack loop can re-evaluate connectivity
//! after each removal batch without mutating the graph.

use crate::graph::{AliveMask, DepGraph, NodeId};

/// Union-find with union by size and path halving.
pub struct UnionFind {
    parent: Vec<u32>,
    size: Vec<u32>,
}

impl UnionFind {
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n as u32).collect(),
            size: vec![1; n],
        }
    }

    pub fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            self.parent[x as usize] = self.parent[self.parent[x as usize] as usize];
            x = self.parent[x as usize];
        }
        x
    }

    /// Merges the sets holding `a` and `b`; false if already merged.
    pub fn union(&mut self, a: u32, b: u32) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        let (big, small) = if self.size[ra as usize] >= self.size[rb as usize] {
            (ra, rb)
        } else {
            (rb, ra)
        };
        self.parent[small as usize] = big;
        self.size[big as usize] += self.size[small as usize];
        true
    }

    pub fn size_of(&mut self, x: u32) -> usize {
        let root = self.find(x);
        self.size[root as usize] as usize
    }
}

fn union_alive(g: &DepGraph, mask: &AliveMask) -> UnionFind {
    let mut uf = UnionFind::new(g.node_count());
    for u in mask.alive_ids() {
        for &v in g.out_neighbors(u) {
            if mask.is_alive(v) {
                uf.union(u, v);
            }
        }
    }
    uf
}

/// Size of the largest weakly connected component among alive nodes.
/// Zero when nothing is alive; an isolated alive node counts as size 1.
#[must_use]
pub fn largest_component_size(g: &DepGraph, mask: &AliveMask) -> usize {
    let mut uf = union_alive(g, mask);
    let mut best = 0;
    for u in mask.alive_ids() {
        let s = uf.size_of(u);
        if s > best {
            best = s;
        }
    }
    best
}

/// Number of weakly connected components among alive nodes.
#[must_use]
pub fn component_count(g: &DepGraph, mask: &AliveMask) -> usize {
    component_stats(g, mask).1
}

/// (largest component size, component count) in one union-find pass. The
/// attack loop calls this after every batch, so the two numbers share work.
#[must_use]
pub fn component_stats(g: &DepGraph, mask: &AliveMask) -> (usize, usize) {
    let mut uf = union_alive(g, mask);
    let mut best = 0;
    let mut roots = 0;
    for u in mask.alive_ids() {
        if uf.find(u) == u {
            roots += 1;
        }
        let s = uf.size_of(u);
        if s > best {
            best = s;
        }
    }
    (best, roots)
}

/// Members of the largest component, ascending by id. Ties between
/// equal-sized components go to the one holding the lowest node id.
#[must_use]
pub fn largest_component_members(g: &DepGraph, mask: &AliveMask) -> Vec<NodeId> {
    let mut uf = union_alive(g, mask);
    let mut best_root = None;
    let mut best_size = 0;
    for u in mask.alive_ids() {
        let s = uf.size_of(u);
        if s > best_size {
            best_size = s;
            best_root = Some(uf.find(u));
        }
    }
    let Some(root) = best_root else {
        return Vec::new();
    };
    mask.alive_ids().filter(|&u| uf.find(u) == root).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    fn triangle_plus_isolate() -> DepGraph {
        let mut b = GraphBuilder::new("t");
        b.add_edge("a", "b").unwrap();
        b.add_edge("b", "c").unwrap();
        b.add_edge("c", "a").unwrap();
        b.add_node("lonely");
        b.build()
    }

    #[test]
    fn direction_is_ignored() {
        // a -> b <- c is one weak component.
        let mut b = GraphBuilder::new("t");
        b.add_edge("a", "b").unwrap();
        b.add_edge("c", "b").unwrap();
        let g = b.build();
        let mask = AliveMask::all_alive(g.node_count());
        assert_eq!(largest_component_size(&g, &mask), 3);
        assert_eq!(component_count(&g, &mask), 1);
    }

    #[test]
    fn isolated_nodes_are_singleton_components() {
        let g = triangle_plus_isolate();
        let mask = AliveMask::all_alive(g.node_count());
        assert_eq!(largest_component_size(&g, &mask), 3);
        assert_eq!(component_count(&g, &mask), 2);
    }

    #[test]
    fn killing_a_node_shrinks_the_component() {
        let g = triangle_plus_isolate();
        let mut mask = AliveMask::all_alive(g.node_count());
        mask.kill(g.node_id("a").unwrap());
        // b and c are still joined by the b -> c edge.
        assert_eq!(largest_component_size(&g, &mask), 2);
    }

    #[test]
    fn empty_mask_has_no_components() {
        let g = triangle_plus_isolate();
        let mut mask = AliveMask::all_alive(g.node_count());
        for id in 0..g.node_count() as u32 {
            mask.kill(id);
        }
        assert_eq!(largest_component_size(&g, &mask), 0);
        assert_eq!(component_count(&g, &mask), 0);
    }

    #[test]
    fn members_come_back_sorted() {
        let g = triangle_plus_isolate();
        let mask = AliveMask::all_alive(g.node_count());
        let members = largest_component_members(&g, &mask);
        assert_eq!(members.len(), 3);
        assert!(members.windows(2).all(|w| w[0] < w[1]));
    }
}

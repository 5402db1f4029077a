// src/graph/mask.rs
//! Node liveness overlay for attack simulation.
//!
//! Removal never touches [`DepGraph`](crate::graph::DepGraph); each run owns
//! a mask and flips bits in it. Resetting a mask is O(n), so repeated trials
//! against the same graph cost nothing to set up.

use crate::graph::NodeId;

#[derive(Clone)]
pub struct AliveMask {
    alive: Vec<bool>,
    count: usize,
}

impl AliveMask {
    #[must_use]
    pub fn all_alive(node_count: usize) -> Self {
        Self {
            alive: vec![true; node_count],
            count: node_count,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.alive.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.alive.len() - self.count
    }

    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.alive[id as usize]
    }

    /// Marks a node removed. Returns false if it was already dead, so a
    /// caller can count effective removals without a separate lookup.
    pub fn kill(&mut self, id: NodeId) -> bool {
        let slot = &mut self.alive[id as usize];
        if *slot {
            *slot = false;
            self.count -= 1;
            true
        } else {
            false
        }
    }

    pub fn revive_all(&mut self) {
        self.alive.fill(true);
        self.count = self.alive.len();
    }

    pub fn alive_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|(_, &a)| a)
            .map(|(i, _)| i as NodeId)
    }
}

#[cfg(test)]
mod tests {
    use super::AliveMask;

    #[test]
    fn kill_is_idempotent() {
        let mut m = AliveMask::all_alive(3);
        assert!(m.kill(1));
        assert!(!m.kill(1));
        assert_eq!(m.alive_count(), 2);
        assert_eq!(m.removed_count(), 1);
    }

    #[test]
    fn revive_restores_everything() {
        let mut m = AliveMask::all_alive(4);
        m.kill(0);
        m.kill(3);
        m.revive_all();
        assert_eq!(m.alive_count(), 4);
        assert!(m.is_alive(0) && m.is_alive(3));
    }

    #[test]
    fn alive_ids_skips_dead() {
        let mut m = AliveMask::all_alive(4);
        m.kill(2);
        let ids: Vec<u32> = m.alive_ids().collect();
        assert_eq!(ids, vec![0, 1, 3]);
    }
}

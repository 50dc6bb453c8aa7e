use arrayvec::ArrayVec;

use super::node::{NodeArena, NodeId};
use crate::{GoapError, Result, WorldState};

/// Capacity of each of the open and closed lists.
pub const STORAGE_CAPACITY: usize = 128;

/// Fixed-capacity open/closed lists.
///
/// Removal preserves insertion order, so the lowest index among equally cheap
/// open nodes is always the one inserted first.
#[derive(Debug, Default)]
pub(crate) struct SearchStorage {
    opened: ArrayVec<NodeId, STORAGE_CAPACITY>,
    closed: ArrayVec<NodeId, STORAGE_CAPACITY>,
}

impl SearchStorage {
    pub fn clear(&mut self) {
        self.opened.clear();
        self.closed.clear();
    }

    #[cfg(test)]
    pub fn opened_len(&self) -> usize {
        self.opened.len()
    }

    pub fn add_to_open(&mut self, id: NodeId) -> Result<()> {
        self.opened.try_push(id).map_err(|_| exhausted())
    }

    pub fn add_to_closed(&mut self, id: NodeId) -> Result<()> {
        self.closed.try_push(id).map_err(|_| exhausted())
    }

    /// Pop the open node with the lowest `g + h`, first inserted on ties.
    pub fn remove_cheapest_open(&mut self, arena: &NodeArena) -> Option<NodeId> {
        let mut best: Option<(usize, u32)> = None;
        for (index, id) in self.opened.iter().enumerate() {
            let cost = arena.get(*id).total_cost;
            match best {
                Some((_, lowest)) if cost >= lowest => {}
                _ => best = Some((index, cost)),
            }
        }
        let (index, _) = best?;
        Some(self.opened.remove(index))
    }

    /// First open node equal to `state` on the bits `state` cares about.
    pub fn find_opened(&self, arena: &NodeArena, state: &WorldState) -> Option<NodeId> {
        find(&self.opened, arena, state)
    }

    /// First closed node equal to `state` on the bits `state` cares about.
    pub fn find_closed(&self, arena: &NodeArena, state: &WorldState) -> Option<NodeId> {
        find(&self.closed, arena, state)
    }

    pub fn remove_opened(&mut self, id: NodeId) {
        if let Some(index) = self.opened.iter().position(|n| *n == id) {
            self.opened.remove(index);
        }
    }

    pub fn remove_closed(&mut self, id: NodeId) {
        if let Some(index) = self.closed.iter().position(|n| *n == id) {
            self.closed.remove(index);
        }
    }
}

fn find(list: &[NodeId], arena: &NodeArena, state: &WorldState) -> Option<NodeId> {
    list.iter()
        .copied()
        .find(|id| state.matches(&arena.get(*id).state))
}

fn exhausted() -> GoapError {
    GoapError::SearchSpaceExhausted {
        capacity: STORAGE_CAPACITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::node::SearchNode;

    fn node(state: WorldState, total_cost: u32) -> SearchNode {
        SearchNode {
            total_cost,
            ..SearchNode::root(state, 0)
        }
    }

    #[test]
    fn cheapest_open_prefers_earliest_on_ties() {
        let mut arena = NodeArena::default();
        let mut storage = SearchStorage::default();

        let expensive = arena.obtain(node(WorldState::new().with(0, true), 5));
        let first = arena.obtain(node(WorldState::new().with(1, true), 2));
        let second = arena.obtain(node(WorldState::new().with(2, true), 2));
        let third = arena.obtain(node(WorldState::new().with(3, true), 2));
        for id in [expensive, first, second, third] {
            storage.add_to_open(id).unwrap();
        }

        assert_eq!(storage.remove_cheapest_open(&arena), Some(first));
        // Removing a middle entry must not reorder the survivors.
        storage.remove_opened(third);
        assert_eq!(storage.remove_cheapest_open(&arena), Some(second));
        assert_eq!(storage.remove_cheapest_open(&arena), Some(expensive));
        assert_eq!(storage.remove_cheapest_open(&arena), None);
    }

    #[test]
    fn open_list_overflow_is_reported() {
        let mut arena = NodeArena::default();
        let mut storage = SearchStorage::default();
        for _ in 0..STORAGE_CAPACITY {
            let id = arena.obtain(node(WorldState::new(), 0));
            storage.add_to_open(id).unwrap();
        }

        let extra = arena.obtain(node(WorldState::new(), 0));
        let err = storage.add_to_open(extra).unwrap_err();
        assert!(matches!(
            err,
            GoapError::SearchSpaceExhausted {
                capacity: STORAGE_CAPACITY
            }
        ));
        assert_eq!(storage.opened_len(), STORAGE_CAPACITY);
    }

    #[test]
    fn lookup_uses_the_candidate_cared_bits() {
        let mut arena = NodeArena::default();
        let mut storage = SearchStorage::default();
        let stored = arena.obtain(node(WorldState::new().with(0, true).with(1, true), 1));
        storage.add_to_closed(stored).unwrap();

        let loose = WorldState::new().with(0, true);
        assert_eq!(storage.find_closed(&arena, &loose), Some(stored));

        let conflicting = WorldState::new().with(0, true).with(1, false);
        assert_eq!(storage.find_closed(&arena, &conflicting), None);
        assert_eq!(storage.find_opened(&arena, &loose), None);
    }
}

use crate::{ActionId, WorldState};

/// Handle to a node inside a [`NodeArena`]. Only valid during one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A* frontier record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchNode {
    pub state: WorldState,
    pub parent_state: WorldState,
    /// Cumulative action cost from the start state (`g`).
    pub cost_so_far: u32,
    /// Estimated remaining cost (`h`).
    pub heuristic: u32,
    /// `g + h`.
    pub total_cost: u32,
    /// Action that produced `state`; `None` for the root.
    pub action: Option<ActionId>,
    /// Arena handle of the parent; meaningless once the search has ended.
    pub parent: Option<NodeId>,
    /// Root is depth 1.
    pub depth: u32,
}

impl SearchNode {
    pub(crate) fn root(start: WorldState, heuristic: u32) -> Self {
        Self {
            state: start,
            parent_state: start,
            cost_so_far: 0,
            heuristic,
            total_cost: heuristic,
            action: None,
            parent: None,
            depth: 1,
        }
    }
}

/// Slab of search nodes reused across searches.
///
/// Nodes are never freed individually: a replaced node may still be the
/// parent of live ones. [`NodeArena::reset`] releases all of them at once and
/// keeps the allocation for the next search.
#[derive(Debug, Default)]
pub(crate) struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub fn obtain(&mut self, node: SearchNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn reset(&mut self) {
        self.nodes.clear();
    }
}

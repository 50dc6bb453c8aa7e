use core::ops::{Deref, DerefMut};

use super::node::NodeArena;
use super::storage::SearchStorage;
use crate::planner::Transition;
use crate::ActionId;

/// Scratch memory for planning: node arena, open/closed lists and the
/// transition buffer.
///
/// Every [`crate::ActionPlanner`] owns one. Hand a separate context to
/// [`crate::ActionPlanner::plan_with`] to plan against a shared planner from
/// several threads.
#[derive(Debug, Default)]
pub struct SearchContext {
    pub(crate) arena: NodeArena,
    pub(crate) storage: SearchStorage,
    pub(crate) transitions: Vec<Transition>,
    pub(crate) viable: Vec<ActionId>,
    last_nodes_allocated: usize,
}

impl SearchContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes created by the most recent search.
    pub fn nodes_allocated(&self) -> usize {
        self.last_nodes_allocated
    }

    /// Start a search. The returned guard releases every node and empties the
    /// lists when dropped, whichever way the search ends.
    pub(crate) fn session(&mut self) -> SearchSession<'_> {
        self.release();
        SearchSession { ctx: self }
    }

    fn release(&mut self) {
        self.storage.clear();
        self.arena.reset();
        self.transitions.clear();
        self.viable.clear();
    }
}

pub(crate) struct SearchSession<'a> {
    ctx: &'a mut SearchContext,
}

impl Deref for SearchSession<'_> {
    type Target = SearchContext;

    fn deref(&self) -> &SearchContext {
        self.ctx
    }
}

impl DerefMut for SearchSession<'_> {
    fn deref_mut(&mut self) -> &mut SearchContext {
        self.ctx
    }
}

impl Drop for SearchSession<'_> {
    fn drop(&mut self) {
        self.ctx.last_nodes_allocated = self.ctx.arena.len();
        self.ctx.release();
    }
}

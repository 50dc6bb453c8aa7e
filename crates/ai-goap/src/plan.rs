use crate::{Action, ActionId};

/// One planned step: the registered handle plus a copy of the action.
#[derive(Debug, Clone)]
pub struct PlannedStep {
    pub id: ActionId,
    pub action: Action,
}

/// Ordered plan produced by the planner.
///
/// Stored as a stack: the top is the first action to execute, so callers
/// drain it with [`ActionPlan::pop`] one step at a time.
#[derive(Debug, Clone, Default)]
pub struct ActionPlan {
    stack: Vec<PlannedStep>,
    cost: u32,
}

impl ActionPlan {
    pub(crate) fn new(cost: u32) -> Self {
        Self {
            stack: Vec::new(),
            cost,
        }
    }

    /// Push a step in front of the ones already planned.
    pub(crate) fn push(&mut self, step: PlannedStep) {
        self.stack.push(step);
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Sum of the costs of the actions found by the search.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Next action to run.
    pub fn peek(&self) -> Option<&PlannedStep> {
        self.stack.last()
    }

    /// Remove and return the next action to run.
    pub fn pop(&mut self) -> Option<PlannedStep> {
        self.stack.pop()
    }

    /// Remaining steps in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &PlannedStep> + '_ {
        self.stack.iter().rev()
    }

    pub fn ids(&self) -> Vec<ActionId> {
        self.iter().map(|step| step.id).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|step| step.action.name()).collect()
    }
}

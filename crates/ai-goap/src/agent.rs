use tracing::debug;

use crate::plan::{ActionPlan, PlannedStep};
use crate::search::SearchNode;
use crate::{ActionPlanner, Result, WorldState};

/// Supplies the live state of the world and the state the agent wants.
pub trait WorldSource {
    fn world_state(&self, planner: &ActionPlanner) -> WorldState;
    fn goal_state(&self, planner: &ActionPlanner) -> WorldState;
}

/// A source returning the same pair of states every time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedStates {
    pub world: WorldState,
    pub goal: WorldState,
}

impl WorldSource for FixedStates {
    fn world_state(&self, _planner: &ActionPlanner) -> WorldState {
        self.world
    }

    fn goal_state(&self, _planner: &ActionPlanner) -> WorldState {
        self.goal
    }
}

/// Binds a planner to a [`WorldSource`] and keeps the latest plan.
#[derive(Debug)]
pub struct Agent<S> {
    planner: ActionPlanner,
    source: S,
    actions: Option<ActionPlan>,
    plan_calls: u64,
}

impl<S> Agent<S>
where
    S: WorldSource,
{
    pub fn new(planner: ActionPlanner, source: S) -> Self {
        Self {
            planner,
            source,
            actions: None,
            plan_calls: 0,
        }
    }

    /// Replan from the source's current and goal states.
    ///
    /// Returns whether a non-empty plan is now available. With `debug` set,
    /// every node on the winning path is logged at `debug` level.
    pub fn plan(&mut self, debug: bool) -> Result<bool> {
        let start = self.source.world_state(&self.planner);
        let goal = self.source.goal_state(&self.planner);
        self.plan_calls = self.plan_calls.saturating_add(1);

        let mut selected = debug.then(Vec::new);
        match self.planner.plan(start, goal, selected.as_mut()) {
            Ok(plan) => self.actions = plan,
            Err(err) => {
                self.actions = None;
                return Err(err);
            }
        }

        if let (Some(nodes), Some(_)) = (selected.as_deref(), self.actions.as_ref()) {
            self.log_path(nodes);
        }
        Ok(self.has_action_plan())
    }

    pub fn has_action_plan(&self) -> bool {
        self.actions.as_ref().is_some_and(|plan| !plan.is_empty())
    }

    pub fn actions(&self) -> Option<&ActionPlan> {
        self.actions.as_ref()
    }

    pub fn actions_mut(&mut self) -> Option<&mut ActionPlan> {
        self.actions.as_mut()
    }

    pub fn take_actions(&mut self) -> Option<ActionPlan> {
        self.actions.take()
    }

    /// Pop the next action to execute from the current plan.
    pub fn next_action(&mut self) -> Option<PlannedStep> {
        self.actions.as_mut()?.pop()
    }

    pub fn planner(&self) -> &ActionPlanner {
        &self.planner
    }

    pub fn planner_mut(&mut self) -> &mut ActionPlanner {
        &mut self.planner
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Number of times [`Agent::plan`] ran.
    pub fn plan_calls(&self) -> u64 {
        self.plan_calls
    }

    fn log_path(&self, nodes: &[SearchNode]) {
        let cost = nodes.last().map_or(0, |node| node.cost_so_far);
        debug!(cost, steps = nodes.len().saturating_sub(1), "---- action plan ----");
        for (step, node) in nodes.iter().enumerate() {
            let action = node
                .action
                .and_then(|id| self.planner.action(id).ok())
                .map_or("start", |action| action.name());
            debug!(
                step,
                action,
                cost = node.cost_so_far,
                state = %node.state.describe(&self.planner),
                "Plan node"
            );
        }
    }
}

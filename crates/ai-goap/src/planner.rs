use core::fmt::Write as _;

use tracing::{debug, warn};

use crate::plan::ActionPlan;
use crate::search::{astar, SearchContext, SearchNode};
use crate::world_state::{ConditionIndex, MAX_CONDITIONS};
use crate::{Action, ActionId, GoapError, Result, WorldState};

/// A legal successor produced by applying one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub action: ActionId,
    pub state: WorldState,
    /// The action's own cost, not yet added to the path cost.
    pub cost: u32,
}

/// Registry of conditions and actions, and the entry point for planning.
#[derive(Debug, Default)]
pub struct ActionPlanner {
    condition_names: Vec<String>,
    actions: Vec<Action>,
    preconditions: Vec<WorldState>,
    postconditions: Vec<WorldState>,
    context: SearchContext,
}

impl ActionPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// A state that constrains nothing.
    pub fn world_state(&self) -> WorldState {
        WorldState::new()
    }

    pub fn condition_count(&self) -> usize {
        self.condition_names.len()
    }

    pub fn condition_index(&self, name: &str) -> Option<ConditionIndex> {
        self.condition_names.iter().position(|n| n == name)
    }

    pub fn condition_name(&self, index: ConditionIndex) -> Option<&str> {
        self.condition_names.get(index).map(String::as_str)
    }

    pub fn conditions(&self) -> impl Iterator<Item = (ConditionIndex, &str)> + '_ {
        self.condition_names
            .iter()
            .enumerate()
            .map(|(index, name)| (index, name.as_str()))
    }

    /// Index of `name`, registering it on first sight.
    pub fn find_or_create_condition_index(&mut self, name: &str) -> Result<ConditionIndex> {
        if let Some(index) = self.condition_index(name) {
            return Ok(index);
        }
        if self.condition_names.len() >= MAX_CONDITIONS {
            return Err(GoapError::ConditionCapacity {
                name: name.to_string(),
                capacity: MAX_CONDITIONS,
            });
        }
        self.condition_names.push(name.to_string());
        Ok(self.condition_names.len() - 1)
    }

    /// Set a condition on `state` by name, registering the name if needed.
    pub fn set_condition(&mut self, state: &mut WorldState, name: &str, value: bool) -> Result<()> {
        let index = self.find_or_create_condition_index(name)?;
        state.set(index, value);
        Ok(())
    }

    /// Build a state from already registered condition names.
    pub fn state_from(&self, conditions: &[(&str, bool)]) -> Result<WorldState> {
        let mut state = WorldState::new();
        for (name, value) in conditions {
            let index = self
                .condition_index(name)
                .ok_or_else(|| GoapError::UnknownCondition {
                    name: (*name).to_string(),
                })?;
            state.set(index, *value);
        }
        Ok(state)
    }

    /// Register an action and return its handle.
    ///
    /// Either every condition the action names gets registered or, when the
    /// table would overflow, none of them and the planner is left untouched.
    pub fn add_action(&mut self, action: Action) -> Result<ActionId> {
        if action.cost() == 0 {
            return Err(GoapError::ZeroCost {
                action: action.name().to_string(),
            });
        }

        let mut fresh: Vec<&str> = Vec::new();
        for (name, _) in action.preconditions().iter().chain(action.postconditions()) {
            if self.condition_index(name).is_none() && !fresh.contains(&name.as_str()) {
                fresh.push(name);
            }
        }
        let room = MAX_CONDITIONS - self.condition_names.len();
        if fresh.len() > room {
            return Err(GoapError::ConditionCapacity {
                name: fresh[room].to_string(),
                capacity: MAX_CONDITIONS,
            });
        }

        let mut pre = WorldState::new();
        for (name, value) in action.preconditions() {
            let index = self.find_or_create_condition_index(name)?;
            pre.set(index, *value);
        }
        let mut post = WorldState::new();
        for (name, value) in action.postconditions() {
            let index = self.find_or_create_condition_index(name)?;
            post.set(index, *value);
        }

        let id = ActionId(self.actions.len());
        debug!(action = %action.name(), id = %id, cost = action.cost(), "Registered action");
        self.actions.push(action);
        self.preconditions.push(pre);
        self.postconditions.push(post);
        Ok(id)
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    pub fn actions(&self) -> impl Iterator<Item = (ActionId, &Action)> + '_ {
        self.actions
            .iter()
            .enumerate()
            .map(|(index, action)| (ActionId(index), action))
    }

    pub fn action(&self, id: ActionId) -> Result<&Action> {
        self.actions
            .get(id.0)
            .ok_or(GoapError::UnknownAction { id })
    }

    pub fn preconditions(&self, id: ActionId) -> Result<WorldState> {
        self.preconditions
            .get(id.0)
            .copied()
            .ok_or(GoapError::UnknownAction { id })
    }

    pub fn postconditions(&self, id: ActionId) -> Result<WorldState> {
        self.postconditions
            .get(id.0)
            .copied()
            .ok_or(GoapError::UnknownAction { id })
    }

    /// Scratch memory used by [`ActionPlanner::plan`].
    pub fn context(&self) -> &SearchContext {
        &self.context
    }

    /// Actions whose validator currently accepts them.
    pub fn viable_actions(&self) -> Vec<ActionId> {
        let mut viable = Vec::with_capacity(self.actions.len());
        self.viable_actions_into(&mut viable);
        viable
    }

    fn viable_actions_into(&self, out: &mut Vec<ActionId>) {
        out.clear();
        out.extend(
            self.actions()
                .filter(|(_, action)| action.validate())
                .map(|(id, _)| id),
        );
    }

    /// Successors of `from` over the currently viable actions.
    pub fn possible_transitions(&self, from: &WorldState) -> Vec<Transition> {
        let mut out = Vec::new();
        self.transitions_into(&self.viable_actions(), from, &mut out);
        out
    }

    /// Fill `out` with the successors of `from` reachable through `viable`.
    pub fn transitions_into(&self, viable: &[ActionId], from: &WorldState, out: &mut Vec<Transition>) {
        out.clear();
        for &id in viable {
            let Some(pre) = self.preconditions.get(id.0) else {
                continue;
            };
            if !pre.matches(from) {
                continue;
            }
            out.push(Transition {
                action: id,
                state: self.apply(id.0, from),
                cost: self.actions[id.0].cost(),
            });
        }
    }

    /// State reached by applying the action's postconditions to `from`.
    ///
    /// Bits the postcondition constrains take its values; the result cares
    /// about every bit either `from` or the postcondition cared about.
    pub fn apply_postconditions(&self, id: ActionId, from: &WorldState) -> Result<WorldState> {
        if id.0 >= self.postconditions.len() {
            return Err(GoapError::UnknownAction { id });
        }
        Ok(self.apply(id.0, from))
    }

    fn apply(&self, index: usize, from: &WorldState) -> WorldState {
        let post = self.postconditions[index];
        let affected = post.cared_mask();
        WorldState::from_raw(
            (from.values() & !affected) | (post.values() & affected),
            from.dont_care() & post.dont_care(),
        )
    }

    /// Plan from `start` to a state matching `goal` using the planner's own
    /// search context.
    ///
    /// Returns `Ok(None)` when the goal is unreachable with the currently
    /// valid actions. When `selected` is supplied it receives a copy of every
    /// node on the winning path, root first.
    pub fn plan(
        &mut self,
        start: WorldState,
        goal: WorldState,
        selected: Option<&mut Vec<SearchNode>>,
    ) -> Result<Option<ActionPlan>> {
        let mut context = std::mem::take(&mut self.context);
        let result = self.plan_with(&mut context, start, goal, selected);
        self.context = context;
        result
    }

    /// Same as [`ActionPlanner::plan`] with caller-provided scratch memory.
    pub fn plan_with(
        &self,
        context: &mut SearchContext,
        start: WorldState,
        goal: WorldState,
        selected: Option<&mut Vec<SearchNode>>,
    ) -> Result<Option<ActionPlan>> {
        let mut session = context.session();
        self.viable_actions_into(&mut session.viable);
        debug!(
            viable = session.viable.len(),
            actions = self.actions.len(),
            start = %start,
            goal = %goal,
            "Planning"
        );

        let result = astar::search(self, &mut session, start, goal, selected);
        match &result {
            Ok(Some(plan)) => {
                debug!(steps = plan.len(), cost = plan.cost(), "Plan found");
            }
            Ok(None) => debug!("Goal unreachable with current actions"),
            Err(err) => warn!(error = %err, "Planning aborted"),
        }
        result
    }

    /// Human-readable dump of every action's templates.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for (index, action) in self.actions.iter().enumerate() {
            let _ = writeln!(out, "{}: {}", ActionId(index), action.name());
            self.describe_bits(&mut out, &self.preconditions[index], "==");
            self.describe_bits(&mut out, &self.postconditions[index], ":=");
        }
        out
    }

    fn describe_bits(&self, out: &mut String, state: &WorldState, op: &str) {
        for (index, name) in self.conditions() {
            if let Some(value) = state.get(index) {
                let _ = writeln!(out, "  {name}{op}{}", u8::from(value));
            }
        }
    }
}

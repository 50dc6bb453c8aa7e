use core::fmt;
use std::sync::Arc;

/// Handle returned by [`crate::ActionPlanner::add_action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActionId(pub(crate) usize);

impl ActionId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

type Validator = Arc<dyn Fn() -> bool + Send + Sync>;

/// A named operator with a cost, preconditions and postconditions.
///
/// Conditions are referenced by name; the planner interns them when the
/// action is registered. Setting the same name twice with different values is
/// not checked.
#[derive(Clone)]
pub struct Action {
    name: String,
    cost: u32,
    preconditions: Vec<(String, bool)>,
    postconditions: Vec<(String, bool)>,
    validator: Option<Validator>,
}

impl Action {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cost: 1,
            preconditions: Vec::new(),
            postconditions: Vec::new(),
            validator: None,
        }
    }

    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_precondition(mut self, name: impl Into<String>, value: bool) -> Self {
        self.set_precondition(name, value);
        self
    }

    pub fn with_postcondition(mut self, name: impl Into<String>, value: bool) -> Self {
        self.set_postcondition(name, value);
        self
    }

    /// Install the applicability hook consulted once per planning call.
    ///
    /// An action whose validator returns `false` is left out of the whole
    /// search, not just of one branch.
    pub fn with_validator(mut self, validator: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    pub fn set_precondition(&mut self, name: impl Into<String>, value: bool) {
        self.preconditions.push((name.into(), value));
    }

    pub fn set_postcondition(&mut self, name: impl Into<String>, value: bool) {
        self.postconditions.push((name.into(), value));
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn preconditions(&self) -> &[(String, bool)] {
        &self.preconditions
    }

    pub fn postconditions(&self) -> &[(String, bool)] {
        &self.postconditions
    }

    pub fn validate(&self) -> bool {
        self.validator.as_ref().map_or(true, |validate| validate())
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("cost", &self.cost)
            .field("preconditions", &self.preconditions)
            .field("postconditions", &self.postconditions)
            .field("validator", &self.validator.is_some())
            .finish()
    }
}

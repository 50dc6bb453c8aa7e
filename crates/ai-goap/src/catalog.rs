//! Declarative action catalogs loaded from YAML or JSON.
//!
//! ```yaml
//! actions:
//!   - name: chop_tree
//!     post: { has_axe: true }
//!   - name: collect_wood
//!     cost: 2
//!     pre: { has_axe: true }
//!     post: { has_wood: true }
//! start: { has_axe: false, has_wood: false }
//! goal: { has_wood: true }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Action, ActionId, ActionPlanner, GoapError, Result, WorldState};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionCatalog {
    pub actions: Vec<ActionSpec>,
    /// Initial world state, by condition name.
    pub start: BTreeMap<String, bool>,
    /// Desired conditions; everything else is left unconstrained.
    pub goal: BTreeMap<String, bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSpec {
    pub name: String,

    #[serde(default = "default_cost")]
    pub cost: u32,

    #[serde(default)]
    pub pre: BTreeMap<String, bool>,

    #[serde(default)]
    pub post: BTreeMap<String, bool>,
}

fn default_cost() -> u32 {
    1
}

impl ActionSpec {
    pub fn to_action(&self) -> Action {
        let mut action = Action::new(self.name.clone()).with_cost(self.cost);
        for (name, value) in &self.pre {
            action.set_precondition(name.clone(), *value);
        }
        for (name, value) in &self.post {
            action.set_postcondition(name.clone(), *value);
        }
        action
    }
}

impl ActionCatalog {
    pub fn from_yaml_str(input: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(input)?)
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a catalog, picking the format from the file extension.
    pub fn load(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let read = || {
            std::fs::read_to_string(path).map_err(|source| GoapError::CatalogIo {
                path: path.to_path_buf(),
                source,
            })
        };

        match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str(&read()?),
            Some("json") => Self::from_json_str(&read()?),
            _ => Err(GoapError::CatalogFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Register every action, in file order, with a fresh planner.
    ///
    /// Conditions mentioned only in `start` or `goal` are registered too, so
    /// the states can always be built afterwards.
    pub fn build_planner(&self) -> Result<(ActionPlanner, Vec<ActionId>)> {
        let mut planner = ActionPlanner::new();
        let mut ids = Vec::with_capacity(self.actions.len());
        for spec in &self.actions {
            ids.push(planner.add_action(spec.to_action())?);
        }
        for name in self.start.keys().chain(self.goal.keys()) {
            planner.find_or_create_condition_index(name)?;
        }
        Ok((planner, ids))
    }

    pub fn start_state(&self, planner: &ActionPlanner) -> Result<WorldState> {
        state_from_map(planner, &self.start)
    }

    pub fn goal_state(&self, planner: &ActionPlanner) -> Result<WorldState> {
        state_from_map(planner, &self.goal)
    }
}

fn state_from_map(planner: &ActionPlanner, conditions: &BTreeMap<String, bool>) -> Result<WorldState> {
    let pairs: Vec<(&str, bool)> = conditions
        .iter()
        .map(|(name, value)| (name.as_str(), *value))
        .collect();
    planner.state_from(&pairs)
}

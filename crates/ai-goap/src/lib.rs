//! STRIPS-style goal-oriented action planning over named boolean conditions.
//!
//! Conditions are interned per [`ActionPlanner`] into bits of a 64-bit
//! [`WorldState`]; actions declare preconditions and postconditions by name
//! and the planner runs A* with a fixed 128-node frontier to find the
//! cheapest [`ActionPlan`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod action;
pub mod agent;
#[cfg(feature = "catalog")]
#[cfg_attr(docsrs, doc(cfg(feature = "catalog")))]
pub mod catalog;
pub mod error;
pub mod plan;
pub mod planner;
pub mod search;
pub mod world_state;

pub use action::{Action, ActionId};
pub use agent::{Agent, FixedStates, WorldSource};
#[cfg(feature = "catalog")]
#[cfg_attr(docsrs, doc(cfg(feature = "catalog")))]
pub use catalog::{ActionCatalog, ActionSpec};
pub use error::{GoapError, Result};
pub use plan::{ActionPlan, PlannedStep};
pub use planner::{ActionPlanner, Transition};
pub use search::{SearchContext, SearchNode, STORAGE_CAPACITY};
pub use world_state::{ConditionIndex, WorldState, MAX_CONDITIONS};

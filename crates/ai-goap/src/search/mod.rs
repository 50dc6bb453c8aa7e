//! A* over partial world states with fixed-capacity open/closed lists.

pub mod astar;
mod context;
mod node;
mod storage;

pub use astar::heuristic;
pub use context::SearchContext;
pub use node::{NodeId, SearchNode};
pub use storage::STORAGE_CAPACITY;

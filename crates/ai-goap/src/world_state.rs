use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ActionPlanner;

/// Maximum number of distinct conditions a single planner can track.
pub const MAX_CONDITIONS: usize = 64;

/// Index of a condition inside one planner's name table.
pub type ConditionIndex = usize;

/// Partial assignment of the planner's boolean conditions.
///
/// `values` holds the truth value of every condition, `dont_care` marks the
/// conditions this state does not constrain. A fresh state constrains nothing.
///
/// `PartialEq` is structural. Use [`WorldState::matches`] for goal/precondition
/// satisfaction, which only looks at the bits the receiver cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldState {
    values: u64,
    dont_care: u64,
}

impl Default for WorldState {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldState {
    pub const fn new() -> Self {
        Self {
            values: 0,
            dont_care: u64::MAX,
        }
    }

    pub const fn from_raw(values: u64, dont_care: u64) -> Self {
        Self { values, dont_care }
    }

    pub const fn values(&self) -> u64 {
        self.values
    }

    pub const fn dont_care(&self) -> u64 {
        self.dont_care
    }

    /// Bits this state constrains.
    pub const fn cared_mask(&self) -> u64 {
        !self.dont_care
    }

    /// Assign a condition and mark it as cared about.
    ///
    /// # Panics
    ///
    /// Panics if `index >= MAX_CONDITIONS`.
    pub fn set(&mut self, index: ConditionIndex, value: bool) {
        assert!(
            index < MAX_CONDITIONS,
            "condition index {index} out of range (max {MAX_CONDITIONS})"
        );
        let bit = 1u64 << index;
        if value {
            self.values |= bit;
        } else {
            self.values &= !bit;
        }
        self.dont_care &= !bit;
    }

    /// Builder form of [`WorldState::set`].
    ///
    /// # Panics
    ///
    /// Panics if `index >= MAX_CONDITIONS`.
    pub fn with(mut self, index: ConditionIndex, value: bool) -> Self {
        self.set(index, value);
        self
    }

    /// Stop constraining a condition.
    ///
    /// # Panics
    ///
    /// Panics if `index >= MAX_CONDITIONS`.
    pub fn clear(&mut self, index: ConditionIndex) {
        assert!(
            index < MAX_CONDITIONS,
            "condition index {index} out of range (max {MAX_CONDITIONS})"
        );
        let bit = 1u64 << index;
        self.values &= !bit;
        self.dont_care |= bit;
    }

    pub fn is_cared(&self, index: ConditionIndex) -> bool {
        index < MAX_CONDITIONS && self.dont_care & (1u64 << index) == 0
    }

    /// Value of a cared-about condition, `None` when unconstrained.
    pub fn get(&self, index: ConditionIndex) -> Option<bool> {
        if !self.is_cared(index) {
            return None;
        }
        Some(self.values & (1u64 << index) != 0)
    }

    /// Asymmetric match: `other` agrees with every bit `self` cares about.
    ///
    /// Bits `other` constrains but `self` leaves open are ignored, so a goal
    /// naming a single condition matches any state that has it.
    pub fn matches(&self, other: &WorldState) -> bool {
        let care = self.cared_mask();
        (self.values & care) == (other.values & care)
    }

    /// Condition names this state constrains, upper-cased when true.
    pub fn describe(&self, planner: &ActionPlanner) -> String {
        let mut out = String::new();
        for index in 0..MAX_CONDITIONS {
            let Some(value) = self.get(index) else {
                continue;
            };
            let Some(name) = planner.condition_name(index) else {
                continue;
            };
            if value {
                out.push_str(&name.to_uppercase());
            } else {
                out.push_str(name);
            }
            out.push(',');
        }
        out
    }
}

impl fmt::Display for WorldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "values={:#018x} care={:#018x}",
            self.values,
            self.cared_mask()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_constrains_nothing() {
        let state = WorldState::new();
        assert_eq!(state.cared_mask(), 0);
        assert_eq!(state.get(0), None);
        assert!(state.matches(&WorldState::new().with(3, true)));
    }

    #[test]
    fn set_clears_dont_care_and_overwrites_value() {
        let mut state = WorldState::new();
        state.set(5, true);
        assert_eq!(state.get(5), Some(true));
        assert!(state.is_cared(5));

        state.set(5, false);
        assert_eq!(state.get(5), Some(false));
        assert_eq!(state.values(), 0);
        assert_eq!(state.cared_mask(), 1 << 5);
    }

    #[test]
    fn clear_releases_a_condition() {
        let mut state = WorldState::new().with(2, true).with(7, false);
        state.clear(2);
        assert_eq!(state.get(2), None);
        assert_eq!(state.cared_mask(), 1 << 7);
    }

    #[test]
    fn highest_bit_is_addressable() {
        let state = WorldState::new().with(63, true);
        assert_eq!(state.get(63), Some(true));
        assert_eq!(state.values(), 1 << 63);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn set_rejects_index_past_capacity() {
        WorldState::new().set(MAX_CONDITIONS, true);
    }

    #[test]
    fn matches_only_inspects_receiver_bits() {
        let goal = WorldState::new().with(1, true);
        let state = WorldState::new().with(0, false).with(1, true).with(2, true);
        assert!(goal.matches(&state));
        // The reverse direction cares about bits 0 and 2 which `goal` leaves at 0.
        assert!(!state.matches(&goal));
    }
}

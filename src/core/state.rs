//! Engine lifecycle states.
//!
//! The engine is always in exactly one of five states. The state decides how
//! a classified input is interpreted, so every handler in the engine starts
//! by matching on it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which operand a state addresses.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Slot {
    First,
    Second,
}

/// Lifecycle state of the calculator engine.
///
/// ```text
/// WaitingFirst -> EnteringFirst -> WaitingSecond -> EnteringSecond -> ShowingResult
///                       ^                |
///                       +----- erase ----+
/// ```
///
/// Every state returns to `WaitingFirst` on clear.
///
/// # Example
///
/// ```rust
/// use keycalc::core::{EngineState, Slot};
///
/// let state = EngineState::WaitingSecond;
/// assert!(state.is_waiting());
/// assert_eq!(state.slot(), Some(Slot::Second));
/// assert_eq!(state.name(), "WaitingSecond");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum EngineState {
    /// Nothing typed yet for the first operand (a sign may be pending).
    #[default]
    WaitingFirst,
    /// The first operand holds at least one character.
    EnteringFirst,
    /// An operation is chosen, nothing typed yet for the second operand.
    WaitingSecond,
    /// The second operand holds at least one character.
    EnteringSecond,
    /// A result has been computed; only clear leaves this state.
    ShowingResult,
}

impl EngineState {
    /// Get the state's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::WaitingFirst => "WaitingFirst",
            Self::EnteringFirst => "EnteringFirst",
            Self::WaitingSecond => "WaitingSecond",
            Self::EnteringSecond => "EnteringSecond",
            Self::ShowingResult => "ShowingResult",
        }
    }

    /// True when the addressed operand has no digits yet.
    pub fn is_waiting(&self) -> bool {
        matches!(self, Self::WaitingFirst | Self::WaitingSecond)
    }

    /// True when the addressed operand holds at least one character.
    pub fn is_entering(&self) -> bool {
        matches!(self, Self::EnteringFirst | Self::EnteringSecond)
    }

    /// The operand this state edits, if any.
    pub fn slot(&self) -> Option<Slot> {
        match self {
            Self::WaitingFirst | Self::EnteringFirst => Some(Slot::First),
            Self::WaitingSecond | Self::EnteringSecond => Some(Slot::Second),
            Self::ShowingResult => None,
        }
    }

    /// The entering state reached when a digit lands in a waiting state.
    pub(crate) fn entering(slot: Slot) -> Self {
        match slot {
            Slot::First => Self::EnteringFirst,
            Slot::Second => Self::EnteringSecond,
        }
    }

    /// The waiting state reached when an operand is erased down to nothing.
    pub(crate) fn waiting(slot: Slot) -> Self {
        match slot {
            Slot::First => Self::WaitingFirst,
            Slot::Second => Self::WaitingSecond,
        }
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EngineState; 5] = [
        EngineState::WaitingFirst,
        EngineState::EnteringFirst,
        EngineState::WaitingSecond,
        EngineState::EnteringSecond,
        EngineState::ShowingResult,
    ];

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(EngineState::WaitingFirst.name(), "WaitingFirst");
        assert_eq!(EngineState::EnteringFirst.name(), "EnteringFirst");
        assert_eq!(EngineState::WaitingSecond.name(), "WaitingSecond");
        assert_eq!(EngineState::EnteringSecond.name(), "EnteringSecond");
        assert_eq!(EngineState::ShowingResult.name(), "ShowingResult");
    }

    #[test]
    fn default_state_is_waiting_first() {
        assert_eq!(EngineState::default(), EngineState::WaitingFirst);
    }

    #[test]
    fn waiting_and_entering_are_disjoint() {
        for state in ALL {
            assert!(!(state.is_waiting() && state.is_entering()), "{state}");
        }
        assert!(!EngineState::ShowingResult.is_waiting());
        assert!(!EngineState::ShowingResult.is_entering());
    }

    #[test]
    fn slot_follows_operand() {
        assert_eq!(EngineState::WaitingFirst.slot(), Some(Slot::First));
        assert_eq!(EngineState::EnteringFirst.slot(), Some(Slot::First));
        assert_eq!(EngineState::WaitingSecond.slot(), Some(Slot::Second));
        assert_eq!(EngineState::EnteringSecond.slot(), Some(Slot::Second));
        assert_eq!(EngineState::ShowingResult.slot(), None);
    }

    #[test]
    fn entering_and_waiting_map_back_to_slot() {
        for slot in [Slot::First, Slot::Second] {
            assert_eq!(EngineState::entering(slot).slot(), Some(slot));
            assert_eq!(EngineState::waiting(slot).slot(), Some(slot));
            assert!(EngineState::entering(slot).is_entering());
            assert!(EngineState::waiting(slot).is_waiting());
        }
    }

    #[test]
    fn state_serializes_correctly() {
        let state = EngineState::EnteringSecond;
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, "\"EnteringSecond\"");
        let deserialized: EngineState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}

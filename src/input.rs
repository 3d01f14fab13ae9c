//! Input classification.
//!
//! Maps a raw key character to the kind of edit it requests. The mapping is
//! pure; only `-` depends on the engine state, because it is either a sign
//! or the subtract operator.

use crate::core::EngineState;
use serde::{Deserialize, Serialize};

/// Semantic category of a key.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum InputCategory {
    Digit,
    Operation,
    Sign,
    DecimalPoint,
    Erase,
    Clear,
    Calculate,
    /// Not a calculator key, or `-` where it means nothing.
    Incorrect,
}

/// Classify `c` given the engine's current state.
///
/// # Example
///
/// ```rust
/// use keycalc::core::EngineState;
/// use keycalc::input::{classify, InputCategory};
///
/// assert_eq!(classify('-', EngineState::WaitingFirst), InputCategory::Sign);
/// assert_eq!(classify('-', EngineState::EnteringFirst), InputCategory::Operation);
/// assert_eq!(classify('-', EngineState::EnteringSecond), InputCategory::Incorrect);
/// ```
pub fn classify(c: char, state: EngineState) -> InputCategory {
    if c.is_ascii_digit() {
        return InputCategory::Digit;
    }

    match c {
        '.' | ',' => InputCategory::DecimalPoint,
        'e' => InputCategory::Erase,
        'c' => InputCategory::Clear,
        '=' => InputCategory::Calculate,
        '+' | '*' | '/' => InputCategory::Operation,
        '-' => match state {
            EngineState::WaitingFirst | EngineState::WaitingSecond => InputCategory::Sign,
            EngineState::EnteringFirst => InputCategory::Operation,
            EngineState::EnteringSecond | EngineState::ShowingResult => InputCategory::Incorrect,
        },
        _ => InputCategory::Incorrect,
    }
}

//! Binary operations and the arithmetic evaluator.

use serde::{Deserialize, Serialize};

/// Message carried by the invalid outcome of a division by zero.
pub const DIVISION_BY_ZERO: &str = "Division by zero";

/// The pending operation.
///
/// `None` means no operation has been chosen yet. It is never handed to
/// [`evaluate`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum Operation {
    #[default]
    None,
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    /// Parse an operator key.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Symbol shown between the operands; empty for `None`.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Result of a calculation.
///
/// Division by zero is an ordinary outcome, not an error.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum Outcome {
    Value(f64),
    Invalid { message: String },
}

impl Outcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(value) => Some(*value),
            Self::Invalid { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Value(_) => None,
            Self::Invalid { message } => Some(message),
        }
    }
}

/// Apply `operation` to two signed operands.
///
/// # Panics
///
/// Panics when `operation` is [`Operation::None`]; the engine only calculates
/// once an operation is pending.
///
/// # Example
///
/// ```rust
/// use keycalc::core::{evaluate, Operation, Outcome, DIVISION_BY_ZERO};
///
/// assert_eq!(evaluate(5.0, 3.0, Operation::Add), Outcome::Value(8.0));
/// assert_eq!(evaluate(7.0, 0.0, Operation::Divide).message(), Some(DIVISION_BY_ZERO));
/// ```
pub fn evaluate(first: f64, second: f64, operation: Operation) -> Outcome {
    match operation {
        Operation::Add => Outcome::Value(first + second),
        Operation::Subtract => Outcome::Value(first - second),
        Operation::Multiply => Outcome::Value(first * second),
        Operation::Divide if second == 0.0 => Outcome::Invalid {
            message: DIVISION_BY_ZERO.to_string(),
        },
        Operation::Divide => Outcome::Value(first / second),
        Operation::None => unreachable!("evaluate called without a pending operation"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_symbol_parses_operators() {
        assert_eq!(Operation::from_symbol('+'), Some(Operation::Add));
        assert_eq!(Operation::from_symbol('-'), Some(Operation::Subtract));
        assert_eq!(Operation::from_symbol('*'), Some(Operation::Multiply));
        assert_eq!(Operation::from_symbol('/'), Some(Operation::Divide));
        assert_eq!(Operation::from_symbol('x'), None);
        assert_eq!(Operation::from_symbol('='), None);
    }

    #[test]
    fn symbol_round_trips_through_from_symbol() {
        for op in [
            Operation::Add,
            Operation::Subtract,
            Operation::Multiply,
            Operation::Divide,
        ] {
            let c = op.symbol().chars().next().unwrap();
            assert_eq!(Operation::from_symbol(c), Some(op));
        }
        assert_eq!(Operation::None.symbol(), "");
    }

    #[test]
    fn arithmetic() {
        assert_eq!(evaluate(5.0, 3.0, Operation::Add), Outcome::Value(8.0));
        assert_eq!(evaluate(5.0, 3.0, Operation::Subtract), Outcome::Value(2.0));
        assert_eq!(evaluate(5.0, 3.0, Operation::Multiply), Outcome::Value(15.0));
        assert_eq!(evaluate(6.0, -3.0, Operation::Divide), Outcome::Value(-2.0));
    }

    #[test]
    fn division_by_zero_is_invalid() {
        let outcome = evaluate(7.0, 0.0, Operation::Divide);
        assert!(!outcome.is_valid());
        assert_eq!(outcome.value(), None);
        assert_eq!(outcome.message(), Some("Division by zero"));
    }

    #[test]
    fn division_by_negative_zero_is_invalid() {
        let outcome = evaluate(7.0, -0.0, Operation::Divide);
        assert_eq!(outcome.message(), Some(DIVISION_BY_ZERO));
    }

    #[test]
    #[should_panic(expected = "without a pending operation")]
    fn evaluate_without_operation_panics() {
        evaluate(1.0, 2.0, Operation::None);
    }

    #[test]
    fn outcome_serializes_correctly() {
        let outcome = Outcome::Invalid {
            message: DIVISION_BY_ZERO.to_string(),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        let deserialized: Outcome = serde_json::from_str(&json).unwrap();
        assert_eq!(outcome, deserialized);
    }
}

//! Operand accumulators.
//!
//! An operand is the text the user has typed for one side of the
//! expression, plus its sign. The numeric value is derived from the text on
//! demand and always parsed with `.` as the separator, whatever the display
//! locale.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Separator stored in operand text.
pub const DECIMAL_POINT: char = '.';

/// Sign of an operand.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum Sign {
    #[default]
    Positive,
    Negative,
}

impl Sign {
    /// `1.0` or `-1.0`.
    pub fn factor(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }

    /// Text shown in front of the operand.
    pub fn indicator(self) -> &'static str {
        match self {
            Self::Positive => "",
            Self::Negative => "-",
        }
    }

    pub fn is_negative(self) -> bool {
        matches!(self, Self::Negative)
    }
}

/// Reasons a stored operand cannot have been produced by typing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OperandError {
    #[error("unexpected character {0:?} in operand")]
    UnexpectedCharacter(char),

    #[error("operand contains more than one decimal point")]
    MultipleDecimalPoints,

    #[error("operand starts with a decimal point")]
    LeadingDecimalPoint,

    #[error("operand starts with a redundant zero")]
    LeadingZeros,

    #[error("decimal point flag is {flag} but text is {digits:?}")]
    DecimalFlagMismatch { flag: bool, digits: String },
}

/// One side of the expression.
///
/// # Example
///
/// ```rust
/// use keycalc::core::{Operand, Sign};
///
/// let mut operand = Operand::new();
/// operand.set_negative();
/// operand.push_digit('4');
/// operand.push_decimal_point();
/// operand.push_digit('5');
///
/// assert_eq!(operand.digits(), "4.5");
/// assert_eq!(operand.sign(), Sign::Negative);
/// assert_eq!(operand.signed_value(), Some(-4.5));
/// ```
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Operand {
    digits: String,
    sign: Sign,
    has_decimal_point: bool,
}

impl Operand {
    pub fn new() -> Self {
        Self::default()
    }

    /// The typed text, `.` as separator.
    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn has_decimal_point(&self) -> bool {
        self.has_decimal_point
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Unsigned numeric value, `None` while nothing is typed.
    pub fn value(&self) -> Option<f64> {
        if self.digits.is_empty() {
            return None;
        }
        self.digits.parse().ok()
    }

    /// Numeric value with the sign applied.
    pub fn signed_value(&self) -> Option<f64> {
        self.value().map(|value| value * self.sign.factor())
    }

    /// Append a digit. Returns `false` when the digit was rejected.
    ///
    /// A second `0` after a lone `0` is rejected so the text never starts
    /// with `00`.
    pub fn push_digit(&mut self, digit: char) -> bool {
        debug_assert!(digit.is_ascii_digit(), "not a digit: {digit:?}");
        if digit == '0' && self.digits == "0" {
            return false;
        }
        self.digits.push(digit);
        true
    }

    /// Append the decimal point unless one is already present.
    pub fn push_decimal_point(&mut self) -> bool {
        if self.has_decimal_point {
            return false;
        }
        self.digits.push(DECIMAL_POINT);
        self.has_decimal_point = true;
        true
    }

    /// Remove the last character, keeping the decimal flag in step.
    pub fn pop(&mut self) -> Option<char> {
        let removed = self.digits.pop()?;
        if removed == DECIMAL_POINT {
            self.has_decimal_point = false;
        }
        Some(removed)
    }

    pub fn set_negative(&mut self) {
        self.sign = Sign::Negative;
    }

    /// Drop a pending minus sign. Returns whether the sign was negative.
    pub fn clear_sign(&mut self) -> bool {
        let was_negative = self.sign.is_negative();
        self.sign = Sign::Positive;
        was_negative
    }

    /// Empty text, positive sign, no decimal point.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check that the operand could have been produced by typing.
    pub fn validate(&self) -> Result<(), OperandError> {
        if let Some(c) = self
            .digits
            .chars()
            .find(|c| !c.is_ascii_digit() && *c != DECIMAL_POINT)
        {
            return Err(OperandError::UnexpectedCharacter(c));
        }

        let points = self.digits.matches(DECIMAL_POINT).count();
        if points > 1 {
            return Err(OperandError::MultipleDecimalPoints);
        }
        if (points == 1) != self.has_decimal_point {
            return Err(OperandError::DecimalFlagMismatch {
                flag: self.has_decimal_point,
                digits: self.digits.clone(),
            });
        }
        if self.digits.starts_with(DECIMAL_POINT) {
            return Err(OperandError::LeadingDecimalPoint);
        }
        if self.digits.starts_with("00") {
            return Err(OperandError::LeadingZeros);
        }
        Ok(())
    }
}

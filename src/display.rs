//! Rendering of engine state for the terminal adapter.
//!
//! The adapter pulls a [`Readout`] after every key. All fields are plain
//! text; the adapter decides where to draw them.

use crate::config::DisplayConfig;
use crate::core::{Operand, Outcome, DECIMAL_POINT};
use crate::engine::Engine;
use serde::Serialize;
use std::fmt;

/// Help line shown above the expression in interactive mode.
pub const HELP: &str = "C to clear, Enter to calculate, Esc to close";

/// Significant digits kept when printing a computed value.
const SIGNIFICANT_DIGITS: usize = 15;

/// Magnitudes below this print in exponent notation.
const SMALLEST_PLAIN: f64 = 1e-5;

/// Magnitudes at or above this print in exponent notation.
const LARGEST_PLAIN: f64 = 1e15;

/// Display fields derived from an engine.
///
/// # Example
///
/// ```rust
/// use keycalc::config::{DecimalSeparator, DisplayConfig};
/// use keycalc::display::Readout;
/// use keycalc::Engine;
///
/// let mut engine = Engine::new();
/// for c in "-1.5*2=".chars() {
///     engine.process(c);
/// }
///
/// let readout = Readout::from_engine(&engine, &DisplayConfig::with_separator(DecimalSeparator::Comma));
/// assert_eq!(readout.to_string(), "-1,5 * 2 = -3");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Readout {
    pub first_sign: &'static str,
    pub first: String,
    pub operation: &'static str,
    pub second_sign: &'static str,
    pub second: String,
    /// `""`, `" = <value>"` or `" = <message>"`.
    pub result: String,
}

impl Readout {
    pub fn from_engine(engine: &Engine, config: &DisplayConfig) -> Self {
        let separator = config.decimal_separator.as_char();
        Self {
            first_sign: engine.first().sign().indicator(),
            first: operand_text(engine.first(), separator),
            operation: engine.operation().symbol(),
            second_sign: engine.second().sign().indicator(),
            second: operand_text(engine.second(), separator),
            result: result_text(engine.outcome(), separator),
        }
    }
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} {} {}{}{}",
            self.first_sign, self.first, self.operation, self.second_sign, self.second, self.result
        )
    }
}

fn operand_text(operand: &Operand, separator: char) -> String {
    localize(operand.digits(), separator)
}

fn result_text(outcome: Option<&Outcome>, separator: char) -> String {
    match outcome {
        None => String::new(),
        Some(Outcome::Value(value)) => format!(" = {}", format_value(*value, separator)),
        Some(Outcome::Invalid { message }) => format!(" = {message}"),
    }
}

/// Print a computed value with at most 15 significant digits.
///
/// Trailing zeros are dropped and negative zero prints as `0`. Magnitudes
/// below `1e-5` or from `1e15` up switch to exponent notation (`1E-300`).
pub fn format_value(value: f64, separator: char) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    // Round through scientific notation, then let Display pick the
    // shortest text for the rounded value.
    let rounded: f64 = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value)
        .parse()
        .unwrap_or(value);
    if rounded == 0.0 {
        return "0".to_string();
    }

    let magnitude = rounded.abs();
    let text = if (SMALLEST_PLAIN..LARGEST_PLAIN).contains(&magnitude) {
        rounded.to_string()
    } else {
        format!("{rounded:E}")
    };
    localize(&text, separator)
}

fn localize(text: &str, separator: char) -> String {
    if separator == DECIMAL_POINT {
        return text.to_string();
    }
    text.replace(DECIMAL_POINT, separator.encode_utf8(&mut [0; 4]))
}

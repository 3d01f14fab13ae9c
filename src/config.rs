//! Display configuration.
//!
//! Only presentation is configurable. Operand text is always stored and
//! parsed with `.`; the separator chosen here is substituted when rendering.

use serde::{Deserialize, Serialize};

/// Character used as decimal separator on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DecimalSeparator {
    /// `1.5`
    #[default]
    Point,
    /// `1,5`
    Comma,
}

impl DecimalSeparator {
    pub fn as_char(self) -> char {
        match self {
            Self::Point => '.',
            Self::Comma => ',',
        }
    }
}

/// How the engine's state is rendered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub decimal_separator: DecimalSeparator,
}

impl DisplayConfig {
    pub fn with_separator(decimal_separator: DecimalSeparator) -> Self {
        Self { decimal_separator }
    }
}

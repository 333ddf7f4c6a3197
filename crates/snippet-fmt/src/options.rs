//! Style configuration for structured formatting

use serde::{Deserialize, Serialize};

/// Preferred string delimiter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    Single,
    Double,
}

impl QuoteStyle {
    pub fn preferred(&self) -> char {
        match self {
            QuoteStyle::Single => '\'',
            QuoteStyle::Double => '"',
        }
    }

    pub fn alternate(&self) -> char {
        match self {
            QuoteStyle::Single => '"',
            QuoteStyle::Double => '\'',
        }
    }
}

/// Trailing separator policy for constructs broken over several lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingCommas {
    All,
    None,
}

/// Parentheses around a single arrow-function parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowParens {
    Avoid,
    Always,
}

/// Options shared by every structured engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    pub indent_width: usize,
    pub line_width: usize,
    pub quote_style: QuoteStyle,
    pub trailing_commas: TrailingCommas,
    /// Spaces inside object-literal braces: `{ a: 1 }`
    pub bracket_spacing: bool,
    pub arrow_parens: ArrowParens,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent_width: 2,
            line_width: 80,
            quote_style: QuoteStyle::Single,
            trailing_commas: TrailingCommas::All,
            bracket_spacing: true,
            arrow_parens: ArrowParens::Avoid,
        }
    }
}

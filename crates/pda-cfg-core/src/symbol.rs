//! Input and stack symbols, including the lambda marker.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Glyph used when a lambda marker is displayed.
pub const LAMBDA_GLYPH: &str = "λ";

/// Literal token accepted in documents as a synonym of the empty string.
pub const LAMBDA_TOKEN: &str = "lambda";

/// Returns true if a raw document value denotes the lambda marker.
///
/// Only the empty string and the exact token `lambda` qualify.
pub fn is_lambda(raw: &str) -> bool {
    raw.is_empty() || raw == LAMBDA_TOKEN
}

/// A symbol read from an automaton document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbol {
    /// No symbol: consumes no input / touches no stack letter.
    Lambda,
    /// A concrete letter.
    Letter(String),
}

impl Symbol {
    /// Normalize a raw document value into a symbol.
    pub fn parse(raw: &str) -> Self {
        if is_lambda(raw) {
            Self::Lambda
        } else {
            Self::Letter(raw.to_string())
        }
    }

    /// Create a concrete letter.
    pub fn letter(letter: impl Into<String>) -> Self {
        Self::Letter(letter.into())
    }

    /// Render with lambda shown as [`LAMBDA_GLYPH`].
    pub fn render(&self) -> &str {
        match self {
            Self::Lambda => LAMBDA_GLYPH,
            Self::Letter(letter) => letter,
        }
    }

    /// Render with lambda shown as nothing at all.
    pub fn render_suppressed(&self) -> &str {
        match self {
            Self::Lambda => "",
            Self::Letter(letter) => letter,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.render())
    }
}

impl From<&str> for Symbol {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

/// Split a raw `stackWrite` value into pushed letters, one per character.
///
/// Lambda values push nothing.
pub fn parse_stack_write(raw: &str) -> Vec<String> {
    if is_lambda(raw) {
        return Vec::new();
    }
    raw.chars().map(|c| c.to_string()).collect()
}

//! Error types for loading automata and generating grammars.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for PDA operations.
pub type PdaResult<T> = Result<T, PdaError>;

/// Errors that can occur while loading an automaton or converting it.
#[derive(Debug, Error)]
pub enum PdaError {
    /// The document is not well-formed or lacks a required section/field.
    #[error("malformed automaton document: {message}")]
    MalformedInput { message: String },

    /// The stack alphabet declares no tail (stack-bottom) symbol.
    #[error("no tail letter declared for the stack")]
    MissingTailSymbol,

    /// The stack alphabet declares more than one tail symbol.
    #[error("more than one tail letter declared for the stack: {first:?} and {second:?}")]
    DuplicateTailSymbol { first: String, second: String },

    /// A transition pushes a number of symbols other than 0 or 2.
    #[error(
        "transition #{index} ({transition}) writes {length} stack symbol(s); \
         stack write must be 0 or 2 symbols"
    )]
    InvalidStackWrite {
        index: usize,
        transition: String,
        length: usize,
    },

    /// A session operation needed an automaton but none is loaded.
    #[error("no automaton loaded")]
    NoAutomatonLoaded,

    /// I/O error while reading or writing a file.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PdaError {
    /// Create a malformed-input error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    /// Create an I/O error bound to a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

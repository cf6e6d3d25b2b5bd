//! Error type for path-data parsing.
//!
//! An unrecognized character is NOT an error: the tokenizer returns an empty
//! token list and the path simply draws nothing. Only malformed command
//! sequences end up here.

use thiserror::Error;

/// Errors that can occur when parsing SVG path data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Fewer tokens remain than the current command needs.
    #[error("path data ended short: '{command}' needs {expected} parameters, {found} left")]
    UnexpectedEnd {
        command: char,
        expected: usize,
        found: usize,
    },

    /// A command letter showed up where a number was required.
    #[error("parameter {index} of '{command}' is not a number (found '{found}')")]
    NotANumber {
        command: char,
        index: usize,
        found: char,
    },

    /// A number followed a command that takes no parameters.
    #[error("unexpected number {value} after '{command}'")]
    UnexpectedNumber { command: char, value: f64 },

    /// A segment was built with the wrong number of parameters.
    #[error("bad segment: '{command}' takes {expected} parameters, got {found}")]
    Arity {
        command: char,
        expected: usize,
        found: usize,
    },
}

/// Result type for parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

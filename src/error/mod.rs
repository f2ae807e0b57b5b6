//! Unified error handling for mp-db.
//!
//! Parsing has exactly one failure shape, [`SyntaxError`], which always
//! carries the 1-based line and column of the offending token. Meta-command
//! problems are [`CommandError`]s. Both are recoverable: the shell reports
//! them and prompts again. [`MpdbError`] wraps everything for callers that
//! want a single error type, and [`Result<T>`] is the matching alias.

use std::io;

use thiserror::Error;

/// A positioned syntax error produced by the parser.
///
/// Lexical anomalies (an unterminated string literal, for instance) are
/// reported through this type as well, positioned at the start of the
/// offending literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Syntax error at line {line}, column {column}: {message}")]
pub struct SyntaxError {
    pub message: String,
    pub line: u32,
    pub column: u32,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, line: u32, column: u32) -> Self {
        SyntaxError {
            message: message.into(),
            line,
            column,
        }
    }
}

/// A meta-command that could not be carried out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The colon-command name is not in the command table.
    #[error("Unknown command: :{0}\nType ':help' for available commands.")]
    UnknownCommand(String),

    /// The command exists but its argument was not understood.
    #[error("Invalid argument '{arg}' for :{command}. Usage: {usage}")]
    InvalidArgument {
        command: String,
        arg: String,
        usage: &'static str,
    },
}

/// The canonical error type for mp-db.
#[derive(Debug, Error)]
pub enum MpdbError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Command(#[from] CommandError),

    /// Invalid command-line flags or environment configuration.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A specialised [`Result`] type for mp-db operations.
pub type Result<T> = std::result::Result<T, MpdbError>;

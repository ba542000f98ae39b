//! Unified error type for the hexpick-lib crate.
//!
//! [`HexpickError`] is only produced at collaborator boundaries (user input,
//! settings I/O, external commands). The history core itself never fails.

use std::fmt;

/// Unified error type for hexpick-lib operations.
#[derive(Debug)]
pub enum HexpickError {
    /// Standard I/O error (settings persistence, process spawn).
    Io(std::io::Error),
    /// Settings validation error.
    Config(String),
    /// A string that is not a `#RRGGBB` color.
    Color(String),
    /// External command failed (pick tool, clipboard tool).
    Command(String),
    /// Pick tool output did not contain a color.
    Parse(String),
    /// Another hexpick process holds the pick or history lock.
    Busy(String),
}

impl fmt::Display for HexpickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HexpickError::Io(e) => write!(f, "I/O error: {e}"),
            HexpickError::Config(e) => write!(f, "Config error: {e}"),
            HexpickError::Color(e) => write!(f, "Color error: {e}"),
            HexpickError::Command(e) => write!(f, "Command error: {e}"),
            HexpickError::Parse(e) => write!(f, "Parse error: {e}"),
            HexpickError::Busy(e) => write!(f, "Busy: {e}"),
        }
    }
}

impl std::error::Error for HexpickError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HexpickError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for HexpickError {
    fn from(e: std::io::Error) -> Self {
        HexpickError::Io(e)
    }
}

/// Crate-level Result alias using [`HexpickError`].
pub type Result<T> = std::result::Result<T, HexpickError>;

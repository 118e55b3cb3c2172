//! Error types for the Blaest transpiler

use crate::location::SourceLocation;
use thiserror::Error;

/// Main error type for the Blaest transpiler
///
/// Every variant that comes out of the pipeline carries the location of the
/// construct that failed. The first error halts the run.
#[derive(Debug, Error)]
pub enum BlaestError {
    #[error("Unclosed string starting at {loc}")]
    UnterminatedString { loc: SourceLocation },

    #[error("Unclosed character constant starting at {loc}")]
    UnterminatedCharacter { loc: SourceLocation },

    #[error("Unclosed comment starting at {loc}")]
    UnterminatedComment { loc: SourceLocation },

    #[error("Unclosed call to '{callee}' at {loc}")]
    UnterminatedCall { callee: String, loc: SourceLocation },

    #[error("Variable '{name}' does not exist (at {loc})")]
    UndeclaredVariable { name: String, loc: SourceLocation },

    #[error("Encountered end of input while parsing {construct} (at {loc})")]
    TruncatedInput {
        construct: &'static str,
        loc: SourceLocation,
    },

    #[error("Expected {expected}, found {found} at {loc}")]
    UnexpectedToken {
        found: String,
        expected: &'static str,
        loc: SourceLocation,
    },

    #[error("Cannot assign to '{target}' at {loc}")]
    InvalidAssignTarget { target: String, loc: SourceLocation },

    #[error("'{name}' is already declared in this scope (at {loc})")]
    DuplicateDeclaration { name: String, loc: SourceLocation },

    #[error("{0}")]
    MalformedUsage(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl BlaestError {
    /// Location of the failing construct, if the error has one
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            BlaestError::UnterminatedString { loc }
            | BlaestError::UnterminatedCharacter { loc }
            | BlaestError::UnterminatedComment { loc }
            | BlaestError::UnterminatedCall { loc, .. }
            | BlaestError::UndeclaredVariable { loc, .. }
            | BlaestError::TruncatedInput { loc, .. }
            | BlaestError::UnexpectedToken { loc, .. }
            | BlaestError::InvalidAssignTarget { loc, .. }
            | BlaestError::DuplicateDeclaration { loc, .. } => Some(loc),
            BlaestError::MalformedUsage(_) | BlaestError::IoError(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BlaestError>;

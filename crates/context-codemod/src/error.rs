//! Error types for the transform.

use codemod_syntax::{SyntaxError, SyntaxErrorInfo, ValidationFailure};
use thiserror::Error;

/// Errors raised while rewriting one source file.
///
/// Finding nothing to rewrite is not an error; see
/// [`crate::TransformStatus::Unmatched`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransformError {
    /// The syntax layer failed: parser setup, rule compilation, or edit
    /// commit.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// The input does not parse, so no rewrite was attempted.
    #[error("input has a syntax error at {line}:{column}: {message}")]
    MalformedInput {
        /// Line of the first error (one-based).
        line: u32,
        /// Column of the first error (one-based).
        column: u32,
        /// Description of the first error.
        message: String,
    },

    /// The block already declares the binding and skipping such blocks is
    /// disabled, so inserting the declaration would redeclare it.
    #[error("create block already declares `{binding}`")]
    AlreadyDeclared {
        /// Name of the constant the transform would declare.
        binding: String,
    },

    /// The rewritten text no longer parses.
    #[error("rewrite produced invalid syntax: {}", describe(.failures))]
    InvalidRewrite {
        /// Every syntax error found in the rewritten text.
        failures: Vec<ValidationFailure>,
    },
}

impl TransformError {
    /// Creates a malformed input error from the parser's first error.
    #[must_use]
    pub fn malformed_input(info: SyntaxErrorInfo) -> Self {
        Self::MalformedInput {
            line: info.line,
            column: info.column,
            message: info.message,
        }
    }

    /// Creates an error for a block that already declares `binding`.
    #[must_use]
    pub fn already_declared(binding: impl Into<String>) -> Self {
        Self::AlreadyDeclared {
            binding: binding.into(),
        }
    }

    /// Creates an invalid rewrite error.
    #[must_use]
    pub const fn invalid_rewrite(failures: Vec<ValidationFailure>) -> Self {
        Self::InvalidRewrite { failures }
    }
}

fn describe(failures: &[ValidationFailure]) -> String {
    match failures {
        [] => "no details".to_owned(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}

//! Error types for syntactic analysis operations.
//!
//! This module provides structured error types for all operations in the
//! `codemod-syntax` crate, including parsing, rule compilation, template
//! rendering, and edit commits.

use std::ops::Range;

use thiserror::Error;

use crate::language::SupportedLanguage;

/// Errors from syntactic analysis operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyntaxError {
    /// Failed to initialise the Tree-sitter parser for a language.
    #[error("failed to initialise parser for {language}: {message}")]
    ParserInitError {
        /// The language that failed to initialise.
        language: SupportedLanguage,
        /// Description of the failure.
        message: String,
    },

    /// Failed to parse source code.
    #[error("failed to parse {language}: {message}")]
    ParseError {
        /// The language that failed to parse.
        language: SupportedLanguage,
        /// Description of the failure.
        message: String,
    },

    /// A rule could not be built, usually because of an invalid regex.
    #[error("invalid rule: {message}")]
    InvalidRule {
        /// Description of the rule error.
        message: String,
    },

    /// A replacement template references a name it may not use.
    #[error("invalid replacement template: {message}")]
    InvalidTemplate {
        /// Description of the template error.
        message: String,
    },

    /// Two scheduled edits cover intersecting byte ranges.
    #[error("edits overlap: {first:?} and {second:?}")]
    OverlappingEdits {
        /// Range of the earlier edit.
        first: Range<usize>,
        /// Range of the later edit.
        second: Range<usize>,
    },

    /// An edit targets bytes outside the source or splits a character.
    #[error("edit range {range:?} is invalid for source of length {len}")]
    EditOutOfBounds {
        /// The offending range.
        range: Range<usize>,
        /// Length of the source the edit was committed against.
        len: usize,
    },

    /// Internal error indicating a bug or system failure.
    #[error("internal error: {message}")]
    InternalError {
        /// Description of the internal error.
        message: String,
    },
}

impl SyntaxError {
    /// Creates a parser initialisation error.
    #[must_use]
    pub fn parser_init(language: SupportedLanguage, message: impl Into<String>) -> Self {
        Self::ParserInitError {
            language,
            message: message.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(language: SupportedLanguage, message: impl Into<String>) -> Self {
        Self::ParseError {
            language,
            message: message.into(),
        }
    }

    /// Creates an invalid rule error.
    #[must_use]
    pub fn invalid_rule(message: impl Into<String>) -> Self {
        Self::InvalidRule {
            message: message.into(),
        }
    }

    /// Creates an invalid template error.
    #[must_use]
    pub fn invalid_template(message: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            message: message.into(),
        }
    }

    /// Creates an overlapping edits error.
    #[must_use]
    pub const fn overlapping_edits(first: Range<usize>, second: Range<usize>) -> Self {
        Self::OverlappingEdits { first, second }
    }

    /// Creates an out-of-bounds edit error.
    #[must_use]
    pub const fn edit_out_of_bounds(range: Range<usize>, len: usize) -> Self {
        Self::EditOutOfBounds { range, len }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

//! Tree-sitter based syntactic validation of rewritten source.
//!
//! [`SyntacticLock`] re-parses text produced by a rewrite and reports any
//! syntax errors, so a codemod can refuse to hand back output that no longer
//! parses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use crate::error::SyntaxError;
use crate::language::SupportedLanguage;
use crate::parser::Parser;

/// Tree-sitter based syntactic validation.
///
/// # Thread Safety
///
/// This type is thread-safe and can be shared across threads. Internal
/// parser state is protected by a mutex.
pub struct SyntacticLock {
    /// Cached parsers for each language.
    parsers: Mutex<HashMap<SupportedLanguage, Parser>>,
}

impl SyntacticLock {
    /// Creates a new syntactic lock.
    ///
    /// Parsers for each language are created lazily on first use.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parsers: Mutex::new(HashMap::new()),
        }
    }

    /// Validates `content` as source in `language`.
    ///
    /// Returns the syntax errors found. An empty list indicates the content
    /// is syntactically valid.
    ///
    /// # Errors
    ///
    /// Returns an error if the parser for `language` cannot be initialised,
    /// or if the internal parser lock is poisoned.
    pub fn validate_source(
        &self,
        language: SupportedLanguage,
        content: &str,
    ) -> Result<Vec<ValidationFailure>, SyntaxError> {
        let mut parsers = self
            .parsers
            .lock()
            .map_err(|_| SyntaxError::parser_init(language, "lock poisoned"))?;

        let parser = if let Some(p) = parsers.get_mut(&language) {
            p
        } else {
            let new_parser = Parser::new(language)?;
            parsers.insert(language, new_parser);
            parsers.get_mut(&language).ok_or_else(|| {
                SyntaxError::parser_init(language, "parser not found after insert")
            })?
        };

        let result = parser.parse(content)?;

        Ok(result
            .errors()
            .into_iter()
            .map(|e| ValidationFailure {
                line: e.line,
                column: e.column,
                message: e.message,
            })
            .collect())
    }

    /// Validates a file's content, detecting the language from `path`.
    ///
    /// Files with unrecognised extensions are skipped and produce no
    /// failures.
    ///
    /// # Errors
    ///
    /// Returns an error if the parser cannot be initialised.
    pub fn validate_file(
        &self,
        path: &Path,
        content: &str,
    ) -> Result<Vec<ValidationFailure>, SyntaxError> {
        match SupportedLanguage::from_path(path) {
            Some(language) => self.validate_source(language, content),
            None => Ok(Vec::new()),
        }
    }
}

impl Default for SyntacticLock {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SyntacticLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntacticLock")
            .field("languages", &SupportedLanguage::all())
            .finish_non_exhaustive()
    }
}

/// A syntax error found while validating source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    /// Line number (one-based).
    pub line: u32,
    /// Column number (one-based).
    pub column: u32,
    /// Human-readable description of the problem.
    pub message: String,
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.message)
    }
}

//! Transform configuration.
//!
//! [`TransformOptions`] deserialises from any serde format with every field
//! optional, so a harness can embed it in its own configuration file.

use codemod_syntax::SupportedLanguage;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How the `create` block is rewritten.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, Hash, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RewriteMode {
    /// Declare `contextSourceCode` and replace every
    /// `context.getSourceCode()` call in the block with it.
    #[default]
    RenameAccessor,
    /// Declare `sourceCode` at the top of the block and leave the body as is.
    DeclareOnly,
}

impl RewriteMode {
    /// Returns the name of the constant the mode declares.
    #[must_use]
    pub const fn binding_name(self) -> &'static str {
        match self {
            Self::RenameAccessor => "contextSourceCode",
            Self::DeclareOnly => "sourceCode",
        }
    }

    /// Returns whether accessor calls in the block are replaced.
    #[must_use]
    pub const fn renames_accessor(self) -> bool {
        matches!(self, Self::RenameAccessor)
    }
}

/// Errors encountered while parsing a [`RewriteMode`] from text.
pub type RewriteModeParseError = strum::ParseError;

/// Options controlling a [`crate::SourceCodeTransform`].
///
/// # Defaults
///
/// - `mode`: [`RewriteMode::RenameAccessor`]
/// - `language`: [`SupportedLanguage::JavaScript`]
/// - `validate_output`: `true`
/// - `skip_when_declared`: `true`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformOptions {
    mode: RewriteMode,
    language: SupportedLanguage,
    validate_output: bool,
    skip_when_declared: bool,
}

impl TransformOptions {
    /// Returns options for `mode` with every other field at its default.
    #[must_use]
    pub fn for_mode(mode: RewriteMode) -> Self {
        Self::default().with_mode(mode)
    }

    /// Sets the rewrite mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: RewriteMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the language used when the transform parses text itself.
    #[must_use]
    pub const fn with_language(mut self, language: SupportedLanguage) -> Self {
        self.language = language;
        self
    }

    /// Enables or disables re-parsing the output.
    #[must_use]
    pub const fn with_validate_output(mut self, validate_output: bool) -> Self {
        self.validate_output = validate_output;
        self
    }

    /// Enables or disables skipping blocks that already declare the binding.
    ///
    /// When disabled, such a block is reported as
    /// [`crate::TransformError::AlreadyDeclared`].
    #[must_use]
    pub const fn with_skip_when_declared(mut self, skip_when_declared: bool) -> Self {
        self.skip_when_declared = skip_when_declared;
        self
    }

    /// Returns the rewrite mode.
    #[must_use]
    pub const fn mode(&self) -> RewriteMode {
        self.mode
    }

    /// Returns the language used by [`crate::SourceCodeTransform::transform_source`].
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Returns whether rewritten output is re-parsed before it is returned.
    #[must_use]
    pub const fn validate_output(&self) -> bool {
        self.validate_output
    }

    /// Returns whether a block that already declares the binding is left
    /// alone rather than reported as an error.
    #[must_use]
    pub const fn skip_when_declared(&self) -> bool {
        self.skip_when_declared
    }
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            mode: RewriteMode::default(),
            language: SupportedLanguage::default(),
            validate_output: true,
            skip_when_declared: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("rename_accessor", RewriteMode::RenameAccessor)]
    #[case("DECLARE_ONLY", RewriteMode::DeclareOnly)]
    fn mode_parses_case_insensitively(#[case] input: &str, #[case] expected: RewriteMode) {
        assert_eq!(RewriteMode::from_str(input), Ok(expected));
    }

    #[test]
    fn mode_rejects_unknown_names() {
        assert!(RewriteMode::from_str("rename").is_err());
    }

    #[rstest]
    #[case(RewriteMode::RenameAccessor, "contextSourceCode", true)]
    #[case(RewriteMode::DeclareOnly, "sourceCode", false)]
    fn mode_fixes_binding_and_renaming(
        #[case] mode: RewriteMode,
        #[case] binding: &str,
        #[case] renames: bool,
    ) {
        assert_eq!(mode.binding_name(), binding);
        assert_eq!(mode.renames_accessor(), renames);
        assert_eq!(RewriteMode::from_str(&mode.to_string()), Ok(mode));
    }

    #[test]
    fn empty_document_yields_defaults() {
        let options: TransformOptions = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(options, TransformOptions::default());
        assert!(options.validate_output());
        assert!(options.skip_when_declared());
        assert_eq!(options.mode(), RewriteMode::RenameAccessor);
        assert_eq!(options.language(), SupportedLanguage::JavaScript);
    }

    #[test]
    fn fields_override_defaults() {
        let options: TransformOptions = serde_json::from_str(
            r#"{"mode": "declare_only", "language": "typescript", "validate_output": false}"#,
        )
        .expect("deserialize");

        assert_eq!(
            options,
            TransformOptions::for_mode(RewriteMode::DeclareOnly)
                .with_language(SupportedLanguage::TypeScript)
                .with_validate_output(false)
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<TransformOptions, _> = serde_json::from_str(r#"{"binding": "x"}"#);
        assert!(result.is_err());
    }
}

//! Codemod that migrates lint rules off the deprecated
//! `context.getSourceCode()` accessor.
//!
//! The transform finds the first method named like `create` whose parameter
//! list holds a parameter named like `context`, and inserts
//!
//! ```text
//! const contextSourceCode = context.sourceCode ?? context.getSourceCode();
//! ```
//!
//! as the first statement of its body. In the default
//! [`RewriteMode::RenameAccessor`] every `context.getSourceCode()` call in
//! that body is then replaced by the new constant. [`RewriteMode::DeclareOnly`]
//! declares `sourceCode` instead and leaves the body untouched.
//!
//! Input that does not parse is rejected, input without a `create` block is
//! returned unchanged, and rewritten output is re-parsed before it is handed
//! back.
//!
//! The crate emits `tracing` events and installs no subscriber.

mod error;
mod options;
mod rules;
mod transform;

pub use codemod_syntax::SupportedLanguage;
pub use error::TransformError;
pub use options::{RewriteMode, RewriteModeParseError, TransformOptions};
pub use transform::{SourceCodeTransform, TransformOutcome, TransformStatus};

#[cfg(test)]
mod tests;

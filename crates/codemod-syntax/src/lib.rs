//! Tree-sitter powered structural queries and span edits for codemods.
//!
//! This crate provides the syntax layer the `context-codemod` transform is
//! built on:
//!
//! - **Parsing** via [`Parser`] for JavaScript, TypeScript, and TSX
//! - **Structural queries** via [`Rule`], a tree of predicates with
//!   `inside`/`has`/`follows` relations, regex text constraints, and named
//!   bindings, evaluated by [`Matcher`]
//! - **Edits** via [`EditSet`], committed in one pass against the original
//!   source
//! - **Templates** via [`Template`] for `$NAME` substitution in replacement
//!   text
//! - **Validation** via [`SyntacticLock`] to reject rewrites that no longer
//!   parse
//!
//! # Example: Query and Edit
//!
//! ```
//! use codemod_syntax::{Edit, EditSet, Parser, Rule, SupportedLanguage};
//!
//! let mut parser = Parser::new(SupportedLanguage::JavaScript)?;
//! let parsed = parser.parse("foo(bar);")?;
//!
//! let rule = Rule::kind("identifier")
//!     .in_field("function")
//!     .bind("CALLEE");
//! let mut edits = EditSet::new();
//! for found in rule.find_all(&parsed) {
//!     edits.push(Edit::replace_node(found.node(), "baz"));
//! }
//!
//! assert_eq!(edits.commit(parsed.source())?, "baz(bar);");
//! # Ok::<(), codemod_syntax::SyntaxError>(())
//! ```

mod edit;
mod error;
mod language;
mod matcher;
mod parser;
mod position;
mod rule;
mod syntactic_lock;
mod template;

pub use edit::{Edit, EditSet};
pub use error::SyntaxError;
pub use language::{LanguageParseError, SupportedLanguage};
pub use matcher::{CapturedNode, Matcher, RuleMatch};
pub use parser::{ParseResult, Parser, SyntaxErrorInfo};
pub use position::line_indent;
pub use rule::{Relation, Rule, StopBy};
pub use syntactic_lock::{SyntacticLock, ValidationFailure};
pub use template::Template;

#[cfg(test)]
mod tests;

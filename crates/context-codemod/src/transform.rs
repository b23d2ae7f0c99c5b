//! The `create` block rewrite.
//!
//! [`SourceCodeTransform`] locates the body of the first `create(context)`
//! method, prepends a declaration that resolves the source code object from
//! the context, and, in [`RewriteMode::RenameAccessor`], points existing
//! `context.getSourceCode()` calls in that body at the new constant.

use std::collections::HashMap;

use codemod_syntax::{
    Edit, EditSet, ParseResult, Parser, Rule, RuleMatch, SyntacticLock, SyntaxError, Template,
    line_indent,
};
use tracing::{debug, info, warn};

use crate::error::TransformError;
use crate::options::{RewriteMode, TransformOptions};
use crate::rules::{self, CONTEXT};

const BINDING: &str = "BINDING";

/// Parameter name preferred when several parameters look like a context.
const PREFERRED_CONTEXT: &str = "context";

const DECLARATION_TEMPLATE: &str =
    "const $BINDING = $CONTEXT.sourceCode ?? $CONTEXT.getSourceCode();";

/// Indentation added inside an empty multi-line block.
const EMPTY_BLOCK_INDENT: &str = "  ";

/// What a transform did to its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformStatus {
    /// No `create(context)` block was found.
    Unmatched,
    /// The block already declares the binding.
    AlreadyMigrated,
    /// The declaration was inserted.
    Rewritten {
        /// Number of accessor calls replaced with the binding.
        renamed: usize,
    },
}

/// The result of transforming one source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutcome {
    output: String,
    status: TransformStatus,
}

impl TransformOutcome {
    const fn unchanged(source: String, status: TransformStatus) -> Self {
        Self {
            output: source,
            status,
        }
    }

    /// Returns the transformed text. Unchanged input is returned verbatim.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Consumes the outcome and returns the transformed text.
    #[must_use]
    pub fn into_output(self) -> String {
        self.output
    }

    /// Returns what the transform did.
    #[must_use]
    pub const fn status(&self) -> TransformStatus {
        self.status
    }

    /// Returns whether the output differs from the input.
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        matches!(self.status, TransformStatus::Rewritten { .. })
    }
}

/// Inserts a `sourceCode` declaration into a lint rule's `create` method.
///
/// # Example
///
/// ```
/// use context_codemod::{SourceCodeTransform, TransformOptions};
///
/// let transform = SourceCodeTransform::new(TransformOptions::default())?;
/// let outcome = transform.transform_source(
///     "const rule = { create(context) { return context.getSourceCode(); } };",
/// )?;
///
/// assert_eq!(
///     outcome.output(),
///     "const rule = { create(context) { const contextSourceCode = \
///      context.sourceCode ?? context.getSourceCode(); return contextSourceCode; } };",
/// );
/// # Ok::<(), context_codemod::TransformError>(())
/// ```
#[derive(Debug)]
pub struct SourceCodeTransform {
    options: TransformOptions,
    create_block: Rule,
    context_parameter: Rule,
    declared: Rule,
    directive: Rule,
    declaration: Template,
    lock: SyntacticLock,
}

impl SourceCodeTransform {
    /// Builds a transform for `options`.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Syntax`] if the structural queries or the
    /// declaration template fail to compile.
    pub fn new(options: TransformOptions) -> Result<Self, TransformError> {
        let binding = options.mode().binding_name();
        Ok(Self {
            create_block: rules::create_block()?,
            context_parameter: rules::context_parameter()?,
            declared: rules::declares(binding)?,
            directive: rules::directive(),
            declaration: Template::parse(DECLARATION_TEMPLATE, &[BINDING, CONTEXT])?,
            lock: SyntacticLock::new(),
            options,
        })
    }

    /// Returns the options this transform was built with.
    #[must_use]
    pub const fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Parses `source` in the configured language and transforms it.
    ///
    /// # Errors
    ///
    /// See [`Self::transform`].
    pub fn transform_source(&self, source: &str) -> Result<TransformOutcome, TransformError> {
        let mut parser = Parser::new(self.options.language())?;
        let parsed = parser.parse(source)?;
        self.transform(&parsed)
    }

    /// Transforms an already parsed source text.
    ///
    /// Only the first matching `create` block is rewritten. Text outside the
    /// inserted declaration and the replaced accessor calls is preserved
    /// byte for byte.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::MalformedInput`] if `parsed` contains a
    /// syntax error, [`TransformError::AlreadyDeclared`] if the block declares
    /// the binding and [`TransformOptions::skip_when_declared`] is off,
    /// [`TransformError::InvalidRewrite`] if output validation is enabled and
    /// the result does not parse, and [`TransformError::Syntax`] if the edits
    /// cannot be committed.
    pub fn transform(&self, parsed: &ParseResult) -> Result<TransformOutcome, TransformError> {
        if let Some(error) = parsed.first_error() {
            return Err(TransformError::malformed_input(error));
        }

        let source = parsed.source();
        let Some(block) = self.create_block.find_first(parsed) else {
            debug!(language = %parsed.language(), "no create(context) block found");
            return Ok(TransformOutcome::unchanged(
                source.to_owned(),
                TransformStatus::Unmatched,
            ));
        };

        let mode = self.options.mode();
        let binding = mode.binding_name();
        if self.declared.matches_node(block.node(), source) {
            if !self.options.skip_when_declared() {
                warn!(binding, "create block already declares the binding");
                return Err(TransformError::already_declared(binding));
            }
            debug!(binding, "create block already declares the binding");
            return Ok(TransformOutcome::unchanged(
                source.to_owned(),
                TransformStatus::AlreadyMigrated,
            ));
        }

        let (edits, renamed) = self.plan(&block, mode)?;
        let output = edits.commit(source)?;

        if self.options.validate_output() {
            let failures = self.lock.validate_source(parsed.language(), &output)?;
            if !failures.is_empty() {
                warn!(count = failures.len(), "rewrite failed syntactic validation");
                return Err(TransformError::invalid_rewrite(failures));
            }
        }

        let (line, column) = block.start_position();
        info!(
            %mode,
            renamed,
            edits = edits.len(),
            line,
            column,
            "inserted source code declaration"
        );
        Ok(TransformOutcome {
            output,
            status: TransformStatus::Rewritten { renamed },
        })
    }

    fn plan(
        &self,
        block: &RuleMatch<'_>,
        mode: RewriteMode,
    ) -> Result<(EditSet, usize), TransformError> {
        let binding = mode.binding_name();
        let context = self.context_name(block)?;

        let values = HashMap::from([(BINDING, binding), (CONTEXT, context)]);
        let declaration = self.declaration.render(&values)?;
        let mut edits = EditSet::new();
        edits.push(self.declaration_edit(block, &declaration));

        let mut renamed = 0;
        if mode.renames_accessor() {
            let calls = rules::accessor_call(context)?;
            let shadowing = rules::rebinds(context)?;
            for call in calls.find_all_in(block.node(), block.source()) {
                if is_shadowed(call.node(), block, &shadowing) {
                    continue;
                }
                edits.push(Edit::replace_node(call.node(), binding));
                renamed += 1;
            }
        }

        Ok((edits, renamed))
    }

    /// Picks the context parameter of the matched method.
    ///
    /// A parameter named exactly `context` wins over other candidates;
    /// otherwise the first candidate in parameter order is used.
    fn context_name<'a>(&self, block: &RuleMatch<'a>) -> Result<&'a str, TransformError> {
        let candidates: Vec<&'a str> = block
            .node()
            .parent()
            .and_then(|method| method.child_by_field_name("parameters"))
            .map(|parameters| {
                self.context_parameter
                    .find_all_in(parameters, block.source())
                    .iter()
                    .map(RuleMatch::text)
                    .collect()
            })
            .unwrap_or_default();

        candidates
            .iter()
            .copied()
            .find(|name| *name == PREFERRED_CONTEXT)
            .or_else(|| candidates.first().copied())
            .or_else(|| block.capture(CONTEXT).map(|captured| captured.text()))
            .ok_or_else(|| {
                SyntaxError::internal_error("create block matched without a context").into()
            })
    }

    /// Builds the declaration insertion.
    ///
    /// The declaration follows the block's opening brace, or the last
    /// directive (such as `"use strict";`) that opens the block. If that
    /// anchor ends its line, the declaration gets a line of its own,
    /// indented like the statement it precedes. Otherwise it shares the
    /// anchor's line.
    fn declaration_edit(&self, block: &RuleMatch<'_>, declaration: &str) -> Edit {
        let source = block.source();
        let node = block.node();
        let (offset, indent_from) = match self.last_directive(node, source) {
            Some(directive) => (directive.end_byte(), Some(directive)),
            None => (node.start_byte().saturating_add(1), node.named_child(0)),
        };
        let rest = source.get(offset..).unwrap_or_default();

        let text = match leading_newline(rest) {
            Some(newline) => {
                let indent = indent_from.map_or_else(
                    || format!("{}{EMPTY_BLOCK_INDENT}", line_indent(source, node.start_byte())),
                    |anchor| line_indent(source, anchor.start_byte()).to_owned(),
                );
                format!("{newline}{indent}{declaration}")
            }
            None if rest.starts_with('}') => format!(" {declaration} "),
            None => format!(" {declaration}"),
        };

        Edit::insert(offset, text)
    }

    /// Returns the last statement of the block's directive prologue.
    fn last_directive<'a>(
        &self,
        block: tree_sitter::Node<'a>,
        source: &str,
    ) -> Option<tree_sitter::Node<'a>> {
        let mut cursor = block.walk();
        let statements: Vec<_> = block
            .named_children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .collect();
        statements
            .into_iter()
            .take_while(|statement| self.directive.matches_node(*statement, source))
            .last()
    }
}

/// Returns whether a function between `call` and `block` rebinds the
/// context name.
fn is_shadowed(call: tree_sitter::Node<'_>, block: &RuleMatch<'_>, shadowing: &Rule) -> bool {
    let scope = block.node();
    std::iter::successors(call.parent(), tree_sitter::Node::parent)
        .take_while(|ancestor| *ancestor != scope)
        .any(|ancestor| shadowing.matches_node(ancestor, block.source()))
}

fn leading_newline(text: &str) -> Option<&'static str> {
    if text.starts_with("\r\n") {
        Some("\r\n")
    } else if text.starts_with('\n') {
        Some("\n")
    } else {
        None
    }
}

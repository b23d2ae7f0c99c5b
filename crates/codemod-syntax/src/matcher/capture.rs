//! Capture types for rule matching.
//!
//! Captures bind names declared with [`crate::Rule::bind`] to the nodes they
//! matched.

use std::collections::HashMap;
use std::ops::Range;

/// A single captured AST node.
#[derive(Debug, Clone)]
pub struct CapturedNode<'a> {
    node: tree_sitter::Node<'a>,
    text: &'a str,
}

impl<'a> CapturedNode<'a> {
    /// Returns the captured AST node.
    #[must_use]
    pub const fn node(&self) -> tree_sitter::Node<'a> {
        self.node
    }

    /// Returns the text of the captured node.
    #[must_use]
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// Returns the byte range of the captured node.
    #[must_use]
    pub fn byte_range(&self) -> Range<usize> {
        self.node.byte_range()
    }
}

/// Bindings accumulated while evaluating one candidate node.
///
/// Cloned before every speculative branch so that a failed branch leaves the
/// caller's bindings untouched.
#[derive(Debug, Clone)]
pub(super) struct Captures<'a> {
    source: &'a str,
    inner: HashMap<String, CapturedNode<'a>>,
}

impl<'a> Captures<'a> {
    pub(super) fn new(source: &'a str) -> Self {
        Self {
            source,
            inner: HashMap::new(),
        }
    }

    pub(super) const fn source(&self) -> &'a str {
        self.source
    }

    pub(super) fn into_inner(self) -> HashMap<String, CapturedNode<'a>> {
        self.inner
    }

    /// Binds `node` under `name`.
    ///
    /// Returns `false` when the name is already bound to a node with a
    /// different kind or text.
    pub(super) fn capture(&mut self, name: &str, node: tree_sitter::Node<'a>) -> bool {
        if name == "_" {
            return true;
        }

        let text = self.source.get(node.byte_range()).unwrap_or_default();
        let next = CapturedNode { node, text };

        let Some(existing) = self.inner.get(name) else {
            self.inner.insert(name.to_owned(), next);
            return true;
        };

        existing.node.kind() == next.node.kind() && existing.text == next.text
    }
}

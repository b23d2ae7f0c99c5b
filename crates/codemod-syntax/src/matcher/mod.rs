//! Rule matching engine for finding code structures.
//!
//! This module walks a parsed Tree-sitter syntax tree in pre-order and yields
//! the nodes that satisfy a [`Rule`], alongside the nodes bound by its
//! [`Rule::Capture`] atoms.

mod capture;
mod matching;

use std::collections::HashMap;
use std::ops::Range;

use crate::parser::ParseResult;
use crate::position::point_to_one_based;
use crate::rule::Rule;

pub use capture::CapturedNode;

/// Result of a successful rule match.
#[derive(Debug)]
pub struct RuleMatch<'a> {
    node: tree_sitter::Node<'a>,
    source: &'a str,
    captures: HashMap<String, CapturedNode<'a>>,
}

impl<'a> RuleMatch<'a> {
    pub(crate) const fn new(
        node: tree_sitter::Node<'a>,
        source: &'a str,
        captures: HashMap<String, CapturedNode<'a>>,
    ) -> Self {
        Self {
            node,
            source,
            captures,
        }
    }

    /// Returns the matched AST node.
    #[must_use]
    pub const fn node(&self) -> tree_sitter::Node<'a> {
        self.node
    }

    /// Returns the source the match borrows from.
    #[must_use]
    pub const fn source(&self) -> &'a str {
        self.source
    }

    /// Returns the byte range of the match in the source.
    #[must_use]
    pub fn byte_range(&self) -> Range<usize> {
        self.node.byte_range()
    }

    /// Returns the text of the matched region.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.source.get(self.byte_range()).unwrap_or_default()
    }

    /// Returns the start position (line, column) of the match.
    ///
    /// Both line and column are one-based for display purposes.
    #[must_use]
    pub fn start_position(&self) -> (u32, u32) {
        point_to_one_based(self.node.start_position())
    }

    /// Gets a captured node by binding name.
    #[must_use]
    pub fn capture(&self, name: &str) -> Option<&CapturedNode<'a>> {
        self.captures.get(name)
    }

    /// Returns all captured bindings.
    #[must_use]
    pub const fn captures(&self) -> &HashMap<String, CapturedNode<'a>> {
        &self.captures
    }
}

/// Rule matcher that finds occurrences in parsed code.
pub struct Matcher<'r> {
    rule: &'r Rule,
}

impl<'r> Matcher<'r> {
    /// Creates a new matcher for the given rule.
    #[must_use]
    pub const fn new(rule: &'r Rule) -> Self {
        Self { rule }
    }

    /// Finds all matches in the parsed source, in pre-order.
    #[must_use]
    pub fn find_all<'a>(&self, parsed: &'a ParseResult) -> Vec<RuleMatch<'a>> {
        matching::find_all(self.rule, parsed.root_node(), parsed.source())
    }

    /// Finds the first match in the parsed source, in pre-order.
    #[must_use]
    pub fn find_first<'a>(&self, parsed: &'a ParseResult) -> Option<RuleMatch<'a>> {
        matching::find_first(self.rule, parsed.root_node(), parsed.source())
    }

    /// Finds all matches in the subtree rooted at `node`, including `node`.
    #[must_use]
    pub fn find_all_in<'a>(
        &self,
        node: tree_sitter::Node<'a>,
        source: &'a str,
    ) -> Vec<RuleMatch<'a>> {
        matching::find_all(self.rule, node, source)
    }

    /// Finds the first match in the subtree rooted at `node`, including `node`.
    #[must_use]
    pub fn find_first_in<'a>(
        &self,
        node: tree_sitter::Node<'a>,
        source: &'a str,
    ) -> Option<RuleMatch<'a>> {
        matching::find_first(self.rule, node, source)
    }
}

impl Rule {
    /// Finds all matches of this rule in the parsed source.
    #[must_use]
    pub fn find_all<'a>(&self, parsed: &'a ParseResult) -> Vec<RuleMatch<'a>> {
        Matcher::new(self).find_all(parsed)
    }

    /// Finds the first match of this rule in the parsed source.
    #[must_use]
    pub fn find_first<'a>(&self, parsed: &'a ParseResult) -> Option<RuleMatch<'a>> {
        Matcher::new(self).find_first(parsed)
    }

    /// Finds all matches of this rule within `node`'s subtree.
    #[must_use]
    pub fn find_all_in<'a>(
        &self,
        node: tree_sitter::Node<'a>,
        source: &'a str,
    ) -> Vec<RuleMatch<'a>> {
        Matcher::new(self).find_all_in(node, source)
    }

    /// Finds the first match of this rule within `node`'s subtree.
    #[must_use]
    pub fn find_first_in<'a>(
        &self,
        node: tree_sitter::Node<'a>,
        source: &'a str,
    ) -> Option<RuleMatch<'a>> {
        Matcher::new(self).find_first_in(node, source)
    }

    /// Returns whether `node` itself satisfies this rule.
    #[must_use]
    pub fn matches_node(&self, node: tree_sitter::Node<'_>, source: &str) -> bool {
        let mut captures = capture::Captures::new(source);
        matching::evaluate(self, node, &mut captures)
    }
}

#[cfg(test)]
mod tests;

//! Rule evaluation for the [`Matcher`](super::Matcher) implementation.

use crate::matcher::RuleMatch;
use crate::matcher::capture::Captures;
use crate::rule::{Rule, StopBy};

/// Finds all nodes under (and including) `root` that satisfy `rule`.
///
/// Returns matches in traversal order (pre-order).
pub(super) fn find_all<'a>(
    rule: &Rule,
    root: tree_sitter::Node<'a>,
    source: &'a str,
) -> Vec<RuleMatch<'a>> {
    let mut results = Vec::new();
    find_matches_recursive(rule, root, source, &mut results);
    results
}

/// Finds the first node under (and including) `root` that satisfies `rule`.
pub(super) fn find_first<'a>(
    rule: &Rule,
    root: tree_sitter::Node<'a>,
    source: &'a str,
) -> Option<RuleMatch<'a>> {
    let mut captures = Captures::new(source);
    if evaluate(rule, root, &mut captures) {
        return Some(RuleMatch::new(root, source, captures.into_inner()));
    }

    let mut cursor = root.walk();
    let children: Vec<_> = root.children(&mut cursor).collect();
    children
        .into_iter()
        .find_map(|child| find_first(rule, child, source))
}

/// Pre-order walk collecting every match. Each candidate gets fresh captures.
fn find_matches_recursive<'a>(
    rule: &Rule,
    node: tree_sitter::Node<'a>,
    source: &'a str,
    results: &mut Vec<RuleMatch<'a>>,
) {
    let mut captures = Captures::new(source);
    if evaluate(rule, node, &mut captures) {
        results.push(RuleMatch::new(node, source, captures.into_inner()));
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        find_matches_recursive(rule, child, source, results);
    }
}

/// Evaluates `rule` against `node`, extending `captures` on success.
///
/// On failure `captures` may hold partial bindings; callers that need to
/// backtrack evaluate against a clone.
pub(super) fn evaluate<'a>(
    rule: &Rule,
    node: tree_sitter::Node<'a>,
    captures: &mut Captures<'a>,
) -> bool {
    match rule {
        Rule::Kind(kind) => node.kind() == kind.as_str(),
        Rule::Regex(regex) => {
            let text = captures.source().get(node.byte_range()).unwrap_or_default();
            regex.is_match(text)
        }
        Rule::Field(field) => field_name_of(node).is_some_and(|name| name == field.as_str()),
        Rule::Capture(name) => captures.capture(name, node),
        Rule::Inside(relation) => {
            let ancestors = std::iter::successors(node.parent(), tree_sitter::Node::parent);
            match relation.stop_by() {
                StopBy::Neighbor => match_any(relation.rule(), ancestors.take(1), captures),
                StopBy::End => match_any(relation.rule(), ancestors, captures),
            }
        }
        Rule::Has(relation) => {
            let candidates = match relation.stop_by() {
                StopBy::Neighbor => children_of(node),
                StopBy::End => descendants_of(node),
            };
            match_any(relation.rule(), candidates.into_iter(), captures)
        }
        Rule::Follows(relation) => {
            let siblings =
                std::iter::successors(node.prev_sibling(), tree_sitter::Node::prev_sibling);
            match relation.stop_by() {
                StopBy::Neighbor => match_any(relation.rule(), siblings.take(1), captures),
                StopBy::End => match_any(relation.rule(), siblings, captures),
            }
        }
        Rule::All(rules) => rules.iter().all(|inner| evaluate(inner, node, captures)),
        Rule::Any(rules) => rules.iter().any(|inner| try_evaluate(inner, node, captures)),
        Rule::Not(inner) => {
            let mut scratch = captures.clone();
            !evaluate(inner, node, &mut scratch)
        }
    }
}

/// Evaluates `rule` on a clone of `captures`, committing only on success.
fn try_evaluate<'a>(
    rule: &Rule,
    node: tree_sitter::Node<'a>,
    captures: &mut Captures<'a>,
) -> bool {
    let mut trial = captures.clone();
    if evaluate(rule, node, &mut trial) {
        *captures = trial;
        return true;
    }
    false
}

/// Tries `rule` against candidates in order, keeping the first success.
fn match_any<'a>(
    rule: &Rule,
    mut candidates: impl Iterator<Item = tree_sitter::Node<'a>>,
    captures: &mut Captures<'a>,
) -> bool {
    candidates.any(|candidate| try_evaluate(rule, candidate, captures))
}

fn children_of(node: tree_sitter::Node<'_>) -> Vec<tree_sitter::Node<'_>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

/// Collects every descendant of `node` in pre-order, excluding `node`.
fn descendants_of(node: tree_sitter::Node<'_>) -> Vec<tree_sitter::Node<'_>> {
    let mut out = Vec::new();
    let mut stack: Vec<_> = children_of(node).into_iter().rev().collect();
    while let Some(next) = stack.pop() {
        out.push(next);
        stack.extend(children_of(next).into_iter().rev());
    }
    out
}

/// Returns the field name under which `node` hangs off its parent.
fn field_name_of(node: tree_sitter::Node<'_>) -> Option<&'static str> {
    let parent = node.parent()?;
    let mut cursor = parent.walk();
    if !cursor.goto_first_child() {
        return None;
    }
    loop {
        if cursor.node() == node {
            return cursor.field_name();
        }
        if !cursor.goto_next_sibling() {
            return None;
        }
    }
}

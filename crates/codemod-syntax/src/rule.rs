//! Declarative rule trees for structural queries.
//!
//! A [`Rule`] describes the node to find as a tree of predicates, in the
//! spirit of [ast-grep](https://ast-grep.github.io/) YAML rules. Atomic
//! predicates inspect the candidate node itself (kind, text, field, binding),
//! relational predicates move to neighbouring nodes and evaluate a nested
//! rule there, and composite predicates combine rules with boolean logic.
//!
//! # Example
//!
//! ```
//! use codemod_syntax::Rule;
//!
//! // The body of a method whose parameter list follows a name like `create`.
//! let rule = Rule::kind("statement_block").inside(
//!     Rule::kind("method_definition").has(
//!         Rule::kind("formal_parameters")
//!             .follows(Rule::kind("property_identifier").with_regex("create")?),
//!     ),
//! );
//! # Ok::<(), codemod_syntax::SyntaxError>(())
//! ```

use regex::Regex;

use crate::error::SyntaxError;

/// How far a relational predicate searches from the candidate node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopBy {
    /// Only the adjacent node: the parent for `inside`, direct children for
    /// `has`, the immediately preceding sibling for `follows`.
    #[default]
    Neighbor,
    /// Every ancestor, descendant, or preceding sibling respectively.
    End,
}

/// A relational predicate target: a nested rule plus its search extent.
#[derive(Debug, Clone)]
pub struct Relation {
    rule: Box<Rule>,
    stop_by: StopBy,
}

impl Relation {
    /// Creates a relation that evaluates `rule` up to `stop_by`.
    #[must_use]
    pub fn new(rule: Rule, stop_by: StopBy) -> Self {
        Self {
            rule: Box::new(rule),
            stop_by,
        }
    }

    /// Returns the nested rule.
    #[must_use]
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Returns the search extent.
    #[must_use]
    pub const fn stop_by(&self) -> StopBy {
        self.stop_by
    }
}

/// A structural predicate over syntax tree nodes.
///
/// Builder methods such as [`Rule::has`] and [`Rule::with_regex`] fold their
/// argument into an [`Rule::All`], so chained calls read as a conjunction.
#[derive(Debug, Clone)]
pub enum Rule {
    /// The node's grammar kind equals the given name.
    Kind(String),
    /// The node's source text matches the regex (unanchored search).
    Regex(Regex),
    /// The node occupies the named field of its parent.
    Field(String),
    /// Always matches and binds the node under the given name.
    Capture(String),
    /// An ancestor matches the nested rule.
    Inside(Relation),
    /// A descendant matches the nested rule.
    Has(Relation),
    /// A preceding sibling matches the nested rule.
    Follows(Relation),
    /// Every rule matches. An empty list matches any node.
    All(Vec<Rule>),
    /// At least one rule matches; the first success wins.
    Any(Vec<Rule>),
    /// The nested rule does not match. Bindings inside it are discarded.
    Not(Box<Rule>),
}

impl Rule {
    /// Matches nodes of the given kind.
    #[must_use]
    pub fn kind(kind: impl Into<String>) -> Self {
        Self::Kind(kind.into())
    }

    /// Matches nodes whose text matches `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::InvalidRule`] if `pattern` is not a valid regex.
    pub fn regex(pattern: &str) -> Result<Self, SyntaxError> {
        Regex::new(pattern)
            .map(Self::Regex)
            .map_err(|err| SyntaxError::invalid_rule(format!("bad regex '{pattern}': {err}")))
    }

    /// Matches any node.
    #[must_use]
    pub const fn any_node() -> Self {
        Self::All(Vec::new())
    }

    /// Matches when every rule matches.
    #[must_use]
    pub fn all(rules: impl IntoIterator<Item = Self>) -> Self {
        Self::All(rules.into_iter().collect())
    }

    /// Matches when at least one rule matches.
    #[must_use]
    pub fn any(rules: impl IntoIterator<Item = Self>) -> Self {
        Self::Any(rules.into_iter().collect())
    }

    /// Matches when `rule` does not.
    #[must_use]
    pub fn not(rule: Self) -> Self {
        Self::Not(Box::new(rule))
    }

    /// Conjoins `other` with this rule.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::All(mut rules) => {
                rules.push(other);
                Self::All(rules)
            }
            single => Self::All(vec![single, other]),
        }
    }

    /// Additionally requires the node text to match `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::InvalidRule`] if `pattern` is not a valid regex.
    pub fn with_regex(self, pattern: &str) -> Result<Self, SyntaxError> {
        Ok(self.and(Self::regex(pattern)?))
    }

    /// Additionally requires the node to sit in the parent's `field`.
    #[must_use]
    pub fn in_field(self, field: impl Into<String>) -> Self {
        self.and(Self::Field(field.into()))
    }

    /// Binds the matched node under `name`.
    #[must_use]
    pub fn bind(self, name: impl Into<String>) -> Self {
        self.and(Self::Capture(name.into()))
    }

    /// Requires the parent to match `rule`.
    #[must_use]
    pub fn inside(self, rule: Self) -> Self {
        self.and(Self::Inside(Relation::new(rule, StopBy::Neighbor)))
    }

    /// Requires some ancestor to match `rule`.
    #[must_use]
    pub fn inside_until_end(self, rule: Self) -> Self {
        self.and(Self::Inside(Relation::new(rule, StopBy::End)))
    }

    /// Requires a direct child to match `rule`.
    #[must_use]
    pub fn has(self, rule: Self) -> Self {
        self.and(Self::Has(Relation::new(rule, StopBy::Neighbor)))
    }

    /// Requires some descendant to match `rule`.
    #[must_use]
    pub fn has_until_end(self, rule: Self) -> Self {
        self.and(Self::Has(Relation::new(rule, StopBy::End)))
    }

    /// Requires the immediately preceding sibling to match `rule`.
    #[must_use]
    pub fn follows(self, rule: Self) -> Self {
        self.and(Self::Follows(Relation::new(rule, StopBy::Neighbor)))
    }

    /// Requires some preceding sibling to match `rule`.
    #[must_use]
    pub fn follows_until_end(self, rule: Self) -> Self {
        self.and(Self::Follows(Relation::new(rule, StopBy::End)))
    }

    /// Returns the names this rule can bind, in declaration order.
    ///
    /// Names under [`Rule::Not`] are excluded because they never survive a
    /// successful match.
    #[must_use]
    pub fn capture_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_capture_names(&mut names);
        names
    }

    fn collect_capture_names<'r>(&'r self, names: &mut Vec<&'r str>) {
        match self {
            Self::Capture(name) => {
                if !names.contains(&name.as_str()) {
                    names.push(name.as_str());
                }
            }
            Self::Inside(relation) | Self::Has(relation) | Self::Follows(relation) => {
                relation.rule.collect_capture_names(names);
            }
            Self::All(rules) | Self::Any(rules) => {
                for rule in rules {
                    rule.collect_capture_names(names);
                }
            }
            Self::Kind(_) | Self::Regex(_) | Self::Field(_) | Self::Not(_) => {}
        }
    }
}

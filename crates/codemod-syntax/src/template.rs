//! Replacement templates with `$NAME` substitution.
//!
//! Templates are plain text in which `$NAME` refers to a value supplied at
//! render time, typically the text of a node bound by a rule. Names follow
//! the ast-grep convention: an ASCII uppercase letter or `_`, then uppercase
//! letters, digits, or `_`. A `$` not followed by a valid name is literal.

use std::collections::HashMap;
use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::SyntaxError;
use crate::matcher::RuleMatch;

/// A parsed replacement template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Var(String),
}

impl Template {
    /// Parses `source`, rejecting references to names outside `allowed`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::InvalidTemplate`] if the template references a
    /// name that is not in `allowed`.
    ///
    /// # Examples
    ///
    /// ```
    /// use codemod_syntax::Template;
    ///
    /// let template = Template::parse("const $NAME = 1;", &["NAME"])?;
    /// assert_eq!(template.variables(), vec!["NAME"]);
    /// # Ok::<(), codemod_syntax::SyntaxError>(())
    /// ```
    pub fn parse(source: &str, allowed: &[&str]) -> Result<Self, SyntaxError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((_, ch)) = chars.next() {
            if ch != '$' {
                literal.push(ch);
                continue;
            }

            let name = extract_var_name(&mut chars);
            if name.is_empty() {
                literal.push('$');
                continue;
            }
            if !allowed.contains(&name.as_str()) {
                return Err(SyntaxError::invalid_template(format!(
                    "template references undefined variable: ${name}"
                )));
            }
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Var(name));
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// Returns the variable names referenced, in order of appearance.
    #[must_use]
    pub fn variables(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Var(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Renders the template, looking each variable up in `values`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::InvalidTemplate`] if a referenced variable has
    /// no value.
    pub fn render(&self, values: &HashMap<&str, &str>) -> Result<String, SyntaxError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Var(name) => {
                    let value = values.get(name.as_str()).ok_or_else(|| {
                        SyntaxError::invalid_template(format!("no value bound for ${name}"))
                    })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }

    /// Renders the template from the bindings of `found`, with `extra`
    /// values taking precedence.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::InvalidTemplate`] if a referenced variable is
    /// neither bound by the match nor present in `extra`.
    pub fn render_match(
        &self,
        found: &RuleMatch<'_>,
        extra: &[(&str, &str)],
    ) -> Result<String, SyntaxError> {
        let mut values: HashMap<&str, &str> = found
            .captures()
            .iter()
            .map(|(name, node)| (name.as_str(), node.text()))
            .collect();
        values.extend(extra.iter().copied());
        self.render(&values)
    }
}

/// Reads a variable name from a stream positioned just after a `$`.
///
/// Returns an empty string when the next character cannot start a name.
fn extract_var_name(chars: &mut Peekable<CharIndices<'_>>) -> String {
    let mut name = String::new();

    let Some((_, first_char)) = chars.peek().copied() else {
        return name;
    };
    if !(first_char.is_ascii_uppercase() || first_char == '_') {
        return name;
    }
    name.push(first_char);
    chars.next();

    while let Some((_, c)) = chars.peek().copied() {
        if !(c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_') {
            break;
        }
        name.push(c);
        chars.next();
    }

    name
}

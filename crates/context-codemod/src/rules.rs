//! Structural queries used by the transform.

use codemod_syntax::{Rule, SyntaxError};

/// Binding for the `create` method's context parameter.
pub(crate) const CONTEXT: &str = "CONTEXT";

/// Binding for the identifier an accessor call is made on.
pub(crate) const IDENTIFIER: &str = "IDENTIFIER";

/// Body of the first method named like `create` whose parameter list holds
/// a parameter named like `context`.
///
/// The parameter is accepted either as a bare identifier or wrapped in the
/// TypeScript grammar's `required_parameter`.
pub(crate) fn create_block() -> Result<Rule, SyntaxError> {
    let context = Rule::kind("identifier").with_regex("context")?.bind(CONTEXT);
    let parameter = Rule::any([
        context.clone(),
        Rule::kind("required_parameter").has(context.in_field("pattern")),
    ]);

    let parameters = Rule::kind("formal_parameters")
        .has(parameter)
        .follows(Rule::kind("property_identifier").with_regex("create")?);

    Ok(Rule::kind("statement_block").inside(Rule::kind("method_definition").has(parameters)))
}

/// A `<context>.getSourceCode()` call without arguments, rooted at exactly
/// `context_name`.
pub(crate) fn accessor_call(context_name: &str) -> Result<Rule, SyntaxError> {
    let root = format!("^{}$", regex::escape(context_name));
    let callee = Rule::kind("member_expression")
        .in_field("function")
        .has(
            Rule::kind("identifier")
                .in_field("object")
                .with_regex(&root)?
                .bind(IDENTIFIER),
        )
        .has(
            Rule::kind("property_identifier")
                .in_field("property")
                .with_regex("^getSourceCode$")?,
        );

    Ok(Rule::kind("call_expression").has(callee).has(
        Rule::kind("arguments")
            .in_field("arguments")
            .with_regex(r"^\(\s*\)$")?,
    ))
}

/// Every parameter identifier named like `context`, each bound as
/// `CONTEXT`, for searching within one `formal_parameters` node.
pub(crate) fn context_parameter() -> Result<Rule, SyntaxError> {
    let parameters = Rule::kind("formal_parameters");
    Ok(Rule::kind("identifier")
        .with_regex("context")?
        .and(Rule::any([
            Rule::any_node().inside(parameters.clone()),
            Rule::any_node()
                .in_field("pattern")
                .inside(Rule::kind("required_parameter").inside(parameters)),
        ]))
        .bind(CONTEXT))
}

/// A function-like node whose own parameters bind exactly `name`.
pub(crate) fn rebinds(name: &str) -> Result<Rule, SyntaxError> {
    let exact = format!("^{}$", regex::escape(name));
    let parameter = Rule::kind("identifier").with_regex(&exact)?;

    Ok(Rule::any([
        Rule::any_node().has(Rule::kind("formal_parameters").has(Rule::any([
            parameter.clone(),
            Rule::any_node().has(parameter.clone().in_field("pattern")),
        ]))),
        Rule::kind("arrow_function").has(parameter.in_field("parameter")),
    ]))
}

/// A directive such as `"use strict";`.
pub(crate) fn directive() -> Rule {
    Rule::kind("expression_statement").has(Rule::kind("string"))
}

/// A block whose top level declares `binding` with `const`, `let`, or `var`.
pub(crate) fn declares(binding: &str) -> Result<Rule, SyntaxError> {
    let name = format!("^{}$", regex::escape(binding));
    let declarator = Rule::kind("variable_declarator").has(
        Rule::kind("identifier")
            .in_field("name")
            .with_regex(&name)?,
    );

    Ok(Rule::kind("statement_block").has(Rule::any([
        Rule::kind("lexical_declaration").has(declarator.clone()),
        Rule::kind("variable_declaration").has(declarator),
    ])))
}

#[cfg(test)]
mod tests {
    use codemod_syntax::{ParseResult, Parser, SupportedLanguage};
    use rstest::rstest;

    use super::*;

    fn parse(source: &str) -> ParseResult {
        let mut parser = Parser::new(SupportedLanguage::JavaScript).expect("parser");
        parser.parse(source).expect("parse")
    }

    #[rstest]
    #[case("const r = { create(context) { return 1; } };", Some("context"))]
    #[case("const r = { createOnce(_context) { return 1; } };", Some("_context"))]
    #[case("const r = { create(ctx) { return 1; } };", None)]
    #[case("const r = { build(context) { return 1; } };", None)]
    #[case("function create(context) { return 1; }", None)]
    #[case("const r = { create: function (context) { return 1; } };", None)]
    fn create_block_binds_the_context_parameter(
        #[case] source: &str,
        #[case] expected: Option<&str>,
    ) {
        let parsed = parse(source);
        let rule = create_block().expect("rule");

        let found = rule.find_first(&parsed);
        assert_eq!(
            found
                .as_ref()
                .and_then(|m| m.capture(CONTEXT))
                .map(|c| c.text()),
            expected
        );
    }

    #[test]
    fn create_block_accepts_later_parameters() {
        let parsed = parse("const r = { create(options, context) { return 1; } };");
        let rule = create_block().expect("rule");

        let found = rule.find_first(&parsed).expect("block");
        assert_eq!(found.text(), "{ return 1; }");
    }

    #[rstest]
    #[case("context.getSourceCode()", 1)]
    #[case("context.getSourceCode( )", 1)]
    #[case("context.getSourceCode(node)", 0)]
    #[case("context.report()", 0)]
    #[case("other.getSourceCode()", 0)]
    #[case("contextual.getSourceCode()", 0)]
    #[case("context.getSourceCode().getText()", 1)]
    fn accessor_call_is_exact(#[case] expression: &str, #[case] expected: usize) {
        let parsed = parse(&format!("{expression};"));
        let rule = accessor_call("context").expect("rule");

        assert_eq!(rule.find_all(&parsed).len(), expected);
    }

    #[rstest]
    #[case("const r = { create(context) {} };", vec!["context"])]
    #[case("const r = { create(contextA, context) {} };", vec!["contextA", "context"])]
    #[case("const r = { create(options) {} };", vec![])]
    fn context_parameter_lists_every_candidate(
        #[case] source: &str,
        #[case] expected: Vec<&str>,
    ) {
        let parsed = parse(source);
        let parameters = Rule::kind("formal_parameters")
            .find_first(&parsed)
            .expect("parameters");
        let rule = context_parameter().expect("rule");

        let names: Vec<_> = rule
            .find_all_in(parameters.node(), parsed.source())
            .iter()
            .map(|found| found.text())
            .collect();
        assert_eq!(names, expected);
    }

    #[rstest]
    #[case("(context) => 1;", true)]
    #[case("context => 1;", true)]
    #[case("(function (a, context) {});", true)]
    #[case("(function (contextual) {});", false)]
    #[case("(a = context) => 1;", false)]
    fn rebinds_matches_functions_taking_the_name(#[case] source: &str, #[case] expected: bool) {
        let parsed = parse(source);
        let rule = rebinds("context").expect("rule");

        let function = Rule::any([
            Rule::kind("arrow_function"),
            Rule::kind("function_expression"),
        ])
        .find_first(&parsed)
        .expect("function");
        assert_eq!(rule.matches_node(function.node(), parsed.source()), expected);
    }

    #[rstest]
    #[case("'use strict';", true)]
    #[case("\"use strict\";", true)]
    #[case("'a' + b;", false)]
    #[case("foo();", false)]
    fn directive_is_a_bare_string_statement(#[case] source: &str, #[case] expected: bool) {
        let parsed = parse(source);
        let statement = Rule::kind("expression_statement")
            .find_first(&parsed)
            .expect("statement");

        assert_eq!(
            directive().matches_node(statement.node(), parsed.source()),
            expected
        );
    }

    #[rstest]
    #[case("{ const sourceCode = 1; }", true)]
    #[case("{ let sourceCode; }", true)]
    #[case("{ var a = 1, sourceCode = 2; }", true)]
    #[case("{ const sourceCodeExtra = 1; }", false)]
    #[case("{ if (x) { const sourceCode = 1; } }", false)]
    fn declares_only_sees_top_level_declarations(#[case] block: &str, #[case] expected: bool) {
        let parsed = parse(block);
        let rule = declares("sourceCode").expect("rule");

        let outer = Rule::kind("statement_block")
            .find_first(&parsed)
            .expect("block");
        assert_eq!(rule.matches_node(outer.node(), parsed.source()), expected);
    }
}

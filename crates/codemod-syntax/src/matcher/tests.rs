use super::*;

use rstest::{fixture, rstest};

use crate::language::SupportedLanguage;
use crate::parser::Parser;

const RULE_SOURCE: &str =
    "const rule = { create(context) { return context.getSourceCode(); }, other(ctx) {} };";

#[fixture]
fn parsed() -> ParseResult {
    let mut parser = Parser::new(SupportedLanguage::JavaScript).expect("parser");
    parser.parse(RULE_SOURCE).expect("parse")
}

fn texts<'a>(matches: &[RuleMatch<'a>]) -> Vec<&'a str> {
    matches.iter().map(RuleMatch::text).collect()
}

#[rstest]
fn inside_neighbor_only_checks_the_parent(parsed: ParseResult) {
    let direct = Rule::kind("statement_block").inside(Rule::kind("method_definition"));
    let via_object = Rule::kind("statement_block").inside(Rule::kind("object"));
    let any_ancestor = Rule::kind("statement_block").inside_until_end(Rule::kind("object"));

    assert_eq!(direct.find_all(&parsed).len(), 2);
    assert!(via_object.find_all(&parsed).is_empty());
    assert_eq!(any_ancestor.find_all(&parsed).len(), 2);
}

#[rstest]
fn has_with_field_binds_the_member_object(parsed: ParseResult) {
    let rule = Rule::kind("member_expression")
        .has(Rule::kind("identifier").in_field("object").bind("OBJECT"));

    let found = rule.find_first(&parsed).expect("member expression");
    let object = found.capture("OBJECT").expect("OBJECT binding");
    assert_eq!(object.text(), "context");
    assert_eq!(found.text(), "context.getSourceCode");
}

#[rstest]
fn has_neighbor_does_not_reach_grandchildren(parsed: ParseResult) {
    let shallow = Rule::kind("statement_block").has(Rule::kind("call_expression"));
    let deep = Rule::kind("statement_block").has_until_end(Rule::kind("call_expression"));

    assert!(shallow.find_first(&parsed).is_none());
    assert_eq!(deep.find_all(&parsed).len(), 1);
}

#[rstest]
fn follows_checks_the_preceding_sibling(parsed: ParseResult) {
    let rule = Rule::kind("formal_parameters").follows(
        Rule::kind("property_identifier")
            .with_regex("^create$")
            .expect("regex"),
    );

    assert_eq!(texts(&rule.find_all(&parsed)), vec!["(context)"]);
}

#[rstest]
fn follows_until_end_checks_every_preceding_sibling(parsed: ParseResult) {
    let create = Rule::kind("method_definition").has(
        Rule::kind("property_identifier")
            .with_regex("^create$")
            .expect("regex"),
    );
    let neighbour = Rule::kind("method_definition").follows(create.clone());
    let any_earlier = Rule::kind("method_definition").follows_until_end(create);

    // The comma between the two methods is the immediate sibling.
    assert!(neighbour.find_first(&parsed).is_none());
    assert_eq!(texts(&any_earlier.find_all(&parsed)), vec!["other(ctx) {}"]);
}

#[rstest]
fn regex_searches_anywhere_in_the_node_text(parsed: ParseResult) {
    let rule = Rule::kind("property_identifier")
        .with_regex("Source")
        .expect("regex");

    assert_eq!(texts(&rule.find_all(&parsed)), vec!["getSourceCode"]);
}

#[rstest]
fn not_excludes_nodes_matching_the_inner_rule(parsed: ParseResult) {
    let rule = Rule::kind("method_definition").and(Rule::not(
        Rule::any_node().has_until_end(Rule::kind("call_expression")),
    ));

    let found = rule.find_all(&parsed);
    assert_eq!(found.len(), 1);
    assert!(found.first().is_some_and(|m| m.text().starts_with("other")));
}

#[rstest]
fn any_accepts_the_first_matching_alternative(parsed: ParseResult) {
    let rule = Rule::kind("identifier").and(Rule::any([
        Rule::any_node().in_field("object").bind("ROLE"),
        Rule::any_node().in_field("pattern").bind("ROLE"),
    ]));

    assert_eq!(
        texts(&rule.find_all(&parsed)),
        vec!["context", "context", "ctx"]
    );
}

#[rstest]
#[case("const r = { create(context) { context.getSourceCode(); } };", 1)]
#[case("const r = { create(ctx) { context.getSourceCode(); } };", 0)]
fn repeated_binding_requires_identical_text(#[case] source: &str, #[case] expected: usize) {
    let mut parser = Parser::new(SupportedLanguage::JavaScript).expect("parser");
    let parsed = parser.parse(source).expect("parse");
    let rule = Rule::kind("call_expression")
        .has_until_end(Rule::kind("identifier").in_field("object").bind("NAME"))
        .inside_until_end(
            Rule::kind("method_definition")
                .has_until_end(Rule::kind("identifier").in_field("pattern").bind("NAME")),
        );

    assert_eq!(rule.find_all(&parsed).len(), expected);
}

#[rstest]
fn find_first_returns_the_earliest_node_in_pre_order(parsed: ParseResult) {
    let rule = Rule::kind("statement_block");

    let first = rule.find_first(&parsed).expect("block");
    assert!(first.text().contains("getSourceCode"));
    assert_eq!(first.start_position().0, 1);
}

#[rstest]
fn scoped_search_stays_inside_the_given_node(parsed: ParseResult) {
    let block = Rule::kind("statement_block")
        .find_all(&parsed)
        .into_iter()
        .nth(1)
        .expect("second block");
    let calls = Rule::kind("call_expression").find_all_in(block.node(), parsed.source());

    assert!(calls.is_empty());
    assert!(Rule::kind("statement_block").matches_node(block.node(), parsed.source()));
}

#[rstest]
fn failed_branches_leave_no_bindings(parsed: ParseResult) {
    let rule = Rule::kind("method_definition").and(Rule::any([
        Rule::any_node()
            .has(Rule::kind("property_identifier").bind("NAME"))
            .has(Rule::kind("decorator")),
        Rule::any_node(),
    ]));

    let found = rule.find_first(&parsed).expect("method");
    assert!(found.capture("NAME").is_none());
    assert!(found.captures().is_empty());
}

//! Unit tests for the transform across modes and languages.

use rstest::rstest;

use crate::{
    RewriteMode, SourceCodeTransform, SupportedLanguage, TransformError, TransformOptions,
    TransformStatus,
};

fn run(options: TransformOptions, source: &str) -> Result<crate::TransformOutcome, TransformError> {
    SourceCodeTransform::new(options)
        .expect("transform")
        .transform_source(source)
}

fn brace_balance(text: &str) -> (usize, usize) {
    (text.matches('{').count(), text.matches('}').count())
}

// =============================================================================
// Modes
// =============================================================================

#[rstest]
#[case(RewriteMode::RenameAccessor)]
#[case(RewriteMode::DeclareOnly)]
fn every_mode_keeps_braces_balanced(#[case] mode: RewriteMode) {
    let source = "module.exports = {\n  create(context) {\n    return {\n      Program() {\n        context.getSourceCode();\n      },\n    };\n  },\n};\n";
    let outcome = run(TransformOptions::for_mode(mode), source).expect("transform");

    let (open, close) = brace_balance(outcome.output());
    assert_eq!(open, close);
    assert_eq!(brace_balance(source), (open, close));
}

#[rstest]
#[case(RewriteMode::RenameAccessor, "contextSourceCode")]
#[case(RewriteMode::DeclareOnly, "sourceCode")]
fn declaration_uses_the_mode_binding(#[case] mode: RewriteMode, #[case] binding: &str) {
    let outcome = run(
        TransformOptions::for_mode(mode),
        "const r = { create(context) { return 1; } };",
    )
    .expect("transform");

    let expected = format!(
        "{{ const {binding} = context.sourceCode ?? context.getSourceCode(); return 1; }}"
    );
    assert!(outcome.output().contains(&expected), "{}", outcome.output());
}

#[test]
fn declaration_uses_the_captured_parameter_name() {
    let outcome = run(
        TransformOptions::default(),
        "const r = { create(_context) { return _context.getSourceCode(); } };",
    )
    .expect("transform");

    assert_eq!(
        outcome.output(),
        "const r = { create(_context) { const contextSourceCode = \
         _context.sourceCode ?? _context.getSourceCode(); return contextSourceCode; } };"
    );
}

// =============================================================================
// Renaming Scope
// =============================================================================

#[rstest]
#[case("other.getSourceCode()")]
#[case("context.getSourceCode(node)")]
#[case("context.getScope()")]
#[case("getSourceCode()")]
fn unrelated_calls_are_untouched(#[case] call: &str) {
    let source = format!("const r = {{ create(context) {{ return {call}; }} }};");
    let outcome = run(TransformOptions::default(), &source).expect("transform");

    assert_eq!(
        outcome.status(),
        TransformStatus::Rewritten { renamed: 0 }
    );
    assert!(outcome.output().contains(&format!("return {call};")));
}

#[test]
fn calls_outside_the_create_block_are_untouched() {
    let source = "const sc = context.getSourceCode();\n\
                  const r = { create(context) { return context.getSourceCode(); } };";
    let outcome = run(TransformOptions::default(), source).expect("transform");

    assert!(
        outcome
            .output()
            .starts_with("const sc = context.getSourceCode();\n")
    );
    assert_eq!(
        outcome.status(),
        TransformStatus::Rewritten { renamed: 1 }
    );
}

#[test]
fn nested_calls_in_the_block_are_renamed() {
    let source = "const r = { create(context) { return { Program(node) { \
                  context.getSourceCode().getText(node); } }; } };";
    let outcome = run(TransformOptions::default(), source).expect("transform");

    assert!(
        outcome
            .output()
            .contains("{ contextSourceCode.getText(node); }")
    );
}

// =============================================================================
// Languages
// =============================================================================

#[rstest]
#[case(SupportedLanguage::JavaScript, "const r = { create(context) { return <a />; } };")]
#[case(SupportedLanguage::Tsx, "const r = { create(context: Ctx) { return <a />; } };")]
#[case(SupportedLanguage::TypeScript, "const r = { create(context: Ctx): void { return; } };")]
fn each_language_is_supported(#[case] language: SupportedLanguage, #[case] source: &str) {
    let options = TransformOptions::default().with_language(language);
    let outcome = run(options, source).expect("transform");

    assert!(outcome.has_changes(), "{language}: {}", outcome.output());
}

// =============================================================================
// Guards and Validation
// =============================================================================

#[rstest]
#[case("const r = { create(context) { const contextSourceCode = 1; return 2; } };")]
#[case("const r = { create(context) { let contextSourceCode; } };")]
fn existing_binding_is_left_alone(#[case] source: &str) {
    let outcome = run(TransformOptions::default(), source).expect("transform");

    assert_eq!(outcome.status(), TransformStatus::AlreadyMigrated);
    assert_eq!(outcome.output(), source);
}

#[test]
fn binding_declared_in_a_nested_block_does_not_count() {
    let source = "const r = { create(context) { if (x) { const contextSourceCode = 1; } } };";
    let outcome = run(TransformOptions::default(), source).expect("transform");

    assert!(outcome.has_changes());
}

#[test]
fn validation_can_be_disabled() {
    let options = TransformOptions::default().with_validate_output(false);
    let outcome = run(options, "const r = { create(context) {} };").expect("transform");

    assert_eq!(
        outcome.output(),
        "const r = { create(context) { const contextSourceCode = \
         context.sourceCode ?? context.getSourceCode(); } };"
    );
}

#[test]
fn unclosed_create_block_is_malformed() {
    let err = run(
        TransformOptions::default(),
        "const r = {\n  create(context) {\n    return 1;\n};\n",
    )
    .expect_err("unbalanced input should fail");

    assert!(matches!(err, TransformError::MalformedInput { .. }));
    assert!(err.to_string().starts_with("input has a syntax error at "));
}

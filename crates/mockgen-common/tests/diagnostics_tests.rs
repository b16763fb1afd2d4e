use crate::diagnostics::{Diagnostic, DiagnosticCategory, diagnostic_codes, format_message};

#[test]
fn test_format_message_substitutes_positional_args() {
    assert_eq!(format_message("{0} and {1}", &["a", "b"]), "a and b");
}

#[test]
fn test_from_code_uses_registered_template() {
    let diag = Diagnostic::from_code(
        "Counter",
        "Handler",
        diagnostic_codes::AMBIGUOUS_TYPE_ALIAS,
        &["Handler", "() -> Void, (Int) -> Void"],
    );
    assert_eq!(diag.category, DiagnosticCategory::Warning);
    assert_eq!(diag.code, 9001);
    assert_eq!(
        diag.message_text,
        "Type alias 'Handler' is declared with conflicting types: () -> Void, (Int) -> Void."
    );
}

#[test]
fn test_unknown_code_yields_empty_message() {
    let diag = Diagnostic::from_code("Counter", "", 1, &[]);
    assert!(diag.message_text.is_empty());
}

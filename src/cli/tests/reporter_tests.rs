use super::reporter::Reporter;
use mockgen_common::{Diagnostic, DiagnosticCategory, diagnostic_codes};

fn sample() -> Vec<Diagnostic> {
    vec![
        Diagnostic::from_code(
            "Events",
            "Handler",
            diagnostic_codes::AMBIGUOUS_TYPE_ALIAS,
            &["Handler", "() -> Void, (Int) -> Void"],
        ),
        Diagnostic::from_code(
            "Client",
            "session",
            diagnostic_codes::UNRESOLVED_DEFAULT_VALUE,
            &["session", "Session"],
        ),
    ]
}

#[test]
fn formats_plain_diagnostic() {
    let reporter = Reporter::new(false, false);
    assert_eq!(
        reporter.format_diagnostic(&sample()[0]),
        "Events:Handler - warning MG9001: Type alias 'Handler' is declared with conflicting types: () -> Void, (Int) -> Void."
    );
}

#[test]
fn missing_file_is_unknown() {
    let reporter = Reporter::new(false, false);
    let diagnostic = Diagnostic {
        category: DiagnosticCategory::Warning,
        code: 0,
        file: String::new(),
        member: String::new(),
        message_text: "something odd".to_string(),
    };
    assert_eq!(
        reporter.format_diagnostic(&diagnostic),
        "<unknown> - warning: something odd"
    );
}

#[test]
fn messages_hidden_unless_verbose() {
    let diagnostics = sample();
    let quiet = Reporter::new(false, false).render(&diagnostics);
    assert!(quiet.contains("MG9001"));
    assert!(!quiet.contains("MG9002"));

    let verbose = Reporter::new(false, true).render(&diagnostics);
    assert_eq!(verbose.lines().count(), 2);
    assert!(verbose.contains("Client:session - message MG9002"));
}

#[test]
fn summary_counts_warnings() {
    let reporter = Reporter::new(false, false);
    assert_eq!(
        reporter.summary(1, &sample()),
        "Generated 1 mock with 1 warning(s)."
    );
    assert_eq!(reporter.summary(3, &[]), "Generated 3 mocks with 0 warning(s).");
}

use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning,
    Message,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// Stable codes for conditions the renderer recovers from.
pub mod diagnostic_codes {
    pub const AMBIGUOUS_TYPE_ALIAS: u32 = 9001;
    pub const UNRESOLVED_DEFAULT_VALUE: u32 = 9002;
    pub const UNMATCHED_REACTIVE_ALIAS: u32 = 9003;
    pub const MALFORMED_CLOSURE_TYPE: u32 = 9004;
}

pub const DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::AMBIGUOUS_TYPE_ALIAS,
        category: DiagnosticCategory::Warning,
        message: "Type alias '{0}' is declared with conflicting types: {1}.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNRESOLVED_DEFAULT_VALUE,
        category: DiagnosticCategory::Message,
        message: "No default value for '{0}' of type '{1}'; it must be stubbed explicitly.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNMATCHED_REACTIVE_ALIAS,
        category: DiagnosticCategory::Warning,
        message: "'{0}' aliases '{1}', which is not a member of this interface; using a standalone subject.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::MALFORMED_CLOSURE_TYPE,
        category: DiagnosticCategory::Warning,
        message: "Closure type '{0}' of parameter '{1}' could not be decomposed; treating it as an opaque value.",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    /// Interface (or input file) the diagnostic belongs to.
    pub file: String,
    /// Member the diagnostic was raised for; empty for interface-level issues.
    pub member: String,
    pub message_text: String,
}

impl Diagnostic {
    /// Build a diagnostic from a registered message template.
    pub fn from_code(file: &str, member: &str, code: u32, args: &[&str]) -> Self {
        let category = DIAGNOSTIC_MESSAGES
            .iter()
            .find(|m| m.code == code)
            .map(|m| m.category)
            .unwrap_or(DiagnosticCategory::Warning);
        let text = get_message_template(code)
            .map(|template| format_message(template, args))
            .unwrap_or_default();
        Self {
            category,
            code,
            file: file.to_string(),
            member: member.to_string(),
            message_text: text,
        }
    }
}

pub fn get_message_template(code: u32) -> Option<&'static str> {
    DIAGNOSTIC_MESSAGES
        .iter()
        .find(|m| m.code == code)
        .map(|m| m.message)
}

pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

//! Identifier text helpers.
//!
//! Generated member names are built by concatenating declared names, so the
//! helpers here only ever touch the first character or wrap the whole name.

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;

static SWIFT_KEYWORDS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        // declarations
        "associatedtype",
        "class",
        "deinit",
        "enum",
        "extension",
        "fileprivate",
        "func",
        "import",
        "init",
        "inout",
        "internal",
        "let",
        "open",
        "operator",
        "private",
        "precedencegroup",
        "protocol",
        "public",
        "rethrows",
        "static",
        "struct",
        "subscript",
        "typealias",
        "var",
        // statements
        "break",
        "case",
        "catch",
        "continue",
        "default",
        "defer",
        "do",
        "else",
        "fallthrough",
        "for",
        "guard",
        "if",
        "in",
        "repeat",
        "return",
        "switch",
        "throw",
        "where",
        "while",
        // expressions and types
        "Any",
        "as",
        "await",
        "false",
        "is",
        "nil",
        "self",
        "Self",
        "super",
        "throws",
        "true",
        "try",
    ]
    .into_iter()
    .collect()
});

/// Upper-case the first character, leaving the rest untouched.
///
/// `fetchItems` becomes `FetchItems`; an empty string stays empty.
pub fn capitalize_first_letter(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn is_swift_keyword(name: &str) -> bool {
    SWIFT_KEYWORDS.contains(name)
}

/// Escape a reserved word with backticks so it can be used as an identifier.
pub fn safe_name(name: &str) -> String {
    if is_swift_keyword(name) {
        format!("`{name}`")
    } else {
        name.to_string()
    }
}

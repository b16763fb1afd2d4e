//! Common types and utilities for the mockgen mock generator.
//!
//! This crate provides foundational types used across all mockgen crates:
//! - Diagnostics for non-fatal render conditions (`Diagnostic`, `DiagnosticCategory`)
//! - Identifier text helpers (`capitalize_first_letter`, `safe_name`)
//! - Layout constants shared by the emitter and the CLI

// Diagnostics - non-fatal conditions surfaced alongside emitted text
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticMessage, diagnostic_codes};

// Identifier helpers - capitalization and keyword escaping
pub mod names;
pub use names::{capitalize_first_letter, is_swift_keyword, safe_name};

// Layout constants - indentation and generated-name suffixes
pub mod layout;

#[cfg(test)]
#[path = "../tests/names_tests.rs"]
mod names_tests;

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod diagnostics_tests;

//! Swift test double generator.
//!
//! The heavy lifting lives in the member crates; this facade re-exports them
//! and hosts the native CLI.

pub use mockgen_common as common;
pub use mockgen_emitter as emitter;
pub use mockgen_model as model;

pub use mockgen_common::{Diagnostic, DiagnosticCategory, diagnostic_codes};
pub use mockgen_emitter::{RenderError, RenderOptions, RenderedMock, render_interface};
pub use mockgen_model::{InterfaceModel, Member, MockInput};

// Tracing setup for the binary (MOCKGEN_LOG, MOCKGEN_LOG_FORMAT)
pub mod tracing_config;

// Native CLI: argument parsing, config loading, file discovery, reporting
pub mod cli;

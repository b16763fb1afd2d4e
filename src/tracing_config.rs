//! Tracing configuration for inspecting render decisions.
//!
//! Supports three output formats controlled by `MOCKGEN_LOG_FORMAT`:
//!
//! - `text` (default): standard `tracing-subscriber` flat output
//! - `tree`: hierarchical indented output via `tracing-tree`, one span per interface
//! - `json`: one JSON object per span/event
//!
//! ## Quick start
//!
//! ```bash
//! # Why did this overload get a numeric suffix?
//! MOCKGEN_LOG=mockgen_emitter::identifiers=trace mockgen Sources/
//!
//! # Whole run as a tree
//! MOCKGEN_LOG=debug MOCKGEN_LOG_FORMAT=tree mockgen Sources/
//!
//! # JSON lines for tooling
//! MOCKGEN_LOG=debug MOCKGEN_LOG_FORMAT=json mockgen Sources/
//! ```
//!
//! The subscriber is only initialised when `MOCKGEN_LOG` (or `RUST_LOG`) is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const LOG_VAR: &str = "MOCKGEN_LOG";
const LOG_FORMAT_VAR: &str = "MOCKGEN_LOG_FORMAT";

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines (default).
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a format name; unknown names fall back to text.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var(LOG_FORMAT_VAR).unwrap_or_default())
    }
}

/// `MOCKGEN_LOG` wins over `RUST_LOG`; both use `RUST_LOG` syntax.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var(LOG_VAR) {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Initialise the global tracing subscriber.
///
/// All output goes to stderr so it never mixes with generated source on stdout.
pub fn init_tracing() {
    let has_mockgen_log = std::env::var(LOG_VAR).is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_mockgen_log && !has_rust_log {
        return;
    }

    let filter = build_filter();

    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_writer(std::io::stderr)
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

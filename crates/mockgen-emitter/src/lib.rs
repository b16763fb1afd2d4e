//! Mock rendering engine.
//!
//! Turns an [`InterfaceModel`](mockgen_model::InterfaceModel) into the source
//! text of a test double: stub storage, call counters, handler hooks, a
//! closed call-log type, and the initializers the mock needs.
//!
//! Entry point: [`render_interface`].

// Options and errors
pub mod error;
pub mod options;
pub use error::RenderError;
pub use options::RenderOptions;

// Text output
pub mod writer;
pub use writer::SourceWriter;

// Resolution phases - run before any text is produced
pub mod alias_linker;
pub mod default_value;
pub mod identifiers;
pub mod typealias;
pub use alias_linker::{AliasLinks, ReactiveLink};
pub use identifiers::{
    CaseIdentifiers, IdentifierResolver, StubNames, assign_case_identifiers, assign_stub_names,
};
pub use typealias::{AliasRegistry, TypeAliasWhitelist};

// Synthesis
pub mod call_log;
pub mod initializers;
pub mod members;
pub use call_log::CallLogSynthesizer;
pub use initializers::{InitCandidate, InitializerPlan, InitializerSynthesizer};
pub use members::{MemberRenderer, RenderedMember};

// Assembly
pub mod assembler;
pub use assembler::{RenderedMock, render_interface, validate};

#[cfg(test)]
#[path = "../tests/default_value_tests.rs"]
mod default_value_tests;

#[cfg(test)]
#[path = "../tests/writer_tests.rs"]
mod writer_tests;

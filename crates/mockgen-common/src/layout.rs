//! Layout constants for emitted source text.
//!
//! Consumers of the generated mocks depend on these suffixes, so they are
//! shared here rather than spelled out at each use site.

/// Spaces per indentation level.
pub const INDENT_WIDTH: usize = 4;

/// Suffix of the per-member invocation counter.
pub const CALL_COUNT_SUFFIX: &str = "CallCount";

/// Suffix of the per-member handler closure property.
pub const HANDLER_SUFFIX: &str = "Handler";

/// Suffix of the per-member argument history container.
pub const ARG_VALUES_SUFFIX: &str = "ArgValues";

/// Suffix of the call-log enumeration type.
pub const ELEMENTS_SUFFIX: &str = "Elements";

/// Suffix appended to an interface name when no mock name is given.
pub const MOCK_SUFFIX: &str = "Mock";

/// Suffix of a standalone publisher's backing subject.
pub const SUBJECT_SUFFIX: &str = "Subject";

/// Stored property holding the instance call log.
pub const INVOKED_LIST: &str = "invokedList";

/// Stored property holding the call log of static members.
pub const STATIC_INVOKED_LIST: &str = "staticInvokedList";

/// Type alias every mock declares for its call-log type.
pub const MOCK_IDENTIFIER: &str = "MockIdentifier";

/// Bookkeeping variable the front end injects to mark an existing blank init.
pub const HAS_BLANK_INIT: &str = "_hasBlankInit";

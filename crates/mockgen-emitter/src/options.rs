/// Switches that change the shape of emitted members.
///
/// Every flag defaults to off, which yields self-contained mocks that do not
/// depend on a runtime support library beyond `MockAssertable` and
/// `MockEquatable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// Route method bodies through the runtime `mockFunc` helper.
    pub use_template_func: bool,
    /// Declare call counters as plain `var` instead of `private(set) var`.
    pub allow_set_call_count: bool,
    /// Record arguments of every method, not just the ones that ask for it.
    pub enable_func_args_history: bool,
    /// Leave wrapper-backed publisher storage without an initial value.
    pub disable_combine_default_values: bool,
}

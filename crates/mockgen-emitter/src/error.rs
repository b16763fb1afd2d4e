use std::fmt;

/// A member model that violates a rendering precondition.
///
/// These are programming-contract violations of the front end, not data
/// problems the renderer can recover from; the whole run stops on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Initializers are planned together with stored properties and cannot be
    /// rendered as standalone members.
    InitializerInMemberRenderer { name: String },
    MalformedMember { name: String, reason: &'static str },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::InitializerInMemberRenderer { name } => write!(
                f,
                "initializer '{name}' was passed to the member renderer; initializers are rendered by the initializer synthesizer"
            ),
            RenderError::MalformedMember { name, reason } => {
                write!(f, "malformed member '{name}': {reason}")
            }
        }
    }
}

impl std::error::Error for RenderError {}

// Error kinds surfaced at the command/handler boundary.
//
// Feature services keep their own error enums; everything that reaches a user
// gets folded into one of these so the Discord layer can pick the right notice.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The bot lacks the rights to act on the target.
    #[error("I don't have permission to do that")]
    PermissionDenied,

    /// The recipient has direct messages disabled.
    #[error("That user does not accept direct messages")]
    RecipientUnreachable,

    /// A referenced user, channel or entry could not be resolved.
    #[error("Could not find {0}")]
    NotFound(String),

    /// The AI backend or the chat platform failed unexpectedly.
    #[error("Remote service error: {0}")]
    RemoteService(String),

    /// Input was rejected before any remote call was attempted.
    #[error("Invalid input: {0}")]
    Validation(String),
}

impl CommandError {
    pub fn validation(msg: impl Into<String>) -> Self {
        CommandError::Validation(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        CommandError::NotFound(what.into())
    }
}

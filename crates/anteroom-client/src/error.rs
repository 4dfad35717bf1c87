//! Coordinator error types.

use anteroom_proto::ParticipantId;
use thiserror::Error;

use crate::GatewayError;

/// Errors from coordinator intents and lifecycle calls.
///
/// None of these leave the admission state inconsistent; at worst the view
/// stays stale until the next snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinatorError {
    /// The gateway failed to take the command.
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Intent dropped because the local participant does not moderate and
    /// the moderator gate is enforced.
    #[error("not a moderator: cannot act on {id}")]
    NotModerator {
        /// Target of the dropped intent.
        id: ParticipantId,
    },
}

impl CoordinatorError {
    /// Returns true if retrying the same call cannot succeed.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Gateway(e) => e.is_fatal(),
            Self::NotModerator { .. } => true,
        }
    }
}

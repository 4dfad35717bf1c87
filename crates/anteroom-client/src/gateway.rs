//! Session gateway seam.

use anteroom_proto::ParticipantId;
use thiserror::Error;

/// Commands the coordinator issues against the live session.
///
/// Every command is a request, not a confirmation. Success is observed only
/// through later roster and accepted-list snapshots.
pub trait SessionGateway {
    /// Ask the session to admit `id`.
    fn accept_user(&mut self, id: &ParticipantId) -> Result<(), GatewayError>;

    /// Ask the session to remove `id`. This is how a reject is realized.
    fn kick_user(&mut self, id: &ParticipantId) -> Result<(), GatewayError>;

    /// Join the session.
    fn connect(&mut self) -> Result<(), GatewayError>;

    /// Leave the session.
    fn disconnect(&mut self) -> Result<(), GatewayError>;

    /// Whether the session reports the local participant as joined.
    fn is_joined(&self) -> bool;
}

impl<G: SessionGateway + ?Sized> SessionGateway for &mut G {
    fn accept_user(&mut self, id: &ParticipantId) -> Result<(), GatewayError> {
        (**self).accept_user(id)
    }

    fn kick_user(&mut self, id: &ParticipantId) -> Result<(), GatewayError> {
        (**self).kick_user(id)
    }

    fn connect(&mut self) -> Result<(), GatewayError> {
        (**self).connect()
    }

    fn disconnect(&mut self) -> Result<(), GatewayError> {
        (**self).disconnect()
    }

    fn is_joined(&self) -> bool {
        (**self).is_joined()
    }
}

impl<G: SessionGateway + ?Sized> SessionGateway for Box<G> {
    fn accept_user(&mut self, id: &ParticipantId) -> Result<(), GatewayError> {
        (**self).accept_user(id)
    }

    fn kick_user(&mut self, id: &ParticipantId) -> Result<(), GatewayError> {
        (**self).kick_user(id)
    }

    fn connect(&mut self) -> Result<(), GatewayError> {
        (**self).connect()
    }

    fn disconnect(&mut self) -> Result<(), GatewayError> {
        (**self).disconnect()
    }

    fn is_joined(&self) -> bool {
        (**self).is_joined()
    }
}

/// Errors reported by a session gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The session does not know this participant.
    #[error("unknown participant: {id}")]
    UnknownParticipant {
        /// Id the command targeted.
        id: ParticipantId,
    },

    /// No session to send the command to.
    #[error("not connected")]
    NotConnected,

    /// The session refused the command (e.g. missing privileges).
    #[error("rejected by session: {reason}")]
    Rejected {
        /// Session-provided reason.
        reason: String,
    },

    /// The command could not be delivered.
    #[error("transport error: {reason}")]
    Transport {
        /// Description of the delivery failure.
        reason: String,
    },
}

impl GatewayError {
    /// Returns true if retrying the same command cannot succeed.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::UnknownParticipant { .. } | Self::Rejected { .. } => true,
            Self::NotConnected | Self::Transport { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_is_transient() {
        let err = GatewayError::Transport { reason: "socket closed".to_string() };
        assert!(!err.is_fatal());
    }

    #[test]
    fn unknown_participant_is_fatal() {
        let err = GatewayError::UnknownParticipant { id: "u9".into() };
        assert!(err.is_fatal());
    }

    #[test]
    fn error_display() {
        let err = GatewayError::Rejected { reason: "not a moderator".to_string() };
        assert_eq!(err.to_string(), "rejected by session: not a moderator");
    }
}

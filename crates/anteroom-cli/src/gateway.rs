//! Gateway that logs commands instead of reaching a live session.

use anteroom_client::{GatewayError, SessionGateway};
use anteroom_proto::ParticipantId;

/// Offline stand-in for a session.
///
/// Tracks whether `connect` was issued and refuses moderator commands
/// until it was, the way a live session does before it is joined.
#[derive(Debug, Default)]
pub struct TracingGateway {
    joined: bool,
    commands: usize,
}

impl TracingGateway {
    /// Gateway that has not joined yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway that starts out joined, for traces without a `start` record.
    pub fn joined() -> Self {
        Self { joined: true, commands: 0 }
    }

    /// Commands accepted so far.
    pub fn commands(&self) -> usize {
        self.commands
    }

    fn require_joined(&self) -> Result<(), GatewayError> {
        if self.joined { Ok(()) } else { Err(GatewayError::NotConnected) }
    }
}

impl SessionGateway for TracingGateway {
    fn accept_user(&mut self, id: &ParticipantId) -> Result<(), GatewayError> {
        self.require_joined()?;
        self.commands += 1;
        tracing::info!(participant = %id, "gateway: accept user");
        Ok(())
    }

    fn kick_user(&mut self, id: &ParticipantId) -> Result<(), GatewayError> {
        self.require_joined()?;
        self.commands += 1;
        tracing::info!(participant = %id, "gateway: kick user");
        Ok(())
    }

    fn connect(&mut self) -> Result<(), GatewayError> {
        self.joined = true;
        self.commands += 1;
        tracing::info!("gateway: connect");
        Ok(())
    }

    fn disconnect(&mut self) -> Result<(), GatewayError> {
        self.require_joined()?;
        self.joined = false;
        self.commands += 1;
        tracing::info!("gateway: disconnect");
        Ok(())
    }

    fn is_joined(&self) -> bool {
        self.joined
    }
}

//! Session gateway that records commands instead of executing them.

use std::collections::VecDeque;

use anteroom_client::{GatewayError, SessionGateway};
use anteroom_proto::ParticipantId;

/// One command observed by [`RecordingGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    /// `accept_user`
    AcceptUser(ParticipantId),
    /// `kick_user`
    KickUser(ParticipantId),
    /// `connect`
    Connect,
    /// `disconnect`
    Disconnect,
}

/// In-memory gateway for tests.
///
/// Records every command in order. Failures can be queued with
/// [`fail_next`](Self::fail_next); each queued error is returned by exactly
/// one subsequent command.
#[derive(Debug, Default)]
pub struct RecordingGateway {
    calls: Vec<GatewayCall>,
    failures: VecDeque<GatewayError>,
    joined: bool,
}

impl RecordingGateway {
    /// Empty gateway, not joined.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands received so far, oldest first.
    pub fn calls(&self) -> &[GatewayCall] {
        &self.calls
    }

    /// Make the next command fail with `error`.
    pub fn fail_next(&mut self, error: GatewayError) {
        self.failures.push_back(error);
    }

    fn record(&mut self, call: GatewayCall) -> Result<(), GatewayError> {
        self.calls.push(call);
        self.failures.pop_front().map_or(Ok(()), Err)
    }
}

impl SessionGateway for RecordingGateway {
    fn accept_user(&mut self, id: &ParticipantId) -> Result<(), GatewayError> {
        self.record(GatewayCall::AcceptUser(id.clone()))
    }

    fn kick_user(&mut self, id: &ParticipantId) -> Result<(), GatewayError> {
        self.record(GatewayCall::KickUser(id.clone()))
    }

    fn connect(&mut self) -> Result<(), GatewayError> {
        self.record(GatewayCall::Connect)?;
        self.joined = true;
        Ok(())
    }

    fn disconnect(&mut self) -> Result<(), GatewayError> {
        self.record(GatewayCall::Disconnect)?;
        self.joined = false;
        Ok(())
    }

    fn is_joined(&self) -> bool {
        self.joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queued_failure_hits_one_call() {
        let mut gateway = RecordingGateway::new();
        gateway.fail_next(GatewayError::NotConnected);

        assert_eq!(gateway.connect(), Err(GatewayError::NotConnected));
        assert!(!gateway.is_joined());
        assert_eq!(gateway.connect(), Ok(()));
        assert!(gateway.is_joined());
        assert_eq!(gateway.calls(), &[GatewayCall::Connect, GatewayCall::Connect]);
    }
}

//! Admission coordinator.
//!
//! The `Coordinator` owns one session's [`AdmissionState`] and the injected
//! [`SessionGateway`]. Every public call is atomic: the state machine runs to
//! completion and its actions are executed before the call returns.

use anteroom_core::{
    AdmissionAction, AdmissionConfig, AdmissionEvent, AdmissionState, DerivedView, LogLevel,
};
use anteroom_proto::{AcceptedSet, ParticipantId, Roster};

use crate::{CoordinatorError, SessionGateway};

/// Admission coordinator for one session.
///
/// # Type Parameters
///
/// - `G`: Session gateway that executes accept/kick/connect commands
pub struct Coordinator<G: SessionGateway> {
    /// Admission state machine.
    state: AdmissionState,

    /// Session command sink.
    gateway: G,

    /// `connect` has been issued and not yet torn down.
    started: bool,

    /// Arrival signals not yet collected by the presentation layer.
    arrivals: Vec<ParticipantId>,
}

impl<G: SessionGateway> Coordinator<G> {
    /// Create a coordinator with a fresh admission state.
    pub fn new(gateway: G, config: AdmissionConfig) -> Self {
        Self { state: AdmissionState::new(config), gateway, started: false, arrivals: Vec::new() }
    }

    /// Read-only view of the admission state.
    pub fn state(&self) -> &AdmissionState {
        &self.state
    }

    /// Borrow the gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Mutably borrow the gateway.
    pub fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }

    /// Consume the coordinator, returning its gateway.
    pub fn into_gateway(self) -> G {
        self.gateway
    }

    /// Whether `start` has been issued since the last teardown.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Project the state for rendering.
    pub fn derived_view(&self) -> DerivedView {
        self.state.derived_view()
    }

    /// Roster provider published `next`; `previous` is the snapshot the
    /// presentation layer held before it.
    pub fn on_roster_changed(&mut self, previous: Roster, next: Roster) {
        tracing::debug!(previous = previous.len(), next = next.len(), "roster changed");
        self.dispatch_snapshot(AdmissionEvent::RosterChanged { previous, next });
    }

    /// Roster provider published `next`; diff against the last roster seen.
    pub fn on_roster_snapshot(&mut self, next: Roster) {
        let previous = self.state.roster().clone();
        self.on_roster_changed(previous, next);
    }

    /// Accepted-list source published `accepted`.
    pub fn on_accepted_changed(&mut self, accepted: AcceptedSet) {
        tracing::debug!(accepted = accepted.len(), "accepted list changed");
        self.dispatch_snapshot(AdmissionEvent::AcceptedChanged { accepted });
    }

    /// Admit a waiting participant.
    ///
    /// Does not touch the accepted set; the authoritative change arrives with
    /// the next accepted-list snapshot.
    pub fn accept(&mut self, id: ParticipantId) -> Result<(), CoordinatorError> {
        let actions = self.state.handle(AdmissionEvent::AcceptRequested { id });
        self.execute(actions)
    }

    /// Turn a waiting participant away by kicking them from the session.
    pub fn reject(&mut self, id: ParticipantId) -> Result<(), CoordinatorError> {
        let actions = self.state.handle(AdmissionEvent::RejectRequested { id });
        self.execute(actions)
    }

    /// Connect to the session. No-op while already started.
    pub fn start(&mut self) -> Result<(), CoordinatorError> {
        if self.started {
            return Ok(());
        }

        self.gateway.connect()?;
        self.started = true;
        tracing::info!("session started");
        Ok(())
    }

    /// Leave the session if joined and discard all admission state.
    ///
    /// The state is reset even when the disconnect fails.
    pub fn teardown(&mut self) -> Result<(), CoordinatorError> {
        let result = if self.gateway.is_joined() { self.gateway.disconnect() } else { Ok(()) };

        self.started = false;
        self.arrivals.clear();
        let actions = self.state.handle(AdmissionEvent::Reset);
        self.execute(actions)?;

        if let Err(e) = &result {
            tracing::warn!("disconnect failed during teardown: {}", e);
        }
        result.map_err(CoordinatorError::from)
    }

    /// Take arrival signals collected since the last call.
    pub fn take_arrivals(&mut self) -> Vec<ParticipantId> {
        std::mem::take(&mut self.arrivals)
    }

    /// Snapshots have no failure path; anything the executor reports is
    /// logged and the view stays on the last good state.
    fn dispatch_snapshot(&mut self, event: AdmissionEvent) {
        let actions = self.state.handle(event);
        if let Err(e) = self.execute(actions) {
            tracing::warn!("snapshot side effect failed: {}", e);
        }
    }

    /// Execute state machine actions.
    fn execute(&mut self, actions: Vec<AdmissionAction>) -> Result<(), CoordinatorError> {
        for action in actions {
            match action {
                AdmissionAction::AcceptUser { id } => {
                    if let Err(e) = self.gateway.accept_user(&id) {
                        tracing::warn!("accept {} failed: {}", id, e);
                        return Err(e.into());
                    }
                },

                AdmissionAction::KickUser { id } => {
                    if let Err(e) = self.gateway.kick_user(&id) {
                        tracing::warn!("kick {} failed: {}", id, e);
                        return Err(e.into());
                    }
                },

                AdmissionAction::IntentRefused { id } => {
                    return Err(CoordinatorError::NotModerator { id });
                },

                AdmissionAction::LocalAdmitted { id } => {
                    tracing::info!(participant = %id, "local participant admitted");
                },

                AdmissionAction::ParticipantsArrived { ids } => {
                    tracing::info!(count = ids.len(), "participants arrived");
                    self.arrivals.extend(ids);
                },

                AdmissionAction::Log { level, message } => match level {
                    LogLevel::Debug => tracing::debug!("{}", message),
                    LogLevel::Info => tracing::info!("{}", message),
                    LogLevel::Warn => tracing::warn!("{}", message),
                },
            }
        }

        Ok(())
    }
}

impl<G: SessionGateway + std::fmt::Debug> std::fmt::Debug for Coordinator<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("state", &self.state)
            .field("gateway", &self.gateway)
            .field("started", &self.started)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{GatewayError, Participant, Role};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Accept(ParticipantId),
        Kick(ParticipantId),
        Connect,
        Disconnect,
    }

    #[derive(Debug, Default)]
    struct TestGateway {
        calls: Vec<Call>,
        joined: bool,
        fail_with: Option<GatewayError>,
    }

    impl TestGateway {
        fn outcome(&self) -> Result<(), GatewayError> {
            self.fail_with.clone().map_or(Ok(()), Err)
        }
    }

    impl SessionGateway for TestGateway {
        fn accept_user(&mut self, id: &ParticipantId) -> Result<(), GatewayError> {
            self.calls.push(Call::Accept(id.clone()));
            self.outcome()
        }

        fn kick_user(&mut self, id: &ParticipantId) -> Result<(), GatewayError> {
            self.calls.push(Call::Kick(id.clone()));
            self.outcome()
        }

        fn connect(&mut self) -> Result<(), GatewayError> {
            self.calls.push(Call::Connect);
            self.outcome()?;
            self.joined = true;
            Ok(())
        }

        fn disconnect(&mut self) -> Result<(), GatewayError> {
            self.calls.push(Call::Disconnect);
            self.outcome()?;
            self.joined = false;
            Ok(())
        }

        fn is_joined(&self) -> bool {
            self.joined
        }
    }

    fn moderator_roster() -> Roster {
        Roster::from(vec![
            Participant::local("local1", "Ana", Role::Moderator),
            Participant::remote("u2", "Bo", Role::Participant),
        ])
    }

    #[test]
    fn accept_reaches_gateway() {
        let mut coordinator = Coordinator::new(TestGateway::default(), AdmissionConfig::default());
        coordinator.on_roster_snapshot(moderator_roster());

        coordinator.accept("u2".into()).unwrap();

        assert_eq!(coordinator.gateway().calls, vec![Call::Accept("u2".into())]);
        assert!(coordinator.derived_view().show_new_user_overlay, "waits for accepted snapshot");
    }

    #[test]
    fn reject_kicks() {
        let mut coordinator = Coordinator::new(TestGateway::default(), AdmissionConfig::default());
        coordinator.on_roster_snapshot(moderator_roster());

        coordinator.reject("u2".into()).unwrap();

        assert_eq!(coordinator.gateway().calls, vec![Call::Kick("u2".into())]);
    }

    #[test]
    fn gateway_failure_is_reported_and_state_untouched() {
        let gateway = TestGateway {
            fail_with: Some(GatewayError::UnknownParticipant { id: "u2".into() }),
            ..TestGateway::default()
        };
        let mut coordinator = Coordinator::new(gateway, AdmissionConfig::default());
        coordinator.on_roster_snapshot(moderator_roster());
        let before = coordinator.derived_view();

        let result = coordinator.accept("u2".into());

        assert!(matches!(
            result,
            Err(CoordinatorError::Gateway(GatewayError::UnknownParticipant { .. }))
        ));
        assert_eq!(coordinator.derived_view(), before);
    }

    #[test]
    fn enforced_gate_skips_gateway() {
        let config = AdmissionConfig { enforce_moderator_gate: true, ..AdmissionConfig::default() };
        let mut coordinator = Coordinator::new(TestGateway::default(), config);
        coordinator.on_roster_snapshot(Roster::from(vec![Participant::local(
            "local1",
            "Ana",
            Role::Participant,
        )]));

        let result = coordinator.accept("u2".into());

        assert!(matches!(result, Err(CoordinatorError::NotModerator { .. })));
        assert!(coordinator.gateway().calls.is_empty());
    }

    #[test]
    fn start_connects_once() {
        let mut coordinator = Coordinator::new(TestGateway::default(), AdmissionConfig::default());

        coordinator.start().unwrap();
        coordinator.start().unwrap();

        assert!(coordinator.is_started());
        assert_eq!(coordinator.gateway().calls, vec![Call::Connect]);
    }

    #[test]
    fn failed_start_can_be_retried() {
        let gateway =
            TestGateway { fail_with: Some(GatewayError::NotConnected), ..TestGateway::default() };
        let mut coordinator = Coordinator::new(gateway, AdmissionConfig::default());

        assert!(coordinator.start().is_err());
        assert!(!coordinator.is_started());
    }

    #[test]
    fn teardown_disconnects_and_resets() {
        let mut coordinator = Coordinator::new(TestGateway::default(), AdmissionConfig::default());
        coordinator.start().unwrap();
        coordinator.on_roster_snapshot(moderator_roster());
        assert!(coordinator.state().is_local_admitted());

        coordinator.teardown().unwrap();

        assert_eq!(coordinator.gateway().calls, vec![Call::Connect, Call::Disconnect]);
        assert!(!coordinator.state().is_local_admitted());
        assert!(coordinator.derived_view().show_waiting_overlay);
    }

    #[test]
    fn teardown_without_join_skips_disconnect() {
        let mut coordinator = Coordinator::new(TestGateway::default(), AdmissionConfig::default());

        coordinator.teardown().unwrap();

        assert!(coordinator.gateway().calls.is_empty());
    }

    #[test]
    fn arrivals_are_collected_for_moderator() {
        let mut coordinator = Coordinator::new(TestGateway::default(), AdmissionConfig::default());
        coordinator.on_roster_snapshot(Roster::from(vec![Participant::local(
            "local1",
            "Ana",
            Role::Moderator,
        )]));
        let _ = coordinator.take_arrivals();

        coordinator.on_roster_snapshot(moderator_roster());

        assert_eq!(coordinator.take_arrivals(), vec![ParticipantId::from("u2")]);
        assert!(coordinator.take_arrivals().is_empty());
    }

    #[test]
    fn borrowed_gateway_works() {
        let mut gateway = TestGateway::default();
        {
            let mut coordinator = Coordinator::new(&mut gateway, AdmissionConfig::default());
            coordinator.on_roster_snapshot(moderator_roster());
            coordinator.reject("u2".into()).unwrap();
        }

        assert_eq!(gateway.calls, vec![Call::Kick("u2".into())]);
    }
}

//! End-to-end admission scenarios through the coordinator.

use anteroom_client::{
    AcceptedSet, AdmissionConfig, ArrivalDetection, Coordinator, CoordinatorError, GatewayError,
    Participant, ParticipantId, Role, Roster,
};
use anteroom_harness::{GatewayCall, RecordingGateway};

fn coordinator() -> Coordinator<RecordingGateway> {
    Coordinator::new(RecordingGateway::new(), AdmissionConfig::default())
}

fn roster(entries: &[(&str, bool, Role)]) -> Roster {
    entries
        .iter()
        .map(|&(id, is_local, role)| {
            if is_local {
                Participant::local(id, id, role)
            } else {
                Participant::remote(id, id, role)
            }
        })
        .collect()
}

fn accepted(ids: &[&str]) -> AcceptedSet {
    ids.iter().copied().collect()
}

fn pending_ids(coordinator: &Coordinator<RecordingGateway>) -> Vec<String> {
    coordinator
        .derived_view()
        .pending_participants
        .into_iter()
        .map(|p| p.id.as_str().to_string())
        .collect()
}

#[test]
fn lone_participant_sees_loading() {
    let mut c = coordinator();

    c.on_roster_snapshot(roster(&[("local1", true, Role::Participant)]));
    c.on_accepted_changed(accepted(&[]));

    let view = c.derived_view();
    assert!(view.show_waiting_overlay);
    assert_eq!(view.waiting_message, "Loading...");
    assert!(!c.state().roles_resolved());
}

#[test]
fn moderator_presence_switches_to_waiting() {
    let mut c = coordinator();

    c.on_roster_snapshot(roster(&[
        ("local1", true, Role::Participant),
        ("mod1", false, Role::Moderator),
    ]));
    c.on_accepted_changed(accepted(&[]));

    let view = c.derived_view();
    assert!(c.state().roles_resolved());
    assert!(view.show_waiting_overlay);
    assert_eq!(view.waiting_message, "Waiting for moderator to accept...");
}

#[test]
fn accepted_list_admits_local() {
    let mut c = coordinator();
    c.on_roster_snapshot(roster(&[
        ("local1", true, Role::Participant),
        ("mod1", false, Role::Moderator),
    ]));
    c.on_accepted_changed(accepted(&[]));

    c.on_accepted_changed(accepted(&["local1"]));

    assert!(c.state().is_local_admitted());
    assert!(!c.derived_view().show_waiting_overlay);
}

#[test]
fn moderator_sees_waiting_participant() {
    let mut c = coordinator();

    c.on_roster_snapshot(roster(&[
        ("local1", true, Role::Moderator),
        ("u2", false, Role::Participant),
    ]));
    c.on_accepted_changed(accepted(&[]));

    let view = c.derived_view();
    assert!(c.state().is_local_moderator());
    assert!(!view.show_waiting_overlay);
    assert!(view.show_new_user_overlay);
    assert_eq!(pending_ids(&c), ["u2"]);
}

#[test]
fn accept_clears_pending_after_snapshot() {
    let mut c = coordinator();
    c.on_roster_snapshot(roster(&[
        ("local1", true, Role::Moderator),
        ("u2", false, Role::Participant),
    ]));
    c.on_accepted_changed(accepted(&[]));

    c.accept(ParticipantId::from("u2")).unwrap();

    // Requests are not confirmations.
    assert_eq!(pending_ids(&c), ["u2"]);
    assert_eq!(c.gateway().calls(), [GatewayCall::AcceptUser(ParticipantId::from("u2"))]);

    c.on_accepted_changed(accepted(&["u2"]));

    let view = c.derived_view();
    assert!(view.pending_participants.is_empty());
    assert!(!view.show_new_user_overlay);
}

#[test]
fn reject_kicks_and_roster_drops_pending() {
    let mut c = coordinator();
    c.on_roster_snapshot(roster(&[
        ("local1", true, Role::Moderator),
        ("u2", false, Role::Participant),
    ]));
    c.on_accepted_changed(accepted(&[]));

    c.reject(ParticipantId::from("u2")).unwrap();
    assert_eq!(c.gateway().calls(), [GatewayCall::KickUser(ParticipantId::from("u2"))]);
    assert_eq!(pending_ids(&c), ["u2"]);

    c.on_roster_snapshot(roster(&[("local1", true, Role::Moderator)]));

    assert!(pending_ids(&c).is_empty());
    assert!(!c.derived_view().show_new_user_overlay);
}

#[test]
fn accepted_before_roster_admits() {
    let mut c = coordinator();

    c.on_accepted_changed(accepted(&["local1"]));
    assert!(c.derived_view().show_waiting_overlay);

    c.on_roster_snapshot(roster(&[
        ("local1", true, Role::Participant),
        ("mod1", false, Role::Moderator),
    ]));

    assert!(c.state().is_local_admitted());
    assert!(!c.derived_view().show_waiting_overlay);
}

#[test]
fn admission_survives_removal_from_accepted() {
    let mut c = coordinator();
    c.on_roster_snapshot(roster(&[("local1", true, Role::Participant)]));
    c.on_accepted_changed(accepted(&["local1"]));

    c.on_accepted_changed(accepted(&[]));

    assert!(c.state().is_local_admitted());
    assert!(!c.derived_view().show_waiting_overlay);
}

#[test]
fn arrivals_reported_to_moderator() {
    let config = AdmissionConfig {
        arrival_detection: ArrivalDetection::SetDifference,
        ..AdmissionConfig::default()
    };
    let mut c = Coordinator::new(RecordingGateway::new(), config);

    c.on_roster_snapshot(roster(&[
        ("local1", true, Role::Moderator),
        ("u2", false, Role::Participant),
    ]));
    let _ = c.take_arrivals();

    // One left, one joined: no growth, but a new id.
    c.on_roster_snapshot(roster(&[
        ("local1", true, Role::Moderator),
        ("u3", false, Role::Participant),
    ]));

    assert_eq!(c.take_arrivals(), [ParticipantId::from("u3")]);
    assert!(c.take_arrivals().is_empty());
}

#[test]
fn failed_accept_is_reported() {
    let mut c = coordinator();
    c.on_roster_snapshot(roster(&[
        ("local1", true, Role::Moderator),
        ("u2", false, Role::Participant),
    ]));
    c.gateway_mut().fail_next(GatewayError::Transport { reason: "offline".to_string() });

    let err = c.accept(ParticipantId::from("u2")).unwrap_err();

    assert!(matches!(err, CoordinatorError::Gateway(GatewayError::Transport { .. })));
    assert!(!err.is_fatal());
    assert_eq!(pending_ids(&c), ["u2"]);
}

#[test]
fn enforced_gate_refuses_non_moderator() {
    let config = AdmissionConfig { enforce_moderator_gate: true, ..AdmissionConfig::default() };
    let mut c = Coordinator::new(RecordingGateway::new(), config);
    c.on_roster_snapshot(roster(&[
        ("local1", true, Role::Participant),
        ("u2", false, Role::Participant),
    ]));

    let err = c.reject(ParticipantId::from("u2")).unwrap_err();

    assert!(matches!(err, CoordinatorError::NotModerator { .. }));
    assert!(c.gateway().calls().is_empty());
}

#[test]
fn start_and_teardown_round_trip() {
    let mut c = coordinator();

    c.start().unwrap();
    c.start().unwrap();
    assert!(c.is_started());

    c.on_roster_snapshot(roster(&[("local1", true, Role::Moderator)]));
    assert!(c.state().is_local_admitted());

    c.teardown().unwrap();

    assert!(!c.is_started());
    assert!(!c.state().is_local_admitted());
    assert!(c.derived_view().show_waiting_overlay);
    assert_eq!(c.gateway().calls(), [GatewayCall::Connect, GatewayCall::Disconnect]);
}

#[test]
fn teardown_resets_even_when_disconnect_fails() {
    let mut c = coordinator();
    c.start().unwrap();
    c.on_roster_snapshot(roster(&[("local1", true, Role::Moderator)]));
    c.gateway_mut().fail_next(GatewayError::NotConnected);

    let err = c.teardown().unwrap_err();

    assert_eq!(err, CoordinatorError::Gateway(GatewayError::NotConnected));
    assert!(!c.state().is_local_admitted());
    assert!(!c.state().roles_resolved());
}

#[test]
fn teardown_without_join_skips_disconnect() {
    let mut c = coordinator();

    c.teardown().unwrap();

    assert!(c.gateway().calls().is_empty());
}

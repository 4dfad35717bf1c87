//! Fuzz target for the [`AdmissionState`] reducer
//!
//! Keep admission decisions consistent under arbitrary snapshot churn
//!
//! # Strategy
//!
//! - Roster snapshots: arbitrary membership, roles and local flags drawn from
//!   a small id pool so entries collide with accepted ids
//! - Accepted snapshots: arbitrary, including shrinking lists
//! - Intents: accept/reject for any id, with and without the moderator gate
//! - Raw records: CBOR bytes decoded as `SessionRecord` and applied if valid
//! - Reset: mid-session teardown
//!
//! # Invariants
//!
//! - Admission is monotonic until reset
//! - Moderator role in a delivered roster admits the local participant
//! - The placeholder local id is never admitted through the accepted list
//! - Pending list and new-user overlay only show for a moderator
//! - Pending never contains a moderator or an accepted id
//! - Gated intents from a non-moderator never produce gateway commands
//! - NEVER panic on any input

#![no_main]

use anteroom_core::{
    AcceptedSet, AdmissionAction, AdmissionConfig, AdmissionEvent, AdmissionState,
    ArrivalDetection, Participant, ParticipantId, Role, Roster,
};
use anteroom_proto::{codec, SessionRecord};
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

const IDS: [&str; 6] = ["local", "p1", "p2", "p3", "p4", "p5"];

#[derive(Debug, Clone, Arbitrary)]
struct FuzzedParticipant {
    id: u8,
    moderator: bool,
    local: bool,
}

#[derive(Debug, Clone, Arbitrary)]
enum FuzzEvent {
    Roster(Vec<FuzzedParticipant>),
    Accepted(Vec<u8>),
    Accept(u8),
    Reject(u8),
    Record(Vec<u8>),
    Reset,
}

#[derive(Debug, Clone, Arbitrary)]
struct FuzzInput {
    set_difference: bool,
    enforce_moderator_gate: bool,
    events: Vec<FuzzEvent>,
}

fuzz_target!(|input: FuzzInput| {
    let config = AdmissionConfig {
        arrival_detection: if input.set_difference {
            ArrivalDetection::SetDifference
        } else {
            ArrivalDetection::RosterGrowth
        },
        enforce_moderator_gate: input.enforce_moderator_gate,
        ..AdmissionConfig::default()
    };
    let placeholder = config.placeholder_local_id.clone();
    let mut state = AdmissionState::new(config);

    for event in input.events {
        let was_admitted = state.is_local_admitted();
        let was_moderator = state.is_local_moderator();

        let Some(event) = to_event(&state, event) else {
            continue;
        };
        let is_reset = matches!(event, AdmissionEvent::Reset);
        let is_intent = matches!(
            event,
            AdmissionEvent::AcceptRequested { .. } | AdmissionEvent::RejectRequested { .. }
        );
        let local_moderator_in_roster = match &event {
            AdmissionEvent::RosterChanged { next, .. } => {
                next.local_participant().is_some_and(Participant::is_moderator)
            },
            _ => false,
        };

        let actions = state.handle(event);

        if is_reset {
            assert!(!state.is_local_admitted());
            continue;
        }

        assert!(!was_admitted || state.is_local_admitted(), "admission revoked");
        assert!(!was_moderator || state.is_local_moderator(), "moderator flag cleared");

        if local_moderator_in_roster {
            assert!(state.is_local_admitted());
        }

        if is_intent && input.enforce_moderator_gate && !was_moderator {
            assert!(actions.iter().all(|a| !matches!(
                a,
                AdmissionAction::AcceptUser { .. } | AdmissionAction::KickUser { .. }
            )));
        }

        let admissions =
            actions.iter().filter(|a| matches!(a, AdmissionAction::LocalAdmitted { .. })).count();
        assert!(admissions <= 1);
        assert!(admissions == 0 || !was_admitted, "admitted twice");

        if state.is_local_admitted() && !state.is_local_moderator() {
            assert_ne!(state.local_participant_id(), placeholder.as_ref());
            assert!(state.local_participant_id().is_some());
        }

        for p in state.pending_participants() {
            assert!(!p.is_moderator());
            assert!(!state.accepted().contains(&p.id));
        }

        let view = state.derived_view();
        assert_eq!(view.show_waiting_overlay, !state.is_local_admitted());
        if !state.is_local_moderator() {
            assert!(!view.show_new_user_overlay);
            assert!(view.pending_participants.is_empty());
        }
    }
});

fn id(index: u8) -> ParticipantId {
    ParticipantId::from(IDS[usize::from(index) % IDS.len()])
}

fn to_event(state: &AdmissionState, event: FuzzEvent) -> Option<AdmissionEvent> {
    let previous = state.roster().clone();

    Some(match event {
        FuzzEvent::Roster(entries) => {
            let next: Roster = entries
                .into_iter()
                .take(16)
                .map(|p| {
                    let role = if p.moderator { Role::Moderator } else { Role::Participant };
                    if p.local {
                        Participant::local(id(p.id), "local", role)
                    } else {
                        Participant::remote(id(p.id), "remote", role)
                    }
                })
                .collect();
            AdmissionEvent::RosterChanged { previous, next }
        },
        FuzzEvent::Accepted(ids) => {
            let accepted: AcceptedSet = ids.into_iter().map(id).collect();
            AdmissionEvent::AcceptedChanged { accepted }
        },
        FuzzEvent::Accept(index) => AdmissionEvent::AcceptRequested { id: id(index) },
        FuzzEvent::Reject(index) => AdmissionEvent::RejectRequested { id: id(index) },
        FuzzEvent::Record(bytes) => match codec::from_cbor::<SessionRecord>(&bytes).ok()? {
            SessionRecord::Roster { participants } => {
                AdmissionEvent::RosterChanged { previous, next: participants }
            },
            SessionRecord::Accepted { accepted } => AdmissionEvent::AcceptedChanged { accepted },
            SessionRecord::Accept { id } => AdmissionEvent::AcceptRequested { id },
            SessionRecord::Reject { id } => AdmissionEvent::RejectRequested { id },
            SessionRecord::Start => return None,
            SessionRecord::Teardown => AdmissionEvent::Reset,
        },
        FuzzEvent::Reset => AdmissionEvent::Reset,
    })
}

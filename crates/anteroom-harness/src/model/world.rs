//! Model world - session truth plus the expected coordinator view.
//!
//! The world keeps two layers:
//! - Truth: who is really in the session and who has really been accepted
//! - Delivered: the last snapshots pushed to the coordinator
//!
//! Expected observables are derived from the delivered layer only.

use std::collections::BTreeSet;

use anteroom_core::{AdmissionConfig, DerivedView};
use anteroom_proto::{AcceptedSet, Participant, ParticipantId, Role, Roster};

use super::operation::{LOCAL_SLOT, Operation, Slot, participant_id};
use crate::recording_gateway::GatewayCall;

/// What the real coordinator must be fed for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Deliver a roster snapshot.
    Roster {
        /// Snapshot delivered before this one.
        previous: Roster,
        /// Snapshot delivered now.
        next: Roster,
    },
    /// Deliver an accepted-list snapshot.
    Accepted(AcceptedSet),
    /// Issue an accept intent.
    Accept(ParticipantId),
    /// Issue a reject intent.
    Reject(ParticipantId),
    /// Truth changed; the coordinator sees nothing yet.
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Member {
    slot: Slot,
    moderator: bool,
}

/// Reference implementation of a moderated session as seen by one client.
#[derive(Debug, Clone)]
pub struct ModelWorld {
    num_slots: u8,
    config: AdmissionConfig,

    /// Remote members in join order.
    members: Vec<Member>,
    local_moderator: bool,
    local_assigned: bool,
    granted: BTreeSet<ParticipantId>,

    delivered_roster: Roster,
    delivered_accepted: AcceptedSet,

    /// Some delivered roster carried a moderator.
    moderator_seen: bool,
    /// Some delivered roster showed the local participant as moderator.
    local_moderator_seen: bool,
    /// First non-placeholder local id delivered.
    local_id_seen: Option<ParticipantId>,
    /// Admission, ever.
    admitted: bool,

    expected_calls: Vec<GatewayCall>,
}

impl ModelWorld {
    /// Create a world with `num_slots` participant slots (at least two).
    pub fn new(num_slots: u8) -> Self {
        Self::with_config(num_slots, AdmissionConfig::default())
    }

    /// Create a world whose expected view uses `config`'s messages.
    pub fn with_config(num_slots: u8, config: AdmissionConfig) -> Self {
        Self {
            num_slots: num_slots.max(2),
            config,
            members: Vec::new(),
            local_moderator: false,
            local_assigned: false,
            granted: BTreeSet::new(),
            delivered_roster: Roster::new(),
            delivered_accepted: AcceptedSet::new(),
            moderator_seen: false,
            local_moderator_seen: false,
            local_id_seen: None,
            admitted: false,
            expected_calls: Vec::new(),
        }
    }

    /// Number of participant slots, local included.
    pub fn num_slots(&self) -> u8 {
        self.num_slots
    }

    /// Gateway calls the coordinator must have issued so far.
    pub fn expected_calls(&self) -> &[GatewayCall] {
        &self.expected_calls
    }

    /// Whether the local participant must be admitted by now.
    pub fn is_admitted(&self) -> bool {
        self.admitted
    }

    /// Apply an operation and return what the coordinator must be fed.
    pub fn apply(&mut self, op: &Operation) -> Step {
        match *op {
            Operation::Join { slot, moderator } => {
                let slot = self.remote_slot(slot);
                if !self.members.iter().any(|m| m.slot == slot) {
                    self.members.push(Member { slot, moderator });
                }
                Step::Nothing
            },
            Operation::Leave { slot } => {
                let slot = self.remote_slot(slot);
                self.members.retain(|m| m.slot != slot);
                Step::Nothing
            },
            Operation::SetLocalRole { moderator } => {
                self.local_moderator = moderator;
                Step::Nothing
            },
            Operation::AssignLocalId => {
                self.local_assigned = true;
                Step::Nothing
            },
            Operation::Grant { slot } => {
                let id = self.id_of(self.any_slot(slot));
                self.granted.insert(id);
                Step::Nothing
            },
            Operation::DeliverRoster => self.deliver_roster(),
            Operation::DeliverAccepted => self.deliver_accepted(),
            Operation::Accept { slot } => {
                let id = self.id_of(self.any_slot(slot));
                self.expected_calls.push(GatewayCall::AcceptUser(id.clone()));
                if self.local_moderator {
                    self.granted.insert(id.clone());
                }
                Step::Accept(id)
            },
            Operation::Reject { slot } => {
                let slot = self.any_slot(slot);
                let id = self.id_of(slot);
                self.expected_calls.push(GatewayCall::KickUser(id.clone()));
                if self.local_moderator && slot != LOCAL_SLOT {
                    self.members.retain(|m| m.slot != slot);
                }
                Step::Reject(id)
            },
        }
    }

    /// Current session truth as a roster snapshot.
    pub fn truth_roster(&self) -> Roster {
        let local_role = if self.local_moderator { Role::Moderator } else { Role::Participant };
        let local = Participant::local(self.id_of(LOCAL_SLOT), name_of(LOCAL_SLOT), local_role);

        std::iter::once(local)
            .chain(self.members.iter().map(|m| {
                let role = if m.moderator { Role::Moderator } else { Role::Participant };
                Participant::remote(participant_id(m.slot), name_of(m.slot), role)
            }))
            .collect()
    }

    /// The view a correct coordinator shows after the deliveries so far.
    pub fn expected_view(&self) -> DerivedView {
        let pending: Vec<Participant> = self
            .delivered_roster
            .iter()
            .filter(|p| p.role != Role::Moderator)
            .filter(|p| !self.delivered_accepted.contains(&p.id))
            .cloned()
            .collect();

        let show_new_user_overlay = self.local_moderator_seen && !pending.is_empty();

        DerivedView {
            show_waiting_overlay: !self.admitted,
            waiting_message: if self.moderator_seen {
                self.config.waiting_message.clone()
            } else {
                self.config.loading_message.clone()
            },
            show_new_user_overlay,
            pending_participants: if show_new_user_overlay { pending } else { Vec::new() },
        }
    }

    fn deliver_roster(&mut self) -> Step {
        let next = self.truth_roster();
        let previous = std::mem::replace(&mut self.delivered_roster, next.clone());

        self.moderator_seen |= next.iter().any(|p| p.role == Role::Moderator);
        if let Some(local) = next.iter().find(|p| p.is_local) {
            self.local_moderator_seen |= local.role == Role::Moderator;
            if self.local_id_seen.is_none() && !self.is_placeholder(&local.id) {
                self.local_id_seen = Some(local.id.clone());
            }
        }
        self.update_admission();

        Step::Roster { previous, next }
    }

    fn deliver_accepted(&mut self) -> Step {
        self.delivered_accepted = self.granted.iter().cloned().collect();
        self.update_admission();
        Step::Accepted(self.delivered_accepted.clone())
    }

    fn update_admission(&mut self) {
        let accepted_self =
            self.local_id_seen.as_ref().is_some_and(|id| self.delivered_accepted.contains(id));
        self.admitted |= self.local_moderator_seen || accepted_self;
    }

    fn id_of(&self, slot: Slot) -> ParticipantId {
        if slot == LOCAL_SLOT && !self.local_assigned {
            self.config
                .placeholder_local_id
                .clone()
                .unwrap_or_else(|| participant_id(LOCAL_SLOT))
        } else {
            participant_id(slot)
        }
    }

    fn is_placeholder(&self, id: &ParticipantId) -> bool {
        self.config.placeholder_local_id.as_ref() == Some(id)
    }

    fn remote_slot(&self, slot: Slot) -> Slot {
        1 + slot % (self.num_slots - 1)
    }

    fn any_slot(&self, slot: Slot) -> Slot {
        slot % self.num_slots
    }
}

fn name_of(slot: Slot) -> String {
    format!("Participant {slot}")
}

//! Admission state machine.
//!
//! `AdmissionState` is the reducer behind the coordinator: every roster or
//! accepted-list snapshot is folded into it through [`AdmissionState::handle`],
//! which returns the side effects the caller must perform.
//!
//! Both snapshots are retained so either event can recompute the pending
//! list on its own. That makes the two event streams commute.

use anteroom_proto::{AcceptedSet, Participant, ParticipantId, Roster};

use crate::{
    config::{AdmissionConfig, ArrivalDetection},
    event::{AdmissionAction, AdmissionEvent, LogLevel},
    view::DerivedView,
};

/// Admission state for one session.
///
/// Pure state machine - returns actions, caller handles I/O.
#[derive(Debug, Clone)]
pub struct AdmissionState {
    config: AdmissionConfig,

    /// Resolved once from the first roster entry flagged local.
    local_participant_id: Option<ParticipantId>,

    /// Sticky for the session once the local entry shows the moderator role.
    is_local_moderator: bool,

    /// Some moderator has appeared in a roster; "loading" becomes "waiting".
    roles_resolved: bool,

    /// Monotonic until reset.
    is_local_admitted: bool,

    /// Last roster delivered.
    roster: Roster,

    /// Last accepted list delivered.
    accepted: AcceptedSet,

    /// Non-moderator roster entries missing from `accepted`, roster order.
    pending: Vec<Participant>,
}

impl AdmissionState {
    /// Fresh session state.
    pub fn new(config: AdmissionConfig) -> Self {
        Self {
            config,
            local_participant_id: None,
            is_local_moderator: false,
            roles_resolved: false,
            is_local_admitted: false,
            roster: Roster::new(),
            accepted: AcceptedSet::new(),
            pending: Vec::new(),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &AdmissionConfig {
        &self.config
    }

    /// Local participant id, once resolved to a non-placeholder value.
    pub fn local_participant_id(&self) -> Option<&ParticipantId> {
        self.local_participant_id.as_ref().filter(|id| !self.is_placeholder(id))
    }

    /// Whether the local participant holds the moderator role.
    pub fn is_local_moderator(&self) -> bool {
        self.is_local_moderator
    }

    /// Whether any moderator has shown up yet.
    pub fn roles_resolved(&self) -> bool {
        self.roles_resolved
    }

    /// Whether the local participant may take part in the session.
    pub fn is_local_admitted(&self) -> bool {
        self.is_local_admitted
    }

    /// Waiting participants regardless of the local role.
    pub fn pending_participants(&self) -> &[Participant] {
        &self.pending
    }

    /// Last roster delivered.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Last accepted list delivered.
    pub fn accepted(&self) -> &AcceptedSet {
        &self.accepted
    }

    /// Process an event and return resulting actions.
    pub fn handle(&mut self, event: AdmissionEvent) -> Vec<AdmissionAction> {
        match event {
            AdmissionEvent::RosterChanged { previous, next } => {
                self.handle_roster_changed(&previous, next)
            },
            AdmissionEvent::AcceptedChanged { accepted } => self.handle_accepted_changed(accepted),
            AdmissionEvent::AcceptRequested { id } => {
                self.handle_intent(id, |id| AdmissionAction::AcceptUser { id }, "accept")
            },
            AdmissionEvent::RejectRequested { id } => {
                self.handle_intent(id, |id| AdmissionAction::KickUser { id }, "reject")
            },
            AdmissionEvent::Reset => self.handle_reset(),
        }
    }

    /// Project the state for rendering.
    pub fn derived_view(&self) -> DerivedView {
        let waiting_message = if self.roles_resolved {
            self.config.waiting_message.clone()
        } else {
            self.config.loading_message.clone()
        };

        let show_new_user_overlay = self.is_local_moderator && !self.pending.is_empty();
        let pending_participants =
            if show_new_user_overlay { self.pending.clone() } else { Vec::new() };

        DerivedView {
            show_waiting_overlay: !self.is_local_admitted,
            waiting_message,
            show_new_user_overlay,
            pending_participants,
        }
    }

    /// Roster reconciliation.
    fn handle_roster_changed(&mut self, previous: &Roster, next: Roster) -> Vec<AdmissionAction> {
        let mut actions = Vec::new();

        if let Some(local) = next.local_participant() {
            let unresolved =
                self.local_participant_id.as_ref().is_none_or(|id| self.is_placeholder(id));
            if unresolved && self.local_participant_id.as_ref() != Some(&local.id) {
                actions.push(log(LogLevel::Debug, format!("local participant is {}", local.id)));
                self.local_participant_id = Some(local.id.clone());
            }
        }

        if !self.roles_resolved && next.has_moderator() {
            self.roles_resolved = true;
            actions.push(log(LogLevel::Debug, "roles resolved".to_string()));
        }

        if let Some(local) = next.local_participant() {
            if local.is_moderator() {
                if !self.is_local_moderator {
                    self.is_local_moderator = true;
                    actions.push(log(LogLevel::Info, format!("{} moderates", local.id)));
                }
                self.admit_local(local.id.clone(), &mut actions);
            }
        }

        self.roster = next;
        self.recompute_pending();

        if self.is_local_moderator {
            if let Some(ids) = self.detect_arrivals(previous) {
                actions.push(AdmissionAction::ParticipantsArrived { ids });
            }
        }

        self.reconcile_acceptance(&mut actions);
        actions
    }

    fn handle_accepted_changed(&mut self, accepted: AcceptedSet) -> Vec<AdmissionAction> {
        let mut actions = Vec::new();

        self.accepted = accepted;
        self.recompute_pending();
        self.reconcile_acceptance(&mut actions);

        actions
    }

    /// Forward a moderator intent. Authorization belongs to the gateway
    /// unless the config enforces the gate here.
    fn handle_intent(
        &self,
        id: ParticipantId,
        command: impl FnOnce(ParticipantId) -> AdmissionAction,
        verb: &str,
    ) -> Vec<AdmissionAction> {
        let mut actions = Vec::new();

        if !self.is_local_moderator {
            if self.config.enforce_moderator_gate {
                actions.push(log(LogLevel::Warn, format!("{verb} {id} refused: not a moderator")));
                actions.push(AdmissionAction::IntentRefused { id });
                return actions;
            }
            actions.push(log(LogLevel::Warn, format!("{verb} {id} issued without moderator role")));
        }

        if !self.roster.contains(&id) {
            actions.push(log(LogLevel::Debug, format!("{verb} {id}: not in current roster")));
        }

        actions.push(command(id));
        actions
    }

    fn handle_reset(&mut self) -> Vec<AdmissionAction> {
        *self = Self::new(self.config.clone());
        vec![log(LogLevel::Debug, "admission state reset".to_string())]
    }

    /// Admit the local participant if an accepted snapshot names it.
    fn reconcile_acceptance(&mut self, actions: &mut Vec<AdmissionAction>) {
        if self.is_local_moderator || self.is_local_admitted {
            return;
        }

        let Some(id) = self.local_participant_id().cloned() else {
            return;
        };

        if self.accepted.contains(&id) {
            self.admit_local(id, actions);
        }
    }

    fn admit_local(&mut self, id: ParticipantId, actions: &mut Vec<AdmissionAction>) {
        if self.is_local_admitted {
            return;
        }

        self.is_local_admitted = true;
        actions.push(log(LogLevel::Info, format!("{id} admitted")));
        actions.push(AdmissionAction::LocalAdmitted { id });
    }

    fn recompute_pending(&mut self) {
        self.pending = self
            .roster
            .iter()
            .filter(|p| !p.is_moderator() && !self.accepted.contains(&p.id))
            .cloned()
            .collect();
    }

    /// New-arrival signal against the caller's previous snapshot.
    fn detect_arrivals(&self, previous: &Roster) -> Option<Vec<ParticipantId>> {
        let arrived: Vec<ParticipantId> = self
            .roster
            .iter()
            .filter(|p| !previous.contains(&p.id))
            .map(|p| p.id.clone())
            .collect();

        let signal = match self.config.arrival_detection {
            ArrivalDetection::RosterGrowth => self.roster.len() > previous.len(),
            ArrivalDetection::SetDifference => !arrived.is_empty(),
        };

        signal.then_some(arrived)
    }

    fn is_placeholder(&self, id: &ParticipantId) -> bool {
        self.config.placeholder_local_id.as_ref() == Some(id)
    }
}

impl Default for AdmissionState {
    fn default() -> Self {
        Self::new(AdmissionConfig::default())
    }
}

fn log(level: LogLevel, message: String) -> AdmissionAction {
    AdmissionAction::Log { level, message }
}

//! Admission events and actions.

use anteroom_proto::{AcceptedSet, ParticipantId, Roster};

/// Input to the admission state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionEvent {
    /// Roster provider published a new snapshot.
    RosterChanged {
        /// Snapshot the presentation layer last rendered from.
        previous: Roster,
        /// Snapshot just published.
        next: Roster,
    },

    /// Accepted-list source published a new snapshot.
    AcceptedChanged {
        /// Full accepted list.
        accepted: AcceptedSet,
    },

    /// Moderator asked to admit a waiting participant.
    AcceptRequested {
        /// Participant to admit.
        id: ParticipantId,
    },

    /// Moderator asked to turn a waiting participant away.
    RejectRequested {
        /// Participant to kick.
        id: ParticipantId,
    },

    /// Session torn down; forget everything.
    Reset,
}

/// Log severity for [`AdmissionAction::Log`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Per-event detail.
    Debug,
    /// Admission milestones.
    Info,
    /// Suspicious but tolerated input.
    Warn,
}

/// Output of the admission state machine, executed by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionAction {
    /// Ask the session gateway to admit `id`.
    AcceptUser {
        /// Participant to admit.
        id: ParticipantId,
    },

    /// Ask the session gateway to kick `id`.
    KickUser {
        /// Participant to kick.
        id: ParticipantId,
    },

    /// An accept/reject intent was dropped by the moderator gate.
    IntentRefused {
        /// Target of the dropped intent.
        id: ParticipantId,
    },

    /// The local participant was admitted. Emitted once per session.
    LocalAdmitted {
        /// Local participant id.
        id: ParticipantId,
    },

    /// New participants showed up while the local participant moderates.
    ParticipantsArrived {
        /// Ids present in the new roster but not the previous one.
        ids: Vec<ParticipantId>,
    },

    /// Diagnostic line for the caller's logger.
    Log {
        /// Severity.
        level: LogLevel,
        /// Rendered message.
        message: String,
    },
}

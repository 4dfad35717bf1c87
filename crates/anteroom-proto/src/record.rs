//! Recorded session steps for offline replay.

use serde::{Deserialize, Serialize};

use crate::{AcceptedSet, ParticipantId, Roster};

/// One step of a recorded session.
///
/// A trace is an ordered sequence of records. Snapshot records carry the
/// full state delivered by the external source at that point; intent
/// records carry a moderator's UI action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionRecord {
    /// Session connect was requested.
    Start,

    /// Roster provider published a snapshot.
    Roster {
        /// Full participant snapshot.
        participants: Roster,
    },

    /// Accepted-list source published a snapshot.
    Accepted {
        /// Full accepted list.
        accepted: AcceptedSet,
    },

    /// Moderator pressed accept.
    Accept {
        /// Participant to admit.
        id: ParticipantId,
    },

    /// Moderator pressed reject.
    Reject {
        /// Participant to kick.
        id: ParticipantId,
    },

    /// Session view was torn down.
    Teardown,
}

impl SessionRecord {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Roster { .. } => "roster",
            Self::Accepted { .. } => "accepted",
            Self::Accept { .. } => "accept",
            Self::Reject { .. } => "reject",
            Self::Teardown => "teardown",
        }
    }
}

//! Operations for model-based testing.
//!
//! Operations are generated randomly by proptest or the seeded simulation
//! and applied to the model world, which turns them into the snapshots and
//! intents the real coordinator sees.

use anteroom_proto::ParticipantId;
use arbitrary::Arbitrary;

/// Participant slot. Slot 0 is the local participant; the rest are remote.
pub type Slot = u8;

/// The local participant's slot.
pub const LOCAL_SLOT: Slot = 0;

/// Session id for a slot once assigned.
pub fn participant_id(slot: Slot) -> ParticipantId {
    ParticipantId::new(format!("p{slot}"))
}

/// Things that can happen to a moderated session.
///
/// Source-side operations change the session truth without telling the
/// coordinator. Delivery operations push the current truth as a snapshot.
/// Intent operations are moderator clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum Operation {
    /// A remote participant joins the session.
    Join {
        /// Remote slot (folded into the remote range).
        slot: Slot,
        /// Joins holding the moderator role.
        moderator: bool,
    },

    /// A remote participant leaves.
    Leave {
        /// Remote slot (folded into the remote range).
        slot: Slot,
    },

    /// The session changes the local participant's role.
    SetLocalRole {
        /// New role is moderator.
        moderator: bool,
    },

    /// The session replaces the local placeholder id with the real one.
    AssignLocalId,

    /// Someone else's moderator decision admits a slot.
    Grant {
        /// Slot to admit (any slot, local included).
        slot: Slot,
    },

    /// The roster provider publishes the current roster.
    DeliverRoster,

    /// The accepted-list source publishes the current list.
    DeliverAccepted,

    /// The local participant clicks accept.
    Accept {
        /// Target slot.
        slot: Slot,
    },

    /// The local participant clicks reject.
    Reject {
        /// Target slot.
        slot: Slot,
    },
}

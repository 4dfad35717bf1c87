//! Presentation projection.

use anteroom_proto::Participant;

/// What the presentation layer renders.
///
/// A pure projection of [`AdmissionState`](crate::AdmissionState); reading
/// it never mutates the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedView {
    /// Cover the session with the waiting overlay.
    pub show_waiting_overlay: bool,
    /// Text for the waiting overlay.
    pub waiting_message: String,
    /// Show the moderator's list of waiting participants.
    pub show_new_user_overlay: bool,
    /// Waiting participants, in roster order. Empty unless the local
    /// participant moderates.
    pub pending_participants: Vec<Participant>,
}

//! Admission configuration.

use anteroom_proto::ParticipantId;

/// Id the roster provider reports for the local participant before the
/// session assigns a real one.
pub const DEFAULT_PLACEHOLDER_LOCAL_ID: &str = "local";

/// How a moderator is told that someone new showed up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArrivalDetection {
    /// Signal whenever the roster grows. Cannot tell "one joined" from
    /// "one left and two joined", and misses a swap of equal size.
    #[default]
    RosterGrowth,
    /// Signal whenever the next roster carries ids the previous one lacked.
    SetDifference,
}

impl ArrivalDetection {
    /// Config name, as accepted on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RosterGrowth => "roster-growth",
            Self::SetDifference => "set-difference",
        }
    }
}

/// Tunables for [`AdmissionState`](crate::AdmissionState).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionConfig {
    /// Shown on the waiting overlay until a moderator appears.
    pub loading_message: String,
    /// Shown on the waiting overlay once a moderator is present.
    pub waiting_message: String,
    /// New-arrival signal strategy.
    pub arrival_detection: ArrivalDetection,
    /// Local id treated as unresolved. `None` trusts the first id reported.
    pub placeholder_local_id: Option<ParticipantId>,
    /// Refuse accept/reject intents while the local participant is not a
    /// moderator instead of forwarding them to the gateway.
    pub enforce_moderator_gate: bool,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            loading_message: "Loading...".to_string(),
            waiting_message: "Waiting for moderator to accept...".to_string(),
            arrival_detection: ArrivalDetection::default(),
            placeholder_local_id: Some(ParticipantId::from(DEFAULT_PLACEHOLDER_LOCAL_ID)),
            enforce_moderator_gate: false,
        }
    }
}

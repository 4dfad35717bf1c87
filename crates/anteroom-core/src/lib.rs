//! Admission core.
//!
//! Pure state machine deciding whether the local participant is admitted to
//! a moderated session, and which participants are waiting on a moderator.
//!
//! # Architecture
//!
//! ```text
//! roster snapshot ─┐
//!                  ├─► AdmissionState::handle(event) ─► Vec<AdmissionAction>
//! accepted list ───┤            │
//! accept/reject ───┘            └─► derived_view() ─► DerivedView
//! ```
//!
//! The state machine performs no I/O. Gateway commands and log lines come
//! back as [`AdmissionAction`]s for the caller to execute.
//!
//! # Invariants
//!
//! - Admission is monotonic: once `is_local_admitted` is true it stays true
//!   until [`AdmissionEvent::Reset`].
//! - Roster and accepted-list events commute: delivering both in either
//!   order yields the same [`DerivedView`].
//! - The pending list is exactly the non-moderator roster entries missing
//!   from the accepted set, in roster order.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod event;
mod state;
mod view;

pub use anteroom_proto::{AcceptedSet, Participant, ParticipantId, Role, Roster};
pub use config::{AdmissionConfig, ArrivalDetection, DEFAULT_PLACEHOLDER_LOCAL_ID};
pub use event::{AdmissionAction, AdmissionEvent, LogLevel};
pub use state::AdmissionState;
pub use view::DerivedView;

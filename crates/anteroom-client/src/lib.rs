//! Admission coordinator.
//!
//! Sits between the roster provider and the presentation layer. Snapshots
//! go in, the [`DerivedView`] comes out, and moderator intents are turned
//! into [`SessionGateway`] commands.
//!
//! # Architecture
//!
//! The coordinator wraps the pure [`AdmissionState`] machine:
//! - Snapshot and intent calls become [`AdmissionEvent`]s
//! - Resulting [`AdmissionAction`]s are executed here: gateway commands go to
//!   the injected gateway, log actions go to `tracing`
//!
//! # Components
//!
//! - [`Coordinator`]: The driver owning state and gateway
//! - [`SessionGateway`]: Session commands (accept, kick, connect, disconnect)
//! - [`CoordinatorError`]: Failures reported from intents and lifecycle calls
//!
//! [`AdmissionEvent`]: anteroom_core::AdmissionEvent
//! [`AdmissionAction`]: anteroom_core::AdmissionAction

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod coordinator;
mod error;
mod gateway;

pub use anteroom_core::{
    AdmissionConfig, AdmissionState, ArrivalDetection, DerivedView, Participant, ParticipantId,
    Role, Roster,
};
pub use anteroom_proto::AcceptedSet;
pub use coordinator::Coordinator;
pub use error::CoordinatorError;
pub use gateway::{GatewayError, SessionGateway};

//! Deterministic test harness for the anteroom admission coordinator.
//!
//! # Model-Based Testing
//!
//! The `model` module provides a reference implementation for model-based
//! testing. Operations are applied to the model, which produces the
//! snapshots and intents the real coordinator receives, and the derived
//! views of both are compared.
//!
//! # Simulation
//!
//! [`Simulation`] pairs the model with a real [`Coordinator`] wired to a
//! [`RecordingGateway`]. [`random_operations`] generates seeded operation
//! sequences so failures reproduce from a single `u64`.
//!
//! [`Coordinator`]: anteroom_client::Coordinator

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod model;
pub mod recording_gateway;
pub mod simulation;

pub use model::{ModelWorld, Operation, Slot, Step, LOCAL_SLOT, participant_id};
pub use recording_gateway::{GatewayCall, RecordingGateway};
pub use simulation::{Divergence, Simulation, random_operations};

//! Reference model for model-based testing.
//!
//! The model captures what an admission coordinator must show without any
//! of the incremental bookkeeping of the real one. Every observable field is
//! recomputed from the delivered snapshot history with set formulas.
//!
//! # Design Principles
//!
//! - Simplicity: The model should be obviously correct
//! - What, not how: Sticky flags are "ever seen", pending is a filter
//! - Deterministic: Same inputs produce same outputs

pub mod operation;
mod world;

pub use operation::{LOCAL_SLOT, Operation, Slot, participant_id};
pub use world::{ModelWorld, Step};

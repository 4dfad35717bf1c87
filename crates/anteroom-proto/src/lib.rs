//! Anteroom snapshot types.
//!
//! Shapes pushed into the admission core by its external collaborators:
//!
//! - The roster provider delivers a full [`Roster`] on every membership or
//!   role change.
//! - The accepted-list source delivers an [`AcceptedSet`] whenever a
//!   moderator decision takes effect.
//!
//! Both are snapshots, never deltas. Diffing is the consumer's job.
//!
//! [`SessionRecord`] captures one step of a recorded session so that traces
//! can be replayed offline. Records encode to CBOR via [`codec`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod accepted;
pub mod codec;
mod error;
mod participant;
mod record;

pub use accepted::{AcceptedEntry, AcceptedSet};
pub use error::ProtoError;
pub use participant::{Participant, ParticipantId, Role, Roster};
pub use record::SessionRecord;

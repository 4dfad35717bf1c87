//! Offline replay of recorded admission sessions.
//!
//! A trace is the sequence of roster snapshots, accepted-list snapshots,
//! moderator intents and lifecycle calls one client saw. Replaying it
//! through a [`Coordinator`](anteroom_client::Coordinator) reproduces the
//! views the client rendered, one report line per record.
//!
//! ## Architecture
//!
//! ```text
//! anteroom-cli
//!   ├─ read_trace       (JSON lines or CBOR → SessionRecord)
//!   ├─ Replayer         (records → Coordinator → StepReport)
//!   └─ TracingGateway   (gateway commands → tracing)
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod gateway;
mod replay;
mod trace;

pub use error::ReplayError;
pub use gateway::TracingGateway;
pub use replay::{ReplaySummary, Replayer, StepReport};
pub use trace::{TraceFormat, read_trace};

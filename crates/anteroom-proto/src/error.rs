//! Snapshot codec errors.

use thiserror::Error;

/// Errors from encoding or decoding snapshot records.
#[derive(Debug, Error)]
pub enum ProtoError {
    /// Serialization failed.
    #[error("encode failed: {reason}")]
    Encode {
        /// Underlying encoder message.
        reason: String,
    },

    /// Input bytes did not decode to the expected shape.
    #[error("decode failed: {reason}")]
    Decode {
        /// Underlying decoder message.
        reason: String,
    },
}

//! Replay error types.

use anteroom_client::CoordinatorError;
use anteroom_proto::ProtoError;
use thiserror::Error;

/// Errors that stop a replay.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// Reading the trace or writing the report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON trace line did not parse as a session record.
    #[error("trace line {line}: {reason}")]
    Json {
        /// 1-based line number in the trace file.
        line: usize,
        /// Parser message.
        reason: String,
    },

    /// The CBOR trace did not decode.
    #[error("trace decode failed: {0}")]
    Proto(#[from] ProtoError),

    /// The coordinator reported a failure retrying cannot fix.
    #[error("coordinator error: {0}")]
    Coordinator(#[from] CoordinatorError),
}

#[cfg(test)]
mod tests {
    use anteroom_client::GatewayError;

    use super::*;

    #[test]
    fn json_error_names_the_line() {
        let err = ReplayError::Json { line: 7, reason: "expected value".to_string() };
        assert_eq!(err.to_string(), "trace line 7: expected value");
    }

    #[test]
    fn coordinator_error_converts() {
        let err: ReplayError = CoordinatorError::from(GatewayError::NotConnected).into();
        assert!(matches!(err, ReplayError::Coordinator(CoordinatorError::Gateway(_))));
    }
}

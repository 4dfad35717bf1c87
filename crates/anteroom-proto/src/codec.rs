//! CBOR encoding for snapshots and session records.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtoError;

/// Encode a value as CBOR.
pub fn to_cbor<T: Serialize>(value: &T) -> Result<Vec<u8>, ProtoError> {
    let mut bytes = Vec::new();
    ciborium::ser::into_writer(value, &mut bytes)
        .map_err(|e| ProtoError::Encode { reason: e.to_string() })?;
    Ok(bytes)
}

/// Decode a value from CBOR.
pub fn from_cbor<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ProtoError> {
    ciborium::de::from_reader(bytes).map_err(|e| ProtoError::Decode { reason: e.to_string() })
}

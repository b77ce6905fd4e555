//! Text transport encoding for ciphertext bytes.
//!
//! Parties exchange ciphertexts as standard base64 strings so payloads can
//! travel over any text channel (JSON fields, log lines, copy-paste).

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// A ciphertext in transport form. The inner string is always valid base64
/// of the producing scheme's serialized ciphertext bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportPayload(String);

impl TransportPayload {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Wraps an already-encoded string received from the peer. No validation
    /// happens here; decoding errors surface in [`from_transport`].
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        TransportPayload(encoded.into())
    }
}

pub fn to_transport(bytes: &[u8]) -> TransportPayload {
    TransportPayload(STANDARD.encode(bytes))
}

pub fn from_transport(payload: &TransportPayload) -> Result<Vec<u8>, CodecError> {
    Ok(STANDARD.decode(&payload.0)?)
}

//! Protocol-level error kinds.
//!
//! Every failure surfaced by the protocol collapses into one of four kinds:
//! configuration defects caught before data is touched, capacity overruns
//! caught before encryption, transport-layer decode failures, and missing
//! key material. None of them is retriable; the orchestrator halts and
//! reports.

use crate::ckks::CkksError;
use crate::protocol::codec::CodecError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Capacity error: {0}")]
    Capacity(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Key mismatch: {0}")]
    KeyMismatch(String),
}

impl From<CkksError> for ProtocolError {
    fn from(err: CkksError) -> Self {
        match err {
            CkksError::InvalidParameter { .. }
            | CkksError::ValueOutOfRange { .. }
            | CkksError::ScaleMismatch { .. }
            | CkksError::LevelBudgetExhausted { .. } => {
                ProtocolError::Configuration(err.to_string())
            }
            CkksError::SlotCapacityExceeded { .. } => {
                ProtocolError::Capacity(err.to_string())
            }
            CkksError::MissingRotationKey { .. } => {
                ProtocolError::KeyMismatch(err.to_string())
            }
            CkksError::ContextMismatch { .. }
            | CkksError::CiphertextFormat { .. } => {
                ProtocolError::Transport(err.to_string())
            }
        }
    }
}

impl From<CodecError> for ProtocolError {
    fn from(err: CodecError) -> Self {
        ProtocolError::Transport(err.to_string())
    }
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ckks_errors_map_to_protocol_kinds() {
        let err: ProtocolError = CkksError::SlotCapacityExceeded {
            got: 9,
            capacity: 8,
        }
        .into();
        assert!(matches!(err, ProtocolError::Capacity(_)));

        let err: ProtocolError = CkksError::MissingRotationKey { step: 2 }.into();
        assert!(matches!(err, ProtocolError::KeyMismatch(_)));

        let err: ProtocolError = CkksError::ContextMismatch {
            message: "degree".into(),
        }
        .into();
        assert!(matches!(err, ProtocolError::Transport(_)));
    }
}

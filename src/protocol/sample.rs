//! Plaintext sensor sample held by the data owner.

use crate::error::{ProtocolError, ProtocolResult};

/// A non-empty batch of real-valued readings to be averaged.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaintextSample {
    values: Vec<f64>,
}

impl PlaintextSample {
    pub fn new(values: Vec<f64>) -> ProtocolResult<Self> {
        if values.is_empty() {
            return Err(ProtocolError::Configuration(
                "sample must contain at least one reading".to_string(),
            ));
        }
        Ok(PlaintextSample { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Reference average computed directly on the plaintext.
    pub fn mean(&self) -> f64 {
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }
}

//! The compute side of the protocol.
//!
//! The compute agent holds only an evaluation context, so it can sum slots
//! and rescale by the public sample size but never see a plaintext reading.

use tracing::{debug, info};

use crate::error::{ProtocolError, ProtocolResult};
use crate::protocol::codec::{self, TransportPayload};
use crate::protocol::scheme::HeScheme;

pub struct ComputeAgent<S: HeScheme> {
    eval: S::EvalContext,
    sample_len: usize,
}

impl<S: HeScheme> ComputeAgent<S> {
    /// The sample length is public protocol metadata; only the readings
    /// themselves are secret.
    pub fn new(eval: S::EvalContext, sample_len: usize) -> ProtocolResult<Self> {
        if sample_len == 0 {
            return Err(ProtocolError::Configuration(
                "cannot average a sample of zero readings".to_string(),
            ));
        }
        info!(sample_len, "compute agent ready");
        Ok(ComputeAgent { eval, sample_len })
    }

    /// Sum the slots, multiply by 1/n, and return the result in transport
    /// form. Everything here runs on ciphertexts.
    pub fn compute_average(&self, payload: &TransportPayload) -> ProtocolResult<TransportPayload> {
        let bytes = codec::from_transport(payload)?;
        let ciphertext = S::deserialize(&self.eval, &bytes).map_err(Into::into)?;

        let summed = S::sum_slots(&self.eval, &ciphertext).map_err(Into::into)?;
        let averaged =
            S::multiply_scalar(&self.eval, &summed, 1.0 / self.sample_len as f64)
                .map_err(Into::into)?;

        let out = S::serialize(&averaged).map_err(Into::into)?;
        debug!(response_bytes = out.len(), "average computed");
        Ok(codec::to_transport(&out))
    }
}

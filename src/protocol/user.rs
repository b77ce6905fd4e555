//! The data-owner side of the protocol.
//!
//! The user holds the full context (secret key included), encrypts their
//! readings, hands the compute party an evaluation context, and is the only
//! party able to read the result back.

use rand::Rng;
use tracing::{debug, info};

use crate::error::{ProtocolError, ProtocolResult};
use crate::protocol::codec::{self, TransportPayload};
use crate::protocol::sample::PlaintextSample;
use crate::protocol::scheme::HeScheme;

pub struct UserAgent<S: HeScheme> {
    context: S::Context,
}

impl<S: HeScheme> UserAgent<S> {
    pub fn new<R: Rng>(params: &S::Params, rng: &mut R) -> ProtocolResult<Self> {
        let context = S::create_context(params, rng).map_err(Into::into)?;
        info!(
            slots = S::slot_capacity(&context),
            "user context created"
        );
        Ok(UserAgent { context })
    }

    /// Evaluation material for the compute party. Carries no secret key.
    pub fn eval_context(&self) -> S::EvalContext {
        S::eval_context(&self.context)
    }

    pub fn slot_capacity(&self) -> usize {
        S::slot_capacity(&self.context)
    }

    /// Encrypts a sample into a transport payload. The capacity check runs
    /// before any encryption work so oversized batches fail fast.
    pub fn encrypt_sample(
        &self,
        sample: &PlaintextSample,
        rng: &mut impl Rng,
    ) -> ProtocolResult<TransportPayload> {
        let capacity = S::slot_capacity(&self.context);
        if sample.len() > capacity {
            return Err(ProtocolError::Capacity(format!(
                "sample of {} readings exceeds the {} available slots",
                sample.len(),
                capacity
            )));
        }

        let ciphertext = S::encrypt(&self.context, sample.values(), rng).map_err(Into::into)?;
        let bytes = S::serialize(&ciphertext).map_err(Into::into)?;
        let payload = codec::to_transport(&bytes);
        debug!(
            readings = sample.len(),
            payload_bytes = payload.len(),
            "sample encrypted"
        );
        Ok(payload)
    }

    /// Decodes the compute party's response and reads the average out of the
    /// first slot.
    pub fn receive_result(&self, payload: &TransportPayload) -> ProtocolResult<f64> {
        let bytes = codec::from_transport(payload)?;
        let ciphertext =
            S::deserialize(&self.eval_context(), &bytes).map_err(Into::into)?;
        let slots = S::decrypt(&self.context, &ciphertext).map_err(Into::into)?;
        let average = slots.first().copied().ok_or_else(|| {
            ProtocolError::Transport("response ciphertext decoded to zero slots".to_string())
        })?;
        debug!(average, "result decrypted");
        Ok(average)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ckks::CkksParams;
    use crate::protocol::scheme::CkksScheme;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_oversized_sample_rejected_before_encryption() {
        let mut rng = ChaCha20Rng::seed_from_u64(31);
        let user = UserAgent::<CkksScheme>::new(&CkksParams::with_degree(32), &mut rng).unwrap();

        let too_many = PlaintextSample::new(vec![1.0; user.slot_capacity() + 1]).unwrap();
        assert!(matches!(
            user.encrypt_sample(&too_many, &mut rng),
            Err(ProtocolError::Capacity(_))
        ));
    }

    #[test]
    fn test_encrypt_then_receive_roundtrip() {
        let mut rng = ChaCha20Rng::seed_from_u64(32);
        let user = UserAgent::<CkksScheme>::new(&CkksParams::with_degree(64), &mut rng).unwrap();

        let sample = PlaintextSample::new(vec![42.0, -7.0, 3.5]).unwrap();
        let payload = user.encrypt_sample(&sample, &mut rng).unwrap();
        let first = user.receive_result(&payload).unwrap();
        assert!((first - 42.0).abs() < 1e-2, "got {first}");
    }
}

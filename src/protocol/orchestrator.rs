//! End-to-end protocol runs and the plaintext comparison benchmark.

use std::time::{Duration, Instant};

use rand::Rng;
use tracing::info;

use crate::error::ProtocolResult;
use crate::protocol::sample::PlaintextSample;
use crate::protocol::scheme::HeScheme;
use crate::protocol::server::ComputeAgent;
use crate::protocol::user::UserAgent;

/// Outcome of a single encrypted-average exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub average: f64,
    pub request_payload_len: usize,
    pub response_payload_len: usize,
}

/// Encrypted run measured against the direct plaintext computation.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkReport {
    pub encrypted_average: f64,
    pub direct_average: f64,
    pub absolute_error: f64,
    /// None when the direct average is zero.
    pub relative_error: Option<f64>,
    pub encrypted_time: Duration,
    pub direct_time: Duration,
    /// None when the direct computation measured as zero time.
    pub slowdown: Option<f64>,
}

/// Runs the full exchange: context setup, encryption, homomorphic average,
/// decryption. Both agents live in this process but communicate only through
/// transport payloads and the evaluation context.
pub fn run<S: HeScheme, R: Rng>(
    params: &S::Params,
    sample: &PlaintextSample,
    rng: &mut R,
) -> ProtocolResult<RunReport> {
    let user = UserAgent::<S>::new(params, rng)?;
    let server = ComputeAgent::<S>::new(user.eval_context(), sample.len())?;

    let request = user.encrypt_sample(sample, rng)?;
    let response = server.compute_average(&request)?;
    let average = user.receive_result(&response)?;

    info!(average, "protocol run complete");
    Ok(RunReport {
        average,
        request_payload_len: request.len(),
        response_payload_len: response.len(),
    })
}

/// Times the encrypted exchange against the direct plaintext mean.
pub fn benchmark<S: HeScheme, R: Rng>(
    params: &S::Params,
    sample: &PlaintextSample,
    rng: &mut R,
) -> ProtocolResult<BenchmarkReport> {
    let encrypted_start = Instant::now();
    let report = run::<S, R>(params, sample, rng)?;
    let encrypted_time = encrypted_start.elapsed();

    let direct_start = Instant::now();
    let direct_average = sample.mean();
    let direct_time = direct_start.elapsed();

    let absolute_error = (report.average - direct_average).abs();
    let relative_error = if direct_average == 0.0 {
        None
    } else {
        Some(absolute_error / direct_average.abs())
    };

    Ok(BenchmarkReport {
        encrypted_average: report.average,
        direct_average,
        absolute_error,
        relative_error,
        encrypted_time,
        direct_time,
        slowdown: slowdown_ratio(encrypted_time, direct_time),
    })
}

fn slowdown_ratio(encrypted: Duration, direct: Duration) -> Option<f64> {
    if direct.is_zero() {
        return None;
    }
    Some(encrypted.as_secs_f64() / direct.as_secs_f64())
}

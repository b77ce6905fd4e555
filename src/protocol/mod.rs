//! Two-party encrypted-average protocol.
//!
//! A data owner ([`UserAgent`]) encrypts a batch of readings into a single
//! packed ciphertext and sends it, base64-encoded, to a compute party
//! ([`ComputeAgent`]) that holds only public evaluation material. The
//! compute party sums the slots, multiplies by the reciprocal of the public
//! sample size, and sends the encrypted average back. Only the data owner
//! can decrypt the result.

pub mod codec;
pub mod orchestrator;
pub mod sample;
pub mod scheme;
pub mod server;
pub mod user;

pub use codec::TransportPayload;
pub use orchestrator::{BenchmarkReport, RunReport, benchmark, run};
pub use sample::PlaintextSample;
pub use scheme::{CkksScheme, HeScheme};
pub use server::ComputeAgent;
pub use user::UserAgent;

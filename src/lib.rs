pub mod ckks;
pub mod error;
pub mod protocol;

pub use ckks::{CkksContext, CkksParams, EvalContext};
pub use error::{ProtocolError, ProtocolResult};
pub use protocol::{
    BenchmarkReport, CkksScheme, ComputeAgent, PlaintextSample, RunReport, UserAgent,
};

//! Uniform success/failure adapter exposed to presentation code.

mod outcome;
mod runner;

pub use outcome::{ActionOutcome, ErrorDetail};
pub use runner::{ActionRunner, failure_outcome};

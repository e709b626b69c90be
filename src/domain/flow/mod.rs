//! Generic execution of registered tasks against a generative backend.

mod error;
mod executor;
mod response;

pub use error::{FailureKind, FlowError};
pub use executor::{FlowExecutor, GeneratedResult, ModelSelection, preview_prompt};

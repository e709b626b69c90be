mod registry;
mod spec;

pub use registry::TaskRegistry;
pub use spec::{FailurePolicy, MediaOutput, ModelClass, OutputMode, Placeholder, TaskSpec};

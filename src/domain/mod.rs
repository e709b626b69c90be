pub mod achievements;
pub mod action;
pub mod activity;
pub mod configuration;
pub mod error;
pub mod flow;
pub mod identities;
pub mod models;
pub mod prompt;
pub mod quiz;
pub mod schema;
pub mod task;

pub use action::{ActionOutcome, ActionRunner, ErrorDetail};
pub use configuration::{AppConfig, BackendConfig, StorageConfig};
pub use error::AppError;
pub use flow::{FailureKind, FlowError, FlowExecutor, GeneratedResult, ModelSelection};
pub use identities::{TaskName, UserId};
pub use schema::{Field, ObjectSchema, Schema};
pub use task::{TaskRegistry, TaskSpec};

use thiserror::Error;

use crate::domain::schema::SchemaViolations;

/// Failure kinds raised while registering or executing a task.
#[derive(Debug, Clone, Error)]
pub enum FlowError {
    #[error("Unknown task '{0}'")]
    UnknownTask(String),

    #[error("Task '{0}' is already registered")]
    DuplicateTask(String),

    #[error("Template for task '{task}' references '{field}', which is not an input field")]
    TemplateFieldMissing { task: String, field: String },

    #[error("Template for task '{task}' failed: {reason}")]
    Template { task: String, reason: String },

    #[error("Invalid input for task '{task}': {violations}")]
    InputValidation { task: String, violations: SchemaViolations },

    #[error("Generative backend unavailable for task '{task}': {message}")]
    BackendUnavailable { task: String, status: Option<u16>, message: String },

    #[error("Generative backend timed out for task '{task}': {message}")]
    BackendTimeout { task: String, message: String },

    #[error("Response for task '{task}' violates its output schema: {detail}")]
    SchemaViolation { task: String, detail: String },

    #[error("Generative backend returned an empty response for task '{0}'")]
    EmptyResponse(String),
}

/// Coarse classification of a [`FlowError`], carried on action failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Configuration,
    InputValidation,
    BackendUnavailable,
    BackendTimeout,
    SchemaViolation,
    EmptyResponse,
    Unauthenticated,
    Storage,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Configuration => "configuration",
            FailureKind::InputValidation => "input_validation",
            FailureKind::BackendUnavailable => "backend_unavailable",
            FailureKind::BackendTimeout => "backend_timeout",
            FailureKind::SchemaViolation => "schema_violation",
            FailureKind::EmptyResponse => "empty_response",
            FailureKind::Unauthenticated => "unauthenticated",
            FailureKind::Storage => "storage",
        }
    }
}

impl FlowError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FlowError::UnknownTask(_)
            | FlowError::DuplicateTask(_)
            | FlowError::TemplateFieldMissing { .. }
            | FlowError::Template { .. } => FailureKind::Configuration,
            FlowError::InputValidation { .. } => FailureKind::InputValidation,
            FlowError::BackendUnavailable { .. } => FailureKind::BackendUnavailable,
            FlowError::BackendTimeout { .. } => FailureKind::BackendTimeout,
            FlowError::SchemaViolation { .. } => FailureKind::SchemaViolation,
            FlowError::EmptyResponse(_) => FailureKind::EmptyResponse,
        }
    }

    /// Whether the failure happened on the backend side of the call.
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            FlowError::BackendUnavailable { .. }
                | FlowError::BackendTimeout { .. }
                | FlowError::SchemaViolation { .. }
                | FlowError::EmptyResponse(_)
        )
    }

    /// One-line explanation that is safe to show to an end user.
    ///
    /// Backend bodies and output-schema details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            FlowError::UnknownTask(name) => format!("unknown task '{}'", name),
            FlowError::DuplicateTask(_)
            | FlowError::TemplateFieldMissing { .. }
            | FlowError::Template { .. } => "the task is misconfigured".to_string(),
            FlowError::InputValidation { violations, .. } => {
                format!("invalid input: {}", violations)
            }
            FlowError::BackendUnavailable { .. } => "the AI service is unavailable".to_string(),
            FlowError::BackendTimeout { .. } => "the AI service timed out".to_string(),
            FlowError::SchemaViolation { .. } => {
                "the AI response was not in the expected format".to_string()
            }
            FlowError::EmptyResponse(_) => "the AI service returned an empty response".to_string(),
        }
    }
}

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::domain::flow::{FailureKind, GeneratedResult};

/// Why an action failed, in a form presentation code can show directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    /// Task or action name the failure belongs to.
    pub task: String,
    pub kind: FailureKind,
    /// One-line, user-facing explanation.
    pub message: String,
}

/// Result of every action call: exactly one of success or failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome<T = GeneratedResult> {
    Success(T),
    Failure(ErrorDetail),
}

impl<T> ActionOutcome<T> {
    pub fn failure(task: impl Into<String>, kind: FailureKind, message: impl Into<String>) -> Self {
        ActionOutcome::Failure(ErrorDetail { task: task.into(), kind, message: message.into() })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ActionOutcome::Success(_))
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            ActionOutcome::Success(value) => Some(value),
            ActionOutcome::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorDetail> {
        match self {
            ActionOutcome::Success(_) => None,
            ActionOutcome::Failure(detail) => Some(detail),
        }
    }

    pub fn into_result(self) -> Result<T, ErrorDetail> {
        match self {
            ActionOutcome::Success(value) => Ok(value),
            ActionOutcome::Failure(detail) => Err(detail),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ActionOutcome<U> {
        match self {
            ActionOutcome::Success(value) => ActionOutcome::Success(f(value)),
            ActionOutcome::Failure(detail) => ActionOutcome::Failure(detail),
        }
    }
}

/// Wire form: `{"success": true, "data": ...}` or `{"success": false, "error": "..."}`.
impl<T: Serialize> Serialize for ActionOutcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        match self {
            ActionOutcome::Success(value) => {
                map.serialize_entry("success", &true)?;
                map.serialize_entry("data", value)?;
            }
            ActionOutcome::Failure(detail) => {
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", &detail.message)?;
            }
        }
        map.end()
    }
}

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::outcome::ActionOutcome;
use crate::domain::flow::{FlowError, FlowExecutor, GeneratedResult};
use crate::domain::models::TaskInput;
use crate::domain::task::TaskRegistry;
use crate::ports::GenerativeBackend;

const UNKNOWN_TASK_PREFIX: &str = "Failed to run task";

/// Error boundary around the flow executor.
///
/// `invoke` never returns an error: every failure becomes [`ActionOutcome::Failure`]
/// with a message prefixed by the task name.
pub struct ActionRunner<B> {
    executor: FlowExecutor<B>,
}

impl<B: GenerativeBackend> ActionRunner<B> {
    pub fn new(executor: FlowExecutor<B>) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &FlowExecutor<B> {
        &self.executor
    }

    pub fn invoke(&self, task: &str, input: &Value) -> ActionOutcome<GeneratedResult> {
        match self.executor.execute(task, input) {
            Ok(result) => {
                tracing::info!(task, degraded = result.degraded, "action succeeded");
                ActionOutcome::Success(result)
            }
            Err(err) => self.fail(task, &err),
        }
    }

    /// Like [`invoke`](Self::invoke) with typed records on both sides.
    pub fn invoke_typed<I, O>(&self, task: &str, input: &I) -> ActionOutcome<O>
    where
        I: Serialize,
        O: DeserializeOwned,
    {
        match self.executor.execute_typed(task, input) {
            Ok(output) => {
                tracing::info!(task, "action succeeded");
                ActionOutcome::Success(output)
            }
            Err(err) => self.fail(task, &err),
        }
    }

    /// Run the task bound to a typed input record.
    pub fn run<I: TaskInput>(&self, input: &I) -> ActionOutcome<I::Output> {
        self.invoke_typed(I::TASK, input)
    }

    fn fail<T>(&self, task: &str, err: &FlowError) -> ActionOutcome<T> {
        failure_outcome(self.executor.registry(), task, err)
    }
}

/// Convert a flow error into the user-facing failure for `task`.
pub fn failure_outcome<T>(registry: &TaskRegistry, task: &str, err: &FlowError) -> ActionOutcome<T> {
    let prefix = match registry.lookup(task) {
        Ok(spec) => spec.failure_message.clone(),
        Err(_) => UNKNOWN_TASK_PREFIX.to_string(),
    };
    tracing::error!(task, kind = err.kind().as_str(), error = %err, "action failed");
    ActionOutcome::failure(task, err.kind(), format!("[{}] {}: {}", task, prefix, err.user_message()))
}

//! Run a single task through the action wrapper.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::app::AppContext;
use crate::domain::achievements::Achievement;
use crate::domain::flow::preview_prompt;
use crate::domain::prompt::RenderedPrompt;
use crate::domain::action::failure_outcome;
use crate::domain::{ActionOutcome, AppError, TaskRegistry};
use crate::ports::{GenerativeBackend, KeyValueStore};

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub task: String,
    pub input: Value,
}

#[derive(Debug)]
pub struct RunResult {
    pub outcome: ActionOutcome,
    /// Achievements unlocked by this run.
    pub unlocked: Vec<&'static Achievement>,
}

/// Invoke the task once and award its achievement on success.
pub fn execute<B, K>(ctx: &AppContext<B, K>, options: &RunOptions) -> RunResult
where
    B: GenerativeBackend,
    K: KeyValueStore,
{
    let outcome = ctx.runner().invoke(&options.task, &options.input);

    let mut unlocked = Vec::new();
    if outcome.is_success()
        && let Ok(spec) = ctx.runner().executor().registry().lookup(&options.task)
        && let Some(id) = &spec.achievement
        && let Some(achievement) = ctx.unlock(id)
    {
        unlocked.push(achievement);
    }

    RunResult { outcome, unlocked }
}

/// Failure result for a run the task would refuse before any backend call.
///
/// Covers unknown tasks, input that fails the input schema, and templates that do not render.
pub fn reject_invalid(registry: &TaskRegistry, options: &RunOptions) -> Option<RunResult> {
    let err = preview_prompt(registry, &options.task, &options.input).err()?;
    Some(RunResult { outcome: failure_outcome(registry, &options.task, &err), unlocked: Vec::new() })
}

/// Render the prompt the task would send, without calling the backend.
pub fn preview(registry: &TaskRegistry, options: &RunOptions) -> Result<RenderedPrompt, AppError> {
    Ok(preview_prompt(registry, &options.task, &options.input)?)
}

/// Read the input record from inline JSON or a file.
pub fn read_input(inline: Option<&str>, file: Option<&Path>) -> Result<Value, AppError> {
    let text = match (inline, file) {
        (Some(inline), None) => inline.to_string(),
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => "{}".to_string(),
        (Some(_), Some(_)) => {
            return Err(AppError::InvalidInput(
                "Use either --input or --input-file, not both".to_string(),
            ));
        }
    };
    parse_input(&text)
}

pub fn parse_input(text: &str) -> Result<Value, AppError> {
    let value: Value = serde_json::from_str(text).map_err(|err| AppError::ParseError {
        what: "task input".to_string(),
        details: err.to_string(),
    })?;
    if !value.is_object() {
        return Err(AppError::InvalidInput("Task input must be a JSON object".to_string()));
    }
    Ok(value)
}

//! API Facade for the application.
//!
//! Each function wires adapters for one operation and runs the matching command.

use std::path::Path;
use std::sync::Arc;

use crate::adapters::{
    FileKeyValueStore, FilesystemActivityStore, HttpGeminiClient, load_builtin_registry,
};
use crate::app::AppContext;
use crate::app::commands::{activity, quiz, run, tasks};
use crate::domain::achievements::{AchievementSummary, AchievementTracker};
use crate::domain::activity::ActivityRecord;
use crate::domain::configuration::load_config;
use crate::domain::models::GenerateQuizOutput;
use crate::domain::prompt::RenderedPrompt;
use crate::domain::{ActionOutcome, ActionRunner, FlowExecutor, TaskRegistry, UserId};

pub use crate::app::commands::quiz::QuizReport;
pub use crate::app::commands::run::{RunOptions, RunResult};
pub use crate::app::commands::tasks::{TaskDescription, TaskSummary};
pub use crate::domain::{AppConfig, AppError};

/// Load configuration relative to the current directory.
pub fn config(explicit: Option<&Path>) -> Result<AppConfig, AppError> {
    load_config(explicit, &std::env::current_dir()?)
}

fn registry() -> Result<Arc<TaskRegistry>, AppError> {
    Ok(Arc::new(load_builtin_registry()?))
}

/// Create an `AppContext` talking to the configured backend on behalf of `user`.
fn create_context(
    config: &AppConfig,
    user: &str,
    registry: Arc<TaskRegistry>,
) -> Result<AppContext<HttpGeminiClient, FileKeyValueStore>, AppError> {
    let user = UserId::new(user)?;
    let backend = HttpGeminiClient::from_env_with_config(&config.backend)?;
    let executor = FlowExecutor::new(registry, backend, config.backend.models());
    let achievements =
        AchievementTracker::new(FileKeyValueStore::for_user(&config.storage.data_dir, &user));
    Ok(AppContext::new(ActionRunner::new(executor), achievements))
}

pub fn list_tasks() -> Result<Vec<TaskSummary>, AppError> {
    Ok(tasks::list(&*registry()?))
}

pub fn describe_task(name: &str) -> Result<TaskDescription, AppError> {
    tasks::describe(&*registry()?, name)
}

/// Render a task's prompt without contacting the backend.
pub fn preview_task(options: &RunOptions) -> Result<RenderedPrompt, AppError> {
    run::preview(&*registry()?, options)
}

/// Run a task. Input the task would refuse fails before the backend client is built.
pub fn run_task(config: &AppConfig, user: &str, options: &RunOptions) -> Result<RunResult, AppError> {
    let registry = registry()?;
    if let Some(rejected) = run::reject_invalid(&registry, options) {
        return Ok(rejected);
    }
    let ctx = create_context(config, user, registry)?;
    Ok(run::execute(&ctx, options))
}

pub fn grade_quiz(
    config: &AppConfig,
    user: &str,
    quiz_record: &GenerateQuizOutput,
    answers: &[Option<u8>],
) -> Result<QuizReport, AppError> {
    let registry = registry()?;
    quiz::check_quiz_record(&registry, quiz_record)?;
    let ctx = create_context(config, user, registry)?;
    quiz::grade(&ctx, quiz_record, answers)
}

pub fn log_activity(config: &AppConfig, user: &str, title: &str, subject: &str) -> ActionOutcome<()> {
    let store = FilesystemActivityStore::new(config.storage.data_dir.clone());
    activity::log(&store, user, title, subject)
}

pub fn list_activities(
    config: &AppConfig,
    user: &str,
    limit: Option<usize>,
) -> Result<Vec<ActivityRecord>, AppError> {
    let store = FilesystemActivityStore::new(config.storage.data_dir.clone());
    activity::list(&store, user, limit)
}

pub fn achievement_summary(config: &AppConfig, user: &str) -> Result<AchievementSummary, AppError> {
    let user = UserId::new(user)?;
    AchievementTracker::new(FileKeyValueStore::for_user(&config.storage.data_dir, &user)).summary()
}

//! eduspark: schema-checked learning tasks on top of a generative model.
//!
//! Every task (quiz, flashcards, essay, tutor answer, ...) is data: an input schema, an
//! output schema, and a prompt template, loaded from the embedded catalog. The
//! [`FlowExecutor`](domain::FlowExecutor) validates input, renders the prompt, makes one
//! backend call and validates the reply; the [`ActionRunner`](domain::ActionRunner) turns
//! every failure into an [`ActionOutcome`](domain::ActionOutcome).

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    QuizReport, RunOptions, RunResult, TaskDescription, TaskSummary, achievement_summary,
    config, describe_task, grade_quiz, list_activities, list_tasks, log_activity, preview_task,
    run_task,
};
pub use domain::{
    ActionOutcome, ActionRunner, AppConfig, AppError, ErrorDetail, FlowError, FlowExecutor,
    GeneratedResult, TaskRegistry, TaskSpec,
};

//! Grade a taken quiz: verify answers through the backend, fall back to the original key.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::app::AppContext;
use crate::domain::achievements::Achievement;
use crate::domain::models::{GenerateQuizInput, GenerateQuizOutput, TaskInput};
use crate::domain::quiz::{self, QuizGrade};
use crate::domain::{ActionOutcome, AppError, TaskRegistry};
use crate::ports::{GenerativeBackend, KeyValueStore};

const UNANSWERED: &str = "-";
const QUIZ_COMPLETED: &str = "quizNovice";
const PERFECT_SCORE: &str = "perfectTen";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizReport {
    #[serde(flatten)]
    pub grade: QuizGrade,
    /// Set when verification failed and the original key was used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_error: Option<String>,
    #[serde(skip)]
    pub unlocked: Vec<&'static Achievement>,
}

/// Load a quiz previously produced by `generate-quiz`.
///
/// Accepts the bare record or the `{"success": true, "data": ...}` envelope printed by `run`.
pub fn load_quiz(path: &Path) -> Result<GenerateQuizOutput, AppError> {
    let content = fs::read_to_string(path)?;
    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|err| AppError::ParseError {
            what: path.display().to_string(),
            details: err.to_string(),
        })?;
    let record = match value.get("data") {
        Some(data) if value.get("success").is_some() => data.clone(),
        _ => value,
    };
    serde_json::from_value(record).map_err(|err| AppError::ParseError {
        what: path.display().to_string(),
        details: err.to_string(),
    })
}

/// Parse `0,2,-,1`: one entry per question, `-` for unanswered.
pub fn parse_answers(list: &str) -> Result<Vec<Option<u8>>, AppError> {
    list.split(',')
        .map(str::trim)
        .map(|entry| {
            if entry == UNANSWERED {
                return Ok(None);
            }
            match entry.parse::<u8>() {
                Ok(index) if index <= 3 => Ok(Some(index)),
                _ => Err(AppError::InvalidInput(format!(
                    "Invalid answer '{}': expected 0-3 or '{}'",
                    entry, UNANSWERED
                ))),
            }
        })
        .collect()
}

/// Verify, grade, and award quiz achievements.
pub fn grade<B, K>(
    ctx: &AppContext<B, K>,
    quiz: &GenerateQuizOutput,
    answers: &[Option<u8>],
) -> Result<QuizReport, AppError>
where
    B: GenerativeBackend,
    K: KeyValueStore,
{
    if answers.len() != quiz.questions.len() {
        return Err(AppError::InvalidInput(format!(
            "Expected {} answers, got {}",
            quiz.questions.len(),
            answers.len()
        )));
    }

    check_quiz_record(ctx.runner().executor().registry(), quiz)?;

    let input = quiz::verification_input(quiz, answers);
    let (verification, verification_error) = match ctx.runner().run(&input) {
        ActionOutcome::Success(verified) => (Some(verified), None),
        ActionOutcome::Failure(detail) => {
            tracing::warn!(error = %detail.message, "verification failed, using original answer key");
            (None, Some(detail.message))
        }
    };

    let grade = quiz::grade(quiz, answers, verification.as_ref());

    let mut unlocked = Vec::new();
    unlocked.extend(ctx.unlock(QUIZ_COMPLETED));
    if grade.is_perfect() {
        unlocked.extend(ctx.unlock(PERFECT_SCORE));
    }

    Ok(QuizReport { grade, verification_error, unlocked })
}

/// Reject a quiz that the `generate-quiz` output schema would not have produced.
pub fn check_quiz_record(registry: &TaskRegistry, quiz: &GenerateQuizOutput) -> Result<(), AppError> {
    let spec = registry.lookup(GenerateQuizInput::TASK)?;
    let record = serde_json::to_value(quiz).map_err(|err| AppError::ParseError {
        what: "quiz record".to_string(),
        details: err.to_string(),
    })?;
    spec.output
        .validate(&record)
        .map(|_| ())
        .map_err(|violations| AppError::InvalidInput(format!("Quiz record is malformed: {}", violations)))
}

//! Typed input/output records for the built-in tasks.
//!
//! Field names follow the wire names declared in the task catalog (camelCase).

mod assessment;
mod problem_solving;
mod tutoring;
mod writing;

pub use assessment::{
    ChapterMaterialInput, ChapterMaterialOutput, Flashcard, GenerateFlashcardsInput,
    GenerateFlashcardsOutput, GenerateQuizInput, GenerateQuizOutput, MultipleChoiceQuestion,
    PaperQuestion, PaperSection, QuestionAndAnswer, QuestionPaperInput, QuestionPaperOutput,
    QuizQuestion, VerifiedQuestionResult, VerifyQuizAnswersInput, VerifyQuizAnswersOutput,
};
pub use problem_solving::{
    GenerateCodeInput, GenerateCodeOutput, SolveMathProblemInput, SolveMathProblemOutput,
    VisualizeConceptInput, VisualizeConceptOutput,
};
pub use tutoring::{
    AskQuestionInput, AskQuestionOutput, RecommendContentInput, RecommendContentOutput,
    StudyPlanInput, StudyPlanOutput,
};
pub use writing::{
    DebateTopicsInput, DebateTopicsOutput, EssayLength, EssayStyle, GenerateEssayInput,
    GenerateEssayOutput, GenerateStoryInput, GenerateStoryOutput, StoryGenre, SummarizeTextInput,
    SummarizeTextOutput,
};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// An input record bound to the task that consumes it.
pub trait TaskInput: Serialize {
    /// Registered task name.
    const TASK: &'static str;
    type Output: DeserializeOwned;
}

macro_rules! task_input {
    ($input:ty => $output:ty, $task:literal) => {
        impl $crate::domain::models::TaskInput for $input {
            const TASK: &'static str = $task;
            type Output = $output;
        }
    };
}

pub(crate) use task_input;

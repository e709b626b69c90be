use serde::{Deserialize, Serialize};

use super::task_input;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizInput {
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_text: Option<String>,
    pub num_questions: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer_index: u8,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizOutput {
    pub quiz_title: String,
    pub questions: Vec<QuizQuestion>,
}

task_input!(GenerateQuizInput => GenerateQuizOutput, "generate-quiz");

/// One question with the user's pick, as sent to the verifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAndAnswer {
    pub question_text: String,
    pub options: Vec<String>,
    /// `None` when unanswered; serialized as `null`.
    pub user_selected_option_index: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyQuizAnswersInput {
    pub questions_and_user_answers: Vec<QuestionAndAnswer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedQuestionResult {
    pub is_user_choice_correct: bool,
    pub verified_correct_answer_index: u8,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyQuizAnswersOutput {
    pub verified_results: Vec<VerifiedQuestionResult>,
}

task_input!(VerifyQuizAnswersInput => VerifyQuizAnswersOutput, "verify-quiz-answers");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFlashcardsInput {
    pub source_text: String,
    pub num_flashcards: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFlashcardsOutput {
    pub suggested_title: String,
    pub flashcards: Vec<Flashcard>,
}

task_input!(GenerateFlashcardsInput => GenerateFlashcardsOutput, "generate-flashcards");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterMaterialInput {
    pub class_name: String,
    pub subject: String,
    pub chapter_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleChoiceQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer_index: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterMaterialOutput {
    pub summary: String,
    pub questions: Vec<String>,
    pub mcqs: Vec<MultipleChoiceQuestion>,
}

task_input!(ChapterMaterialInput => ChapterMaterialOutput, "generate-chapter-material");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPaperInput {
    pub class_name: String,
    pub subject: String,
    pub exam_type: String,
    pub total_marks: u32,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_topics: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_material_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperQuestion {
    pub question_text: String,
    pub question_type: String,
    pub marks: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_key_points: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperSection {
    pub section_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_instructions: Option<String>,
    pub questions: Vec<PaperQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPaperOutput {
    pub title: String,
    pub total_marks: u64,
    pub duration: String,
    pub general_instructions: String,
    pub sections: Vec<PaperSection>,
}

task_input!(QuestionPaperInput => QuestionPaperOutput, "generate-question-paper");

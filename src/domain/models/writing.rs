use serde::{Deserialize, Serialize};

use super::task_input;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EssayLength {
    Short,
    Medium,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EssayStyle {
    Academic,
    Persuasive,
    Narrative,
    Descriptive,
    Expository,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoryGenre {
    Fantasy,
    SciFi,
    Mystery,
    Adventure,
    Comedy,
    Drama,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateEssayInput {
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub essay_length: Option<EssayLength>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<EssayStyle>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateEssayOutput {
    pub title_suggestion: String,
    pub essay: String,
}

task_input!(GenerateEssayInput => GenerateEssayOutput, "generate-essay");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateStoryInput {
    pub main_character: String,
    pub setting: String,
    pub genre: StoryGenre,
    /// Same scale as essay length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_length: Option<EssayLength>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateStoryOutput {
    pub title: String,
    pub story_text: String,
}

task_input!(GenerateStoryInput => GenerateStoryOutput, "generate-story");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeTextInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter_name: Option<String>,
    pub text_to_summarize: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_length: Option<EssayLength>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeTextOutput {
    pub summary: String,
}

task_input!(SummarizeTextInput => SummarizeTextOutput, "summarize-text");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebateTopicsInput {
    pub subject_area: String,
    pub num_topics: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebateTopicsOutput {
    pub suggested_title: String,
    pub topics: Vec<String>,
}

task_input!(DebateTopicsInput => DebateTopicsOutput, "suggest-debate-topics");

use serde::{Deserialize, Serialize};

use super::task_input;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskQuestionInput {
    pub question: String,
    pub learning_material: String,
    /// `data:<mimetype>;base64,<data>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskQuestionOutput {
    pub answer: String,
}

task_input!(AskQuestionInput => AskQuestionOutput, "ask-question");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendContentInput {
    pub learning_history: String,
    pub preferences: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendContentOutput {
    pub recommended_materials: String,
}

task_input!(RecommendContentInput => RecommendContentOutput, "recommend-content");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlanInput {
    pub student_performance: String,
    pub learning_goals: String,
    pub available_materials: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlanOutput {
    pub study_plan: String,
}

task_input!(StudyPlanInput => StudyPlanOutput, "generate-study-plan");

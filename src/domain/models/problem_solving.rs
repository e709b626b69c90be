use serde::{Deserialize, Serialize};

use super::task_input;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveMathProblemInput {
    pub problem_statement: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveMathProblemOutput {
    /// e.g. "Algebra", "Calculus"
    pub problem_type: String,
    pub step_by_step_solution: String,
    pub final_answer: String,
}

task_input!(SolveMathProblemInput => SolveMathProblemOutput, "solve-math-problem");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCodeInput {
    pub language: String,
    pub problem_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCodeOutput {
    pub generated_code: String,
    pub explanation: String,
}

task_input!(GenerateCodeInput => GenerateCodeOutput, "generate-code");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizeConceptInput {
    pub concept_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizeConceptOutput {
    /// Data URI of the generated image, or a placeholder URL when degraded.
    pub image_data_uri: String,
    pub text_feedback: String,
}

task_input!(VisualizeConceptInput => VisualizeConceptOutput, "visualize-concept");

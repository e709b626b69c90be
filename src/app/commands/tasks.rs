//! Catalog inspection: list tasks and describe their schemas.

use serde::Serialize;
use serde_json::Value;

use crate::domain::task::ModelClass;
use crate::domain::{AppError, TaskRegistry};

#[derive(Debug, Clone, Serialize)]
pub struct TaskSummary {
    pub name: String,
    pub description: String,
    pub model: ModelClass,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDescription {
    pub name: String,
    pub description: String,
    pub model: ModelClass,
    pub failure_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achievement: Option<String>,
    pub input: Value,
    pub output: Value,
}

/// Registered tasks in name order.
pub fn list(registry: &TaskRegistry) -> Vec<TaskSummary> {
    registry
        .iter()
        .map(|spec| TaskSummary {
            name: spec.name.to_string(),
            description: spec.description.clone(),
            model: spec.model,
        })
        .collect()
}

pub fn describe(registry: &TaskRegistry, name: &str) -> Result<TaskDescription, AppError> {
    let spec = registry.lookup(name)?;
    Ok(TaskDescription {
        name: spec.name.to_string(),
        description: spec.description.clone(),
        model: spec.model,
        failure_message: spec.failure_message.clone(),
        achievement: spec.achievement.clone(),
        input: spec.input.describe(),
        output: spec.output.describe(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::adapters::load_builtin_registry;

    #[test]
    fn lists_builtin_tasks_in_order() {
        let registry = load_builtin_registry().unwrap();
        let tasks = list(&registry);
        assert_eq!(tasks.len(), 15);
        assert_eq!(tasks[0].name, "ask-question");
        assert!(tasks.iter().any(|task| task.name == "visualize-concept" && task.model == ModelClass::Image));
    }

    #[test]
    fn describes_quiz_schemas() {
        let registry = load_builtin_registry().unwrap();
        let described = describe(&registry, "generate-quiz").unwrap();

        assert_eq!(described.failure_message, "Failed to generate quiz");
        assert_eq!(described.input["properties"]["numQuestions"]["maximum"], json!(10));
        assert_eq!(
            described.output["properties"]["questions"]["items"]["properties"]["options"]["minItems"],
            json!(4)
        );
    }

    #[test]
    fn unknown_task_is_an_error() {
        let registry = load_builtin_registry().unwrap();
        let err = describe(&registry, "write-poem").unwrap_err();
        assert!(err.to_string().contains("write-poem"));
    }
}

use std::collections::BTreeMap;
use std::sync::Arc;

use super::spec::{OutputMode, TaskSpec};
use crate::domain::flow::FlowError;
use crate::domain::prompt;

/// Task specifications keyed by unique name.
///
/// Built once at start-up and shared read-only afterwards.
#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: BTreeMap<String, Arc<TaskSpec>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task after checking its templates against its schemas.
    pub fn register(&mut self, spec: TaskSpec) -> Result<(), FlowError> {
        let key = spec.name.as_str().to_string();
        if self.tasks.contains_key(&key) {
            return Err(FlowError::DuplicateTask(key));
        }

        prompt::check_templates(&spec)?;
        check_media_fields(&spec)?;

        self.tasks.insert(key, Arc::new(spec));
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<Arc<TaskSpec>, FlowError> {
        self.tasks.get(name).cloned().ok_or_else(|| FlowError::UnknownTask(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tasks.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskSpec> {
        self.tasks.values().map(Arc::as_ref)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

fn check_media_fields(spec: &TaskSpec) -> Result<(), FlowError> {
    if let Some(field) = &spec.media_input
        && spec.input.field(field).is_none()
    {
        return Err(FlowError::TemplateFieldMissing {
            task: spec.name.to_string(),
            field: field.clone(),
        });
    }

    if let OutputMode::Media(media) = &spec.output_mode {
        for field in [&media.media_field, &media.text_field] {
            if spec.output.field(field).is_none() {
                return Err(FlowError::Template {
                    task: spec.name.to_string(),
                    reason: format!("media output field '{}' is not in the output schema", field),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identities::TaskName;
    use crate::domain::schema::{Field, ObjectSchema, Schema};
    use crate::domain::task::{MediaOutput, Placeholder};

    fn summarize_spec() -> TaskSpec {
        TaskSpec::new(
            TaskName::new("summarize-text").unwrap(),
            ObjectSchema::new(vec![Field::required("textToSummarize", Schema::string())]),
            ObjectSchema::new(vec![Field::required("summary", Schema::string())]),
            "Summarize:\n{{ textToSummarize }}",
        )
    }

    #[test]
    fn lookup_returns_registered_schemas() {
        let spec = summarize_spec();
        let mut registry = TaskRegistry::new();
        registry.register(spec.clone()).unwrap();

        let found = registry.lookup("summarize-text").unwrap();
        assert_eq!(found.input, spec.input);
        assert_eq!(found.output, spec.output);
        assert_eq!(found.prompt_template, spec.prompt_template);
    }

    #[test]
    fn duplicate_registration_is_rejected_and_original_kept() {
        let mut registry = TaskRegistry::new();
        registry.register(summarize_spec()).unwrap();

        let mut changed = summarize_spec();
        changed.output = ObjectSchema::new(vec![Field::required("other", Schema::string())]);
        let err = registry.register(changed).unwrap_err();

        assert!(matches!(err, FlowError::DuplicateTask(name) if name == "summarize-text"));
        let kept = registry.lookup("summarize-text").unwrap();
        assert!(kept.output.field("summary").is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn identical_duplicate_is_also_rejected() {
        let mut registry = TaskRegistry::new();
        registry.register(summarize_spec()).unwrap();
        assert!(matches!(
            registry.register(summarize_spec()),
            Err(FlowError::DuplicateTask(_))
        ));
    }

    #[test]
    fn unknown_task_lookup_fails() {
        let registry = TaskRegistry::new();
        assert!(matches!(registry.lookup("nope"), Err(FlowError::UnknownTask(name)) if name == "nope"));
    }

    #[test]
    fn template_referencing_undeclared_field_is_rejected() {
        let mut spec = summarize_spec();
        spec.prompt_template = "Summarize {{ chapterTitle }}".to_string();

        let err = TaskRegistry::new().register(spec).unwrap_err();
        assert!(matches!(
            err,
            FlowError::TemplateFieldMissing { field, .. } if field == "chapterTitle"
        ));
    }

    #[test]
    fn media_input_must_be_declared() {
        let spec = summarize_spec().with_media_input("imageDataUri");
        let err = TaskRegistry::new().register(spec).unwrap_err();
        assert!(matches!(err, FlowError::TemplateFieldMissing { .. }));
    }

    #[test]
    fn media_output_fields_must_be_declared() {
        let spec = summarize_spec().with_media_output(
            MediaOutput {
                media_field: "imageDataUri".into(),
                text_field: "summary".into(),
                success_text: "done".into(),
            },
            Placeholder { media_reference: "https://placehold.co/1.png".into(), text: "n/a".into() },
        );
        let err = TaskRegistry::new().register(spec).unwrap_err();
        assert!(matches!(err, FlowError::Template { .. }));
    }

    #[test]
    fn names_are_sorted() {
        let mut registry = TaskRegistry::new();
        let mut second = summarize_spec();
        second.name = TaskName::new("ask-question").unwrap();
        registry.register(summarize_spec()).unwrap();
        registry.register(second).unwrap();

        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["ask-question", "summarize-text"]);
    }
}

//! Prompt rendering for task templates.
//!
//! Templates are minijinja sources declared per task. `{% if field %}` blocks cover
//! optional inputs, and the `json` filter serializes structured values with sorted keys
//! so the same input always yields the same text.

use minijinja::{Environment, ErrorKind};
use serde_json::Value;

use crate::domain::flow::FlowError;
use crate::domain::schema::{InlineMedia, SchemaViolations};
use crate::domain::task::TaskSpec;

/// The literal instruction payload for one backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    pub system: Option<String>,
    pub text: String,
    pub media: Option<InlineMedia>,
}

/// Verify that every variable referenced by the task's templates is an input field.
pub fn check_templates(spec: &TaskSpec) -> Result<(), FlowError> {
    let env = environment();
    for source in templates(spec) {
        let template = env.template_from_str(source).map_err(|err| FlowError::Template {
            task: spec.name.to_string(),
            reason: err.to_string(),
        })?;

        let mut referenced: Vec<String> = template.undeclared_variables(false).into_iter().collect();
        referenced.sort();
        if let Some(field) = referenced.into_iter().find(|name| spec.input.field(name).is_none()) {
            return Err(FlowError::TemplateFieldMissing { task: spec.name.to_string(), field });
        }
    }
    Ok(())
}

/// Render the system and user prompt for an already validated input record.
pub fn render(spec: &TaskSpec, input: &Value) -> Result<RenderedPrompt, FlowError> {
    check_templates(spec)?;

    let mut context = input.clone();
    let media = match &spec.media_input {
        Some(field) => extract_media(spec, field, &mut context)?,
        None => None,
    };

    let env = environment();
    let render_one = |source: &str| {
        env.render_str(source, &context).map_err(|err| FlowError::Template {
            task: spec.name.to_string(),
            reason: err.to_string(),
        })
    };

    let text = render_one(&spec.prompt_template)?;
    let system = spec.system_template.as_deref().map(render_one).transpose()?;

    Ok(RenderedPrompt { system, text: text.trim().to_string(), media })
}

fn templates(spec: &TaskSpec) -> impl Iterator<Item = &str> {
    std::iter::once(spec.prompt_template.as_str()).chain(spec.system_template.as_deref())
}

/// Lift the inline image out of the context, leaving a short marker in its place.
fn extract_media(
    spec: &TaskSpec,
    field: &str,
    context: &mut Value,
) -> Result<Option<InlineMedia>, FlowError> {
    let Some(slot) = context.get_mut(field) else {
        return Ok(None);
    };
    let Some(uri) = slot.as_str() else {
        return Ok(None);
    };

    let media = InlineMedia::from_data_uri(uri).map_err(|err| FlowError::InputValidation {
        task: spec.name.to_string(),
        violations: SchemaViolations::single(field, err.to_string()),
    })?;
    *slot = Value::String(format!("[inline image: {}]", media.mime_type));
    Ok(Some(media))
}

fn environment<'source>() -> Environment<'source> {
    let mut env = Environment::new();
    env.add_filter("json", to_json);
    env
}

fn to_json(value: minijinja::Value) -> Result<String, minijinja::Error> {
    serde_json::to_string_pretty(&value)
        .map_err(|err| minijinja::Error::new(ErrorKind::InvalidOperation, err.to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::identities::TaskName;
    use crate::domain::schema::{Field, ObjectSchema, Schema, StringFormat};

    fn quiz_spec() -> TaskSpec {
        TaskSpec::new(
            TaskName::new("generate-quiz").unwrap(),
            ObjectSchema::new(vec![
                Field::required("topic", Schema::string()),
                Field::optional("contextText", Schema::string()),
                Field::required("numQuestions", Schema::integer_between(1, 10)),
            ]),
            ObjectSchema::default(),
            "Generate a quiz with {{ numQuestions }} questions on \"{{ topic }}\".\n\
             {% if contextText %}Use this context:\n---\n{{ contextText }}\n---{% endif %}",
        )
    }

    #[test]
    fn renders_required_fields() {
        let prompt =
            render(&quiz_spec(), &json!({"topic": "Photosynthesis", "numQuestions": 5})).unwrap();
        assert_eq!(prompt.text, "Generate a quiz with 5 questions on \"Photosynthesis\".");
        assert!(prompt.system.is_none());
        assert!(prompt.media.is_none());
    }

    #[test]
    fn conditional_block_appears_only_when_field_present() {
        let with_context = render(
            &quiz_spec(),
            &json!({"topic": "Cells", "numQuestions": 2, "contextText": "Mitochondria"}),
        )
        .unwrap();
        assert!(with_context.text.contains("Use this context:\n---\nMitochondria\n---"));

        let without = render(&quiz_spec(), &json!({"topic": "Cells", "numQuestions": 2})).unwrap();
        assert!(!without.text.contains("Use this context"));
    }

    #[test]
    fn json_filter_is_deterministic() {
        let spec = TaskSpec::new(
            TaskName::new("verify-quiz-answers").unwrap(),
            ObjectSchema::new(vec![Field::required(
                "questionsAndUserAnswers",
                Schema::array_of(Schema::string()),
            )]),
            ObjectSchema::default(),
            "Quiz data:\n{{ questionsAndUserAnswers | json }}",
        );

        let first: Value = serde_json::from_str(
            r#"{"questionsAndUserAnswers":[{"questionText":"Q","options":["a","b","c","d"],"userSelectedOptionIndex":null}]}"#,
        )
        .unwrap();
        let second: Value = serde_json::from_str(
            r#"{"questionsAndUserAnswers":[{"userSelectedOptionIndex":null,"options":["a","b","c","d"],"questionText":"Q"}]}"#,
        )
        .unwrap();

        let a = render(&spec, &first).unwrap();
        let b = render(&spec, &second).unwrap();
        assert_eq!(a.text, b.text);
        assert!(a.text.contains("\"userSelectedOptionIndex\": null"));
    }

    #[test]
    fn inline_image_is_lifted_out_of_the_text() {
        let spec = TaskSpec::new(
            TaskName::new("ask-question").unwrap(),
            ObjectSchema::new(vec![
                Field::required("question", Schema::string()),
                Field::optional("imageDataUri", Schema::formatted(StringFormat::DataUri)),
            ]),
            ObjectSchema::default(),
            "{% if imageDataUri %}[Image attached]{% endif %}\nUser Question: {{ question }}",
        )
        .with_media_input("imageDataUri");

        let prompt = render(
            &spec,
            &json!({"question": "What is this?", "imageDataUri": "data:image/png;base64,AAAA"}),
        )
        .unwrap();

        let media = prompt.media.unwrap();
        assert_eq!(media.mime_type, "image/png");
        assert_eq!(media.data, "AAAA");
        assert!(prompt.text.starts_with("[Image attached]"));
        assert!(!prompt.text.contains("AAAA"));
    }

    #[test]
    fn system_template_is_rendered() {
        let spec = quiz_spec().with_system("You write quizzes about {{ topic }}.");
        let prompt = render(&spec, &json!({"topic": "Cells", "numQuestions": 1})).unwrap();
        assert_eq!(prompt.system.as_deref(), Some("You write quizzes about Cells."));
    }

    #[test]
    fn undeclared_field_fails_render() {
        let mut spec = quiz_spec();
        spec.prompt_template = "{{ difficulty }}".to_string();
        let err = render(&spec, &json!({"topic": "Cells", "numQuestions": 1})).unwrap_err();
        assert!(matches!(err, FlowError::TemplateFieldMissing { field, .. } if field == "difficulty"));
    }

    #[test]
    fn syntax_error_is_reported() {
        let mut spec = quiz_spec();
        spec.prompt_template = "{% if topic %}unterminated".to_string();
        assert!(matches!(check_templates(&spec), Err(FlowError::Template { .. })));
    }
}

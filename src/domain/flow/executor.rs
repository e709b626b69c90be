use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::FlowError;
use super::response::parse_json_payload;
use crate::domain::identities::TaskName;
use crate::domain::prompt::{self, RenderedPrompt};
use crate::domain::schema::SchemaViolations;
use crate::domain::task::{
    FailurePolicy, MediaOutput, ModelClass, OutputMode, Placeholder, TaskRegistry, TaskSpec,
};
use crate::ports::{BackendError, GenerationRequest, GenerativeBackend, Modality};

/// Model identifiers used for each model class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSelection {
    pub text: String,
    pub image: String,
}

impl ModelSelection {
    pub fn for_class(&self, class: ModelClass) -> &str {
        match class {
            ModelClass::Text => &self.text,
            ModelClass::Image => &self.image,
        }
    }
}

/// Output of one task invocation, already checked against the task's output schema.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedResult {
    pub task: TaskName,
    pub data: Value,
    /// Set when the record is a placeholder substituted after a backend failure.
    pub degraded: bool,
}

impl GeneratedResult {
    /// Deserialize the record into its typed model.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.data)
    }
}

/// Serializes as the bare output record.
impl Serialize for GeneratedResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.data.serialize(serializer)
    }
}

/// Look up `task`, validate `input`, and render its prompt.
pub fn preview_prompt(
    registry: &TaskRegistry,
    task: &str,
    input: &Value,
) -> Result<RenderedPrompt, FlowError> {
    let spec = registry.lookup(task)?;
    let input = validate_input(&spec, input)?;
    prompt::render(&spec, &input)
}

/// Runs registered tasks: validate input, render, call the backend once, validate output.
pub struct FlowExecutor<B> {
    registry: Arc<TaskRegistry>,
    backend: B,
    models: ModelSelection,
}

impl<B: GenerativeBackend> FlowExecutor<B> {
    pub fn new(registry: Arc<TaskRegistry>, backend: B, models: ModelSelection) -> Self {
        Self { registry, backend, models }
    }

    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Execute `task` with an untyped input record.
    pub fn execute(&self, task: &str, input: &Value) -> Result<GeneratedResult, FlowError> {
        let spec = self.registry.lookup(task)?;
        let input = validate_input(&spec, input)?;
        let prompt = prompt::render(&spec, &input)?;

        match &spec.output_mode {
            OutputMode::Structured => self.generate_structured(&spec, prompt),
            OutputMode::Media(media) => self.generate_media(&spec, media, prompt),
        }
    }

    /// Execute `task` with typed input and output records.
    pub fn execute_typed<I, O>(&self, task: &str, input: &I) -> Result<O, FlowError>
    where
        I: Serialize,
        O: DeserializeOwned,
    {
        let value = serde_json::to_value(input).map_err(|err| FlowError::InputValidation {
            task: task.to_string(),
            violations: SchemaViolations::single("$", err.to_string()),
        })?;

        let result = self.execute(task, &value)?;
        result.parse().map_err(|err| FlowError::SchemaViolation {
            task: task.to_string(),
            detail: err.to_string(),
        })
    }

    /// Validate and render without calling the backend.
    pub fn preview(&self, task: &str, input: &Value) -> Result<RenderedPrompt, FlowError> {
        preview_prompt(&self.registry, task, input)
    }

    fn request(&self, spec: &TaskSpec, prompt: RenderedPrompt, modality: Modality) -> GenerationRequest {
        GenerationRequest {
            model: self.models.for_class(spec.model).to_string(),
            system: prompt.system,
            prompt: prompt.text,
            media: prompt.media,
            output_schema: match modality {
                Modality::Text => Some(spec.output.clone()),
                Modality::Image => None,
            },
            modality,
        }
    }

    fn generate_structured(
        &self,
        spec: &TaskSpec,
        prompt: RenderedPrompt,
    ) -> Result<GeneratedResult, FlowError> {
        let request = self.request(spec, prompt, Modality::Text);
        tracing::debug!(task = %spec.name, model = %request.model, "calling generative backend");

        let response = self.backend.generate(request).map_err(|err| backend_failure(spec, err))?;
        let text = response
            .text
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| FlowError::EmptyResponse(spec.name.to_string()))?;

        let payload = parse_json_payload(&text).map_err(|detail| {
            tracing::warn!(task = %spec.name, %detail, "unparseable backend response");
            FlowError::SchemaViolation { task: spec.name.to_string(), detail }
        })?;

        let data = spec.output.validate(&payload).map_err(|violations| {
            tracing::warn!(task = %spec.name, %violations, "backend response violates output schema");
            FlowError::SchemaViolation { task: spec.name.to_string(), detail: violations.to_string() }
        })?;

        Ok(GeneratedResult { task: spec.name.clone(), data, degraded: false })
    }

    fn generate_media(
        &self,
        spec: &TaskSpec,
        media: &MediaOutput,
        prompt: RenderedPrompt,
    ) -> Result<GeneratedResult, FlowError> {
        let err = match self.try_generate_media(spec, media, prompt) {
            Ok(result) => return Ok(result),
            Err(err) => err,
        };

        match &spec.on_failure {
            FailurePolicy::Substitute(placeholder) if err.is_backend_failure() => {
                tracing::warn!(
                    task = %spec.name,
                    kind = err.kind().as_str(),
                    error = %err,
                    "media generation failed, substituting placeholder"
                );
                substitute(spec, media, placeholder).ok_or(err)
            }
            _ => Err(err),
        }
    }

    fn try_generate_media(
        &self,
        spec: &TaskSpec,
        media: &MediaOutput,
        prompt: RenderedPrompt,
    ) -> Result<GeneratedResult, FlowError> {
        let request = self.request(spec, prompt, Modality::Image);
        tracing::debug!(task = %spec.name, model = %request.model, "calling generative backend for media");

        let response = self.backend.generate(request).map_err(|err| backend_failure(spec, err))?;
        let generated =
            response.media.ok_or_else(|| FlowError::EmptyResponse(spec.name.to_string()))?;

        let record = media_record(media, generated.to_data_uri(), media.success_text.clone());
        let data = spec.output.validate(&record).map_err(|violations| FlowError::SchemaViolation {
            task: spec.name.to_string(),
            detail: violations.to_string(),
        })?;

        Ok(GeneratedResult { task: spec.name.clone(), data, degraded: false })
    }
}

fn validate_input(spec: &TaskSpec, input: &Value) -> Result<Value, FlowError> {
    spec.input.validate(input).map_err(|violations| {
        tracing::debug!(task = %spec.name, %violations, "input rejected");
        FlowError::InputValidation { task: spec.name.to_string(), violations }
    })
}

fn backend_failure(spec: &TaskSpec, err: BackendError) -> FlowError {
    match err {
        BackendError::Unavailable { status, message } => {
            FlowError::BackendUnavailable { task: spec.name.to_string(), status, message }
        }
        BackendError::Timeout(message) => {
            FlowError::BackendTimeout { task: spec.name.to_string(), message }
        }
    }
}

fn media_record(media: &MediaOutput, reference: String, text: String) -> Value {
    let mut record = Map::new();
    record.insert(media.media_field.clone(), Value::String(reference));
    record.insert(media.text_field.clone(), Value::String(text));
    Value::Object(record)
}

/// Placeholder record, only if it satisfies the output schema itself.
fn substitute(spec: &TaskSpec, media: &MediaOutput, placeholder: &Placeholder) -> Option<GeneratedResult> {
    let record =
        media_record(media, placeholder.media_reference.clone(), placeholder.text.clone());
    match spec.output.validate(&record) {
        Ok(data) => Some(GeneratedResult { task: spec.name.clone(), data, degraded: true }),
        Err(violations) => {
            tracing::error!(task = %spec.name, %violations, "placeholder violates output schema");
            None
        }
    }
}

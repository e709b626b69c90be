use std::sync::{Arc, Mutex};

use eduspark::adapters::load_builtin_registry;
use eduspark::domain::flow::FailureKind;
use eduspark::domain::identities::TaskName;
use eduspark::domain::schema::{Field, ObjectSchema, Schema};
use eduspark::domain::{ModelSelection, TaskRegistry, TaskSpec};
use eduspark::ports::{
    BackendError, GenerationRequest, GenerationResponse, GenerativeBackend, Modality,
};
use eduspark::{ActionOutcome, ActionRunner, FlowError, FlowExecutor};
use serde_json::{Value, json};

/// Backend answering every call with one canned reply and recording requests.
#[derive(Clone)]
struct StubBackend {
    reply: Result<GenerationResponse, BackendError>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl StubBackend {
    fn text(text: &str) -> Self {
        Self::new(Ok(GenerationResponse { text: Some(text.to_string()), media: None }))
    }

    fn failing() -> Self {
        Self::new(Err(BackendError::Unavailable { status: Some(503), message: "overloaded".into() }))
    }

    fn new(reply: Result<GenerationResponse, BackendError>) -> Self {
        Self { reply, requests: Arc::new(Mutex::new(Vec::new())) }
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl GenerativeBackend for StubBackend {
    fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, BackendError> {
        self.requests.lock().unwrap().push(request);
        self.reply.clone()
    }
}

fn runner(backend: StubBackend) -> ActionRunner<StubBackend> {
    let registry = Arc::new(load_builtin_registry().unwrap());
    let models = ModelSelection { text: "text-model".into(), image: "image-model".into() };
    ActionRunner::new(FlowExecutor::new(registry, backend, models))
}

fn quiz_reply(count: usize) -> String {
    let questions: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "question": format!("What is step {} of photosynthesis?", i + 1),
                "options": ["a", "b", "c", "d"],
                "correctAnswerIndex": 1,
                "explanation": "Because."
            })
        })
        .collect();
    json!({"quizTitle": "Photosynthesis", "questions": questions}).to_string()
}

#[test]
fn quiz_generation_succeeds_with_requested_count() {
    let backend = StubBackend::text(&quiz_reply(5));
    let outcome = runner(backend.clone())
        .invoke("generate-quiz", &json!({"topic": "Photosynthesis", "numQuestions": 5}));

    let result = outcome.success().expect("quiz should succeed");
    assert_eq!(result.data["questions"].as_array().unwrap().len(), 5);
    assert!(!result.degraded);

    let requests = backend.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].model, "text-model");
    assert_eq!(requests[0].modality, Modality::Text);
    assert!(requests[0].prompt.contains("5 multiple-choice questions"));
}

#[test]
fn visualize_concept_substitutes_placeholder_on_backend_failure() {
    let backend = StubBackend::failing();
    let outcome = runner(backend.clone())
        .invoke("visualize-concept", &json!({"conceptDescription": "gravity"}));

    let result = outcome.success().expect("placeholder is a success");
    assert!(result.degraded);
    assert_eq!(result.data["imageDataUri"], "https://placehold.co/1024x576.png");
    assert_eq!(backend.calls(), 1);
    assert_eq!(backend.requests.lock().unwrap()[0].modality, Modality::Image);
}

#[test]
fn invalid_enum_never_reaches_backend() {
    let backend = StubBackend::text("{}");
    let outcome = runner(backend.clone()).invoke(
        "generate-essay",
        &json!({"topic": "Rivers", "essayLength": "short", "style": "ZZZ"}),
    );

    let error = outcome.error().expect("invalid input must fail");
    assert_eq!(error.kind, FailureKind::InputValidation);
    assert!(error.message.starts_with("[generate-essay] Failed to generate essay"));
    assert_eq!(backend.calls(), 0);
}

#[test]
fn reply_missing_required_field_is_output_violation() {
    let backend = StubBackend::text(r#"{"titleSuggestion": "Rivers"}"#);
    let outcome = runner(backend).invoke("generate-essay", &json!({"topic": "Rivers"}));

    assert!(matches!(
        outcome,
        ActionOutcome::Failure(ref detail) if detail.kind == FailureKind::SchemaViolation
    ));
}

#[test]
fn hard_failure_surfaces_backend_error() {
    let outcome = runner(StubBackend::failing()).invoke("summarize-text", &json!({"textToSummarize": "abc"}));

    let error = outcome.error().unwrap();
    assert_eq!(error.kind, FailureKind::BackendUnavailable);
    assert!(error.message.starts_with("[summarize-text] Failed to summarize text"));
}

#[test]
fn unknown_task_is_a_failure() {
    let backend = StubBackend::text("{}");
    let outcome = runner(backend.clone()).invoke("write-poem", &json!({}));

    assert_eq!(outcome.error().unwrap().kind, FailureKind::Configuration);
    assert!(outcome.error().unwrap().message.contains("unknown task 'write-poem'"));
    assert_eq!(backend.calls(), 0);
}

#[test]
fn custom_task_registers_once() {
    let spec = || {
        TaskSpec::new(
            TaskName::new("define-word").unwrap(),
            ObjectSchema::new(vec![Field::required("word", Schema::string())]),
            ObjectSchema::new(vec![Field::required("definition", Schema::string())]),
            "Define the word {{ word }}.",
        )
    };

    let mut registry = TaskRegistry::new();
    registry.register(spec()).unwrap();
    assert!(registry.lookup("define-word").is_ok());
    assert!(matches!(registry.register(spec()), Err(FlowError::DuplicateTask(name)) if name == "define-word"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn template_referencing_unknown_field_is_rejected() {
    let spec = TaskSpec::new(
        TaskName::new("define-word").unwrap(),
        ObjectSchema::new(vec![Field::required("word", Schema::string())]),
        ObjectSchema::new(vec![Field::required("definition", Schema::string())]),
        "Define the word {{ term }}.",
    );

    let mut registry = TaskRegistry::new();
    assert!(registry.register(spec).is_err());
    assert!(registry.is_empty());
}

//! Generative backend port definition.

use thiserror::Error;

use crate::domain::schema::{InlineMedia, ObjectSchema};

/// Requested response modality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modality {
    /// Structured text (JSON) answer.
    #[default]
    Text,
    /// Generated image, optionally with text.
    Image,
}

/// Request sent to a generative backend.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Model identifier (e.g., "gemini-2.0-flash").
    pub model: String,
    /// System instruction, if the task declares one.
    pub system: Option<String>,
    /// Rendered user prompt.
    pub prompt: String,
    /// Inline image attached to the prompt.
    pub media: Option<InlineMedia>,
    /// Shape the structured answer must take.
    pub output_schema: Option<ObjectSchema>,
    pub modality: Modality,
}

/// Raw reply from a generative backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResponse {
    pub text: Option<String>,
    pub media: Option<InlineMedia>,
}

#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// Transport failure or non-success status.
    #[error("{message}")]
    Unavailable { status: Option<u16>, message: String },
    /// The request exceeded its deadline.
    #[error("{0}")]
    Timeout(String),
}

/// Port for generative model calls.
pub trait GenerativeBackend {
    /// Perform exactly one generation call.
    fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, BackendError>;
}

impl<T: GenerativeBackend + ?Sized> GenerativeBackend for Box<T> {
    fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, BackendError> {
        (**self).generate(request)
    }
}

impl<T: GenerativeBackend + ?Sized> GenerativeBackend for &T {
    fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, BackendError> {
        (**self).generate(request)
    }
}

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::schema::InlineMedia;
use crate::ports::{BackendError, GenerationRequest, GenerationResponse, GenerativeBackend};

/// Scripted backend that records every request it receives.
///
/// Replies are consumed in order; once exhausted, calls fail as unavailable.
#[derive(Clone, Default)]
pub struct FakeBackend {
    replies: Arc<Mutex<VecDeque<Result<GenerationResponse, BackendError>>>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.push(Ok(GenerationResponse { text: Some(text.into()), media: None }))
    }

    pub fn with_media(self, mime_type: &str, data: &str) -> Self {
        let media = InlineMedia { mime_type: mime_type.to_string(), data: data.to_string() };
        self.push(Ok(GenerationResponse { text: None, media: Some(media) }))
    }

    pub fn with_error(self, error: BackendError) -> Self {
        self.push(Err(error))
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn push(self, reply: Result<GenerationResponse, BackendError>) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }
}

impl GenerativeBackend for FakeBackend {
    fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, BackendError> {
        self.requests.lock().unwrap().push(request);
        self.replies.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(BackendError::Unavailable { status: None, message: "no scripted reply".into() })
        })
    }
}

use serde::{Deserialize, Serialize};

use crate::domain::identities::TaskName;
use crate::domain::schema::ObjectSchema;

/// Which backend model family serves a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelClass {
    #[default]
    Text,
    Image,
}

/// How the backend reply is turned into the output record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// The backend answers with JSON matching the output schema.
    Structured,
    /// The backend answers with binary media; the record is assembled from it.
    Media(MediaOutput),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaOutput {
    /// Output field receiving the content reference (data URI).
    pub media_field: String,
    /// Output field receiving the accompanying text.
    pub text_field: String,
    /// Text returned alongside generated media.
    pub success_text: String,
}

/// What happens when the backend side of a call fails.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Surface the failure to the caller.
    #[default]
    HardFail,
    /// Return a placeholder record marked as degraded.
    Substitute(Placeholder),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub media_reference: String,
    pub text: String,
}

/// A registered capability: schemas, templates, and policies for one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSpec {
    pub name: TaskName,
    pub description: String,
    pub model: ModelClass,
    pub system_template: Option<String>,
    pub prompt_template: String,
    pub input: ObjectSchema,
    pub output: ObjectSchema,
    /// Input field carrying an inline image as a data URI.
    pub media_input: Option<String>,
    pub output_mode: OutputMode,
    pub on_failure: FailurePolicy,
    /// Prefix for user-facing failure messages, e.g. "Failed to generate quiz".
    pub failure_message: String,
    /// Achievement unlocked on the first successful run.
    pub achievement: Option<String>,
}

impl TaskSpec {
    pub fn new(
        name: TaskName,
        input: ObjectSchema,
        output: ObjectSchema,
        prompt_template: impl Into<String>,
    ) -> Self {
        let failure_message = format!("Failed to run {}", name);
        Self {
            name,
            description: String::new(),
            model: ModelClass::Text,
            system_template: None,
            prompt_template: prompt_template.into(),
            input,
            output,
            media_input: None,
            output_mode: OutputMode::Structured,
            on_failure: FailurePolicy::HardFail,
            failure_message,
            achievement: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_system(mut self, template: impl Into<String>) -> Self {
        self.system_template = Some(template.into());
        self
    }

    pub fn with_media_input(mut self, field: impl Into<String>) -> Self {
        self.media_input = Some(field.into());
        self
    }

    pub fn with_failure_message(mut self, message: impl Into<String>) -> Self {
        self.failure_message = message.into();
        self
    }

    pub fn with_achievement(mut self, achievement: impl Into<String>) -> Self {
        self.achievement = Some(achievement.into());
        self
    }

    /// Turn this into a media-producing task that degrades to `placeholder` on backend failure.
    pub fn with_media_output(mut self, output: MediaOutput, placeholder: Placeholder) -> Self {
        self.model = ModelClass::Image;
        self.output_mode = OutputMode::Media(output);
        self.on_failure = FailurePolicy::Substitute(placeholder);
        self
    }
}

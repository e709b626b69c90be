//! Generative Language API client implementation using reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use url::Url;

use crate::domain::schema::{InlineMedia, ObjectSchema, Schema};
use crate::domain::{AppError, BackendConfig};
use crate::ports::{
    BackendError, GenerationRequest, GenerationResponse, GenerativeBackend, Modality,
};

const X_GOOG_API_KEY: &str = "X-Goog-Api-Key";
const DEFAULT_STATUS_MESSAGE: &str = "Generative Language API request failed";

/// HTTP transport for the `models/{model}:generateContent` endpoint.
///
/// One request per call, never retried.
#[derive(Clone)]
pub struct HttpGeminiClient {
    api_key: String,
    api_url: Url,
    client: Client,
}

impl std::fmt::Debug for HttpGeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGeminiClient")
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpGeminiClient {
    /// Create a new HTTP client with the given API key and configuration.
    pub fn new(api_key: String, config: &BackendConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::config_error(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { api_key, api_url: config.api_url.clone(), client })
    }

    /// Create with the API key read from the environment variable named in `config`.
    pub fn from_env_with_config(config: &BackendConfig) -> Result<Self, AppError> {
        let api_key = std::env::var(&config.api_key_env)
            .map_err(|_| AppError::EnvironmentVariableMissing(config.api_key_env.clone()))?;

        Self::new(api_key, config)
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_url.as_str().trim_end_matches('/'), model)
    }

    fn send_request(&self, model: &str, body: &ApiRequest) -> Result<ApiResponse, BackendError> {
        let response = self
            .client
            .post(self.endpoint(model))
            .header(X_GOOG_API_KEY, &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    BackendError::Timeout(format!("HTTP request timed out: {}", e))
                } else {
                    BackendError::Unavailable {
                        status: None,
                        message: format!("HTTP request failed: {}", e),
                    }
                }
            })?;

        let status = response.status();
        let body_text = response.text().unwrap_or_default();

        if status.is_success() {
            return serde_json::from_str(&body_text).map_err(|e| BackendError::Unavailable {
                status: Some(status.as_u16()),
                message: format!("Failed to parse response: {}", e),
            });
        }

        let message = extract_error_message(&body_text).unwrap_or_else(|| {
            if !body_text.trim().is_empty() {
                body_text.clone()
            } else if status.as_u16() == 429 {
                "Rate limited".to_string()
            } else if status.is_server_error() {
                "Server error".to_string()
            } else {
                DEFAULT_STATUS_MESSAGE.to_string()
            }
        });

        tracing::warn!(status = status.as_u16(), %message, "generative backend returned an error");
        Err(BackendError::Unavailable { status: Some(status.as_u16()), message })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<Blob>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Blob {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize, Default)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    response_modalities: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Content,
}

fn text_part(text: String) -> Part {
    Part { text: Some(text), inline_data: None }
}

fn build_request(request: GenerationRequest) -> ApiRequest {
    let mut parts = Vec::new();
    if let Some(media) = request.media {
        parts.push(Part {
            text: None,
            inline_data: Some(Blob { mime_type: media.mime_type, data: media.data }),
        });
    }
    parts.push(text_part(request.prompt));

    let generation_config = match request.modality {
        Modality::Text => GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: request.output_schema.as_ref().map(object_schema),
            response_modalities: Vec::new(),
        },
        Modality::Image => GenerationConfig {
            response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
            ..Default::default()
        },
    };

    ApiRequest {
        system_instruction: request
            .system
            .map(|system| Content { role: None, parts: vec![text_part(system)] }),
        contents: vec![Content { role: Some("user".to_string()), parts }],
        generation_config,
    }
}

fn into_response(response: ApiResponse) -> GenerationResponse {
    let mut text = String::new();
    let mut media = None;

    let parts = response.candidates.into_iter().next().map(|c| c.content.parts).unwrap_or_default();
    for part in parts {
        if let Some(chunk) = part.text {
            text.push_str(&chunk);
        }
        if media.is_none()
            && let Some(blob) = part.inline_data
        {
            media = Some(InlineMedia { mime_type: blob.mime_type, data: blob.data });
        }
    }

    GenerationResponse { text: Some(text).filter(|t| !t.is_empty()), media }
}

/// Translate a record schema into the API's OpenAPI-subset dialect.
fn object_schema(schema: &ObjectSchema) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    let mut ordering = Vec::new();

    for field in &schema.fields {
        let mut described = vendor_schema(&field.schema);
        if let Value::Object(map) = &mut described {
            if let Some(description) = &field.description {
                map.insert("description".into(), json!(description));
            }
            if field.nullable {
                map.insert("nullable".into(), json!(true));
            }
        }
        if field.required {
            required.push(json!(field.name));
        }
        ordering.push(json!(field.name));
        properties.insert(field.name.clone(), described);
    }

    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required,
        "propertyOrdering": ordering,
    })
}

fn vendor_schema(schema: &Schema) -> Value {
    match schema {
        Schema::String(string) if !string.allowed.is_empty() => {
            json!({ "type": "STRING", "format": "enum", "enum": string.allowed })
        }
        Schema::String(_) => json!({ "type": "STRING" }),
        Schema::Integer(integer) => {
            let mut out = Map::new();
            out.insert("type".into(), json!("INTEGER"));
            if let Some(min) = integer.min {
                out.insert("minimum".into(), json!(min));
            }
            if let Some(max) = integer.max {
                out.insert("maximum".into(), json!(max));
            }
            Value::Object(out)
        }
        Schema::Boolean(_) => json!({ "type": "BOOLEAN" }),
        Schema::Array(array) => {
            let mut out = Map::new();
            out.insert("type".into(), json!("ARRAY"));
            out.insert("items".into(), vendor_schema(&array.items));
            if let Some(min) = array.min_items {
                out.insert("minItems".into(), json!(min));
            }
            if let Some(max) = array.max_items {
                out.insert("maxItems".into(), json!(max));
            }
            Value::Object(out)
        }
        Schema::Object(object) => object_schema(object),
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<Value>(body).ok()?;

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    parsed.get("message").and_then(|message| message.as_str()).map(ToOwned::to_owned)
}

impl GenerativeBackend for HttpGeminiClient {
    fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, BackendError> {
        let model = request.model.clone();
        let body = build_request(request);
        tracing::debug!(%model, "sending generateContent request");

        self.send_request(&model, &body).map(into_response)
    }
}

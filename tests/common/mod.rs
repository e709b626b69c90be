//! Shared testing utilities for eduspark CLI tests.
#![allow(dead_code)]

use assert_cmd::Command;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const TEXT_MODEL: &str = "text-model";
pub const IMAGE_MODEL: &str = "image-model";
pub const API_KEY: &str = "test-key";

/// Testing harness providing an isolated environment for CLI exercises.
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Data directory configured by [`write_config`](Self::write_config).
    pub fn data_dir(&self) -> PathBuf {
        self.work_dir.join("data")
    }

    /// Write `eduspark.toml` pointing the backend at `api_url`.
    pub fn write_config(&self, api_url: &str) {
        let content = format!(
            r#"[backend]
api_url = "{api_url}"
timeout_secs = 5
text_model = "{TEXT_MODEL}"
image_model = "{IMAGE_MODEL}"

[storage]
data_dir = "data"
"#
        );
        fs::write(self.work_dir.join("eduspark.toml"), content).expect("Failed to write config");
    }

    /// Command for the compiled `eduspark` binary with a clean environment.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("eduspark").expect("Failed to locate eduspark binary");
        cmd.current_dir(&self.work_dir)
            .env("HOME", self.root.path())
            .env("GOOGLE_API_KEY", API_KEY)
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.work_dir.join(name);
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Achievement flags stored for `user`.
    pub fn achievements(&self, user: &str) -> Value {
        let path = self.data_dir().join("users").join(user).join("achievements.json");
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).expect("achievements.json is JSON"),
            Err(_) => json!({}),
        }
    }
}

/// Generative Language API reply carrying `text` as the model's answer.
pub fn text_reply(text: &str) -> String {
    json!({
        "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]
    })
    .to_string()
}

/// Endpoint path for a model.
pub fn model_path(model: &str) -> String {
    format!("/models/{}:generateContent", model)
}

/// A well-formed quiz record with `count` questions.
pub fn quiz_record(count: usize) -> Value {
    let questions: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "question": format!("Question {}", i + 1),
                "options": ["Light", "Water", "Soil", "Air"],
                "correctAnswerIndex": i % 4,
                "explanation": format!("Explanation {}", i + 1)
            })
        })
        .collect();
    json!({"quizTitle": "Photosynthesis Basics", "questions": questions})
}

use std::collections::HashSet;

use include_dir::{Dir, DirEntry, include_dir};
use serde::Deserialize;

use crate::domain::achievements::find_achievement;
use crate::domain::schema::ObjectSchema;
use crate::domain::task::{MediaOutput, ModelClass, Placeholder};
use crate::domain::{AppError, TaskName, TaskRegistry, TaskSpec};

static BUILTIN_TASKS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/src/assets/tasks");

const TASK_FILE: &str = "task.yml";
const PROMPT_FILE: &str = "prompt.j2";
const SYSTEM_FILE: &str = "system.j2";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TaskYaml {
    task: String,
    description: String,
    #[serde(default)]
    model: ModelClass,
    failure_message: String,
    #[serde(default)]
    achievement: Option<String>,
    #[serde(default)]
    media_input: Option<String>,
    #[serde(default)]
    media_output: Option<MediaOutputYaml>,
    input: ObjectSchema,
    output: ObjectSchema,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MediaOutputYaml {
    media_field: String,
    text_field: String,
    success_text: String,
    placeholder: PlaceholderYaml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlaceholderYaml {
    media_reference: String,
    text: String,
}

/// Registry holding every built-in task.
pub fn load_builtin_registry() -> Result<TaskRegistry, AppError> {
    let mut registry = TaskRegistry::new();
    for spec in load_builtin_tasks()? {
        registry.register(spec)?;
    }
    Ok(registry)
}

pub fn load_builtin_tasks() -> Result<Vec<TaskSpec>, AppError> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    let mut task_files = Vec::new();
    collect_task_files(&BUILTIN_TASKS_DIR, &mut task_files);
    task_files.sort();

    for path in task_files {
        let task_dir = parse_task_path(&path)?;
        let task_yaml = read_task_yaml(&path)?;

        if task_yaml.task != task_dir {
            return Err(AppError::AssetError(format!(
                "Builtin task '{}' path does not match task.yml",
                task_yaml.task
            )));
        }
        if !seen.insert(task_yaml.task.clone()) {
            return Err(AppError::AssetError(format!(
                "Duplicate builtin task entry '{}'",
                task_yaml.task
            )));
        }

        out.push(build_spec(&task_dir, task_yaml)?);
    }

    Ok(out)
}

pub fn read_builtin_task_file(path: &str) -> Result<String, AppError> {
    let file = BUILTIN_TASKS_DIR
        .get_file(path)
        .ok_or_else(|| AppError::AssetError(format!("Missing builtin task asset: {path}")))?;

    file.contents_utf8().map(str::to_string).ok_or_else(|| {
        AppError::AssetError(format!("Builtin task asset is not valid UTF-8: {path}"))
    })
}

fn build_spec(task_dir: &str, task_yaml: TaskYaml) -> Result<TaskSpec, AppError> {
    let name = TaskName::new(&task_yaml.task).map_err(|_| {
        AppError::AssetError(format!("Invalid builtin task name '{}'", task_yaml.task))
    })?;

    if task_yaml.description.trim().is_empty() {
        return Err(AppError::AssetError(format!(
            "Builtin task '{}' has empty description",
            task_yaml.task
        )));
    }

    if let Some(achievement) = &task_yaml.achievement
        && find_achievement(achievement).is_none()
    {
        return Err(AppError::AssetError(format!(
            "Builtin task '{}' references unknown achievement '{}'",
            task_yaml.task, achievement
        )));
    }

    let prompt = read_builtin_task_file(&format!("{}/{}", task_dir, PROMPT_FILE))?;
    let system_path = format!("{}/{}", task_dir, SYSTEM_FILE);
    let system = match BUILTIN_TASKS_DIR.get_file(&system_path) {
        Some(_) => Some(read_builtin_task_file(&system_path)?),
        None => None,
    };

    let mut spec = TaskSpec::new(name, task_yaml.input, task_yaml.output, prompt)
        .with_description(task_yaml.description.trim())
        .with_failure_message(task_yaml.failure_message);
    spec.model = task_yaml.model;

    if let Some(system) = system {
        spec = spec.with_system(system);
    }
    if let Some(field) = task_yaml.media_input {
        spec = spec.with_media_input(field);
    }
    if let Some(achievement) = task_yaml.achievement {
        spec = spec.with_achievement(achievement);
    }

    match task_yaml.media_output {
        Some(media) => {
            spec = spec.with_media_output(
                MediaOutput {
                    media_field: media.media_field,
                    text_field: media.text_field,
                    success_text: media.success_text,
                },
                Placeholder {
                    media_reference: media.placeholder.media_reference,
                    text: media.placeholder.text,
                },
            );
        }
        None if spec.model == ModelClass::Image => {
            return Err(AppError::AssetError(format!(
                "Builtin task '{}' uses the image model without a media_output block",
                task_yaml.task
            )));
        }
        None => {}
    }

    Ok(spec)
}

fn read_task_yaml(path: &str) -> Result<TaskYaml, AppError> {
    let content = read_builtin_task_file(path)?;
    serde_yaml::from_str(&content).map_err(|err| {
        AppError::AssetError(format!("Failed to parse builtin task {}: {}", path, err))
    })
}

fn collect_task_files(dir: &'static Dir<'static>, paths: &mut Vec<String>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::File(file) => {
                let path = file.path().to_string_lossy().to_string();
                if path.ends_with(TASK_FILE) {
                    paths.push(path);
                }
            }
            DirEntry::Dir(subdir) => collect_task_files(subdir, paths),
        }
    }
}

fn parse_task_path(path: &str) -> Result<String, AppError> {
    let parts: Vec<&str> = path.split('/').collect();
    if parts.len() != 2 || parts[1] != TASK_FILE {
        return Err(AppError::AssetError(format!(
            "Builtin task path must be <task>/task.yml: {}",
            path
        )));
    }

    Ok(parts[0].to_string())
}

use std::fmt;

use serde_json::{Map, Value};

use super::media::{InlineMedia, is_http_url};
use super::{ObjectSchema, Schema, StringFormat, StringSchema};

const ROOT_PATH: &str = "$";

/// One failed constraint, located by a JSON-path-like string (`questions[2].options`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    pub path: String,
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.path, self.message)
    }
}

/// All constraint failures found in one record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SchemaViolations(Vec<SchemaViolation>);

impl SchemaViolations {
    pub fn single(path: &str, message: impl Into<String>) -> Self {
        let mut violations = Self::default();
        violations.push(path, message);
        violations
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SchemaViolation> {
        self.0.iter()
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.0.iter().any(|violation| violation.path == path)
    }

    fn push(&mut self, path: &str, message: impl Into<String>) {
        let path = if path.is_empty() { ROOT_PATH } else { path };
        self.0.push(SchemaViolation { path: path.to_string(), message: message.into() });
    }
}

impl fmt::Display for SchemaViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", joined.join("; "))
    }
}

impl std::error::Error for SchemaViolations {}

impl ObjectSchema {
    /// Check `value` against this schema and return the conformed record.
    ///
    /// Unknown keys are dropped, `null` on an optional field counts as absent, and
    /// integral floats become integers. Any failed constraint rejects the whole record.
    pub fn validate(&self, value: &Value) -> Result<Value, SchemaViolations> {
        let mut violations = SchemaViolations::default();
        let conformed = conform_object(self, value, "", &mut violations);
        if violations.is_empty() { Ok(conformed) } else { Err(violations) }
    }
}

fn conform_object(
    schema: &ObjectSchema,
    value: &Value,
    path: &str,
    violations: &mut SchemaViolations,
) -> Value {
    let Some(map) = value.as_object() else {
        violations.push(path, "must be an object");
        return Value::Null;
    };

    let mut conformed = Map::new();
    for field in &schema.fields {
        let field_path =
            if path.is_empty() { field.name.clone() } else { format!("{}.{}", path, field.name) };

        match map.get(&field.name) {
            None => {
                if field.required {
                    violations.push(&field_path, "is required");
                }
            }
            Some(Value::Null) => {
                if field.nullable {
                    conformed.insert(field.name.clone(), Value::Null);
                } else if field.required {
                    violations.push(&field_path, "must not be null");
                }
            }
            Some(inner) => {
                let value = conform(&field.schema, inner, &field_path, violations);
                conformed.insert(field.name.clone(), value);
            }
        }
    }

    Value::Object(conformed)
}

fn conform(schema: &Schema, value: &Value, path: &str, violations: &mut SchemaViolations) -> Value {
    match schema {
        Schema::String(string) => {
            match value.as_str() {
                Some(text) => check_string(string, text, path, violations),
                None => violations.push(path, "must be a string"),
            }
            value.clone()
        }
        Schema::Integer(integer) => match as_integer(value) {
            Some(number) => {
                if let Some(min) = integer.min
                    && number < min
                {
                    violations.push(path, format!("must be at least {}", min));
                }
                if let Some(max) = integer.max
                    && number > max
                {
                    violations.push(path, format!("must be at most {}", max));
                }
                Value::from(number)
            }
            None => {
                violations.push(path, "must be an integer");
                value.clone()
            }
        },
        Schema::Boolean(_) => {
            if !value.is_boolean() {
                violations.push(path, "must be a boolean");
            }
            value.clone()
        }
        Schema::Array(array) => {
            let Some(items) = value.as_array() else {
                violations.push(path, "must be an array");
                return value.clone();
            };

            match (array.min_items, array.max_items) {
                (Some(min), Some(max)) if min == max && items.len() != min => {
                    violations.push(path, format!("must have exactly {} items", min));
                }
                (min, max) => {
                    if let Some(min) = min
                        && items.len() < min
                    {
                        violations.push(path, format!("must have at least {} items", min));
                    }
                    if let Some(max) = max
                        && items.len() > max
                    {
                        violations.push(path, format!("must have at most {} items", max));
                    }
                }
            }

            Value::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| {
                        conform(&array.items, item, &format!("{}[{}]", path, index), violations)
                    })
                    .collect(),
            )
        }
        Schema::Object(object) => conform_object(object, value, path, violations),
    }
}

fn check_string(schema: &StringSchema, text: &str, path: &str, violations: &mut SchemaViolations) {
    let length = text.chars().count();
    if let Some(min) = schema.min_length
        && length < min
    {
        violations.push(path, format!("must be at least {} characters", min));
    }
    if let Some(max) = schema.max_length
        && length > max
    {
        violations.push(path, format!("must be at most {} characters", max));
    }

    if !schema.allowed.is_empty() && !schema.allowed.iter().any(|allowed| allowed == text) {
        violations.push(path, format!("must be one of: {}", schema.allowed.join(", ")));
    }

    match schema.format {
        Some(StringFormat::DataUri) => {
            if let Err(err) = InlineMedia::from_data_uri(text) {
                violations.push(path, err.to_string());
            }
        }
        Some(StringFormat::MediaReference) => {
            if InlineMedia::from_data_uri(text).is_err() && !is_http_url(text) {
                violations.push(path, "must be a data URI or an http(s) URL");
            }
        }
        None => {}
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    if let Some(number) = value.as_i64() {
        return Some(number);
    }
    let float = value.as_f64()?;
    if float.is_finite() && float.fract() == 0.0 && float.abs() < i64::MAX as f64 {
        Some(float as i64)
    } else {
        None
    }
}

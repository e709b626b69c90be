//! Declarative record schemas.
//!
//! Every task declares the shape of its input and output as an [`ObjectSchema`].
//! Schemas are plain data: they are deserialized from the task catalog and compared
//! structurally, so the same description drives input checks, output checks, and the
//! schema sent to the generative backend.

mod media;
mod validate;

pub use media::{InlineMedia, MediaError};
pub use validate::{SchemaViolation, SchemaViolations};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// A record made of named fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ObjectSchema {
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// A single named field of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the key must be present.
    #[serde(default = "default_true")]
    pub required: bool,
    /// Whether an explicit `null` is an accepted value.
    #[serde(default)]
    pub nullable: bool,
    #[serde(flatten)]
    pub schema: Schema,
}

/// Value shape for a field or an array item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Schema {
    String(StringSchema),
    Integer(IntegerSchema),
    Boolean(BooleanSchema),
    Array(ArraySchema),
    Object(ObjectSchema),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StringSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Fixed value set. Empty means unrestricted.
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub allowed: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<StringFormat>,
}

/// Additional constraints on the textual content of a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringFormat {
    /// `data:<mime>;base64,<payload>` with a decodable payload.
    DataUri,
    /// A data URI or an `http(s)://` URL.
    MediaReference,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IntegerSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BooleanSchema {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArraySchema {
    pub items: Box<Schema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
}

fn default_true() -> bool {
    true
}

impl ObjectSchema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    /// Describe the record as a JSON Schema document.
    pub fn describe(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for field in &self.fields {
            let mut described = field.schema.describe();
            if let Some(description) = &field.description
                && let Value::Object(map) = &mut described
            {
                map.insert("description".to_string(), Value::String(description.clone()));
            }
            if field.nullable {
                described = json!({ "anyOf": [described, { "type": "null" }] });
            }
            if field.required {
                required.push(Value::String(field.name.clone()));
            }
            properties.insert(field.name.clone(), described);
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        })
    }
}

impl Field {
    pub fn required(name: impl Into<String>, schema: Schema) -> Self {
        Self { name: name.into(), description: None, required: true, nullable: false, schema }
    }

    pub fn optional(name: impl Into<String>, schema: Schema) -> Self {
        Self { name: name.into(), description: None, required: false, nullable: false, schema }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn describe_as(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Schema {
    pub fn string() -> Self {
        Schema::String(StringSchema::default())
    }

    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Schema::String(StringSchema {
            allowed: values.into_iter().map(Into::into).collect(),
            ..Default::default()
        })
    }

    pub fn formatted(format: StringFormat) -> Self {
        Schema::String(StringSchema { format: Some(format), ..Default::default() })
    }

    pub fn integer() -> Self {
        Schema::Integer(IntegerSchema::default())
    }

    pub fn integer_between(min: i64, max: i64) -> Self {
        Schema::Integer(IntegerSchema { min: Some(min), max: Some(max) })
    }

    pub fn boolean() -> Self {
        Schema::Boolean(BooleanSchema {})
    }

    pub fn array_of(items: Schema) -> Self {
        Schema::Array(ArraySchema { items: Box::new(items), min_items: None, max_items: None })
    }

    pub fn exactly(count: usize, items: Schema) -> Self {
        Schema::Array(ArraySchema {
            items: Box::new(items),
            min_items: Some(count),
            max_items: Some(count),
        })
    }

    pub fn object(fields: Vec<Field>) -> Self {
        Schema::Object(ObjectSchema::new(fields))
    }

    pub fn describe(&self) -> Value {
        match self {
            Schema::String(string) => {
                let mut out = Map::new();
                out.insert("type".into(), json!("string"));
                if let Some(min) = string.min_length {
                    out.insert("minLength".into(), json!(min));
                }
                if let Some(max) = string.max_length {
                    out.insert("maxLength".into(), json!(max));
                }
                if !string.allowed.is_empty() {
                    out.insert("enum".into(), json!(string.allowed));
                }
                match string.format {
                    Some(StringFormat::DataUri) => {
                        out.insert("format".into(), json!("data-uri"));
                    }
                    Some(StringFormat::MediaReference) => {
                        out.insert("format".into(), json!("uri"));
                    }
                    None => {}
                }
                Value::Object(out)
            }
            Schema::Integer(integer) => {
                let mut out = Map::new();
                out.insert("type".into(), json!("integer"));
                if let Some(min) = integer.min {
                    out.insert("minimum".into(), json!(min));
                }
                if let Some(max) = integer.max {
                    out.insert("maximum".into(), json!(max));
                }
                Value::Object(out)
            }
            Schema::Boolean(_) => json!({ "type": "boolean" }),
            Schema::Array(array) => {
                let mut out = Map::new();
                out.insert("type".into(), json!("array"));
                out.insert("items".into(), array.items.describe());
                if let Some(min) = array.min_items {
                    out.insert("minItems".into(), json!(min));
                }
                if let Some(max) = array.max_items {
                    out.insert("maxItems".into(), json!(max));
                }
                Value::Object(out)
            }
            Schema::Object(object) => object.describe(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIZ_OUTPUT_YAML: &str = r#"
fields:
  - name: quizTitle
    type: string
  - name: questions
    type: array
    items:
      type: object
      fields:
        - name: options
          type: array
          min_items: 4
          max_items: 4
          items:
            type: string
        - name: correctAnswerIndex
          type: integer
          min: 0
          max: 3
"#;

    #[test]
    fn deserializes_nested_schema_from_yaml() {
        let schema: ObjectSchema = serde_yaml::from_str(QUIZ_OUTPUT_YAML).unwrap();

        let expected = ObjectSchema::new(vec![
            Field::required("quizTitle", Schema::string()),
            Field::required(
                "questions",
                Schema::array_of(Schema::object(vec![
                    Field::required("options", Schema::exactly(4, Schema::string())),
                    Field::required("correctAnswerIndex", Schema::integer_between(0, 3)),
                ])),
            ),
        ]);
        assert_eq!(schema, expected);
    }

    #[test]
    fn optional_and_nullable_flags_parse() {
        let yaml = r#"
fields:
  - name: style
    type: string
    required: false
    enum: [academic, persuasive]
  - name: userSelectedOptionIndex
    type: integer
    nullable: true
"#;
        let schema: ObjectSchema = serde_yaml::from_str(yaml).unwrap();
        let style = schema.field("style").unwrap();
        assert!(!style.required);
        assert_eq!(style.schema, Schema::one_of(["academic", "persuasive"]));

        let index = schema.field("userSelectedOptionIndex").unwrap();
        assert!(index.required);
        assert!(index.nullable);
    }

    #[test]
    fn describe_lists_required_fields_and_bounds() {
        let schema = ObjectSchema::new(vec![
            Field::required("numQuestions", Schema::integer_between(1, 10)),
            Field::optional("contextText", Schema::string()),
        ]);
        let described = schema.describe();

        assert_eq!(described["required"], json!(["numQuestions"]));
        assert_eq!(described["properties"]["numQuestions"]["minimum"], json!(1));
        assert_eq!(described["properties"]["numQuestions"]["maximum"], json!(10));
        assert_eq!(described["additionalProperties"], json!(false));
    }
}

//! Request/response contracts shared by every advisory flow.
//!
//! A contract is an `ObjectSchema` assembled from small field combinators
//! (`non_empty`, `range`, `optional`, `string_list`, ...). The same schema
//! validates raw JSON on the way in, validates the model's answer on the way
//! out, and is rendered as JSON Schema for the model's output constraint.

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::llm_client::media::parse_data_uri;

/// A single violated constraint. `field` is a path such as `soilPh` or
/// `remedy.steps[1]`; `$` denotes the document root.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn violation(path: &str, rule: impl std::fmt::Display) -> Self {
        Self::new(path, format!("{path} {rule}"))
    }
}

#[derive(Debug, Clone)]
pub enum Constraint {
    /// Any string, including an empty one.
    Text,
    /// A string with at least one non-whitespace character.
    NonEmpty,
    Number { min: Option<f64>, max: Option<f64> },
    Boolean,
    OneOf(&'static [&'static str]),
    /// A base64 image data URI.
    DataUri,
    /// An ordered list of strings.
    StringList,
    Object(ObjectSchema),
}

impl Constraint {
    fn check(&self, path: &str, value: &Value) -> Result<(), ValidationError> {
        match self {
            Constraint::Text => expect_str(path, value).map(|_| ()),
            Constraint::NonEmpty => {
                if expect_str(path, value)?.trim().is_empty() {
                    return Err(ValidationError::violation(path, "must not be empty"));
                }
                Ok(())
            }
            Constraint::Number { min, max } => {
                let n = value
                    .as_f64()
                    .filter(|n| n.is_finite())
                    .ok_or_else(|| ValidationError::violation(path, "must be a number"))?;
                if let Some(min) = min {
                    if n < *min {
                        return Err(ValidationError::violation(path, format!("must be ≥ {min}")));
                    }
                }
                if let Some(max) = max {
                    if n > *max {
                        return Err(ValidationError::violation(path, format!("must be ≤ {max}")));
                    }
                }
                Ok(())
            }
            Constraint::Boolean => match value {
                Value::Bool(_) => Ok(()),
                _ => Err(ValidationError::violation(path, "must be true or false")),
            },
            Constraint::OneOf(allowed) => {
                let s = expect_str(path, value)?;
                if !allowed.contains(&s) {
                    return Err(ValidationError::violation(
                        path,
                        format!("must be one of: {}", allowed.join(", ")),
                    ));
                }
                Ok(())
            }
            Constraint::DataUri => {
                let s = expect_str(path, value)?;
                parse_data_uri(s)
                    .map(|_| ())
                    .map_err(|e| ValidationError::violation(path, e))
            }
            Constraint::StringList => {
                let items = value
                    .as_array()
                    .ok_or_else(|| ValidationError::violation(path, "must be a list of strings"))?;
                for (i, item) in items.iter().enumerate() {
                    expect_str(&format!("{path}[{i}]"), item)?;
                }
                Ok(())
            }
            Constraint::Object(schema) => schema.validate_at(path, value),
        }
    }

    fn json_schema(&self) -> Value {
        match self {
            Constraint::Text => json!({"type": "string"}),
            Constraint::NonEmpty => json!({"type": "string", "minLength": 1}),
            Constraint::Number { min, max } => {
                let mut schema = json!({"type": "number"});
                if let Some(min) = min {
                    schema["minimum"] = json!(min);
                }
                if let Some(max) = max {
                    schema["maximum"] = json!(max);
                }
                schema
            }
            Constraint::Boolean => json!({"type": "boolean"}),
            Constraint::OneOf(allowed) => json!({"type": "string", "enum": allowed}),
            Constraint::DataUri => json!({"type": "string", "pattern": "^data:image/[a-z]+;base64,"}),
            Constraint::StringList => json!({"type": "array", "items": {"type": "string"}}),
            Constraint::Object(schema) => schema.to_json_schema(),
        }
    }
}

fn expect_str<'v>(path: &str, value: &'v Value) -> Result<&'v str, ValidationError> {
    value
        .as_str()
        .ok_or_else(|| ValidationError::violation(path, "must be a string"))
}

#[derive(Debug, Clone)]
pub struct Field {
    pub name: &'static str,
    pub description: &'static str,
    pub constraint: Constraint,
    pub required: bool,
}

/// An ordered set of named fields. Unknown keys in the checked value are
/// ignored.
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    fields: Vec<Field>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Checks `value` field by field, stopping at the first violation.
    pub fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        self.validate_at("", value)
    }

    fn validate_at(&self, path: &str, value: &Value) -> Result<(), ValidationError> {
        let object = value.as_object().ok_or_else(|| {
            let at = if path.is_empty() { "$" } else { path };
            ValidationError::violation(at, "must be a JSON object")
        })?;

        for field in &self.fields {
            let field_path = if path.is_empty() {
                field.name.to_string()
            } else {
                format!("{path}.{}", field.name)
            };

            match object.get(field.name) {
                None | Some(Value::Null) => {
                    if field.required {
                        return Err(ValidationError::violation(&field_path, "is required"));
                    }
                }
                // A blank optional string means "not provided".
                Some(Value::String(s)) if !field.required && s.trim().is_empty() => {}
                Some(v) => field.constraint.check(&field_path, v)?,
            }
        }
        Ok(())
    }

    /// Renders the schema as a JSON Schema object for the model's output
    /// constraint.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for field in &self.fields {
            let mut property = field.constraint.json_schema();
            property["description"] = json!(field.description);
            properties.insert(field.name.to_string(), property);
            if field.required {
                required.push(field.name);
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Validates, then deserializes into `T`.
    pub fn parse<T: DeserializeOwned>(&self, value: Value) -> Result<T, ValidationError> {
        self.validate(&value)?;
        serde_json::from_value(value).map_err(|e| ValidationError::new("$", e.to_string()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Field combinators
// ────────────────────────────────────────────────────────────────────────────

fn required(name: &'static str, description: &'static str, constraint: Constraint) -> Field {
    Field {
        name,
        description,
        constraint,
        required: true,
    }
}

pub fn text(name: &'static str, description: &'static str) -> Field {
    required(name, description, Constraint::Text)
}

pub fn non_empty(name: &'static str, description: &'static str) -> Field {
    required(name, description, Constraint::NonEmpty)
}

pub fn number(name: &'static str, description: &'static str) -> Field {
    required(name, description, Constraint::Number { min: None, max: None })
}

pub fn range(name: &'static str, description: &'static str, min: f64, max: f64) -> Field {
    required(
        name,
        description,
        Constraint::Number {
            min: Some(min),
            max: Some(max),
        },
    )
}

pub fn at_least(name: &'static str, description: &'static str, min: f64) -> Field {
    required(
        name,
        description,
        Constraint::Number {
            min: Some(min),
            max: None,
        },
    )
}

pub fn boolean(name: &'static str, description: &'static str) -> Field {
    required(name, description, Constraint::Boolean)
}

pub fn one_of(
    name: &'static str,
    description: &'static str,
    allowed: &'static [&'static str],
) -> Field {
    required(name, description, Constraint::OneOf(allowed))
}

pub fn data_uri(name: &'static str, description: &'static str) -> Field {
    required(name, description, Constraint::DataUri)
}

pub fn string_list(name: &'static str, description: &'static str) -> Field {
    required(name, description, Constraint::StringList)
}

pub fn object(name: &'static str, description: &'static str, schema: ObjectSchema) -> Field {
    required(name, description, Constraint::Object(schema))
}

pub fn optional(field: Field) -> Field {
    Field {
        required: false,
        ..field
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Contracts
// ────────────────────────────────────────────────────────────────────────────

/// A typed request or response with a declared schema.
pub trait Contract {
    fn schema() -> ObjectSchema;

    /// Cross-field rules the per-field schema cannot express.
    fn check(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Raw JSON → validated typed value.
pub fn parse_contract<T>(value: Value) -> Result<T, ValidationError>
where
    T: Contract + DeserializeOwned,
{
    let parsed: T = T::schema().parse(value)?;
    parsed.check()?;
    Ok(parsed)
}

/// Re-checks an already typed value, e.g. one built in code rather than
/// parsed from a request body. Non-finite numbers serialize to `null` and are
/// reported as missing.
pub fn validate_contract<T>(value: &T) -> Result<(), ValidationError>
where
    T: Contract + Serialize,
{
    let raw = serde_json::to_value(value).map_err(|e| ValidationError::new("$", e.to_string()))?;
    T::schema().validate(&raw)?;
    value.check()
}

/// Serde helper for optional strings: blank values deserialize as `None`.
pub fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

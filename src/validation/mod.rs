use serde_json::{Map, Value};

use crate::error::AppError;

/// Accepted JSON type for one field.
#[derive(Debug, Clone, Copy)]
pub enum Kind {
    /// Non-empty string
    String,
    Number,
    Object(&'static [Field]),
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub kind: Kind,
}

const fn field(name: &'static str, kind: Kind) -> Field {
    Field { name, kind }
}

const RATING_UPDATE: &[Field] = &[field("rate", Kind::Number), field("count", Kind::Number)];

/// Shape of a partial product update. Every key is optional, unknown keys are
/// rejected.
pub const PRODUCT_UPDATE: &[Field] = &[
    field("title", Kind::String),
    field("price", Kind::Number),
    field("description", Kind::String),
    field("category", Kind::String),
    field("image", Kind::String),
    field("rating", Kind::Object(RATING_UPDATE)),
];

/// First schema violation found in a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending key (`"value"` for the payload itself).
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.message)
    }
}

fn violation(path: &str, what: &str) -> ValidationError {
    ValidationError {
        path: path.to_string(),
        message: format!("\"{}\" {}", path, what),
    }
}

/// Check `payload` against `schema`, stopping at the first violation.
pub fn validate(schema: &[Field], payload: &Value) -> Result<(), ValidationError> {
    match payload {
        Value::Object(map) => validate_object(schema, map, None),
        _ => Err(violation("value", "must be of type object")),
    }
}

fn validate_object(
    schema: &[Field],
    map: &Map<String, Value>,
    prefix: Option<&str>,
) -> Result<(), ValidationError> {
    let path_of = |name: &str| match prefix {
        Some(p) => format!("{}.{}", p, name),
        None => name.to_string(),
    };

    // Declared keys first, in schema order.
    for f in schema {
        if let Some(value) = map.get(f.name) {
            validate_value(f.kind, value, &path_of(f.name))?;
        }
    }

    if let Some(unknown) = map.keys().find(|k| !schema.iter().any(|f| f.name == k.as_str())) {
        return Err(violation(&path_of(unknown), "is not allowed"));
    }

    Ok(())
}

fn validate_value(kind: Kind, value: &Value, path: &str) -> Result<(), ValidationError> {
    match (kind, value) {
        (Kind::String, Value::String(s)) if s.is_empty() => {
            Err(violation(path, "is not allowed to be empty"))
        }
        (Kind::String, Value::String(_)) => Ok(()),
        (Kind::String, _) => Err(violation(path, "must be a string")),
        (Kind::Number, Value::Number(_)) => Ok(()),
        (Kind::Number, _) => Err(violation(path, "must be a number")),
        (Kind::Object(fields), Value::Object(map)) => validate_object(fields, map, Some(path)),
        (Kind::Object(_), _) => Err(violation(path, "must be of type object")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(payload: Value) -> Result<(), ValidationError> {
        validate(PRODUCT_UPDATE, &payload)
    }

    #[test]
    fn empty_object_is_valid() {
        assert!(check(json!({})).is_ok());
    }

    #[test]
    fn full_payload_is_valid() {
        let payload = json!({
            "title": "Hat",
            "price": 12,
            "description": "Wool",
            "category": "clothing",
            "image": "https://example.com/hat.png",
            "rating": { "rate": 4.5, "count": 9 }
        });
        assert!(check(payload).is_ok());
    }

    #[test]
    fn string_price_names_the_field() {
        let err = check(json!({ "price": "not-a-number" })).unwrap_err();
        assert_eq!(err.path, "price");
        assert_eq!(err.message, "\"price\" must be a number");
    }

    #[test]
    fn numeric_string_is_not_a_number() {
        let err = check(json!({ "price": "9.99" })).unwrap_err();
        assert_eq!(err.message, "\"price\" must be a number");

        let err = check(json!({ "rating": { "count": "120" } })).unwrap_err();
        assert_eq!(err.message, "\"rating.count\" must be a number");
    }

    #[test]
    fn non_string_title() {
        let err = check(json!({ "title": 5 })).unwrap_err();
        assert_eq!(err.message, "\"title\" must be a string");
    }

    #[test]
    fn null_is_a_type_error() {
        let err = check(json!({ "category": null })).unwrap_err();
        assert_eq!(err.message, "\"category\" must be a string");
    }

    #[test]
    fn empty_string_rejected() {
        let err = check(json!({ "image": "" })).unwrap_err();
        assert_eq!(err.message, "\"image\" is not allowed to be empty");
    }

    #[test]
    fn nested_rating_errors_use_dotted_path() {
        let err = check(json!({ "rating": { "rate": "high" } })).unwrap_err();
        assert_eq!(err.path, "rating.rate");
        assert_eq!(err.message, "\"rating.rate\" must be a number");

        let err = check(json!({ "rating": { "stars": 5 } })).unwrap_err();
        assert_eq!(err.message, "\"rating.stars\" is not allowed");
    }

    #[test]
    fn rating_must_be_object() {
        let err = check(json!({ "rating": 4 })).unwrap_err();
        assert_eq!(err.message, "\"rating\" must be of type object");
    }

    #[test]
    fn unknown_top_level_key() {
        let err = check(json!({ "id": 3 })).unwrap_err();
        assert_eq!(err.message, "\"id\" is not allowed");
    }

    #[test]
    fn declared_key_errors_reported_before_unknown_keys() {
        let err = check(json!({ "colour": "red", "price": "x" })).unwrap_err();
        assert_eq!(err.path, "price");
    }

    #[test]
    fn non_object_payload() {
        let err = check(json!([1, 2])).unwrap_err();
        assert_eq!(err.message, "\"value\" must be of type object");
    }

    #[test]
    fn converts_into_bad_request() {
        let err: AppError = check(json!({ "price": true })).unwrap_err().into();
        assert_eq!(err.to_string(), "Bad Request!\n\"price\" must be a number");
    }
}

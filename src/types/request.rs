// src/types/request.rs
//! Form submission as posted by the CV form page

use serde::Deserialize;
use serde_json::Value;

/// Flat key/value submission. Every field is optional and accepts any JSON
/// value; unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DocumentRequest {
    pub name: Option<Value>,
    pub headline: Option<Value>,
    pub location: Option<Value>,
    pub email: Option<Value>,
    pub phone: Option<Value>,
    pub website: Option<Value>,
    pub linkedin: Option<Value>,
    pub github: Option<Value>,

    // Free-form section bodies: plain text or a list of entries
    pub summary: Option<Value>,
    pub experience: Option<Value>,
    pub education: Option<Value>,
    pub projects: Option<Value>,
    pub skills: Option<Value>,

    pub theme: Option<Value>,
    pub language: Option<Value>,
}

impl DocumentRequest {
    /// Name used to build download filenames, `"CV"` when none was sent
    pub fn display_name(&self) -> String {
        match &self.name {
            None | Some(Value::Null) => "CV".to_string(),
            Some(value) => scalar_text(value),
        }
    }

    /// Requested theme name when it was sent as text
    pub fn theme_name(&self) -> Option<&str> {
        self.theme.as_ref().and_then(Value::as_str)
    }
}

/// Text form of a scalar: strings unquoted, everything else as JSON
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Truthy value, if any
pub fn present(value: &Option<Value>) -> Option<&Value> {
    value.as_ref().filter(|v| is_truthy(v))
}

/// Truthiness of a free-form section body.
/// Null, `false`, zero, and empty strings/lists/objects count as absent.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_partial_request() {
        let request: DocumentRequest = serde_json::from_value(json!({
            "name": "Jane Doe",
            "github": "jdoe",
            "experience": ["Acme", "Initech"],
            "favourite_colour": "blue"
        }))
        .unwrap();

        assert_eq!(request.name, Some(json!("Jane Doe")));
        assert_eq!(request.github, Some(json!("jdoe")));
        assert!(request.linkedin.is_none());
        assert_eq!(request.experience, Some(json!(["Acme", "Initech"])));
    }

    #[test]
    fn test_display_name_defaults_to_cv() {
        assert_eq!(DocumentRequest::default().display_name(), "CV");

        let null_name: DocumentRequest = serde_json::from_value(json!({ "name": null })).unwrap();
        assert_eq!(null_name.display_name(), "CV");
    }

    #[test]
    fn test_non_string_scalars_are_accepted() {
        let request: DocumentRequest = serde_json::from_value(json!({
            "name": 12345,
            "phone": 5551234,
            "theme": 7
        }))
        .unwrap();

        assert_eq!(request.display_name(), "12345");
        assert_eq!(request.phone, Some(json!(5551234)));
        assert_eq!(request.theme_name(), None);
    }

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!({})));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!("Rust developer")));
        assert!(is_truthy(&json!(["Rust"])));
        assert!(is_truthy(&json!(3)));
    }
}

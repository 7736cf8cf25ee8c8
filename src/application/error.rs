use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::infra::http::ApiError;

/// Server-provided payload of a 422 response, kept verbatim so the UI can
/// render field errors.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRejection {
    payload: Value,
}

impl ValidationRejection {
    pub fn new(payload: Value) -> Self {
        Self { payload }
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Field → message pairs. Reads the `error` object when the payload has
    /// one, otherwise the payload itself. Non-string messages are rendered as JSON.
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        let fields = match self.payload.get("error") {
            Some(Value::Object(map)) => map,
            _ => match &self.payload {
                Value::Object(map) => map,
                _ => return BTreeMap::new(),
            },
        };
        fields
            .iter()
            .map(|(field, message)| {
                let text = match message {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (field.clone(), text)
            })
            .collect()
    }
}

impl fmt::Display for ValidationRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.payload)
    }
}

#[derive(Debug, Error)]
pub enum BlogError {
    #[error("validation failed: {0}")]
    Validation(ValidationRejection),
    #[error(transparent)]
    Api(ApiError),
    #[error("request aborted")]
    Aborted,
}

impl BlogError {
    /// Error mapping for create and update: a 422 becomes a typed rejection,
    /// everything else stays a generic API failure.
    pub fn from_mutation(err: ApiError) -> Self {
        if err.is_unprocessable() {
            let payload = err.body_json().unwrap_or(Value::Null);
            return Self::Validation(ValidationRejection::new(payload));
        }
        Self::Api(err)
    }

    pub fn validation(&self) -> Option<&ValidationRejection> {
        match self {
            Self::Validation(rejection) => Some(rejection),
            _ => None,
        }
    }

    /// This error and every source below it, outermost first.
    pub fn messages(&self) -> Vec<String> {
        let mut messages = vec![self.to_string()];
        let mut current = self.source();
        while let Some(inner) = current {
            let text = inner.to_string();
            if messages.last() != Some(&text) {
                messages.push(text);
            }
            current = inner.source();
        }
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;

    #[test]
    fn unprocessable_maps_to_validation() {
        let err = BlogError::from_mutation(ApiError::status(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"error":{"publishDate":"must not be in the past"}}"#,
        ));
        let rejection = err.validation().expect("validation");
        assert_eq!(
            rejection.payload(),
            &json!({"error": {"publishDate": "must not be in the past"}})
        );
        assert_eq!(
            rejection.field_errors().get("publishDate").map(String::as_str),
            Some("must not be in the past")
        );
    }

    #[test]
    fn other_statuses_stay_generic() {
        let err = BlogError::from_mutation(ApiError::status(StatusCode::CONFLICT, "dup"));
        assert!(matches!(err, BlogError::Api(_)));
        assert!(err.validation().is_none());
    }

    #[test]
    fn field_errors_read_flat_payloads() {
        let rejection = ValidationRejection::new(json!({"title": "required", "count": 3}));
        let fields = rejection.field_errors();
        assert_eq!(fields.get("title").map(String::as_str), Some("required"));
        assert_eq!(fields.get("count").map(String::as_str), Some("3"));

        assert!(ValidationRejection::new(json!("oops")).field_errors().is_empty());
    }

    #[test]
    fn messages_include_display() {
        let err = BlogError::Api(ApiError::Decode("bad json".into()));
        assert_eq!(err.messages(), vec!["failed to parse body: bad json"]);
    }
}

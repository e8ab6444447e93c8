use http::StatusCode;
use serde::Serialize;

/// Structured refusal returned to the dispatcher in place of a raw error.
///
/// `status` is a hint for the HTTP response. The serialized body carries a
/// `message` plus, for multi-field problems, the full list of offending
/// field names (`missingFields` / `invalidFields`) so the caller sees the
/// whole deficiency in one round trip.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Rejection {
    #[serde(skip)]
    pub status: StatusCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_fields: Option<Vec<String>>,
}

impl Rejection {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            missing_fields: None,
            invalid_fields: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// Generic 500 with no field-level detail; storage internals stay out of
    /// the response body.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn missing_fields(fields: Vec<String>) -> Self {
        Self {
            missing_fields: Some(fields),
            ..Self::bad_request("Missing required fields")
        }
    }

    pub fn invalid_numeric_fields(fields: Vec<String>) -> Self {
        Self {
            invalid_fields: Some(fields),
            ..Self::bad_request("Numeric fields are invalid")
        }
    }
}

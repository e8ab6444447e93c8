//! Required-field presence checks.

use serde_json::Value;

/// Whether a payload field counts as present. Absent, JSON null, the empty
/// string, and the empty array are all treated as missing.
pub(crate) fn has_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

/// Every required field the payload is missing, in declaration order. The
/// caller gets the full deficiency in one pass, not just the first field.
pub fn missing_required(payload: &Value, required: &[&'static str]) -> Vec<String> {
    required
        .iter()
        .filter(|field| !has_value(payload.get(**field)))
        .map(|field| field.to_string())
        .collect()
}

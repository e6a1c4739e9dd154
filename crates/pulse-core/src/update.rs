//! Partial-update sanitization.
//!
//! Clients send `{"survey": {...}}` / `{"response": {...}}` bodies where any
//! subset of fields may appear. Two conventions apply before a payload
//! reaches the store: the `owner` key is never honored, and an empty string
//! means "leave this field unchanged" rather than "set to empty".

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use thiserror::Error;

/// The one field a client must never set through an update payload.
pub const OWNER_FIELD: &str = "owner";

/// Filter a raw update payload down to the fields that may be applied.
///
/// Removes the `owner` key unconditionally, then every key whose value is
/// the literal empty string. Only the empty string is a no-change sentinel:
/// `false`, `0`, and `null` all survive sanitization. Always succeeds; an
/// empty result is a valid no-op update.
pub fn sanitize_update(mut raw: Map<String, Value>) -> Map<String, Value> {
    raw.remove(OWNER_FIELD);
    raw.retain(|_, value| !matches!(value, Value::String(s) if s.is_empty()));
    raw
}

/// Field-level validation failures, keyed by field name.
///
/// Serialized as the body of a 422 response: `{"errors": {field: [messages]}}`.
#[derive(Debug, Default, Error)]
#[error("validation failed: {errors:?}")]
pub struct ValidationErrors {
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Ok if nothing was recorded, otherwise Err(self).
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

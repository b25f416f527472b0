//! kennel-schema: turn a JSON payload into a typed, validated record.
//!
//! Deserialization failures and `validator` rule failures both come back as
//! a `KennelError` of kind `Validation`, so they reach the client as the
//! usual 422 `{loc, msg, type}` body.

use kennel_core::errors::KennelError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// Where errors about the payload as a whole are reported.
pub const BODY_LOC: &str = "body";

/// Field errors collected in a stable order.
#[derive(Debug, Default)]
pub struct SchemaErrors {
    entries: Vec<(String, String)>,
}

impl SchemaErrors {
    pub fn push_body(&mut self, msg: impl Into<String>) {
        self.entries.push((BODY_LOC.to_string(), msg.into()));
    }

    pub fn push_field(&mut self, field: &str, msg: impl Into<String>) {
        self.entries.push((field.to_string(), msg.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One error keeps its own loc. Several are folded into one message
    /// against the body.
    pub fn into_error(self) -> KennelError {
        match self.entries.as_slice() {
            [] => KennelError::validation(BODY_LOC, "invalid payload"),
            [(loc, msg)] => KennelError::validation(loc.as_str(), msg.as_str()),
            many => {
                let msg = many
                    .iter()
                    .map(|(loc, msg)| format!("{loc}: {msg}"))
                    .collect::<Vec<_>>()
                    .join("; ");
                KennelError::validation(BODY_LOC, msg)
            }
        }
    }

    pub fn into_anyhow(self) -> anyhow::Error {
        self.into_error().into_anyhow()
    }
}

fn friendly_message(code: &str) -> Option<&'static str> {
    match code {
        "required" => Some("is required"),
        "length" => Some("has invalid length"),
        "range" => Some("is out of range"),
        _ => None,
    }
}

fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

fn push_validation_errors(out: &mut SchemaErrors, prefix: &str, errs: &ValidationErrors) {
    let mut fields: Vec<_> = errs.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in fields {
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let key = join_path(prefix, field);
                for e in field_errors {
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .or_else(|| friendly_message(&e.code).map(|m| m.to_string()))
                        .unwrap_or_else(|| e.code.to_string());
                    out.push_field(&key, msg);
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                let next = join_path(prefix, field);
                push_validation_errors(out, &next, nested.as_ref());
            }
            ValidationErrorsKind::List(items) => {
                let base = join_path(prefix, field);
                for (idx, nested) in items {
                    let next = format!("{base}[{idx}]");
                    push_validation_errors(out, &next, nested.as_ref());
                }
            }
        }
    }
}

/// Validation failure about the payload as a whole.
pub fn body_error(msg: impl Into<String>) -> anyhow::Error {
    KennelError::validation(BODY_LOC, msg).into_anyhow()
}

/// Deserialize `data` into `T` and run its `validator` rules.
pub fn validate<T>(data: &Value) -> anyhow::Result<T>
where
    T: DeserializeOwned + Validate,
{
    let parsed: T = serde_json::from_value(data.clone()).map_err(|e| body_error(e.to_string()))?;

    parsed.validate().map_err(|e| {
        let mut out = SchemaErrors::default();
        push_validation_errors(&mut out, "", &e);
        out.into_anyhow()
    })?;

    Ok(parsed)
}

use serde_json::Value;
use thiserror::Error;

use crate::{
    error::TripError,
    schemas::{validate_against_schema, ReplySchema},
};

/// Why a model reply could not be turned into a typed value.
#[derive(Debug, Error)]
pub enum ReplyError {
    /// The reply is not JSON at all.
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
    /// The reply is JSON but does not have the requested shape.
    #[error("{0}")]
    Shape(String),
}

/// Parse a raw model reply into `T`.
///
/// Surrounding whitespace and a Markdown code fence are removed before
/// decoding. The decoded value is checked against `T`'s schema so that a
/// missing field is reported with its JSON path instead of failing later.
pub fn parse_reply<T: ReplySchema>(raw: &str) -> Result<T, ReplyError> {
    let body = strip_code_fence(raw.trim());
    let value: Value = serde_json::from_str(body)?;

    let schema = T::schema();
    validate_against_schema(schema, &value).map_err(|err| match err {
        TripError::Validation(details) => ReplyError::Shape(details),
        other => ReplyError::Shape(other.to_string()),
    })?;

    let raw_value = value.to_string();
    let mut deserializer = serde_json::Deserializer::from_str(&raw_value);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        let path = err.path().to_string();
        let location = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        ReplyError::Shape(format!(
            "failed to deserialize `{}` at {}: {}",
            schema.schema_name(),
            location,
            err.into_inner()
        ))
    })
}

fn strip_code_fence(body: &str) -> &str {
    let Some(rest) = body.strip_prefix("```") else {
        return body;
    };
    let Some(rest) = rest.strip_suffix("```") else {
        return body;
    };
    // drop the info string, e.g. ```json
    match rest.find('\n') {
        Some(newline) => rest[newline + 1..].trim(),
        None => rest.trim(),
    }
}

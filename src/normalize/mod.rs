//! Response normalizer: coerces a free-text model reply into the report shape.
//!
//! The pipeline is linear and stops at the first failure:
//!
//! 1. Strip a leading markdown code fence (```` ```json ```` or bare ```` ``` ````).
//! 2. Parse the remainder strictly as a JSON object (`MalformedJson` otherwise).
//! 3. Check that `injury_name`, `first_aid_steps` and `severity` are present
//!    (`MissingFields` otherwise).
//! 4. Return the parsed object unchanged.
//!
//! Field types are deliberately not inspected here. [`NormalizedReply::to_report`]
//! offers the typed check as a separate, opt-in step.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod strict;

use crate::error::{RelayError, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Keys every accepted reply must carry, in reporting order.
pub const REQUIRED_FIELDS: [&str; 3] = ["injury_name", "first_aid_steps", "severity"];

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// A reply that passed normalization: a JSON object holding every required key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NormalizedReply(Map<String, Value>);

impl NormalizedReply {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Remove markdown code fences wrapped around a reply.
///
/// Only applies when the reply starts with a fence. A ```` ```json ```` opener
/// removes every ```` ```json ```` and ```` ``` ```` token; a bare opener removes
/// every ```` ``` ```` token. The result is trimmed. Other replies are returned as-is.
pub fn strip_code_fences(raw: &str) -> String {
    if raw.starts_with(JSON_FENCE) {
        raw.replace(JSON_FENCE, "").replace(FENCE, "").trim().to_string()
    } else if raw.starts_with(FENCE) {
        raw.replace(FENCE, "").trim().to_string()
    } else {
        raw.to_string()
    }
}

/// Required keys absent from `object`, in [`REQUIRED_FIELDS`] order.
pub fn missing_fields(object: &Map<String, Value>) -> Vec<String> {
    REQUIRED_FIELDS
        .iter()
        .filter(|field| !object.contains_key(**field))
        .map(|field| field.to_string())
        .collect()
}

/// Run the full normalization contract over a raw model reply.
pub fn normalize_reply(raw: &str) -> Result<NormalizedReply> {
    let cleaned = strip_code_fences(raw);
    debug!("Cleaned response: {}", cleaned);

    let object = match serde_json::from_str::<Value>(&cleaned) {
        Ok(Value::Object(object)) => object,
        Ok(other) => {
            warn!("Model reply is JSON but not an object: {}", json_type(&other));
            return Err(RelayError::MalformedJson {
                raw: raw.to_string(),
            });
        }
        Err(e) => {
            warn!("JSON parsing error: {}", e);
            warn!("Raw response that failed to parse: {}", raw);
            return Err(RelayError::MalformedJson {
                raw: raw.to_string(),
            });
        }
    };

    let missing = missing_fields(&object);
    if !missing.is_empty() {
        warn!("Response missing required fields: {}", missing.join(", "));
        return Err(RelayError::MissingFields(missing));
    }

    debug!("All required fields present in response");
    Ok(NormalizedReply(object))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

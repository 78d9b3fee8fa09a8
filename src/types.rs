//! Core types for usuarios

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// User ID type, assigned by the database on insert
pub type UserId = u32;

/// A row of the `usuarios` table
///
/// Missing fields decode to their zero values and unknown fields are
/// ignored, so `{}` is a valid (empty) user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: UserId,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
}

impl User {
    /// Decode a request body.
    ///
    /// `null` decodes to the zero-valued user. Keys match field names
    /// case-insensitively; an exact-case key wins over other spellings.
    pub fn from_request_body(body: &[u8]) -> serde_json::Result<Self> {
        let value = match serde_json::from_slice::<Value>(body)? {
            Value::Null => return Ok(User::default()),
            Value::Object(fields) => Value::Object(canonical_keys(fields)),
            other => {
                return Err(serde::de::Error::custom(format!(
                    "expected a JSON object, found {}",
                    other
                )))
            }
        };

        serde_json::from_value(value)
    }
}

const FIELD_NAMES: [&str; 3] = ["id", "nome", "email"];

fn canonical_keys(fields: Map<String, Value>) -> Map<String, Value> {
    let mut exact = Map::new();
    let mut folded = Map::new();

    for (key, value) in fields {
        match FIELD_NAMES.iter().find(|name| name.eq_ignore_ascii_case(&key)) {
            Some(name) if *name == key => {
                exact.insert(key, value);
            }
            Some(name) => {
                folded.insert(name.to_string(), value);
            }
            None => {}
        }
    }

    for (key, value) in folded {
        exact.entry(key).or_insert(value);
    }
    exact
}

/// Parse a path segment as a decimal unsigned 32-bit id.
///
/// Only ASCII digits are accepted: no sign, no whitespace.
pub fn parse_user_id(raw: &str) -> Result<UserId> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidId(format!("'{}' is not a decimal id", raw)));
    }

    raw.parse::<UserId>()
        .map_err(|e| Error::InvalidId(format!("'{}': {}", raw, e)))
}

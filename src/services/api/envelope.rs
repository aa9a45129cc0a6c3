//! Response normalisation.
//!
//! The marketplace backend is inconsistent about where it puts a payload:
//! `{"data": {"order": {...}}}`, `{"data": {...}}`, `{"order": {...}}` and a
//! bare object all occur for the same endpoint family. Every response goes
//! through [`normalize_payload`] once, here, so nothing downstream has to guess.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;

/// Extract a `T` from `value`, trying each known envelope shape in turn.
pub fn normalize_payload<T: DeserializeOwned>(value: Value, key: &str) -> Result<T, ApiError> {
    let candidates = [
        value.get("data").and_then(|data| data.get(key)),
        value.get("data"),
        value.get(key),
        Some(&value),
    ];

    let mut last_error: Option<serde_json::Error> = None;
    for candidate in candidates.into_iter().flatten() {
        if candidate.is_null() {
            continue;
        }
        match T::deserialize(candidate) {
            Ok(payload) => return Ok(payload),
            Err(err) => last_error = Some(err),
        }
    }

    match last_error {
        Some(err) => {
            log::debug!("No envelope shape matched '{}': {}", key, err);
            Err(ApiError::MissingPayload(key.to_string()))
        }
        None => Err(ApiError::MissingPayload(key.to_string())),
    }
}

/// Human-readable error text from an error body, if the backend sent one
pub fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.trim().chars().take(200).collect();
    };

    ["message", "error", "msg"]
        .iter()
        .filter_map(|key| {
            value
                .get(*key)
                .or_else(|| value.get("data").and_then(|d| d.get(*key)))
        })
        .find_map(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

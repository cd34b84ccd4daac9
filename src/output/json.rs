//! JSON output for subnet results.

use serde::Serialize;

/// Pretty-printed JSON for any result type.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

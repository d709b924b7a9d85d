//! Status document model.
//!
//! The microphone unit serves a flat JSON object from `/status.json`:
//!
//! ```json
//! {"hostname": "birdclient-1a2b", "ip": "10.0.0.12", "ping": 3,
//!  "uptime": "3600", "wifi_rssi": "-61", "wifi_ssid": "BirdEdge",
//!  "wifi_pass": "BirdsAndBats", "heap": 182344, "streaming": false,
//!  "battery": 3.91}
//! ```
//!
//! Values are kept in their display form. The document is read-only and
//! fetched fresh on every poll.

use serde_json::{Map, Value};

use crate::error::PollError;

/// Path of the status resource relative to the device base URL.
pub const STATUS_PATH: &str = "status.json";

/// Field names the firmware reports, in display order.
pub const KNOWN_FIELDS: &[&str] = &[
    "hostname",
    "ip",
    "ping",
    "uptime",
    "wifi_rssi",
    "wifi_ssid",
    "wifi_pass",
    "heap",
    "streaming",
    "battery",
];

/// Field-name to display-value mapping from one poll.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusDocument {
    fields: Map<String, Value>,
}

impl StatusDocument {
    /// Parse a response body. Anything other than a JSON object is rejected.
    pub fn parse(body: &[u8]) -> Result<Self, PollError> {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(fields)) => Ok(Self { fields }),
            Ok(other) => Err(PollError::Parse(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
            Err(e) => Err(PollError::Parse(e.to_string())),
        }
    }

    /// Number of fields in the document.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the document has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Display text for one field, if present.
    pub fn get(&self, key: &str) -> Option<String> {
        self.fields.get(key).map(display_value)
    }

    /// Iterate over `(field name, display text)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), display_value(value)))
    }
}

impl FromIterator<(String, Value)> for StatusDocument {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Coerce a JSON value to the text shown on screen.
///
/// Strings are shown without quotes, `null` as empty, everything else in its
/// compact JSON form.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

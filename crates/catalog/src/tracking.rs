//! Shipment tracking records, keyed by tracking id.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const UNKNOWN: &str = "Unknown";
const NO_UPDATE: &str = "N/A";

#[derive(Debug, Clone, PartialEq)]
pub enum TrackingError {
    Unavailable(String),
    Corrupt(String),
    NotFound(String),
}

impl TrackingError {
    /// Message safe to show to site visitors.
    pub fn public_message(&self) -> &'static str {
        match self {
            TrackingError::Unavailable(_) => "System Error: Database Unavailable",
            TrackingError::Corrupt(_) => "System Error: Database Corrupt",
            TrackingError::NotFound(_) => {
                "Tracking ID not found. Please verify your ID or contact support."
            }
        }
    }
}

impl std::fmt::Display for TrackingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackingError::Unavailable(msg) => write!(f, "shipment database unavailable: {msg}"),
            TrackingError::Corrupt(msg) => write!(f, "shipment database corrupt: {msg}"),
            TrackingError::NotFound(id) => write!(f, "tracking id {id:?} not found"),
        }
    }
}

impl std::error::Error for TrackingError {}

/// A stored shipment as entered by staff: a loose JSON object whose fields
/// are all optional and passed through untouched.
pub type ShipmentRecord = Map<String, Value>;

/// Normalized answer of the tracking API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingResponse {
    pub tracking_id: String,
    pub courier: Value,
    pub status: Value,
    pub current_location: Value,
    pub last_update: Value,
    pub history: Value,
}

/// Records are only checked when looked up, so one malformed entry never
/// hides the others.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipmentDb {
    records: BTreeMap<String, Value>,
}

impl ShipmentDb {
    pub fn from_json_str(json: &str) -> Result<Self, TrackingError> {
        let records: BTreeMap<String, Value> =
            serde_json::from_str(json).map_err(|e| TrackingError::Corrupt(e.to_string()))?;
        Ok(Self { records })
    }

    pub fn insert(&mut self, id: impl Into<String>, record: ShipmentRecord) {
        self.records.insert(id.into(), Value::Object(record));
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up `id` after upper-casing it; stored keys are upper case.
    pub fn lookup(&self, id: &str) -> Result<TrackingResponse, TrackingError> {
        let key = id.to_uppercase();
        let record = match self.records.get(&key) {
            Some(Value::Object(record)) => record,
            Some(other) => {
                return Err(TrackingError::Corrupt(format!(
                    "record {key:?} is not an object: {other}"
                )));
            }
            None => return Err(TrackingError::NotFound(key)),
        };

        let field = |name: &str| {
            record
                .get(name)
                .cloned()
                .unwrap_or_else(|| Value::from(UNKNOWN))
        };
        let history = record
            .get("history")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()));
        let last_update = history
            .get(0)
            .and_then(|entry| entry.get("date"))
            .cloned()
            .unwrap_or_else(|| Value::from(NO_UPDATE));

        Ok(TrackingResponse {
            courier: field("courier"),
            status: field("status"),
            current_location: field("current_location"),
            last_update,
            history,
            tracking_id: key,
        })
    }
}

// Wire types for the Sure Petcare cloud API
//
// Every payload arrives wrapped in a `{ "data": ... }` envelope. Fields
// use `#[serde(default)]` liberally because the API omits whole sections
// freely, and flatten catch-alls keep undocumented fields available.

use serde::Deserialize;
use serde_json::{Map, Value};

// ── Login ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginEnvelope {
    pub data: LoginData,
}

#[derive(Debug, Deserialize)]
pub struct LoginData {
    pub token: String,
}

// ── Bulk sync ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SyncEnvelope {
    #[serde(default)]
    pub data: SyncData,
}

/// The `me/start` payload: every device and pet on the account, plus
/// households, tags and user info (kept raw in `extra`).
///
/// Device and pet records stay untyped here; classification into domain
/// entities is the consumer's concern.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyncData {
    #[serde(default)]
    pub devices: Vec<Value>,
    #[serde(default)]
    pub pets: Vec<Value>,
    /// households, tags, user, ... -- everything this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Household report ─────────────────────────────────────────────────

/// Movement/feeding/drinking report for one household:
/// `{ "data": [ { pet_id, device_id, movement, feeding, drinking }, ... ] }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HouseholdReport {
    #[serde(default)]
    pub data: Vec<ReportPairing>,
}

/// One pet/device pairing within a household report.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportPairing {
    pub pet_id: i64,
    pub device_id: i64,
    #[serde(default)]
    pub movement: DatapointSeries,
    #[serde(default)]
    pub feeding: DatapointSeries,
    #[serde(default)]
    pub drinking: DatapointSeries,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A chronologically ascending list of datapoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatapointSeries {
    #[serde(default)]
    pub datapoints: Vec<Value>,
}

impl DatapointSeries {
    /// The most recent datapoint (the final list element).
    pub fn latest(&self) -> Option<&Value> {
        self.datapoints.last()
    }
}

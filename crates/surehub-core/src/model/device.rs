// ── Device records ──
//
// Typed projections of the raw device records in the sync payload. The
// cloud API is inconsistent about field presence across hardware
// generations, so optional fields plus a flatten catch-all mirror the
// raw record without loss.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::product::ProductKind;

// Battery pack: four AA cells; usable voltage range per cell.
const BATTERY_CELLS: f64 = 4.0;
const BATTERY_VOLTAGE_LOW: f64 = 1.25;
const BATTERY_VOLTAGE_FULL: f64 = 1.6;

/// One device record from the sync payload.
///
/// The `latest_*` fields never come off the wire; activity enrichment
/// attaches them after resolving a household report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub id: i64,
    /// Vendor product code; arrives as string or integer.
    #[serde(default, deserialize_with = "de_product_code")]
    pub product_id: i64,
    #[serde(default)]
    pub household_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub mac_address: Option<String>,
    /// Hubs have no parent; everything else pairs through one.
    #[serde(default)]
    pub parent_device_id: Option<i64>,
    #[serde(default)]
    pub status: Option<DeviceStatus>,
    /// Most recent movement datapoint, attached by activity enrichment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_movement: Option<Value>,
    /// Most recent feeding datapoint, attached by activity enrichment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_feeding: Option<Value>,
    /// Most recent drinking datapoint, attached by activity enrichment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_drinking: Option<Value>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DeviceRecord {
    pub fn kind(&self) -> ProductKind {
        ProductKind::from_code(self.product_id)
    }

    /// Battery level in percent, derived from the reported pack voltage.
    /// `None` for mains-powered devices (hubs) and unreported status.
    pub fn battery_level(&self) -> Option<u8> {
        let voltage = self.status.as_ref()?.battery?;
        let per_cell = voltage / BATTERY_CELLS;
        let percent =
            (per_cell - BATTERY_VOLTAGE_LOW) / (BATTERY_VOLTAGE_FULL - BATTERY_VOLTAGE_LOW) * 100.0;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
        let level = percent.clamp(0.0, 100.0).round() as u8;
        Some(level)
    }

    pub fn online(&self) -> bool {
        self.status.as_ref().is_some_and(|s| s.online)
    }
}

/// Nested `status` object of a device record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceStatus {
    #[serde(default)]
    pub online: bool,
    /// Battery pack voltage; absent on mains-powered hubs.
    #[serde(default)]
    pub battery: Option<f64>,
    #[serde(default)]
    pub signal: Option<Signal>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Radio link quality between a device and its hub.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    #[serde(default)]
    pub device_rssi: Option<f64>,
    #[serde(default)]
    pub hub_rssi: Option<f64>,
}

// ── Device trait ─────────────────────────────────────────────────────

/// Shared surface of every hardware device entity.
pub trait Device {
    fn record(&self) -> &DeviceRecord;
    fn record_mut(&mut self) -> &mut DeviceRecord;

    fn id(&self) -> i64 {
        self.record().id
    }

    fn household_id(&self) -> Option<i64> {
        self.record().household_id
    }

    fn name(&self) -> Option<&str> {
        self.record().name.as_deref()
    }

    fn serial_number(&self) -> Option<&str> {
        self.record().serial_number.as_deref()
    }

    fn kind(&self) -> ProductKind {
        self.record().kind()
    }

    fn battery_level(&self) -> Option<u8> {
        self.record().battery_level()
    }

    fn online(&self) -> bool {
        self.record().online()
    }
}

// ── Device variants ──────────────────────────────────────────────────

/// Cat or pet door flap.
#[derive(Debug, Clone, PartialEq)]
pub struct Flap {
    pub(crate) record: DeviceRecord,
}

impl Flap {
    pub(crate) fn new(record: DeviceRecord) -> Self {
        Self { record }
    }

    /// Most recent movement through this flap, once enrichment has run.
    pub fn latest_movement(&self) -> Option<&Value> {
        self.record.latest_movement.as_ref()
    }
}

impl Device for Flap {
    fn record(&self) -> &DeviceRecord {
        &self.record
    }

    fn record_mut(&mut self) -> &mut DeviceRecord {
        &mut self.record
    }
}

/// Food dispenser (connect or lite).
#[derive(Debug, Clone, PartialEq)]
pub struct Feeder {
    pub(crate) record: DeviceRecord,
}

impl Feeder {
    pub(crate) fn new(record: DeviceRecord) -> Self {
        Self { record }
    }

    /// Most recent feeding at this bowl, once enrichment has run.
    pub fn latest_feeding(&self) -> Option<&Value> {
        self.record.latest_feeding.as_ref()
    }
}

impl Device for Feeder {
    fn record(&self) -> &DeviceRecord {
        &self.record
    }

    fn record_mut(&mut self) -> &mut DeviceRecord {
        &mut self.record
    }
}

/// Felaqua water station.
#[derive(Debug, Clone, PartialEq)]
pub struct Felaqua {
    pub(crate) record: DeviceRecord,
}

impl Felaqua {
    pub(crate) fn new(record: DeviceRecord) -> Self {
        Self { record }
    }

    /// Most recent drinking at this station, once enrichment has run.
    pub fn latest_drinking(&self) -> Option<&Value> {
        self.record.latest_drinking.as_ref()
    }
}

impl Device for Felaqua {
    fn record(&self) -> &DeviceRecord {
        &self.record
    }

    fn record_mut(&mut self) -> &mut DeviceRecord {
        &mut self.record
    }
}

/// The radio hub everything else pairs through.
#[derive(Debug, Clone, PartialEq)]
pub struct Hub {
    pub(crate) record: DeviceRecord,
}

impl Hub {
    pub(crate) fn new(record: DeviceRecord) -> Self {
        Self { record }
    }
}

impl Device for Hub {
    fn record(&self) -> &DeviceRecord {
        &self.record
    }

    fn record_mut(&mut self) -> &mut DeviceRecord {
        &mut self.record
    }
}

// ── Deserialization helpers ──────────────────────────────────────────

/// `product_id` arrives as a bare integer or a numeric string.
fn de_product_code<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| serde::de::Error::custom("product_id is not an integer")),
        Value::String(s) => s
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("product_id is not numeric: {s}"))),
        Value::Null => Ok(0),
        other => Err(serde::de::Error::custom(format!(
            "unexpected product_id: {other}"
        ))),
    }
}

// ── Sync payload classification ──
//
// Turns the raw device/pet records of one bulk sync payload into typed
// entities and applies them to the store. Records are processed in
// payload order; a later record with the same id overwrites an earlier
// one within the same pass.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use surehub_api::models::SyncData;

use super::EntityStore;
use crate::model::{Entity, Feeder, Felaqua, Flap, Hub, Pet, ProductKind};

impl EntityStore {
    /// Classify one sync payload and apply it to the store.
    ///
    /// Returns the distinct household ids seen in this pass; they drive
    /// the per-household activity-report fan-out. Unknown product codes
    /// and malformed records are skipped with a warning and leave the
    /// store untouched.
    pub(crate) fn apply_sync(&mut self, payload: &SyncData) -> HashSet<i64> {
        let mut household_ids = HashSet::new();

        for raw in payload.devices.iter().chain(payload.pets.iter()) {
            let Some(entity) = classify(raw) else { continue };

            if let Some(household_id) = entity.household_id() {
                household_ids.insert(household_id);
            }
            self.upsert(entity);
        }

        household_ids
    }
}

/// Classify one raw record by its vendor product code.
///
/// Pets carry no `product_id`; the absent field coerces to `0`, the pet
/// code. Returns `None` (after a warning) for unknown codes and records
/// that fail to decode.
fn classify(raw: &Value) -> Option<Entity> {
    let kind = ProductKind::from_code(product_code(raw)?);

    match kind {
        ProductKind::CatFlap | ProductKind::PetFlap => {
            decode(raw, kind).map(Flap::new).map(Entity::Flap)
        }
        ProductKind::Feeder | ProductKind::FeederLite => {
            decode(raw, kind).map(Feeder::new).map(Entity::Feeder)
        }
        ProductKind::Felaqua => decode(raw, kind).map(Felaqua::new).map(Entity::Felaqua),
        ProductKind::Hub => decode(raw, kind).map(Hub::new).map(Entity::Hub),
        ProductKind::Pet => decode::<Pet>(raw, kind).map(Entity::Pet),
        ProductKind::Unknown(code) => {
            warn!(
                code,
                name = raw.get("name").and_then(|v| v.as_str()).unwrap_or("-"),
                "unknown entity type -- skipping record"
            );
            None
        }
    }
}

fn decode<T: DeserializeOwned>(raw: &Value, kind: ProductKind) -> Option<T> {
    match T::deserialize(raw) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            warn!(%kind, error = %e, "malformed record -- skipping");
            None
        }
    }
}

/// The raw `product_id`, coerced from integer or string; absent and
/// null coerce to `0`. A non-numeric value is unclassifiable.
fn product_code(raw: &Value) -> Option<i64> {
    match raw.get("product_id") {
        None | Some(Value::Null) => Some(0),
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.parse().ok(),
        Some(other) => {
            warn!(%other, "unreadable product_id -- skipping record");
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn payload(devices: Vec<Value>, pets: Vec<Value>) -> SyncData {
        serde_json::from_value(json!({ "devices": devices, "pets": pets })).unwrap()
    }

    #[test]
    fn classifies_each_known_code() {
        let mut store = EntityStore::new();

        let households = store.apply_sync(&payload(
            vec![
                json!({ "id": 1, "product_id": 1, "household_id": 5 }),
                json!({ "id": 3, "product_id": 3, "household_id": 5 }),
                json!({ "id": 4, "product_id": 4, "household_id": 5 }),
                json!({ "id": 6, "product_id": "6", "household_id": 5 }),
                json!({ "id": 7, "product_id": 7, "household_id": 5 }),
                json!({ "id": 8, "product_id": 8, "household_id": 5 }),
            ],
            vec![json!({ "id": 20, "household_id": 5 })],
        ));

        assert_eq!(store.len(), 7);
        assert_eq!(households, HashSet::from([5]));
        assert!(matches!(store.get(1), Some(Entity::Hub(_))));
        assert!(matches!(store.get(3), Some(Entity::Flap(_))));
        assert!(matches!(store.get(4), Some(Entity::Feeder(_))));
        assert!(matches!(store.get(6), Some(Entity::Flap(_))));
        assert!(matches!(store.get(7), Some(Entity::Feeder(_))));
        assert!(matches!(store.get(8), Some(Entity::Felaqua(_))));
        assert!(matches!(store.get(20), Some(Entity::Pet(_))));
        assert_eq!(store.get(6).unwrap().kind(), ProductKind::CatFlap);
        assert_eq!(store.get(3).unwrap().kind(), ProductKind::PetFlap);
    }

    #[test]
    fn unknown_code_is_skipped() {
        let mut store = EntityStore::new();

        store.apply_sync(&payload(
            vec![json!({ "id": 2, "product_id": 2, "household_id": 5 })],
            vec![],
        ));

        assert_eq!(store.len(), 0);
        assert!(store.get(2).is_none());
    }

    #[test]
    fn malformed_record_is_skipped() {
        let mut store = EntityStore::new();

        store.apply_sync(&payload(vec![json!({ "product_id": 6 })], vec![]));

        assert_eq!(store.len(), 0);
    }

    #[test]
    fn later_duplicate_id_wins_within_a_pass() {
        let mut store = EntityStore::new();

        store.apply_sync(&payload(
            vec![
                json!({ "id": 10, "product_id": 6, "household_id": 5, "name": "old" }),
                json!({ "id": 10, "product_id": 6, "household_id": 5, "name": "new" }),
            ],
            vec![],
        ));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(10).unwrap().name(), Some("new"));
    }

    #[test]
    fn refresh_never_removes_entries() {
        let mut store = EntityStore::new();

        store.apply_sync(&payload(
            vec![json!({ "id": 1, "product_id": 1, "household_id": 5 })],
            vec![],
        ));
        store.apply_sync(&payload(
            vec![json!({ "id": 2, "product_id": 8, "household_id": 5 })],
            vec![],
        ));

        assert_eq!(store.len(), 2);
        assert!(store.get(1).is_some());
    }
}

// ── Pet records ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One pet record from the sync payload.
///
/// Pets carry no `product_id`; classification reaches this type through
/// the `0` fallback code. The activity/feeding/drinking summaries under
/// `status` stay raw -- their shape varies by device generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: i64,
    #[serde(default)]
    pub household_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    /// Vendor gender code.
    #[serde(default)]
    pub gender: Option<i64>,
    #[serde(default)]
    pub date_of_birth: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tag_id: Option<i64>,
    #[serde(default)]
    pub photo: Option<Photo>,
    #[serde(default)]
    pub status: Option<PetStatus>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Pet {
    pub fn photo_url(&self) -> Option<&str> {
        self.photo.as_ref().and_then(|p| p.location.as_deref())
    }

    /// Latest flap activity summary from the sync payload.
    pub fn activity(&self) -> Option<&Value> {
        self.status.as_ref().and_then(|s| s.activity.as_ref())
    }

    /// Latest feeding summary from the sync payload.
    pub fn feeding(&self) -> Option<&Value> {
        self.status.as_ref().and_then(|s| s.feeding.as_ref())
    }

    /// Latest drinking summary from the sync payload.
    pub fn drinking(&self) -> Option<&Value> {
        self.status.as_ref().and_then(|s| s.drinking.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-pet summaries embedded in the sync payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PetStatus {
    #[serde(default)]
    pub activity: Option<Value>,
    #[serde(default)]
    pub feeding: Option<Value>,
    #[serde(default)]
    pub drinking: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn pet_decodes_with_minimal_fields() {
        let pet: Pet = serde_json::from_value(json!({ "id": 20, "household_id": 5 })).unwrap();
        assert_eq!(pet.id, 20);
        assert_eq!(pet.household_id, Some(5));
        assert_eq!(pet.name, None);
        assert_eq!(pet.activity(), None);
    }

    #[test]
    fn pet_status_summaries() {
        let pet: Pet = serde_json::from_value(json!({
            "id": 20,
            "name": "Flocke",
            "photo": { "id": 1, "location": "https://example.com/flocke.jpg" },
            "status": { "activity": { "since": "2024-06-01T10:00:00+00:00", "where": 1 } }
        }))
        .unwrap();

        assert_eq!(pet.photo_url(), Some("https://example.com/flocke.jpg"));
        assert_eq!(
            pet.activity().and_then(|a| a.get("where")),
            Some(&json!(1))
        );
    }
}

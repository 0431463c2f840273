// ── Entity store ──
//
// Process-wide map of every entity the account has resolved, keyed by
// id. Single-writer: refresh and enrichment run on `&mut self`, reads
// are plain projections, no internal synchronization. Entries are only
// ever inserted or overwritten, never removed -- a refresh that drops a
// device from the payload leaves the stale entry in place.

mod refresh;

use std::collections::HashMap;

use crate::model::{Entity, Pet};

#[derive(Debug, Default)]
pub struct EntityStore {
    entities: HashMap<i64, Entity>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            entities: HashMap::new(),
        }
    }

    // ── Lookups ──────────────────────────────────────────────────────

    pub fn get(&self, id: i64) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: i64) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    // ── Projections ──────────────────────────────────────────────────

    /// The full id → entity map.
    pub fn all(&self) -> &HashMap<i64, Entity> {
        &self.entities
    }

    pub fn pets(&self) -> impl Iterator<Item = &Pet> {
        self.entities.values().filter_map(Entity::as_pet)
    }

    pub fn devices(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values().filter(|e| e.is_device())
    }

    // ── Mutation ─────────────────────────────────────────────────────

    /// Insert or overwrite; the id comes from the entity itself.
    pub(crate) fn upsert(&mut self, entity: Entity) {
        self.entities.insert(entity.id(), entity);
    }
}

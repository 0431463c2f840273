// ── Surehub facade ──
//
// The public entry point: owns the API client and the entity store and
// orchestrates sync resolution plus activity enrichment. Every
// operation is a single await chain -- no background tasks, no internal
// locking; the store's one writer is whoever holds `&mut Surehub`.

use std::collections::HashMap;

use secrecy::SecretString;
use serde_json::Value;
use tracing::{debug, warn};

use surehub_api::transport::TransportConfig;
use surehub_api::{Credentials, SureApiClient};

use crate::config::{AuthCredentials, SurehubConfig};
use crate::error::CoreError;
use crate::model::{DeviceRecord, Entity, Pet, ProductKind};
use crate::store::EntityStore;

/// Timeline entry type carrying Felaqua water weights.
const WEIGHT_TIMELINE_TYPE: i64 = 30;

/// High-level handle to one Sure Petcare account.
pub struct Surehub {
    api: SureApiClient,
    store: EntityStore,
}

impl Surehub {
    /// Create a client from configuration. Does not touch the network;
    /// login happens lazily on the first call.
    pub fn new(config: SurehubConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
        };

        let credentials = match config.auth {
            AuthCredentials::Token(token) => Credentials::Token(token),
            AuthCredentials::Credentials { email, password } => {
                Credentials::EmailPassword { email, password }
            }
        };

        let api = SureApiClient::with_base_url(config.base_url, credentials, &transport)?;

        Ok(Self {
            api,
            store: EntityStore::new(),
        })
    }

    /// Convenience constructor for email/password accounts.
    pub fn with_credentials(
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, CoreError> {
        Self::new(SurehubConfig::new(AuthCredentials::Credentials {
            email: email.into(),
            password: SecretString::from(password.into()),
        }))
    }

    /// Convenience constructor for a pre-acquired auth token.
    pub fn with_token(token: impl Into<String>) -> Result<Self, CoreError> {
        Self::new(SurehubConfig::new(AuthCredentials::Token(token.into())))
    }

    /// The auth token currently in use, if any.
    pub fn auth_token(&self) -> Option<&str> {
        self.api.auth_token()
    }

    /// Read access to the underlying API client (resource cache etc.).
    pub fn api(&self) -> &SureApiClient {
        &self.api
    }

    /// Read access to the resolved entity map.
    pub fn entities(&self) -> &HashMap<i64, Entity> {
        self.store.all()
    }

    // ── Entity resolution ────────────────────────────────────────────

    /// Resolve the bulk sync payload into the entity map and enrich it
    /// with each household's latest activity.
    ///
    /// Reuses the cached payload unless `force_refresh`. A missing or
    /// empty payload degrades softly: the existing (possibly empty) map
    /// is returned unchanged. Authentication failures propagate.
    ///
    /// The returned map spans every resolution so far -- entries are
    /// never purged, a refresh only adds and overwrites.
    pub async fn get_entities(
        &mut self,
        force_refresh: bool,
    ) -> Result<&HashMap<i64, Entity>, CoreError> {
        let payload = match self.api.sync(force_refresh).await {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                warn!("could not fetch sync data -- keeping previously resolved entities");
                return Ok(self.store.all());
            }
            Err(e) if e.is_auth_expired() => return Err(e.into()),
            Err(e) => {
                warn!(error = %e, "sync fetch failed -- keeping previously resolved entities");
                return Ok(self.store.all());
            }
        };

        if payload.devices.is_empty() && payload.pets.is_empty() {
            warn!("sync payload carried no devices or pets -- keeping previously resolved entities");
            return Ok(self.store.all());
        }

        let household_ids = self.store.apply_sync(&payload);
        debug!(
            entities = self.store.len(),
            households = household_ids.len(),
            "sync resolution complete"
        );

        // One report fetch per distinct household, sequentially; the
        // store has a single writer.
        for household_id in household_ids {
            self.get_actions(household_id, None, true).await?;
        }

        Ok(self.store.all())
    }

    // ── Activity enrichment ──────────────────────────────────────────

    /// Fetch one household's movement/feeding/drinking report and
    /// attach the most recent datapoint to each paired device: flaps
    /// get `latest_movement`, feeders `latest_feeding`, Felaquas
    /// `latest_drinking`. An empty datapoint list leaves the device
    /// untouched.
    ///
    /// Returns pet id → the owning device's full record after
    /// enrichment. Pairings that reference a device missing from the
    /// entity map are skipped with a warning.
    ///
    /// `only_latest` selects the same "latest" semantics on both paths;
    /// complete datapoint histories stay available through
    /// [`get_report`](Self::get_report).
    pub async fn get_actions(
        &mut self,
        household_id: i64,
        pet_id: Option<i64>,
        only_latest: bool,
    ) -> Result<HashMap<i64, DeviceRecord>, CoreError> {
        debug!(household_id, ?pet_id, only_latest, "fetching household report");

        let report = match self.api.household_report(household_id, pet_id).await {
            Ok(report) => report,
            Err(e) if e.is_auth_expired() => return Err(e.into()),
            Err(e) => {
                warn!(error = %e, household_id, "report fetch failed");
                return Ok(HashMap::new());
            }
        };

        let mut actions = HashMap::new();

        for pair in &report.data {
            let Some(entity) = self.store.get_mut(pair.device_id) else {
                warn!(
                    device_id = pair.device_id,
                    pet_id = pair.pet_id,
                    "report references a device missing from the entity map -- skipping pairing"
                );
                continue;
            };
            let Some(record) = entity.device_mut() else {
                warn!(
                    device_id = pair.device_id,
                    "report pairing points at a non-device entity -- skipping"
                );
                continue;
            };

            match record.kind() {
                kind if kind.is_flap() => {
                    if let Some(datapoint) = pair.movement.latest() {
                        record.latest_movement = Some(datapoint.clone());
                    }
                }
                kind if kind.is_feeder() => {
                    if let Some(datapoint) = pair.feeding.latest() {
                        record.latest_feeding = Some(datapoint.clone());
                    }
                }
                ProductKind::Felaqua => {
                    if let Some(datapoint) = pair.drinking.latest() {
                        record.latest_drinking = Some(datapoint.clone());
                    }
                }
                _ => {}
            }

            actions.insert(pair.pet_id, record.clone());
        }

        Ok(actions)
    }

    /// Latest action per pet for one household.
    pub async fn latest_actions(
        &mut self,
        household_id: i64,
        pet_id: Option<i64>,
    ) -> Result<HashMap<i64, DeviceRecord>, CoreError> {
        self.get_actions(household_id, pet_id, true).await
    }

    /// All actions per pet; see [`get_actions`](Self::get_actions) for
    /// the semantics note.
    pub async fn all_actions(
        &mut self,
        household_id: i64,
        pet_id: Option<i64>,
    ) -> Result<HashMap<i64, DeviceRecord>, CoreError> {
        self.get_actions(household_id, pet_id, false).await
    }

    // ── Entity accessors ─────────────────────────────────────────────

    /// All pets, resolving entities first when the map allows reuse.
    pub async fn get_pets(&mut self) -> Result<Vec<Pet>, CoreError> {
        self.get_entities(false).await?;
        Ok(self.store.pets().cloned().collect())
    }

    /// All hardware devices.
    pub async fn get_devices(&mut self) -> Result<Vec<Entity>, CoreError> {
        self.get_entities(false).await?;
        Ok(self.store.devices().cloned().collect())
    }

    /// One device by id, refreshing the map once if the id is unknown.
    /// `None` for pets and for ids the cloud does not know.
    pub async fn get_device(&mut self, device_id: i64) -> Result<Option<Entity>, CoreError> {
        if self.store.get(device_id).is_none() {
            self.get_entities(false).await?;
        }
        Ok(self
            .store
            .get(device_id)
            .filter(|entity| entity.is_device())
            .cloned())
    }

    // ── Raw passthroughs ─────────────────────────────────────────────

    /// Raw pet details (`GET pet`).
    pub async fn pets_details(&mut self) -> Result<Value, CoreError> {
        Ok(self.api.pets().await?)
    }

    /// Account-wide timeline.
    pub async fn get_timeline(&mut self) -> Result<Value, CoreError> {
        Ok(self.api.timeline().await?)
    }

    /// Notification inbox.
    pub async fn get_notification(&mut self) -> Result<Value, CoreError> {
        Ok(self.api.notifications().await?)
    }

    /// Raw pet/household report with complete datapoint histories.
    pub async fn get_report(
        &mut self,
        household_id: i64,
        pet_id: Option<i64>,
    ) -> Result<Value, CoreError> {
        Ok(self.api.report(household_id, pet_id).await?)
    }

    /// Felaqua water-weight entries from a household's device timeline,
    /// optionally filtered to one device.
    pub async fn felaqua_weights(
        &mut self,
        household_id: i64,
        device_id: Option<i64>,
    ) -> Result<Vec<Value>, CoreError> {
        let timeline = self.api.household_timeline(household_id).await?;

        let Some(entries) = timeline.get("data").and_then(Value::as_array) else {
            return Ok(Vec::new());
        };

        Ok(entries
            .iter()
            .filter(|entry| {
                entry.get("type").and_then(Value::as_i64) == Some(WEIGHT_TIMELINE_TYPE)
            })
            .filter(|entry| device_id.is_none_or(|id| entry_mentions_device(entry, id)))
            .cloned()
            .collect())
    }
}

fn entry_mentions_device(entry: &Value, device_id: i64) -> bool {
    entry
        .get("devices")
        .and_then(Value::as_array)
        .is_some_and(|devices| {
            devices
                .iter()
                .any(|device| device.get("id").and_then(Value::as_i64) == Some(device_id))
        })
}

// Sure Petcare endpoint wrappers
//
// Typed access to the sync/report/timeline/notification/pet resources.
// Every wrapper goes through `call`, so response caching and conditional
// requests apply uniformly. Absent payloads map to empty defaults.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::SureApiClient;
use crate::error::Error;
use crate::models::{HouseholdReport, SyncData, SyncEnvelope};
use crate::resources;
use crate::transport::DEFAULT_TIMEOUT;

impl SureApiClient {
    /// Fetch the bulk sync payload (`GET me/start`).
    ///
    /// Reuses the cached copy when one exists and `force_refresh` is
    /// false -- no request is issued in that case. `Ok(None)` means the
    /// fetch soft-failed and there is nothing cached to fall back on.
    pub async fn sync(&mut self, force_refresh: bool) -> Result<Option<SyncData>, Error> {
        let cached = if force_refresh {
            None
        } else {
            self.cached(resources::ME_START).cloned()
        };

        let raw = match cached {
            Some(raw) => Some(raw),
            None => self.call(Method::GET, resources::ME_START, None).await?,
        };

        match raw {
            Some(raw) => Ok(Some(parse::<SyncEnvelope>(&raw)?.data)),
            None => Ok(None),
        }
    }

    /// Raw movement/feeding/drinking report for one household,
    /// optionally scoped to a single pet. Empty object on absence.
    pub async fn report(&mut self, household_id: i64, pet_id: Option<i64>) -> Result<Value, Error> {
        let resource = match pet_id {
            Some(pet_id) => resources::pet_report(household_id, pet_id),
            None => resources::household_report(household_id),
        };
        self.raw(&resource).await
    }

    /// Typed variant of [`report`](Self::report). A report without a
    /// `data` section decodes to an empty pairing list.
    pub async fn household_report(
        &mut self,
        household_id: i64,
        pet_id: Option<i64>,
    ) -> Result<HouseholdReport, Error> {
        let raw = self.report(household_id, pet_id).await?;
        parse(&raw)
    }

    /// Raw pet listing (`GET pet`).
    pub async fn pets(&mut self) -> Result<Value, Error> {
        self.raw(resources::PET).await
    }

    /// Account-wide timeline.
    pub async fn timeline(&mut self) -> Result<Value, Error> {
        self.raw(resources::TIMELINE).await
    }

    /// Device timeline for one household (water weights, curfews, ...).
    pub async fn household_timeline(&mut self, household_id: i64) -> Result<Value, Error> {
        self.raw(&resources::household_timeline(household_id)).await
    }

    /// Notification inbox. This endpoint is noticeably slower than the
    /// rest, so it gets twice the usual timeout.
    pub async fn notifications(&mut self) -> Result<Value, Error> {
        Ok(self
            .call(Method::GET, resources::NOTIFICATION, Some(DEFAULT_TIMEOUT * 2))
            .await?
            .unwrap_or_else(empty_object))
    }

    async fn raw(&mut self, resource: &str) -> Result<Value, Error> {
        Ok(self
            .call(Method::GET, resource, None)
            .await?
            .unwrap_or_else(empty_object))
    }
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

fn parse<T: DeserializeOwned>(raw: &Value) -> Result<T, Error> {
    T::deserialize(raw).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: raw.to_string(),
    })
}

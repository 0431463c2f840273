// Resource paths of the Sure Petcare cloud API.
//
// Paths are relative to the API base URL and double as keys into the
// client's per-resource response cache, so they must be built
// identically everywhere -- always through this module.

/// Production API base.
pub const BASE_URL: &str = "https://app.api.surehub.io/api/";

/// Login endpoint (the only unauthenticated call).
pub const AUTH_LOGIN: &str = "auth/login";

/// Bulk sync payload: all households, devices, pets and tags in one shot.
pub const ME_START: &str = "me/start";

/// Raw pet listing.
pub const PET: &str = "pet";

/// Account-wide timeline.
pub const TIMELINE: &str = "timeline";

/// Notification inbox.
pub const NOTIFICATION: &str = "notification";

/// Movement/feeding/drinking report for one household.
pub fn household_report(household_id: i64) -> String {
    format!("report/household/{household_id}")
}

/// Report scoped to a single pet within a household.
pub fn pet_report(household_id: i64, pet_id: i64) -> String {
    format!("report/household/{household_id}/pet/{pet_id}")
}

/// Device timeline for one household (water weights, curfews, ...).
pub fn household_timeline(household_id: i64) -> String {
    format!("timeline/household/{household_id}")
}

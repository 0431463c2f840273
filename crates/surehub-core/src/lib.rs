// surehub-core: Typed entity layer between surehub-api and consumers.

pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod store;
pub mod surehub;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{AuthCredentials, SurehubConfig};
pub use error::CoreError;
pub use format::natural_time;
pub use store::EntityStore;
pub use surehub::Surehub;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Device, DeviceRecord, DeviceStatus, Entity, Feeder, Felaqua, Flap, Hub, Pet, PetStatus, Photo,
    ProductKind, Signal,
};

// ── Domain model ──

pub mod device;
pub mod entity;
pub mod pet;
pub mod product;

pub use device::{Device, DeviceRecord, DeviceStatus, Feeder, Felaqua, Flap, Hub, Signal};
pub use entity::Entity;
pub use pet::{Pet, PetStatus, Photo};
pub use product::ProductKind;

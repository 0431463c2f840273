// ── Entity union ──
//
// The closed set of things a sync payload can resolve to. Variant
// selection is driven by the vendor product code (see store/refresh.rs);
// identity is the integer id, which doubles as the entity-map key.

use super::device::{Device, DeviceRecord, Feeder, Felaqua, Flap, Hub};
use super::pet::Pet;
use super::product::ProductKind;

#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Flap(Flap),
    Feeder(Feeder),
    Felaqua(Felaqua),
    Hub(Hub),
    Pet(Pet),
}

impl Entity {
    /// Globally unique id; the entity-map key.
    pub fn id(&self) -> i64 {
        match self {
            Self::Flap(d) => d.id(),
            Self::Feeder(d) => d.id(),
            Self::Felaqua(d) => d.id(),
            Self::Hub(d) => d.id(),
            Self::Pet(p) => p.id,
        }
    }

    pub fn household_id(&self) -> Option<i64> {
        match self {
            Self::Flap(d) => d.household_id(),
            Self::Feeder(d) => d.household_id(),
            Self::Felaqua(d) => d.household_id(),
            Self::Hub(d) => d.household_id(),
            Self::Pet(p) => p.household_id,
        }
    }

    /// The product kind, immutable after construction. Flap and feeder
    /// variants keep their exact vendor code (cat vs pet flap, connect
    /// vs lite) in the wrapped record.
    pub fn kind(&self) -> ProductKind {
        match self {
            Self::Flap(d) => d.kind(),
            Self::Feeder(d) => d.kind(),
            Self::Felaqua(d) => d.kind(),
            Self::Hub(d) => d.kind(),
            Self::Pet(_) => ProductKind::Pet,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Flap(d) => d.name(),
            Self::Feeder(d) => d.name(),
            Self::Felaqua(d) => d.name(),
            Self::Hub(d) => d.name(),
            Self::Pet(p) => p.name.as_deref(),
        }
    }

    /// The wrapped device record, for any hardware variant.
    pub fn device(&self) -> Option<&DeviceRecord> {
        match self {
            Self::Flap(d) => Some(d.record()),
            Self::Feeder(d) => Some(d.record()),
            Self::Felaqua(d) => Some(d.record()),
            Self::Hub(d) => Some(d.record()),
            Self::Pet(_) => None,
        }
    }

    pub(crate) fn device_mut(&mut self) -> Option<&mut DeviceRecord> {
        match self {
            Self::Flap(d) => Some(d.record_mut()),
            Self::Feeder(d) => Some(d.record_mut()),
            Self::Felaqua(d) => Some(d.record_mut()),
            Self::Hub(d) => Some(d.record_mut()),
            Self::Pet(_) => None,
        }
    }

    pub fn as_pet(&self) -> Option<&Pet> {
        match self {
            Self::Pet(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_device(&self) -> bool {
        self.device().is_some()
    }
}

// ── Vendor product codes ──

use std::fmt;

/// Closed mapping of the vendor's numeric `product_id` coding.
///
/// Pets carry no `product_id`; an absent field coerces to `0`, which is
/// the pet code. Codes outside the mapping land in
/// [`Unknown`](Self::Unknown) so the skip path is an observable value
/// rather than a silent drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductKind {
    Pet,
    Hub,
    PetFlap,
    Feeder,
    CatFlap,
    FeederLite,
    Felaqua,
    Unknown(i64),
}

impl ProductKind {
    /// Map a raw product code to its kind.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Pet,
            1 => Self::Hub,
            3 => Self::PetFlap,
            4 => Self::Feeder,
            6 => Self::CatFlap,
            7 => Self::FeederLite,
            8 => Self::Felaqua,
            other => Self::Unknown(other),
        }
    }

    /// The vendor code for this kind.
    pub fn code(self) -> i64 {
        match self {
            Self::Pet => 0,
            Self::Hub => 1,
            Self::PetFlap => 3,
            Self::Feeder => 4,
            Self::CatFlap => 6,
            Self::FeederLite => 7,
            Self::Felaqua => 8,
            Self::Unknown(code) => code,
        }
    }

    /// Flaps of either kind (cat flap, pet flap).
    pub fn is_flap(self) -> bool {
        matches!(self, Self::CatFlap | Self::PetFlap)
    }

    /// Feeders of either kind (connect, lite).
    pub fn is_feeder(self) -> bool {
        matches!(self, Self::Feeder | Self::FeederLite)
    }

    /// Hardware devices: everything except pets and unknown codes.
    pub fn is_device(self) -> bool {
        !matches!(self, Self::Pet | Self::Unknown(_))
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pet => write!(f, "pet"),
            Self::Hub => write!(f, "hub"),
            Self::PetFlap => write!(f, "pet flap"),
            Self::Feeder => write!(f, "feeder"),
            Self::CatFlap => write!(f, "cat flap"),
            Self::FeederLite => write!(f, "feeder lite"),
            Self::Felaqua => write!(f, "felaqua"),
            Self::Unknown(code) => write!(f, "unknown({code})"),
        }
    }
}

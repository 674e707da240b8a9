//! # Placements
//!
//! Where a cargo item sits inside the vehicle. Positions are the origin
//! corner of the item's bounding box in vehicle-frame coordinates; nothing
//! checks that the box stays inside the envelope.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "cargo_id": 17,
//!   "position_x": 0.0,
//!   "position_y": 1.0,
//!   "position_z": 0.0,
//!   "rotation": 0
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cargo::{CargoId, CargoItem};
use crate::geometry::Point3;

/// Orientation of a placed item about the vertical axis.
///
/// Serialized as its integer code. No calculation reads it yet; the
/// optimizer always emits [`Rotation::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Rotation {
    /// As specified: length along x, width along y
    #[default]
    None,
    /// Quarter turn, length along y
    Quarter,
    /// Half turn
    Half,
    /// Three-quarter turn
    ThreeQuarter,
}

impl Rotation {
    /// Integer code used on the wire.
    pub fn code(self) -> u8 {
        match self {
            Rotation::None => 0,
            Rotation::Quarter => 1,
            Rotation::Half => 2,
            Rotation::ThreeQuarter => 3,
        }
    }
}

impl From<Rotation> for u8 {
    fn from(rotation: Rotation) -> u8 {
        rotation.code()
    }
}

impl TryFrom<u8> for Rotation {
    type Error = UnsupportedRotation;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Rotation::None),
            1 => Ok(Rotation::Quarter),
            2 => Ok(Rotation::Half),
            3 => Ok(Rotation::ThreeQuarter),
            other => Err(UnsupportedRotation(other)),
        }
    }
}

/// Rejected rotation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedRotation(pub u8);

impl fmt::Display for UnsupportedRotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported rotation code {} (expected 0-3)", self.0)
    }
}

/// Assigned position of one cargo item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Cargo this placement refers to
    pub cargo_id: CargoId,

    /// Origin corner x (m)
    pub position_x: f64,

    /// Origin corner y (m)
    pub position_y: f64,

    /// Origin corner z (m)
    pub position_z: f64,

    #[serde(default)]
    pub rotation: Rotation,
}

impl Placement {
    /// Place `cargo_id` with its origin corner at (x, y, z), unrotated.
    pub fn new(cargo_id: impl Into<CargoId>, x: f64, y: f64, z: f64) -> Self {
        Placement {
            cargo_id: cargo_id.into(),
            position_x: x,
            position_y: y,
            position_z: z,
            rotation: Rotation::None,
        }
    }

    /// Origin corner as a point.
    pub fn origin(&self) -> Point3 {
        Point3::new(self.position_x, self.position_y, self.position_z)
    }

    /// Geometric center of `cargo` when placed here.
    pub fn center_of(&self, cargo: &CargoItem) -> Point3 {
        cargo.dimensions().center_from(self.origin())
    }
}

//! Torque About the Center of Gravity
//!
//! A deliberately simplified moment model used only for warning thresholds.
//! Each item's weight acts as a single force at its geometric center; the
//! lever arm is `r = center - cog`.
//!
//! ```text
//! pitch = | Σ r_y · w |
//! roll  = | Σ r_x · w |
//! yaw   = | Σ r_x · r_y · w |
//! ```
//!
//! No rotational inertia, no vector cross product. Units are kg·m
//! (kg·m² for yaw).

use serde::{Deserialize, Serialize};

use crate::cargo::{index_by_id, CargoItem};
use crate::placement::Placement;

use super::center_of_gravity::CenterOfGravity;
use super::resolve;

/// Torque magnitudes about the center of gravity.
///
/// ## JSON Example
///
/// ```json
/// { "pitch": 0.0, "roll": 120.5, "yaw": 3.2 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TorqueAnalysis {
    /// Accumulated lateral lever arm × weight
    pub pitch: f64,

    /// Accumulated longitudinal lever arm × weight
    pub roll: f64,

    /// Accumulated (longitudinal × lateral) lever arm × weight
    pub yaw: f64,
}

/// Calculate pitch, roll and yaw magnitudes about `cog`.
///
/// Placements with unknown cargo ids are skipped.
pub fn torque_analysis(
    placements: &[Placement],
    cargo: &[CargoItem],
    cog: &CenterOfGravity,
) -> TorqueAnalysis {
    let index = index_by_id(cargo);

    let mut pitch = 0.0;
    let mut roll = 0.0;
    let mut yaw = 0.0;

    for (placement, item) in resolve(placements, &index) {
        let r = placement.center_of(item) - *cog;
        pitch += r.y * item.weight;
        roll += r.x * item.weight;
        yaw += r.x * r.y * item.weight;
    }

    TorqueAnalysis {
        pitch: pitch.abs(),
        roll: roll.abs(),
        yaw: yaw.abs(),
    }
}

//! # Load Physics
//!
//! The calculation engine. Every step is a pure function over borrowed
//! inputs, so calls can run concurrently without coordination.
//!
//! ## Pipeline
//!
//! ```text
//! optimize_placement (only when no placements are supplied)
//!         │
//!         ▼
//! center_of_gravity ─► stability_score ─► torque_analysis ─► generate_warnings
//!         └──────────────────── analyze_load ────────────────────┘
//! ```
//!
//! ## Available Calculations
//!
//! - [`center_of_gravity`] - Weighted centroid of placed cargo
//! - [`stability`] - 0-100 score from COG deviation
//! - [`torque`] - Simplified pitch/roll/yaw moments about the COG
//! - [`warnings`] - Threshold-based advisories
//! - [`optimizer`] - Heaviest-first shelf packing
//! - [`analysis`] - The orchestrator producing an [`AnalysisResult`]

pub mod analysis;
pub mod center_of_gravity;
pub mod optimizer;
pub mod stability;
pub mod torque;
pub mod warnings;

use std::collections::HashMap;

use crate::cargo::{CargoId, CargoItem};
use crate::placement::Placement;

// Re-export commonly used items
pub use analysis::{analyze_load, analyze_load_with, AnalysisOptions, AnalysisResult, UnknownCargoPolicy};
pub use center_of_gravity::{center_of_gravity, CenterOfGravity};
pub use optimizer::optimize_placement;
pub use stability::stability_score;
pub use torque::{torque_analysis, TorqueAnalysis};
pub use warnings::{evaluate_warnings, generate_warnings, LoadWarning, Severity};

/// Pair each placement with its cargo item, skipping unknown ids.
pub(crate) fn resolve<'a>(
    placements: &'a [Placement],
    index: &'a HashMap<CargoId, &'a CargoItem>,
) -> impl Iterator<Item = (&'a Placement, &'a CargoItem)> + 'a {
    placements.iter().filter_map(move |p| match index.get(&p.cargo_id) {
        Some(item) => Some((p, *item)),
        None => {
            tracing::trace!(cargo_id = %p.cargo_id, "skipping placement for unknown cargo");
            None
        }
    })
}

/// Cargo ids referenced by placements but absent from the cargo set, in
/// placement order.
pub fn unknown_cargo_ids(placements: &[Placement], cargo: &[CargoItem]) -> Vec<CargoId> {
    let index = crate::cargo::index_by_id(cargo);
    placements
        .iter()
        .map(|p| p.cargo_id)
        .filter(|id| !index.contains_key(id))
        .collect()
}

//! Load Analysis
//!
//! Runs the full pipeline for one arrangement: center of gravity, stability
//! score, torque, total weight, warnings, safety verdict.
//!
//! ## Unknown cargo ids
//!
//! A placement can reference a cargo id that is not in the cargo set. By
//! default such placements are skipped for COG and torque
//! ([`UnknownCargoPolicy::Skip`]), which can understate risk when the caller
//! expected validation. [`UnknownCargoPolicy::Reject`] turns them into
//! [`CalcError::UnknownCargo`].
//!
//! ## Example
//!
//! ```rust
//! use load_core::cargo::CargoItem;
//! use load_core::placement::Placement;
//! use load_core::physics::analyze_load;
//! use load_core::vehicle::Vehicle;
//!
//! let truck = Vehicle::new(1, "Box truck", 1000.0, 10.0, 4.0, 3.0);
//! let cargo = vec![CargoItem::new(1, 400.0, 2.0, 2.0, 3.0)];
//! let placements = vec![Placement::new(1, 4.0, 1.0, 0.0)];
//!
//! let result = analyze_load(&placements, &cargo, &truck);
//! assert_eq!(result.stability_score, 100.0);
//! assert!(result.is_safe);
//! assert!(result.warnings.is_empty());
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cargo::{total_weight, CargoItem};
use crate::errors::{CalcError, CalcResult};
use crate::placement::Placement;
use crate::vehicle::Vehicle;

use super::center_of_gravity::{center_of_gravity, CenterOfGravity};
use super::stability::stability_score;
use super::torque::{torque_analysis, TorqueAnalysis};
use super::unknown_cargo_ids;
use super::warnings::{generate_warnings, SAFE_STABILITY_SCORE};

/// What to do with placements that reference cargo not in the cargo set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownCargoPolicy {
    /// Leave them out of COG and torque
    #[default]
    Skip,
    /// Fail the analysis
    Reject,
}

/// Per-call analysis options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisOptions {
    #[serde(default)]
    pub unknown_cargo: UnknownCargoPolicy,
}

impl AnalysisOptions {
    /// Options that reject unknown cargo ids.
    pub fn strict() -> Self {
        AnalysisOptions {
            unknown_cargo: UnknownCargoPolicy::Reject,
        }
    }
}

/// Results of a load analysis.
///
/// ## JSON Example
///
/// ```json
/// {
///   "center_of_gravity": { "x": 5.0, "y": 2.0, "z": 0.5 },
///   "stability_score": 86.67,
///   "torque_analysis": { "pitch": 0.0, "roll": 0.0, "yaw": 0.0 },
///   "warnings": ["CRITICAL: Total weight (1200.00 kg) exceeds vehicle capacity (1000.00 kg)"],
///   "is_safe": false,
///   "total_weight": 1200.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Weighted centroid of the placed cargo
    pub center_of_gravity: CenterOfGravity,

    /// 0-100, higher is more stable
    pub stability_score: f64,

    /// Simplified moments about the center of gravity
    pub torque_analysis: TorqueAnalysis,

    /// Triggered advisories, in rule order
    pub warnings: Vec<String>,

    /// `stability_score >= 70` and `total_weight <= max_load`
    pub is_safe: bool,

    /// Sum of all cargo weights, placed or not (kg)
    pub total_weight: f64,
}

impl AnalysisResult {
    /// Number of advisories marked critical.
    pub fn critical_count(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| w.starts_with("CRITICAL"))
            .count()
    }

    /// Load as a percentage of the vehicle rating.
    pub fn utilization_percent(&self, vehicle: &Vehicle) -> f64 {
        self.total_weight / vehicle.max_load * 100.0
    }
}

/// Safety verdict from the two gating conditions.
pub fn is_safe(stability_score: f64, total_weight: f64, vehicle: &Vehicle) -> bool {
    stability_score >= SAFE_STABILITY_SCORE && total_weight <= vehicle.max_load
}

/// Analyze an arrangement, skipping placements with unknown cargo ids.
///
/// Never fails; see [`analyze_load_with`] for the strict variant.
pub fn analyze_load(placements: &[Placement], cargo: &[CargoItem], vehicle: &Vehicle) -> AnalysisResult {
    let unknown = unknown_cargo_ids(placements, cargo);
    if !unknown.is_empty() {
        warn!(
            count = unknown.len(),
            ids = ?unknown,
            "placements reference unknown cargo; excluded from center of gravity and torque"
        );
    }

    let cog = center_of_gravity(placements, cargo);
    let score = stability_score(&cog, vehicle);
    let torque = torque_analysis(placements, cargo, &cog);
    let total = total_weight(cargo);
    let warnings = generate_warnings(&cog, score, &torque, vehicle, total);
    let safe = is_safe(score, total, vehicle);

    debug!(
        vehicle_id = vehicle.id,
        placements = placements.len(),
        cargo = cargo.len(),
        cog_x = cog.x,
        cog_y = cog.y,
        cog_z = cog.z,
        score,
        total_weight = total,
        warnings = warnings.len(),
        is_safe = safe,
        "load analyzed"
    );

    AnalysisResult {
        center_of_gravity: cog,
        stability_score: score,
        torque_analysis: torque,
        warnings,
        is_safe: safe,
        total_weight: total,
    }
}

/// Analyze an arrangement under explicit options.
///
/// # Returns
///
/// * `Ok(AnalysisResult)` - same result as [`analyze_load`]
/// * `Err(CalcError::UnknownCargo)` - under [`UnknownCargoPolicy::Reject`],
///   for the first placement whose cargo id is not in `cargo`
pub fn analyze_load_with(
    placements: &[Placement],
    cargo: &[CargoItem],
    vehicle: &Vehicle,
    options: &AnalysisOptions,
) -> CalcResult<AnalysisResult> {
    if options.unknown_cargo == UnknownCargoPolicy::Reject {
        if let Some(id) = unknown_cargo_ids(placements, cargo).first() {
            return Err(CalcError::unknown_cargo(*id));
        }
    }
    Ok(analyze_load(placements, cargo, vehicle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cargo::CargoId;
    use crate::geometry::Point3;

    fn truck() -> Vehicle {
        Vehicle::new(1, "Box truck", 1000.0, 10.0, 4.0, 3.0)
    }

    /// Two 600 kg crates at either end of the truck.
    fn overloaded() -> (Vec<Placement>, Vec<CargoItem>) {
        let cargo = vec![
            CargoItem::new(1, 600.0, 2.0, 2.0, 1.0).with_name("A"),
            CargoItem::new(2, 600.0, 2.0, 2.0, 1.0).with_name("B"),
        ];
        let placements = vec![
            Placement::new(1, 0.0, 1.0, 0.0),
            Placement::new(2, 8.0, 1.0, 0.0),
        ];
        (placements, cargo)
    }

    #[test]
    fn test_overload_scenario() {
        let (placements, cargo) = overloaded();
        let result = analyze_load(&placements, &cargo, &truck());

        assert_eq!(result.total_weight, 1200.0);
        assert_eq!(result.center_of_gravity, Point3::new(5.0, 2.0, 0.5));
        assert_eq!(result.stability_score, 86.67);
        assert!(!result.is_safe);
        assert_eq!(
            result.warnings,
            vec!["CRITICAL: Total weight (1200.00 kg) exceeds vehicle capacity (1000.00 kg)"]
        );
        assert_eq!(result.critical_count(), 1);
    }

    #[test]
    fn test_unplaced_cargo_counts_toward_weight() {
        let (mut placements, cargo) = overloaded();
        placements.truncate(1);
        let result = analyze_load(&placements, &cargo, &truck());

        assert_eq!(result.total_weight, 1200.0);
        assert_eq!(result.center_of_gravity, Point3::new(1.0, 2.0, 0.5));
    }

    #[test]
    fn test_unknown_cargo_skipped_by_default() {
        let (mut placements, cargo) = overloaded();
        let baseline = analyze_load(&placements, &cargo, &truck());

        placements.push(Placement::new(99, 9.0, 3.0, 2.0));
        let result = analyze_load(&placements, &cargo, &truck());

        assert_eq!(result, baseline);
    }

    #[test]
    fn test_unknown_cargo_rejected_when_strict() {
        let (mut placements, cargo) = overloaded();
        placements.push(Placement::new(99, 9.0, 3.0, 2.0));

        let err = analyze_load_with(&placements, &cargo, &truck(), &AnalysisOptions::strict()).unwrap_err();
        assert_eq!(err, CalcError::UnknownCargo { cargo_id: CargoId(99) });

        let lenient = analyze_load_with(&placements, &cargo, &truck(), &AnalysisOptions::default());
        assert!(lenient.is_ok());
    }

    #[test]
    fn test_is_safe_truth_table() {
        let v = truck();
        assert!(is_safe(70.0, 1000.0, &v));
        assert!(!is_safe(69.99, 1000.0, &v));
        assert!(!is_safe(70.0, 1000.01, &v));
        assert!(!is_safe(10.0, 5000.0, &v));
    }

    #[test]
    fn test_empty_placements() {
        let cargo = vec![CargoItem::new(1, 100.0, 1.0, 1.0, 1.0)];
        let result = analyze_load(&[], &cargo, &truck());

        assert_eq!(result.center_of_gravity, Point3::ORIGIN);
        assert_eq!(result.stability_score, 0.0);
        assert_eq!(result.total_weight, 100.0);
        assert!(!result.is_safe);
    }

    #[test]
    fn test_result_serialization() {
        let (placements, cargo) = overloaded();
        let result = analyze_load(&placements, &cargo, &truck());
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["center_of_gravity"]["x"], 5.0);
        assert_eq!(json["torque_analysis"]["pitch"], 0.0);
        assert_eq!(json["is_safe"], false);

        let options: AnalysisOptions = serde_json::from_str(r#"{"unknown_cargo": "reject"}"#).unwrap();
        assert_eq!(options, AnalysisOptions::strict());
    }
}

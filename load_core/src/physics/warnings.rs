//! Safety Warnings
//!
//! Turns the computed metrics into advisory messages. Rules are evaluated
//! independently, in a fixed order, and every rule that triggers is
//! reported. Rules 1/2 and 3/4 are pairs where only the more severe member
//! fires.
//!
//! | # | Condition                                           | Severity |
//! |---|-----------------------------------------------------|----------|
//! | 1 | total weight > max load                             | Critical |
//! | 2 | total weight > 90% of max load                      | Warning  |
//! | 3 | score < 50                                          | Critical |
//! | 4 | score < 70                                          | Warning  |
//! | 5 | \|cog.y - width/2\| > 15% of width                  | Critical |
//! | 6 | \|cog.x - length/2\| > 20% of length                | Warning  |
//! | 7 | cog.z > 60% of height                               | Warning  |
//! | 8 | roll > total weight × width × 0.1                   | Warning  |
//! | 9 | pitch > total weight × width × 0.1                  | Warning  |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::vehicle::Vehicle;

use super::center_of_gravity::CenterOfGravity;
use super::torque::TorqueAnalysis;

// ============================================================================
// Thresholds
// ============================================================================

/// Fraction of max load above which the near-capacity warning fires
pub const NEAR_CAPACITY_RATIO: f64 = 0.9;

/// Scores below this are critically unbalanced
pub const CRITICAL_STABILITY_SCORE: f64 = 50.0;

/// Scores at or above this are considered safe
pub const SAFE_STABILITY_SCORE: f64 = 70.0;

/// Allowed lateral COG offset as a fraction of vehicle width
pub const LATERAL_TOLERANCE: f64 = 0.15;

/// Allowed longitudinal COG offset as a fraction of vehicle length
pub const LONGITUDINAL_TOLERANCE: f64 = 0.2;

/// COG height limit as a fraction of vehicle height
pub const HEIGHT_LIMIT_RATIO: f64 = 0.6;

/// Torque limit coefficient applied to total weight × vehicle width
pub const TORQUE_TOLERANCE: f64 = 0.1;

// ============================================================================
// Warning Types
// ============================================================================

/// How serious an advisory is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Critical,
}

impl Severity {
    /// Message prefix
    pub fn tag(&self) -> &'static str {
        match self {
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
        }
    }
}

/// One triggered advisory rule.
///
/// `Display` renders the advisory text that ends up in
/// [`AnalysisResult::warnings`](super::AnalysisResult::warnings).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum LoadWarning {
    /// Total weight exceeds the vehicle rating
    Overloaded { total_weight: f64, max_load: f64 },
    /// Total weight above 90% of the rating
    NearCapacity { percent: f64 },
    /// Stability score below 50
    PoorStability,
    /// Stability score below 70
    SuboptimalStability,
    /// COG too far from the lateral center line
    LateralImbalance,
    /// COG too far forward or backward
    LongitudinalImbalance,
    /// COG above 60% of the envelope height
    HighCenterOfGravity,
    /// Roll torque above the tolerance
    ExcessiveRollTorque,
    /// Pitch torque above the tolerance
    ExcessivePitchTorque,
}

impl LoadWarning {
    pub fn severity(&self) -> Severity {
        match self {
            LoadWarning::Overloaded { .. }
            | LoadWarning::PoorStability
            | LoadWarning::LateralImbalance => Severity::Critical,
            _ => Severity::Warning,
        }
    }

    pub fn is_critical(&self) -> bool {
        self.severity() == Severity::Critical
    }
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.severity().tag();
        match self {
            LoadWarning::Overloaded {
                total_weight,
                max_load,
            } => write!(
                f,
                "{tag}: Total weight ({total_weight:.2} kg) exceeds vehicle capacity ({max_load:.2} kg)"
            ),
            LoadWarning::NearCapacity { percent } => {
                write!(f, "{tag}: Load is at {percent:.1}% of capacity")
            }
            LoadWarning::PoorStability => {
                write!(f, "{tag}: Poor stability - load is dangerously unbalanced")
            }
            LoadWarning::SuboptimalStability => {
                write!(f, "{tag}: Suboptimal stability - consider redistributing load")
            }
            LoadWarning::LateralImbalance => write!(
                f,
                "{tag}: Significant lateral imbalance detected - risk of tipping"
            ),
            LoadWarning::LongitudinalImbalance => {
                write!(f, "{tag}: Load is too far forward or backward")
            }
            LoadWarning::HighCenterOfGravity => {
                write!(f, "{tag}: High center of gravity - reduced stability")
            }
            LoadWarning::ExcessiveRollTorque => write!(f, "{tag}: Excessive rolling torque detected"),
            LoadWarning::ExcessivePitchTorque => {
                write!(f, "{tag}: Excessive pitching torque detected")
            }
        }
    }
}

// ============================================================================
// Evaluation
// ============================================================================

/// Evaluate every rule and return the triggered ones in rule order.
pub fn evaluate_warnings(
    cog: &CenterOfGravity,
    stability_score: f64,
    torque: &TorqueAnalysis,
    vehicle: &Vehicle,
    total_weight: f64,
) -> Vec<LoadWarning> {
    let mut warnings = Vec::new();

    if total_weight > vehicle.max_load {
        warnings.push(LoadWarning::Overloaded {
            total_weight,
            max_load: vehicle.max_load,
        });
    } else if total_weight > vehicle.max_load * NEAR_CAPACITY_RATIO {
        warnings.push(LoadWarning::NearCapacity {
            percent: total_weight / vehicle.max_load * 100.0,
        });
    }

    if stability_score < CRITICAL_STABILITY_SCORE {
        warnings.push(LoadWarning::PoorStability);
    } else if stability_score < SAFE_STABILITY_SCORE {
        warnings.push(LoadWarning::SuboptimalStability);
    }

    let center = vehicle.center();

    if (cog.y - center.y).abs() > vehicle.width * LATERAL_TOLERANCE {
        warnings.push(LoadWarning::LateralImbalance);
    }

    if (cog.x - center.x).abs() > vehicle.length * LONGITUDINAL_TOLERANCE {
        warnings.push(LoadWarning::LongitudinalImbalance);
    }

    if cog.z > vehicle.height * HEIGHT_LIMIT_RATIO {
        warnings.push(LoadWarning::HighCenterOfGravity);
    }

    let max_torque = total_weight * vehicle.width * TORQUE_TOLERANCE;
    if torque.roll > max_torque {
        warnings.push(LoadWarning::ExcessiveRollTorque);
    }
    if torque.pitch > max_torque {
        warnings.push(LoadWarning::ExcessivePitchTorque);
    }

    warnings
}

/// Evaluate every rule and render the triggered ones as advisory text.
pub fn generate_warnings(
    cog: &CenterOfGravity,
    stability_score: f64,
    torque: &TorqueAnalysis,
    vehicle: &Vehicle,
    total_weight: f64,
) -> Vec<String> {
    evaluate_warnings(cog, stability_score, torque, vehicle, total_weight)
        .iter()
        .map(ToString::to_string)
        .collect()
}

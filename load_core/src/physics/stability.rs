//! Stability Score
//!
//! Scores a center of gravity against the ideal, the geometric center of
//! the vehicle envelope. Each axis contributes its relative deviation
//! `|cog - ideal| / ideal`, weighted by how strongly that axis drives tipping:
//!
//! | Axis | Direction    | Weight |
//! |------|--------------|--------|
//! | x    | longitudinal | 0.3    |
//! | y    | lateral      | 0.5    |
//! | z    | vertical     | 0.2    |
//!
//! `score = max(0, 100 - 100 * weighted_deviation)`, rounded to 2 decimals.
//! The weights are fixed calibration constants, not a physical derivation.

use crate::geometry::Point3;
use crate::vehicle::Vehicle;

/// Weight of the longitudinal (x) deviation
pub const LONGITUDINAL_WEIGHT: f64 = 0.3;

/// Weight of the lateral (y) deviation
pub const LATERAL_WEIGHT: f64 = 0.5;

/// Weight of the vertical (z) deviation
pub const VERTICAL_WEIGHT: f64 = 0.2;

/// Highest possible score
pub const MAX_SCORE: f64 = 100.0;

/// Relative deviation of `actual` from `ideal`; 0 when `ideal` is 0.
pub fn axis_deviation(actual: f64, ideal: f64) -> f64 {
    if ideal > 0.0 {
        (actual - ideal).abs() / ideal
    } else {
        0.0
    }
}

/// Weighted deviation of `cog` from the envelope center, before scaling.
pub fn weighted_deviation(cog: &Point3, vehicle: &Vehicle) -> f64 {
    let ideal = vehicle.center();
    axis_deviation(cog.x, ideal.x) * LONGITUDINAL_WEIGHT
        + axis_deviation(cog.y, ideal.y) * LATERAL_WEIGHT
        + axis_deviation(cog.z, ideal.z) * VERTICAL_WEIGHT
}

/// Calculate the 0-100 stability score for a center of gravity.
///
/// ## Example
///
/// ```rust
/// use load_core::geometry::Point3;
/// use load_core::physics::stability_score;
/// use load_core::vehicle::Vehicle;
///
/// let truck = Vehicle::new(1, "Box truck", 1000.0, 10.0, 4.0, 3.0);
/// assert_eq!(stability_score(&Point3::new(5.0, 2.0, 1.5), &truck), 100.0);
/// ```
pub fn stability_score(cog: &Point3, vehicle: &Vehicle) -> f64 {
    let score = (MAX_SCORE - weighted_deviation(cog, vehicle) * 100.0).max(0.0);
    round_to_hundredths(score)
}

/// Round to 2 decimals from the exact binary value.
///
/// Scaling by 100 first can land on a spurious `.5` and round the wrong way.
fn round_to_hundredths(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn truck() -> Vehicle {
        Vehicle::new(1, "Box truck", 1000.0, 10.0, 4.0, 3.0)
    }

    #[test]
    fn test_centered_cog_scores_100() {
        assert_eq!(stability_score(&truck().center(), &truck()), 100.0);
    }

    #[test]
    fn test_lateral_deviation_costs_most() {
        let v = truck();
        // 50% relative deviation on each axis in turn
        let x_off = stability_score(&Point3::new(7.5, 2.0, 1.5), &v);
        let y_off = stability_score(&Point3::new(5.0, 3.0, 1.5), &v);
        let z_off = stability_score(&Point3::new(5.0, 2.0, 2.25), &v);

        assert_eq!(x_off, 85.0);
        assert_eq!(y_off, 75.0);
        assert_eq!(z_off, 90.0);
    }

    #[test]
    fn test_floor_level_cog() {
        // Two 2x2x1 boxes on the floor of a 10x4x3 truck, COG (5, 2, 0.5):
        // dev_z = 1.0 / 1.5, score = 100 - 20 * 2/3 = 86.666...
        let score = stability_score(&Point3::new(5.0, 2.0, 0.5), &truck());
        assert_eq!(score, 86.67);
    }

    #[test]
    fn test_score_clamped_at_zero() {
        let score = stability_score(&Point3::new(100.0, 100.0, 100.0), &truck());
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_origin_cog() {
        // Every axis fully deviated: 0.3 + 0.5 + 0.2 = 1.0
        assert_eq!(stability_score(&Point3::ORIGIN, &truck()), 0.0);
    }

    #[test]
    fn test_zero_ideal_axis_ignored() {
        let flat = Vehicle::new(2, "Degenerate", 1000.0, 10.0, 4.0, 0.0);
        let score = stability_score(&Point3::new(5.0, 2.0, 7.0), &flat);
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_monotonic_in_lateral_offset() {
        let v = truck();
        let mut previous = f64::INFINITY;
        for step in 0..=40 {
            let offset = step as f64 * 0.1;
            let score = stability_score(&Point3::new(5.0, 2.0 + offset, 1.5), &v);
            assert!(score <= previous, "offset {offset}: {score} > {previous}");
            previous = score;
        }
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round_to_hundredths(86.666_666), 86.67);
        assert_eq!(round_to_hundredths(12.344), 12.34);
    }

    #[test]
    fn test_rounding_uses_exact_value() {
        // Scaled by 100 this lands on 3723.5 and would round up to 37.24
        let van = Vehicle::new(1, "Van", 1000.0, 8.0, 2.5, 2.5);
        let score = stability_score(&Point3::new(3.45, 2.44, 0.56), &van);
        assert_eq!(score, 37.23);
    }
}

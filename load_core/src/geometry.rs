//! # Geometry Primitives
//!
//! Vehicle-frame coordinates and box dimensions.
//!
//! ## Frame Convention
//!
//! - `x`: longitudinal, along the vehicle length (front wall at 0)
//! - `y`: lateral, across the vehicle width
//! - `z`: vertical, up from the cargo floor
//!
//! All lengths are in meters. Every type is a plain `f64` holder so JSON
//! stays as bare numbers.
//!
//! ## Example
//!
//! ```rust
//! use load_core::geometry::{Dimensions, Point3};
//!
//! let origin = Point3::new(1.0, 0.5, 0.0);
//! let size = Dimensions::new(2.0, 1.0, 1.0);
//! assert_eq!(size.center_from(origin), Point3::new(2.0, 1.0, 0.5));
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A point (or offset) in vehicle-frame coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    /// The frame origin (0, 0, 0).
    pub const ORIGIN: Point3 = Point3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point3 { x, y, z }
    }
}

impl Add for Point3 {
    type Output = Point3;
    fn add(self, rhs: Point3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Point3;
    fn sub(self, rhs: Point3) -> Point3 {
        Point3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Point3 {
    type Output = Point3;
    fn mul(self, rhs: f64) -> Point3 {
        Point3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Axis-aligned box extents: length along x, width along y, height along z.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Dimensions {
            length,
            width,
            height,
        }
    }

    /// Half extents, i.e. the offset from a box corner to its center.
    pub fn half(&self) -> Point3 {
        Point3::new(self.length / 2.0, self.width / 2.0, self.height / 2.0)
    }

    /// Geometric center of a box whose origin corner sits at `origin`.
    pub fn center_from(&self, origin: Point3) -> Point3 {
        origin + self.half()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(0.5, 0.5, 0.5);
        assert_eq!(a - b, Point3::new(0.5, 1.5, 2.5));
        assert_eq!(a + b, Point3::new(1.5, 2.5, 3.5));
        assert_eq!(a * 2.0, Point3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_center_from_origin_corner() {
        let dims = Dimensions::new(2.0, 2.0, 1.0);
        let center = dims.center_from(Point3::new(8.0, 1.0, 0.0));
        assert_eq!(center, Point3::new(9.0, 2.0, 0.5));
    }

    #[test]
    fn test_point_serializes_as_xyz() {
        let json = serde_json::to_string(&Point3::new(1.0, 0.0, 2.5)).unwrap();
        assert_eq!(json, r#"{"x":1.0,"y":0.0,"z":2.5}"#);
    }
}

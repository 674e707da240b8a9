//! # Vehicle
//!
//! The interior cargo envelope and payload rating of a vehicle.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "id": 3,
//!   "vehicle_type": "Box truck",
//!   "max_load": 1000.0,
//!   "length": 10.0,
//!   "width": 4.0,
//!   "height": 3.0
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{ensure_positive, CalcResult};
use crate::geometry::{Dimensions, Point3};

/// Vehicle specification, immutable for the duration of an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Caller-assigned identifier
    pub id: u64,

    /// Free-form type label (e.g., "Flatbed", "Box truck")
    pub vehicle_type: String,

    /// Rated payload in kilograms
    pub max_load: f64,

    /// Interior length (m)
    pub length: f64,

    /// Interior width (m)
    pub width: f64,

    /// Interior height (m)
    pub height: f64,
}

impl Vehicle {
    pub fn new(
        id: u64,
        vehicle_type: impl Into<String>,
        max_load: f64,
        length: f64,
        width: f64,
        height: f64,
    ) -> Self {
        Vehicle {
            id,
            vehicle_type: vehicle_type.into(),
            max_load,
            length,
            width,
            height,
        }
    }

    /// Cargo envelope extents.
    pub fn envelope(&self) -> Dimensions {
        Dimensions::new(self.length, self.width, self.height)
    }

    /// Geometric center of the envelope, the ideal center of gravity.
    pub fn center(&self) -> Point3 {
        self.envelope().center_from(Point3::ORIGIN)
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_positive("max_load", self.max_load, "Max load must be positive")?;
        ensure_positive("length", self.length, "Length must be positive")?;
        ensure_positive("width", self.width, "Width must be positive")?;
        ensure_positive("height", self.height, "Height must be positive")?;
        Ok(())
    }
}

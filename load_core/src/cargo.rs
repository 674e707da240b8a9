//! # Cargo Items
//!
//! A cargo item is a rigid box with a known weight. Items are owned by the
//! caller; the engine only borrows them.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "id": 17,
//!   "name": "Pallet of tiles",
//!   "weight": 600.0,
//!   "length": 1.2,
//!   "width": 0.8,
//!   "height": 1.0
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ensure_positive, CalcError, CalcResult};
use crate::geometry::Dimensions;

/// Caller-assigned cargo identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CargoId(pub u64);

impl fmt::Display for CargoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CargoId {
    fn from(id: u64) -> Self {
        CargoId(id)
    }
}

/// A single piece of cargo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CargoItem {
    /// Unique identifier within one analysis call
    pub id: CargoId,

    /// Optional human-readable name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Weight in kilograms
    pub weight: f64,

    /// Extent along the vehicle's length axis (m)
    pub length: f64,

    /// Extent along the vehicle's width axis (m)
    pub width: f64,

    /// Vertical extent (m)
    pub height: f64,
}

impl CargoItem {
    /// Create an unnamed cargo item.
    ///
    /// ```rust
    /// use load_core::cargo::CargoItem;
    ///
    /// let crate_a = CargoItem::new(1, 250.0, 1.2, 0.8, 0.9).with_name("Crate A");
    /// assert_eq!(crate_a.label(), "Crate A");
    /// ```
    pub fn new(id: impl Into<CargoId>, weight: f64, length: f64, width: f64, height: f64) -> Self {
        CargoItem {
            id: id.into(),
            name: None,
            weight,
            length,
            width,
            height,
        }
    }

    /// Attach a display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Bounding box extents.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.length, self.width, self.height)
    }

    /// Name if present, otherwise `#<id>`.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("#{}", self.id),
        }
    }

    /// Validate input parameters.
    ///
    /// Weight and all three dimensions must be positive and finite.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_positive("weight", self.weight, "Weight must be positive")?;
        ensure_positive("length", self.length, "Length must be positive")?;
        ensure_positive("width", self.width, "Width must be positive")?;
        ensure_positive("height", self.height, "Height must be positive")?;
        Ok(())
    }
}

/// Sum of weights of every item in the slice.
pub fn total_weight(cargo: &[CargoItem]) -> f64 {
    cargo.iter().map(|c| c.weight).sum()
}

/// Index cargo by id for placement lookups.
///
/// Later duplicates win, matching a plain map insert.
pub(crate) fn index_by_id(cargo: &[CargoItem]) -> HashMap<CargoId, &CargoItem> {
    cargo.iter().map(|c| (c.id, c)).collect()
}

/// Validate every item and reject duplicate ids.
pub fn validate_cargo(cargo: &[CargoItem]) -> CalcResult<()> {
    let mut seen = HashSet::with_capacity(cargo.len());
    for item in cargo {
        item.validate()?;
        if !seen.insert(item.id) {
            return Err(CalcError::DuplicateCargo { cargo_id: item.id });
        }
    }
    Ok(())
}

//! Center of Gravity
//!
//! Weighted centroid of the geometric centers of all placed cargo. Each box
//! is treated as having uniform density, so its mass acts at
//! `position + dimension / 2` on every axis.
//!
//! Placements whose cargo id is not in the cargo set contribute nothing.
//! With no resolvable weight the result is the frame origin.

use crate::cargo::{index_by_id, CargoItem};
use crate::geometry::Point3;
use crate::placement::Placement;

use super::resolve;

/// Center of gravity in vehicle-frame coordinates (m)
pub type CenterOfGravity = Point3;

/// Calculate the weighted center of gravity of the placed cargo.
///
/// ## Example
///
/// ```rust
/// use load_core::cargo::CargoItem;
/// use load_core::placement::Placement;
/// use load_core::physics::center_of_gravity;
///
/// let cargo = vec![
///     CargoItem::new(1, 100.0, 2.0, 2.0, 1.0),
///     CargoItem::new(2, 300.0, 2.0, 2.0, 1.0),
/// ];
/// let placements = vec![
///     Placement::new(1, 0.0, 0.0, 0.0),
///     Placement::new(2, 4.0, 0.0, 0.0),
/// ];
///
/// let cog = center_of_gravity(&placements, &cargo);
/// // x = (1 * 100 + 5 * 300) / 400
/// assert_eq!(cog.x, 4.0);
/// ```
pub fn center_of_gravity(placements: &[Placement], cargo: &[CargoItem]) -> CenterOfGravity {
    let index = index_by_id(cargo);

    let mut moment = Point3::ORIGIN;
    let mut total_weight = 0.0;

    for (placement, item) in resolve(placements, &index) {
        moment = moment + placement.center_of(item) * item.weight;
        total_weight += item.weight;
    }

    if total_weight == 0.0 {
        return Point3::ORIGIN;
    }

    Point3::new(
        moment.x / total_weight,
        moment.y / total_weight,
        moment.z / total_weight,
    )
}

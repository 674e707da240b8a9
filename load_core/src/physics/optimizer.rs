//! Placement Optimizer
//!
//! Greedy shelf packing, heaviest item first. Items are laid along the
//! vehicle length in rows; when the next item does not fit the remaining
//! length, a new row starts at `x = 0`, raised by the tallest item of the
//! previous row. Every item is centered laterally, clamped to the walls.
//!
//! ## Limitations
//!
//! This is a 2.5-D heuristic, not 3-D bin packing:
//! - rows are stacked vertically, never side by side
//! - stack height is not checked against the vehicle height
//! - items are never rotated
//! - boxes in different rows may overlap if their widths differ
//!
//! ## Example
//!
//! ```rust
//! use load_core::cargo::CargoItem;
//! use load_core::physics::optimize_placement;
//! use load_core::vehicle::Vehicle;
//!
//! let truck = Vehicle::new(1, "Box truck", 1000.0, 10.0, 4.0, 3.0);
//! let cargo = vec![
//!     CargoItem::new(1, 100.0, 3.0, 2.0, 1.0),
//!     CargoItem::new(2, 300.0, 3.0, 2.0, 1.0),
//! ];
//!
//! let placements = optimize_placement(&cargo, &truck);
//! assert_eq!(placements[0].cargo_id.0, 2); // heaviest first
//! assert_eq!(placements[1].position_x, 3.0);
//! ```

use tracing::trace;

use crate::cargo::CargoItem;
use crate::placement::Placement;
use crate::vehicle::Vehicle;

/// Row/layer cursor for shelf packing.
#[derive(Debug, Default)]
struct ShelfCursor {
    x: f64,
    z: f64,
    row_height: f64,
}

impl ShelfCursor {
    /// Reserve space for `item` and return the (x, z) of its origin corner.
    fn advance(&mut self, item: &CargoItem, vehicle_length: f64) -> (f64, f64) {
        if self.x + item.length <= vehicle_length {
            let slot = (self.x, self.z);
            self.x += item.length;
            self.row_height = self.row_height.max(item.height);
            slot
        } else {
            self.x = 0.0;
            self.z += self.row_height;
            self.row_height = item.height;
            let slot = (self.x, self.z);
            self.x += item.length;
            slot
        }
    }
}

/// Lateral origin that centers `item` across the vehicle.
///
/// Clamped to `[0, vehicle.width - item.width]`; when the item is wider than
/// the vehicle the result is 0.
fn centered_y(item: &CargoItem, vehicle: &Vehicle) -> f64 {
    let target = vehicle.width / 2.0 - item.width / 2.0;
    target.min(vehicle.width - item.width).max(0.0)
}

/// Generate one placement per cargo item, heaviest first.
///
/// The output is ordered by placement sequence (descending weight, ties in
/// input order), not by input order. Rotation is always
/// [`Rotation::None`](crate::placement::Rotation::None).
pub fn optimize_placement(cargo: &[CargoItem], vehicle: &Vehicle) -> Vec<Placement> {
    let mut sorted: Vec<&CargoItem> = cargo.iter().collect();
    // sort_by is stable: equal weights keep input order
    sorted.sort_by(|a, b| b.weight.total_cmp(&a.weight));

    let mut cursor = ShelfCursor::default();

    sorted
        .into_iter()
        .map(|item| {
            let (x, z) = cursor.advance(item, vehicle.length);
            let y = centered_y(item, vehicle);
            trace!(cargo_id = %item.id, x, y, z, "placed cargo");
            Placement::new(item.id, x, y, z)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cargo::CargoId;
    use crate::placement::Rotation;

    fn truck() -> Vehicle {
        Vehicle::new(1, "Box truck", 1000.0, 10.0, 4.0, 3.0)
    }

    #[test]
    fn test_single_row_when_lengths_fit() {
        let cargo = vec![
            CargoItem::new(1, 100.0, 2.0, 2.0, 1.0),
            CargoItem::new(2, 200.0, 3.0, 2.0, 1.0),
            CargoItem::new(3, 150.0, 4.0, 2.0, 1.0),
        ];
        let placements = optimize_placement(&cargo, &truck());

        assert_eq!(placements.len(), 3);
        assert!(placements.iter().all(|p| p.position_z == 0.0));

        // Order 2 (3 m), 3 (4 m), 1 (2 m)
        let ids: Vec<u64> = placements.iter().map(|p| p.cargo_id.0).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        let xs: Vec<f64> = placements.iter().map(|p| p.position_x).collect();
        assert_eq!(xs, vec![0.0, 3.0, 7.0]);
    }

    #[test]
    fn test_new_row_raised_by_tallest_of_previous_row() {
        let cargo = vec![
            CargoItem::new(1, 500.0, 6.0, 2.0, 1.5),
            CargoItem::new(2, 400.0, 4.0, 2.0, 0.5),
            CargoItem::new(3, 300.0, 5.0, 2.0, 1.0),
            CargoItem::new(4, 200.0, 5.0, 2.0, 0.8),
            CargoItem::new(5, 100.0, 2.0, 2.0, 0.2),
        ];
        let placements = optimize_placement(&cargo, &truck());

        let origins: Vec<(f64, f64)> = placements
            .iter()
            .map(|p| (p.position_x, p.position_z))
            .collect();
        assert_eq!(
            origins,
            vec![
                (0.0, 0.0), // row 1: 6 m
                (6.0, 0.0), // row 1: 10 m, exactly full
                (0.0, 1.5), // row 2 above the 1.5 m item
                (5.0, 1.5), // row 2: 10 m
                (0.0, 2.5), // row 3 above the 1.0 m item
            ]
        );
    }

    #[test]
    fn test_lateral_centering_and_clamping() {
        let cargo = vec![
            CargoItem::new(1, 300.0, 1.0, 1.0, 1.0),
            CargoItem::new(2, 200.0, 1.0, 5.0, 1.0),
        ];
        let placements = optimize_placement(&cargo, &truck());

        assert_eq!(placements[0].position_y, 1.5);
        // Wider than the vehicle: clamped to the near wall
        assert_eq!(placements[1].position_y, 0.0);
    }

    #[test]
    fn test_equal_weights_keep_input_order() {
        let cargo = vec![
            CargoItem::new(10, 100.0, 1.0, 1.0, 1.0),
            CargoItem::new(11, 100.0, 1.0, 1.0, 1.0),
            CargoItem::new(12, 100.0, 1.0, 1.0, 1.0),
        ];
        let ids: Vec<CargoId> = optimize_placement(&cargo, &truck())
            .into_iter()
            .map(|p| p.cargo_id)
            .collect();
        assert_eq!(ids, vec![CargoId(10), CargoId(11), CargoId(12)]);
    }

    #[test]
    fn test_item_longer_than_vehicle_starts_its_own_row() {
        let cargo = vec![
            CargoItem::new(1, 200.0, 4.0, 1.0, 1.0),
            CargoItem::new(2, 100.0, 12.0, 1.0, 2.0),
        ];
        let placements = optimize_placement(&cargo, &truck());
        assert_eq!(placements[1].position_x, 0.0);
        assert_eq!(placements[1].position_z, 1.0);
    }

    #[test]
    fn test_rotation_always_none_and_empty_input() {
        let cargo = vec![CargoItem::new(1, 10.0, 1.0, 1.0, 1.0)];
        assert!(optimize_placement(&cargo, &truck())
            .iter()
            .all(|p| p.rotation == Rotation::None));
        assert!(optimize_placement(&[], &truck()).is_empty());
    }

    #[test]
    fn test_stacked_rows_are_not_height_checked() {
        let cargo: Vec<CargoItem> = (1..=4)
            .map(|id| CargoItem::new(id, 100.0, 10.0, 1.0, 2.0))
            .collect();
        let placements = optimize_placement(&cargo, &truck());
        // Fourth layer starts at 6 m in a 3 m tall vehicle
        assert_eq!(placements[3].position_z, 6.0);
    }
}

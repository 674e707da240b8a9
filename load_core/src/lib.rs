//! # load_core - Cargo Load Stability Engine
//!
//! `load_core` is the computational heart of Ballast. Given a vehicle and a
//! set of cargo boxes it computes the center of gravity of an arrangement,
//! scores its stability, estimates torque about the center of gravity,
//! raises threshold warnings, and proposes an initial layout. All inputs and
//! outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Graceful**: The engine degrades rather than fails (zero weight gives
//!   a COG at the origin, unknown cargo ids are skipped unless asked not to)
//! - **Rich Errors**: Structured error types for validation and file I/O
//!
//! ## Quick Start
//!
//! ```rust
//! use load_core::{analyze_load, optimize_placement, CargoItem, Vehicle};
//!
//! let truck = Vehicle::new(1, "Box truck", 1000.0, 10.0, 4.0, 3.0);
//! let cargo = vec![
//!     CargoItem::new(1, 300.0, 2.0, 2.0, 1.0),
//!     CargoItem::new(2, 250.0, 2.0, 2.0, 1.0),
//! ];
//!
//! let placements = optimize_placement(&cargo, &truck);
//! let result = analyze_load(&placements, &cargo, &truck);
//!
//! println!("{}", serde_json::to_string_pretty(&result).unwrap());
//! ```
//!
//! ## Modules
//!
//! - [`cargo`], [`vehicle`], [`placement`], [`geometry`] - Data model
//! - [`physics`] - COG, stability, torque, warnings, optimizer, analysis
//! - [`plan`] - Load plan container and manifests
//! - [`file_io`] - Plan files with atomic saves and locking
//! - [`errors`] - Structured error types

pub mod cargo;
pub mod errors;
pub mod file_io;
pub mod geometry;
pub mod physics;
pub mod placement;
pub mod plan;
pub mod vehicle;

// Re-export commonly used types at crate root for convenience
pub use cargo::{CargoId, CargoItem};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_manifest, load_plan, save_plan, FileLock};
pub use physics::{
    analyze_load, analyze_load_with, optimize_placement, AnalysisOptions, AnalysisResult, CenterOfGravity,
    TorqueAnalysis, UnknownCargoPolicy,
};
pub use placement::{Placement, Rotation};
pub use plan::{LoadManifest, LoadPlan, PlanSettings, PlanStatus};
pub use vehicle::Vehicle;

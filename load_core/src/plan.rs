//! # Load Plan
//!
//! A `LoadPlan` is the record of one planning run: the vehicle and cargo it
//! was computed for, the placements, the analysis and a status. Plans
//! serialize to `.blp` (Ballast load plan) files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! LoadPlan
//! ├── meta: PlanMetadata (version, id, label, vehicle id, timestamps, status)
//! ├── settings: PlanSettings (unknown cargo policy)
//! ├── vehicle: Vehicle
//! ├── cargo: Vec<CargoItem>
//! ├── placements: Vec<Placement>
//! └── analysis: AnalysisResult
//! ```
//!
//! ## Example
//!
//! ```rust
//! use load_core::cargo::CargoItem;
//! use load_core::plan::{LoadPlan, PlanSettings, PlanStatus};
//! use load_core::vehicle::Vehicle;
//!
//! let truck = Vehicle::new(1, "Box truck", 1000.0, 10.0, 4.0, 3.0);
//! let cargo = vec![CargoItem::new(1, 400.0, 2.0, 2.0, 1.0)];
//!
//! let plan = LoadPlan::generate("Morning run", truck, cargo, PlanSettings::default())?;
//! assert_eq!(plan.placements.len(), 1);
//! assert_eq!(plan.meta.status, PlanStatus::Draft);
//! # Ok::<(), load_core::errors::CalcError>(())
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::cargo::{validate_cargo, CargoItem};
use crate::errors::{CalcError, CalcResult};
use crate::physics::{analyze_load_with, optimize_placement, AnalysisOptions, AnalysisResult, UnknownCargoPolicy};
use crate::placement::Placement;
use crate::vehicle::Vehicle;

/// Current schema version for .blp files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Review status of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// Analysis flagged the load as unsafe
    #[default]
    Draft,
    /// Analysis found the load safe
    Approved,
}

impl PlanStatus {
    /// Status implied by an analysis.
    pub fn from_analysis(analysis: &AnalysisResult) -> Self {
        if analysis.is_safe {
            PlanStatus::Approved
        } else {
            PlanStatus::Draft
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PlanStatus::Draft => "draft",
            PlanStatus::Approved => "approved",
        }
    }
}

/// Plan metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Unique plan id
    pub id: Uuid,

    /// User label for this plan
    pub label: String,

    /// Vehicle the plan was computed for
    pub vehicle_id: u64,

    /// When the plan was created
    pub created: DateTime<Utc>,

    /// When the plan was last modified
    pub modified: DateTime<Utc>,

    pub status: PlanStatus,
}

/// Per-plan settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlanSettings {
    /// Handling of placements that reference unknown cargo
    #[serde(default)]
    pub unknown_cargo: UnknownCargoPolicy,
}

impl PlanSettings {
    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            unknown_cargo: self.unknown_cargo,
        }
    }
}

/// Root plan container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadPlan {
    pub meta: PlanMetadata,

    #[serde(default)]
    pub settings: PlanSettings,

    pub vehicle: Vehicle,

    pub cargo: Vec<CargoItem>,

    /// One entry per placed item, in placement order
    pub placements: Vec<Placement>,

    pub analysis: AnalysisResult,
}

/// Planning input: a vehicle, its cargo, and optionally a fixed layout.
///
/// ## JSON Example
///
/// ```json
/// {
///   "vehicle": { "id": 1, "vehicle_type": "Van", "max_load": 1000.0,
///                "length": 10.0, "width": 4.0, "height": 3.0 },
///   "cargo": [ { "id": 1, "weight": 600.0, "length": 2.0, "width": 2.0, "height": 1.0 } ],
///   "placements": [ { "cargo_id": 1, "position_x": 0.0, "position_y": 1.0, "position_z": 0.0 } ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadManifest {
    pub vehicle: Vehicle,

    pub cargo: Vec<CargoItem>,

    /// Fixed layout; the optimizer runs when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placements: Option<Vec<Placement>>,
}

impl LoadManifest {
    pub fn validate(&self) -> CalcResult<()> {
        validate_inputs(&self.vehicle, &self.cargo)
    }

    /// Supplied placements, or the optimizer's when none were given.
    pub fn resolve_placements(&self) -> Vec<Placement> {
        match &self.placements {
            Some(placements) => placements.clone(),
            None => optimize_placement(&self.cargo, &self.vehicle),
        }
    }

    /// Build a plan from this manifest.
    pub fn into_plan(self, label: impl Into<String>, settings: PlanSettings) -> CalcResult<LoadPlan> {
        match self.placements {
            Some(placements) => LoadPlan::with_placements(label, self.vehicle, self.cargo, placements, settings),
            None => LoadPlan::generate(label, self.vehicle, self.cargo, settings),
        }
    }
}

/// Validate a vehicle and cargo set before planning.
///
/// Rejects an empty cargo list, non-positive or non-finite numbers and
/// duplicate cargo ids.
pub fn validate_inputs(vehicle: &Vehicle, cargo: &[CargoItem]) -> CalcResult<()> {
    vehicle.validate()?;
    if cargo.is_empty() {
        return Err(CalcError::invalid_input("cargo", "[]", "No cargo items provided"));
    }
    validate_cargo(cargo)
}

impl LoadPlan {
    /// Generate a plan with optimizer-chosen placements.
    ///
    /// # Returns
    ///
    /// * `Ok(LoadPlan)` - `Approved` if the analysis is safe, else `Draft`
    /// * `Err(CalcError::InvalidInput)` - empty cargo or bad numbers
    /// * `Err(CalcError::DuplicateCargo)` - two items share an id
    pub fn generate(
        label: impl Into<String>,
        vehicle: Vehicle,
        cargo: Vec<CargoItem>,
        settings: PlanSettings,
    ) -> CalcResult<Self> {
        validate_inputs(&vehicle, &cargo)?;
        let placements = optimize_placement(&cargo, &vehicle);
        Self::build(label.into(), vehicle, cargo, placements, settings)
    }

    /// Create a plan from caller-supplied placements.
    pub fn with_placements(
        label: impl Into<String>,
        vehicle: Vehicle,
        cargo: Vec<CargoItem>,
        placements: Vec<Placement>,
        settings: PlanSettings,
    ) -> CalcResult<Self> {
        validate_inputs(&vehicle, &cargo)?;
        Self::build(label.into(), vehicle, cargo, placements, settings)
    }

    fn build(
        label: String,
        vehicle: Vehicle,
        cargo: Vec<CargoItem>,
        placements: Vec<Placement>,
        settings: PlanSettings,
    ) -> CalcResult<Self> {
        let analysis = analyze_load_with(&placements, &cargo, &vehicle, &settings.analysis_options())?;
        let status = PlanStatus::from_analysis(&analysis);
        let now = Utc::now();

        let plan = LoadPlan {
            meta: PlanMetadata {
                version: SCHEMA_VERSION.to_string(),
                id: Uuid::new_v4(),
                label,
                vehicle_id: vehicle.id,
                created: now,
                modified: now,
                status,
            },
            settings,
            vehicle,
            cargo,
            placements,
            analysis,
        };

        info!(
            plan_id = %plan.meta.id,
            vehicle_id = plan.meta.vehicle_id,
            items = plan.cargo.len(),
            score = plan.analysis.stability_score,
            status = plan.meta.status.display_name(),
            "load plan built"
        );
        Ok(plan)
    }

    /// Replace the placements and recompute the analysis and status.
    pub fn set_placements(&mut self, placements: Vec<Placement>) -> CalcResult<()> {
        self.placements = placements;
        self.reanalyze()
    }

    /// Recompute the analysis and status from the stored inputs.
    pub fn reanalyze(&mut self) -> CalcResult<()> {
        self.analysis = analyze_load_with(
            &self.placements,
            &self.cargo,
            &self.vehicle,
            &self.settings.analysis_options(),
        )?;
        self.meta.status = PlanStatus::from_analysis(&self.analysis);
        self.touch();
        Ok(())
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn is_approved(&self) -> bool {
        self.meta.status == PlanStatus::Approved
    }
}

//! Text and JSON rendering for CLI results.

use std::collections::HashMap;

use serde::Serialize;

use load_core::{AnalysisResult, CalcResult, CargoId, CargoItem, LoadPlan, Placement, Vehicle};

const RULE: &str = "═══════════════════════════════════════";

pub fn print_json<T: Serialize>(value: &T) -> CalcResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn banner(title: &str) {
    println!("{}", RULE);
    println!("  {}", title);
    println!("{}", RULE);
}

pub fn print_placements(placements: &[Placement], cargo: &[CargoItem]) {
    let names: HashMap<CargoId, String> = cargo.iter().map(|c| (c.id, c.label())).collect();

    banner("PLACEMENTS");
    println!();
    println!("  {:<20} {:>8} {:>8} {:>8}", "Cargo", "x (m)", "y (m)", "z (m)");
    for p in placements {
        let name = names
            .get(&p.cargo_id)
            .cloned()
            .unwrap_or_else(|| format!("#{} (unknown)", p.cargo_id));
        println!(
            "  {:<20} {:>8.2} {:>8.2} {:>8.2}",
            name, p.position_x, p.position_y, p.position_z
        );
    }
}

pub fn print_analysis(result: &AnalysisResult, vehicle: &Vehicle) {
    let cog = &result.center_of_gravity;
    let torque = &result.torque_analysis;

    banner("LOAD ANALYSIS");
    println!();
    println!(
        "Vehicle:  {} ({:.2} x {:.2} x {:.2} m)",
        vehicle.vehicle_type, vehicle.length, vehicle.width, vehicle.height
    );
    println!(
        "Weight:   {:.2} / {:.2} kg ({:.1}%)",
        result.total_weight,
        vehicle.max_load,
        result.utilization_percent(vehicle)
    );
    println!();
    println!("Center of gravity:");
    println!("  x = {:.3} m  (ideal {:.3})", cog.x, vehicle.length / 2.0);
    println!("  y = {:.3} m  (ideal {:.3})", cog.y, vehicle.width / 2.0);
    println!("  z = {:.3} m  (ideal {:.3})", cog.z, vehicle.height / 2.0);
    println!();
    println!("Torque:");
    println!("  pitch = {:.2}", torque.pitch);
    println!("  roll  = {:.2}", torque.roll);
    println!("  yaw   = {:.2}", torque.yaw);
    println!();
    println!("Stability score: {:.2} / 100", result.stability_score);

    if !result.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &result.warnings {
            println!("  - {}", warning);
        }
    }

    println!();
    banner(&format!(
        "RESULT: {}",
        if result.is_safe { "SAFE" } else { "UNSAFE" }
    ));
}

pub fn print_plan(plan: &LoadPlan) {
    banner(&format!("LOAD PLAN: {}", plan.meta.label));
    println!();
    println!("Id:       {}", plan.meta.id);
    println!("Status:   {}", plan.meta.status.display_name());
    println!("Created:  {}", plan.meta.created.to_rfc3339());
    println!("Items:    {}", plan.cargo.len());
    println!();
    print_placements(&plan.placements, &plan.cargo);
    println!();
    print_analysis(&plan.analysis, &plan.vehicle);
}

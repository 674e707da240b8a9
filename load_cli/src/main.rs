//! # Ballast CLI Application
//!
//! Command-line collaborator for the load engine: reads a JSON load manifest,
//! validates it, runs the optimizer and analysis, and prints or saves the
//! results.
//!
//! ## Commands
//!
//! ```text
//! ballast optimize <MANIFEST>               Print generated placements
//! ballast analyze  <MANIFEST> [--strict]    Analyze supplied (or generated) placements
//! ballast plan     <MANIFEST> [-o FILE]     Generate and save a load plan
//! ballast show     <PLAN>                   Summarize a saved plan
//! ```
//!
//! Add `--json` for machine-readable output and `-v`/`-vv`/`-vvv` for logs.

mod output;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use load_core::file_io::{load_plan_with_lock_check, PLAN_EXTENSION};
use load_core::{
    analyze_load_with, load_manifest, optimize_placement, save_plan, AnalysisOptions, CalcResult, FileLock,
    PlanSettings, UnknownCargoPolicy,
};

/// Ballast - cargo load stability analysis and placement planning
#[derive(Parser)]
#[command(name = "ballast")]
#[command(version)]
#[command(about = "Cargo load stability analysis and placement planning")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate placements with the heaviest-first shelf heuristic
    Optimize {
        /// Load manifest (JSON with vehicle and cargo)
        manifest: PathBuf,
    },
    /// Analyze a load arrangement
    ///
    /// Uses the manifest's placements when present, otherwise the
    /// optimizer's.
    Analyze {
        /// Load manifest (JSON with vehicle, cargo, optional placements)
        manifest: PathBuf,

        #[command(flatten)]
        policy: PolicyArgs,
    },
    /// Generate a load plan and save it as a .blp file
    Plan {
        /// Load manifest (JSON with vehicle, cargo, optional placements)
        manifest: PathBuf,

        /// Output path (defaults to the manifest path with a .blp extension)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Plan label (defaults to the manifest file stem)
        #[arg(long)]
        label: Option<String>,

        /// Identity recorded in the plan's lock file
        #[arg(long, env = "BALLAST_USER", default_value = "ballast")]
        user: String,

        #[command(flatten)]
        policy: PolicyArgs,
    },
    /// Print a saved load plan
    Show {
        /// Plan file written by `ballast plan`
        plan: PathBuf,
    },
}

#[derive(Args)]
struct PolicyArgs {
    /// Fail when a placement references a cargo id not in the manifest
    #[arg(long, env = "BALLAST_STRICT")]
    strict: bool,
}

impl PolicyArgs {
    fn unknown_cargo(&self) -> UnknownCargoPolicy {
        if self.strict {
            UnknownCargoPolicy::Reject
        } else {
            UnknownCargoPolicy::Skip
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> CalcResult<()> {
    match &cli.command {
        Commands::Optimize { manifest } => optimize(manifest, cli.json),
        Commands::Analyze { manifest, policy } => analyze(manifest, policy, cli.json),
        Commands::Plan {
            manifest,
            out,
            label,
            user,
            policy,
        } => plan(manifest, out.as_deref(), label.as_deref(), user, policy, cli.json),
        Commands::Show { plan } => show(plan, cli.json),
    }
}

fn optimize(manifest_path: &Path, json: bool) -> CalcResult<()> {
    let manifest = load_manifest(manifest_path)?;
    manifest.validate()?;

    let placements = optimize_placement(&manifest.cargo, &manifest.vehicle);
    debug!(count = placements.len(), "placements generated");

    if json {
        output::print_json(&placements)
    } else {
        output::print_placements(&placements, &manifest.cargo);
        Ok(())
    }
}

fn analyze(manifest_path: &Path, policy: &PolicyArgs, json: bool) -> CalcResult<()> {
    let manifest = load_manifest(manifest_path)?;
    manifest.validate()?;

    if manifest.placements.is_none() {
        info!("manifest has no placements; using optimizer layout");
    }
    let placements = manifest.resolve_placements();
    let options = AnalysisOptions {
        unknown_cargo: policy.unknown_cargo(),
    };
    let result = analyze_load_with(&placements, &manifest.cargo, &manifest.vehicle, &options)?;

    if json {
        output::print_json(&result)
    } else {
        output::print_analysis(&result, &manifest.vehicle);
        Ok(())
    }
}

fn plan(
    manifest_path: &Path,
    out: Option<&Path>,
    label: Option<&str>,
    user: &str,
    policy: &PolicyArgs,
    json: bool,
) -> CalcResult<()> {
    let manifest = load_manifest(manifest_path)?;

    let label = label.map(str::to_string).unwrap_or_else(|| {
        manifest_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Load plan".to_string())
    });
    let settings = PlanSettings {
        unknown_cargo: policy.unknown_cargo(),
    };
    let plan = manifest.into_plan(label, settings)?;

    let out_path = out
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest_path.with_extension(PLAN_EXTENSION));

    let lock = FileLock::acquire(&out_path, user)?;
    save_plan(&plan, &out_path)?;
    drop(lock);

    if json {
        output::print_json(&plan)
    } else {
        output::print_plan(&plan);
        println!();
        println!("Saved to {}", out_path.display());
        Ok(())
    }
}

fn show(plan_path: &Path, json: bool) -> CalcResult<()> {
    let (plan, lock_info) = load_plan_with_lock_check(plan_path)?;

    if json {
        return output::print_json(&plan);
    }

    output::print_plan(&plan);
    if let Some(lock) = lock_info {
        println!();
        println!(
            "Locked by {} on {} since {}",
            lock.user_id,
            lock.machine,
            lock.locked_at.to_rfc3339()
        );
    }
    Ok(())
}

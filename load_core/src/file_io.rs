//! # File I/O Module
//!
//! Reads load manifests and reads/writes load plan files:
//! - **Atomic saves**: Write to a .tmp sidecar, sync, rename over the target
//! - **File locking**: Keep two dispatchers from writing the same plan
//! - **Version validation**: Refuse plan files from an incompatible schema
//!
//! ## File Format
//!
//! Plans are saved as `.blp` files containing JSON ([`LoadPlan`]). Lock files
//! append `.lock` to the plan's extension and record who holds the lock.
//! Manifests ([`LoadManifest`]) are plain JSON with any extension.
//!
//! ## Example
//!
//! ```rust,no_run
//! use load_core::file_io::{load_manifest, save_plan, FileLock};
//! use load_core::plan::PlanSettings;
//! use std::path::Path;
//!
//! let manifest = load_manifest(Path::new("tuesday.json"))?;
//! let plan = manifest.into_plan("Tuesday", PlanSettings::default())?;
//!
//! let path = Path::new("tuesday.blp");
//! let lock = FileLock::acquire(path, "dispatch@depot")?;
//! save_plan(&plan, path)?;
//! drop(lock);
//! # Ok::<(), load_core::errors::CalcError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{CalcError, CalcResult};
use crate::plan::{LoadManifest, LoadPlan, SCHEMA_VERSION};

/// Default extension for plan files
pub const PLAN_EXTENSION: &str = "blp";

/// Lock file metadata stored in `.lock` sidecars
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    /// Machine name where lock was acquired
    pub machine: String,
    /// Process ID that holds the lock
    pub pid: u32,
    /// When the lock was acquired
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Create new lock info for the current process
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }
}

fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME")
            .ok()
            .or_else(|| std::env::var("HOST").ok())
    }
}

/// File lock guard that releases the lock when dropped.
///
/// Holds an OS-level exclusive lock (via fs2) on the sidecar and writes
/// [`LockInfo`] into it so other users can see who holds the plan.
pub struct FileLock {
    lock_path: PathBuf,
    _lock_file: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire an exclusive lock on a plan file.
    ///
    /// # Returns
    ///
    /// * `Ok(FileLock)` - Lock acquired successfully
    /// * `Err(CalcError::FileLocked)` - Another live process holds the lock
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> CalcResult<Self> {
        let lock_path = sidecar_path(path, "lock");
        let info = LockInfo::new(user_id);

        if let Some(existing) = live_lock(&lock_path) {
            return Err(CalcError::file_locked(
                path.display().to_string(),
                format!("{} ({})", existing.user_id, existing.machine),
                existing.locked_at.to_rfc3339(),
            ));
        }

        let mut lock_file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| CalcError::file_error("create lock", lock_path.display().to_string(), e.to_string()))?;

        lock_file.try_lock_exclusive().map_err(|_| {
            CalcError::file_locked(path.display().to_string(), "another process", "unknown")
        })?;

        let lock_json = serde_json::to_string_pretty(&info)?;
        lock_file
            .write_all(lock_json.as_bytes())
            .and_then(|_| lock_file.sync_all())
            .map_err(|e| CalcError::file_error("write lock", lock_path.display().to_string(), e.to_string()))?;

        debug!(path = %path.display(), user = %info.user_id, "plan lock acquired");

        Ok(FileLock {
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Check if a plan is locked without acquiring the lock.
    pub fn check(path: &Path) -> Option<LockInfo> {
        live_lock(&sidecar_path(path, "lock"))
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // OS lock goes with the file handle
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// `plan.blp` + `lock` -> `plan.blp.lock`
fn sidecar_path(path: &Path, suffix: &str) -> PathBuf {
    let mut sidecar = path.to_path_buf();
    let extension = sidecar
        .extension()
        .map(|e| format!("{}.{}", e.to_string_lossy(), suffix))
        .unwrap_or_else(|| suffix.to_string());
    sidecar.set_extension(extension);
    sidecar
}

/// Lock info from an existing, non-stale lock file.
fn live_lock(lock_path: &Path) -> Option<LockInfo> {
    if !lock_path.exists() {
        return None;
    }
    read_json::<LockInfo>(lock_path, "read lock")
        .ok()
        .filter(|info| !is_lock_stale(info))
}

/// A lock is stale when its process is gone (same machine) or it is over a day old.
fn is_lock_stale(info: &LockInfo) -> bool {
    if hostname().as_deref() == Some(info.machine.as_str()) {
        #[cfg(windows)]
        {
            use std::process::Command;
            let output = Command::new("tasklist")
                .args(["/FI", &format!("PID eq {}", info.pid), "/NH"])
                .output();
            if let Ok(output) = output {
                let stdout = String::from_utf8_lossy(&output.stdout);
                if stdout.contains("No tasks") || !stdout.contains(&info.pid.to_string()) {
                    return true;
                }
            }
        }
        #[cfg(unix)]
        {
            if fs::metadata(format!("/proc/{}", info.pid)).is_err() {
                return true;
            }
        }
    }

    (Utc::now() - info.locked_at).num_hours() > 24
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, operation: &str) -> CalcResult<T> {
    let mut file = File::open(path)
        .map_err(|e| CalcError::file_error(operation, path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error(operation, path.display().to_string(), e.to_string()))?;

    serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}

/// Save a plan with atomic write semantics.
///
/// 1. Serialize the plan to JSON
/// 2. Write to `<path>.tmp`
/// 3. fsync
/// 4. Rename over `path`
pub fn save_plan(plan: &LoadPlan, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(plan)?;
    let tmp_path = sidecar_path(path, "tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    info!(path = %path.display(), plan_id = %plan.meta.id, "plan saved");
    Ok(())
}

/// Load a plan file.
///
/// # Returns
///
/// * `Ok(LoadPlan)` - Successfully loaded plan
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_plan(path: &Path) -> CalcResult<LoadPlan> {
    let plan: LoadPlan = read_json(path, "open")?;
    validate_version(&plan.meta.version)?;
    debug!(path = %path.display(), plan_id = %plan.meta.id, "plan loaded");
    Ok(plan)
}

/// Load a plan, also reporting whether someone else holds its lock.
pub fn load_plan_with_lock_check(path: &Path) -> CalcResult<(LoadPlan, Option<LockInfo>)> {
    let plan = load_plan(path)?;
    let lock_info = FileLock::check(path);
    Ok((plan, lock_info))
}

/// Load a JSON manifest (vehicle, cargo, optional placements).
///
/// Only parses; call [`LoadManifest::validate`] before planning.
pub fn load_manifest(path: &Path) -> CalcResult<LoadManifest> {
    let manifest: LoadManifest = read_json(path, "open")?;
    debug!(
        path = %path.display(),
        cargo = manifest.cargo.len(),
        placements = ?manifest.placements.as_ref().map(Vec::len),
        "manifest loaded"
    );
    Ok(manifest)
}

/// Check that a file's schema version can be read by this build.
///
/// Major versions must match; on 0.x the file's minor version may not be
/// newer than ours.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(SCHEMA_VERSION);

    match (file_parts.as_slice(), current_parts.as_slice()) {
        ([file_major, rest @ ..], [current_major, current_rest @ ..]) => {
            if file_major != current_major {
                return Err(mismatch());
            }
            if *current_major == 0 {
                if let (Some(file_minor), Some(current_minor)) = (rest.first(), current_rest.first()) {
                    if file_minor > current_minor {
                        return Err(mismatch());
                    }
                }
            }
            Ok(())
        }
        _ => Err(mismatch()),
    }
}

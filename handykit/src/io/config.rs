//! Named launch profiles stored in a TOML file (`handykit.toml` by default).
//!
//! ```toml
//! [profiles.build]
//! name = "cargo"
//! args = "build --release"
//! working_directory = "crates/app"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::core::map::MapExt;
use crate::io::process::ProcessLaunch;

/// Default config file name, relative to the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "handykit.toml";

/// One named recipe for a [`ProcessLaunch`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LaunchProfile {
    /// Executable path or name.
    pub name: String,

    /// Pre-joined argument string, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<PathBuf>,
}

impl LaunchProfile {
    pub fn to_launch(&self) -> ProcessLaunch {
        let mut launch = ProcessLaunch::new(self.name.clone());
        if let Some(args) = &self.args {
            launch = launch.with_args(args.clone());
        }
        if let Some(dir) = &self.working_directory {
            launch = launch.in_directory(dir.clone());
        }
        launch
    }
}

/// Launch profile file (TOML).
///
/// Missing fields default to an empty profile table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LaunchConfig {
    pub profiles: BTreeMap<String, LaunchProfile>,
}

impl LaunchConfig {
    pub fn validate(&self) -> Result<()> {
        for (key, profile) in &self.profiles {
            if key.trim().is_empty() {
                return Err(anyhow!("profile names must be non-empty"));
            }
            if profile.name.trim().is_empty() {
                return Err(anyhow!("profiles.{key}.name must be non-empty"));
            }
        }
        Ok(())
    }

    /// Resolve a profile into its launch description.
    ///
    /// Fails with [`MapError::KeyNotFound`](crate::MapError::KeyNotFound) in
    /// the error chain when the profile does not exist.
    pub fn launch(&self, profile: &str) -> Result<ProcessLaunch> {
        let entry = self
            .profiles
            .get(profile)
            .ok_or(crate::MapError::KeyNotFound)
            .with_context(|| format!("unknown profile '{profile}'"))?;
        Ok(entry.to_launch())
    }

    /// Add a new profile. Existing profiles are never overwritten.
    pub fn add_profile(&mut self, key: &str, profile: LaunchProfile) -> Result<LaunchProfile> {
        self.profiles
            .add_and_return(key.to_string(), profile)
            .with_context(|| format!("profile '{key}' already exists"))
    }

    /// Remove a profile and return it.
    pub fn remove_profile(&mut self, key: &str) -> Result<LaunchProfile> {
        self.profiles
            .remove_and_return(&key.to_string())
            .with_context(|| format!("unknown profile '{key}'"))
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `LaunchConfig::default()`.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<LaunchConfig> {
    if !path.exists() {
        debug!("config file missing, using defaults");
        return Ok(LaunchConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: LaunchConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    debug!(profiles = cfg.profiles.len(), "loaded config");
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
#[instrument(skip_all, fields(path = %path.display()))]
pub fn write_config(path: &Path, cfg: &LaunchConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)?;
    info!(profiles = cfg.profiles.len(), "wrote config");
    Ok(())
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}

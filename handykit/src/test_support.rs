//! Test-only helpers shared by unit and integration tests.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::core::member::{Introspect, Member};
use crate::io::config::{DEFAULT_CONFIG_FILE, LaunchConfig, LaunchProfile, write_config};

/// Create a profile with only an executable name.
pub fn profile(name: &str) -> LaunchProfile {
    LaunchProfile {
        name: name.to_string(),
        args: None,
        working_directory: None,
    }
}

/// Create a profile with an argument string.
pub fn profile_with_args(name: &str, args: &str) -> LaunchProfile {
    LaunchProfile {
        args: Some(args.to_string()),
        ..profile(name)
    }
}

/// Temporary directory holding a `handykit.toml`.
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    /// Create a workspace whose config holds `profiles`.
    pub fn with_profiles(profiles: &[(&str, LaunchProfile)]) -> Result<Self> {
        let dir = tempfile::tempdir().context("create tempdir")?;
        let mut cfg = LaunchConfig::default();
        for (key, profile) in profiles {
            cfg.add_profile(key, profile.clone())?;
        }
        write_config(&dir.path().join(DEFAULT_CONFIG_FILE), &cfg)?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join(DEFAULT_CONFIG_FILE)
    }
}

/// Small record with one member of every visibility/level combination.
#[derive(Debug, Clone, PartialEq)]
pub struct Sensor {
    pub label: String,
    pub reading: f64,
    pub calibration: i32,
}

impl Sensor {
    pub fn new(label: &str, reading: f64) -> Self {
        Self {
            label: label.to_string(),
            reading,
            calibration: 7,
        }
    }
}

impl Introspect for Sensor {
    fn members() -> &'static [Member<Self>] {
        static MEMBERS: &[Member<Sensor>] = &[
            Member::field("label", |s: &Sensor| Box::new(s.label.clone())),
            Member::field("reading", |s: &Sensor| Box::new(s.reading)),
            Member::field("calibration", |s: &Sensor| Box::new(s.calibration)).non_public(),
            Member::property("Calibrated", |s: &Sensor| {
                Box::new(s.reading + f64::from(s.calibration))
            }),
            Member::property("Unit", |_: &Sensor| Box::new("celsius".to_string())).shared(),
        ];
        MEMBERS
    }
}

use anyhow::{Context, Result};
use bipolar_core::{
    Geometry,
    kinematics::bipolar::{DEFAULT_ARM_LENGTH, DEFAULT_MAX_STEP_DEG},
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Machine configuration consumed by the host tool
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Kinematics configuration
    #[serde(default)]
    pub kinematics: KinematicsConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

/// Machine geometry family
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryKind {
    #[default]
    Bipolar,
    Cartesian,
}

/// Kinematics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KinematicsConfig {
    /// Geometry family
    #[serde(default)]
    pub geometry: GeometryKind,

    /// Distance between the platter and arm rotation centers, mm
    #[serde(default = "default_arm_length")]
    pub arm_length: f64,

    /// Start in raw passthrough mode
    #[serde(default)]
    pub raw_mode: bool,

    /// Per-move angular step above which a warning is raised, degrees
    #[serde(default = "default_max_step_deg")]
    pub max_step_deg: f64,
}

impl Default for KinematicsConfig {
    fn default() -> Self {
        Self {
            geometry: GeometryKind::default(),
            arm_length: default_arm_length(),
            raw_mode: false,
            max_step_deg: default_max_step_deg(),
        }
    }
}

impl KinematicsConfig {
    pub fn geometry(&self) -> Geometry {
        match self.geometry {
            GeometryKind::Bipolar => Geometry::Bipolar {
                arm_length: self.arm_length,
                raw_mode: self.raw_mode,
                max_step_deg: self.max_step_deg,
            },
            GeometryKind::Cartesian => Geometry::Cartesian,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default `tracing` filter directive; `RUST_LOG` takes precedence
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_arm_length() -> f64 {
    DEFAULT_ARM_LENGTH
}

fn default_max_step_deg() -> f64 {
    DEFAULT_MAX_STEP_DEG
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a file, auto-detecting TOML or JSON format
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Self::from_toml(&content),
            Some("json") => Self::from_json(&content),
            _ => Self::from_toml(&content).or_else(|_| Self::from_json(&content)),
        }
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("failed to parse config as TOML")
    }

    /// Parse configuration from JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("failed to parse config as JSON")
    }

    /// Validate the configuration
    ///
    /// The kinematics core tolerates a bad arm length by failing every
    /// inverse call; rejecting it here surfaces the mistake at startup.
    pub fn validate(&self) -> Result<()> {
        let kin = &self.kinematics;
        if kin.geometry == GeometryKind::Bipolar {
            if !(kin.arm_length.is_finite() && kin.arm_length > 0.0) {
                anyhow::bail!(
                    "kinematics.arm_length must be a positive length, got {}",
                    kin.arm_length
                );
            }
            if kin.max_step_deg.is_nan() || kin.max_step_deg <= 0.0 {
                anyhow::bail!(
                    "kinematics.max_step_deg must be positive, got {}",
                    kin.max_step_deg
                );
            }
        }

        if self.log.filter.trim().is_empty() {
            anyhow::bail!("log.filter cannot be empty");
        }

        Ok(())
    }
}

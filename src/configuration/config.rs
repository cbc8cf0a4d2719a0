//! Configuration types for loading solar system scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`EngineConfig`]     – presentation options (scale mode)
//! - [`ParametersConfig`] – time step, frame interval, trail bound, start angles
//! - [`BodyConfig`]       – one row of the body table
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   scale_mode: logarithmic   # realistic | logarithmic | artistic, prompt if absent
//!
//! parameters:
//!   time_step: 1.0            # simulated days per nominal frame
//!   frame_interval_ms: 50     # nominal frame interval
//!   trail_length: 100         # points kept per trail
//!   speed: 1.0                # initial speed multiplier
//!   seed: 42                  # optional, reproducible start angles
//!   aligned_start: false      # every body at angle 0
//!
//! bodies:
//!   - name: Sun
//!     radius_km: 696000
//!     distance_au: 0.0
//!     period_days: 0
//!     color: "#FDB813"
//!     inclination_deg: 0.0
//!   - name: Earth
//!     radius_km: 6371
//!     distance_au: 1.0
//!     period_days: 365
//!     color: "#4169E1"
//!     inclination_deg: 0.0
//!     initial_angle_deg: 90.0   # optional, all-or-nothing across bodies
//! ```
//!
//! Every field is optional; missing bodies fall back to the built-in table.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use bevy::color::Srgba;
use serde::Deserialize;
use thiserror::Error;

use crate::simulation::scale::ScaleMode;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse scenario")]
    Yaml(#[from] serde_yaml::Error),
    #[error("scenario has no bodies")]
    NoBodies,
    #[error("duplicate body name `{0}`")]
    DuplicateName(String),
    #[error("body `{name}`: {reason}")]
    InvalidBody { name: String, reason: String },
    #[error("body `{name}`: invalid color `{color}`")]
    InvalidColor { name: String, color: String },
    #[error("more than one central body (`{0}` and `{1}`)")]
    MultipleCentral(String, String),
    #[error("initial_angle_deg given for {given} of {total} bodies, expected all or none")]
    PartialAngles { given: usize, total: usize },
    #[error("parameter `{0}` must be positive")]
    NonPositive(&'static str),
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub scale_mode: Option<ScaleMode>, // prompt when absent
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub time_step: f64,         // simulated days per nominal frame
    pub frame_interval_ms: u64, // nominal frame interval
    pub trail_length: usize,    // shared trail bound
    pub speed: f64,             // initial speed multiplier
    pub seed: Option<u64>,      // reproducible start angles
    pub aligned_start: bool,    // every body starts at angle 0
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            time_step: 1.0,
            frame_interval_ms: 50,
            trail_length: 100,
            speed: 1.0,
            seed: None,
            aligned_start: false,
        }
    }
}

/// One row of the body table
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub name: String,
    pub radius_km: f64,
    pub distance_au: f64,
    pub period_days: f64,
    pub color: String, // "#RRGGBB"
    #[serde(default)]
    pub inclination_deg: f64,
    #[serde(default)]
    pub initial_angle_deg: Option<f64>,
}

impl BodyConfig {
    fn row(name: &str, radius_km: f64, distance_au: f64, period_days: f64, color: &str, inclination_deg: f64) -> Self {
        Self {
            name: name.to_string(),
            radius_km,
            distance_au,
            period_days,
            color: color.to_string(),
            inclination_deg,
            initial_angle_deg: None,
        }
    }

    pub fn is_central(&self) -> bool {
        self.period_days <= 0.0
    }

    pub fn parse_color(&self) -> Result<Srgba, ConfigError> {
        Srgba::hex(self.color.trim()).map_err(|_| ConfigError::InvalidColor {
            name: self.name.clone(),
            color: self.color.clone(),
        })
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub bodies: Vec<BodyConfig>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            parameters: ParametersConfig::default(),
            bodies: default_bodies(),
        }
    }
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: ScenarioConfig = serde_yaml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: ScenarioConfig = serde_yaml::from_reader(BufReader::new(file))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Explicit start angles in radians, if every body carries one
    pub fn explicit_angles(&self) -> Option<Vec<f64>> {
        self.bodies
            .iter()
            .map(|b| b.initial_angle_deg.map(f64::to_radians))
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.parameters;
        if !(p.time_step > 0.0) {
            return Err(ConfigError::NonPositive("time_step"));
        }
        if p.frame_interval_ms == 0 {
            return Err(ConfigError::NonPositive("frame_interval_ms"));
        }
        if p.trail_length == 0 {
            return Err(ConfigError::NonPositive("trail_length"));
        }
        if self.bodies.is_empty() {
            return Err(ConfigError::NoBodies);
        }

        let mut names = HashSet::new();
        let mut central: Option<&str> = None;
        for b in &self.bodies {
            if !names.insert(b.name.as_str()) {
                return Err(ConfigError::DuplicateName(b.name.clone()));
            }
            let invalid = |reason: &str| ConfigError::InvalidBody {
                name: b.name.clone(),
                reason: reason.to_string(),
            };
            if !(b.radius_km >= 0.0) {
                return Err(invalid("radius_km must be non-negative"));
            }
            if !(b.distance_au >= 0.0) {
                return Err(invalid("distance_au must be non-negative"));
            }
            if b.period_days.is_nan() || b.period_days < 0.0 {
                return Err(invalid("period_days must be non-negative"));
            }
            if b.is_central() {
                if b.distance_au != 0.0 {
                    return Err(invalid("a body with period 0 must sit at distance 0"));
                }
                if let Some(first) = central {
                    return Err(ConfigError::MultipleCentral(first.to_string(), b.name.clone()));
                }
                central = Some(b.name.as_str());
            }
            b.parse_color()?;
        }

        let given = self.bodies.iter().filter(|b| b.initial_angle_deg.is_some()).count();
        if given != 0 && given != self.bodies.len() {
            return Err(ConfigError::PartialAngles {
                given,
                total: self.bodies.len(),
            });
        }
        Ok(())
    }
}

/// Sun plus the eight planets: radius km, distance AU, period days, inclination deg
pub fn default_bodies() -> Vec<BodyConfig> {
    vec![
        BodyConfig::row("Sun", 696_000.0, 0.0, 0.0, "#FDB813", 0.0),
        BodyConfig::row("Mercury", 2_440.0, 0.39, 88.0, "#8C7853", 7.0),
        BodyConfig::row("Venus", 6_052.0, 0.72, 225.0, "#FFC649", 3.4),
        BodyConfig::row("Earth", 6_371.0, 1.0, 365.0, "#4169E1", 0.0),
        BodyConfig::row("Mars", 3_390.0, 1.52, 687.0, "#CD5C5C", 1.9),
        BodyConfig::row("Jupiter", 69_911.0, 5.20, 4_333.0, "#DAA520", 1.3),
        BodyConfig::row("Saturn", 58_232.0, 9.54, 10_759.0, "#F4A460", 2.5),
        BodyConfig::row("Uranus", 25_362.0, 19.19, 30_687.0, "#4FD0E0", 0.8),
        BodyConfig::row("Neptune", 24_622.0, 30.07, 60_190.0, "#4169E1", 1.8),
    ]
}

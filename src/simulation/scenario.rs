//! Build the runtime simulation state from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing), the chosen `ScaleMode` and an
//! `InitialAngles` policy and produces a `SimulationState` holding:
//! - numerical parameters (`Parameters`)
//! - body state (`System` with bodies at their start angles, t = 0)
//! - playback controls (`Playback`)
//! - the scale mode, fixed for the run
//!
//! The state is inserted into Bevy as a `Resource` and mutated only by the
//! timer system and UI handlers.

use bevy::prelude::Resource;

use crate::configuration::config::{BodyConfig, ConfigError, ScenarioConfig};
use crate::simulation::kinematics::{advance_orbits, days_for_elapsed};
use crate::simulation::params::{InitialAngles, Parameters, Playback};
use crate::simulation::scale::ScaleMode;
use crate::simulation::states::{CelestialBody, System};

#[derive(Resource, Debug, Clone)]
pub struct SimulationState {
    pub parameters: Parameters,
    pub system: System,
    pub playback: Playback,
    pub scale_mode: ScaleMode,
}

impl SimulationState {
    pub fn build(cfg: &ScenarioConfig, scale_mode: ScaleMode, angles: &InitialAngles) -> Result<Self, ConfigError> {
        cfg.validate()?;

        let p_cfg = &cfg.parameters;
        let parameters = Parameters {
            time_step: p_cfg.time_step,
            frame_interval: p_cfg.frame_interval_ms as f64 / 1000.0,
            trail_length: p_cfg.trail_length,
        };

        let start = angles.resolve(cfg.bodies.len());
        let bodies = cfg
            .bodies
            .iter()
            .zip(start)
            .map(|(bc, angle): (&BodyConfig, f64)| {
                Ok(CelestialBody::new(
                    bc.name.clone(),
                    bc.radius_km,
                    bc.distance_au,
                    bc.period_days,
                    bc.parse_color()?,
                    bc.inclination_deg,
                    angle,
                    parameters.trail_length,
                ))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let mut playback = Playback::default();
        playback.set_speed(p_cfg.speed);

        Ok(Self {
            parameters,
            system: System { bodies, t: 0.0 },
            playback,
            scale_mode,
        })
    }

    /// Start-angle policy described by the scenario itself
    pub fn scenario_angles(cfg: &ScenarioConfig) -> InitialAngles {
        if let Some(angles) = cfg.explicit_angles() {
            InitialAngles::Explicit(angles)
        } else if cfg.parameters.aligned_start {
            InitialAngles::Aligned
        } else if let Some(seed) = cfg.parameters.seed {
            InitialAngles::Seeded(seed)
        } else {
            InitialAngles::Entropy
        }
    }

    /// Advance all bodies by `dt_days` unless paused
    pub fn advance(&mut self, dt_days: f64) {
        if self.playback.paused {
            return;
        }
        advance_orbits(&mut self.system, dt_days);
    }

    /// Advance by the simulated time matching `elapsed_secs` of wall time.
    /// Returns the simulated days actually applied.
    pub fn tick(&mut self, elapsed_secs: f64) -> f64 {
        if self.playback.paused {
            return 0.0;
        }
        let dt = days_for_elapsed(&self.parameters, self.playback.speed(), elapsed_secs);
        self.advance(dt);
        dt
    }

    /// One nominal frame
    pub fn step_frame(&mut self) -> f64 {
        self.tick(self.parameters.frame_interval)
    }

    pub fn elapsed_days(&self) -> f64 {
        self.system.t
    }

    /// Largest display distance among all bodies
    pub fn display_extent(&self) -> f64 {
        self.system
            .bodies
            .iter()
            .map(|b| self.scale_mode.distance(b.distance_au))
            .fold(0.0, f64::max)
    }
}

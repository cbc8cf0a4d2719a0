//! Runtime parameters and playback controls
//!
//! `Parameters` holds the fixed numerical settings of a run:
//! - simulated days per nominal frame and the nominal frame interval,
//! - the shared trail bound.
//!
//! `Playback` holds the user-adjustable flags (speed, pause, visibility) and
//! `InitialAngles` decides where every body starts on its orbit.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const SPEED_MIN: f64 = 0.1;
pub const SPEED_MAX: f64 = 10.0;

/// Longest wall-clock gap a single tick may integrate, in nominal frames
pub const MAX_FRAMES_PER_TICK: f64 = 10.0;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub time_step: f64,      // simulated days per nominal frame
    pub frame_interval: f64, // nominal frame interval, seconds
    pub trail_length: usize, // trail bound, identical for all bodies
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            time_step: 1.0,
            frame_interval: 0.05,
            trail_length: 100,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Playback {
    speed: f64,
    pub paused: bool,
    pub show_orbits: bool,
    pub show_labels: bool,
}

impl Playback {
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Set the speed multiplier, clamped into [SPEED_MIN, SPEED_MAX]
    pub fn set_speed(&mut self, speed: f64) -> f64 {
        self.speed = if speed.is_nan() {
            1.0
        } else {
            speed.clamp(SPEED_MIN, SPEED_MAX)
        };
        self.speed
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn toggle_orbits(&mut self) -> bool {
        self.show_orbits = !self.show_orbits;
        self.show_orbits
    }

    pub fn toggle_labels(&mut self) -> bool {
        self.show_labels = !self.show_labels;
        self.show_labels
    }
}

impl Default for Playback {
    fn default() -> Self {
        Self {
            speed: 1.0,
            paused: false,
            show_orbits: true,
            show_labels: true,
        }
    }
}

/// Where each orbiting body starts, chosen when the state is built
#[derive(Debug, Clone, PartialEq)]
pub enum InitialAngles {
    /// Uniform in [0, 2pi) from a seeded generator, reproducible
    Seeded(u64),
    /// Uniform in [0, 2pi) from an entropy-seeded generator
    Entropy,
    /// Every body at angle 0
    Aligned,
    /// One angle (radians) per body, in table order
    Explicit(Vec<f64>),
}

impl InitialAngles {
    /// Resolve to one angle per body. Central bodies still consume a slot
    /// so explicit lists line up with the table.
    pub fn resolve(&self, count: usize) -> Vec<f64> {
        match self {
            InitialAngles::Seeded(seed) => {
                let mut rng = StdRng::seed_from_u64(*seed);
                (0..count).map(|_| rng.gen_range(0.0..TAU)).collect()
            }
            InitialAngles::Entropy => {
                let mut rng = StdRng::from_entropy();
                (0..count).map(|_| rng.gen_range(0.0..TAU)).collect()
            }
            InitialAngles::Aligned => vec![0.0; count],
            InitialAngles::Explicit(angles) => {
                let mut out: Vec<f64> = angles.iter().take(count).copied().collect();
                out.resize(count, 0.0);
                out
            }
        }
    }
}

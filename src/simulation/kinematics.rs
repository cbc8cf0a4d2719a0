//! Closed-form circular-orbit stepping
//!
//! Bodies move at constant angular velocity 2pi / period on fixed,
//! inclined circles. There is no integration error to accumulate: each
//! step only advances the angle and re-evaluates the circle.

use super::params::{Parameters, MAX_FRAMES_PER_TICK};
use super::states::System;

/// Advance every orbiting body by `dt_days` and record trails.
/// The central body never moves and never gains a trail.
pub fn advance_orbits(sys: &mut System, dt_days: f64) {
    if dt_days <= 0.0 || sys.bodies.is_empty() {
        return;
    }
    for b in sys.bodies.iter_mut() {
        b.advance(dt_days);
    }
    sys.t += dt_days;
}

/// Simulated days covered by `elapsed_secs` of wall time at `speed`
pub fn days_for_elapsed(params: &Parameters, speed: f64, elapsed_secs: f64) -> f64 {
    if params.frame_interval <= 0.0 || !elapsed_secs.is_finite() {
        return 0.0;
    }
    let frames = (elapsed_secs / params.frame_interval).clamp(0.0, MAX_FRAMES_PER_TICK);
    frames * params.time_step * speed
}

/// Shortest signed difference `a - b` between two angles, in (-pi, pi]
pub fn angle_delta(a: f64, b: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    let d = (a - b).rem_euclid(TAU);
    if d > PI {
        d - TAU
    } else {
        d
    }
}

//! Core state types for the orbit model.
//!
//! - `CelestialBody` static table values plus orbital angle and trail
//! - `Trail`         bounded FIFO of past heliocentric positions
//! - `System`        ordered bodies (central body first) and simulated time
//!
//! Positions are heliocentric, in AU, with the ecliptic as the xy-plane.

use std::collections::VecDeque;
use std::f64::consts::TAU;

use bevy::color::Srgba;
use nalgebra::Vector3;

pub type NVec3 = Vector3<f64>;

/// Bounded history of past positions, oldest first
#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<NVec3>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a point, evicting the oldest once the bound is exceeded
    pub fn push(&mut self, p: NVec3) {
        self.points.push_back(p);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &NVec3> + '_ {
        self.points.iter()
    }

    pub fn oldest(&self) -> Option<&NVec3> {
        self.points.front()
    }

    pub fn newest(&self) -> Option<&NVec3> {
        self.points.back()
    }
}

#[derive(Debug, Clone)]
pub struct CelestialBody {
    pub name: String,
    pub radius_km: f64,     // mean radius
    pub distance_au: f64,   // orbital radius, 0 for the central body
    pub period_days: f64,   // 0 for the central body
    pub color: Srgba,
    pub inclination: f64,   // radians, relative to the ecliptic
    angle: f64,             // radians in [0, 2pi)
    position: NVec3,
    trail: Trail,
}

impl CelestialBody {
    pub fn new(
        name: impl Into<String>,
        radius_km: f64,
        distance_au: f64,
        period_days: f64,
        color: Srgba,
        inclination_deg: f64,
        initial_angle: f64,
        trail_length: usize,
    ) -> Self {
        let mut body = Self {
            name: name.into(),
            radius_km,
            distance_au,
            period_days,
            color,
            inclination: inclination_deg.to_radians(),
            angle: 0.0,
            position: NVec3::zeros(),
            trail: Trail::new(trail_length),
        };
        if !body.is_central() {
            body.angle = initial_angle.rem_euclid(TAU);
        }
        body.position = body.position_at(body.angle);
        body
    }

    /// The immobile body at the origin (no period)
    pub fn is_central(&self) -> bool {
        self.period_days <= 0.0
    }

    /// Radians per simulated day, 0 for the central body
    pub fn angular_velocity(&self) -> f64 {
        if self.is_central() {
            0.0
        } else {
            TAU / self.period_days
        }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn position(&self) -> NVec3 {
        self.position
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn inclination_deg(&self) -> f64 {
        self.inclination.to_degrees()
    }

    /// Point on this body's orbit circle at `angle`, tilted about the x-axis
    pub fn position_at(&self, angle: f64) -> NVec3 {
        if self.is_central() {
            return NVec3::zeros();
        }
        let (s, c) = angle.sin_cos();
        let d = self.distance_au;
        NVec3::new(
            d * c,
            d * s * self.inclination.cos(),
            d * s * self.inclination.sin(),
        )
    }

    /// Move along the orbit by `dt_days` and record the new position
    pub(crate) fn advance(&mut self, dt_days: f64) {
        if self.is_central() {
            return;
        }
        self.angle = (self.angle + self.angular_velocity() * dt_days).rem_euclid(TAU);
        self.position = self.position_at(self.angle);
        self.trail.push(self.position);
    }
}

#[derive(Debug, Clone)]
pub struct System {
    pub bodies: Vec<CelestialBody>, // table order, central body first
    pub t: f64,                     // elapsed simulated days
}

impl System {
    pub fn body(&self, name: &str) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.name == name)
    }

    pub fn central(&self) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.is_central())
    }

    pub fn orbiting(&self) -> impl Iterator<Item = &CelestialBody> + '_ {
        self.bodies.iter().filter(|b| !b.is_central())
    }
}

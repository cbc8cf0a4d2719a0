//! Scale transforms from true radius/distance to display units.
//!
//! Every mode is strictly increasing in both radius and distance, so the
//! size and distance ordering of the table survives into the scene.

use std::fmt;

use clap::ValueEnum;
use serde::Deserialize;

use super::states::NVec3;

pub const KM_PER_AU: f64 = 149_597_870.7;
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Screen-fit factor applied to true radii in realistic mode
pub const REALISTIC_RADIUS_BOOST: f64 = 20.0;

#[derive(Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    /// True distances, radii in AU times one global boost
    Realistic,
    /// Log-compressed radii and distances
    #[default]
    Logarithmic,
    /// Boosted small bodies, sub-linear distances
    Artistic,
}

impl ScaleMode {
    pub const ALL: [ScaleMode; 3] = [ScaleMode::Realistic, ScaleMode::Logarithmic, ScaleMode::Artistic];

    pub fn name(&self) -> &'static str {
        match self {
            ScaleMode::Realistic => "realistic",
            ScaleMode::Logarithmic => "logarithmic",
            ScaleMode::Artistic => "artistic",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ScaleMode::Realistic => "Realistic",
            ScaleMode::Logarithmic => "Logarithmic",
            ScaleMode::Artistic => "Artistic",
        }
    }

    /// Display radius for a true radius in km
    pub fn radius(&self, radius_km: f64) -> f64 {
        let r = radius_km.max(0.0);
        match self {
            ScaleMode::Realistic => r / KM_PER_AU * REALISTIC_RADIUS_BOOST,
            ScaleMode::Logarithmic => 0.02 + (1.0 + r).log10() * 0.01,
            ScaleMode::Artistic => 0.05 + 0.15 * (r / EARTH_RADIUS_KM).sqrt(),
        }
    }

    /// Display distance for a true distance in AU
    pub fn distance(&self, distance_au: f64) -> f64 {
        let d = distance_au.abs();
        let scaled = match self {
            ScaleMode::Realistic => d,
            ScaleMode::Logarithmic => (d * 10.0 + 1.0).log10() * 3.0,
            ScaleMode::Artistic => d.powf(0.7) * 5.0,
        };
        scaled.copysign(distance_au)
    }

    /// Rescale a heliocentric point radially to its display distance
    pub fn point(&self, p: &NVec3) -> NVec3 {
        let r = p.norm();
        if r == 0.0 {
            return NVec3::zeros();
        }
        p * (self.distance(r) / r)
    }
}

impl fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! Render command set handed to a rendering surface once per frame
//!
//! All geometry is already in display units (scale transform applied) and
//! in orbit-model coordinates (ecliptic = xy-plane). Surfaces decide how
//! to map that onto their own axes.

use bevy::color::Srgba;
use bevy::prelude::Resource;

use crate::simulation::states::NVec3;

/// Points sampled along each full orbit circle
pub const ORBIT_PATH_POINTS: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub anchor: NVec3, // above the sphere
}

#[derive(Debug, Clone, PartialEq)]
pub struct BodyPrimitive {
    pub name: String,
    pub position: NVec3,
    pub radius: f64,
    pub color: Srgba,
    pub period_days: f64,
    pub central: bool,
    pub label: Option<Label>,
    pub trail: Option<Vec<NVec3>>,      // oldest first, only with show_orbits
    pub orbit_path: Option<Vec<NVec3>>, // closed circle, only with show_orbits
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub title: String,
    pub paused: bool,
    pub speed: f64,
    pub elapsed_days: f64,
    pub extent: f64, // largest display distance
    pub bodies: Vec<BodyPrimitive>,
}

impl Frame {
    pub fn body(&self, name: &str) -> Option<&BodyPrimitive> {
        self.bodies.iter().find(|b| b.name == name)
    }
}

/// Something that can draw a frame
pub trait RenderSurface {
    fn present(&mut self, frame: Frame);
}

/// Most recent frame, read by the Bevy drawing systems
#[derive(Resource, Debug, Default)]
pub struct LatestFrame {
    pub frame: Frame,
    pub presented: u64,
}

impl RenderSurface for LatestFrame {
    fn present(&mut self, frame: Frame) {
        self.frame = frame;
        self.presented += 1;
    }
}

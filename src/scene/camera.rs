//! Orbit-style view parameters driven by mouse gestures.
//!
//! The view circles a focus point: azimuth is measured in the ecliptic
//! from +x towards +y, elevation above the ecliptic. All vectors here are
//! in display coordinates of the orbit model (ecliptic = xy-plane).

use crate::simulation::states::NVec3;

pub const RESET_ELEVATION_DEG: f64 = 20.0;
pub const RESET_AZIMUTH_DEG: f64 = 45.0;

const MAX_ELEVATION_DEG: f64 = 89.0;
const ROTATE_DEG_PER_PIXEL: f64 = 0.3;
const PAN_PER_PIXEL: f64 = 0.0015; // fraction of view distance
const ZOOM_STEP: f64 = 1.1;        // per scroll line
const DEFAULT_DISTANCE_FACTOR: f64 = 2.2;
const MIN_DISTANCE_FACTOR: f64 = 0.01;
const MAX_DISTANCE_FACTOR: f64 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitView {
    azimuth_deg: f64,
    elevation_deg: f64,
    distance: f64,
    focus: NVec3,
    extent: f64,
}

impl OrbitView {
    /// View framing a scene whose bodies lie within `extent` of the origin
    pub fn new(extent: f64) -> Self {
        let extent = if extent.is_finite() && extent > 0.0 { extent } else { 1.0 };
        let mut view = Self {
            azimuth_deg: RESET_AZIMUTH_DEG,
            elevation_deg: RESET_ELEVATION_DEG,
            distance: 0.0,
            focus: NVec3::zeros(),
            extent,
        };
        view.reset();
        view
    }

    pub fn reset(&mut self) {
        self.azimuth_deg = RESET_AZIMUTH_DEG;
        self.elevation_deg = RESET_ELEVATION_DEG;
        self.distance = self.extent * DEFAULT_DISTANCE_FACTOR;
        self.focus = NVec3::zeros();
    }

    pub fn azimuth_deg(&self) -> f64 {
        self.azimuth_deg
    }

    pub fn elevation_deg(&self) -> f64 {
        self.elevation_deg
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn focus(&self) -> NVec3 {
        self.focus
    }

    pub fn extent(&self) -> f64 {
        self.extent
    }

    pub fn distance_bounds(&self) -> (f64, f64) {
        (self.extent * MIN_DISTANCE_FACTOR, self.extent * MAX_DISTANCE_FACTOR)
    }

    /// Drag by (dx, dy) pixels: horizontal spins azimuth, vertical tilts
    pub fn rotate(&mut self, dx: f64, dy: f64) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        self.azimuth_deg = (self.azimuth_deg - dx * ROTATE_DEG_PER_PIXEL).rem_euclid(360.0);
        self.elevation_deg =
            (self.elevation_deg + dy * ROTATE_DEG_PER_PIXEL).clamp(-MAX_ELEVATION_DEG, MAX_ELEVATION_DEG);
    }

    /// Scroll by `lines`; positive moves closer
    pub fn zoom(&mut self, lines: f64) {
        if !lines.is_finite() {
            return;
        }
        let (lo, hi) = self.distance_bounds();
        self.distance = (self.distance * ZOOM_STEP.powf(-lines)).clamp(lo, hi);
    }

    /// Drag the scene by (dx, dy) pixels in the view plane
    pub fn pan(&mut self, dx: f64, dy: f64) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        let k = self.distance * PAN_PER_PIXEL;
        let focus = self.focus - self.right() * (dx * k) + self.up() * (dy * k);
        let limit = self.extent;
        let n = focus.norm();
        self.focus = if n > limit { focus * (limit / n) } else { focus };
    }

    /// Unit vector from the focus towards the eye
    pub fn direction(&self) -> NVec3 {
        let (sa, ca) = self.azimuth_deg.to_radians().sin_cos();
        let (se, ce) = self.elevation_deg.to_radians().sin_cos();
        NVec3::new(ce * ca, ce * sa, se)
    }

    pub fn eye(&self) -> NVec3 {
        self.focus + self.direction() * self.distance
    }

    /// Screen-right in the view plane
    pub fn right(&self) -> NVec3 {
        let (sa, ca) = self.azimuth_deg.to_radians().sin_cos();
        NVec3::new(-sa, ca, 0.0)
    }

    /// Screen-up in the view plane
    pub fn up(&self) -> NVec3 {
        let (sa, ca) = self.azimuth_deg.to_radians().sin_cos();
        let (se, ce) = self.elevation_deg.to_radians().sin_cos();
        NVec3::new(-se * ca, -se * sa, ce)
    }
}

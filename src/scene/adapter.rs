//! Scene adapter: orbit model state in, render commands out.
//!
//! Owns the scale mode (fixed at construction) and the view. Contains no
//! orbital mechanics; it only reads body state and applies the scale.

use std::f64::consts::TAU;

use bevy::log::{debug, info};
use bevy::prelude::Resource;

use crate::scene::camera::OrbitView;
use crate::scene::controls::Control;
use crate::scene::frame::{BodyPrimitive, Frame, Label, RenderSurface, ORBIT_PATH_POINTS};
use crate::simulation::scale::ScaleMode;
use crate::simulation::scenario::SimulationState;
use crate::simulation::states::{CelestialBody, NVec3};

const CENTRAL_LABEL_LIFT: f64 = 1.5; // label height in sphere radii
const BODY_LABEL_LIFT: f64 = 2.0;

#[derive(Resource, Debug, Clone)]
pub struct SceneAdapter {
    scale: ScaleMode,
    view: OrbitView,
}

impl SceneAdapter {
    pub fn new(scale: ScaleMode, extent: f64) -> Self {
        Self {
            scale,
            view: OrbitView::new(extent),
        }
    }

    pub fn for_state(state: &SimulationState) -> Self {
        Self::new(state.scale_mode, state.display_extent())
    }

    pub fn scale(&self) -> ScaleMode {
        self.scale
    }

    pub fn view(&self) -> &OrbitView {
        &self.view
    }

    pub fn title(&self, state: &SimulationState) -> String {
        let mut title = format!("Solar System Simulator - Scale: {}", self.scale.title());
        if state.playback.paused {
            title.push_str(" [PAUSED]");
        }
        title
    }

    pub fn build_frame(&self, state: &SimulationState) -> Frame {
        let bodies = state
            .system
            .bodies
            .iter()
            .map(|b| self.primitive(b, state))
            .collect();

        Frame {
            title: self.title(state),
            paused: state.playback.paused,
            speed: state.playback.speed(),
            elapsed_days: state.elapsed_days(),
            extent: self.view.extent(),
            bodies,
        }
    }

    fn primitive(&self, b: &CelestialBody, state: &SimulationState) -> BodyPrimitive {
        let central = b.is_central();
        let position = self.scale.point(&b.position());
        let radius = self.scale.radius(b.radius_km);
        let show_orbits = state.playback.show_orbits && !central;

        let label = state.playback.show_labels.then(|| {
            let lift = if central { CENTRAL_LABEL_LIFT } else { BODY_LABEL_LIFT };
            Label {
                text: b.name.clone(),
                anchor: position + NVec3::z() * (radius * lift),
            }
        });

        let trail: Option<Vec<NVec3>> = show_orbits.then(|| b.trail().iter().map(|p| self.scale.point(p)).collect());

        let orbit_path: Option<Vec<NVec3>> = show_orbits.then(|| {
            (0..=ORBIT_PATH_POINTS)
                .map(|i| {
                    let a = TAU * i as f64 / ORBIT_PATH_POINTS as f64;
                    self.scale.point(&b.position_at(a))
                })
                .collect()
        });

        BodyPrimitive {
            name: b.name.clone(),
            position,
            radius,
            color: b.color,
            period_days: b.period_days,
            central,
            label,
            trail,
            orbit_path,
        }
    }

    /// Build the current frame and hand it to `surface`
    pub fn render<S: RenderSurface + ?Sized>(&self, state: &SimulationState, surface: &mut S) {
        surface.present(self.build_frame(state));
    }

    /// Apply one interaction event to playback or view
    pub fn handle(&mut self, state: &mut SimulationState, control: Control) {
        match control {
            Control::TogglePause => {
                let paused = state.playback.toggle_pause();
                info!("simulation {}", if paused { "paused" } else { "resumed" });
            }
            Control::ToggleOrbits => {
                let on = state.playback.toggle_orbits();
                info!("orbits {}", if on { "shown" } else { "hidden" });
            }
            Control::ToggleLabels => {
                let on = state.playback.toggle_labels();
                info!("labels {}", if on { "shown" } else { "hidden" });
            }
            Control::ResetView => {
                self.view.reset();
                info!(
                    "view reset to elevation {}°, azimuth {}°",
                    self.view.elevation_deg(),
                    self.view.azimuth_deg()
                );
            }
            Control::SetSpeed(speed) => {
                let applied = state.playback.set_speed(speed);
                debug!("speed set to {applied:.1}x");
            }
            Control::Rotate { dx, dy } => self.view.rotate(dx, dy),
            Control::Pan { dx, dy } => self.view.pan(dx, dy),
            Control::Zoom(lines) => self.view.zoom(lines),
        }
    }
}

//! Run the orbit model and scene adapter without a window.
//!
//! Frames go to a `FrameLog` surface instead of the GPU; every nominal
//! frame advances the model by exactly one time step.

use std::time::Instant;

use bevy::log::LogPlugin;
use bevy::prelude::*;

use crate::scene::adapter::SceneAdapter;
use crate::scene::frame::{Frame, RenderSurface};
use crate::simulation::scenario::SimulationState;

/// Frames between progress lines
const LOG_EVERY: u64 = 500;

/// Surface that keeps the last frame and logs progress
#[derive(Resource, Debug, Default)]
pub struct FrameLog {
    pub last: Option<Frame>,
    pub frames: u64,
}

impl RenderSurface for FrameLog {
    fn present(&mut self, frame: Frame) {
        self.frames += 1;
        if self.frames % LOG_EVERY == 0 {
            info!(
                "frame {:6}: day {:9.1}, {} bodies{}",
                self.frames,
                frame.elapsed_days,
                frame.bodies.len(),
                if frame.paused { " [paused]" } else { "" }
            );
        }
        self.last = Some(frame);
    }
}

fn headless_step(mut state: ResMut<SimulationState>, adapter: Res<SceneAdapter>, mut log: ResMut<FrameLog>) {
    state.step_frame();
    adapter.render(&state, &mut *log);
}

/// App with the simulation wired up but no plugins; drive it with `App::update`
pub fn build_headless_app(state: SimulationState) -> App {
    let adapter = SceneAdapter::for_state(&state);
    let mut app = App::new();
    app.insert_resource(state)
        .insert_resource(adapter)
        .init_resource::<FrameLog>()
        .add_systems(Update, headless_step);
    app
}

/// Step `frames` nominal frames with logging on and return the final state
pub fn run_headless(state: SimulationState, frames: u64) -> SimulationState {
    let mut app = build_headless_app(state);
    app.add_plugins(LogPlugin::default());

    info!("headless run: {frames} frames");
    let t0 = Instant::now();
    for _ in 0..frames {
        app.update();
    }
    let secs = t0.elapsed().as_secs_f64();

    let presented = app.world().resource::<FrameLog>().frames;
    info!(
        "headless run done: {presented} frames in {:.3} s ({:.1} µs/frame)",
        secs,
        if presented > 0 { secs * 1.0e6 / presented as f64 } else { 0.0 }
    );

    app.world().resource::<SimulationState>().clone()
}

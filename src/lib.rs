pub mod simulation;
pub mod configuration;
pub mod scene;
pub mod visualization;

pub use simulation::states::{CelestialBody, System, Trail, NVec3};
pub use simulation::params::{Parameters, Playback, InitialAngles, SPEED_MIN, SPEED_MAX};
pub use simulation::scale::ScaleMode;
pub use simulation::scenario::SimulationState;
pub use simulation::kinematics::{advance_orbits, angle_delta};

pub use configuration::config::{ScenarioConfig, EngineConfig, ParametersConfig, BodyConfig, ConfigError, default_bodies};
pub use configuration::prompt::{parse_scale_choice, prompt_scale_mode};

pub use scene::adapter::SceneAdapter;
pub use scene::camera::OrbitView;
pub use scene::controls::Control;
pub use scene::frame::{Frame, BodyPrimitive, Label, RenderSurface, LatestFrame};

pub use visualization::{solar_vis3d::run_3d, headless::{run_headless, build_headless_app, FrameLog}};

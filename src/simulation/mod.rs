pub mod states;
pub mod params;
pub mod kinematics;
pub mod scale;
pub mod scenario;

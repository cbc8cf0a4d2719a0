pub mod headless;
pub mod solar_vis3d;

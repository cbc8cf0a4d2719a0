pub mod adapter;
pub mod camera;
pub mod controls;
pub mod frame;

pub mod belt;
pub mod camera_controller;
pub mod orbit;

//! Interactive tile-map viewer that drives a [`tile_camera::Camera`].

pub mod app;
pub mod input;
pub mod map;
pub mod markers;
pub mod renderer;
pub mod ui;

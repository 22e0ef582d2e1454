//! Task-driven 2D camera for tile maps.
//!
//! A [`Camera`] owns a view rectangle (position, zoom, rotation) and a
//! [`TaskStack`] of camera tasks. Each frame the game loop advances a
//! [`GameClock`], snapshots the held [`Controls`] and calls
//! [`Camera::update`]; only the task on top of the stack runs. The bottom
//! task never finishes (free movement or follow), so there is always
//! something driving the camera.

pub mod camera;
pub mod config;
pub mod constants;
pub mod controls;
pub mod error;
pub mod geometry;
pub mod tasks;
pub mod time_system;

pub use camera::{Camera, CameraView};
pub use config::CameraConfig;
pub use controls::{ControlAction, Controls};
pub use error::CameraError;
pub use geometry::{AreaBox, Locatable, PositionRef};
pub use tasks::{
    CameraTask, FollowTask, FrameContext, FreeMovementTask, PanToTask, TaskKind, TaskStack,
    ZoomByIncrementsTask, ZoomPanZoomPhase, ZoomPanZoomTask, ZoomTarget,
};
pub use time_system::{FrameTime, GameClock, TimeNormalizedSpeed, TimeUnit};

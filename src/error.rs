//! Error type shared by the camera library.

use crate::tasks::TaskKind;

/// Failures surfaced by fallible camera operations.
///
/// Per-frame work (task progress, zoom steps) never fails; only setup
/// operations such as loading settings or assigning a base task do.
#[derive(Debug, thiserror::Error)]
pub enum CameraError {
    #[error("{0:?} cannot sit at the bottom of the task stack (expected FreeMovement or Follow)")]
    InvalidBaseTask(TaskKind),

    #[error("zoom range is inconsistent: min {min}, initial {initial}, max {max}")]
    InvalidZoomRange { min: u16, initial: u16, max: u16 },

    #[error("tile size must be greater than zero")]
    InvalidTileSize,

    #[error("failed to read camera settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse camera settings: {0}")]
    Parse(#[from] serde_json::Error),
}

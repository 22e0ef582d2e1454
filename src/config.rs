//! Camera settings loaded from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::CameraError;
use crate::time_system::TimeNormalizedSpeed;

/// Tunable camera settings. Missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// World units covered by one tile at stretch 1.0
    pub tile_size: u16,
    pub min_zoom: u16,
    pub max_zoom: u16,
    /// Zoom the camera starts at
    pub initial_zoom: u16,
    /// Rate of keyboard-driven movement
    pub free_movement: TimeNormalizedSpeed,
    /// Zoom change per frame while a zoom control is held
    pub zoom_step: u16,
    /// Fraction of the current zoom applied per frame by smooth zooming
    pub smooth_zoom_percent: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            tile_size: CAMERA_TILE_SIZE,
            min_zoom: CAMERA_MIN_ZOOM,
            max_zoom: CAMERA_MAX_ZOOM,
            initial_zoom: CAMERA_DEFAULT_ZOOM,
            free_movement: TimeNormalizedSpeed::per_second(CAMERA_FREE_MOVEMENT_SPEED),
            zoom_step: CAMERA_ZOOM_STEP,
            smooth_zoom_percent: CAMERA_SMOOTH_ZOOM_PERCENT,
        }
    }
}

impl CameraConfig {
    /// Read and validate settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CameraError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded camera settings from {}", path.display());
        Ok(config)
    }

    /// Parse and validate settings from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, CameraError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CameraError> {
        if self.tile_size == 0 {
            return Err(CameraError::InvalidTileSize);
        }
        if self.min_zoom == 0
            || self.min_zoom > self.initial_zoom
            || self.initial_zoom > self.max_zoom
        {
            return Err(CameraError::InvalidZoomRange {
                min: self.min_zoom,
                initial: self.initial_zoom,
                max: self.max_zoom,
            });
        }
        Ok(())
    }
}

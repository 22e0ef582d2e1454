//! Camera-related constants.

/// World units spanned by one tile at stretch 1.0
pub const CAMERA_TILE_SIZE: u16 = 32;
/// Default zoom level (pixels per tile)
pub const CAMERA_DEFAULT_ZOOM: u16 = 64;
/// Minimum zoom level
pub const CAMERA_MIN_ZOOM: u16 = 24;
/// Maximum zoom level
pub const CAMERA_MAX_ZOOM: u16 = 192;
/// Zoom change per frame while a zoom key is held
pub const CAMERA_ZOOM_STEP: u16 = 3;
/// Fraction of the current zoom applied per frame by smooth zooming
pub const CAMERA_SMOOTH_ZOOM_PERCENT: f32 = 0.01;
/// Free movement rate in world units per second
pub const CAMERA_FREE_MOVEMENT_SPEED: f32 = 420.0;
/// Substituted for a zero denominator when deriving a pan angle
pub const CAMERA_ANGLE_EPSILON: f32 = 0.001;

//! Window and viewer constants.

/// Default window width
pub const WINDOW_DEFAULT_WIDTH: u32 = 1500;
/// Default window height
pub const WINDOW_DEFAULT_HEIGHT: u32 = 1000;

/// Click drag threshold (pixels) to distinguish click from drag
pub const CLICK_DRAG_THRESHOLD: f32 = 5.0;

/// Settings file looked up in the working directory
pub const CAMERA_CONFIG_FILE: &str = "camera.json";
/// Environment variable that enables the puffin HTTP server
pub const PROFILE_ENV_VAR: &str = "TILE_CAMERA_PROFILE";

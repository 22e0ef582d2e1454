//! Demo map and marker constants.

/// Default map width in tiles
pub const MAP_DEFAULT_WIDTH: usize = 96;
/// Default map height in tiles
pub const MAP_DEFAULT_HEIGHT: usize = 64;
/// Noise octaves for terrain generation
pub const MAP_NOISE_OCTAVES: u32 = 5;
/// Amplitude falloff between octaves
pub const MAP_NOISE_PERSISTENCE: f64 = 0.5;
/// Frequency growth between octaves
pub const MAP_NOISE_LACUNARITY: f64 = 2.0;
/// Base frequency multiplier across the whole map
pub const MAP_NOISE_SCALE: f64 = 4.0;

/// Number of wandering markers spawned on the map
pub const MARKER_COUNT: usize = 6;
/// Marker speed range in world units per second
pub const MARKER_MIN_SPEED: f32 = 40.0;
pub const MARKER_MAX_SPEED: f32 = 160.0;
/// Marker quad size relative to a tile
pub const MARKER_SCALE: f32 = 0.6;
/// Seconds between marker heading changes
pub const MARKER_TURN_INTERVAL: f32 = 2.5;

/// Pan speed used by viewer hotkeys, world units per second
pub const DEMO_PAN_SPEED: f32 = 640.0;
/// Zoom speed used by viewer hotkeys, zoom levels per frame
pub const DEMO_ZOOM_SPEED: u16 = 2;

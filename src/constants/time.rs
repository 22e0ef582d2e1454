//! Time system constants.

/// Length of one tick in nanoseconds
pub const NANOS_PER_TICK: u128 = 100;
/// Largest frame delta handed to the camera (prevents jumps after stalls)
pub const MAX_FRAME_DT: f32 = 0.1;

//! Camera and viewer constants organized by domain.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.

mod camera;
mod map;
mod time;
mod window;

pub use camera::*;
pub use map::*;
pub use time::*;
pub use window::*;

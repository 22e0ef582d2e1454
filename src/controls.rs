//! Held camera controls.
//!
//! The input-polling layer translates device state into a [`Controls`]
//! snapshot once per frame; only the free movement task reads it.

use glam::Vec2;

/// Camera actions a key or button can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    Up,
    Down,
    Left,
    Right,
    ZoomIn,
    ZoomOut,
    SmoothZoomIn,
    SmoothZoomOut,
}

/// Which camera actions are held during the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
    pub smooth_zoom_in: bool,
    pub smooth_zoom_out: bool,
}

impl Controls {
    /// No actions held.
    pub const NONE: Controls = Controls {
        up: false,
        down: false,
        left: false,
        right: false,
        zoom_in: false,
        zoom_out: false,
        smooth_zoom_in: false,
        smooth_zoom_out: false,
    };

    pub fn press(&mut self, action: ControlAction) {
        *self.slot(action) = true;
    }

    /// Unnormalized movement direction in world space (y grows downward).
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir
    }

    fn slot(&mut self, action: ControlAction) -> &mut bool {
        match action {
            ControlAction::Up => &mut self.up,
            ControlAction::Down => &mut self.down,
            ControlAction::Left => &mut self.left,
            ControlAction::Right => &mut self.right,
            ControlAction::ZoomIn => &mut self.zoom_in,
            ControlAction::ZoomOut => &mut self.zoom_out,
            ControlAction::SmoothZoomIn => &mut self.smooth_zoom_in,
            ControlAction::SmoothZoomOut => &mut self.smooth_zoom_out,
        }
    }
}

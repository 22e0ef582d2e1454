//! Zoom the camera a fixed number of levels per frame.

use glam::Vec2;

use crate::camera::CameraView;

/// What a zoom task is working toward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomTarget {
    /// Reach this exact zoom level
    Level(u16),
    /// Zoom out until this world point is inside the view
    Reveal(Vec2),
}

/// Steps the zoom toward a target by `speed` levels per frame.
///
/// Finishes when the target is met or when a zoom bound stops progress.
#[derive(Debug, Clone)]
pub struct ZoomByIncrementsTask {
    speed: u16,
    target: ZoomTarget,
}

impl ZoomByIncrementsTask {
    pub fn new(speed: u16, target: ZoomTarget) -> Self {
        Self {
            speed: speed.max(1),
            target,
        }
    }

    /// Zoom in or out until the zoom equals `zoom`.
    pub fn to_zoom(speed: u16, zoom: u16) -> Self {
        Self::new(speed, ZoomTarget::Level(zoom))
    }

    /// Zoom out until `point` is visible or the minimum zoom is reached.
    pub fn reveal(speed: u16, point: Vec2) -> Self {
        Self::new(speed, ZoomTarget::Reveal(point))
    }

    pub fn speed(&self) -> u16 {
        self.speed
    }

    pub fn target(&self) -> ZoomTarget {
        self.target
    }

    pub fn progress(&mut self, view: &mut CameraView) -> bool {
        match self.target {
            ZoomTarget::Reveal(point) => self.progress_reveal(view, point),
            ZoomTarget::Level(level) => self.progress_level(view, level),
        }
    }

    fn progress_reveal(&self, view: &mut CameraView, point: Vec2) -> bool {
        if view.area_box().contains(point) {
            return true;
        }

        let zoom = u32::from(view.zoom());
        let speed = u32::from(self.speed);
        if zoom > u32::from(view.min_zoom()) + speed {
            view.set_zoom((zoom - speed) as u16);
        } else {
            view.set_zoom(view.min_zoom());
            return true;
        }

        view.area_box().contains(point)
    }

    fn progress_level(&self, view: &mut CameraView, level: u16) -> bool {
        let before = view.zoom();
        let zoom = u32::from(before);
        let speed = u32::from(self.speed);
        let destination = u32::from(level);

        let next = if zoom + speed < destination {
            zoom + speed
        } else if zoom > destination + speed {
            zoom - speed
        } else {
            destination
        };
        view.set_zoom(next.min(u32::from(u16::MAX)) as u16);

        if view.zoom() == level {
            return true;
        }
        if view.zoom() == before {
            log::warn!(
                "Zoom target {} is outside {}..={}, stopping at {}",
                level,
                view.min_zoom(),
                view.max_zoom(),
                before
            );
            return true;
        }
        false
    }
}

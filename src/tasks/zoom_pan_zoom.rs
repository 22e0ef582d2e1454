//! Composite maneuver: zoom out, pan to a destination, zoom back in.

use glam::Vec2;

use super::pan_to::PanToTask;
use super::zoom::{ZoomByIncrementsTask, ZoomTarget};
use super::FrameContext;
use crate::camera::CameraView;
use crate::time_system::TimeNormalizedSpeed;

/// Which sub-task of a [`ZoomPanZoomTask`] is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ZoomPanZoomPhase {
    ZoomOut,
    Pan,
    ZoomIn,
}

impl ZoomPanZoomPhase {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Zooms out, pans to `destination`, then zooms back to the zoom the
/// camera had when the task first started. Phases run strictly in that
/// order, and a resumed task carries on from the phase it was in.
#[derive(Debug, Clone)]
pub struct ZoomPanZoomTask {
    zoom_speed: u16,
    destination: Vec2,
    /// Zoom to return to, recorded by the first start
    original_zoom: Option<u16>,
    zoom_out: ZoomByIncrementsTask,
    pan: PanToTask,
    zoom_in: Option<ZoomByIncrementsTask>,
    phase: ZoomPanZoomPhase,
    interruptions: u32,
}

impl ZoomPanZoomTask {
    /// Zoom out until `destination` is visible, pan there, zoom back in.
    pub fn new(zoom_speed: u16, pan_speed: TimeNormalizedSpeed, destination: Vec2) -> Self {
        Self::build(zoom_speed, ZoomTarget::Reveal(destination), pan_speed, destination)
    }

    /// Zoom out to `zoom_out_level`, pan to `destination`, zoom back in.
    pub fn with_zoom_out_level(
        zoom_speed: u16,
        zoom_out_level: u16,
        pan_speed: TimeNormalizedSpeed,
        destination: Vec2,
    ) -> Self {
        Self::build(zoom_speed, ZoomTarget::Level(zoom_out_level), pan_speed, destination)
    }

    fn build(
        zoom_speed: u16,
        zoom_out_target: ZoomTarget,
        pan_speed: TimeNormalizedSpeed,
        destination: Vec2,
    ) -> Self {
        Self {
            zoom_speed,
            destination,
            original_zoom: None,
            zoom_out: ZoomByIncrementsTask::new(zoom_speed, zoom_out_target),
            pan: PanToTask::new(pan_speed, destination),
            zoom_in: None,
            phase: ZoomPanZoomPhase::ZoomOut,
            interruptions: 0,
        }
    }

    pub fn phase(&self) -> ZoomPanZoomPhase {
        self.phase
    }

    pub fn destination(&self) -> Vec2 {
        self.destination
    }

    /// Zoom the task returns to, once it has started.
    pub fn original_zoom(&self) -> Option<u16> {
        self.original_zoom
    }

    /// How many times another task was pushed over this one.
    pub fn interruptions(&self) -> u32 {
        self.interruptions
    }

    /// Record the return zoom on the first start. Every start re-aims the
    /// pan from the current center.
    pub fn start(&mut self, view: &CameraView) {
        if self.original_zoom.is_none() {
            self.original_zoom = Some(view.zoom());
            self.zoom_in = Some(ZoomByIncrementsTask::to_zoom(self.zoom_speed, view.zoom()));
        }
        self.pan.start(view);

        // Whatever ran on top may have moved the camera off the destination
        if self.phase == ZoomPanZoomPhase::ZoomIn && view.center() != self.pan.target() {
            self.phase = ZoomPanZoomPhase::Pan;
        }
    }

    pub fn progress(&mut self, view: &mut CameraView, ctx: &FrameContext) -> bool {
        if self.arrived(view) {
            return true;
        }

        let phase_done = match self.phase {
            ZoomPanZoomPhase::ZoomOut => self.zoom_out.progress(view),
            ZoomPanZoomPhase::Pan => self.pan.progress(view, ctx),
            ZoomPanZoomPhase::ZoomIn => match &mut self.zoom_in {
                Some(zoom_in) => zoom_in.progress(view),
                None => true,
            },
        };
        if !phase_done {
            return false;
        }

        match self.phase {
            ZoomPanZoomPhase::ZoomOut if view.center() != self.destination => {
                self.phase = ZoomPanZoomPhase::Pan;
                false
            }
            ZoomPanZoomPhase::Pan => {
                self.phase = ZoomPanZoomPhase::ZoomIn;
                false
            }
            _ => true,
        }
    }

    pub fn on_interrupted(&mut self) {
        self.interruptions += 1;
        log::debug!("Zoom-pan-zoom interrupted during {:?}", self.phase);
    }

    fn arrived(&self, view: &CameraView) -> bool {
        view.center() == self.destination && self.original_zoom == Some(view.zoom())
    }
}

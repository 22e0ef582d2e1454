//! Pan the camera center to a destination at a time-normalized speed.

use glam::Vec2;

use super::FrameContext;
use crate::camera::CameraView;
use crate::constants::*;
use crate::time_system::TimeNormalizedSpeed;

/// Moves the camera center in a straight line toward `destination`.
///
/// A destination outside the camera's bounding region is replaced by the
/// nearest reachable center when the task starts.
#[derive(Debug, Clone)]
pub struct PanToTask {
    speed: TimeNormalizedSpeed,
    destination: Vec2,
    /// Destination clamped into the view bounds at start
    target: Vec2,
    /// Angle of the line from the camera center to the destination
    theta: f32,
}

impl PanToTask {
    pub fn new(speed: TimeNormalizedSpeed, destination: Vec2) -> Self {
        Self {
            speed,
            destination,
            target: destination,
            theta: 0.0,
        }
    }

    pub fn destination(&self) -> Vec2 {
        self.destination
    }

    pub fn theta(&self) -> f32 {
        self.theta
    }

    pub fn speed(&self) -> &TimeNormalizedSpeed {
        &self.speed
    }

    /// Where the camera will actually stop.
    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Recompute the heading from the current camera center.
    pub fn start(&mut self, view: &CameraView) {
        self.target = view.clamp_center(self.destination);
        let center = view.center();
        let rise = center.y - self.target.y;
        let mut run = center.x - self.target.x;
        if run == 0.0 {
            run = CAMERA_ANGLE_EPSILON;
        }
        self.theta = (rise / run).atan();
    }

    pub fn progress(&mut self, view: &mut CameraView, ctx: &FrameContext) -> bool {
        let amount = self.speed.movement_amount(&ctx.time);
        let step_x = (amount * self.theta.cos()).abs();
        let step_y = (amount * self.theta.sin()).abs();

        let center = view.center();
        if (center.x - self.target.x).abs() <= step_x
            && (center.y - self.target.y).abs() <= step_y
        {
            view.center_on(self.target);
            return true;
        }

        let delta = Vec2::new(
            if self.target.x > center.x { step_x } else { -step_x },
            if self.target.y > center.y { step_y } else { -step_y },
        );
        view.translate(delta);
        false
    }
}

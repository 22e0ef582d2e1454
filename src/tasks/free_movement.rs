//! Keyboard-driven camera movement, the default resting task.

use glam::Vec2;

use super::FrameContext;
use crate::camera::CameraView;
use crate::config::CameraConfig;
use crate::constants::*;
use crate::time_system::TimeNormalizedSpeed;

/// Moves and zooms the camera from held controls. Never finishes.
#[derive(Debug, Clone)]
pub struct FreeMovementTask {
    speed: TimeNormalizedSpeed,
    zoom_step: u16,
    smooth_zoom_percent: f32,
}

impl FreeMovementTask {
    pub fn new(speed: TimeNormalizedSpeed) -> Self {
        Self {
            speed,
            zoom_step: CAMERA_ZOOM_STEP,
            smooth_zoom_percent: CAMERA_SMOOTH_ZOOM_PERCENT,
        }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            speed: config.free_movement.clone(),
            zoom_step: config.zoom_step,
            smooth_zoom_percent: config.smooth_zoom_percent,
        }
    }

    pub fn with_zoom_step(mut self, zoom_step: u16) -> Self {
        self.zoom_step = zoom_step;
        self
    }

    pub fn speed(&self) -> &TimeNormalizedSpeed {
        &self.speed
    }

    pub fn progress(&mut self, view: &mut CameraView, ctx: &FrameContext) -> bool {
        // Evaluated every frame so the stale-frame guard stays in sync
        let amount = self.speed.movement_amount(&ctx.time);
        let controls = &ctx.controls;

        let mut direction = controls.direction();
        if view.horizontal_locked {
            direction.x = 0.0;
        }
        if view.vertical_locked {
            direction.y = 0.0;
        }
        if direction != Vec2::ZERO {
            view.translate(direction * amount);
        }

        if controls.zoom_in {
            view.zoom_in(self.zoom_step);
        }
        if controls.zoom_out {
            view.zoom_out(self.zoom_step);
        }
        if controls.smooth_zoom_in {
            view.smooth_zoom_in(self.smooth_zoom_percent);
        }
        if controls.smooth_zoom_out {
            view.smooth_zoom_out(self.smooth_zoom_percent);
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::{ControlAction, Controls};
    use crate::tasks::testing::make_view;
    use crate::time_system::GameClock;
    use std::time::Duration;

    fn held(actions: &[ControlAction]) -> Controls {
        let mut controls = Controls::NONE;
        for &action in actions {
            controls.press(action);
        }
        controls
    }

    #[test]
    fn test_moves_along_held_directions() {
        let mut view = make_view();
        let start = view.position();
        let mut task = FreeMovementTask::new(TimeNormalizedSpeed::per_second(100.0));
        let mut clock = GameClock::new();
        let controls = held(&[ControlAction::Up, ControlAction::Left]);

        for _ in 0..3 {
            let ctx = FrameContext::new(clock.advance(Duration::from_secs(1)), controls);
            assert!(!task.progress(&mut view, &ctx));
        }

        assert_eq!(view.position(), start + Vec2::new(-300.0, -300.0));
    }

    #[test]
    fn test_locked_axis_does_not_move() {
        let mut view = make_view();
        view.vertical_locked = true;
        let start = view.position();
        let mut task = FreeMovementTask::new(TimeNormalizedSpeed::per_second(100.0));
        let mut clock = GameClock::new();

        let ctx = FrameContext::new(
            clock.advance(Duration::from_secs(1)),
            held(&[ControlAction::Down, ControlAction::Right]),
        );
        task.progress(&mut view, &ctx);

        assert_eq!(view.position(), start + Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_zoom_controls_step_zoom() {
        let mut view = make_view();
        let mut task =
            FreeMovementTask::new(TimeNormalizedSpeed::per_second(100.0)).with_zoom_step(3);
        let mut clock = GameClock::new();

        let ctx = FrameContext::new(
            clock.advance(Duration::from_millis(16)),
            held(&[ControlAction::ZoomIn]),
        );
        task.progress(&mut view, &ctx);
        assert_eq!(view.zoom(), 67);

        let ctx = FrameContext::new(
            clock.advance(Duration::from_millis(16)),
            held(&[ControlAction::ZoomOut, ControlAction::SmoothZoomOut]),
        );
        task.progress(&mut view, &ctx);
        // 67 - 3 = 64, then 64 - ceil(0.64) = 63
        assert_eq!(view.zoom(), 63);
    }

    #[test]
    fn test_idle_controls_leave_view_alone() {
        let mut view = make_view();
        let start = *view.area_box();
        let mut task = FreeMovementTask::from_config(&CameraConfig::default());
        let mut clock = GameClock::new();

        let ctx = FrameContext::new(clock.advance(Duration::from_secs(1)), Controls::NONE);
        assert!(!task.progress(&mut view, &ctx));
        assert_eq!(view.area_box(), &start);
    }
}

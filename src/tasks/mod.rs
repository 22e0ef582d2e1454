//! Camera tasks: units of scripted camera behavior.
//!
//! A task is started when it becomes active (pushed, or uncovered after the
//! task above it finished) and then progressed once per frame until it
//! reports completion. Only the task on top of the [`TaskStack`] runs.

mod follow;
mod free_movement;
mod pan_to;
mod stack;
mod zoom;
mod zoom_pan_zoom;

pub use follow::FollowTask;
pub use free_movement::FreeMovementTask;
pub use pan_to::PanToTask;
pub use stack::TaskStack;
pub use zoom::{ZoomByIncrementsTask, ZoomTarget};
pub use zoom_pan_zoom::{ZoomPanZoomPhase, ZoomPanZoomTask};

use crate::camera::CameraView;
use crate::controls::Controls;
use crate::time_system::FrameTime;

/// Everything a task may read while progressing one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameContext {
    pub time: FrameTime,
    pub controls: Controls,
}

impl FrameContext {
    pub fn new(time: FrameTime, controls: Controls) -> Self {
        Self { time, controls }
    }
}

/// Variant tag of a [`CameraTask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    FreeMovement,
    Follow,
    PanTo,
    ZoomByIncrements,
    ZoomPanZoom,
}

impl TaskKind {
    /// Whether a task of this kind may sit at the bottom of a stack.
    /// Only tasks that never finish qualify.
    pub fn can_be_base(self) -> bool {
        matches!(self, TaskKind::FreeMovement | TaskKind::Follow)
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskKind::FreeMovement => "free movement",
            TaskKind::Follow => "follow",
            TaskKind::PanTo => "pan to",
            TaskKind::ZoomByIncrements => "zoom by increments",
            TaskKind::ZoomPanZoom => "zoom out, pan, zoom in",
        }
    }
}

/// One unit of camera behavior.
#[derive(Debug, Clone)]
pub enum CameraTask {
    FreeMovement(FreeMovementTask),
    Follow(FollowTask),
    PanTo(PanToTask),
    ZoomByIncrements(ZoomByIncrementsTask),
    ZoomPanZoom(ZoomPanZoomTask),
}

impl CameraTask {
    pub fn kind(&self) -> TaskKind {
        match self {
            CameraTask::FreeMovement(_) => TaskKind::FreeMovement,
            CameraTask::Follow(_) => TaskKind::Follow,
            CameraTask::PanTo(_) => TaskKind::PanTo,
            CameraTask::ZoomByIncrements(_) => TaskKind::ZoomByIncrements,
            CameraTask::ZoomPanZoom(_) => TaskKind::ZoomPanZoom,
        }
    }

    /// Re-derive any state that depends on where the camera is right now.
    pub fn start(&mut self, view: &CameraView) {
        match self {
            CameraTask::FreeMovement(_)
            | CameraTask::Follow(_)
            | CameraTask::ZoomByIncrements(_) => {}
            CameraTask::PanTo(task) => task.start(view),
            CameraTask::ZoomPanZoom(task) => task.start(view),
        }
    }

    /// Advance by one frame. Returns true once the task is finished.
    pub fn progress(&mut self, view: &mut CameraView, ctx: &FrameContext) -> bool {
        match self {
            CameraTask::FreeMovement(task) => task.progress(view, ctx),
            CameraTask::Follow(task) => task.progress(view),
            CameraTask::PanTo(task) => task.progress(view, ctx),
            CameraTask::ZoomByIncrements(task) => task.progress(view),
            CameraTask::ZoomPanZoom(task) => task.progress(view, ctx),
        }
    }

    /// Called when another task is pushed on top of this one.
    pub fn on_interrupted(&mut self) {
        if let CameraTask::ZoomPanZoom(task) = self {
            task.on_interrupted();
        }
    }
}

impl From<FreeMovementTask> for CameraTask {
    fn from(task: FreeMovementTask) -> Self {
        CameraTask::FreeMovement(task)
    }
}

impl From<FollowTask> for CameraTask {
    fn from(task: FollowTask) -> Self {
        CameraTask::Follow(task)
    }
}

impl From<PanToTask> for CameraTask {
    fn from(task: PanToTask) -> Self {
        CameraTask::PanTo(task)
    }
}

impl From<ZoomByIncrementsTask> for CameraTask {
    fn from(task: ZoomByIncrementsTask) -> Self {
        CameraTask::ZoomByIncrements(task)
    }
}

impl From<ZoomPanZoomTask> for CameraTask {
    fn from(task: ZoomPanZoomTask) -> Self {
        CameraTask::ZoomPanZoom(task)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::time::Duration;

    use glam::{UVec2, Vec2};

    use super::FrameContext;
    use crate::camera::CameraView;
    use crate::config::CameraConfig;
    use crate::controls::Controls;
    use crate::time_system::GameClock;

    /// 800x600 viewport at zoom 64 (400x300 world units), centered on the origin.
    pub fn make_view() -> CameraView {
        let mut view = CameraView::new(UVec2::new(800, 600), &CameraConfig::default());
        view.center_on(Vec2::ZERO);
        view
    }

    /// Advance `clock` by one second with no controls held.
    pub fn next_second(clock: &mut GameClock) -> FrameContext {
        FrameContext::new(clock.advance(Duration::from_secs(1)), Controls::NONE)
    }
}

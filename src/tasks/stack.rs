//! Stack of camera tasks with a permanent base task.

use super::{CameraTask, FollowTask, FrameContext, FreeMovementTask};
use crate::camera::CameraView;
use crate::error::CameraError;

/// Camera tasks ordered bottom to top. Only the top task runs each frame.
///
/// The bottom (base) task always exists and is one that never finishes, so
/// the stack can never run dry.
#[derive(Debug, Clone)]
pub struct TaskStack {
    base: CameraTask,
    above: Vec<CameraTask>,
    /// Top task was uncovered or replaced and must be started before it runs
    resume_pending: bool,
}

impl TaskStack {
    pub fn new(base: CameraTask) -> Result<Self, CameraError> {
        Self::check_base(&base)?;
        Ok(Self {
            base,
            above: Vec::new(),
            resume_pending: false,
        })
    }

    pub fn free_movement(base: FreeMovementTask) -> Self {
        Self {
            base: base.into(),
            above: Vec::new(),
            resume_pending: false,
        }
    }

    pub fn following(base: FollowTask) -> Self {
        Self {
            base: base.into(),
            above: Vec::new(),
            resume_pending: false,
        }
    }

    fn check_base(task: &CameraTask) -> Result<(), CameraError> {
        let kind = task.kind();
        if kind.can_be_base() {
            Ok(())
        } else {
            log::warn!("Rejected {} as a base camera task", kind.label());
            Err(CameraError::InvalidBaseTask(kind))
        }
    }

    /// Replace the base task. Tasks above it are kept.
    pub fn set_base(&mut self, task: CameraTask) -> Result<(), CameraError> {
        Self::check_base(&task)?;
        log::debug!("Camera base task is now {}", task.kind().label());
        self.base = task;
        if self.above.is_empty() {
            self.resume_pending = true;
        }
        Ok(())
    }

    pub fn base(&self) -> &CameraTask {
        &self.base
    }

    /// Start `task` against the current view and make it the active task.
    pub fn push(&mut self, mut task: CameraTask, view: &CameraView) {
        self.top_mut().on_interrupted();
        task.start(view);
        log::debug!("Pushed camera task: {}", task.kind().label());
        self.above.push(task);
        self.resume_pending = false;
    }

    /// Remove the active task. Returns `None` if only the base is left.
    pub fn pop(&mut self) -> Option<CameraTask> {
        let task = self.above.pop()?;
        log::debug!("Popped camera task: {}", task.kind().label());
        self.resume_pending = true;
        Some(task)
    }

    /// The active task.
    pub fn peek(&self) -> &CameraTask {
        self.above.last().unwrap_or(&self.base)
    }

    fn top_mut(&mut self) -> &mut CameraTask {
        self.above.last_mut().unwrap_or(&mut self.base)
    }

    /// Progress the active task by one frame.
    ///
    /// A finished task is removed in the same frame and the task it
    /// uncovers is started, ready to run next frame.
    pub fn update(&mut self, view: &mut CameraView, ctx: &FrameContext) {
        if self.resume_pending {
            self.top_mut().start(view);
            self.resume_pending = false;
        }

        if !self.top_mut().progress(view, ctx) {
            return;
        }

        if let Some(done) = self.above.pop() {
            log::debug!("Camera task finished: {}", done.kind().label());
            self.top_mut().start(view);
        }
    }

    /// Number of tasks, the base included.
    pub fn len(&self) -> usize {
        self.above.len() + 1
    }

    /// Tasks from the base up to the active task.
    pub fn iter(&self) -> impl Iterator<Item = &CameraTask> {
        std::iter::once(&self.base).chain(self.above.iter())
    }

    /// Whether only the base task is left.
    pub fn is_idle(&self) -> bool {
        self.above.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PositionRef;
    use crate::tasks::testing::{make_view, next_second};
    use crate::tasks::{PanToTask, TaskKind, ZoomByIncrementsTask, ZoomPanZoomPhase, ZoomPanZoomTask};
    use crate::time_system::{GameClock, TimeNormalizedSpeed};
    use glam::Vec2;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn free_stack() -> TaskStack {
        TaskStack::free_movement(FreeMovementTask::new(TimeNormalizedSpeed::per_second(100.0)))
    }

    fn pan(x: f32, y: f32) -> CameraTask {
        PanToTask::new(TimeNormalizedSpeed::per_second(50.0), Vec2::new(x, y)).into()
    }

    #[test]
    fn test_finishing_tasks_are_never_a_base() {
        let result = TaskStack::new(pan(10.0, 10.0));
        assert!(matches!(result, Err(CameraError::InvalidBaseTask(TaskKind::PanTo))));

        let mut stack = free_stack();
        let result = stack.set_base(ZoomByIncrementsTask::to_zoom(2, 80).into());
        assert!(result.is_err());
        assert_eq!(stack.base().kind(), TaskKind::FreeMovement);
    }

    #[test]
    fn test_set_base_keeps_tasks_above() {
        let mut stack = free_stack();
        let view = make_view();
        stack.push(pan(100.0, 0.0), &view);

        stack
            .set_base(FollowTask::new(PositionRef::new(Vec2::ZERO)).into())
            .unwrap();

        assert_eq!(stack.len(), 2);
        assert_eq!(stack.base().kind(), TaskKind::Follow);
        assert_eq!(stack.peek().kind(), TaskKind::PanTo);
    }

    #[test]
    fn test_pop_never_removes_base() {
        let mut stack = free_stack();
        let view = make_view();
        stack.push(pan(100.0, 0.0), &view);

        assert!(stack.pop().is_some());
        assert!(stack.pop().is_none());
        assert!(stack.pop().is_none());
        assert_eq!(stack.len(), 1);
        assert!(stack.is_idle());
    }

    #[test]
    fn test_random_operations_keep_stack_non_empty() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut stack = free_stack();
        let mut view = make_view();
        let mut clock = GameClock::new();

        for _ in 0..1_000 {
            match rng.gen_range(0..4) {
                0 => {
                    let task = pan(rng.gen_range(-500.0..500.0), rng.gen_range(-500.0..500.0));
                    stack.push(task, &view);
                }
                1 => {
                    let task = ZoomByIncrementsTask::to_zoom(rng.gen_range(1..20), rng.gen_range(0..250));
                    stack.push(task.into(), &view);
                }
                2 => {
                    stack.pop();
                }
                _ => stack.update(&mut view, &next_second(&mut clock)),
            }
            assert!(stack.len() >= 1);
            assert_eq!(stack.iter().count(), stack.len());
            assert!(stack.iter().next().is_some_and(|task| task.kind().can_be_base()));
            assert!(view.min_zoom() <= view.zoom() && view.zoom() <= view.max_zoom());
        }
    }

    #[test]
    fn test_uncovered_task_restarts_from_current_position() {
        let mut stack = free_stack();
        let mut view = make_view();
        let mut clock = GameClock::new();

        stack.push(pan(0.0, 400.0), &view);
        // Heading is straight down from the origin
        stack.update(&mut view, &next_second(&mut clock));

        // A pan to the side interrupts it and runs to completion
        stack.push(pan(400.0, 0.0), &view);
        while stack.len() == 3 {
            stack.update(&mut view, &next_second(&mut clock));
        }
        assert_eq!(view.center(), Vec2::new(400.0, 0.0));

        // The first pan now heads from (400, 0) toward (0, 400)
        match stack.peek() {
            CameraTask::PanTo(task) => {
                assert!((task.theta() + std::f32::consts::FRAC_PI_4).abs() < 1e-5);
            }
            other => panic!("unexpected top task {:?}", other.kind()),
        }

        for _ in 0..100 {
            if stack.is_idle() {
                break;
            }
            stack.update(&mut view, &next_second(&mut clock));
        }
        assert!(stack.is_idle());
        assert_eq!(view.center(), Vec2::new(0.0, 400.0));
    }

    #[test]
    fn test_manual_pop_restarts_task_below() {
        let mut stack = free_stack();
        let mut view = make_view();
        let mut clock = GameClock::new();

        stack.push(
            ZoomPanZoomTask::new(8, TimeNormalizedSpeed::per_second(50.0), Vec2::new(900.0, 200.0)).into(),
            &view,
        );
        stack.update(&mut view, &next_second(&mut clock));
        let zoom_after_first_frame = view.zoom();

        stack.push(ZoomByIncrementsTask::to_zoom(8, 192).into(), &view);
        stack.update(&mut view, &next_second(&mut clock));
        stack.update(&mut view, &next_second(&mut clock));
        assert_eq!(view.zoom(), 72);
        assert!(stack.pop().is_some());

        stack.update(&mut view, &next_second(&mut clock));
        match stack.peek() {
            CameraTask::ZoomPanZoom(task) => {
                assert_eq!(zoom_after_first_frame, 56);
                assert_eq!(task.original_zoom(), Some(64));
                assert_eq!(task.phase(), ZoomPanZoomPhase::ZoomOut);
            }
            other => panic!("unexpected top task {:?}", other.kind()),
        }
        // Zooming out again from where the interruption left the camera
        assert_eq!(view.zoom(), 64);
    }

    #[test]
    fn test_interrupted_maneuver_returns_to_first_zoom() {
        let mut stack = free_stack();
        let mut view = make_view();
        let mut clock = GameClock::new();
        let destination = Vec2::new(2_000.0, 0.0);

        stack.push(
            ZoomPanZoomTask::new(8, TimeNormalizedSpeed::per_second(100.0), destination).into(),
            &view,
        );
        while !matches!(stack.peek(), CameraTask::ZoomPanZoom(task) if task.phase() == ZoomPanZoomPhase::Pan) {
            stack.update(&mut view, &next_second(&mut clock));
        }
        stack.update(&mut view, &next_second(&mut clock));
        let zoomed_out = view.zoom();
        assert_eq!(zoomed_out, 24);

        // A short detour runs to completion on top of the maneuver
        let detour = view.center() + Vec2::new(0.0, 150.0);
        stack.push(
            PanToTask::new(TimeNormalizedSpeed::per_second(1_000.0), detour).into(),
            &view,
        );
        stack.update(&mut view, &next_second(&mut clock));
        assert_eq!(stack.len(), 2);
        assert_eq!(view.center(), detour);

        for _ in 0..200 {
            if stack.is_idle() {
                break;
            }
            stack.update(&mut view, &next_second(&mut clock));
        }
        assert!(stack.is_idle());
        assert_eq!(view.center(), destination);
        assert_eq!(view.zoom(), 64);
    }

    #[test]
    fn test_push_interrupts_only_the_active_task() {
        let mut stack = free_stack();
        let view = make_view();

        stack.push(
            ZoomPanZoomTask::new(8, TimeNormalizedSpeed::per_second(100.0), Vec2::new(900.0, 200.0)).into(),
            &view,
        );
        stack.push(pan(100.0, 0.0), &view);
        stack.push(pan(0.0, 100.0), &view);

        let interruptions: Vec<u32> = stack
            .iter()
            .filter_map(|task| match task {
                CameraTask::ZoomPanZoom(task) => Some(task.interruptions()),
                _ => None,
            })
            .collect();
        assert_eq!(interruptions, vec![1]);
    }

    #[test]
    fn test_completed_task_is_removed_same_frame() {
        let mut stack = free_stack();
        let mut view = make_view();
        let mut clock = GameClock::new();

        stack.push(ZoomByIncrementsTask::to_zoom(8, 72).into(), &view);
        stack.update(&mut view, &next_second(&mut clock));

        assert!(stack.is_idle());
        assert_eq!(view.zoom(), 72);
        assert_eq!(stack.peek().kind(), TaskKind::FreeMovement);
    }
}

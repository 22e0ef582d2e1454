//! The camera: view geometry plus the task stack that drives it.
//!
//! [`CameraView`] is the part tasks mutate (position, zoom, rotation, the
//! visible rectangle). [`Camera`] pairs a view with its [`TaskStack`] and is
//! what the game loop updates once per frame and the renderer reads from.

use glam::{Mat4, UVec2, Vec2, Vec3};

use crate::config::CameraConfig;
use crate::controls::Controls;
use crate::error::CameraError;
use crate::geometry::AreaBox;
use crate::tasks::{CameraTask, FrameContext, FreeMovementTask, TaskKind, TaskStack};
use crate::time_system::FrameTime;

// =============================================================================
// CAMERA VIEW
// =============================================================================

/// Position, zoom and rotation of a camera, plus the world rectangle it sees.
#[derive(Debug, Clone)]
pub struct CameraView {
    /// Pixel size of one tile on screen
    zoom: u16,
    min_zoom: u16,
    max_zoom: u16,
    tile_size: u16,
    /// Render scale derived from zoom (zoom / tile_size)
    stretch: f32,
    rotation: f32,
    /// Viewport size in pixels
    viewport: UVec2,
    /// Visible world rectangle; its top-left corner is the camera position
    area: AreaBox,
    /// Region the camera center is kept inside, if any
    bounds: Option<AreaBox>,
    /// Locks for free movement along each axis
    pub vertical_locked: bool,
    pub horizontal_locked: bool,
}

impl CameraView {
    pub fn new(viewport: UVec2, config: &CameraConfig) -> Self {
        let mut view = Self {
            zoom: config.initial_zoom,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            tile_size: config.tile_size.max(1),
            stretch: 1.0,
            rotation: 0.0,
            viewport: viewport.max(UVec2::ONE),
            area: AreaBox::new(Vec2::ZERO, 0.0, 0.0),
            bounds: None,
            vertical_locked: false,
            horizontal_locked: false,
        };
        view.zoom = view.zoom.clamp(view.min_zoom, view.max_zoom);
        view.resize_to_zoom();
        view
    }

    // -------------------------------------------------------------------------
    // Zoom
    // -------------------------------------------------------------------------

    pub fn zoom(&self) -> u16 {
        self.zoom
    }

    pub fn min_zoom(&self) -> u16 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> u16 {
        self.max_zoom
    }

    pub fn stretch(&self) -> f32 {
        self.stretch
    }

    pub fn tile_size(&self) -> u16 {
        self.tile_size
    }

    /// Set the zoom, clamped to the allowed range.
    ///
    /// The view rectangle is resized to match and stays centered where it
    /// was, so zooming pivots on the middle of the screen.
    pub fn set_zoom(&mut self, zoom: u16) {
        let center = self.area.center();
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        self.resize_to_zoom();
        self.center_on(center);
    }

    /// Zoom in by `amount` unless that would pass the maximum.
    pub fn zoom_in(&mut self, amount: u16) {
        let target = u32::from(self.zoom) + u32::from(amount);
        if target <= u32::from(self.max_zoom) {
            self.set_zoom(target as u16);
        }
    }

    /// Zoom out by `amount` unless that would pass the minimum.
    pub fn zoom_out(&mut self, amount: u16) {
        if u32::from(self.min_zoom) + u32::from(amount) <= u32::from(self.zoom) {
            self.set_zoom(self.zoom - amount);
        }
    }

    /// Zoom in by a fraction of the current zoom (at least one level).
    pub fn smooth_zoom_in(&mut self, percent: f32) {
        if percent <= 0.0 {
            return;
        }
        let step = f32::from(self.zoom) * percent;
        if f32::from(self.zoom) + step <= f32::from(self.max_zoom) {
            let target = u32::from(self.zoom) + step.ceil() as u32;
            self.set_zoom(target.min(u32::from(u16::MAX)) as u16);
        }
    }

    /// Zoom out by a fraction of the current zoom (at least one level).
    pub fn smooth_zoom_out(&mut self, percent: f32) {
        if percent <= 0.0 {
            return;
        }
        let step = f32::from(self.zoom) * percent;
        if f32::from(self.min_zoom) <= f32::from(self.zoom) - step {
            let target = self.zoom.saturating_sub(step.ceil() as u16);
            self.set_zoom(target);
        }
    }

    fn resize_to_zoom(&mut self) {
        self.stretch = f32::from(self.zoom) / f32::from(self.tile_size);
        self.area.width = (self.viewport.x as f32 / self.stretch).ceil();
        self.area.height = (self.viewport.y as f32 / self.stretch).ceil();
    }

    // -------------------------------------------------------------------------
    // Position
    // -------------------------------------------------------------------------

    /// Top-left corner of the view in world space.
    pub fn position(&self) -> Vec2 {
        self.area.top_left
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.area.top_left = position;
    }

    pub fn center(&self) -> Vec2 {
        self.area.center()
    }

    /// Center the view on `point`, clamped into the bounding region.
    pub fn center_on(&mut self, point: Vec2) {
        let target = self.clamp_center(point);
        self.area.set_center(target);
    }

    /// Nearest allowed view center to `point`.
    pub fn clamp_center(&self, point: Vec2) -> Vec2 {
        match &self.bounds {
            Some(bounds) => bounds.clamp_point(point),
            None => point,
        }
    }

    /// Shift the view by `delta` world units, keeping the center in bounds.
    pub fn translate(&mut self, delta: Vec2) {
        if self.bounds.is_some() {
            self.center_on(self.area.center() + delta);
        } else {
            self.area.top_left += delta;
        }
    }

    /// The visible world rectangle.
    pub fn area_box(&self) -> &AreaBox {
        &self.area
    }

    pub fn bounds(&self) -> Option<&AreaBox> {
        self.bounds.as_ref()
    }

    pub fn set_bounds(&mut self, bounds: Option<AreaBox>) {
        self.bounds = bounds;
    }

    // -------------------------------------------------------------------------
    // Rotation and viewport
    // -------------------------------------------------------------------------

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, radians: f32) {
        self.rotation = radians;
    }

    pub fn viewport(&self) -> UVec2 {
        self.viewport
    }

    /// Adopt a new viewport size, keeping the view centered where it was.
    pub fn resize_viewport(&mut self, viewport: UVec2) {
        self.viewport = viewport.max(UVec2::ONE);
        self.set_zoom(self.zoom);
    }

    // -------------------------------------------------------------------------
    // Transforms
    // -------------------------------------------------------------------------

    /// World-to-screen transform: translate by the negated top-left corner,
    /// then rotate, then scale by the stretch.
    pub fn transformation_matrix(&self) -> Mat4 {
        let translation = Mat4::from_translation((-self.area.top_left).extend(0.0));
        let rotation = Mat4::from_rotation_z(self.rotation);
        let scale = Mat4::from_scale(Vec3::new(self.stretch, self.stretch, 1.0));
        scale * rotation * translation
    }

    /// Map a screen pixel back into world space.
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        self.transformation_matrix()
            .inverse()
            .transform_point3(screen.extend(0.0))
            .truncate()
    }

    /// Inclusive tile index range covered by the view, padded by one tile.
    /// Returns (min_x, max_x, min_y, max_y).
    ///
    /// With a rotation the view rectangle turns about its top-left corner,
    /// so the range spans the bounding box of the turned corners.
    pub fn visible_tiles(&self) -> (i32, i32, i32, i32) {
        let tile = f32::from(self.tile_size);
        let turn = Vec2::from_angle(-self.rotation);
        let size = self.area.size();

        let mut min = Vec2::splat(f32::MAX);
        let mut max = Vec2::splat(f32::MIN);
        for offset in [Vec2::ZERO, Vec2::new(size.x, 0.0), Vec2::new(0.0, size.y), size] {
            let corner = self.area.top_left + turn.rotate(offset);
            min = min.min(corner);
            max = max.max(corner);
        }
        let min = min / tile;
        let max = max / tile;

        (
            min.x.floor() as i32 - 1,
            max.x.ceil() as i32 + 1,
            min.y.floor() as i32 - 1,
            max.y.ceil() as i32 + 1,
        )
    }
}

// =============================================================================
// CAMERA
// =============================================================================

/// A camera view driven by a stack of camera tasks.
#[derive(Debug)]
pub struct Camera {
    view: CameraView,
    tasks: TaskStack,
}

impl Camera {
    /// Create a camera resting on free movement.
    pub fn new(viewport: UVec2, config: &CameraConfig) -> Self {
        Self {
            view: CameraView::new(viewport, config),
            tasks: TaskStack::free_movement(FreeMovementTask::from_config(config)),
        }
    }

    /// Create a camera resting on `base`, which must be a free movement or
    /// follow task.
    pub fn with_base_task(
        viewport: UVec2,
        config: &CameraConfig,
        base: CameraTask,
    ) -> Result<Self, CameraError> {
        Ok(Self {
            view: CameraView::new(viewport, config),
            tasks: TaskStack::new(base)?,
        })
    }

    /// Advance whichever task is on top of the stack by one frame.
    pub fn update(&mut self, time: &FrameTime, controls: &Controls) {
        puffin::profile_function!();
        let ctx = FrameContext::new(*time, *controls);
        self.tasks.update(&mut self.view, &ctx);
    }

    /// Start `task` and make it the active task.
    pub fn push_task(&mut self, task: impl Into<CameraTask>) {
        self.tasks.push(task.into(), &self.view);
    }

    /// Remove the active task. The base task is never removed.
    pub fn pop_task(&mut self) -> Option<CameraTask> {
        self.tasks.pop()
    }

    /// The task on top of the stack.
    pub fn current_task(&self) -> &CameraTask {
        self.tasks.peek()
    }

    /// Replace the bottom task of the stack.
    pub fn set_base_task(&mut self, task: impl Into<CameraTask>) -> Result<(), CameraError> {
        self.tasks.set_base(task.into())
    }

    pub fn tasks(&self) -> &TaskStack {
        &self.tasks
    }

    /// Whether raw input should drive the camera (free movement is on top).
    pub fn accepting_input(&self) -> bool {
        self.current_task().kind() == TaskKind::FreeMovement
    }

    pub fn view(&self) -> &CameraView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut CameraView {
        &mut self.view
    }

    pub fn transformation_matrix(&self) -> Mat4 {
        self.view.transformation_matrix()
    }

    pub fn zoom(&self) -> u16 {
        self.view.zoom()
    }

    pub fn position(&self) -> Vec2 {
        self.view.position()
    }

    pub fn rotation(&self) -> f32 {
        self.view.rotation()
    }

    pub fn area_box(&self) -> &AreaBox {
        self.view.area_box()
    }

    pub fn center_on(&mut self, point: Vec2) {
        self.view.center_on(point);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::ControlAction;
    use crate::geometry::PositionRef;
    use crate::tasks::{FollowTask, PanToTask, ZoomByIncrementsTask};
    use crate::time_system::{GameClock, TimeNormalizedSpeed};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::time::Duration;

    fn make_view() -> CameraView {
        let mut view = CameraView::new(UVec2::new(800, 600), &CameraConfig::default());
        view.center_on(Vec2::ZERO);
        view
    }

    #[test]
    fn test_initial_view_matches_zoom() {
        let view = make_view();
        assert_eq!(view.zoom(), 64);
        assert_eq!(view.stretch(), 2.0);
        assert_eq!(view.area_box().size(), Vec2::new(400.0, 300.0));
        assert_eq!(view.position(), Vec2::new(-200.0, -150.0));
    }

    #[test]
    fn test_zoom_resizes_around_center() {
        let mut view = make_view();
        view.center_on(Vec2::new(100.0, 50.0));
        view.set_zoom(128);

        assert_eq!(view.stretch(), 4.0);
        assert_eq!(view.area_box().size(), Vec2::new(200.0, 150.0));
        assert_eq!(view.center(), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_view_size_rounds_up() {
        let mut view = make_view();
        view.set_zoom(72);
        // 800 / 2.25 = 355.55..., 600 / 2.25 = 266.66...
        assert_eq!(view.area_box().size(), Vec2::new(356.0, 267.0));
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut view = make_view();
        view.set_zoom(1_000);
        assert_eq!(view.zoom(), CameraConfig::default().max_zoom);
        view.set_zoom(1);
        assert_eq!(view.zoom(), CameraConfig::default().min_zoom);
    }

    #[test]
    fn test_zoom_stays_in_range_under_random_mutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut view = make_view();

        for _ in 0..2_000 {
            match rng.gen_range(0..5) {
                0 => view.set_zoom(rng.gen_range(0..400)),
                1 => view.zoom_in(rng.gen_range(0..60)),
                2 => view.zoom_out(rng.gen_range(0..60)),
                3 => view.smooth_zoom_in(rng.gen_range(-0.5..2.0)),
                _ => view.smooth_zoom_out(rng.gen_range(-0.5..2.0)),
            }
            assert!(view.min_zoom() <= view.zoom() && view.zoom() <= view.max_zoom());
            let expected_width = (800.0 / view.stretch()).ceil();
            assert_eq!(view.area_box().width, expected_width);
        }
    }

    #[test]
    fn test_step_zoom_refuses_to_cross_bounds() {
        let mut view = make_view();
        view.set_zoom(190);
        view.zoom_in(3);
        assert_eq!(view.zoom(), 190);
        view.zoom_in(2);
        assert_eq!(view.zoom(), 192);

        view.set_zoom(25);
        view.zoom_out(3);
        assert_eq!(view.zoom(), 25);
    }

    #[test]
    fn test_smooth_zoom_steps_at_least_one_level() {
        let mut view = make_view();
        view.smooth_zoom_in(0.01);
        assert_eq!(view.zoom(), 65);
        view.smooth_zoom_out(0.1);
        assert_eq!(view.zoom(), 58);
        view.smooth_zoom_in(0.0);
        assert_eq!(view.zoom(), 58);
    }

    #[test]
    fn test_center_on_clamps_to_bounds() {
        let mut view = make_view();
        view.set_bounds(Some(AreaBox::new(Vec2::ZERO, 1_000.0, 1_000.0)));
        view.center_on(Vec2::new(5_000.0, -20.0));
        assert_eq!(view.center(), Vec2::new(1_000.0, 0.0));
    }

    #[test]
    fn test_translate_stops_at_bounds() {
        let mut view = make_view();
        view.set_bounds(Some(AreaBox::new(Vec2::ZERO, 1_000.0, 1_000.0)));
        view.center_on(Vec2::new(950.0, 500.0));
        view.translate(Vec2::new(100.0, -25.0));
        assert_eq!(view.center(), Vec2::new(1_000.0, 475.0));
    }

    #[test]
    fn test_transformation_matrix_maps_top_left_to_origin() {
        let view = make_view();
        let matrix = view.transformation_matrix();

        let origin = matrix.transform_point3(view.position().extend(0.0));
        assert!(origin.truncate().length() < 1e-4);

        let one_tile_right = matrix.transform_point3((view.position() + Vec2::X).extend(0.0));
        assert!((one_tile_right.x - view.stretch()).abs() < 1e-4);
    }

    #[test]
    fn test_rotation_applies_after_translation() {
        let mut view = make_view();
        view.set_rotation(std::f32::consts::FRAC_PI_2);
        let point = view.position() + Vec2::new(10.0, 0.0);
        let screen = view.transformation_matrix().transform_point3(point.extend(0.0));
        // 10 units along x, rotated a quarter turn, scaled by 2
        assert!(screen.x.abs() < 1e-3);
        assert!((screen.y - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_screen_to_world_inverts_transform() {
        let mut view = make_view();
        view.set_rotation(0.3);
        let world = Vec2::new(37.0, -12.0);
        let screen = view.transformation_matrix().transform_point3(world.extend(0.0));
        let back = view.screen_to_world(screen.truncate());
        assert!(back.distance(world) < 1e-3);
    }

    #[test]
    fn test_resize_viewport_keeps_center() {
        let mut view = make_view();
        view.center_on(Vec2::new(64.0, 64.0));
        view.resize_viewport(UVec2::new(1_600, 1_200));
        assert_eq!(view.area_box().size(), Vec2::new(800.0, 600.0));
        assert_eq!(view.center(), Vec2::new(64.0, 64.0));
    }

    #[test]
    fn test_visible_tiles_cover_view() {
        let view = make_view();
        // View spans x -200..200, y -150..150 with 32-unit tiles
        assert_eq!(view.visible_tiles(), (-8, 8, -6, 6));
    }

    #[test]
    fn test_visible_tiles_follow_rotation() {
        let mut view = make_view();
        view.set_rotation(std::f32::consts::FRAC_PI_2);
        let (min_x, max_x, min_y, max_y) = view.visible_tiles();

        let tile = f32::from(view.tile_size());
        let viewport = view.viewport().as_vec2();
        for screen in [Vec2::ZERO, Vec2::new(viewport.x, 0.0), Vec2::new(0.0, viewport.y), viewport] {
            let world = view.screen_to_world(screen) / tile;
            assert!(min_x as f32 <= world.x && world.x <= max_x as f32, "{:?}", world);
            assert!(min_y as f32 <= world.y && world.y <= max_y as f32, "{:?}", world);
        }
        // A quarter turn reaches well above the unrotated range
        assert!(min_y < -6);
    }

    #[test]
    fn test_pushing_task_disables_input() {
        let mut camera = Camera::new(UVec2::new(800, 600), &CameraConfig::default());
        assert!(camera.accepting_input());

        camera.push_task(PanToTask::new(
            TimeNormalizedSpeed::per_second(50.0),
            Vec2::new(500.0, 0.0),
        ));
        assert!(!camera.accepting_input());
    }

    #[test]
    fn test_input_returns_after_task_completes() {
        let mut camera = Camera::new(UVec2::new(800, 600), &CameraConfig::default());
        camera.push_task(ZoomByIncrementsTask::to_zoom(8, 72));

        let mut clock = GameClock::new();
        camera.update(&clock.advance(Duration::from_millis(16)), &Controls::NONE);

        assert_eq!(camera.zoom(), 72);
        assert!(camera.accepting_input());
    }

    #[test]
    fn test_free_movement_base_reads_controls() {
        let mut camera = Camera::new(UVec2::new(800, 600), &CameraConfig::default());
        let start = camera.position();
        let mut controls = Controls::NONE;
        controls.press(ControlAction::Right);

        let mut clock = GameClock::new();
        camera.update(&clock.advance(Duration::from_millis(500)), &controls);

        assert_eq!(camera.position(), start + Vec2::new(210.0, 0.0));
    }

    #[test]
    fn test_follow_base_and_rejected_base() {
        let target = PositionRef::new(Vec2::new(300.0, 200.0));
        let mut camera = Camera::with_base_task(
            UVec2::new(800, 600),
            &CameraConfig::default(),
            FollowTask::new(target.clone()).into(),
        )
        .unwrap();
        assert!(!camera.accepting_input());

        let mut clock = GameClock::new();
        camera.update(&clock.advance(Duration::from_millis(16)), &Controls::NONE);
        assert_eq!(camera.view().center(), Vec2::new(300.0, 200.0));

        let rejected = camera.set_base_task(ZoomByIncrementsTask::to_zoom(4, 100));
        assert!(matches!(
            rejected,
            Err(CameraError::InvalidBaseTask(TaskKind::ZoomByIncrements))
        ));
    }
}

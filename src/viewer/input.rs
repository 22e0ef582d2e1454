//! Keyboard and mouse handling for the viewer.
//!
//! Held keys become a [`Controls`] snapshot each frame. Single presses of
//! hotkeys push scripted maneuvers onto the camera's task stack.

use std::collections::HashSet;

use glam::Vec2;
use rand::Rng;
use winit::keyboard::KeyCode;

use tile_camera::constants::*;
use tile_camera::{
    Camera, CameraConfig, ControlAction, Controls, FollowTask, FreeMovementTask, PanToTask,
    TimeNormalizedSpeed, TimeUnit, ZoomByIncrementsTask, ZoomPanZoomTask,
};

use super::map::TileMap;
use super::markers::Markers;

/// Input state tracking
pub struct InputState {
    pub keys_pressed: HashSet<KeyCode>,
    pub mouse_pos: Vec2,
    pub mouse_down: bool,
    /// Where the left button went down, to tell clicks from drags
    pub press_pos: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_pressed: HashSet::new(),
            mouse_pos: Vec2::ZERO,
            mouse_down: false,
            press_pos: Vec2::ZERO,
        }
    }

    /// Camera actions held this frame.
    pub fn controls(&self) -> Controls {
        let mut controls = Controls::NONE;
        for key in &self.keys_pressed {
            if let Some(action) = action_for_key(*key) {
                controls.press(action);
            }
        }
        controls
    }

    /// Whether a release at the current mouse position counts as a click.
    pub fn is_click(&self) -> bool {
        self.mouse_pos.distance(self.press_pos) <= CLICK_DRAG_THRESHOLD
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn action_for_key(key: KeyCode) -> Option<ControlAction> {
    match key {
        KeyCode::ArrowUp | KeyCode::KeyW => Some(ControlAction::Up),
        KeyCode::ArrowDown | KeyCode::KeyS => Some(ControlAction::Down),
        KeyCode::ArrowLeft | KeyCode::KeyA => Some(ControlAction::Left),
        KeyCode::ArrowRight | KeyCode::KeyD => Some(ControlAction::Right),
        KeyCode::Equal | KeyCode::NumpadAdd => Some(ControlAction::ZoomIn),
        KeyCode::Minus | KeyCode::NumpadSubtract => Some(ControlAction::ZoomOut),
        KeyCode::BracketRight => Some(ControlAction::SmoothZoomIn),
        KeyCode::BracketLeft => Some(ControlAction::SmoothZoomOut),
        _ => None,
    }
}

/// One-shot viewer commands bound to single key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hotkey {
    ResetZoom,
    FollowNextMarker,
    FreeMovement,
    PanToRandomPoint,
    ZoomToInitial,
    DemoSequence,
    PopTask,
    Quit,
}

pub fn hotkey_for_key(key: KeyCode) -> Option<Hotkey> {
    match key {
        KeyCode::KeyC => Some(Hotkey::ResetZoom),
        KeyCode::KeyF => Some(Hotkey::FollowNextMarker),
        KeyCode::KeyG => Some(Hotkey::FreeMovement),
        KeyCode::KeyP => Some(Hotkey::PanToRandomPoint),
        KeyCode::KeyZ => Some(Hotkey::ZoomToInitial),
        KeyCode::KeyQ => Some(Hotkey::DemoSequence),
        KeyCode::Backspace => Some(Hotkey::PopTask),
        KeyCode::Escape => Some(Hotkey::Quit),
        _ => None,
    }
}

/// Everything a hotkey may touch.
pub struct HotkeyContext<'a, R: Rng> {
    pub camera: &'a mut Camera,
    pub markers: &'a mut Markers,
    pub map: &'a TileMap,
    pub config: &'a CameraConfig,
    pub rng: &'a mut R,
}

/// Apply a hotkey. Returns true when the viewer should exit.
pub fn apply_hotkey<R: Rng>(hotkey: Hotkey, ctx: HotkeyContext<'_, R>) -> bool {
    let HotkeyContext {
        camera,
        markers,
        map,
        config,
        rng,
    } = ctx;

    match hotkey {
        Hotkey::ResetZoom => camera.view_mut().set_zoom(config.initial_zoom),
        Hotkey::FollowNextMarker => {
            if let Some(target) = markers.follow_next() {
                if let Err(e) = camera.set_base_task(FollowTask::new(target)) {
                    log::warn!("Could not follow marker: {}", e);
                }
            }
        }
        Hotkey::FreeMovement => {
            markers.stop_following();
            if let Err(e) = camera.set_base_task(FreeMovementTask::from_config(config)) {
                log::warn!("Could not restore free movement: {}", e);
            }
        }
        Hotkey::PanToRandomPoint => {
            let bounds = map.bounds();
            let destination = bounds.top_left
                + Vec2::new(
                    rng.gen_range(0.0..bounds.width.max(1.0)),
                    rng.gen_range(0.0..bounds.height.max(1.0)),
                );
            camera.push_task(PanToTask::new(
                TimeNormalizedSpeed::per_second(DEMO_PAN_SPEED),
                destination,
            ));
        }
        Hotkey::ZoomToInitial => {
            camera.push_task(ZoomByIncrementsTask::to_zoom(DEMO_ZOOM_SPEED, config.initial_zoom));
        }
        Hotkey::DemoSequence => push_demo_sequence(camera),
        Hotkey::PopTask => {
            camera.pop_task();
        }
        Hotkey::Quit => return true,
    }
    false
}

/// Two pans followed by a zoom-out, pan, zoom-in maneuver. The pans run
/// first since they sit above the maneuver on the stack.
pub fn push_demo_sequence(camera: &mut Camera) {
    camera.push_task(ZoomPanZoomTask::new(
        1,
        TimeNormalizedSpeed::new(0.0005, TimeUnit::Ticks),
        Vec2::new(900.0, 200.0),
    ));
    camera.push_task(PanToTask::new(
        TimeNormalizedSpeed::new(0.128, TimeUnit::Milliseconds),
        Vec2::ZERO,
    ));
    camera.push_task(PanToTask::new(
        TimeNormalizedSpeed::per_second(64.0),
        Vec2::new(500.0, 500.0),
    ));
}

/// Zoom out, pan to the clicked world point, zoom back in.
pub fn click_maneuver(camera: &Camera, screen: Vec2) -> ZoomPanZoomTask {
    let destination = camera.view().screen_to_world(screen);
    ZoomPanZoomTask::new(
        DEMO_ZOOM_SPEED,
        TimeNormalizedSpeed::per_second(DEMO_PAN_SPEED),
        destination,
    )
}

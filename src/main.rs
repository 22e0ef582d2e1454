mod viewer;

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use glam::{UVec2, Vec2};
use glutin::prelude::*;
use glutin::surface::WindowSurface;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use egui_glow::EguiGlow;

use tile_camera::constants::*;
use tile_camera::{Camera, CameraConfig, Controls, GameClock};

use viewer::input::{self, HotkeyContext, InputState};
use viewer::map::TileMap;
use viewer::markers::Markers;
use viewer::renderer::Renderer;
use viewer::{app, ui};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = load_config();
    let profiler = start_profiler();

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, profiler);
    event_loop.run_app(&mut app)?;
    Ok(())
}

/// Read `camera.json` from the working directory, falling back to defaults.
fn load_config() -> CameraConfig {
    let path = Path::new(CAMERA_CONFIG_FILE);
    if !path.exists() {
        log::info!("No {} found, using default camera settings", CAMERA_CONFIG_FILE);
        return CameraConfig::default();
    }
    match CameraConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Ignoring {}: {}", path.display(), e);
            CameraConfig::default()
        }
    }
}

/// Serve puffin scopes over HTTP when the profiling variable is set.
fn start_profiler() -> Option<puffin_http::Server> {
    std::env::var_os(PROFILE_ENV_VAR)?;

    let addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
    match puffin_http::Server::new(&addr) {
        Ok(server) => {
            puffin::set_scopes_on(true);
            log::info!("Puffin server listening on {}", addr);
            Some(server)
        }
        Err(e) => {
            log::warn!("Could not start puffin server: {}", e);
            None
        }
    }
}

struct App {
    config: CameraConfig,
    state: Option<AppState>,
    _profiler: Option<puffin_http::Server>,
}

struct AppState {
    // GL resources drop before the context and window they live in
    renderer: Renderer,
    egui_glow: EguiGlow,
    gl_surface: glutin::surface::Surface<WindowSurface>,
    gl_context: glutin::context::PossiblyCurrentContext,
    _gl: Arc<glow::Context>,
    window: Window,

    // Scene
    camera: Camera,
    config: CameraConfig,
    map: TileMap,
    markers: Markers,
    rng: StdRng,

    // Time and input
    clock: GameClock,
    input: InputState,
    last_frame_time: Instant,
}

impl App {
    fn new(config: CameraConfig, profiler: Option<puffin_http::Server>) -> Self {
        Self {
            config,
            state: None,
            _profiler: profiler,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        match AppState::new(event_loop, self.config.clone()) {
            Ok(state) => self.state = Some(state),
            Err(e) => {
                log::error!("Failed to start viewer: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let state = match &mut self.state {
            Some(s) => s,
            None => return,
        };

        // Let egui handle the event first
        let egui_consumed = state.egui_glow.on_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                app::resize_surface(&state.gl_surface, &state.gl_context, size.width, size.height);
                state.renderer.resize(size.width as i32, size.height as i32);
                state
                    .camera
                    .view_mut()
                    .resize_viewport(UVec2::new(size.width, size.height));
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if egui_consumed.consumed {
                    return;
                }
                if let PhysicalKey::Code(key) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => {
                            if !event.repeat {
                                if let Some(hotkey) = input::hotkey_for_key(key) {
                                    if state.apply_hotkey(hotkey) {
                                        event_loop.exit();
                                    }
                                }
                            }
                            state.input.keys_pressed.insert(key);
                        }
                        ElementState::Released => {
                            state.input.keys_pressed.remove(&key);
                        }
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                state.input.mouse_pos = Vec2::new(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput {
                state: btn_state,
                button: MouseButton::Left,
                ..
            } => {
                if egui_consumed.consumed {
                    return;
                }
                match btn_state {
                    ElementState::Pressed => {
                        state.input.mouse_down = true;
                        state.input.press_pos = state.input.mouse_pos;
                    }
                    ElementState::Released => {
                        let was_click = state.input.mouse_down && state.input.is_click();
                        state.input.mouse_down = false;
                        if was_click {
                            let task = input::click_maneuver(&state.camera, state.input.mouse_pos);
                            state.camera.push_task(task);
                        }
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                state.update_and_render();
                state.window.request_redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }
}

impl AppState {
    fn new(
        event_loop: &ActiveEventLoop,
        config: CameraConfig,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let app::WindowContext {
            window,
            gl_surface,
            gl_context,
            gl,
            egui_glow,
        } = app::create_window(event_loop)?;

        let renderer = Renderer::new(gl.clone())?;

        let mut rng = StdRng::from_entropy();
        let map = TileMap::generate(MAP_DEFAULT_WIDTH, MAP_DEFAULT_HEIGHT, config.tile_size, rng.gen());
        let bounds = map.bounds();
        let markers = Markers::spawn(MARKER_COUNT, &bounds, &mut rng);

        let size = window.inner_size();
        let mut camera = Camera::new(UVec2::new(size.width, size.height), &config);
        camera.view_mut().set_bounds(Some(bounds));
        camera.center_on(bounds.center());

        Ok(Self {
            window,
            gl_surface,
            gl_context,
            _gl: gl,
            egui_glow,
            renderer,
            camera,
            config,
            map,
            markers,
            rng,
            clock: GameClock::new(),
            input: InputState::new(),
            last_frame_time: Instant::now(),
        })
    }

    fn apply_hotkey(&mut self, hotkey: input::Hotkey) -> bool {
        input::apply_hotkey(
            hotkey,
            HotkeyContext {
                camera: &mut self.camera,
                markers: &mut self.markers,
                map: &self.map,
                config: &self.config,
                rng: &mut self.rng,
            },
        )
    }

    fn update_and_render(&mut self) {
        puffin::GlobalProfiler::lock().new_frame();

        let current_time = Instant::now();
        // Cap dt so a stalled frame doesn't teleport the camera
        let dt = (current_time - self.last_frame_time).min(Duration::from_secs_f32(MAX_FRAME_DT));
        self.last_frame_time = current_time;

        self.markers
            .update(&self.map.bounds(), dt.as_secs_f32(), &mut self.rng);

        let frame = self.clock.advance(dt);
        let controls = if self.camera.accepting_input() {
            self.input.controls()
        } else {
            Controls::NONE
        };
        self.camera.update(&frame, &controls);

        let panel = ui::CameraPanelData::from_camera(&self.camera, self.markers.followed_index());
        self.egui_glow
            .run(&self.window, |ctx| ui::draw_camera_panel(ctx, &panel));

        self.renderer
            .render(&self.camera, &self.map, &self.markers.instances());
        self.egui_glow.paint(&self.window);

        if let Err(e) = self.gl_surface.swap_buffers(&self.gl_context) {
            log::error!("Failed to swap buffers: {}", e);
        }
    }
}

//! egui overlay: camera readout, task stack and key help.

use egui::epaint::Shadow;
use egui::{Color32, Rounding, Stroke, Visuals};

use tile_camera::{Camera, CameraTask, ZoomPanZoomPhase};

const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(12, 18, 30, 220);
const PANEL_BORDER: Color32 = Color32::from_rgb(50, 70, 100);
const TEXT_PRIMARY: Color32 = Color32::from_rgb(210, 220, 235);
const TEXT_ACCENT: Color32 = Color32::from_rgb(120, 200, 255);

const HELP_LINES: [&str; 11] = [
    "Arrows / WASD  move",
    "= / -          zoom",
    "[ / ]          smooth zoom",
    "C              reset zoom",
    "F / G          follow marker / free",
    "P              pan to random point",
    "Z              zoom to start level",
    "Q              demo sequence",
    "Click          zoom-pan-zoom there",
    "Backspace      pop task",
    "Esc            quit",
];

/// Flat panels, square corners, no shadows.
pub fn viewer_visuals() -> Visuals {
    let mut visuals = Visuals::dark();
    visuals.window_rounding = Rounding::ZERO;
    visuals.menu_rounding = Rounding::ZERO;
    visuals.window_shadow = Shadow::NONE;
    visuals.popup_shadow = Shadow::NONE;
    visuals.window_fill = PANEL_BG;
    visuals.window_stroke = Stroke::new(1.0, PANEL_BORDER);
    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals
}

/// Snapshot of what the overlay shows, taken before the egui pass.
pub struct CameraPanelData {
    pub zoom: u16,
    pub min_zoom: u16,
    pub max_zoom: u16,
    pub center: (f32, f32),
    /// Visible world rectangle
    pub area: String,
    pub accepting_input: bool,
    /// Task descriptions, top of the stack first
    pub tasks: Vec<String>,
    pub followed_marker: Option<usize>,
}

impl CameraPanelData {
    pub fn from_camera(camera: &Camera, followed_marker: Option<usize>) -> Self {
        let view = camera.view();
        let center = view.center();
        let mut tasks: Vec<String> = camera.tasks().iter().map(describe_task).collect();
        tasks.reverse();

        Self {
            zoom: view.zoom(),
            min_zoom: view.min_zoom(),
            max_zoom: view.max_zoom(),
            center: (center.x, center.y),
            area: view.area_box().to_string(),
            accepting_input: camera.accepting_input(),
            tasks,
            followed_marker,
        }
    }
}

pub fn describe_task(task: &CameraTask) -> String {
    let label = task.kind().label();
    match task {
        CameraTask::PanTo(pan) => {
            let d = pan.destination();
            format!("{} ({:.0}, {:.0})", label, d.x, d.y)
        }
        CameraTask::ZoomByIncrements(zoom) => format!("{} {:?}", label, zoom.target()),
        CameraTask::ZoomPanZoom(task) => {
            let phase = match task.phase() {
                ZoomPanZoomPhase::ZoomOut => "zooming out",
                ZoomPanZoomPhase::Pan => "panning",
                ZoomPanZoomPhase::ZoomIn => "zooming in",
            };
            match task.interruptions() {
                0 => format!("{} [{}]", label, phase),
                n => format!("{} [{}, interrupted {}x]", label, phase, n),
            }
        }
        CameraTask::FreeMovement(_) | CameraTask::Follow(_) => label.to_string(),
    }
}

pub fn draw_camera_panel(ctx: &egui::Context, data: &CameraPanelData) {
    egui::Window::new("Camera")
        .fixed_pos([10.0, 10.0])
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(format!(
                "Zoom {} ({}..={})",
                data.zoom, data.min_zoom, data.max_zoom
            ));
            ui.label(format!("Center {:.1}, {:.1}", data.center.0, data.center.1));
            ui.label(format!("View {}", data.area));
            if let Some(index) = data.followed_marker {
                ui.label(format!("Following marker {}", index));
            }
            ui.label(if data.accepting_input {
                "Input: keyboard"
            } else {
                "Input: scripted"
            });

            ui.separator();
            ui.colored_label(TEXT_ACCENT, format!("Tasks ({})", data.tasks.len()));
            for (depth, task) in data.tasks.iter().enumerate() {
                let marker = if depth == 0 { ">" } else { " " };
                ui.monospace(format!("{} {}", marker, task));
            }

            ui.separator();
            egui::CollapsingHeader::new("Keys").show(ui, |ui| {
                for line in HELP_LINES {
                    ui.monospace(line);
                }
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{UVec2, Vec2};
    use tile_camera::{CameraConfig, PanToTask, TimeNormalizedSpeed, ZoomPanZoomTask};

    #[test]
    fn test_panel_lists_tasks_top_first() {
        let mut camera = Camera::new(UVec2::new(800, 600), &CameraConfig::default());
        camera.push_task(ZoomPanZoomTask::new(
            2,
            TimeNormalizedSpeed::per_second(100.0),
            Vec2::new(900.0, 200.0),
        ));
        camera.push_task(PanToTask::new(
            TimeNormalizedSpeed::per_second(100.0),
            Vec2::new(10.0, 20.0),
        ));

        let data = CameraPanelData::from_camera(&camera, None);
        assert_eq!(
            data.tasks,
            vec![
                "pan to (10, 20)".to_string(),
                "zoom out, pan, zoom in [zooming out, interrupted 1x]".to_string(),
                "free movement".to_string(),
            ]
        );
        assert!(!data.accepting_input);
        assert_eq!(data.zoom, 64);
        assert_eq!(data.area, "{x: 0.0, y: 0.0, w: 400.0, h: 300.0}");
    }
}

use std::sync::Arc;

use eframe::{egui, egui_glow, glow};
use egui::mutex::Mutex;
use egui::panel::Side;
use egui::{Color32, Id};

use crate::{
    config::{LabConfig, ViewConfig},
    error::GfxError,
    gfx::{CameraModel, FrameMatrices},
    input::{FrameControl, KeyEvent},
    scenes::Scene,
};

/// Opens the window and runs `scene` until it is closed.
pub fn run<S: Scene>(scene: S) -> eframe::Result {
    let config = scene.config().clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.width, config.height])
            .with_title(config.title.as_str()),
        multisampling: 2,
        depth_buffer: 24,

        renderer: eframe::Renderer::Glow,
        ..Default::default()
    };

    let result = eframe::run_native(
        config.title.as_str(),
        options,
        Box::new(move |cc| Ok(Box::new(LabApp::new(cc, scene)))),
    );
    if let Err(e) = &result {
        log::error!("Failed to open a window: {e}");
    }
    result
}

/// Folds one frame's key events into the camera, in order. A close request
/// anywhere in the batch is reported.
pub fn apply_keys<C: CameraModel>(camera: C, events: &[KeyEvent]) -> (C, FrameControl) {
    events
        .iter()
        .fold((camera, FrameControl::Continue), |(camera, control), event| {
            let control = match event.frame_control() {
                FrameControl::Close => FrameControl::Close,
                FrameControl::Continue => control,
            };
            (camera.on_key(event), control)
        })
}

/// Whether painting may start after scene setup, plus the message for the side panel.
pub fn setup_status(title: &str, result: Result<(), GfxError>) -> (bool, Option<String>) {
    match result {
        Ok(()) => (true, None),
        Err(e) => {
            log::error!("{title}: {e}");
            (false, Some(e.to_string()))
        }
    }
}

pub struct LabApp<S: Scene> {
    /// Behind an `Arc<Mutex<…>>` so we can pass it to [`egui::PaintCallback`] and paint later.
    scene: Arc<Mutex<S>>,
    camera: S::Camera,
    view: ViewConfig,
    title: String,
    ready: bool,
    status: Option<String>,
    wireframe: bool,
    bg_color: Color32,
}

impl<S: Scene> LabApp<S> {
    fn new(cc: &eframe::CreationContext<'_>, mut scene: S) -> Self {
        let LabConfig {
            title,
            view,
            clear_color,
            ..
        } = scene.config().clone();
        let camera = scene.initial_camera();

        let (ready, status) = match cc.gl.as_ref() {
            Some(gl) => {
                let result = scene.setup_gl(gl);
                if result.is_err() {
                    scene.destroy_gl(gl);
                }
                setup_status(&title, result)
            }
            None => {
                let msg = String::from("eframe was started without the glow backend");
                log::error!("{msg}");
                (false, Some(msg))
            }
        };

        Self {
            scene: Arc::new(Mutex::new(scene)),
            camera,
            view,
            title,
            ready,
            status,
            wireframe: false,
            bg_color: clear_color,
        }
    }
}

impl<S: Scene> eframe::App for LabApp<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        egui::SidePanel::new(Side::Left, Id::new("Control Panel")).show(ctx, |ui| {
            ui.heading(self.title.as_str());
            ui.add(egui::Checkbox::new(&mut self.wireframe, "Wireframe"));
            ui.horizontal(|ui| {
                ui.color_edit_button_srgba(&mut self.bg_color);
                ui.label("BG Color");
            });

            ui.add(egui::Separator::default());

            for line in self.camera.describe() {
                ui.label(line);
            }
            if ui.button("Reset camera").clicked() {
                self.camera = self.camera.reset();
            }

            if let Some(status) = &self.status {
                ui.add(egui::Separator::default());
                ui.colored_label(Color32::LIGHT_RED, status.as_str());
            }
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Frame::canvas(ui.style())
                .fill(self.bg_color)
                .show(ui, |ui| {
                    self.custom_painting(ui);
                });
        });
        ctx.request_repaint();
    }

    fn on_exit(&mut self, gl: Option<&glow::Context>) {
        if let Some(gl) = gl {
            self.scene.lock().destroy_gl(gl);
        }
    }
}

impl<S: Scene> LabApp<S> {
    fn handle_input(&mut self, ctx: &egui::Context) {
        let events: Vec<KeyEvent> =
            ctx.input(|i| i.events.iter().filter_map(KeyEvent::from_egui).collect());
        if events.is_empty() {
            return;
        }

        let (camera, control) = apply_keys(self.camera.clone(), &events);
        self.camera = camera;

        if control == FrameControl::Close {
            log::info!("Escape pressed, closing");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn custom_painting(&mut self, ui: &mut egui::Ui) {
        let size = ui.available_size();
        let (rect, _response) = ui.allocate_at_least(size, egui::Sense::hover());

        if !self.ready || size.y <= 0.0 {
            return;
        }

        let frame_mtx = FrameMatrices::new(self.camera.view_matrix(), &self.view, size.x / size.y);

        // Clone to Give to callback
        let scene = self.scene.clone();
        let wire_frame = self.wireframe;
        let bg_color = self.bg_color;

        // Create Callback
        let callback = egui::PaintCallback {
            rect,
            callback: std::sync::Arc::new(egui_glow::CallbackFn::new(move |_info, painter| {
                let scene = &mut scene.lock();
                let gl = painter.gl();
                unsafe {
                    use glow::HasContext as _;
                    gl.enable(glow::DEPTH_TEST);
                    gl.depth_func(glow::LESS);
                    if wire_frame {
                        gl.polygon_mode(glow::FRONT_AND_BACK, glow::LINE);
                    } else {
                        gl.polygon_mode(glow::FRONT_AND_BACK, glow::FILL);
                    }
                    gl.clear_color(
                        bg_color.r() as f32 / u8::MAX as f32,
                        bg_color.g() as f32 / u8::MAX as f32,
                        bg_color.b() as f32 / u8::MAX as f32,
                        bg_color.a() as f32 / u8::MAX as f32,
                    );
                    gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
                }

                scene.draw(gl, &frame_mtx);

                // Reset back to the normal setting
                unsafe {
                    use glow::HasContext as _;
                    gl.polygon_mode(glow::FRONT_AND_BACK, glow::FILL);
                    gl.disable(glow::DEPTH_TEST);
                }
            })),
        };
        ui.painter().add(callback);
    }
}

#[cfg(test)]
mod tests {
    use egui::Key;

    use super::*;
    use crate::error::ShaderStage;
    use crate::gfx::OrbitCamera;
    use crate::input::KeyAction;

    #[test]
    fn keys_fold_in_order() {
        let events = [
            KeyEvent::press(Key::ArrowLeft),
            KeyEvent::new(Key::ArrowLeft, KeyAction::Repeat),
            KeyEvent::new(Key::ArrowLeft, KeyAction::Release),
            KeyEvent::press(Key::ArrowDown),
        ];
        let (camera, control) = apply_keys(OrbitCamera::new(300.0), &events);
        assert_eq!(control, FrameControl::Continue);
        assert!((camera.azimuth() + 0.2).abs() < 1e-6);
        assert!((camera.polar() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn escape_requests_close_but_keeps_camera_updates() {
        let events = [KeyEvent::press(Key::Escape), KeyEvent::press(Key::ArrowRight)];
        let (camera, control) = apply_keys(OrbitCamera::new(300.0), &events);
        assert_eq!(control, FrameControl::Close);
        assert_eq!(camera.azimuth(), 0.1);
    }

    #[test]
    fn shader_failure_blocks_painting() {
        let err = GfxError::CompileFailed {
            stage: ShaderStage::Vertex,
            log: "0:3(1): error: syntax error, unexpected IDENTIFIER".into(),
        };
        let (ready, status) = setup_status("Lab 1", Err(err));
        assert!(!ready);
        let status = status.unwrap_or_default();
        assert!(status.contains("vertex"), "{status}");
        assert!(status.contains("syntax error"), "{status}");
    }

    #[test]
    fn successful_setup_has_no_status() {
        assert_eq!(setup_status("Lab 2", Ok(())), (true, None));
    }

    #[test]
    fn no_events_leave_camera_untouched() {
        let start = OrbitCamera::new(300.0).with_azimuth(0.5);
        let (camera, control) = apply_keys(start.clone(), &[]);
        assert_eq!(camera, start);
        assert_eq!(control, FrameControl::Continue);
    }
}

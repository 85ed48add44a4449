use egui::{Align2, Color32, FontId, Pos2};
use winit::event::WindowEvent;
use winit::window::Window;

use riemann_fan::config::{Viewport, LABEL_FONT_SIZE, TOOLTIP_OFFSET};
use riemann_fan::editor::SpeedEditor;
use riemann_fan::simulation::{DrawModel, Point, RegionLabel, SpeedSetParser, SpeedStore};

use crate::gpu::GpuContext;

const DIALOG_TITLE: &str = "slope: dx/dt";
const DIALOG_HEADER: &str = "Enter list of wave speeds dx/dt";
const DIALOG_WIDTH: f32 = 320.0;

/// Maps plot coordinates to egui points for the current surface
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotToScreen {
    scale_x: f32,
    scale_y: f32,
}

impl PlotToScreen {
    pub fn new(viewport: &Viewport, surface_size: [u32; 2], pixels_per_point: f32) -> Self {
        Self {
            scale_x: surface_size[0] as f32 / viewport.width as f32 / pixels_per_point,
            scale_y: surface_size[1] as f32 / viewport.height as f32 / pixels_per_point,
        }
    }

    pub fn pos(&self, p: Point) -> Pos2 {
        egui::pos2(p.x as f32 * self.scale_x, p.y as f32 * self.scale_y)
    }

    /// Caption font, scaled with the window height like the diagrams are
    pub fn label_font(&self) -> FontId {
        FontId::proportional(LABEL_FONT_SIZE as f32 * self.scale_y)
    }
}

/// How the speed dialog was closed this frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogAction {
    Commit,
    Cancel,
}

/// Axis captions, painted behind any window
pub fn axis_labels(ctx: &egui::Context, model: &DrawModel, to_screen: PlotToScreen) {
    let painter = ctx.layer_painter(egui::LayerId::background());
    for label in model.labels() {
        painter.text(
            to_screen.pos(label.position),
            Align2::LEFT_BOTTOM,
            label.text,
            to_screen.label_font(),
            Color32::BLACK,
        );
    }
}

/// Name of the clicked region, next to where it was clicked
pub fn region_tooltip(
    ctx: &egui::Context,
    label: RegionLabel,
    at: Point,
    to_screen: PlotToScreen,
) {
    let anchor = to_screen.pos(Point::new(at.x + TOOLTIP_OFFSET, at.y + TOOLTIP_OFFSET));
    egui::Area::new(egui::Id::new("region-tooltip"))
        .order(egui::Order::Tooltip)
        .fixed_pos(anchor)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.label(label.to_string());
            });
        });
}

/// Speed entry while the editor is open.
///
/// Each change of the text goes through the editor, so valid input is drawn
/// immediately. Enter or OK commits; Escape or Cancel restores.
pub fn speed_dialog(
    ctx: &egui::Context,
    editor: &mut SpeedEditor,
    store: &SpeedStore,
    parser: &SpeedSetParser,
    take_focus: bool,
) -> Option<DialogAction> {
    let mut text = editor.buffer()?.to_string();
    let mut action = None;

    egui::Window::new(DIALOG_TITLE)
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_TOP, [0.0, 40.0])
        .show(ctx, |ui| {
            ui.label(DIALOG_HEADER);
            let response = ui.add(
                egui::TextEdit::singleline(&mut text)
                    .font(egui::TextStyle::Monospace)
                    .desired_width(DIALOG_WIDTH),
            );
            if take_focus {
                response.request_focus();
            }
            if response.changed() {
                editor.set_text(&text, store, parser);
            }

            match editor.last_error() {
                Some(e) => ui.colored_label(Color32::DARK_RED, e.to_string()),
                None => ui.weak(format!("drawing {}", store.current())),
            };

            ui.horizontal(|ui| {
                if ui.button("OK").clicked() {
                    action = Some(DialogAction::Commit);
                }
                if ui.button("Cancel").clicked() {
                    action = Some(DialogAction::Cancel);
                }
            });

            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                action = Some(DialogAction::Commit);
            }
            if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                action = Some(DialogAction::Cancel);
            }
        });

    action
}

/// egui state plus the wgpu renderer that paints it over the scene
pub struct UiLayer {
    pub ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

impl UiLayer {
    pub fn new(window: &Window, gpu: &GpuContext) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let renderer = egui_wgpu::Renderer::new(&gpu.device, gpu.config.format, None, 1, false);
        Self {
            ctx,
            state,
            renderer,
        }
    }

    /// Feed a window event to egui; true when egui used it
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    pub fn run(&mut self, window: &Window, build: impl FnMut(&egui::Context)) -> egui::FullOutput {
        let raw_input = self.state.take_egui_input(window);
        self.ctx.run(raw_input, build)
    }

    /// Paint `output` on top of `view` without clearing it.
    ///
    /// Returns the renderer's own command buffers, which must be submitted
    /// before `encoder`.
    pub fn paint(
        &mut self,
        window: &Window,
        gpu: &GpuContext,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        output: egui::FullOutput,
    ) -> Vec<wgpu::CommandBuffer> {
        self.state.handle_platform_output(window, output.platform_output);

        let pixels_per_point = output.pixels_per_point;
        let paint_jobs = self.ctx.tessellate(output.shapes, pixels_per_point);
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: gpu.surface_size(),
            pixels_per_point,
        };

        for (id, delta) in &output.textures_delta.set {
            self.renderer.update_texture(&gpu.device, &gpu.queue, *id, delta);
        }
        let commands = self
            .renderer
            .update_buffers(&gpu.device, &gpu.queue, encoder, &paint_jobs, &screen);

        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("ui-pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                })
                .forget_lifetime();
            self.renderer.render(&mut pass, &paint_jobs, &screen);
        }

        for id in &output.textures_delta.free {
            self.renderer.free_texture(id);
        }
        commands
    }
}

use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use riemann_fan::config::{
    Settings, CYCLE_DURATION, DOUBLE_CLICK_WINDOW, FPS_REPORT_INTERVAL, MARQUEE_STEP,
    MARQUEE_TEXT, TOOLTIP_TIMEOUT,
};
use riemann_fan::editor::SpeedEditor;
use riemann_fan::overlay::{Deadline, FrameRateCalculator, Periodic, TitleMarquee};
use riemann_fan::simulation::{
    draw, AnimationClock, Command, DrawModel, Point, RegionLabel, SpeedSetParser, SpeedStore,
};

use crate::gpu::{GpuContext, RenderPipeline, SceneBuffers};
use crate::ui::{axis_labels, region_tooltip, speed_dialog, DialogAction, PlotToScreen, UiLayer};

const STATIC_TITLE: &str = "Riemann Wave Fan";

/// Window-side helpers: title banner, tooltip, frame-rate sampling
struct Overlay {
    /// Clicked region and where it was clicked, in plot coordinates
    tooltip: Deadline<(RegionLabel, Point)>,
    marquee: TitleMarquee,
    marquee_tick: Periodic,
    fps: FrameRateCalculator,
    fps_report: Periodic,
    title: String,
}

impl Overlay {
    fn new(settings: &Settings, now: Instant) -> Self {
        let marquee_tick = if settings.marquee {
            Periodic::new(MARQUEE_STEP, now)
        } else {
            Periodic::inactive(MARQUEE_STEP)
        };
        let fps_report = if settings.log_fps {
            Periodic::new(FPS_REPORT_INTERVAL, now)
        } else {
            Periodic::inactive(FPS_REPORT_INTERVAL)
        };
        Self {
            tooltip: Deadline::new(),
            marquee: TitleMarquee::new(MARQUEE_TEXT),
            marquee_tick,
            fps: FrameRateCalculator::default(),
            fps_report,
            title: String::new(),
        }
    }
}

/// Application state
pub struct App {
    settings: Settings,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    scene_buffers: Option<SceneBuffers>,
    render_pipeline: Option<RenderPipeline>,
    ui: Option<UiLayer>,
    store: SpeedStore,
    parser: SpeedSetParser,
    clock: AnimationClock,
    editor: SpeedEditor,
    /// Move keyboard focus into the speed dialog on the next frame
    focus_editor: bool,
    overlay: Overlay,
    cursor: Option<PhysicalPosition<f64>>,
    last_click: Option<Instant>,
    /// Geometry of the last presented frame, for hit testing clicks
    last_model: Option<DrawModel>,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let now = Instant::now();
        let clock = AnimationClock::new(
            settings.viewport.stop_time,
            CYCLE_DURATION,
            settings.autoplay,
            now,
        );
        Self {
            parser: SpeedSetParser::new(settings.validation),
            overlay: Overlay::new(&settings, now),
            settings,
            window: None,
            gpu: None,
            scene_buffers: None,
            render_pipeline: None,
            ui: None,
            store: SpeedStore::default(),
            clock,
            editor: SpeedEditor::new(),
            focus_editor: false,
            cursor: None,
            last_click: None,
            last_model: None,
        }
    }

    fn render(&mut self) {
        let (Some(window), Some(gpu), Some(buffers), Some(render), Some(ui)) = (
            self.window.as_ref(),
            self.gpu.as_ref(),
            self.scene_buffers.as_mut(),
            self.render_pipeline.as_ref(),
            self.ui.as_mut(),
        ) else {
            return;
        };

        let now = Instant::now();
        let t = self.clock.sample(now);
        let speeds = self.store.current();
        let viewport = &self.settings.viewport;
        let model = draw(&speeds, t, viewport);

        // Acquire the frame before running egui so its texture updates are never dropped
        let output = match gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.reconfigure();
                return;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                return;
            }
        };

        // Text, tooltip and speed entry are laid out by egui
        let surface_size = gpu.surface_size();
        let tooltip = self.overlay.tooltip.active(now).copied();
        let take_focus = std::mem::take(&mut self.focus_editor);
        let (editor, store, parser) = (&mut self.editor, &self.store, &self.parser);
        let mut dialog_action = None;
        let ui_output = ui.run(window, |ctx| {
            let to_screen = PlotToScreen::new(viewport, surface_size, ctx.pixels_per_point());
            axis_labels(ctx, &model, to_screen);
            if let Some((label, at)) = tooltip {
                region_tooltip(ctx, label, at, to_screen);
            }
            if let Some(action) = speed_dialog(ctx, editor, store, parser, take_focus) {
                dialog_action = Some(action);
            }
        });
        match dialog_action {
            Some(DialogAction::Commit) => self.editor.commit(),
            Some(DialogAction::Cancel) => self.editor.cancel(&self.store),
            None => {}
        }

        buffers.upload(&gpu.device, &gpu.queue, &model, viewport);

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        let bind_group = render.create_bind_group(&gpu.device, &buffers.view_buffer);
        render.draw(&mut encoder, &view, &bind_group, buffers);
        let ui_commands = ui.paint(window, gpu, &mut encoder, &view, ui_output);

        gpu.queue.submit(ui_commands.into_iter().chain(std::iter::once(encoder.finish())));
        output.present();

        self.last_model = Some(model);
        self.tick_overlay(now);
    }

    fn tick_overlay(&mut self, now: Instant) {
        let overlay = &mut self.overlay;
        overlay.fps.record_frame(now);

        if overlay.fps_report.poll(now) {
            if let Some(fps) = overlay.fps.frames_per_second() {
                log::info!("FPS = {:.2}", fps);
            }
        }
        if overlay.marquee_tick.poll(now) {
            overlay.marquee.step();
        }
        if let Some((label, _)) = overlay.tooltip.poll_expired(now) {
            log::debug!("Tooltip {} dismissed", label);
        }

        let title = self.compose_title();
        if title != self.overlay.title {
            if let Some(window) = &self.window {
                window.set_title(&title);
            }
            self.overlay.title = title;
        }
    }

    fn compose_title(&self) -> String {
        if self.overlay.marquee_tick.is_active() {
            return self.overlay.marquee.text().to_string();
        }
        STATIC_TITLE.to_string()
    }

    /// Keys egui did not take. Typing into the speed dialog never reaches here.
    fn handle_key(&mut self, key_code: KeyCode, event_loop: &ActiveEventLoop) {
        if self.editor.is_open() {
            match key_code {
                KeyCode::Enter | KeyCode::NumpadEnter => self.editor.commit(),
                KeyCode::Escape => self.editor.cancel(&self.store),
                _ => {}
            }
            return;
        }

        let now = Instant::now();
        match key_code {
            KeyCode::Escape => {
                log::info!("Escape pressed, exiting...");
                event_loop.exit();
            }
            KeyCode::Space => {
                self.clock.apply(Command::TogglePlay, now);
                log::info!("Animation {:?}", self.clock.state());
            }
            KeyCode::KeyR => {
                self.clock.apply(Command::Reverse, now);
                log::info!("Animation reversed (rate sign {})", self.clock.rate_sign());
            }
            KeyCode::Enter | KeyCode::NumpadEnter => self.open_editor(),
            _ => {}
        }
    }

    fn open_editor(&mut self) {
        self.editor.open(&self.store);
        self.focus_editor = true;
        log::info!("Editing wave speeds; Enter to finish, Escape to cancel");
    }

    fn handle_left_press(&mut self) {
        let now = Instant::now();
        let double = self
            .last_click
            .is_some_and(|prev| now.saturating_duration_since(prev) <= DOUBLE_CLICK_WINDOW);
        self.last_click = Some(now);

        if double {
            self.last_click = None;
            self.open_editor();
            return;
        }

        let (Some(point), Some(model)) = (self.cursor_in_plot(), self.last_model.as_ref()) else {
            return;
        };
        if let Some(label) = model.hit_test(point) {
            log::info!("Clicked region {}", label);
            self.overlay.tooltip.arm((label, point), TOOLTIP_TIMEOUT, now);
        }
    }

    /// Cursor position mapped from window pixels to plot coordinates
    fn cursor_in_plot(&self) -> Option<Point> {
        let cursor = self.cursor?;
        let gpu = self.gpu.as_ref()?;
        let viewport = &self.settings.viewport;
        Some(Point::new(
            cursor.x * viewport.width / gpu.config.width as f64,
            cursor.y * viewport.height / gpu.config.height as f64,
        ))
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        log::info!("Initializing Riemann wave fan...");
        log::info!("Validation mode: {:?}", self.settings.validation);
        log::info!("Wave speeds: {}", self.store.current());

        let viewport = self.settings.viewport;
        let window_attrs = Window::default_attributes()
            .with_title(STATIC_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(viewport.width, viewport.height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        log::info!("Creating GPU context...");
        let gpu = match pollster::block_on(GpuContext::new(window.clone())) {
            Ok(gpu) => gpu,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let scene_buffers = SceneBuffers::new(&gpu.device);
        let render_pipeline = RenderPipeline::new(&gpu.device, gpu.config.format);
        let ui = UiLayer::new(&window, &gpu);

        log::info!("Initialization complete!");
        log::info!("Controls:");
        log::info!("  Space: Pause/play");
        log::info!("  R: Reverse");
        log::info!("  Double click or Enter: Change wave speeds");
        log::info!("  Click a region: Show its state label");
        log::info!("  Escape: Quit");

        window.request_redraw();
        self.window = Some(window);
        self.gpu = Some(gpu);
        self.scene_buffers = Some(scene_buffers);
        self.render_pipeline = Some(render_pipeline);
        self.ui = Some(ui);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let ui_consumed = match (self.ui.as_mut(), self.window.as_ref()) {
            (Some(ui), Some(window)) => ui.on_window_event(window, &event),
            _ => false,
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. }
                if !ui_consumed && event.state.is_pressed() =>
            {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    self.handle_key(key_code, event_loop);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some(position);
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } if !ui_consumed => self.handle_left_press(),
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    log::info!("Window resized to {}x{}", new_size.width, new_size.height);
                    gpu.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render();
                // Request another frame immediately
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

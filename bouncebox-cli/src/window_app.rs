//! Windowed presentation surface
//!
//! egui owns the event loop and repaints on every input event, so the
//! bounded wait after each iteration is enforced with a deadline: repaints
//! that arrive before it only redraw the last frame. A key press ends the
//! wait early, like a blocking key poll would.

use bouncebox_core::render::{Raster, Rgb, TextOverlay};
use bouncebox_core::{
    Error, FrameCompositor, FrameSink, FrameView, InputSource, KeyCode, LoopState, Result,
    SimulationLoop, ARENA_SIZE,
};
use eframe::egui;
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

const WINDOW_TITLE: &str = "Particle Simulation";
const OVERLAY_FONT_SIZE: f32 = 18.0;

/// Open the window and drive the simulation until ESC or the window closes
pub fn run(sim: SimulationLoop) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([ARENA_SIZE, ARENA_SIZE])
            .with_resizable(false),
        ..Default::default()
    };

    let (failure_tx, failure_rx) = mpsc::channel();
    let result = eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(SimApp::new(sim, failure_tx)))),
    );
    window_outcome(result, &failure_rx)
}

/// Fold the event loop result and any failure the app reported into one
fn window_outcome(
    result: std::result::Result<(), eframe::Error>,
    failures: &mpsc::Receiver<Error>,
) -> Result<()> {
    result.map_err(|e| Error::surface(e.to_string()))?;
    match failures.try_recv() {
        Ok(err) => Err(err),
        Err(_) => Ok(()),
    }
}

/// eframe application wrapping one simulation loop
pub struct SimApp {
    sim: Option<SimulationLoop>,
    compositor: FrameCompositor,
    image: Arc<egui::ColorImage>,
    texture: Option<egui::TextureHandle>,
    overlays: Option<[TextOverlay; 2]>,
    /// End of the current iteration's input wait
    next_step_at: Instant,
    failures: mpsc::Sender<Error>,
}

impl SimApp {
    pub fn new(sim: SimulationLoop, failures: mpsc::Sender<Error>) -> Self {
        let compositor = FrameCompositor::default();
        let size = [compositor.raster().width(), compositor.raster().height()];
        Self {
            sim: Some(sim),
            compositor,
            image: Arc::new(egui::ColorImage::new(size, egui::Color32::BLACK)),
            texture: None,
            overlays: None,
            next_step_at: Instant::now(),
            failures,
        }
    }

    fn shut_down(&mut self, ctx: &egui::Context) {
        if let Some(sim) = self.sim.take() {
            sim.finish();
        }
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }

    /// Run one simulation iteration and draw its frame
    fn step_frame(&mut self, ctx: &egui::Context) {
        let Some(sim) = self.sim.as_mut() else {
            return;
        };
        let compositor = &mut self.compositor;
        let image = &mut self.image;
        let texture = &mut self.texture;
        let overlays = &mut self.overlays;
        let next_step_at = &mut self.next_step_at;

        let result = egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let mut surface = EguiSurface {
                    ui,
                    compositor,
                    image,
                    texture,
                    overlays,
                };
                let mut input = EguiInput { ctx, next_step_at };
                sim.iterate(&mut surface, &mut input)
            })
            .inner;

        match result {
            Ok(LoopState::Running) => {}
            Ok(LoopState::Terminated) => self.shut_down(ctx),
            Err(e) => {
                log::error!("presenting frame failed: {}", e);
                let _ = self.failures.send(e);
                self.shut_down(ctx);
            }
        }
    }

    /// Draw the previous frame again without touching the simulation
    fn repaint_last(&self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                if let (Some(texture), Some(overlays)) = (&self.texture, &self.overlays) {
                    paint_frame(ui, texture, overlays);
                }
            });
    }
}

impl eframe::App for SimApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.viewport().close_requested()) {
            if let Some(sim) = self.sim.take() {
                log::debug!("window closed before exit key");
                sim.finish();
            }
            return;
        }

        let now = Instant::now();
        let key = pressed_key(ctx);
        let Some(sim) = self.sim.as_mut() else {
            return;
        };

        // Keys arriving during the wait belong to the previous iteration's poll
        if sim.observe_key(key) == LoopState::Terminated {
            self.shut_down(ctx);
            return;
        }

        if !should_step(now, self.next_step_at, key.is_some()) {
            self.repaint_last(ctx);
            ctx.request_repaint_after(self.next_step_at.saturating_duration_since(now));
            return;
        }

        self.step_frame(ctx);
    }
}

/// Whether a repaint at `now` may start the next iteration
fn should_step(now: Instant, next_step_at: Instant, key_pressed: bool) -> bool {
    key_pressed || now >= next_step_at
}

/// Draws composed frames into the central panel
struct EguiSurface<'a> {
    ui: &'a egui::Ui,
    compositor: &'a mut FrameCompositor,
    image: &'a mut Arc<egui::ColorImage>,
    texture: &'a mut Option<egui::TextureHandle>,
    overlays: &'a mut Option<[TextOverlay; 2]>,
}

impl FrameSink for EguiSurface<'_> {
    fn present(&mut self, frame: &FrameView<'_>) -> Result<()> {
        let overlays = self.compositor.compose(frame);

        // Unshared again once last frame's upload was consumed
        fill_image(Arc::make_mut(&mut *self.image), self.compositor.raster());

        let image = Arc::clone(&*self.image);
        let options = egui::TextureOptions::NEAREST;
        if let Some(texture) = self.texture.as_mut() {
            texture.set(image, options);
        } else {
            *self.texture = Some(self.ui.ctx().load_texture("particles", image, options));
        }

        let texture = self
            .texture
            .as_ref()
            .ok_or_else(|| Error::surface("particle texture missing"))?;
        paint_frame(self.ui, texture, &overlays);
        *self.overlays = Some(overlays);

        Ok(())
    }
}

fn paint_frame(ui: &egui::Ui, texture: &egui::TextureHandle, overlays: &[TextOverlay]) {
    let origin = ui.max_rect().min;
    let canvas = egui::Rect::from_min_size(origin, texture.size_vec2());
    let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    let painter = ui.painter();
    painter.image(texture.id(), canvas, uv, egui::Color32::WHITE);

    for overlay in overlays {
        painter.text(
            origin + egui::vec2(overlay.pos.0, overlay.pos.1),
            egui::Align2::LEFT_BOTTOM,
            &overlay.text,
            egui::FontId::proportional(OVERLAY_FONT_SIZE),
            color32(overlay.color),
        );
    }
}

/// Copy the raster into an egui image of the same size
fn fill_image(image: &mut egui::ColorImage, raster: &Raster) {
    for (dst, &[r, g, b]) in image.pixels.iter_mut().zip(raster.pixels()) {
        *dst = egui::Color32::from_rgb(r, g, b);
    }
}

/// Starts the wait that follows each iteration
struct EguiInput<'a> {
    ctx: &'a egui::Context,
    next_step_at: &'a mut Instant,
}

impl InputSource for EguiInput<'_> {
    /// Never blocks: keys pressed during the wait reach the loop through
    /// `SimulationLoop::observe_key` on later repaints.
    fn poll_key(&mut self, wait: Duration) -> Option<KeyCode> {
        *self.next_step_at = Instant::now() + wait;
        self.ctx.request_repaint_after(wait);
        None
    }
}

/// First key pressed during this repaint
fn pressed_key(ctx: &egui::Context) -> Option<KeyCode> {
    ctx.input(|i| {
        i.events.iter().find_map(|event| match event {
            egui::Event::Key {
                key, pressed: true, ..
            } => key_code(*key),
            _ => None,
        })
    })
}

fn color32([r, g, b]: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(r, g, b)
}

/// Map an egui key to the code a console key poll would report
fn key_code(key: egui::Key) -> Option<KeyCode> {
    let code = match key {
        egui::Key::Escape => 27,
        egui::Key::Enter => 13,
        egui::Key::Space => 32,
        egui::Key::Tab => 9,
        egui::Key::Backspace => 8,
        other => {
            let mut chars = other.name().chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphanumeric() => c.to_ascii_lowercase() as u32,
                _ => return None,
            }
        }
    };
    Some(KeyCode(code))
}

//! Demo host: one container in a winit window, drawn on a headless canvas.
//!
//! The window title shows the particle count, measured fps and play state.
//! Click to toggle pause (or whatever the options' click modes do), move the
//! pointer for hover modes.
//!
//! ```text
//! RUST_LOG=flurry=debug cargo run -- options.json
//! ```

use flurry::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

const CONTAINER_ID: &str = "demo";

struct App {
    window: Option<Arc<Window>>,
    engine: Engine,
    options: Options,
    tracker: PointerTracker,
    started: Instant,
}

impl App {
    fn new(options: Options) -> Self {
        let mut engine = Engine::new();
        engine.init();
        engine.set_on_click_handler(Arc::new(log_click));

        Self {
            window: None,
            engine,
            options,
            tracker: PointerTracker::new(),
            started: Instant::now(),
        }
    }

    fn update_title(&self) {
        let (Some(window), Some(container)) = (&self.window, self.engine.dom_item(0)) else {
            return;
        };
        let state = match container.state() {
            AnimationState::Playing => "playing",
            AnimationState::Paused => "paused",
            AnimationState::Uninitialized => "idle",
            AnimationState::Destroyed => "destroyed",
        };
        window.set_title(&format!(
            "Flurry - {} particles - {:.0} fps - {}",
            container.particles().count(),
            container.fps(),
            state
        ));
    }
}

fn log_click(position: Vec2, hits: &[&Particle]) {
    if !hits.is_empty() {
        info!(x = position.x, y = position.y, hits = hits.len(), "clicked particles");
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Flurry")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                error!(error = %err, "failed to create window");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let canvas = HeadlessCanvas::new(Dimension::new(size.width as f32, size.height as f32));
        if let Err(err) = self.engine.load(CONTAINER_ID, Box::new(canvas), self.options.clone()) {
            error!(error = %err, "failed to load container");
            event_loop.exit();
            return;
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(container) = self.engine.container_mut(CONTAINER_ID) {
                    let _ = container.destroy();
                }
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let timestamp = self.started.elapsed().as_secs_f64() * 1000.0;
                self.engine.tick(timestamp);
                self.update_title();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            other => {
                let host_events = self.tracker.translate(&other);
                let Some(container) = self.engine.container_mut(CONTAINER_ID) else {
                    return;
                };
                for host_event in host_events {
                    if let Err(err) = container.handle_event(host_event) {
                        error!(error = %err, "event dropped");
                    }
                }
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();

    let options = match std::env::args().nth(1) {
        Some(path) => {
            info!(path = %path, "loading options");
            Options::load(&path)?
        }
        None => Options::default(),
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(options);
    event_loop.run_app(&mut app)?;
    Ok(())
}

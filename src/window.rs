//! Window host.
//!
//! [`App`] plugs a [`Sketch`] into winit's application lifecycle: the window
//! is created on `resumed` (setup), each `RedrawRequested` runs one frame
//! (input, physics, render), mouse events feed [`Input`] and `Resized`
//! re-fits the canvas. [`run`] owns the event loop.

use std::sync::Arc;
use std::time::{Duration, Instant};

use glam::Vec2;
use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::SketchConfig;
use crate::error::SketchError;
use crate::gpu::GpuState;
use crate::input::Input;
use crate::sketch::Sketch;

/// Logical size of the window's client area; the canvas container.
fn container_size(window: &Window) -> Vec2 {
    let logical = window.inner_size().to_logical::<f32>(window.scale_factor());
    Vec2::new(logical.width, logical.height)
}

pub struct App {
    config: SketchConfig,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    sketch: Option<Sketch>,
    input: Input,
    error: Option<SketchError>,
}

impl App {
    pub fn new(config: SketchConfig) -> Self {
        let input = Input::new(Duration::from_millis(config.double_click_ms));
        Self {
            config,
            window: None,
            gpu_state: None,
            sketch: None,
            input,
            error: None,
        }
    }

    /// The error that stopped the event loop, if any.
    pub fn take_error(&mut self) -> Option<SketchError> {
        self.error.take()
    }

    fn setup(&mut self, event_loop: &ActiveEventLoop) -> Result<(), SketchError> {
        let window_attrs = Window::default_attributes()
            .with_title("physketch")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        self.input.set_scale_factor(window.scale_factor());

        let gpu_state = pollster::block_on(GpuState::new(window.clone()))?;
        let container = container_size(&window);
        let sketch = Sketch::new(self.config.clone(), container.x, container.y)?;

        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        self.sketch = Some(sketch);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: SketchError) {
        error!("{}", err);
        self.error = Some(err);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(gpu_state), Some(sketch)) =
            (&self.window, &mut self.gpu_state, &mut self.sketch)
        else {
            return;
        };

        sketch.update(&self.input);
        self.input.begin_frame();

        let commands = sketch.render();
        match gpu_state.render(&commands, sketch.canvas(), container_size(window)) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu_state.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => warn!("Render error: {:?}", e),
        }

        window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.setup(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { ref event, .. }
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
                if let (Some(window), Some(sketch)) = (&self.window, &mut self.sketch) {
                    let container = container_size(window);
                    if let Err(e) = sketch.resize(container.x, container.y) {
                        // Minimized windows report a zero size; keep the old canvas.
                        warn!("Skipping resize: {}", e);
                    }
                }
            }
            WindowEvent::CursorMoved { .. }
            | WindowEvent::MouseInput { .. }
            | WindowEvent::ScaleFactorChanged { .. } => {
                self.input.handle_event(&event, Instant::now());
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

/// Open a window and run the sketch until it is closed.
pub fn run(config: SketchConfig) -> Result<(), SketchError> {
    config.validate()?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.take_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use super::frame::Frame;
use super::surface_renderer::SurfaceRenderer;
use crate::error::{ObserverError, Result};
use crate::traits::{RenderSurface, SurfaceStatus};

/// How long window creation may take before the display counts as unavailable
const STARTUP_TIMEOUT: Duration = Duration::from_secs(5);
const STARTUP_PUMP: Duration = Duration::from_millis(10);
/// Event wait per pump while blocking for the user to close the window
const WAIT_PUMP: Duration = Duration::from_millis(16);

/// Window dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDimensions {
    pub width: u32,
    pub height: u32,
}

impl WindowDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Window state driven by the pumped event loop
struct SurfaceApp {
    title: String,
    dimensions: WindowDimensions,
    // Renderer owns the wgpu surface and must drop before the window
    renderer: Option<SurfaceRenderer>,
    window: Option<Arc<Window>>,
    last_frame: Option<Frame>,
    startup_error: Option<ObserverError>,
    closed: bool,
}

impl SurfaceApp {
    fn new(title: &str, dimensions: WindowDimensions) -> Self {
        Self {
            title: title.to_string(),
            dimensions,
            renderer: None,
            window: None,
            last_frame: None,
            startup_error: None,
            closed: false,
        }
    }

    fn close_window(&mut self) {
        if self.closed {
            return;
        }
        log::info!("window '{}' closed by user", self.title);
        self.renderer = None;
        self.window = None;
        self.closed = true;
    }

    fn redraw(&mut self) {
        if let (Some(renderer), Some(frame)) = (&mut self.renderer, &self.last_frame) {
            if let Err(e) = renderer.render(frame) {
                log::warn!("redraw of '{}' failed: {}", self.title, e);
            }
        }
    }
}

impl ApplicationHandler for SurfaceApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.closed {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(PhysicalSize::new(self.dimensions.width, self.dimensions.height));

        let window = match event_loop.create_window(attributes) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.startup_error = Some(ObserverError::unavailable(format!("failed to create window: {}", e)));
                return;
            }
        };

        match SurfaceRenderer::new(window.clone()) {
            Ok(renderer) => {
                self.renderer = Some(renderer);
                self.window = Some(window);
            }
            Err(e) => self.startup_error = Some(e),
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => self.close_window(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }
}

/// On-screen surface: a winit window pumped cooperatively from the caller's thread
///
/// winit allows a single event loop per process, so only one window surface
/// can exist at a time.
pub struct WindowSurface {
    app: SurfaceApp,
    event_loop: EventLoop<()>,
    warned_closed: bool,
}

impl WindowSurface {
    /// Open a window and wait until it can present frames
    pub fn open(dimensions: WindowDimensions, title: &str) -> Result<Self> {
        let mut event_loop = EventLoop::new()
            .map_err(|e| ObserverError::unavailable(format!("no event loop: {}", e)))?;
        let mut app = SurfaceApp::new(title, dimensions);

        let deadline = Instant::now() + STARTUP_TIMEOUT;
        while app.window.is_none() {
            if let PumpStatus::Exit(code) = event_loop.pump_app_events(Some(STARTUP_PUMP), &mut app) {
                return Err(ObserverError::unavailable(format!(
                    "event loop exited during startup with code {}",
                    code
                )));
            }
            if let Some(err) = app.startup_error.take() {
                return Err(err);
            }
            if Instant::now() > deadline {
                return Err(ObserverError::unavailable("window was not created in time"));
            }
        }

        log::info!("opened window '{}' ({}x{})", title, dimensions.width, dimensions.height);
        Ok(Self {
            app,
            event_loop,
            warned_closed: false,
        })
    }

    fn pump(&mut self, timeout: Duration) -> SurfaceStatus {
        if let PumpStatus::Exit(_) = self.event_loop.pump_app_events(Some(timeout), &mut self.app) {
            self.app.close_window();
        }
        if self.app.closed {
            SurfaceStatus::Closed
        } else {
            SurfaceStatus::Open
        }
    }
}

impl RenderSurface for WindowSurface {
    fn dimensions(&self) -> WindowDimensions {
        self.app
            .window
            .as_ref()
            .map(|w| {
                let size = w.inner_size();
                WindowDimensions::new(size.width, size.height)
            })
            .unwrap_or(self.app.dimensions)
    }

    fn present(&mut self, frame: &Frame) -> Result<()> {
        let Some(renderer) = self.app.renderer.as_mut() else {
            if !self.warned_closed {
                log::warn!("window '{}' is closed; frames are no longer displayed", self.app.title);
                self.warned_closed = true;
            }
            return Ok(());
        };

        renderer.render(frame)?;
        self.app.last_frame = Some(frame.clone());
        Ok(())
    }

    fn poll_events(&mut self, timeout: Duration) -> Result<SurfaceStatus> {
        Ok(self.pump(timeout))
    }

    fn wait_until_closed(&mut self) -> Result<()> {
        log::info!("waiting for window '{}' to be closed", self.app.title);
        while self.pump(WAIT_PUMP).is_open() {}
        Ok(())
    }
}

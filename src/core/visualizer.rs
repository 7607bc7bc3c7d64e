use std::path::Path;
use std::time::Duration;

use super::frame::Frame;
use super::scene::{GeometryId, PointGeometry, PointScene, RenderOption};
use super::view_control::ViewControl;
use super::window::WindowDimensions;
use crate::error::{ObserverError, Result};
use crate::traits::{RenderSurface, SurfaceStatus};

/// Point scene bound to a render surface
///
/// The visualizer owns the surface for its whole life; `destroy_window`
/// releases it exactly once, after which rendering calls fail with `Closed`.
pub struct Visualizer<S: RenderSurface> {
    surface: Option<S>,
    scene: PointScene,
    last_frame: Option<Frame>,
}

impl<S: RenderSurface> Visualizer<S> {
    /// Open a surface through `opener`; its error is passed through untouched
    pub fn create<F>(dimensions: WindowDimensions, title: &str, opener: F) -> Result<Self>
    where
        F: FnOnce(WindowDimensions, &str) -> Result<S>,
    {
        let surface = opener(dimensions, title)?;
        Ok(Self {
            surface: Some(surface),
            scene: PointScene::new(),
            last_frame: None,
        })
    }

    pub fn add_geometry(&mut self, geometry: PointGeometry) -> GeometryId {
        self.scene.add_geometry(geometry)
    }

    pub fn geometry(&self, id: GeometryId) -> Result<&PointGeometry> {
        self.scene.geometry(id)
    }

    pub fn geometry_mut(&mut self, id: GeometryId) -> Result<&mut PointGeometry> {
        self.scene.geometry_mut(id)
    }

    /// Mark a geometry's positions as changed; the next render picks them up
    pub fn update_geometry(&mut self, id: GeometryId) -> Result<()> {
        self.scene.geometry(id).map(|_| ())
    }

    pub fn view_control_mut(&mut self) -> &mut ViewControl {
        self.scene.view_control_mut()
    }

    pub fn view_control(&self) -> &ViewControl {
        self.scene.view_control()
    }

    pub fn render_option_mut(&mut self) -> &mut RenderOption {
        self.scene.render_option_mut()
    }

    pub fn scene(&self) -> &PointScene {
        &self.scene
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.surface.is_some()
    }

    fn surface_mut(&mut self) -> Result<&mut S> {
        self.surface.as_mut().ok_or(ObserverError::Closed)
    }

    /// Drain pending window events without blocking
    pub fn poll_events(&mut self) -> Result<SurfaceStatus> {
        self.surface_mut()?.poll_events(Duration::ZERO)
    }

    /// Re-render the scene and present it
    pub fn update_renderer(&mut self) -> Result<()> {
        let surface = self.surface.as_mut().ok_or(ObserverError::Closed)?;
        let frame = self.scene.render(surface.dimensions())?;
        surface.present(&frame)?;
        self.last_frame = Some(frame);
        Ok(())
    }

    /// Write the on-screen image to `path`, optionally re-rendering first
    pub fn capture_screen_image(&mut self, path: &Path, do_render: bool) -> Result<()> {
        if do_render || self.last_frame.is_none() {
            self.update_renderer()?;
        }
        let frame = self
            .last_frame
            .as_ref()
            .ok_or_else(|| ObserverError::render("nothing has been rendered yet"))?;
        frame.save(path)?;
        log::debug!("captured {}", path.display());
        Ok(())
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    /// Block until the user closes the window
    pub fn run(&mut self) -> Result<()> {
        self.surface_mut()?.wait_until_closed()
    }

    /// Release the surface; returns false when it was already released
    pub fn destroy_window(&mut self) -> bool {
        self.surface.take().is_some()
    }
}

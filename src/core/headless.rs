use std::time::Duration;

use super::frame::Frame;
use super::window::WindowDimensions;
use crate::error::Result;
use crate::traits::{RenderSurface, SurfaceStatus};

/// Offscreen surface - keeps the last presented frame, never blocks
///
/// Used for batch runs without a display and for frame capture only.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    dimensions: WindowDimensions,
    presented: u64,
    last_frame: Option<Frame>,
}

impl HeadlessSurface {
    pub fn new(dimensions: WindowDimensions) -> Self {
        Self {
            dimensions,
            presented: 0,
            last_frame: None,
        }
    }

    /// Number of frames presented so far
    pub fn presented(&self) -> u64 {
        self.presented
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }
}

impl RenderSurface for HeadlessSurface {
    fn dimensions(&self) -> WindowDimensions {
        self.dimensions
    }

    fn present(&mut self, frame: &Frame) -> Result<()> {
        self.presented += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }

    fn poll_events(&mut self, _timeout: Duration) -> Result<SurfaceStatus> {
        Ok(SurfaceStatus::Open)
    }

    /// Nothing on screen for a user to close
    fn wait_until_closed(&mut self) -> Result<()> {
        log::debug!("headless surface has no window to wait on");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_last_frame() {
        let mut surface = HeadlessSurface::new(WindowDimensions::new(2, 1));
        let first = Frame::from_rgba(2, 1, vec![0; 8]).unwrap();
        let second = Frame::from_rgba(2, 1, vec![255; 8]).unwrap();

        surface.present(&first).unwrap();
        surface.present(&second).unwrap();

        assert_eq!(surface.presented(), 2);
        assert_eq!(surface.last_frame(), Some(&second));
        assert_eq!(surface.poll_events(Duration::ZERO).unwrap(), SurfaceStatus::Open);
    }
}

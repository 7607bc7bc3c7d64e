use std::time::Duration;

use crate::core::{Frame, WindowDimensions};
use crate::error::Result;

/// Whether the surface is still showing frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceStatus {
    Open,
    /// The user closed the window; frames are no longer displayed
    Closed,
}

impl SurfaceStatus {
    pub fn is_open(self) -> bool {
        self == SurfaceStatus::Open
    }
}

/// Render surface an observer draws into
///
/// Resources are released when the surface is dropped. Observers hold the
/// surface in an `Option` and take it out exactly once on teardown.
pub trait RenderSurface {
    /// Surface size in physical pixels
    fn dimensions(&self) -> WindowDimensions;

    /// Display a finished frame
    fn present(&mut self, frame: &Frame) -> Result<()>;

    /// Drain pending window events, waiting at most `timeout`
    fn poll_events(&mut self, timeout: Duration) -> Result<SurfaceStatus>;

    /// Block until the user closes the surface
    fn wait_until_closed(&mut self) -> Result<()>;
}

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use registration_viewer::{Frame, ObserverError, RenderSurface, Result, SurfaceStatus, WindowDimensions};

/// Everything a mock surface was asked to do, shared with the test body
#[derive(Debug, Default)]
pub struct SurfaceLog {
    pub opened: u32,
    pub title: String,
    pub dimensions: Option<WindowDimensions>,
    pub presented: Vec<Frame>,
    pub polls: u32,
    pub waits: u32,
    pub dropped: u32,
    /// Report the window as closed by the user
    pub user_closed: bool,
    pub fail_present: bool,
    pub fail_wait: bool,
}

pub type SharedLog = Rc<RefCell<SurfaceLog>>;

/// Render surface recording calls instead of drawing
pub struct MockSurface {
    log: SharedLog,
    dimensions: WindowDimensions,
}

impl RenderSurface for MockSurface {
    fn dimensions(&self) -> WindowDimensions {
        self.dimensions
    }

    fn present(&mut self, frame: &Frame) -> Result<()> {
        let mut log = self.log.borrow_mut();
        if log.fail_present {
            return Err(ObserverError::Render("mock present failure".to_string()));
        }
        log.presented.push(frame.clone());
        Ok(())
    }

    fn poll_events(&mut self, _timeout: Duration) -> Result<SurfaceStatus> {
        let mut log = self.log.borrow_mut();
        log.polls += 1;
        Ok(if log.user_closed {
            SurfaceStatus::Closed
        } else {
            SurfaceStatus::Open
        })
    }

    fn wait_until_closed(&mut self) -> Result<()> {
        let mut log = self.log.borrow_mut();
        log.waits += 1;
        if log.fail_wait {
            return Err(ObserverError::Render("mock wait failure".to_string()));
        }
        Ok(())
    }
}

impl Drop for MockSurface {
    fn drop(&mut self) {
        self.log.borrow_mut().dropped += 1;
    }
}

pub fn new_log() -> SharedLog {
    Rc::new(RefCell::new(SurfaceLog::default()))
}

/// Opener handing out a mock surface tied to `log`
pub fn mock_opener(log: &SharedLog) -> impl FnOnce(WindowDimensions, &str) -> Result<MockSurface> {
    let log = log.clone();
    move |dimensions, title| {
        {
            let mut entry = log.borrow_mut();
            entry.opened += 1;
            entry.title = title.to_string();
            entry.dimensions = Some(dimensions);
        }
        Ok(MockSurface { log, dimensions })
    }
}

/// Opener that fails the way a machine without a display does
pub fn unavailable_opener(log: &SharedLog) -> impl FnOnce(WindowDimensions, &str) -> Result<MockSurface> {
    let log = log.clone();
    move |_, _| {
        log.borrow_mut().opened += 1;
        Err(ObserverError::RendererUnavailable("no display".to_string()))
    }
}

/// Number of `image_*` files with `extension` in `dir`
pub fn count_frames(dir: &std::path::Path, extension: &str) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .filter(|e| {
                    let name = e.file_name().to_string_lossy().into_owned();
                    name.starts_with("image_") && name.ends_with(extension)
                })
                .count()
        })
        .unwrap_or(0)
}

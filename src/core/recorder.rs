use std::fs;
use std::path::{Path, PathBuf};

use super::frame::Frame;
use crate::error::{ObserverError, Result};

/// File name prefix shared by every persisted frame
pub const FRAME_PREFIX: &str = "image_";

/// Encoded format of persisted frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFormat {
    Png,
    Jpeg,
}

impl FrameFormat {
    pub fn extension(self) -> &'static str {
        match self {
            FrameFormat::Png => "png",
            FrameFormat::Jpeg => "jpg",
        }
    }
}

/// Writes frames as `image_NNNN.<ext>` into one directory
///
/// Existing files with the same index are overwritten; cleaning the
/// directory between runs is up to the caller.
#[derive(Debug, Clone)]
pub struct FrameRecorder {
    dir: PathBuf,
    format: FrameFormat,
}

impl FrameRecorder {
    pub fn new(dir: impl Into<PathBuf>, format: FrameFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn format(&self) -> FrameFormat {
        self.format
    }

    /// File name for a frame index, zero-padded to four digits
    pub fn file_name(&self, index: u64) -> String {
        format!("{}{:04}.{}", FRAME_PREFIX, index, self.format.extension())
    }

    pub fn path_for(&self, index: u64) -> PathBuf {
        self.dir.join(self.file_name(index))
    }

    /// Create the frame directory if it does not exist yet
    pub fn ensure_dir(&self) -> Result<()> {
        if !self.dir.as_os_str().is_empty() {
            fs::create_dir_all(&self.dir).map_err(|e| ObserverError::io(&self.dir, e))?;
        }
        Ok(())
    }

    /// Persist `frame` under `index`, creating the directory on first use
    pub fn save(&self, frame: &Frame, index: u64) -> Result<PathBuf> {
        self.ensure_dir()?;

        let path = self.path_for(index);
        frame.save(&path)?;
        log::debug!("saved frame {} to {}", index, path.display());
        Ok(path)
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::WindowDimensions;
use crate::error::{ObserverError, Result};

/// Largest accepted window edge, matching wgpu's default 2D texture limit
pub const MAX_WINDOW_EXTENT: u32 = 8192;

/// Observer settings, loadable from JSON; every field has a default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverOptions {
    /// Persist every refreshed frame as `image_NNNN.<ext>`
    pub save_frames: bool,
    /// Block in `close` until the user closes the window (3D only)
    pub keep_window_open: bool,
    /// Field-of-view change in 5 degree steps, followed by the camera preset (3D only)
    pub field_of_view: Option<f32>,
    pub frame_dir: PathBuf,
    /// Splat size in pixels (3D only)
    pub point_size: f32,
    /// Event pump after each 2D refresh
    pub refresh_pause_ms: u64,
    /// `[width, height]`; None picks the per-observer default
    pub window_size: Option<[u32; 2]>,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            save_frames: false,
            keep_window_open: true,
            field_of_view: None,
            frame_dir: PathBuf::from("."),
            point_size: 1.0,
            refresh_pause_ms: 1,
            window_size: None,
        }
    }
}

impl ObserverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| ObserverError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json_str(&text).map_err(|e| match e {
            ObserverError::Config(msg) => ObserverError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(text).map_err(|e| ObserverError::Config(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.point_size.is_finite() && self.point_size > 0.0) {
            return Err(ObserverError::Config(format!(
                "point_size must be positive, got {}",
                self.point_size
            )));
        }
        if let Some(fov) = self.field_of_view {
            if !fov.is_finite() {
                return Err(ObserverError::Config("field_of_view must be finite".to_string()));
            }
        }
        if let Some([w, h]) = self.window_size {
            if w == 0 || h == 0 {
                return Err(ObserverError::Config(format!("window_size must be non-zero, got {}x{}", w, h)));
            }
            if w > MAX_WINDOW_EXTENT || h > MAX_WINDOW_EXTENT {
                return Err(ObserverError::Config(format!(
                    "window_size {}x{} exceeds {} pixels per edge",
                    w, h, MAX_WINDOW_EXTENT
                )));
            }
        }
        Ok(())
    }

    pub fn save_frames(mut self, save: bool) -> Self {
        self.save_frames = save;
        self
    }

    pub fn keep_window_open(mut self, keep: bool) -> Self {
        self.keep_window_open = keep;
        self
    }

    pub fn field_of_view(mut self, step: f32) -> Self {
        self.field_of_view = Some(step);
        self
    }

    pub fn frame_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.frame_dir = dir.into();
        self
    }

    pub fn point_size(mut self, size: f32) -> Self {
        self.point_size = size;
        self
    }

    pub fn refresh_pause_ms(mut self, ms: u64) -> Self {
        self.refresh_pause_ms = ms;
        self
    }

    pub fn window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = Some([width, height]);
        self
    }

    /// Configured window size, or `default` when unset
    pub fn dimensions_or(&self, default: WindowDimensions) -> WindowDimensions {
        self.window_size
            .map(|[w, h]| WindowDimensions::new(w, h))
            .unwrap_or(default)
    }
}

// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::error::Result;
use crate::options::ObserverOptions;

/// Which observer the demo drives
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// 2D figure with source, target and result series
    Plane,
    /// 3D point cloud scene
    Scene,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "registration-viewer")]
#[command(about = "Watch a point cloud registration converge", long_about = None)]
pub struct Cli {
    #[arg(long, value_enum, default_value_t = Mode::Plane)]
    pub mode: Mode,

    /// Number of registration iterations to run
    #[arg(long, default_value_t = 30)]
    pub iterations: usize,

    /// Points per synthetic cloud
    #[arg(long, default_value_t = 200)]
    pub points: usize,

    /// Write every frame as image_NNNN.png / .jpg
    #[arg(long)]
    pub save_frames: bool,

    /// Return as soon as the last iteration is drawn (3D)
    #[arg(long = "no-keep-window")]
    pub no_keep_window: bool,

    /// Field-of-view change in 5 degree steps; applies the camera preset (3D)
    #[arg(long, allow_hyphen_values = true)]
    pub fov: Option<f32>,

    /// Directory for saved frames
    #[arg(long)]
    pub frame_dir: Option<PathBuf>,

    /// Put frames in a run-YYYYmmdd-HHMMSS subdirectory of the frame dir
    #[arg(long)]
    pub timestamped: bool,

    /// JSON options file; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Render without opening a window
    #[arg(long)]
    pub headless: bool,
}

impl Cli {
    /// Options from the config file (if any) with command-line overrides applied
    pub fn observer_options(&self) -> Result<ObserverOptions> {
        let mut options = match &self.config {
            Some(path) => ObserverOptions::from_json_file(path)?,
            None => ObserverOptions::default(),
        };

        if self.save_frames {
            options.save_frames = true;
        }
        if self.no_keep_window {
            options.keep_window_open = false;
        }
        if let Some(step) = self.fov {
            options.field_of_view = Some(step);
        }
        if let Some(dir) = &self.frame_dir {
            options.frame_dir = dir.clone();
        }
        if self.timestamped {
            let stamp = chrono::Local::now().format("run-%Y%m%d-%H%M%S");
            options.frame_dir = options.frame_dir.join(stamp.to_string());
        }

        options.validate()?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_plane_mode() {
        let cli = Cli::try_parse_from(["registration-viewer"]).unwrap();
        assert_eq!(cli.mode, Mode::Plane);
        assert_eq!(cli.iterations, 30);
        assert_eq!(cli.observer_options().unwrap(), ObserverOptions::default());
    }

    #[test]
    fn flags_override_options() {
        let cli = Cli::try_parse_from([
            "registration-viewer",
            "--mode",
            "scene",
            "--save-frames",
            "--no-keep-window",
            "--fov",
            "-2",
            "--frame-dir",
            "out",
        ])
        .unwrap();
        let options = cli.observer_options().unwrap();

        assert_eq!(cli.mode, Mode::Scene);
        assert!(options.save_frames);
        assert!(!options.keep_window_open);
        assert_eq!(options.field_of_view, Some(-2.0));
        assert_eq!(options.frame_dir, PathBuf::from("out"));
    }

    #[test]
    fn timestamped_frames_get_a_run_directory() {
        let cli = Cli::try_parse_from(["registration-viewer", "--frame-dir", "out", "--timestamped"]).unwrap();
        let dir = cli.observer_options().unwrap().frame_dir;

        assert!(dir.starts_with("out"));
        let name = dir.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("run-"));
        assert_eq!(name.len(), "run-YYYYmmdd-HHMMSS".len());
    }
}

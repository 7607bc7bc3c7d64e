use std::mem;

use glam::Vec3;

use crate::core::{
    FrameFormat, FrameRecorder, GeometryId, HeadlessSurface, PointGeometry, PointSet, Visualizer, WindowDimensions,
    WindowSurface,
};
use crate::error::{ObserverError, Result};
use crate::options::ObserverOptions;
use crate::traits::{IterationObserver, RenderSurface, Transformation};

pub const DEFAULT_WINDOW_SIZE: WindowDimensions = WindowDimensions {
    width: 1024,
    height: 768,
};
pub const WINDOW_TITLE: &str = "Registration progress (3D)";

pub const SOURCE_COLOR: Vec3 = Vec3::new(0.9, 0.1, 0.1);
pub const TARGET_COLOR: Vec3 = Vec3::new(0.1, 0.9, 0.1);
pub const RESULT_COLOR: Vec3 = Vec3::new(0.1, 0.1, 0.9);

// Camera pose applied whenever a field of view is configured
pub const PRESET_FRONT: Vec3 = Vec3::new(0.716_113_99, -0.552_506_78, 0.426_517_3);
pub const PRESET_LOOKAT: Vec3 = Vec3::new(0.898_383_2, 1.999_221_7, 1.457_288);
pub const PRESET_UP: Vec3 = Vec3::new(-0.312_938_84, 0.292_062_1, 0.903_752_7);
pub const PRESET_ZOOM: f32 = 0.72;

/// Keeps source, target and result geometries on a persistent 3D surface
///
/// Positions of the result geometry are rewritten in place each iteration;
/// the camera stays wherever it was set at construction.
pub struct SceneObserver<'a, S: RenderSurface> {
    source: &'a PointSet<Vec3>,
    target: &'a PointSet<Vec3>,
    result: PointSet<Vec3>,
    scratch: PointSet<Vec3>,
    visualizer: Visualizer<S>,
    geometry_ids: [GeometryId; 3],
    recorder: Option<FrameRecorder>,
    keep_window_open: bool,
    frame_count: u64,
}

impl<'a> SceneObserver<'a, WindowSurface> {
    /// Observer drawing into an on-screen window
    pub fn windowed(
        source: &'a PointSet<Vec3>,
        target: &'a PointSet<Vec3>,
        options: &ObserverOptions,
    ) -> Result<Self> {
        Self::with_surface(source, target, options, WindowSurface::open)
    }
}

impl<'a> SceneObserver<'a, HeadlessSurface> {
    /// Observer without a display; frames are still rendered and captured
    pub fn headless(
        source: &'a PointSet<Vec3>,
        target: &'a PointSet<Vec3>,
        options: &ObserverOptions,
    ) -> Result<Self> {
        Self::with_surface(source, target, options, |dims, _| Ok(HeadlessSurface::new(dims)))
    }
}

impl<'a, S: RenderSurface> SceneObserver<'a, S> {
    /// Validate the inputs, open a surface through `opener`, register the
    /// three geometries and draw the initial state
    ///
    /// Invalid inputs are rejected, and the frame directory created, before `opener` runs.
    pub fn with_surface<F>(
        source: &'a PointSet<Vec3>,
        target: &'a PointSet<Vec3>,
        options: &ObserverOptions,
        opener: F,
    ) -> Result<Self>
    where
        F: FnOnce(WindowDimensions, &str) -> Result<S>,
    {
        source.validate("source")?;
        target.validate("target")?;
        options.validate()?;

        let recorder = if options.save_frames {
            let recorder = FrameRecorder::new(&options.frame_dir, FrameFormat::Jpeg);
            recorder.ensure_dir()?;
            Some(recorder)
        } else {
            None
        };

        let mut visualizer = Visualizer::create(options.dimensions_or(DEFAULT_WINDOW_SIZE), WINDOW_TITLE, opener)?;

        let mut source_geometry = PointGeometry::new(source);
        source_geometry.paint_uniform_color(SOURCE_COLOR);
        let mut target_geometry = PointGeometry::new(target);
        target_geometry.paint_uniform_color(TARGET_COLOR);
        let mut result_geometry = PointGeometry::new(source);
        result_geometry.paint_uniform_color(RESULT_COLOR);

        visualizer.render_option_mut().point_size = options.point_size;
        let geometry_ids = [
            visualizer.add_geometry(source_geometry),
            visualizer.add_geometry(target_geometry),
            visualizer.add_geometry(result_geometry),
        ];

        if let Some(step) = options.field_of_view {
            let view = visualizer.view_control_mut();
            view.change_field_of_view(step);
            view.set_front(PRESET_FRONT);
            view.set_lookat(PRESET_LOOKAT);
            view.set_up(PRESET_UP);
            view.set_zoom(PRESET_ZOOM);
            log::debug!("camera preset applied at {} degrees", view.field_of_view());
        }

        // On failure the visualizer drops here and releases the surface
        visualizer.update_renderer()?;

        log::info!(
            "scene observer ready: {} source / {} target points",
            source.len(),
            target.len()
        );
        Ok(Self {
            source,
            target,
            result: source.clone(),
            scratch: PointSet::new(Vec::with_capacity(source.len())),
            visualizer,
            geometry_ids,
            recorder,
            keep_window_open: options.keep_window_open,
            frame_count: 0,
        })
    }

    pub fn source(&self) -> &PointSet<Vec3> {
        self.source
    }

    pub fn target(&self) -> &PointSet<Vec3> {
        self.target
    }

    pub fn visualizer(&self) -> &Visualizer<S> {
        &self.visualizer
    }

    pub fn recorder(&self) -> Option<&FrameRecorder> {
        self.recorder.as_ref()
    }

    /// Release the surface, first waiting for the user to close it when
    /// `block_until_user_closes` is set
    ///
    /// The surface is released even when waiting fails. Later calls are no-ops.
    pub fn close_with(&mut self, block_until_user_closes: bool) -> Result<()> {
        if !self.visualizer.is_active() {
            return Ok(());
        }

        let waited = if block_until_user_closes {
            self.visualizer.run()
        } else {
            Ok(())
        };
        self.visualizer.destroy_window();
        log::info!("scene observer closed after {} iterations", self.frame_count);
        waited
    }
}

impl<S: RenderSurface> IterationObserver<Vec3> for SceneObserver<'_, S> {
    fn on_iteration(&mut self, transformation: &dyn Transformation<Vec3>) -> Result<()> {
        if !self.visualizer.is_active() {
            return Err(ObserverError::Closed);
        }

        transformation.apply_into(self.source, &mut self.scratch);
        if self.scratch.len() != self.source.len() {
            return Err(ObserverError::PointCountMismatch {
                expected: self.source.len(),
                actual: self.scratch.len(),
            });
        }
        mem::swap(&mut self.result, &mut self.scratch);

        let [_, _, result_id] = self.geometry_ids;
        self.visualizer
            .geometry_mut(result_id)?
            .points_mut()
            .assign_from(self.result.points());
        for id in self.geometry_ids {
            self.visualizer.update_geometry(id)?;
        }

        if !self.visualizer.poll_events()?.is_open() {
            log::debug!("scene observer window closed; continuing without display");
        }
        self.visualizer.update_renderer()?;

        if let Some(recorder) = &self.recorder {
            self.visualizer
                .capture_screen_image(&recorder.path_for(self.frame_count), true)?;
        }

        self.frame_count += 1;
        Ok(())
    }

    fn result(&self) -> &PointSet<Vec3> {
        &self.result
    }

    fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Close with the configured `keep_window_open` behavior
    fn close(&mut self) -> Result<()> {
        self.close_with(self.keep_window_open)
    }

    fn is_closed(&self) -> bool {
        !self.visualizer.is_active()
    }
}

impl<S: RenderSurface> Drop for SceneObserver<'_, S> {
    fn drop(&mut self) {
        if self.visualizer.destroy_window() {
            log::warn!("scene observer dropped without close; released surface without waiting");
        }
    }
}

use std::mem;
use std::time::Duration;

use glam::Vec2;

use crate::core::{
    Figure, Frame, FrameFormat, FrameRecorder, HeadlessSurface, Marker, PointSet, SeriesStyle, WindowDimensions,
    WindowSurface,
};
use crate::error::{ObserverError, Result};
use crate::options::ObserverOptions;
use crate::traits::{IterationObserver, RenderSurface, Transformation};

pub const DEFAULT_FIGURE_SIZE: WindowDimensions = WindowDimensions {
    width: 640,
    height: 480,
};
pub const WINDOW_TITLE: &str = "Registration progress (2D)";

pub const SOURCE_LABEL: &str = "source";
pub const TARGET_LABEL: &str = "target";
pub const RESULT_LABEL: &str = "result";

pub const SOURCE_STYLE: SeriesStyle = SeriesStyle::new([255, 0, 0], Marker::Circle, 3);
pub const TARGET_STYLE: SeriesStyle = SeriesStyle::new([0, 128, 0], Marker::Triangle, 4);
pub const RESULT_STYLE: SeriesStyle = SeriesStyle::new([0, 0, 255], Marker::Circle, 3);

/// Redraws source, target and result on a 2D figure after every iteration
///
/// Each observer owns its figure, so several can run side by side without
/// sharing axis or legend state.
pub struct PlaneObserver<'a, S: RenderSurface> {
    source: &'a PointSet<Vec2>,
    target: &'a PointSet<Vec2>,
    result: PointSet<Vec2>,
    scratch: PointSet<Vec2>,
    figure: Figure,
    surface: Option<S>,
    recorder: Option<FrameRecorder>,
    refresh_pause: Duration,
    frame_count: u64,
    last_frame: Option<Frame>,
}

impl<'a> PlaneObserver<'a, WindowSurface> {
    /// Observer drawing into an on-screen window
    pub fn windowed(
        source: &'a PointSet<Vec2>,
        target: &'a PointSet<Vec2>,
        options: &ObserverOptions,
    ) -> Result<Self> {
        Self::with_surface(source, target, options, WindowSurface::open)
    }
}

impl<'a> PlaneObserver<'a, HeadlessSurface> {
    /// Observer without a display; frames are still rendered and saved
    pub fn headless(
        source: &'a PointSet<Vec2>,
        target: &'a PointSet<Vec2>,
        options: &ObserverOptions,
    ) -> Result<Self> {
        Self::with_surface(source, target, options, |dims, _| Ok(HeadlessSurface::new(dims)))
    }
}

impl<'a, S: RenderSurface> PlaneObserver<'a, S> {
    /// Validate the inputs, open a surface through `opener` and draw the initial state
    ///
    /// Invalid inputs are rejected, and the frame directory created, before `opener` runs.
    pub fn with_surface<F>(
        source: &'a PointSet<Vec2>,
        target: &'a PointSet<Vec2>,
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
            let recorder = FrameRecorder::new(&options.frame_dir, FrameFormat::Png);
            recorder.ensure_dir()?;
            Some(recorder)
        } else {
            None
        };

        let dimensions = options.dimensions_or(DEFAULT_FIGURE_SIZE);
        let surface = opener(dimensions, WINDOW_TITLE)?;

        let mut observer = Self {
            source,
            target,
            result: source.clone(),
            scratch: PointSet::new(Vec::with_capacity(source.len())),
            figure: Figure::new(dimensions.width, dimensions.height),
            surface: Some(surface),
            recorder,
            refresh_pause: Duration::from_millis(options.refresh_pause_ms),
            frame_count: 0,
            last_frame: None,
        };
        observer.refresh(None)?;

        log::info!(
            "plane observer ready: {} source / {} target points",
            source.len(),
            target.len()
        );
        Ok(observer)
    }

    pub fn source(&self) -> &PointSet<Vec2> {
        self.source
    }

    pub fn target(&self) -> &PointSet<Vec2> {
        self.target
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Frame shown by the latest refresh
    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    pub fn recorder(&self) -> Option<&FrameRecorder> {
        self.recorder.as_ref()
    }

    /// Redraw all three sets; the frame is saved under `save_index` before it is shown
    fn refresh(&mut self, save_index: Option<u64>) -> Result<()> {
        let surface = self.surface.as_mut().ok_or(ObserverError::Closed)?;

        // Clearing drops the axis mode and the legend too
        self.figure.clear();
        self.figure.set_axis_equal();
        self.figure.plot(self.source, SOURCE_LABEL, SOURCE_STYLE);
        self.figure.plot(self.target, TARGET_LABEL, TARGET_STYLE);
        self.figure.plot(&self.result, RESULT_LABEL, RESULT_STYLE);
        self.figure.legend();

        let frame = self.figure.rasterize()?;

        if let (Some(recorder), Some(index)) = (&self.recorder, save_index) {
            recorder.save(&frame, index)?;
        }

        surface.present(&frame)?;
        if !surface.poll_events(self.refresh_pause)?.is_open() {
            log::debug!("plane observer window closed; continuing without display");
        }

        self.last_frame = Some(frame);
        Ok(())
    }
}

impl<S: RenderSurface> IterationObserver<Vec2> for PlaneObserver<'_, S> {
    fn on_iteration(&mut self, transformation: &dyn Transformation<Vec2>) -> Result<()> {
        if self.surface.is_none() {
            return Err(ObserverError::Closed);
        }

        transformation.apply_into(self.source, &mut self.scratch);
        if self.scratch.len() != self.source.len() {
            return Err(ObserverError::PointCountMismatch {
                expected: self.source.len(),
                actual: self.scratch.len(),
            });
        }
        // A diverged estimate cannot be laid out on axes; keep the last drawable one
        self.scratch.validate("result")?;
        mem::swap(&mut self.result, &mut self.scratch);

        self.refresh(Some(self.frame_count))?;
        self.frame_count += 1;
        Ok(())
    }

    fn result(&self) -> &PointSet<Vec2> {
        &self.result
    }

    fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn close(&mut self) -> Result<()> {
        if self.surface.take().is_some() {
            log::info!("plane observer closed after {} iterations", self.frame_count);
        }
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.surface.is_none()
    }
}

impl<S: RenderSurface> Drop for PlaneObserver<'_, S> {
    fn drop(&mut self) {
        if self.surface.take().is_some() {
            log::warn!("plane observer dropped without close; releasing surface");
        }
    }
}

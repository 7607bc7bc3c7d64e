use std::ops::Range;

use glam::Vec2;
use plotters::prelude::*;

use super::fonts;
use super::frame::Frame;
use super::host::HostPoints;
use crate::error::{ObserverError, Result};

const MARGIN: u32 = 15;
const X_LABEL_AREA: u32 = 30;
const Y_LABEL_AREA: u32 = 45;
/// Fraction of the data span added on each side of the view
const DATA_MARGIN: f32 = 0.05;
/// View ranges are kept inside +/- this coordinate so axis ticks stay computable
pub const MAX_VIEW_COORD: f32 = 1.0e20;
/// Smallest view span relative to the distance of its center from the origin
const MIN_RELATIVE_SPAN: f32 = 1.0e-4;

/// Point marker shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Triangle,
}

/// Color, marker and marker size of one series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesStyle {
    pub color: [u8; 3],
    pub marker: Marker,
    /// Marker radius in pixels
    pub size: u32,
}

impl SeriesStyle {
    pub const fn new(color: [u8; 3], marker: Marker, size: u32) -> Self {
        Self { color, marker, size }
    }
}

/// Labelled set of points drawn with one style
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub style: SeriesStyle,
    pub points: Vec<Vec2>,
}

/// Axis scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisMode {
    /// Each axis fits its own data span
    #[default]
    Auto,
    /// One data unit covers the same number of pixels on both axes
    Equal,
}

/// Single set of axes owned by one observer
///
/// Mirrors the clear / configure / plot / legend cycle of an interactive
/// plotting library. `clear` resets the axis mode and the legend along with
/// the series, so both have to be re-applied after every clear.
#[derive(Debug, Clone)]
pub struct Figure {
    width: u32,
    height: u32,
    series: Vec<Series>,
    legend: bool,
    axis_mode: AxisMode,
}

impl Figure {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            series: Vec::new(),
            legend: false,
            axis_mode: AxisMode::Auto,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Drop all series, the legend and the axis mode
    pub fn clear(&mut self) {
        self.series.clear();
        self.legend = false;
        self.axis_mode = AxisMode::Auto;
    }

    pub fn set_axis_equal(&mut self) {
        self.axis_mode = AxisMode::Equal;
    }

    pub fn axis_mode(&self) -> AxisMode {
        self.axis_mode
    }

    /// Add a series; points are materialized to host memory first
    pub fn plot<H: HostPoints<Vec2> + ?Sized>(&mut self, points: &H, label: &str, style: SeriesStyle) {
        self.series.push(Series {
            label: label.to_string(),
            style,
            points: points.to_host().into_owned(),
        });
    }

    /// Show a legend for the series plotted so far and after
    pub fn legend(&mut self) {
        self.legend = true;
    }

    pub fn has_legend(&self) -> bool {
        self.legend
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Label and style of every legend row, top to bottom
    pub fn legend_entries(&self) -> Vec<(&str, SeriesStyle)> {
        if !self.legend {
            return Vec::new();
        }
        self.series.iter().map(|s| (s.label.as_str(), s.style)).collect()
    }

    /// Bounds of all finite plotted points
    pub fn data_bounds(&self) -> Option<(Vec2, Vec2)> {
        let mut points = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().copied())
            .filter(|p| p.is_finite());
        let first = points.next()?;
        Some(points.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    /// Size of the plotting area inside margins and label areas
    pub fn plot_area(&self) -> (u32, u32) {
        (
            self.width.saturating_sub(2 * MARGIN + Y_LABEL_AREA).max(1),
            self.height.saturating_sub(2 * MARGIN + X_LABEL_AREA).max(1),
        )
    }

    /// Visible data ranges for the current series and axis mode
    ///
    /// Bounds are clamped to [`MAX_VIEW_COORD`]; points beyond it fall outside the view.
    pub fn view_ranges(&self) -> (Range<f32>, Range<f32>) {
        let limit = Vec2::splat(MAX_VIEW_COORD);
        let (lo, hi) = self.data_bounds().unwrap_or((Vec2::ZERO, Vec2::ONE));
        let (lo, hi) = (lo.clamp(-limit, limit), hi.clamp(-limit, limit));
        let center = (lo + hi) * 0.5;
        let mut span = (hi - lo) * (1.0 + 2.0 * DATA_MARGIN);

        // A single point or a line along one axis still needs a visible span
        if span.x <= f32::EPSILON {
            span.x = span.y.max(1.0);
        }
        if span.y <= f32::EPSILON {
            span.y = span.x.max(1.0);
        }
        // Far from the origin the range ends must remain distinct in f32
        span = span.max(center.abs() * MIN_RELATIVE_SPAN);

        if self.axis_mode == AxisMode::Equal {
            let (pw, ph) = self.plot_area();
            let units_per_px = (span.x / pw as f32).max(span.y / ph as f32);
            span = Vec2::new(units_per_px * pw as f32, units_per_px * ph as f32);
        }

        let half = span * 0.5;
        (
            (center.x - half.x)..(center.x + half.x),
            (center.y - half.y)..(center.y + half.y),
        )
    }

    /// Draw axes, series and legend into an RGBA frame
    pub fn rasterize(&self) -> Result<Frame> {
        fonts::ensure_registered()?;

        let mut rgb = vec![0u8; self.width as usize * self.height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut rgb, (self.width, self.height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            let (x_range, y_range) = self.view_ranges();
            let mut chart = ChartBuilder::on(&root)
                .margin(MARGIN)
                .x_label_area_size(X_LABEL_AREA)
                .y_label_area_size(Y_LABEL_AREA)
                .build_cartesian_2d(x_range.clone(), y_range.clone())
                .map_err(draw_err)?;

            chart
                .configure_mesh()
                .disable_mesh()
                .label_style((fonts::PLOT_FONT_FAMILY, 12))
                .draw()
                .map_err(draw_err)?;

            // Markers far outside the view would map to saturated pixel coordinates
            let pad_x = (x_range.end - x_range.start) * 0.5;
            let pad_y = (y_range.end - y_range.start) * 0.5;
            let keep_x = (x_range.start - pad_x)..=(x_range.end + pad_x);
            let keep_y = (y_range.start - pad_y)..=(y_range.end + pad_y);

            for series in &self.series {
                let color = RGBColor(series.style.color[0], series.style.color[1], series.style.color[2]);
                let size = series.style.size as i32;
                let coords = series
                    .points
                    .iter()
                    .filter(|p| keep_x.contains(&p.x) && keep_y.contains(&p.y))
                    .map(|p| (p.x, p.y));

                match series.style.marker {
                    Marker::Circle => {
                        chart
                            .draw_series(coords.map(|c| Circle::new(c, size, color.filled())))
                            .map_err(draw_err)?
                            .label(series.label.as_str())
                            .legend(move |(x, y)| Circle::new((x, y), size, color.filled()));
                    }
                    Marker::Triangle => {
                        chart
                            .draw_series(coords.map(|c| TriangleMarker::new(c, size, color.filled())))
                            .map_err(draw_err)?
                            .label(series.label.as_str())
                            .legend(move |(x, y)| TriangleMarker::new((x, y), size, color.filled()));
                    }
                }
            }

            if self.legend && !self.series.is_empty() {
                chart
                    .configure_series_labels()
                    .position(SeriesLabelPosition::UpperRight)
                    .label_font((fonts::PLOT_FONT_FAMILY, 13))
                    .background_style(&WHITE.mix(0.8))
                    .border_style(&BLACK)
                    .draw()
                    .map_err(draw_err)?;
            }

            root.present().map_err(draw_err)?;
        }

        Frame::from_rgb(self.width, self.height, &rgb)
    }
}

fn draw_err<E: std::fmt::Debug>(err: E) -> ObserverError {
    ObserverError::render(format!("plot drawing failed: {:?}", err))
}

use glam::Vec3;

use super::canvas::{Canvas, DrawOp, Rgba};
use super::frame::Frame;
use super::host::HostPoints;
use super::points::PointSet;
use super::view_control::ViewControl;
use super::window::WindowDimensions;
use crate::error::{ObserverError, Result};

/// Handle of a geometry registered with a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryId(usize);

impl GeometryId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Point cloud geometry with one uniform color
#[derive(Debug, Clone, PartialEq)]
pub struct PointGeometry {
    points: PointSet<Vec3>,
    color: Vec3,
}

impl PointGeometry {
    /// Copy points out of any host-materializable source, painted black
    pub fn new<H: HostPoints<Vec3> + ?Sized>(data: &H) -> Self {
        Self {
            points: PointSet::from_host(data),
            color: Vec3::ZERO,
        }
    }

    /// Paint every point with `color` (RGB in [0, 1])
    pub fn paint_uniform_color(&mut self, color: Vec3) {
        self.color = color.clamp(Vec3::ZERO, Vec3::ONE);
    }

    pub fn color(&self) -> Vec3 {
        self.color
    }

    pub fn points(&self) -> &PointSet<Vec3> {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut PointSet<Vec3> {
        &mut self.points
    }
}

/// Render settings shared by all geometries of a scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOption {
    /// Splat edge length in pixels
    pub point_size: f32,
    pub background_color: Vec3,
}

impl Default for RenderOption {
    fn default() -> Self {
        Self {
            point_size: 1.0,
            background_color: Vec3::ONE,
        }
    }
}

fn to_rgba(color: Vec3) -> Rgba {
    let c = (color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
    [c.x as u8, c.y as u8, c.z as u8, 255]
}

/// Point splat in screen space
struct Splat {
    x: i32,
    y: i32,
    depth: f32,
    color: Rgba,
}

/// Registry of point geometries plus the camera that views them
#[derive(Debug, Clone, Default)]
pub struct PointScene {
    geometries: Vec<PointGeometry>,
    view: ViewControl,
    render_option: RenderOption,
}

impl PointScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a geometry and reframe the view on the union of all bounds
    pub fn add_geometry(&mut self, geometry: PointGeometry) -> GeometryId {
        self.geometries.push(geometry);
        self.reset_view_point();
        GeometryId(self.geometries.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    pub fn geometry(&self, id: GeometryId) -> Result<&PointGeometry> {
        self.geometries.get(id.0).ok_or(ObserverError::UnknownGeometry(id.0))
    }

    pub fn geometry_mut(&mut self, id: GeometryId) -> Result<&mut PointGeometry> {
        self.geometries
            .get_mut(id.0)
            .ok_or(ObserverError::UnknownGeometry(id.0))
    }

    /// Union bounds of every registered point
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        self.geometries
            .iter()
            .filter_map(|g| g.points.bounds())
            .reduce(|(lo_a, hi_a), (lo_b, hi_b)| (lo_a.min(lo_b), hi_a.max(hi_b)))
    }

    /// Look at the center of the union bounds from +Z
    pub fn reset_view_point(&mut self) {
        if let Some((lo, hi)) = self.bounds() {
            self.view.reset_to_bounds(lo, hi);
        }
    }

    pub fn view_control(&self) -> &ViewControl {
        &self.view
    }

    pub fn view_control_mut(&mut self) -> &mut ViewControl {
        &mut self.view
    }

    pub fn render_option(&self) -> &RenderOption {
        &self.render_option
    }

    pub fn render_option_mut(&mut self) -> &mut RenderOption {
        &mut self.render_option
    }

    /// Rasterize all geometries as square splats, farthest first
    pub fn render(&self, dimensions: WindowDimensions) -> Result<Frame> {
        let (width, height) = (dimensions.width.max(1), dimensions.height.max(1));
        let view_proj = self.view.view_projection(dimensions.aspect());

        let mut splats = Vec::with_capacity(self.geometries.iter().map(|g| g.points.len()).sum());
        for geometry in &self.geometries {
            let color = to_rgba(geometry.color);
            for p in &geometry.points {
                let clip = view_proj * p.extend(1.0);
                if !clip.is_finite() || clip.w <= 0.0 {
                    continue;
                }
                let ndc = clip.truncate() / clip.w;
                if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 || !(0.0..=1.0).contains(&ndc.z) {
                    continue;
                }
                splats.push(Splat {
                    x: ((ndc.x * 0.5 + 0.5) * width as f32) as i32,
                    y: ((0.5 - ndc.y * 0.5) * height as f32) as i32,
                    depth: ndc.z,
                    color,
                });
            }
        }
        splats.sort_by(|a, b| b.depth.total_cmp(&a.depth));

        let size = self.render_option.point_size.round().max(1.0) as u32;
        let mut canvas = Canvas::new(width, height);
        canvas.push(DrawOp::Clear(to_rgba(self.render_option.background_color)));
        for splat in splats {
            canvas.push(DrawOp::Square {
                cx: splat.x,
                cy: splat.y,
                size,
                color: splat.color,
            });
        }
        canvas.into_frame()
    }
}

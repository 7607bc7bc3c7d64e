use glam::{Mat4, Vec3};

pub const FIELD_OF_VIEW_DEFAULT: f32 = 60.0;
pub const FIELD_OF_VIEW_MIN: f32 = 5.0;
pub const FIELD_OF_VIEW_MAX: f32 = 90.0;
/// Degrees per unit of `change_field_of_view`
pub const FIELD_OF_VIEW_STEP: f32 = 5.0;
pub const ZOOM_DEFAULT: f32 = 1.0;
pub const ZOOM_MIN: f32 = 0.02;
pub const ZOOM_MAX: f32 = 2.0;

/// Orbit camera looking at a point cloud's bounding box
///
/// The eye sits on `lookat + front * distance`, where the distance follows
/// from the field of view, the zoom and the largest extent of the bounds.
/// At the minimum field of view the projection becomes orthographic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewControl {
    fov_deg: f32,
    front: Vec3,
    lookat: Vec3,
    up: Vec3,
    zoom: f32,
    bounds_min: Vec3,
    bounds_max: Vec3,
}

impl Default for ViewControl {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewControl {
    pub fn new() -> Self {
        Self {
            fov_deg: FIELD_OF_VIEW_DEFAULT,
            front: Vec3::Z,
            lookat: Vec3::ZERO,
            up: Vec3::Y,
            zoom: ZOOM_DEFAULT,
            bounds_min: Vec3::splat(-0.5),
            bounds_max: Vec3::splat(0.5),
        }
    }

    /// Frame the given bounds head-on, keeping the field of view
    pub fn reset_to_bounds(&mut self, min: Vec3, max: Vec3) {
        self.bounds_min = min;
        self.bounds_max = max;
        self.lookat = (min + max) * 0.5;
        self.front = Vec3::Z;
        self.up = Vec3::Y;
        self.zoom = ZOOM_DEFAULT;
    }

    /// Widen or narrow the field of view by `step` increments of 5 degrees
    pub fn change_field_of_view(&mut self, step: f32) {
        self.fov_deg = (self.fov_deg + step * FIELD_OF_VIEW_STEP).clamp(FIELD_OF_VIEW_MIN, FIELD_OF_VIEW_MAX);
    }

    pub fn set_front(&mut self, front: Vec3) {
        self.front = front.normalize_or(Vec3::Z);
    }

    pub fn set_lookat(&mut self, lookat: Vec3) {
        self.lookat = lookat;
    }

    pub fn set_up(&mut self, up: Vec3) {
        self.up = up.normalize_or(Vec3::Y);
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
    }

    pub fn field_of_view(&self) -> f32 {
        self.fov_deg
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn lookat(&self) -> Vec3 {
        self.lookat
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn is_orthographic(&self) -> bool {
        self.fov_deg <= FIELD_OF_VIEW_MIN + 1e-4
    }

    /// Largest side of the bounds; a flat or single-point cloud still gets a unit scale
    fn extent(&self) -> f32 {
        let extent = (self.bounds_max - self.bounds_min).max_element();
        if extent > f32::EPSILON {
            extent
        } else {
            1.0
        }
    }

    /// Half-height of the visible region at the look-at point
    fn view_ratio(&self) -> f32 {
        self.zoom * self.extent()
    }

    pub fn distance(&self) -> f32 {
        self.view_ratio() / (self.fov_deg.to_radians() * 0.5).tan()
    }

    pub fn eye(&self) -> Vec3 {
        self.lookat + self.front * self.distance()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.lookat, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        let extent = self.extent();
        let distance = self.distance();
        let z_far = distance + 3.0 * extent;

        if self.is_orthographic() {
            let ratio = self.view_ratio();
            Mat4::orthographic_rh(
                -ratio * aspect,
                ratio * aspect,
                -ratio,
                ratio,
                distance - 3.0 * extent,
                z_far,
            )
        } else {
            let z_near = (0.01 * extent).max(distance - 3.0 * extent);
            Mat4::perspective_rh(self.fov_deg.to_radians(), aspect, z_near, z_far)
        }
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

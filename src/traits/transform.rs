use glam::{Affine2, Affine3A, Mat4, Vec2, Vec3};

use crate::core::{Point, PointSet};

/// Transformation produced by the registration loop
///
/// Observers treat it as opaque: all they need is the image of a point set.
pub trait Transformation<P: Point> {
    /// Map every point of `points` into a new set
    fn apply(&self, points: &PointSet<P>) -> PointSet<P>;

    /// Write the image of `source` into `out`, reusing its allocation
    fn apply_into(&self, source: &PointSet<P>, out: &mut PointSet<P>) {
        let image = self.apply(source);
        out.assign_from(image.points());
    }
}

/// Leaves every point where it is
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Identity;

impl<P: Point> Transformation<P> for Identity {
    fn apply(&self, points: &PointSet<P>) -> PointSet<P> {
        points.clone()
    }
}

/// Planar rotation (radians, counter-clockwise) followed by a translation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTransform2 {
    pub angle: f32,
    pub translation: Vec2,
}

impl RigidTransform2 {
    pub fn new(angle: f32, translation: Vec2) -> Self {
        Self { angle, translation }
    }

    pub fn identity() -> Self {
        Self::new(0.0, Vec2::ZERO)
    }

    pub fn to_affine(&self) -> Affine2 {
        Affine2::from_angle_translation(self.angle, self.translation)
    }
}

impl Transformation<Vec2> for RigidTransform2 {
    fn apply(&self, points: &PointSet<Vec2>) -> PointSet<Vec2> {
        self.to_affine().apply(points)
    }

    fn apply_into(&self, source: &PointSet<Vec2>, out: &mut PointSet<Vec2>) {
        self.to_affine().apply_into(source, out)
    }
}

impl Transformation<Vec2> for Affine2 {
    fn apply(&self, points: &PointSet<Vec2>) -> PointSet<Vec2> {
        points.map(|p| self.transform_point2(p))
    }

    fn apply_into(&self, source: &PointSet<Vec2>, out: &mut PointSet<Vec2>) {
        out.assign_from(source.points());
        for p in out.points_mut() {
            *p = self.transform_point2(*p);
        }
    }
}

impl Transformation<Vec3> for Affine3A {
    fn apply(&self, points: &PointSet<Vec3>) -> PointSet<Vec3> {
        points.map(|p| self.transform_point3(p))
    }

    fn apply_into(&self, source: &PointSet<Vec3>, out: &mut PointSet<Vec3>) {
        out.assign_from(source.points());
        for p in out.points_mut() {
            *p = self.transform_point3(*p);
        }
    }
}

/// Homogeneous 4x4 transform; the projective divide is applied
impl Transformation<Vec3> for Mat4 {
    fn apply(&self, points: &PointSet<Vec3>) -> PointSet<Vec3> {
        points.map(|p| self.project_point3(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn rigid_quarter_turn() {
        let set = PointSet::new(vec![Vec2::X, Vec2::Y]);
        let moved = RigidTransform2::new(FRAC_PI_2, Vec2::new(1.0, 0.0)).apply(&set);
        assert_abs_diff_eq!(moved.points()[0].x, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(moved.points()[0].y, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(moved.points()[1].x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(moved.points()[1].y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn apply_into_matches_apply() {
        let set = PointSet::new(vec![Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO]);
        let t = Affine3A::from_translation(Vec3::new(0.5, -1.0, 2.0));
        let mut out = PointSet::default();
        t.apply_into(&set, &mut out);
        assert_eq!(out, t.apply(&set));
    }

    #[test]
    fn matrix_translation() {
        let set = PointSet::new(vec![Vec3::ONE]);
        let moved = Mat4::from_translation(Vec3::new(1.0, 0.0, -1.0)).apply(&set);
        assert_eq!(moved.points(), &[Vec3::new(2.0, 1.0, 0.0)]);
    }

    #[test]
    fn identity_is_a_copy() {
        let set = PointSet::new(vec![Vec2::new(3.0, 4.0)]);
        assert_eq!(Identity.apply(&set), set);
    }
}

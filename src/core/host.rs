use std::borrow::Cow;

use glam::{Vec2, Vec3};

use super::points::{Point, PointSet};

/// Materialize point data into a host-addressable slice before rendering
///
/// Data already living in host memory is borrowed as-is. Row-major arrays
/// and other foreign layouts are converted into an owned buffer.
pub trait HostPoints<P: Point> {
    fn to_host(&self) -> Cow<'_, [P]>;
}

impl<P: Point> HostPoints<P> for PointSet<P> {
    fn to_host(&self) -> Cow<'_, [P]> {
        Cow::Borrowed(self.points())
    }
}

impl<P: Point> HostPoints<P> for [P] {
    fn to_host(&self) -> Cow<'_, [P]> {
        Cow::Borrowed(self)
    }
}

impl<P: Point> HostPoints<P> for Vec<P> {
    fn to_host(&self) -> Cow<'_, [P]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl HostPoints<Vec2> for [[f32; 2]] {
    fn to_host(&self) -> Cow<'_, [Vec2]> {
        Cow::Owned(self.iter().map(|&row| Vec2::from_array(row)).collect())
    }
}

impl HostPoints<Vec3> for [[f32; 3]] {
    fn to_host(&self) -> Cow<'_, [Vec3]> {
        Cow::Owned(self.iter().map(|&row| Vec3::from_array(row)).collect())
    }
}

impl<P: Point> PointSet<P> {
    /// Build a point set from any host-materializable source
    pub fn from_host<H: HostPoints<P> + ?Sized>(data: &H) -> Self {
        PointSet::new(data.to_host().into_owned())
    }
}

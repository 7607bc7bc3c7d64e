use std::fmt::Debug;

use glam::{Vec2, Vec3};

use crate::error::{ObserverError, Result};

/// Fixed-dimension coordinate tuple that a point set can hold
pub trait Point: Copy + Debug + PartialEq + 'static {
    /// Number of coordinates
    const DIM: usize;

    /// All coordinates are finite (no NaN / infinity)
    fn is_finite(&self) -> bool;

    /// Component-wise minimum
    fn min_by_component(self, other: Self) -> Self;

    /// Component-wise maximum
    fn max_by_component(self, other: Self) -> Self;
}

impl Point for Vec2 {
    const DIM: usize = 2;

    fn is_finite(&self) -> bool {
        Vec2::is_finite(*self)
    }

    fn min_by_component(self, other: Self) -> Self {
        self.min(other)
    }

    fn max_by_component(self, other: Self) -> Self {
        self.max(other)
    }
}

impl Point for Vec3 {
    const DIM: usize = 3;

    fn is_finite(&self) -> bool {
        Vec3::is_finite(*self)
    }

    fn min_by_component(self, other: Self) -> Self {
        self.min(other)
    }

    fn max_by_component(self, other: Self) -> Self {
        self.max(other)
    }
}

/// Ordered sequence of points
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointSet<P> {
    points: Vec<P>,
}

impl<P: Point> PointSet<P> {
    /// Wrap an owned vector of points
    pub fn new(points: Vec<P>) -> Self {
        Self { points }
    }

    /// Copy points out of a slice
    pub fn from_slice(points: &[P]) -> Self {
        Self {
            points: points.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[P] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, P> {
        self.points.iter()
    }

    /// Overwrite contents in place, keeping the existing allocation
    pub fn assign_from(&mut self, points: &[P]) {
        self.points.clear();
        self.points.extend_from_slice(points);
    }

    /// Mutable access to the coordinates without changing the length
    pub fn points_mut(&mut self) -> &mut [P] {
        &mut self.points
    }

    /// Map every point into a new set
    pub fn map(&self, f: impl Fn(P) -> P) -> Self {
        Self {
            points: self.points.iter().map(|&p| f(p)).collect(),
        }
    }

    /// Axis-aligned bounds as (min, max), None when empty
    pub fn bounds(&self) -> Option<(P, P)> {
        let first = *self.points.first()?;
        Some(self.points[1..].iter().fold((first, first), |(lo, hi), &p| {
            (lo.min_by_component(p), hi.max_by_component(p))
        }))
    }

    /// Index of the first non-finite point, if any
    pub fn first_non_finite(&self) -> Option<usize> {
        self.points.iter().position(|p| !p.is_finite())
    }

    /// Reject sets an observer cannot display: empty, or holding NaN / infinity
    pub fn validate(&self, name: &str) -> Result<()> {
        if self.is_empty() {
            return Err(ObserverError::InvalidInput(format!("{} point set is empty", name)));
        }
        if let Some(index) = self.first_non_finite() {
            return Err(ObserverError::InvalidInput(format!(
                "{} point {} is not finite: {:?}",
                name, index, self.points[index]
            )));
        }
        Ok(())
    }
}

impl<P: Point> From<Vec<P>> for PointSet<P> {
    fn from(points: Vec<P>) -> Self {
        Self::new(points)
    }
}

impl<'a, P: Point> IntoIterator for &'a PointSet<P> {
    type Item = &'a P;
    type IntoIter = std::slice::Iter<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

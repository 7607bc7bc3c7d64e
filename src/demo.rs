//! Demo module: synthetic clouds and a scripted registration loop
//!
//! The loop stands in for an optimizer: it eases from the identity towards
//! a known ground-truth transformation and reports every step to an observer.
//!
//! # Examples
//!
//! ```no_run
//! use registration_viewer::demo;
//! use registration_viewer::{ObserverOptions, PlaneObserver};
//!
//! let case = demo::plane_case(100);
//! let mut observer = PlaneObserver::headless(&case.source, &case.target, &ObserverOptions::default())?;
//! demo::run_registration(&mut observer, demo::rigid_steps_2d(case.truth, 20))?;
//! # Ok::<(), registration_viewer::ObserverError>(())
//! ```

use std::f32::consts::{PI, TAU};

use glam::{Affine3A, Quat, Vec2, Vec3};

use crate::core::{Point, PointSet};
use crate::error::Result;
use crate::traits::{IterationObserver, RigidTransform2, Transformation};

// ============================================================================
// Point Generators - Deterministic synthetic clouds
// ============================================================================

/// Repeatable pseudo-random value in [-0.5, 0.5) for index `i`
pub fn jitter(i: usize, salt: f32) -> f32 {
    ((i as f32 * 12.9898 + salt * 78.233).sin() * 43_758.547).fract().abs() - 0.5
}

/// Noisy sine wave spanning x in [-2, 2]
pub fn wave_2d(count: usize) -> PointSet<Vec2> {
    let n = count.max(2);
    let points = (0..n)
        .map(|i| {
            let t = i as f32 / (n - 1) as f32;
            let x = t * 4.0 - 2.0;
            let y = (t * TAU).sin() * 0.6 + 0.3 * t * t + 0.03 * jitter(i, 1.0);
            Vec2::new(x, y)
        })
        .collect();
    PointSet::new(points)
}

/// Lopsided helix wound around the Z axis
pub fn helix_3d(count: usize) -> PointSet<Vec3> {
    let n = count.max(2);
    let points = (0..n)
        .map(|i| {
            let t = i as f32 / (n - 1) as f32;
            let angle = t * 3.0 * TAU;
            let radius = 0.5 + 0.5 * t;
            Vec3::new(
                radius * angle.cos() + 0.02 * jitter(i, 1.0),
                radius * angle.sin() + 0.02 * jitter(i, 2.0),
                t * 2.0 + 0.02 * jitter(i, 3.0),
            )
        })
        .collect();
    PointSet::new(points)
}

// ============================================================================
// Registration Cases - Source, target and the transformation between them
// ============================================================================

/// Source cloud, target cloud and the transformation mapping one onto the other
#[derive(Debug, Clone)]
pub struct RegistrationCase<P: Point, T> {
    pub source: PointSet<P>,
    pub target: PointSet<P>,
    pub truth: T,
}

pub fn plane_case(count: usize) -> RegistrationCase<Vec2, RigidTransform2> {
    let source = wave_2d(count);
    let truth = RigidTransform2::new(PI / 5.0, Vec2::new(1.5, -0.75));
    let target = truth.apply(&source);
    RegistrationCase { source, target, truth }
}

pub fn scene_case(count: usize) -> RegistrationCase<Vec3, Affine3A> {
    let source = helix_3d(count);
    let truth = Affine3A::from_rotation_translation(
        Quat::from_euler(glam::EulerRot::XYZ, 0.4, -0.3, 0.8),
        Vec3::new(1.0, 0.5, -0.5),
    );
    let target = truth.apply(&source);
    RegistrationCase { source, target, truth }
}

// ============================================================================
// Scripted Optimizer
// ============================================================================

/// Ease-out cubic: fast at first, settling onto 1
pub fn ease_out(t: f32) -> f32 {
    let u = 1.0 - t.clamp(0.0, 1.0);
    1.0 - u * u * u
}

fn progress(step: usize, steps: usize) -> f32 {
    (step + 1) as f32 / steps.max(1) as f32
}

/// `steps` estimates converging on `truth`; the last one equals it
pub fn rigid_steps_2d(truth: RigidTransform2, steps: usize) -> impl Iterator<Item = RigidTransform2> {
    (0..steps).map(move |step| {
        let s = ease_out(progress(step, steps));
        RigidTransform2::new(truth.angle * s, truth.translation * s)
    })
}

/// `steps` estimates converging on `truth`; the last one equals it
pub fn rigid_steps_3d(truth: Affine3A, steps: usize) -> impl Iterator<Item = Affine3A> {
    let (_, rotation, translation) = truth.to_scale_rotation_translation();
    (0..steps).map(move |step| {
        let s = ease_out(progress(step, steps));
        Affine3A::from_rotation_translation(Quat::IDENTITY.slerp(rotation, s), translation * s)
    })
}

/// Drive `observer` once per estimate, stopping at the first error
pub fn run_registration<P, O, T, I>(observer: &mut O, estimates: I) -> Result<u64>
where
    P: Point,
    O: IterationObserver<P>,
    T: Transformation<P>,
    I: IntoIterator<Item = T>,
{
    for estimate in estimates {
        observer.on_iteration(&estimate)?;
    }
    Ok(observer.frame_count())
}

/// Mean distance between corresponding points
pub fn mean_residual_2d(a: &PointSet<Vec2>, b: &PointSet<Vec2>) -> f32 {
    let n = a.len().min(b.len()).max(1);
    a.iter().zip(b.iter()).map(|(p, q)| p.distance(*q)).sum::<f32>() / n as f32
}

pub fn mean_residual_3d(a: &PointSet<Vec3>, b: &PointSet<Vec3>) -> f32 {
    let n = a.len().min(b.len()).max(1);
    a.iter().zip(b.iter()).map(|(p, q)| p.distance(*q)).sum::<f32>() / n as f32
}

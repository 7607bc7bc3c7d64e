pub mod cli;
pub mod core;
pub mod demo;
pub mod error;
pub mod options;
pub mod plane_observer;
pub mod scene_observer;
pub mod traits;

pub use crate::core::{Frame, HeadlessSurface, PointSet, WindowDimensions, WindowSurface};
pub use error::{ObserverError, Result};
pub use options::ObserverOptions;
pub use plane_observer::PlaneObserver;
pub use scene_observer::SceneObserver;
pub use traits::{IterationObserver, RenderSurface, RigidTransform2, SurfaceStatus, Transformation};

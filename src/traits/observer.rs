use super::transform::Transformation;
use crate::core::{Point, PointSet};
use crate::error::Result;

/// Per-iteration hook invoked by a registration loop
pub trait IterationObserver<P: Point> {
    /// Recompute the result set from `transformation` and refresh the display
    fn on_iteration(&mut self, transformation: &dyn Transformation<P>) -> Result<()>;

    /// Image of the source under the latest transformation
    fn result(&self) -> &PointSet<P>;

    /// Number of completed iterations
    fn frame_count(&self) -> u64;

    /// Release the render surface; calling it again is a no-op
    fn close(&mut self) -> Result<()>;

    fn is_closed(&self) -> bool;
}

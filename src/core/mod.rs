mod canvas;
mod figure;
mod fonts;
mod frame;
mod gpu_context;
mod headless;
mod host;
mod points;
mod recorder;
mod scene;
mod surface_renderer;
mod view_control;
mod visualizer;
mod window;

pub use canvas::{Canvas, DrawOp, Rgba};
pub use figure::{AxisMode, Figure, Marker, Series, SeriesStyle};
pub use fonts::{ensure_registered as ensure_plot_font, PLOT_FONT_FAMILY};
pub use frame::Frame;
pub use gpu_context::GpuContext;
pub use headless::HeadlessSurface;
pub use host::HostPoints;
pub use points::{Point, PointSet};
pub use recorder::{FrameFormat, FrameRecorder, FRAME_PREFIX};
pub use scene::{GeometryId, PointGeometry, PointScene, RenderOption};
pub use surface_renderer::SurfaceRenderer;
pub use view_control::{
    ViewControl, FIELD_OF_VIEW_DEFAULT, FIELD_OF_VIEW_MAX, FIELD_OF_VIEW_MIN, FIELD_OF_VIEW_STEP, ZOOM_DEFAULT,
};
pub use visualizer::Visualizer;
pub use window::{WindowDimensions, WindowSurface};

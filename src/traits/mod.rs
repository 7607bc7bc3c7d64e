pub mod observer;
pub mod surface;
pub mod transform;

pub use observer::*;
pub use surface::*;
pub use transform::*;

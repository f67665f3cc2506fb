mod average;
mod category;
mod registry;
mod window;

pub mod error;
pub mod source;

pub use average::Average;
pub use category::*;
pub use registry::*;
pub use window::*;

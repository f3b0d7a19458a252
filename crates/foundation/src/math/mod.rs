pub mod basis;
pub mod color;
pub mod curve;
pub mod precision;
pub mod projection;
pub mod quat;
pub mod vec;

pub use basis::*;
pub use color::*;
pub use curve::*;
pub use precision::*;
pub use projection::*;
pub use quat::*;
pub use vec::*;

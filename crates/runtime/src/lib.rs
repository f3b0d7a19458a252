pub mod flight;
pub mod frame;
pub mod rotation;
pub mod widget;

pub use flight::*;
pub use frame::*;
pub use rotation::*;
pub use widget::*;

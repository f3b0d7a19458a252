pub mod aircraft;
pub mod globe;

pub use aircraft::*;
pub use globe::*;

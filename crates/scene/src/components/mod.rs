pub mod drawable3d;
pub mod hit_sphere;
pub mod light;
pub mod material;
pub mod transform;

pub use drawable3d::*;
pub use hit_sphere::*;
pub use light::*;
pub use material::*;
pub use transform::*;

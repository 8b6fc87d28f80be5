pub mod f32;
pub mod geometry;
pub mod io;
pub mod traits;
pub mod vector;

pub use self::f32::ImageF32;
pub use self::geometry::ImageGeometry;
pub use self::traits::{ImageView, Rows};
pub use self::vector::VectorImage;

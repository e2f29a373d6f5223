pub mod traits;
#[cfg(feature = "vectors")]
pub mod vector;
#[cfg(test)]
pub(crate) mod recording;

pub use traits::{Rgba, Surface};
#[cfg(feature = "vectors")]
pub use vector::{VectorSurface, VectorVertex};

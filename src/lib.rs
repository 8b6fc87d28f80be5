#![doc = include_str!("../README.md")]

// Public modules
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod levelset;
pub mod stats;

// Tooling support for the demo binaries.
pub mod config;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{Result, SpeedError};
pub use crate::levelset::{
    IntensityWindowSpeed, NeighborhoodRadius, SegmentationFunction, SpeedFieldProvider,
    TermWeights, VectorThresholdParams, VectorThresholdSpeed,
};
pub use crate::stats::MahalanobisModel;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use levelset_speed::prelude::*;
/// use nalgebra::{DMatrix, DVector};
///
/// # fn main() -> Result<(), SpeedError> {
/// let feature = VectorImage::new(64, 48, 3);
/// let mut speed = VectorThresholdSpeed::new(3);
/// speed.set_mean(DVector::from_column_slice(&[0.5, 0.4, 0.3]));
/// speed.set_covariance(DMatrix::identity(3, 3) * 0.01);
///
/// let mut function = SegmentationFunction::new(speed, &feature);
/// function.initialize(NeighborhoodRadius::default());
/// function.calculate_speed_image()?;
/// println!("speed(0, 0) = {}", function.propagation_speed(0, 0));
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ImageF32, VectorImage};
    pub use crate::{
        NeighborhoodRadius, SegmentationFunction, SpeedError, SpeedFieldProvider,
        VectorThresholdSpeed,
    };
}

//! Speed fields for level-set segmentation.
//!
//! Overview
//! - [`SpeedFieldProvider`] is the seam between a speed term and the
//!   evolution engine: it fixes the term weights at initialization and fills
//!   a speed image over the full grid or an active band.
//! - [`VectorThresholdSpeed`] maps each feature vector to
//!   `threshold - mahalanobis(x)` using an owned [`MahalanobisModel`].
//! - [`IntensityWindowSpeed`] is the scalar variant: positive inside an
//!   intensity window, negative outside.
//! - [`SegmentationFunction`] binds a provider to a feature image and owns
//!   the speed image the engine samples during the PDE update.
//!
//! Key Ideas
//! - Pixels are independent; a sweep is a pure map that either completes or
//!   leaves the output untouched.
//! - Both threshold variants use the weights `(advection, propagation,
//!   curvature) = (0, -1, 1)`; see [`TermWeights`] for the sign convention.
//! - The neighborhood radius belongs to the engine's stencils and is stored
//!   but never interpreted here.
//!
//! [`MahalanobisModel`]: crate::stats::MahalanobisModel

pub mod function;
pub mod intensity_window;
pub mod provider;
mod sweep;
pub mod vector_threshold;
pub mod weights;

pub use function::SegmentationFunction;
pub use intensity_window::IntensityWindowSpeed;
pub use provider::SpeedFieldProvider;
pub use vector_threshold::{VectorThresholdParams, VectorThresholdSpeed, DEFAULT_THRESHOLD};
pub use weights::{NeighborhoodRadius, TermWeights};

#[cfg(test)]
mod tests;

//! Statistical appearance model of the target region.
//!
//! [`MahalanobisModel`] holds the mean and covariance of the region's feature
//! vectors and measures how far any feature vector lies from them. The model
//! is supplied externally; nothing here learns it from pixels.

pub mod mahalanobis;

pub use mahalanobis::{CovarianceMatrix, MahalanobisModel, MeanVector};

//! Threshold on the Mahalanobis distance of vector-valued features.
//!
//! Each pixel gets `speed = threshold - D(x)`, where `D` is the Mahalanobis
//! distance of its feature vector from the region model. The speed is
//! positive for features closer to the mean than `threshold`, negative
//! farther out, and zero on the iso-distance surface the front locks onto.
use super::provider::SpeedFieldProvider;
use super::weights::{NeighborhoodRadius, TermWeights};
use crate::error::{Result, SpeedError};
use crate::image::VectorImage;
use crate::stats::{CovarianceMatrix, MahalanobisModel, MeanVector};
use serde::{Deserialize, Serialize};

/// Target iso-distance used when none is configured.
pub const DEFAULT_THRESHOLD: f64 = 1.8;

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

/// Serializable region statistics and threshold.
///
/// `covariance` is given row by row and must be `mean.len()` square.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VectorThresholdParams {
    pub mean: Vec<f64>,
    pub covariance: Vec<Vec<f64>>,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl VectorThresholdParams {
    pub fn dimension(&self) -> usize {
        self.mean.len()
    }

    pub fn mean_vector(&self) -> MeanVector {
        MeanVector::from_column_slice(&self.mean)
    }

    pub fn covariance_matrix(&self) -> Result<CovarianceMatrix> {
        let rows = self.covariance.len();
        if let Some(bad) = self.covariance.iter().position(|row| row.len() != rows) {
            return Err(SpeedError::configuration(format!(
                "covariance row {bad} has {} entries, expected {rows}",
                self.covariance[bad].len()
            )));
        }
        Ok(CovarianceMatrix::from_fn(rows, rows, |r, c| {
            self.covariance[r][c]
        }))
    }
}

/// Speed field `threshold - mahalanobis(feature)`.
///
/// Owns its statistical model exclusively; update the statistics between
/// sweeps through the setters.
#[derive(Clone, Debug)]
pub struct VectorThresholdSpeed {
    model: MahalanobisModel,
    threshold: f64,
    radius: Option<NeighborhoodRadius>,
}

impl VectorThresholdSpeed {
    /// Zero mean, zero covariance over `channels` components and the default
    /// threshold. A covariance must be set before the first sweep.
    pub fn new(channels: usize) -> Self {
        Self::from_model(MahalanobisModel::new(channels), DEFAULT_THRESHOLD)
    }

    pub fn from_model(model: MahalanobisModel, threshold: f64) -> Self {
        Self {
            model,
            threshold,
            radius: None,
        }
    }

    /// Build from validated parameters; fails on inconsistent shapes or a
    /// covariance that cannot be factorized.
    pub fn from_params(params: &VectorThresholdParams) -> Result<Self> {
        let model =
            MahalanobisModel::with_statistics(params.mean_vector(), params.covariance_matrix()?)?;
        Ok(Self::from_model(model, params.threshold))
    }

    pub fn set_mean(&mut self, mean: MeanVector) {
        self.model.set_mean(mean);
    }

    pub fn mean(&self) -> &MeanVector {
        self.model.mean()
    }

    pub fn set_covariance(&mut self, covariance: CovarianceMatrix) {
        self.model.set_covariance(covariance);
    }

    pub fn covariance(&self) -> &CovarianceMatrix {
        self.model.covariance()
    }

    pub fn set_threshold(&mut self, threshold: f64) {
        self.threshold = threshold;
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn model(&self) -> &MahalanobisModel {
        &self.model
    }

    /// Current parameters in serializable form.
    pub fn params(&self) -> VectorThresholdParams {
        let cov = self.model.covariance();
        VectorThresholdParams {
            mean: self.model.mean().iter().copied().collect(),
            covariance: cov
                .row_iter()
                .map(|row| row.iter().copied().collect())
                .collect(),
            threshold: self.threshold,
        }
    }
}

impl SpeedFieldProvider for VectorThresholdSpeed {
    fn initialize(&mut self, radius: NeighborhoodRadius) {
        self.radius = Some(radius);
    }

    fn radius(&self) -> Option<NeighborhoodRadius> {
        self.radius
    }

    fn weights(&self) -> TermWeights {
        TermWeights::threshold_locking()
    }

    fn validate(&self, feature: &VectorImage) -> Result<()> {
        self.model.validate(feature.channels)
    }

    #[inline]
    fn speed(&self, feature: &[f32]) -> Result<f32> {
        let distance = self.model.distance(feature)?;
        let speed = (self.threshold - distance) as f32;
        if !speed.is_finite() {
            return Err(SpeedError::numerical(format!(
                "speed {speed} is not finite (threshold {})",
                self.threshold
            )));
        }
        Ok(speed)
    }
}

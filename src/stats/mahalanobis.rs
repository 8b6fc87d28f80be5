//! Mahalanobis distance of feature vectors from a Gaussian appearance model.
//!
//! `D(x) = sqrt((x - mean)^T * cov^-1 * (x - mean))`
//!
//! The covariance is factorized once per assignment: with `cov = L * L^T`
//! (Cholesky), the distance is the Euclidean norm of `L^-1 * (x - mean)`.
//! `L^-1` is cached, so evaluating a pixel is a triangular matrix-vector
//! product with no allocation. Shape agreement between mean, covariance and
//! the evaluated vector is checked at the point of use, so the setters can be
//! called in any order.
use crate::error::{Result, SpeedError};
use log::{debug, warn};
use nalgebra::{Cholesky, DMatrix, DVector};

pub type MeanVector = DVector<f64>;
pub type CovarianceMatrix = DMatrix<f64>;

/// Pivots with `l_ii^2 <= PIVOT_TOLERANCE * cov_ii` count as singular.
const PIVOT_TOLERANCE: f64 = 1e-12;
/// Relative tolerance when checking covariance symmetry.
const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Mean vector and covariance matrix of a region's feature distribution.
#[derive(Clone, Debug)]
pub struct MahalanobisModel {
    mean: MeanVector,
    covariance: CovarianceMatrix,
    /// Inverse Cholesky factor of `covariance`, or the reason it has none.
    whitening: std::result::Result<DMatrix<f64>, SpeedError>,
}

impl MahalanobisModel {
    /// Zero mean and zero covariance of the given dimension.
    ///
    /// The zero covariance is singular, so distances fail until a usable
    /// covariance is assigned.
    pub fn new(dimension: usize) -> Self {
        let covariance = CovarianceMatrix::zeros(dimension, dimension);
        let whitening = factorize(&covariance);
        Self {
            mean: MeanVector::zeros(dimension),
            covariance,
            whitening,
        }
    }

    /// Build a model and check that it can evaluate distances right away.
    pub fn with_statistics(mean: MeanVector, covariance: CovarianceMatrix) -> Result<Self> {
        let whitening = factorize(&covariance);
        let model = Self {
            mean,
            covariance,
            whitening,
        };
        model.validate(model.mean.len())?;
        Ok(model)
    }

    pub fn mean(&self) -> &MeanVector {
        &self.mean
    }

    pub fn covariance(&self) -> &CovarianceMatrix {
        &self.covariance
    }

    /// Length of the mean vector.
    pub fn dimension(&self) -> usize {
        self.mean.len()
    }

    /// True when the current covariance has a usable factorization.
    pub fn is_factorized(&self) -> bool {
        self.whitening.is_ok()
    }

    /// Replace the mean. Consistency with the covariance is checked on use.
    pub fn set_mean(&mut self, mean: MeanVector) {
        self.mean = mean;
    }

    /// Replace the covariance and refresh the cached factorization.
    pub fn set_covariance(&mut self, covariance: CovarianceMatrix) {
        self.whitening = factorize(&covariance);
        match &self.whitening {
            Ok(_) => debug!(
                "MahalanobisModel::set_covariance factorized {}x{} covariance",
                covariance.nrows(),
                covariance.ncols()
            ),
            Err(err) => warn!("MahalanobisModel::set_covariance {err}"),
        }
        self.covariance = covariance;
    }

    /// Check that vectors of length `feature_len` can be evaluated.
    pub fn validate(&self, feature_len: usize) -> Result<()> {
        let n = self.mean.len();
        if self.covariance.nrows() != n || self.covariance.ncols() != n {
            return Err(SpeedError::configuration(format!(
                "mean has {n} components but covariance is {}x{}",
                self.covariance.nrows(),
                self.covariance.ncols()
            )));
        }
        if feature_len != n {
            return Err(SpeedError::configuration(format!(
                "feature vector has {feature_len} components, model expects {n}"
            )));
        }
        self.whitening.as_ref().map(|_| ()).map_err(Clone::clone)
    }

    /// Squared Mahalanobis distance of `x` from the mean.
    pub fn distance_squared<T>(&self, x: &[T]) -> Result<f64>
    where
        T: Copy + Into<f64>,
    {
        self.validate(x.len())?;
        let inv_l = self.whitening.as_ref().map_err(Clone::clone)?;
        let d2 = self.whitened_norm_squared(inv_l, x);
        if !d2.is_finite() {
            return Err(SpeedError::numerical(
                "Mahalanobis distance is not finite (non-finite feature value?)",
            ));
        }
        Ok(d2)
    }

    /// Mahalanobis distance of `x` from the mean.
    pub fn distance<T>(&self, x: &[T]) -> Result<f64>
    where
        T: Copy + Into<f64>,
    {
        self.distance_squared(x).map(f64::sqrt)
    }

    #[inline]
    fn whitened_norm_squared<T>(&self, inv_l: &DMatrix<f64>, x: &[T]) -> f64
    where
        T: Copy + Into<f64>,
    {
        let n = self.mean.len();
        let mut sum = 0.0;
        for i in 0..n {
            let mut yi = 0.0;
            for j in 0..=i {
                let xj: f64 = x[j].into();
                yi += inv_l[(i, j)] * (xj - self.mean[j]);
            }
            sum += yi * yi;
        }
        sum
    }
}

fn factorize(covariance: &CovarianceMatrix) -> std::result::Result<DMatrix<f64>, SpeedError> {
    let n = covariance.nrows();
    if covariance.ncols() != n {
        return Err(SpeedError::configuration(format!(
            "covariance must be square, got {}x{}",
            n,
            covariance.ncols()
        )));
    }
    if n == 0 {
        return Err(SpeedError::configuration("covariance is empty"));
    }
    if covariance.iter().any(|v| !v.is_finite()) {
        return Err(SpeedError::numerical("covariance has non-finite entries"));
    }
    let scale = covariance.amax().max(1.0);
    for i in 0..n {
        for j in (i + 1)..n {
            if (covariance[(i, j)] - covariance[(j, i)]).abs() > SYMMETRY_TOLERANCE * scale {
                return Err(SpeedError::configuration(format!(
                    "covariance is not symmetric at ({i}, {j})"
                )));
            }
        }
    }

    let chol = Cholesky::new(covariance.clone())
        .ok_or_else(|| SpeedError::numerical("covariance is not positive-definite"))?;
    let l = chol.l();
    // Each pivot is compared with its own variance so per-channel scaling
    // never turns a well-conditioned covariance singular.
    if let Some(i) = (0..n).find(|&i| {
        let pivot = l[(i, i)];
        !pivot.is_finite() || pivot * pivot <= PIVOT_TOLERANCE * covariance[(i, i)]
    }) {
        return Err(SpeedError::numerical(format!(
            "covariance is singular within tolerance (pivot {i})"
        )));
    }
    l.solve_lower_triangular(&DMatrix::identity(n, n))
        .ok_or_else(|| SpeedError::numerical("covariance factor is not invertible"))
}

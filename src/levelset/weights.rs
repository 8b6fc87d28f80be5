use serde::{Deserialize, Serialize};

/// Relative weights of the level-set update terms.
///
/// Sign convention: `phi` is negative inside the segmented region and the
/// evolution engine integrates
///
/// `dphi/dt = -(advection * A + propagation * speed * |grad phi|) + curvature * kappa * |grad phi|`
///
/// With `propagation = -1` a positive speed lowers `phi`, so the interior
/// grows wherever the feature lies inside the target iso-distance and shrinks
/// where it lies outside. The front stops where the speed is zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TermWeights {
    pub advection: f64,
    pub propagation: f64,
    pub curvature: f64,
}

impl TermWeights {
    /// Weights used by the threshold-style speed fields: no advection,
    /// speed-driven propagation and full-strength curvature regularization.
    pub const fn threshold_locking() -> Self {
        Self {
            advection: 0.0,
            propagation: -1.0,
            curvature: 1.0,
        }
    }

    /// Same weights with the propagation direction flipped.
    pub fn reversed(self) -> Self {
        Self {
            propagation: -self.propagation,
            ..self
        }
    }
}

impl Default for TermWeights {
    fn default() -> Self {
        Self::threshold_locking()
    }
}

/// Stencil radius of the evolution engine, passed through untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborhoodRadius(pub [usize; 2]);

impl Default for NeighborhoodRadius {
    fn default() -> Self {
        Self([1, 1])
    }
}

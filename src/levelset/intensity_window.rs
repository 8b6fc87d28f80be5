//! Scalar intensity-window speed: positive inside `[lower, upper]`, negative
//! outside, so the front locks onto the edges of the window.
use super::provider::SpeedFieldProvider;
use super::weights::{NeighborhoodRadius, TermWeights};
use crate::error::{Result, SpeedError};
use crate::image::VectorImage;

#[derive(Clone, Debug)]
pub struct IntensityWindowSpeed {
    lower: f64,
    upper: f64,
    radius: Option<NeighborhoodRadius>,
}

impl IntensityWindowSpeed {
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        if !lower.is_finite() || !upper.is_finite() || lower > upper {
            return Err(SpeedError::configuration(format!(
                "invalid intensity window [{lower}, {upper}]"
            )));
        }
        Ok(Self {
            lower,
            upper,
            radius: None,
        })
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }
}

impl SpeedFieldProvider for IntensityWindowSpeed {
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
        if feature.channels != 1 {
            return Err(SpeedError::configuration(format!(
                "intensity window needs a scalar image, got {} channels",
                feature.channels
            )));
        }
        Ok(())
    }

    fn speed(&self, feature: &[f32]) -> Result<f32> {
        let &[v] = feature else {
            return Err(SpeedError::configuration(format!(
                "intensity window needs one component, got {}",
                feature.len()
            )));
        };
        let v = v as f64;
        if !v.is_finite() {
            return Err(SpeedError::numerical("feature value is not finite"));
        }
        let mid = 0.5 * (self.lower + self.upper);
        let speed = if v < mid { v - self.lower } else { self.upper - v };
        Ok(speed as f32)
    }
}

//! Speed term as seen by an evolution engine.
//!
//! Binds a provider to the feature image, owns the speed image the engine
//! reads, and answers point queries during the PDE update.
use super::provider::SpeedFieldProvider;
use super::weights::{NeighborhoodRadius, TermWeights};
use crate::error::Result;
use crate::image::{ImageF32, VectorImage};

pub struct SegmentationFunction<'f, P: SpeedFieldProvider> {
    provider: P,
    feature: &'f VectorImage,
    speed: ImageF32,
    reversed: bool,
}

impl<'f, P: SpeedFieldProvider> SegmentationFunction<'f, P> {
    /// Bind `provider` to `feature` and allocate a zeroed speed image.
    pub fn new(provider: P, feature: &'f VectorImage) -> Self {
        let speed = provider.allocate_speed_image(feature);
        Self {
            provider,
            feature,
            speed,
            reversed: false,
        }
    }

    /// Called by the engine before the first sweep.
    pub fn initialize(&mut self, radius: NeighborhoodRadius) {
        self.provider.initialize(radius);
    }

    pub fn radius(&self) -> Option<NeighborhoodRadius> {
        self.provider.radius()
    }

    /// Weights the engine should apply, including any direction reversal.
    pub fn weights(&self) -> TermWeights {
        let w = self.provider.weights();
        if self.reversed {
            w.reversed()
        } else {
            w
        }
    }

    /// Flip the propagation direction: grow where the front would shrink.
    pub fn reverse_expansion_direction(&mut self) {
        self.reversed = !self.reversed;
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Mutable access for updating statistics between sweeps.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn feature_image(&self) -> &VectorImage {
        self.feature
    }

    pub fn speed_image(&self) -> &ImageF32 {
        &self.speed
    }

    /// Recompute the speed of every pixel.
    pub fn calculate_speed_image(&mut self) -> Result<()> {
        self.provider
            .compute_speed_image(self.feature, &mut self.speed)
    }

    /// Recompute the speed at the active band positions only.
    pub fn calculate_speed_band(&mut self, band: &[(usize, usize)]) -> Result<()> {
        self.provider
            .compute_speed_band(self.feature, band, &mut self.speed)
    }

    #[inline]
    pub fn propagation_speed(&self, x: usize, y: usize) -> f32 {
        self.speed.get(x, y)
    }

    /// Speed interpolated at a physical position; `None` for degenerate
    /// spacing or an empty grid.
    pub fn propagation_speed_at(&self, physical: [f64; 2]) -> Option<f32> {
        let [cx, cy] = self.speed.geometry.physical_to_continuous_index(physical)?;
        self.speed.sample_bilinear(cx, cy)
    }
}

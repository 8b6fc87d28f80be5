//! The capability an evolution engine needs from a speed term.
use super::sweep;
use super::weights::{NeighborhoodRadius, TermWeights};
use crate::error::Result;
use crate::image::{ImageF32, VectorImage};

/// Produces the propagation speed field for a level-set evolution engine.
///
/// Implementors describe a single pixel (`speed`) and the up-front checks for
/// a feature image (`validate`); the sweeps over the whole grid or an active
/// band are shared. A sweep either writes every requested pixel or nothing.
///
/// Providers must not be mutated while a sweep is in flight. Sweeps borrow the
/// provider immutably, so parameter updates through `&mut` are serialized with
/// them by the borrow checker.
pub trait SpeedFieldProvider: Send + Sync {
    /// Record the engine's stencil radius and fix the term weights.
    fn initialize(&mut self, radius: NeighborhoodRadius);

    /// Radius given to the last `initialize`, if any.
    fn radius(&self) -> Option<NeighborhoodRadius>;

    fn weights(&self) -> TermWeights;

    /// Check that every pixel of `feature` can be evaluated.
    fn validate(&self, feature: &VectorImage) -> Result<()>;

    /// Speed for one feature vector. Positive inside the target region.
    fn speed(&self, feature: &[f32]) -> Result<f32>;

    /// Speed image with the dimensions and geometry of `feature`.
    fn allocate_speed_image(&self, feature: &VectorImage) -> ImageF32 {
        ImageF32::new_like(feature)
    }

    /// Overwrite `out` with the speed of every pixel of `feature`.
    fn compute_speed_image(&self, feature: &VectorImage, out: &mut ImageF32) -> Result<()> {
        sweep::sweep_full(self, feature, out)
    }

    /// Overwrite the speed at the `(x, y)` positions of `band` only.
    fn compute_speed_band(
        &self,
        feature: &VectorImage,
        band: &[(usize, usize)],
        out: &mut ImageF32,
    ) -> Result<()> {
        sweep::sweep_band(self, feature, band, out)
    }
}

impl<P: SpeedFieldProvider + ?Sized> SpeedFieldProvider for Box<P> {
    fn initialize(&mut self, radius: NeighborhoodRadius) {
        (**self).initialize(radius)
    }

    fn radius(&self) -> Option<NeighborhoodRadius> {
        (**self).radius()
    }

    fn weights(&self) -> TermWeights {
        (**self).weights()
    }

    fn validate(&self, feature: &VectorImage) -> Result<()> {
        (**self).validate(feature)
    }

    fn speed(&self, feature: &[f32]) -> Result<f32> {
        (**self).speed(feature)
    }

    fn allocate_speed_image(&self, feature: &VectorImage) -> ImageF32 {
        (**self).allocate_speed_image(feature)
    }

    fn compute_speed_image(&self, feature: &VectorImage, out: &mut ImageF32) -> Result<()> {
        (**self).compute_speed_image(feature, out)
    }

    fn compute_speed_band(
        &self,
        feature: &VectorImage,
        band: &[(usize, usize)],
        out: &mut ImageF32,
    ) -> Result<()> {
        (**self).compute_speed_band(feature, band, out)
    }
}

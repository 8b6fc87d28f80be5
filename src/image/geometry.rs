//! Physical placement of a pixel grid.
//!
//! Pixel `(x, y)` sits at `origin + (x, y) * spacing` in physical space.
//! The speed image always shares the geometry of the feature image it was
//! computed from.
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageGeometry {
    /// Physical size of one pixel along x and y.
    pub spacing: [f64; 2],
    /// Physical position of pixel (0, 0).
    pub origin: [f64; 2],
}

impl Default for ImageGeometry {
    fn default() -> Self {
        Self {
            spacing: [1.0, 1.0],
            origin: [0.0, 0.0],
        }
    }
}

impl ImageGeometry {
    pub fn new(spacing: [f64; 2], origin: [f64; 2]) -> Self {
        Self { spacing, origin }
    }

    #[inline]
    pub fn index_to_physical(&self, x: f64, y: f64) -> [f64; 2] {
        [
            self.origin[0] + x * self.spacing[0],
            self.origin[1] + y * self.spacing[1],
        ]
    }

    /// Inverse of [`Self::index_to_physical`]; `None` for degenerate spacing.
    #[inline]
    pub fn physical_to_continuous_index(&self, p: [f64; 2]) -> Option<[f64; 2]> {
        if self.spacing[0] == 0.0 || self.spacing[1] == 0.0 {
            return None;
        }
        Some([
            (p[0] - self.origin[0]) / self.spacing[0],
            (p[1] - self.origin[1]) / self.spacing[1],
        ])
    }
}

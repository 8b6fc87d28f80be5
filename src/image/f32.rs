//! Owned single-channel f32 image in row-major layout (stride == width).
//!
//! Used for the speed field handed to the level-set solver. Carries the
//! physical geometry of the grid it was allocated for and offers bilinear
//! sampling at continuous indices.
use super::geometry::ImageGeometry;
use super::vector::VectorImage;

#[derive(Clone, Debug, PartialEq)]
pub struct ImageF32 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Number of f32 elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<f32>,
    /// Physical spacing and origin of the grid
    pub geometry: ImageGeometry,
}

impl ImageF32 {
    /// Construct a zero-initialized buffer of size `w × h` with unit spacing.
    pub fn new(w: usize, h: usize) -> Self {
        Self::with_geometry(w, h, ImageGeometry::default())
    }

    /// Construct a zero-initialized buffer placed on `geometry`.
    pub fn with_geometry(w: usize, h: usize, geometry: ImageGeometry) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![0.0; w * h],
            geometry,
        }
    }

    /// Zero-initialized buffer sharing dimensions and geometry with `feature`.
    pub fn new_like(feature: &VectorImage) -> Self {
        Self::with_geometry(feature.w, feature.h, feature.geometry)
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }
    #[inline]
    /// Get the pixel value at (x, y).
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }
    #[inline]
    /// Set the pixel value at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    pub fn fill(&mut self, v: f32) {
        self.data.fill(v);
    }

    /// True when both images cover the same pixel grid in physical space.
    pub fn same_grid(&self, w: usize, h: usize, geometry: &ImageGeometry) -> bool {
        self.w == w && self.h == h && self.geometry == *geometry
    }

    /// Bilinear sample at a continuous index, clamping to the border.
    ///
    /// Returns `None` for an empty image or non-finite coordinates.
    pub fn sample_bilinear(&self, x: f64, y: f64) -> Option<f32> {
        if self.w == 0 || self.h == 0 || !x.is_finite() || !y.is_finite() {
            return None;
        }
        let max_x = (self.w - 1) as f64;
        let max_y = (self.h - 1) as f64;
        let xc = x.clamp(0.0, max_x);
        let yc = y.clamp(0.0, max_y);
        let x0 = xc.floor() as usize;
        let y0 = yc.floor() as usize;
        let x1 = (x0 + 1).min(self.w - 1);
        let y1 = (y0 + 1).min(self.h - 1);
        let tx = xc - x0 as f64;
        let ty = yc - y0 as f64;

        let v00 = self.get(x0, y0) as f64;
        let v10 = self.get(x1, y0) as f64;
        let v01 = self.get(x0, y1) as f64;
        let v11 = self.get(x1, y1) as f64;
        let top = v00 + (v10 - v00) * tx;
        let bottom = v01 + (v11 - v01) * tx;
        Some((top + (bottom - top) * ty) as f32)
    }
}

impl crate::image::traits::ImageView for ImageF32 {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[f32]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}

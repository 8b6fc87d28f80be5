//! Owned multi-channel f32 image with interleaved channels.
//!
//! Every pixel holds a `channels`-long feature vector stored contiguously, so
//! `pixel(x, y)` is a plain slice borrow. A single channel is the scalar case.
use super::f32::ImageF32;
use super::geometry::ImageGeometry;

#[derive(Clone, Debug, PartialEq)]
pub struct VectorImage {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Feature components per pixel (>= 1)
    pub channels: usize,
    /// Samples between consecutive rows (equals `w * channels`)
    pub stride: usize,
    /// Backing storage, row-major with interleaved channels
    pub data: Vec<f32>,
    /// Physical spacing and origin of the grid
    pub geometry: ImageGeometry,
}

impl VectorImage {
    /// Zero-initialized `w × h` image with `channels` components per pixel.
    ///
    /// Panics when `channels` is zero.
    pub fn new(w: usize, h: usize, channels: usize) -> Self {
        assert!(channels > 0, "feature image needs at least one channel");
        Self {
            w,
            h,
            channels,
            stride: w * channels,
            data: vec![0.0; w * h * channels],
            geometry: ImageGeometry::default(),
        }
    }

    /// Wrap interleaved samples; `None` when the length does not match.
    pub fn from_interleaved(w: usize, h: usize, channels: usize, data: Vec<f32>) -> Option<Self> {
        if channels == 0 || data.len() != w * h * channels {
            return None;
        }
        Some(Self {
            w,
            h,
            channels,
            stride: w * channels,
            data,
            geometry: ImageGeometry::default(),
        })
    }

    /// View a scalar image as a single-channel feature image.
    pub fn from_scalar(image: ImageF32) -> Self {
        let geometry = image.geometry;
        let (w, h) = (image.w, image.h);
        let data = if image.stride == image.w {
            image.data
        } else {
            (0..h)
                .flat_map(|y| image.data[y * image.stride..y * image.stride + w].iter().copied())
                .collect()
        };
        Self {
            w,
            h,
            channels: 1,
            stride: w,
            data,
            geometry,
        }
    }

    pub fn with_geometry(mut self, geometry: ImageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        y * self.stride + x * self.channels
    }

    /// Feature vector at (x, y).
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[f32] {
        let start = self.offset(x, y);
        &self.data[start..start + self.channels]
    }

    #[inline]
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut [f32] {
        let start = self.offset(x, y);
        let channels = self.channels;
        &mut self.data[start..start + channels]
    }

    /// Copy `values` into pixel (x, y).
    ///
    /// Panics when `values` does not hold exactly `channels` components.
    pub fn set_pixel(&mut self, x: usize, y: usize, values: &[f32]) {
        let channels = self.channels;
        assert_eq!(
            values.len(),
            channels,
            "pixel ({x}, {y}) expects {channels} components"
        );
        self.pixel_mut(x, y).copy_from_slice(values);
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.w && y < self.h
    }
}

impl crate::image::traits::ImageView for VectorImage {
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
    fn channels(&self) -> usize {
        self.channels
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.stride;
        &self.data[start..start + self.w * self.channels]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[f32]> {
        (self.stride == self.w * self.channels)
            .then_some(&self.data[..self.w * self.h * self.channels])
    }
}

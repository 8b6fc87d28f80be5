//! I/O helpers for feature images, speed images and JSON.
//!
//! - `load_feature_image`: read a PNG/JPEG into a luma or RGB feature image in [0, 1].
//! - `save_speed_image`: write a signed speed field as a grey PNG (zero at mid-grey).
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageF32, ImageView, VectorImage};
use image::{GrayImage, Luma};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Which channels of a colour image become feature components.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelMode {
    /// One component: the luma of the pixel.
    Luma,
    /// Three components: red, green and blue.
    #[default]
    Rgb,
}

impl ChannelMode {
    pub fn channels(self) -> usize {
        match self {
            ChannelMode::Luma => 1,
            ChannelMode::Rgb => 3,
        }
    }
}

/// Load an image from disk as a feature image with samples scaled to [0, 1].
pub fn load_feature_image(path: &Path, mode: ChannelMode) -> Result<VectorImage, String> {
    let img = image::open(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
    let (w, h, raw) = match mode {
        ChannelMode::Luma => {
            let luma = img.into_luma8();
            (luma.width() as usize, luma.height() as usize, luma.into_raw())
        }
        ChannelMode::Rgb => {
            let rgb = img.into_rgb8();
            (rgb.width() as usize, rgb.height() as usize, rgb.into_raw())
        }
    };
    let data = raw.into_iter().map(|v| v as f32 / 255.0).collect();
    VectorImage::from_interleaved(w, h, mode.channels(), data)
        .ok_or_else(|| format!("Unexpected sample count in {}", path.display()))
}

/// Save a signed speed field as grey levels.
///
/// Values are scaled by the largest magnitude so that zero maps to 128,
/// positive speeds are brighter and negative speeds darker.
pub fn save_speed_image(image: &ImageF32, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let max_abs = image
        .rows()
        .flat_map(|row| row.iter())
        .fold(0.0f32, |acc, v| if v.is_finite() { acc.max(v.abs()) } else { acc });
    let scale = if max_abs > 0.0 { 0.5 / max_abs } else { 0.0 };
    let mut out = GrayImage::new(image.w as u32, image.h as u32);
    for y in 0..image.h {
        let row = image.row(y);
        for (x, &px) in row.iter().enumerate() {
            let v = ((0.5 + px * scale) * 255.0).clamp(0.0, 255.0);
            out.put_pixel(x as u32, y as u32, Luma([v.round() as u8]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

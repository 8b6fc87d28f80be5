use super::timing::TimingBreakdown;
use crate::image::{ImageF32, ImageView};
use crate::levelset::TermWeights;
use serde::Serialize;

/// Shape of the feature image the field was computed from.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
}

/// Value statistics of a speed image.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeedFieldSummary {
    pub min: f32,
    pub max: f32,
    pub mean: f64,
    /// Pixels with positive speed (inside the target iso-distance).
    pub inside_count: usize,
    /// Pixels with negative speed.
    pub outside_count: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeedFieldReport {
    pub input: InputDescriptor,
    pub threshold: f64,
    pub weights: TermWeights,
    pub summary: SpeedFieldSummary,
    pub timings: TimingBreakdown,
}

/// Min/max/mean and sign counts over all pixels; zeros for an empty image.
pub fn summarize_speed_image(image: &ImageF32) -> SpeedFieldSummary {
    let mut count = 0usize;
    let mut sum = 0.0f64;
    let mut summary = SpeedFieldSummary {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
        ..Default::default()
    };
    for &v in image.rows().flatten() {
        summary.min = summary.min.min(v);
        summary.max = summary.max.max(v);
        sum += v as f64;
        count += 1;
        if v > 0.0 {
            summary.inside_count += 1;
        } else if v < 0.0 {
            summary.outside_count += 1;
        }
    }
    if count == 0 {
        return SpeedFieldSummary::default();
    }
    summary.mean = sum / count as f64;
    summary
}

use crate::image::io::ChannelMode;
use crate::image::ImageGeometry;
use crate::levelset::{NeighborhoodRadius, VectorThresholdParams};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct SpeedToolConfig {
    #[serde(rename = "input")]
    pub input: PathBuf,
    /// Which image channels become feature components.
    #[serde(default)]
    pub channels: ChannelMode,
    /// Physical placement of the input grid.
    #[serde(default)]
    pub geometry: ImageGeometry,
    /// Region statistics and target distance.
    pub model: VectorThresholdParams,
    /// Stencil radius handed to the evolution engine.
    #[serde(default)]
    pub radius: NeighborhoodRadius,
    pub output: SpeedOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct SpeedOutputConfig {
    #[serde(rename = "speed_image")]
    pub speed_image: PathBuf,
    #[serde(rename = "summary_json")]
    pub summary_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<SpeedToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub(crate) fn parse_config(data: &str) -> Result<SpeedToolConfig, serde_json::Error> {
    serde_json::from_str(data)
}

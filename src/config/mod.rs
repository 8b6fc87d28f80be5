//! JSON configuration for the command-line tools.

pub mod speed;

pub use speed::{load_config, SpeedOutputConfig, SpeedToolConfig};

//! Serializable reports describing a speed-field computation.
//!
//! `SpeedFieldReport` is what the demo tool writes next to the speed image:
//! the input description, value statistics of the field and stage timings.

pub mod summary;
pub mod timing;

pub use summary::{summarize_speed_image, InputDescriptor, SpeedFieldReport, SpeedFieldSummary};
pub use timing::{StageTiming, TimingBreakdown};

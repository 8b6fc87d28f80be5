use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Wall-clock time spent in one named stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

/// Ordered stage timings plus their total.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.total_ms += elapsed_ms;
        self.stages.push(StageTiming {
            label: label.into(),
            elapsed_ms,
        });
    }

    /// Run `stage`, record its duration under `label` and pass its output through.
    pub fn measure<T>(&mut self, label: impl Into<String>, stage: impl FnOnce() -> T) -> T {
        let t0 = Instant::now();
        let out = stage();
        self.push(label, t0.elapsed().as_secs_f64() * 1000.0);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_records_stage_and_total() {
        let mut timing = TimingBreakdown::default();
        let v = timing.measure("square", || 7 * 7);
        timing.push("fixed", 2.0);
        assert_eq!(v, 49);
        assert_eq!(timing.stages.len(), 2);
        assert_eq!(timing.stages[0].label, "square");
        assert!(timing.total_ms >= 2.0);
    }
}

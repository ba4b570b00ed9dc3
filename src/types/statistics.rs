//! Run statistics for the analysis engine

use crate::utils::math::safe_percentage;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Common trait for statistics collectors
pub trait StatisticsCollector {
    /// Reset all counters to zero
    fn reset(&mut self);

    /// Finalize statistics collection
    fn finish(&mut self);

    /// Get a summary of the statistics
    fn summary(&self) -> String;
}

/// Wall-clock timing for a run
#[derive(Debug, Clone)]
pub struct TimingInfo {
    pub start_time: Instant,
    pub processing_duration: Duration,
}

impl Default for TimingInfo {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            processing_duration: Duration::default(),
        }
    }
}

impl TimingInfo {
    pub fn finish(&mut self) {
        self.processing_duration = self.start_time.elapsed();
    }

    pub fn elapsed(&self) -> Duration {
        if self.processing_duration.is_zero() {
            self.start_time.elapsed()
        } else {
            self.processing_duration
        }
    }
}

/// Counters for one run over an input table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessingStats {
    pub scenarios_read: usize,
    pub scenarios_processed: usize,
    pub scenarios_rejected: usize,
    pub shapes_evaluated: usize,
    pub viable_shapes: usize,
    #[serde(skip)]
    pub timing: TimingInfo,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of evaluated shapes that were viable, as a percentage
    pub fn viable_rate(&self) -> f64 {
        safe_percentage(self.viable_shapes, self.shapes_evaluated)
    }

    /// Share of read scenarios that were rejected, as a percentage
    pub fn rejection_rate(&self) -> f64 {
        safe_percentage(self.scenarios_rejected, self.scenarios_read)
    }
}

impl StatisticsCollector for ProcessingStats {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn finish(&mut self) {
        self.timing.finish();
    }

    fn summary(&self) -> String {
        format!(
            "Scenarios: {} read, {} processed, {} rejected ({:.2}%); shapes: {} evaluated, {} viable ({:.2}%) in {:.3}s",
            self.scenarios_read,
            self.scenarios_processed,
            self.scenarios_rejected,
            self.rejection_rate(),
            self.shapes_evaluated,
            self.viable_shapes,
            self.viable_rate(),
            self.timing.elapsed().as_secs_f64()
        )
    }
}

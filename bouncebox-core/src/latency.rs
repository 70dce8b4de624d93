//! Update latency measurement
//!
//! Times one integration step at a time with a monotonic clock and keeps a
//! running total so the cumulative mean can be reported every frame.

use std::time::Instant;

/// Run `f` once and return how long it took, in whole microseconds
pub fn measure<F: FnOnce()>(f: F) -> u64 {
    let start = Instant::now();
    f();
    let elapsed = start.elapsed().as_micros();
    u64::try_from(elapsed).unwrap_or(u64::MAX)
}

/// Running latency totals for the integration step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LatencyTracker {
    total_elapsed_us: u64,
    frame_count: u64,
    last_us: Option<u64>,
}

impl LatencyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one sample to the totals
    pub fn record(&mut self, sample_us: u64) {
        self.total_elapsed_us = self.total_elapsed_us.saturating_add(sample_us);
        self.frame_count += 1;
        self.last_us = Some(sample_us);
    }

    /// Measure `f`, record the sample and return it
    pub fn measure_and_record<F: FnOnce()>(&mut self, f: F) -> u64 {
        let sample = measure(f);
        self.record(sample);
        sample
    }

    /// Mean of all recorded samples, `None` until something was recorded
    pub fn average(&self) -> Option<f64> {
        if self.frame_count == 0 {
            return None;
        }
        Some(self.total_elapsed_us as f64 / self.frame_count as f64)
    }

    pub fn total_elapsed_us(&self) -> u64 {
        self.total_elapsed_us
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn last_us(&self) -> Option<u64> {
        self.last_us
    }
}

//! Windowless surface for benchmarking the update step
//!
//! Frames are still composed into a raster so the per-frame work matches
//! the windowed run; they are just never shown. Input is replaced by a
//! frame budget that presses the exit key once it runs out.

use bouncebox_core::{
    FrameCompositor, FrameSink, FrameView, InputSource, KeyCode, Result, RunSummary,
    SimulationLoop,
};
use std::time::Duration;

/// Composes frames and drops them
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    compositor: FrameCompositor,
    presented: u64,
}

impl FrameSink for HeadlessSurface {
    fn present(&mut self, frame: &FrameView<'_>) -> Result<()> {
        let [instant, average] = self.compositor.compose(frame);
        self.presented += 1;
        if self.presented % 100 == 0 {
            log::debug!("frame {}: {} / {}", self.presented, instant.text, average.text);
        }
        Ok(())
    }
}

/// Reports the exit key after a fixed number of polls
#[derive(Debug)]
pub struct FrameBudget {
    remaining: u64,
    exit_key: KeyCode,
}

impl FrameBudget {
    pub fn new(frames: u64, exit_key: KeyCode) -> Self {
        Self {
            remaining: frames,
            exit_key,
        }
    }
}

impl InputSource for FrameBudget {
    fn poll_key(&mut self, wait: Duration) -> Option<KeyCode> {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            return Some(self.exit_key);
        }
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
        None
    }
}

/// Run `frames` iterations (at least one) without a window
pub fn run(sim: SimulationLoop, frames: u64) -> Result<RunSummary> {
    let mut surface = HeadlessSurface::default();
    let mut input = FrameBudget::new(frames, KeyCode::ESCAPE);
    sim.run(&mut surface, &mut input)
}

pub mod config;
pub mod engine;
pub mod error;
pub mod integrator;
pub mod latency;
pub mod render;
pub mod runtime;

pub use config::SimConfig;
pub use engine::{Particle, ParticleBuffer, SpawnConfig, ARENA_SIZE};
pub use error::{Error, Result};
pub use latency::{measure, LatencyTracker};
pub use render::{FrameCompositor, Raster, TextOverlay};
pub use runtime::{
    FrameSink, FrameView, InputSource, KeyCode, LoopState, RunSummary, SimulationLoop,
};

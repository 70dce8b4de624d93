//! Simulation parameters
//!
//! Everything here is fixed for the lifetime of a `SimulationLoop`; there
//! is no way to change a running simulation's parameters.

use crate::engine::{SpawnConfig, MAX_VELOCITY_STEP};
use crate::error::{Error, Result};
use crate::runtime::KeyCode;
use std::time::Duration;

pub const DEFAULT_PARTICLE_COUNT: usize = 5000;
pub const DEFAULT_SPEED: f32 = 5.0;
pub const DEFAULT_DT: f32 = 0.1;
pub const DEFAULT_FRAME_WAIT: Duration = Duration::from_millis(16);

pub const REDUCED_PARTICLE_COUNT: usize = 1000;
pub const REDUCED_SPEED: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub particle_count: usize,
    pub speed: f32,
    pub dt: f32,
    /// Bounded wait handed to the input poll each iteration
    pub frame_wait: Duration,
    pub exit_key: KeyCode,
    pub include_zero_velocity: bool,
    /// Fixed RNG seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            speed: DEFAULT_SPEED,
            dt: DEFAULT_DT,
            frame_wait: DEFAULT_FRAME_WAIT,
            exit_key: KeyCode::ESCAPE,
            include_zero_velocity: true,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Smaller, slower population with no stationary axes
    pub fn reduced() -> Self {
        Self {
            particle_count: REDUCED_PARTICLE_COUNT,
            speed: REDUCED_SPEED,
            include_zero_velocity: false,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "dt must be finite and > 0, got {}",
                self.dt
            )));
        }
        // The largest velocity step must stay finite too
        if !(self.speed * MAX_VELOCITY_STEP as f32).is_finite() {
            return Err(Error::InvalidConfig(format!(
                "speed must keep velocities finite, got {}",
                self.speed
            )));
        }
        Ok(())
    }

    pub fn spawn_config(&self) -> SpawnConfig {
        SpawnConfig {
            count: self.particle_count,
            speed: self.speed,
            include_zero: self.include_zero_velocity,
        }
    }
}

use crate::config::SimConfig;
use crate::engine::{Particle, ParticleBuffer};
use crate::error::Result;
use crate::integrator::step;
use crate::latency::LatencyTracker;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

/// Key code reported by an input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const ESCAPE: KeyCode = KeyCode(27);
}

/// Everything a presentation surface needs to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub particles: &'a [Particle],
    /// Duration of this frame's integration step
    pub instant_us: u64,
    /// Mean integration duration over all frames so far
    pub average_us: f64,
}

/// Where composed frames go
pub trait FrameSink {
    fn present(&mut self, frame: &FrameView<'_>) -> Result<()>;
}

/// Where key presses come from
pub trait InputSource {
    /// Wait at most `wait` for a key; `None` when nothing was pressed
    fn poll_key(&mut self, wait: Duration) -> Option<KeyCode>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminated,
}

/// Final numbers of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub average_us: Option<f64>,
    pub particle_count: usize,
}

/// Owns the particle population and latency totals and sequences
/// integrate, record, present and poll once per iteration.
#[derive(Debug)]
pub struct SimulationLoop {
    particles: ParticleBuffer,
    latency: LatencyTracker,
    dt: f32,
    frame_wait: Duration,
    exit_key: KeyCode,
    state: LoopState,
}

impl SimulationLoop {
    /// Spawn a fresh population from the config
    pub fn new(config: &SimConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let particles = ParticleBuffer::spawn(&config.spawn_config(), &mut rng);
        Self::with_particles(particles, config)
    }

    /// Run over a caller-supplied population; the config's spawn fields are ignored
    pub fn with_particles(particles: ParticleBuffer, config: &SimConfig) -> Result<Self> {
        config.validate()?;
        log::info!(
            "simulation ready: {} particles, dt = {}",
            particles.len(),
            config.dt
        );
        Ok(Self {
            particles,
            latency: LatencyTracker::new(),
            dt: config.dt,
            frame_wait: config.frame_wait,
            exit_key: config.exit_key,
            state: LoopState::Running,
        })
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn particles(&self) -> &ParticleBuffer {
        &self.particles
    }

    pub fn latency(&self) -> &LatencyTracker {
        &self.latency
    }

    /// Run one iteration. Does nothing once terminated.
    pub fn iterate<S, I>(&mut self, sink: &mut S, input: &mut I) -> Result<LoopState>
    where
        S: FrameSink + ?Sized,
        I: InputSource + ?Sized,
    {
        if self.state == LoopState::Terminated {
            return Ok(self.state);
        }

        // Only the physics step is timed; presenting is kept out of the sample.
        let dt = self.dt;
        let particles = self.particles.as_mut_slice();
        let instant_us = self.latency.measure_and_record(|| step(particles, dt));
        let average_us = self.latency.average().unwrap_or(instant_us as f64);

        log::trace!(
            "frame {}: instant {} us, average {:.1} us",
            self.latency.frame_count(),
            instant_us,
            average_us
        );

        sink.present(&FrameView {
            particles: self.particles.as_slice(),
            instant_us,
            average_us,
        })?;

        let key = input.poll_key(self.frame_wait);
        Ok(self.observe_key(key))
    }

    /// Apply the result of an input poll without stepping.
    ///
    /// Surfaces that cannot block inside `poll_key` report keys pressed
    /// later in the wait through here.
    pub fn observe_key(&mut self, key: Option<KeyCode>) -> LoopState {
        if self.state == LoopState::Running && key == Some(self.exit_key) {
            log::debug!("exit key {:?} received, terminating", self.exit_key);
            self.state = LoopState::Terminated;
        }
        self.state
    }

    /// Iterate until the exit key is seen, then release the population
    pub fn run<S, I>(mut self, sink: &mut S, input: &mut I) -> Result<RunSummary>
    where
        S: FrameSink + ?Sized,
        I: InputSource + ?Sized,
    {
        while self.iterate(sink, input)? == LoopState::Running {}
        Ok(self.finish())
    }

    /// Consume the loop and report its totals
    pub fn finish(self) -> RunSummary {
        let summary = RunSummary {
            frames: self.latency.frame_count(),
            average_us: self.latency.average(),
            particle_count: self.particles.len(),
        };
        log::info!(
            "simulation finished after {} frames, average {:.1} us",
            summary.frames,
            summary.average_us.unwrap_or(0.0)
        );
        summary
    }
}

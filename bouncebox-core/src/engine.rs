use glam::Vec2;
use rand::Rng;
use std::ops::Index;

/// Side length of the square arena particles bounce around in
pub const ARENA_SIZE: f32 = 500.0;

/// Largest absolute integer velocity step drawn at spawn
pub const MAX_VELOCITY_STEP: i32 = 5;

/// A point particle in the simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Particle {
    pub fn new(x: f32, y: f32, vx: f32, vy: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
        }
    }
}

/// How a fresh population is laid out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnConfig {
    pub count: usize,
    /// Multiplier applied to the integer velocity steps
    pub speed: f32,
    /// Whether a velocity step of zero can be drawn
    pub include_zero: bool,
}

/// Fixed-length population of particles.
///
/// The length is set at construction and there is no way to grow or
/// shrink the buffer afterwards: mutation only goes through slices.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleBuffer {
    particles: Vec<Particle>,
}

impl ParticleBuffer {
    /// Spawn `spawn.count` particles, drawing x, y, vx, vy in that order
    /// for each one (4 draws per particle).
    pub fn spawn<R: Rng>(spawn: &SpawnConfig, rng: &mut R) -> Self {
        let mut particles = Vec::with_capacity(spawn.count);
        for _ in 0..spawn.count {
            let x = rng.random_range(0.0..ARENA_SIZE);
            let y = rng.random_range(0.0..ARENA_SIZE);
            let vx = draw_velocity_step(rng, spawn.include_zero) as f32 * spawn.speed;
            let vy = draw_velocity_step(rng, spawn.include_zero) as f32 * spawn.speed;
            particles.push(Particle::new(x, y, vx, vy));
        }
        Self { particles }
    }

    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
        self.particles.iter_mut()
    }
}

impl Index<usize> for ParticleBuffer {
    type Output = Particle;

    fn index(&self, idx: usize) -> &Particle {
        &self.particles[idx]
    }
}

impl<'a> IntoIterator for &'a ParticleBuffer {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}

/// One integer step from the symmetric set around zero, using a single draw.
fn draw_velocity_step<R: Rng>(rng: &mut R, include_zero: bool) -> i32 {
    if include_zero {
        rng.random_range(-MAX_VELOCITY_STEP..=MAX_VELOCITY_STEP)
    } else {
        // 0..10 maps onto -5..=-1 and 1..=5
        let k = rng.random_range(0..2 * MAX_VELOCITY_STEP);
        if k < MAX_VELOCITY_STEP {
            k - MAX_VELOCITY_STEP
        } else {
            k - MAX_VELOCITY_STEP + 1
        }
    }
}

use crate::engine::{Particle, ARENA_SIZE};

/// Step every particle forward by dt using explicit Euler integration.
///
/// After moving, a coordinate outside `[0, ARENA_SIZE]` flips the sign of
/// the matching velocity component. The position itself is left where it
/// landed, so an overshooting particle sits outside the arena for one frame.
pub fn step(particles: &mut [Particle], dt: f32) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel * dt;

        if particle.pos.x < 0.0 || particle.pos.x > ARENA_SIZE {
            particle.vel.x = -particle.vel.x;
        }
        if particle.pos.y < 0.0 || particle.pos.y > ARENA_SIZE {
            particle.vel.y = -particle.vel.y;
        }
    }
}

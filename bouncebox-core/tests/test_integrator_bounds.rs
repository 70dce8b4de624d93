//! Unit tests for the Euler step and wall reflection

use bouncebox_core::engine::{Particle, ParticleBuffer};
use bouncebox_core::integrator::step;
use bouncebox_core::tests::test_helpers::approx_eq_f32;

#[test]
fn test_overshoot_reflects_without_clamping() {
    let mut particles = vec![Particle::new(499.0, 100.0, 10.0, 0.0)];

    step(&mut particles, 1.0);

    // Position stays outside the arena, only the velocity flips
    assert_eq!(particles[0].pos.x, 509.0);
    assert_eq!(particles[0].pos.y, 100.0);
    assert_eq!(particles[0].vel.x, -10.0);
    assert_eq!(particles[0].vel.y, 0.0);
}

#[test]
fn test_interior_step_keeps_velocity() {
    let mut particles = vec![Particle::new(250.0, 250.0, 5.0, -5.0)];

    step(&mut particles, 0.1);

    assert!(approx_eq_f32(particles[0].pos.x, 250.5, 1e-4));
    assert!(approx_eq_f32(particles[0].pos.y, 249.5, 1e-4));
    assert_eq!(particles[0].vel.x, 5.0);
    assert_eq!(particles[0].vel.y, -5.0);
}

#[test]
fn test_both_axes_reflect_in_same_step() {
    let mut particles = vec![Particle::new(1.0, 499.0, -20.0, 20.0)];

    step(&mut particles, 0.1);

    assert!(approx_eq_f32(particles[0].pos.x, -1.0, 1e-4));
    assert!(approx_eq_f32(particles[0].pos.y, 501.0, 1e-4));
    assert_eq!(particles[0].vel.x, 20.0);
    assert_eq!(particles[0].vel.y, -20.0);
}

#[test]
fn test_landing_exactly_on_wall_does_not_reflect() {
    let mut particles = vec![
        Particle::new(490.0, 10.0, 10.0, -10.0),
        Particle::new(0.0, 500.0, 0.0, 0.0),
    ];

    step(&mut particles, 1.0);

    assert_eq!(particles[0].pos.x, 500.0);
    assert_eq!(particles[0].pos.y, 0.0);
    assert_eq!(particles[0].vel.x, 10.0);
    assert_eq!(particles[0].vel.y, -10.0);
    assert_eq!(particles[1].vel.x, 0.0);
    assert_eq!(particles[1].vel.y, 0.0);
}

#[test]
fn test_overshot_particle_returns_next_step() {
    let mut particles = vec![Particle::new(499.0, 100.0, 10.0, 0.0)];

    step(&mut particles, 1.0);
    step(&mut particles, 1.0);

    // Back inside with the reflected velocity, no second flip
    assert_eq!(particles[0].pos.x, 499.0);
    assert_eq!(particles[0].vel.x, -10.0);
}

#[test]
fn test_position_is_never_clamped() {
    let start = vec![
        Particle::new(0.5, 0.5, -25.0, -25.0),
        Particle::new(499.5, 250.0, 25.0, 0.0),
        Particle::new(250.0, 499.9, 0.0, 25.0),
        Particle::new(100.0, 100.0, 5.0, 5.0),
    ];
    let dt = 0.1;
    let mut particles = start.clone();

    step(&mut particles, dt);

    for (before, after) in start.iter().zip(particles.iter()) {
        assert_eq!(after.pos, before.pos + before.vel * dt);
    }
}

#[test]
fn test_reflection_law_matches_updated_position() {
    let start: Vec<Particle> = (0..50)
        .map(|i| {
            let f = i as f32;
            Particle::new(f * 10.0, 500.0 - f * 10.0, (f - 25.0) * 3.0, (25.0 - f) * 2.0)
        })
        .collect();
    let dt = 0.5;
    let mut particles = start.clone();

    step(&mut particles, dt);

    for (before, after) in start.iter().zip(particles.iter()) {
        let x_out = after.pos.x < 0.0 || after.pos.x > 500.0;
        let y_out = after.pos.y < 0.0 || after.pos.y > 500.0;
        let expected_vx = if x_out { -before.vel.x } else { before.vel.x };
        let expected_vy = if y_out { -before.vel.y } else { before.vel.y };
        assert_eq!(after.vel.x, expected_vx);
        assert_eq!(after.vel.y, expected_vy);
    }
}

#[test]
fn test_empty_population_is_noop() {
    let mut particles: Vec<Particle> = Vec::new();
    step(&mut particles, 0.1);
    assert!(particles.is_empty());

    let mut buffer = ParticleBuffer::from_particles(Vec::new());
    step(buffer.as_mut_slice(), 0.1);
    assert!(buffer.is_empty());
}

#[test]
fn test_population_size_is_stable() {
    let mut buffer = ParticleBuffer::from_particles(
        (0..100)
            .map(|i| Particle::new(i as f32 * 5.0, 250.0, 25.0, -25.0))
            .collect(),
    );

    for _ in 0..1000 {
        step(buffer.as_mut_slice(), 0.1);
    }

    assert_eq!(buffer.len(), 100);
}

//! Tests for composing particles and latency overlays into a raster

use bouncebox_core::engine::Particle;
use bouncebox_core::render::{
    average_label, instant_label, particle_color, FrameCompositor, BLACK, GREEN, RED, WHITE,
    YELLOW,
};
use bouncebox_core::FrameView;

#[test]
fn test_default_raster_is_arena_sized() {
    let compositor = FrameCompositor::default();
    assert_eq!(compositor.raster().width(), 500);
    assert_eq!(compositor.raster().height(), 500);
    assert_eq!(compositor.raster().as_rgb_bytes().len(), 500 * 500 * 3);
}

#[test]
fn test_colors_split_population_in_half() {
    assert_eq!(particle_color(0, 4), RED);
    assert_eq!(particle_color(1, 4), RED);
    assert_eq!(particle_color(2, 4), YELLOW);
    assert_eq!(particle_color(3, 4), YELLOW);
    // Odd counts put the middle particle in the second half
    assert_eq!(particle_color(1, 3), YELLOW);
    assert_eq!(particle_color(0, 1), YELLOW);
}

#[test]
fn test_compose_stamps_particles() {
    let particles = vec![
        Particle::new(100.0, 100.0, 0.0, 0.0),
        Particle::new(400.2, 300.7, 0.0, 0.0),
    ];
    let mut compositor = FrameCompositor::default();

    compositor.compose(&FrameView {
        particles: &particles,
        instant_us: 12,
        average_us: 10.0,
    });

    let raster = compositor.raster();
    assert_eq!(raster.pixel(100, 100), Some(RED));
    assert_eq!(raster.pixel(102, 100), Some(RED));
    assert_eq!(raster.pixel(400, 301), Some(YELLOW));
    assert_eq!(raster.pixel(250, 250), Some(BLACK));
}

#[test]
fn test_compose_clears_previous_frame() {
    let mut compositor = FrameCompositor::default();
    let first = vec![Particle::new(50.0, 50.0, 0.0, 0.0)];
    let second = vec![Particle::new(450.0, 450.0, 0.0, 0.0)];

    compositor.compose(&FrameView {
        particles: &first,
        instant_us: 0,
        average_us: 0.0,
    });
    compositor.compose(&FrameView {
        particles: &second,
        instant_us: 0,
        average_us: 0.0,
    });

    assert_eq!(compositor.raster().pixel(50, 50), Some(BLACK));
    assert_eq!(compositor.raster().pixel(450, 450), Some(YELLOW));
}

#[test]
fn test_particles_outside_canvas_are_clipped() {
    let particles = vec![
        Particle::new(509.0, 100.0, 0.0, 0.0),
        Particle::new(-1.0, 100.0, 0.0, 0.0),
    ];
    let mut compositor = FrameCompositor::default();

    compositor.compose(&FrameView {
        particles: &particles,
        instant_us: 0,
        average_us: 0.0,
    });

    assert_eq!(compositor.raster().pixel(499, 100), Some(BLACK));
    assert_eq!(compositor.raster().pixel(0, 100), Some(YELLOW));
    assert_eq!(compositor.raster().pixel(1, 100), Some(YELLOW));
}

#[test]
fn test_overlays_text_and_placement() {
    let mut compositor = FrameCompositor::default();
    let [instant, average] = compositor.compose(&FrameView {
        particles: &[],
        instant_us: 42,
        average_us: 37.9,
    });

    assert_eq!(instant.text, "Instant: 42 us");
    assert_eq!(instant.pos, (10.0, 30.0));
    assert_eq!(instant.color, GREEN);
    assert_eq!(average.text, "Average: 37 us");
    assert_eq!(average.pos, (10.0, 60.0));
    assert_eq!(average.color, WHITE);
}

#[test]
fn test_labels_truncate_average() {
    assert_eq!(instant_label(0), "Instant: 0 us");
    assert_eq!(average_label(199.999), "Average: 199 us");
    assert_eq!(average_label(200.0), "Average: 200 us");
}

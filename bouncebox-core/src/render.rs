//! Software raster for presenting the particle field
//!
//! The compositor stamps every particle into a fixed RGB raster that is
//! reused from frame to frame. Text is not rasterised here: the two
//! latency overlays are returned as positioned strings for the
//! presentation surface to draw with its own font.

use crate::engine::ARENA_SIZE;
use crate::runtime::FrameView;

pub type Rgb = [u8; 3];

pub const BLACK: Rgb = [0, 0, 0];
pub const RED: Rgb = [255, 0, 0];
pub const YELLOW: Rgb = [255, 255, 0];
pub const GREEN: Rgb = [0, 255, 0];
pub const WHITE: Rgb = [255, 255, 255];

pub const PARTICLE_RADIUS: i32 = 2;
pub const INSTANT_TEXT_POS: (f32, f32) = (10.0, 30.0);
pub const AVERAGE_TEXT_POS: (f32, f32) = (10.0, 60.0);

/// Row-major 3-channel image
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Raster {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![BLACK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.pixels.fill(BLACK);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Flat `[r, g, b, r, g, b, ...]` view of the pixels
    pub fn as_rgb_bytes(&self) -> &[u8] {
        self.pixels.as_flattened()
    }

    /// Fill a disc centred on (cx, cy); the parts off the raster are dropped.
    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Rgb) {
        let r_sq = radius * radius;
        let x_min = cx.saturating_sub(radius).max(0);
        let x_max = cx.saturating_add(radius).min(self.width as i32 - 1);
        let y_min = cy.saturating_sub(radius).max(0);
        let y_max = cy.saturating_add(radius).min(self.height as i32 - 1);

        for y in y_min..=y_max {
            let dy = y - cy;
            for x in x_min..=x_max {
                let dx = x - cx;
                if dx * dx + dy * dy <= r_sq {
                    self.pixels[y as usize * self.width + x as usize] = color;
                }
            }
        }
    }
}

/// A string the surface should draw with its left baseline at `pos`
#[derive(Debug, Clone, PartialEq)]
pub struct TextOverlay {
    pub text: String,
    pub pos: (f32, f32),
    pub color: Rgb,
}

/// Colour of the particle at `index` in a population of `count`
pub fn particle_color(index: usize, count: usize) -> Rgb {
    if index < count / 2 {
        RED
    } else {
        YELLOW
    }
}

pub fn instant_label(instant_us: u64) -> String {
    format!("Instant: {} us", instant_us)
}

pub fn average_label(average_us: f64) -> String {
    format!("Average: {} us", average_us.trunc() as u64)
}

/// Turns a frame view into a raster plus the latency overlays
#[derive(Debug)]
pub struct FrameCompositor {
    raster: Raster,
}

impl Default for FrameCompositor {
    fn default() -> Self {
        let side = ARENA_SIZE as usize;
        Self::new(side, side)
    }
}

impl FrameCompositor {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            raster: Raster::new(width, height),
        }
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn compose(&mut self, frame: &FrameView<'_>) -> [TextOverlay; 2] {
        self.raster.clear();

        let count = frame.particles.len();
        for (i, particle) in frame.particles.iter().enumerate() {
            let cx = particle.pos.x.round() as i32;
            let cy = particle.pos.y.round() as i32;
            self.raster
                .fill_circle(cx, cy, PARTICLE_RADIUS, particle_color(i, count));
        }

        [
            TextOverlay {
                text: instant_label(frame.instant_us),
                pos: INSTANT_TEXT_POS,
                color: GREEN,
            },
            TextOverlay {
                text: average_label(frame.average_us),
                pos: AVERAGE_TEXT_POS,
                color: WHITE,
            },
        ]
    }
}

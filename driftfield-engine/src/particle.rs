// Particle model and spawn rules
//
// One spawn rule serves both batch initialization and the replacement of a
// particle that drifted off the surface: same slot, fresh random attributes.

use std::ops::Range;

use rand::Rng;

/// Probability that a spawned particle uses the accent palette.
const ACCENT_PROBABILITY: f64 = 0.4;
/// Per-axis drift bound, surface units per frame.
const MAX_DRIFT: f32 = 0.25;
/// Dot radius bounds, surface units.
const RADIUS_RANGE: Range<f32> = 0.5..2.0;
/// Dot opacity bounds.
const OPACITY_RANGE: Range<f32> = 0.1..0.6;

/// Palette selector fixed at spawn. Accent particles are the rarer, brighter
/// population; the rest render in the theme's base color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorClass {
    Accent,
    Base,
}

/// One drifting decorative point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position in surface units, within [0, width) x [0, height)
    pub x: f32,
    pub y: f32,
    /// Per-frame position deltas, fixed at spawn
    pub vx: f32,
    pub vy: f32,
    /// Dot radius, fixed at spawn
    pub radius: f32,
    /// Dot opacity, fixed at spawn
    pub opacity: f32,
    /// Palette selector, fixed at spawn
    pub class: ColorClass,
}

impl Particle {
    /// Spawn a particle with uniformly random attributes inside the surface.
    pub fn spawn<R: Rng>(rng: &mut R, width: f32, height: f32) -> Self {
        Self {
            x: rng.gen_range(0.0..width),
            y: rng.gen_range(0.0..height),
            vx: rng.gen_range(-MAX_DRIFT..MAX_DRIFT),
            vy: rng.gen_range(-MAX_DRIFT..MAX_DRIFT),
            radius: rng.gen_range(RADIUS_RANGE),
            opacity: rng.gen_range(OPACITY_RANGE),
            class: if rng.gen_bool(ACCENT_PROBABILITY) {
                ColorClass::Accent
            } else {
                ColorClass::Base
            },
        }
    }

    /// Advance one frame. Returns false when the particle has left the
    /// surface on either axis and its slot must be respawned.
    pub fn step(&mut self, width: f32, height: f32) -> bool {
        self.x += self.vx;
        self.y += self.vy;
        self.in_bounds(width, height)
    }

    /// Whether the particle sits inside [0, width) x [0, height).
    pub fn in_bounds(&self, width: f32, height: f32) -> bool {
        self.x >= 0.0 && self.x < width && self.y >= 0.0 && self.y < height
    }
}

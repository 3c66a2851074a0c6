// Frame scene: the draw commands one advance produces
//
// Keeping the frame as plain data keeps the engine free of I/O and makes the
// link-opacity law directly testable.

use crate::particle::ColorClass;

/// Pair distance, in surface units, below which particles are connected.
pub const LINK_RADIUS: f32 = 120.0;
/// Link opacity at zero distance; fades linearly to nothing at LINK_RADIUS.
const LINK_ALPHA_PEAK: f32 = 0.08;

/// A filled circle for one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub opacity: f32,
    pub class: ColorClass,
}

/// A straight connector between two nearby particles, drawn in the theme's
/// accent color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub alpha: f32,
}

/// Everything one frame paints, in paint order: clear the surface, then
/// every dot, then every link.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub dots: Vec<Dot>,
    pub links: Vec<Link>,
}

/// Link opacity for a pair at the given distance, or None when the pair is
/// too far apart to connect.
pub fn link_alpha(distance: f32) -> Option<f32> {
    if distance < LINK_RADIUS {
        Some(LINK_ALPHA_PEAK * (1.0 - distance / LINK_RADIUS))
    } else {
        None
    }
}

// Particle field: the drifting collection owned by one surface
//
// Density follows the surface area (one particle per 8000 units², capped at
// 120), recomputed on every (re)initialization. A resize never rescales in
// place: the whole collection is discarded and respawned.

use log::debug;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::engine::Animation;
use crate::error::{EngineError, EngineResult};
use crate::particle::Particle;
use crate::scene::{link_alpha, Dot, Link, Scene};

/// Surface area, in units², claimed by each particle.
const AREA_PER_PARTICLE: f32 = 8000.0;
/// Population cap regardless of surface area.
const MAX_PARTICLES: usize = 120;

/// Tunables for a field animation.
#[derive(Debug, Clone)]
pub struct FieldOptions {
    /// Target frames per second
    pub fps: u32,
    /// Fixed RNG seed; None seeds from the OS
    pub seed: Option<u64>,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self { fps: 60, seed: None }
    }
}

/// The particle collection for one drawing surface.
///
/// Owns `{width, height, particles, rng}` explicitly so several surfaces can
/// run independent fields. The field is driven from a single loop through
/// `&mut self`; concurrent drivers would need to serialize access themselves.
pub struct ParticleField {
    width: f32,
    height: f32,
    particles: Vec<Particle>,
    rng: SmallRng,
}

impl ParticleField {
    /// Create a field sized to the given surface and populate it.
    pub fn new(width: f32, height: f32, seed: Option<u64>) -> EngineResult<Self> {
        validate_dimensions(width, height)?;
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let mut field = Self {
            width,
            height,
            particles: Vec::new(),
            rng,
        };
        field.initialize();
        Ok(field)
    }

    /// Particle count the current surface area calls for.
    pub fn target_count(&self) -> usize {
        let by_area = (self.width * self.height / AREA_PER_PARTICLE).floor() as usize;
        by_area.min(MAX_PARTICLES)
    }

    /// Discard any existing particles and spawn a fresh batch.
    fn initialize(&mut self) {
        let count = self.target_count();
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            let particle = Particle::spawn(&mut self.rng, self.width, self.height);
            self.particles.push(particle);
        }
        debug!(
            "Driftfield: field initialized with {} particles on {}x{} units",
            count, self.width, self.height
        );
    }

    /// Adopt new surface dimensions and rebuild the collection from scratch.
    /// No particle state survives a resize.
    pub fn resize(&mut self, width: f32, height: f32) -> EngineResult<()> {
        validate_dimensions(width, height)?;
        self.width = width;
        self.height = height;
        self.initialize();
        Ok(())
    }

    /// Advance every particle one frame and produce the scene to paint.
    pub fn advance(&mut self) -> Scene {
        for i in 0..self.particles.len() {
            let mut particle = self.particles[i];
            if !particle.step(self.width, self.height) {
                // Teleport-and-rerandomize: the slot is refilled, the
                // wanderer is never clamped or bounced back.
                particle = Particle::spawn(&mut self.rng, self.width, self.height);
            }
            self.particles[i] = particle;
        }

        let mut scene = Scene {
            width: self.width,
            height: self.height,
            dots: Vec::with_capacity(self.particles.len()),
            links: Vec::new(),
        };
        for particle in &self.particles {
            scene.dots.push(Dot {
                x: particle.x,
                y: particle.y,
                radius: particle.radius,
                opacity: particle.opacity,
                class: particle.class,
            });
        }
        // All unordered pairs. The cap keeps this under ~7200 distance checks
        // per frame, so no spatial index is warranted.
        for i in 0..self.particles.len() {
            for j in (i + 1)..self.particles.len() {
                let a = &self.particles[i];
                let b = &self.particles[j];
                let distance = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
                if let Some(alpha) = link_alpha(distance) {
                    scene.links.push(Link {
                        x1: a.x,
                        y1: a.y,
                        x2: b.x,
                        y2: b.y,
                        alpha,
                    });
                }
            }
        }
        scene
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

/// Infinite plexus animation over one particle field.
pub struct FieldAnimation {
    field: ParticleField,
    fps: u32,
}

impl FieldAnimation {
    pub fn new(width: f32, height: f32, options: FieldOptions) -> EngineResult<Self> {
        let field = ParticleField::new(width, height, options.seed)?;
        Ok(Self {
            field,
            fps: options.fps,
        })
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// Forward a surface resize to the field.
    pub fn resize(&mut self, width: f32, height: f32) -> EngineResult<()> {
        self.field.resize(width, height)
    }
}

impl Animation for FieldAnimation {
    type Frame = Scene;

    fn next_frame(&mut self) -> Option<Scene> {
        // The field animation never completes on its own; it stops when the
        // driving loop is cancelled.
        Some(self.field.advance())
    }

    fn target_fps(&self) -> u32 {
        self.fps
    }

    fn reset(&mut self) {
        self.field.initialize();
    }
}

fn validate_dimensions(width: f32, height: f32) -> EngineResult<()> {
    if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
        return Err(EngineError::InvalidDimensions { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::ColorClass;

    fn still_particle(x: f32, y: f32) -> Particle {
        Particle {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            radius: 1.0,
            opacity: 0.5,
            class: ColorClass::Base,
        }
    }

    #[test]
    fn test_population_follows_area() {
        // 800x600 = 480_000 units² -> 60 particles
        let field = ParticleField::new(800.0, 600.0, Some(1)).unwrap();
        assert_eq!(field.particles().len(), 60);
    }

    #[test]
    fn test_population_is_capped() {
        // 2000x2000 = 4_000_000 units² -> 500 by area, capped at 120
        let field = ParticleField::new(2000.0, 2000.0, Some(1)).unwrap();
        assert_eq!(field.particles().len(), 120);
    }

    #[test]
    fn test_tiny_surface_has_no_particles() {
        let field = ParticleField::new(40.0, 40.0, Some(1)).unwrap();
        assert!(field.particles().is_empty());
    }

    #[test]
    fn test_invalid_dimensions_are_rejected() {
        assert!(ParticleField::new(0.0, 600.0, None).is_err());
        assert!(ParticleField::new(800.0, -1.0, None).is_err());
        assert!(ParticleField::new(f32::NAN, 600.0, None).is_err());
        assert!(ParticleField::new(f32::INFINITY, 600.0, None).is_err());
    }

    #[test]
    fn test_particles_stay_in_bounds_across_frames() {
        let mut field = ParticleField::new(400.0, 240.0, Some(99)).unwrap();
        for _ in 0..1000 {
            field.advance();
            for particle in field.particles() {
                assert!(particle.in_bounds(400.0, 240.0));
            }
        }
    }

    #[test]
    fn test_departed_particle_is_respawned_in_slot() {
        let mut field = ParticleField::new(800.0, 600.0, Some(5)).unwrap();
        field.particles[3] = Particle {
            vx: 0.25,
            ..still_particle(799.9, 300.0)
        };
        field.advance();
        let replacement = field.particles()[3];
        assert!(replacement.in_bounds(800.0, 600.0));
        // A forced respawn rerolls every attribute, so the stand-still
        // velocity cannot survive.
        assert!(replacement.vx != 0.25 || replacement.vy != 0.0);
        assert_eq!(field.particles().len(), 60);
    }

    #[test]
    fn test_resize_replaces_collection() {
        let mut field = ParticleField::new(800.0, 600.0, Some(11)).unwrap();
        let before = field.particles().to_vec();
        field.resize(1000.0, 800.0).unwrap();
        // 1000x800 = 800_000 units² -> 100 particles
        assert_eq!(field.particles().len(), 100);
        assert_ne!(&before[..], &field.particles()[..before.len().min(100)]);
        for particle in field.particles() {
            assert!(particle.in_bounds(1000.0, 800.0));
        }
    }

    #[test]
    fn test_seeded_fields_are_reproducible() {
        let mut a = ParticleField::new(640.0, 480.0, Some(2024)).unwrap();
        let mut b = ParticleField::new(640.0, 480.0, Some(2024)).unwrap();
        for _ in 0..50 {
            assert_eq!(a.advance(), b.advance());
        }
    }

    #[test]
    fn test_scene_has_one_dot_per_particle() {
        let mut field = ParticleField::new(800.0, 600.0, Some(3)).unwrap();
        let scene = field.advance();
        assert_eq!(scene.dots.len(), field.particles().len());
        assert_eq!(scene.width, 800.0);
        assert_eq!(scene.height, 600.0);
    }

    #[test]
    fn test_close_pair_is_linked() {
        let mut field = ParticleField::new(800.0, 600.0, Some(8)).unwrap();
        field.particles = vec![still_particle(0.0, 0.0), still_particle(100.0, 0.0)];
        let scene = field.advance();
        assert_eq!(scene.links.len(), 1);
        let link = scene.links[0];
        assert!((link.alpha - 0.08 * (1.0 - 100.0 / 120.0)).abs() < 1e-6);
    }

    #[test]
    fn test_distant_pair_is_not_linked() {
        let mut field = ParticleField::new(800.0, 600.0, Some(8)).unwrap();
        field.particles = vec![still_particle(0.0, 0.0), still_particle(200.0, 0.0)];
        let scene = field.advance();
        assert!(scene.links.is_empty());
    }

    #[test]
    fn test_animation_never_completes() {
        let mut animation =
            FieldAnimation::new(400.0, 240.0, FieldOptions::default()).unwrap();
        for _ in 0..1000 {
            assert!(animation.next_frame().is_some());
        }
    }

    #[test]
    fn test_animation_resize_recounts() {
        let mut animation = FieldAnimation::new(
            800.0,
            600.0,
            FieldOptions {
                fps: 60,
                seed: Some(13),
            },
        )
        .unwrap();
        assert_eq!(animation.field().particles().len(), 60);
        animation.resize(2000.0, 2000.0).unwrap();
        assert_eq!(animation.field().particles().len(), 120);
    }
}

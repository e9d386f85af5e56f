// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ambient particle field.
//!
//! A fixed population of slow, breathing dots. Each frame every particle
//! moves by its velocity and wraps around the field edges; its alpha follows
//! a per-particle sine phase. The population is generated from a seeded
//! xoshiro generator, so a given seed always yields the same field.

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Size, Vec2};
use rand_xoshiro::Xoshiro256PlusPlus;
use rand_xoshiro::rand_core::{RngCore, SeedableRng};

use crate::config::ParticleConfig;

const MIN_ALPHA: f64 = 0.2;
const MAX_ALPHA: f64 = 0.6;
const MIN_PHASE_SPEED: f64 = 0.005;
const MAX_PHASE_SPEED: f64 = 0.02;
const TAU: f64 = core::f64::consts::TAU;

/// One dot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Position in field space.
    pub position: Point,
    /// Displacement per frame.
    pub velocity: Vec2,
    /// Radius in field units.
    pub radius: f64,
    /// Opacity this frame.
    pub alpha: f64,
    base_alpha: f64,
    phase: f64,
    phase_speed: f64,
}

/// A wrapping field of particles.
#[derive(Clone, Debug)]
pub struct ParticleField {
    size: Size,
    particles: Vec<Particle>,
    rng: Xoshiro256PlusPlus,
}

impl ParticleField {
    /// Seeds `config.count` particles over a field of `size`.
    #[must_use]
    pub fn new(config: &ParticleConfig, size: Size) -> Self {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(config.seed);
        let particles = (0..config.count)
            .map(|_| {
                let base_alpha = between(&mut rng, MIN_ALPHA, MAX_ALPHA);
                let phase = between(&mut rng, 0.0, TAU);
                Particle {
                    position: Point::new(
                        between(&mut rng, 0.0, size.width),
                        between(&mut rng, 0.0, size.height),
                    ),
                    velocity: Vec2::new(
                        between(&mut rng, -config.max_speed, config.max_speed),
                        between(&mut rng, -config.max_speed, config.max_speed),
                    ),
                    radius: between(&mut rng, config.min_radius, config.max_radius),
                    alpha: breathe(base_alpha, phase),
                    base_alpha,
                    phase,
                    phase_speed: between(&mut rng, MIN_PHASE_SPEED, MAX_PHASE_SPEED),
                }
            })
            .collect();
        Self {
            size,
            particles,
            rng,
        }
    }

    /// Field extent.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// All particles.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Changes the field extent, scaling positions so the distribution is
    /// kept.
    ///
    /// A field that had no area scatters its particles over the new extent
    /// instead.
    pub fn resize(&mut self, size: Size) {
        if self.size.is_zero_area() {
            for p in &mut self.particles {
                p.position = Point::new(
                    between(&mut self.rng, 0.0, size.width),
                    between(&mut self.rng, 0.0, size.height),
                );
            }
        } else {
            let sx = size.width / self.size.width;
            let sy = size.height / self.size.height;
            for p in &mut self.particles {
                p.position = Point::new(p.position.x * sx, p.position.y * sy);
            }
        }
        self.size = size;
    }

    /// Advances every particle one frame.
    pub fn step(&mut self) {
        let Size { width, height } = self.size;
        for p in &mut self.particles {
            p.position += p.velocity;
            p.position.x = wrap(p.position.x, width);
            p.position.y = wrap(p.position.y, height);
            p.phase = (p.phase + p.phase_speed) % TAU;
            p.alpha = breathe(p.base_alpha, p.phase);
        }
    }
}

/// Keeps `x` in `[0, extent)`, however many extents one step crosses.
fn wrap(x: f64, extent: f64) -> f64 {
    if extent <= 0.0 {
        return 0.0;
    }
    let r = x % extent;
    let r = if r < 0.0 { r + extent } else { r };
    // A tiny negative remainder can round up to `extent` itself.
    if r < extent { r } else { 0.0 }
}

fn breathe(base: f64, phase: f64) -> f64 {
    base * (0.6 + 0.4 * phase.sin())
}

/// Uniform sample in `[lo, hi)`.
fn between(rng: &mut Xoshiro256PlusPlus, lo: f64, hi: f64) -> f64 {
    let unit = (rng.next_u64() >> 11) as f64 / (1_u64 << 53) as f64;
    lo + (hi - lo) * unit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EffectConfig;

    fn field(width: f64, height: f64) -> ParticleField {
        ParticleField::new(&EffectConfig::standard().ambient.particles, Size::new(width, height))
    }

    #[test]
    fn population_matches_config() {
        let f = field(800.0, 600.0);
        assert_eq!(f.particles().len(), 40);
        for p in f.particles() {
            assert!((0.0..800.0).contains(&p.position.x));
            assert!((0.0..600.0).contains(&p.position.y));
            assert!((0.6..2.2).contains(&p.radius));
            assert!(p.velocity.x.abs() <= 0.25 && p.velocity.y.abs() <= 0.25);
        }
    }

    #[test]
    fn same_seed_same_field() {
        let a = field(800.0, 600.0);
        let b = field(800.0, 600.0);
        assert_eq!(a.particles(), b.particles());

        let mut config = EffectConfig::standard().ambient.particles;
        config.seed ^= 1;
        let c = ParticleField::new(&config, Size::new(800.0, 600.0));
        assert_ne!(a.particles(), c.particles());
    }

    #[test]
    fn particles_stay_inside_while_moving() {
        let mut f = field(50.0, 40.0);
        for _ in 0..2_000 {
            f.step();
        }
        for p in f.particles() {
            assert!((0.0..50.0).contains(&p.position.x), "{p:?}");
            assert!((0.0..40.0).contains(&p.position.y), "{p:?}");
        }
    }

    #[test]
    fn wrap_crosses_edges() {
        assert_eq!(wrap(-0.5, 100.0), 99.5);
        assert_eq!(wrap(100.25, 100.0), 0.25);
        assert_eq!(wrap(42.0, 100.0), 42.0);
        assert_eq!(wrap(42.0, 0.0), 0.0);
    }

    #[test]
    fn wrap_handles_steps_longer_than_the_extent() {
        assert_eq!(wrap(1.375, 0.25), 0.125);
        assert_eq!(wrap(-0.625, 0.25), 0.125);
        assert_eq!(wrap(350.0, 100.0), 50.0);
        assert_eq!(wrap(-1e-20, 100.0), 0.0, "rounds into range");
    }

    #[test]
    fn field_smaller_than_one_step_keeps_particles_inside() {
        let mut f = field(800.0, 600.0);
        f.resize(Size::new(0.1, 0.1));
        for _ in 0..1_000 {
            f.step();
        }
        for p in f.particles() {
            assert!((0.0..0.1).contains(&p.position.x), "{p:?}");
            assert!((0.0..0.1).contains(&p.position.y), "{p:?}");
        }
    }

    #[test]
    fn alpha_breathes_within_bounds() {
        let mut f = field(800.0, 600.0);
        let first = f.particles()[0].alpha;
        let mut changed = false;
        for _ in 0..500 {
            f.step();
            for p in f.particles() {
                assert!(p.alpha >= MIN_ALPHA * 0.2 - 1e-12 && p.alpha <= MAX_ALPHA + 1e-12);
            }
            changed |= f.particles()[0].alpha != first;
        }
        assert!(changed);
    }

    #[test]
    fn resize_scales_positions() {
        let mut f = field(800.0, 600.0);
        let before: Vec<Point> = f.particles().iter().map(|p| p.position).collect();
        f.resize(Size::new(400.0, 1200.0));
        for (p, old) in f.particles().iter().zip(&before) {
            assert!((p.position.x - old.x * 0.5).abs() < 1e-9);
            assert!((p.position.y - old.y * 2.0).abs() < 1e-9);
        }
        assert_eq!(f.size(), Size::new(400.0, 1200.0));
    }

    #[test]
    fn resize_from_empty_scatters() {
        let mut f = field(0.0, 0.0);
        assert!(f.particles().iter().all(|p| p.position == Point::ZERO));
        f.resize(Size::new(300.0, 200.0));
        let spread = f
            .particles()
            .iter()
            .filter(|p| p.position != Point::ZERO)
            .count();
        assert_eq!(spread, 40);
        for p in f.particles() {
            assert!((0.0..300.0).contains(&p.position.x));
            assert!((0.0..200.0).contains(&p.position.y));
        }
    }
}

//! Randomized spawning.
//!
//! [`SpawnContext`] owns the sketch's RNG and turns a click into a list of
//! [`Spawn`]s: a burst of random shapes around the pointer, or a ring of
//! fragments around a shattered body. Seed it for reproducible sessions.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::shape::{Material, ShapeKind};

/// Fewest shapes a click can spawn.
pub const BURST_MIN: u32 = 1;
/// One past the most shapes a click can spawn.
pub const BURST_MAX: u32 = 10;

/// A body about to be created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawn {
    pub shape: ShapeKind,
    pub material: Material,
    pub position: Vec2,
}

/// RNG plus helpers for the sketch's spawn patterns.
#[derive(Debug, Clone)]
pub struct SpawnContext {
    rng: StdRng,
    /// Max per-axis offset from the spawn origin.
    spread: f32,
}

impl SpawnContext {
    /// Seeded when `seed` is given, from OS entropy otherwise.
    pub fn new(seed: Option<u64>, spread: f32) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, spread }
    }

    /// Random f32 in `[min, max)`.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        self.rng.gen_range(min..max)
    }

    /// Independent per-axis offset in `[-spread, spread)`.
    pub fn random_offset(&mut self) -> Vec2 {
        let x = self.random_range(-self.spread, self.spread);
        let y = self.random_range(-self.spread, self.spread);
        Vec2::new(x, y)
    }

    /// One of rectangle, circle or triangle, with its material.
    pub fn random_shape(&mut self) -> (ShapeKind, Material) {
        match self.rng.gen_range(0..3) {
            0 => (ShapeKind::SPAWN_RECTANGLE, Material::SPAWN_RECTANGLE),
            1 => (ShapeKind::SPAWN_CIRCLE, Material::SPAWN_ROUND),
            _ => (ShapeKind::SPAWN_TRIANGLE, Material::SPAWN_ROUND),
        }
    }

    /// Between [`BURST_MIN`] and `BURST_MAX - 1` random shapes around `origin`.
    pub fn burst(&mut self, origin: Vec2) -> Vec<Spawn> {
        let count = self.rng.gen_range(BURST_MIN..BURST_MAX);
        (0..count)
            .map(|_| {
                let (shape, material) = self.random_shape();
                Spawn {
                    shape,
                    material,
                    position: origin + self.random_offset(),
                }
            })
            .collect()
    }

    /// `count` fragment circles scattered around `origin`.
    pub fn fragments(&mut self, origin: Vec2, count: usize) -> Vec<Spawn> {
        (0..count)
            .map(|_| Spawn {
                shape: ShapeKind::FRAGMENT,
                material: Material::FRAGMENT,
                position: origin + self.random_offset(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_size_and_spread() {
        let mut ctx = SpawnContext::new(Some(1), 50.0);
        let origin = Vec2::new(400.0, 300.0);
        for _ in 0..200 {
            let burst = ctx.burst(origin);
            assert!((1..=9).contains(&burst.len()));
            for spawn in burst {
                let d = spawn.position - origin;
                assert!(d.x >= -50.0 && d.x < 50.0);
                assert!(d.y >= -50.0 && d.y < 50.0);
            }
        }
    }

    #[test]
    fn test_burst_covers_all_shapes() {
        let mut ctx = SpawnContext::new(Some(2), 50.0);
        let mut seen = [false; 3];
        for _ in 0..100 {
            match ctx.random_shape() {
                (ShapeKind::Rectangle { .. }, m) => {
                    assert_eq!(m, Material::SPAWN_RECTANGLE);
                    seen[0] = true;
                }
                (ShapeKind::Circle { .. }, m) => {
                    assert_eq!(m, Material::SPAWN_ROUND);
                    seen[1] = true;
                }
                (ShapeKind::Triangle { .. }, m) => {
                    assert_eq!(m, Material::SPAWN_ROUND);
                    seen[2] = true;
                }
            }
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_fragments() {
        let mut ctx = SpawnContext::new(Some(3), 50.0);
        let origin = Vec2::new(10.0, 10.0);
        let frags = ctx.fragments(origin, 5);
        assert_eq!(frags.len(), 5);
        for f in frags {
            assert_eq!(f.shape, ShapeKind::FRAGMENT);
            assert_eq!(f.material, Material::FRAGMENT);
            assert!((f.position - origin).abs().max_element() <= 50.0);
        }
    }

    #[test]
    fn test_seed_is_reproducible() {
        let mut a = SpawnContext::new(Some(42), 50.0);
        let mut b = SpawnContext::new(Some(42), 50.0);
        assert_eq!(a.burst(Vec2::ZERO), b.burst(Vec2::ZERO));
    }
}

//! The floating dock.
//!
//! A vertical strip one third of the canvas wide, centered, reaching from the
//! top of the canvas down to `depth`. World gravity points down everywhere,
//! but any tracked body inside the strip has its vertical velocity zeroed
//! each frame, so it hangs in place and only drifts sideways.

use glam::Vec2;
use rapier2d::prelude::RigidBodyHandle;

use crate::physics::PhysicsWorld;

/// Gravity the rule establishes, in sketch units.
pub const DOWNWARD_GRAVITY: f32 = 1.0;

/// Screen-space bounds of the dock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityZone {
    pub left: f32,
    pub right: f32,
    pub depth: f32,
}

impl GravityZone {
    /// The dock for a canvas `canvas_width` wide.
    pub fn for_canvas(canvas_width: f32, depth: f32) -> Self {
        let width = canvas_width / 3.0;
        let left = (canvas_width - width) / 2.0;
        Self {
            left,
            right: left + width,
            depth,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Whether `p` is strictly inside the dock. Points on an edge are outside.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.y < self.depth && p.x > self.left && p.x < self.right
    }

    /// Run the rule for one frame over the tracked bodies.
    ///
    /// Returns how many bodies were held.
    pub fn apply<I>(&self, world: &mut PhysicsWorld, bodies: I) -> usize
    where
        I: IntoIterator<Item = RigidBodyHandle>,
    {
        if world.gravity_y() != DOWNWARD_GRAVITY {
            world.set_gravity_y(DOWNWARD_GRAVITY);
        }

        let mut held = 0;
        for handle in bodies {
            let (Some(position), Some(velocity)) = (world.position(handle), world.velocity(handle)) else {
                continue;
            };
            if self.contains(position) {
                world.set_velocity(handle, Vec2::new(velocity.x, 0.0));
                held += 1;
            }
        }
        held
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::BodyDesc;
    use crate::shape::{Material, ShapeKind};

    #[test]
    fn test_zone_bounds() {
        let zone = GravityZone::for_canvas(900.0, 300.0);
        assert_eq!(zone.left, 300.0);
        assert_eq!(zone.right, 600.0);
        assert_eq!(zone.width(), 300.0);
    }

    #[test]
    fn test_edges_are_outside() {
        let zone = GravityZone::for_canvas(900.0, 300.0);
        assert!(zone.contains(Vec2::new(450.0, 100.0)));
        assert!(!zone.contains(Vec2::new(300.0, 100.0)));
        assert!(!zone.contains(Vec2::new(600.0, 100.0)));
        assert!(!zone.contains(Vec2::new(450.0, 300.0)));
        assert!(zone.contains(Vec2::new(450.0, -20.0)));
    }

    #[test]
    fn test_apply_sets_gravity_and_holds_inside() {
        let mut world = PhysicsWorld::new(1000.0, 0.2);
        let zone = GravityZone::for_canvas(900.0, 300.0);

        let inside = world.add_body(&BodyDesc::dynamic(ShapeKind::FRAGMENT, Vec2::new(450.0, 100.0), Material::FRAGMENT));
        let below = world.add_body(&BodyDesc::dynamic(ShapeKind::FRAGMENT, Vec2::new(450.0, 400.0), Material::FRAGMENT));
        let beside = world.add_body(&BodyDesc::dynamic(ShapeKind::FRAGMENT, Vec2::new(100.0, 100.0), Material::FRAGMENT));
        for h in [inside, below, beside] {
            world.set_velocity(h, Vec2::new(7.0, 50.0));
        }

        let held = zone.apply(&mut world, [inside, below, beside]);

        assert_eq!(held, 1);
        assert_eq!(world.gravity_y(), DOWNWARD_GRAVITY);
        assert_eq!(world.velocity(inside), Some(Vec2::new(7.0, 0.0)));
        assert_eq!(world.velocity(below), Some(Vec2::new(7.0, 50.0)));
        assert_eq!(world.velocity(beside), Some(Vec2::new(7.0, 50.0)));
    }

    #[test]
    fn test_apply_skips_removed_bodies() {
        let mut world = PhysicsWorld::new(1000.0, 0.2);
        let zone = GravityZone::for_canvas(900.0, 300.0);
        let gone = world.add_body(&BodyDesc::dynamic(ShapeKind::FRAGMENT, Vec2::new(450.0, 100.0), Material::FRAGMENT));
        world.remove_body(gone);
        assert_eq!(zone.apply(&mut world, [gone]), 0);
    }
}

//! Pointer constraint: drag bodies with the mouse.
//!
//! When the pointer goes down over a body, that body is grabbed at the exact
//! point under the cursor. Every physics step the grabbed point is pulled a
//! fraction (`stiffness`) of the way toward the pointer by setting the
//! body's linear velocity, so dragged bodies still collide with everything
//! else instead of teleporting through it.

use glam::Vec2;
use rapier2d::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Grab {
    body: RigidBodyHandle,
    /// Grab point in the body's local frame.
    local_anchor: Vec2,
}

/// Spring between the pointer and at most one body.
#[derive(Debug, Clone)]
pub struct PointerConstraint {
    stiffness: f32,
    position: Vec2,
    grab: Option<Grab>,
}

impl PointerConstraint {
    /// Create an idle constraint. `stiffness` is the fraction of the gap
    /// closed per step.
    pub fn new(stiffness: f32) -> Self {
        Self {
            stiffness,
            position: Vec2::ZERO,
            grab: None,
        }
    }

    /// Current pointer position in canvas coordinates.
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// The grabbed body, if any.
    #[inline]
    pub fn grabbed(&self) -> Option<RigidBodyHandle> {
        self.grab.map(|g| g.body)
    }

    /// Grab `body` at `local_anchor`, replacing any previous grab.
    pub fn grab(&mut self, body: RigidBodyHandle, local_anchor: Vec2) {
        self.grab = Some(Grab { body, local_anchor });
    }

    /// Let go. Returns the body that was held.
    pub fn release(&mut self) -> Option<RigidBodyHandle> {
        self.grab.take().map(|g| g.body)
    }

    /// Pull the grabbed body toward the pointer for a step of `dt` seconds.
    ///
    /// Drops the grab if the body no longer exists.
    pub(crate) fn apply(&mut self, bodies: &mut RigidBodySet, dt: f32) {
        let Some(grab) = self.grab else {
            return;
        };
        let Some(body) = bodies.get_mut(grab.body) else {
            self.grab = None;
            return;
        };

        let anchor = body.position() * point![grab.local_anchor.x, grab.local_anchor.y];
        let gap = self.position - Vec2::new(anchor.x, anchor.y);
        let velocity = gap * (self.stiffness / dt);
        body.set_linvel(vector![velocity.x, velocity.y], true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_at(bodies: &mut RigidBodySet, x: f32, y: f32) -> RigidBodyHandle {
        bodies.insert(RigidBodyBuilder::dynamic().translation(vector![x, y]).build())
    }

    #[test]
    fn test_idle_constraint_does_nothing() {
        let mut bodies = RigidBodySet::new();
        let handle = body_at(&mut bodies, 10.0, 10.0);
        let mut pointer = PointerConstraint::new(0.2);
        pointer.set_position(Vec2::new(100.0, 100.0));

        pointer.apply(&mut bodies, 1.0 / 60.0);
        assert_eq!(*bodies[handle].linvel(), vector![0.0, 0.0]);
    }

    #[test]
    fn test_pull_closes_fraction_of_gap() {
        let mut bodies = RigidBodySet::new();
        let handle = body_at(&mut bodies, 0.0, 0.0);
        let mut pointer = PointerConstraint::new(0.2);
        pointer.grab(handle, Vec2::ZERO);
        pointer.set_position(Vec2::new(60.0, 0.0));

        let dt = 1.0 / 60.0;
        pointer.apply(&mut bodies, dt);
        let v = bodies[handle].linvel();
        // 20% of a 60 px gap in one step
        assert!((v.x * dt - 12.0).abs() < 1e-3);
        assert!(v.y.abs() < 1e-6);
    }

    #[test]
    fn test_grab_dropped_when_body_removed() {
        let mut bodies = RigidBodySet::new();
        let handle = body_at(&mut bodies, 0.0, 0.0);
        let mut pointer = PointerConstraint::new(0.2);
        pointer.grab(handle, Vec2::ZERO);

        let mut islands = IslandManager::new();
        let mut colliders = ColliderSet::new();
        let mut impulse_joints = ImpulseJointSet::new();
        let mut multibody_joints = MultibodyJointSet::new();
        bodies.remove(
            handle,
            &mut islands,
            &mut colliders,
            &mut impulse_joints,
            &mut multibody_joints,
            true,
        );

        pointer.apply(&mut bodies, 1.0 / 60.0);
        assert_eq!(pointer.grabbed(), None);
    }

    #[test]
    fn test_release_returns_body() {
        let mut bodies = RigidBodySet::new();
        let handle = body_at(&mut bodies, 0.0, 0.0);
        let mut pointer = PointerConstraint::new(0.2);
        pointer.grab(handle, Vec2::ZERO);
        assert_eq!(pointer.release(), Some(handle));
        assert_eq!(pointer.release(), None);
    }
}

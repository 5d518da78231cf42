//! Physics world adapter.
//!
//! [`PhysicsWorld`] wraps the rapier2d boilerplate (pipeline, sets, broad and
//! narrow phase) behind the handful of operations the sketch needs: add and
//! remove bodies, read and write their pose and velocity, drive the pointer
//! constraint and advance one frame.
//!
//! Coordinates are canvas pixels with +y pointing down, so positive world
//! gravity pulls toward the bottom of the canvas.

use glam::Vec2;
use rapier2d::parry::query::PointQuery;
use rapier2d::prelude::*;

use crate::pointer::PointerConstraint;
use crate::shape::{Material, ShapeKind};

/// Fixed step length; one step per rendered frame.
pub const FRAME_DT: f32 = 1.0 / 60.0;

#[inline]
fn to_na(v: Vec2) -> Vector<Real> {
    vector![v.x, v.y]
}

#[inline]
fn from_na(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

/// Everything needed to create one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    pub shape: ShapeKind,
    pub position: Vec2,
    pub material: Material,
    pub is_static: bool,
}

impl BodyDesc {
    /// A body that falls, collides and can be dragged.
    pub fn dynamic(shape: ShapeKind, position: Vec2, material: Material) -> Self {
        Self {
            shape,
            position,
            material,
            is_static: false,
        }
    }

    /// An immovable body, e.g. a wall.
    pub fn fixed(shape: ShapeKind, position: Vec2) -> Self {
        Self {
            shape,
            position,
            material: Material::DEFAULT,
            is_static: true,
        }
    }

    fn build_collider(&self) -> ColliderBuilder {
        let builder = match self.shape {
            ShapeKind::Rectangle { width, height } => ColliderBuilder::cuboid(width * 0.5, height * 0.5),
            ShapeKind::Circle { radius } => ColliderBuilder::ball(radius),
            ShapeKind::Triangle { .. } => {
                let v = self.shape.outline();
                ColliderBuilder::triangle(
                    point![v[0].x, v[0].y],
                    point![v[1].x, v[1].y],
                    point![v[2].x, v[2].y],
                )
            }
        };
        builder
            .restitution(self.material.restitution)
            .friction(self.material.friction)
    }
}

/// A rapier2d world plus the pointer constraint acting on it.
pub struct PhysicsWorld {
    /// World gravity in sketch units; scaled by `gravity_scale` when stepping.
    gravity: Vec2,
    gravity_scale: f32,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    pointer: PointerConstraint,
}

impl PhysicsWorld {
    /// Create an empty world with zero gravity.
    ///
    /// `gravity_scale` converts one unit of gravity into pixels/s².
    pub fn new(gravity_scale: f32, pointer_stiffness: f32) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = FRAME_DT;

        Self {
            gravity: Vec2::ZERO,
            gravity_scale,
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            pointer: PointerConstraint::new(pointer_stiffness),
        }
    }

    // ========== Gravity ==========

    /// Vertical gravity in sketch units (1 = normal downward pull).
    #[inline]
    pub fn gravity_y(&self) -> f32 {
        self.gravity.y
    }

    pub fn set_gravity_y(&mut self, gravity_y: f32) {
        self.gravity.y = gravity_y;
    }

    // ========== Bodies ==========

    /// Create a rigid body with one collider and return its handle.
    pub fn add_body(&mut self, desc: &BodyDesc) -> RigidBodyHandle {
        let builder = if desc.is_static {
            RigidBodyBuilder::fixed()
        } else {
            RigidBodyBuilder::dynamic().linear_damping(desc.material.linear_damping())
        };
        let rb = builder.translation(to_na(desc.position)).build();

        let handle = self.bodies.insert(rb);
        self.colliders
            .insert_with_parent(desc.build_collider().build(), handle, &mut self.bodies);
        handle
    }

    /// Remove a body and its collider. Returns `false` if it was already gone.
    pub fn remove_body(&mut self, handle: RigidBodyHandle) -> bool {
        if self.pointer.grabbed() == Some(handle) {
            self.pointer.release();
        }
        self.bodies
            .remove(
                handle,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    #[inline]
    pub fn contains(&self, handle: RigidBodyHandle) -> bool {
        self.bodies.contains(handle)
    }

    /// Number of bodies, static ones included.
    #[inline]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of non-static bodies.
    pub fn dynamic_body_count(&self) -> usize {
        self.bodies.iter().filter(|(_, b)| b.is_dynamic()).count()
    }

    pub fn position(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.bodies.get(handle).map(|b| from_na(b.translation()))
    }

    pub fn set_position(&mut self, handle: RigidBodyHandle, position: Vec2) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.set_translation(to_na(position), true);
        }
    }

    /// Linear velocity in pixels per second.
    pub fn velocity(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.bodies.get(handle).map(|b| from_na(b.linvel()))
    }

    pub fn set_velocity(&mut self, handle: RigidBodyHandle, velocity: Vec2) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.set_linvel(to_na(velocity), true);
        }
    }

    /// Transform body-local points by the body's current pose.
    pub fn to_world(&self, handle: RigidBodyHandle, local: &[Vec2]) -> Option<Vec<Vec2>> {
        let iso = self.bodies.get(handle)?.position();
        Some(
            local
                .iter()
                .map(|p| {
                    let w = iso * point![p.x, p.y];
                    Vec2::new(w.x, w.y)
                })
                .collect(),
        )
    }

    /// First dynamic body whose collider contains `point`.
    pub fn body_at_point(&self, point: Vec2) -> Option<RigidBodyHandle> {
        let pt = point![point.x, point.y];
        self.colliders.iter().find_map(|(_, collider)| {
            let parent = collider.parent()?;
            let dynamic = self.bodies.get(parent).is_some_and(|b| b.is_dynamic());
            (dynamic && collider.shape().contains_point(collider.position(), &pt)).then_some(parent)
        })
    }

    // ========== Pointer ==========

    #[inline]
    pub fn pointer(&self) -> &PointerConstraint {
        &self.pointer
    }

    pub fn move_pointer(&mut self, position: Vec2) {
        self.pointer.set_position(position);
    }

    /// Grab whatever dynamic body lies under `position`.
    pub fn press_pointer(&mut self, position: Vec2) -> Option<RigidBodyHandle> {
        self.pointer.set_position(position);
        let handle = self.body_at_point(position)?;
        let local = self.bodies[handle]
            .position()
            .inverse_transform_point(&point![position.x, position.y]);
        self.pointer.grab(handle, Vec2::new(local.x, local.y));
        Some(handle)
    }

    pub fn release_pointer(&mut self) -> Option<RigidBodyHandle> {
        self.pointer.release()
    }

    // ========== Stepping ==========

    /// Advance the simulation by one frame.
    pub fn step(&mut self) {
        self.pointer.apply(&mut self.bodies, self.integration_parameters.dt);

        let gravity = to_na(self.gravity * self.gravity_scale);
        self.physics_pipeline.step(
            &gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }
}

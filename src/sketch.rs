//! The sketch: all simulation state in one place.
//!
//! [`Sketch`] owns the physics world, the tracked bodies, the boundary
//! walls, the drag selection and the RNG. The host feeds it input and asks
//! it to step and render; nothing here knows about windows or GPUs, so a
//! whole session can be driven headless.
//!
//! The tracked-body list and the world's dynamic bodies are kept in sync:
//! [`Sketch::add_body`] and [`Sketch::remove_body`] are the only paths that
//! create or destroy them, and each touches both.

use glam::Vec2;
use log::{debug, info};
use rapier2d::prelude::RigidBodyHandle;

use crate::config::SketchConfig;
use crate::controller::{first_hit, last_hit, BodyId, Selection};
use crate::draw::{map_range, Color, DrawCommand};
use crate::error::SketchError;
use crate::gravity_zone::GravityZone;
use crate::input::{Input, PointerEvent};
use crate::physics::{BodyDesc, PhysicsWorld};
use crate::shape::{Material, ShapeKind};
use crate::sizing::{canvas_size, CanvasSize};
use crate::spawn::{Spawn, SpawnContext};

/// Fill shared by the dock overlay and body outlines.
pub const OVERLAY_FILL: Color = Color::rgba(255, 255, 255, 100);

/// A body the sketch draws and interacts with.
#[derive(Debug, Clone)]
pub struct TrackedBody {
    pub id: BodyId,
    pub handle: RigidBodyHandle,
    pub shape: ShapeKind,
    pub material: Material,
    /// Cached local-space outline.
    outline: Vec<Vec2>,
}

impl TrackedBody {
    #[inline]
    pub fn outline(&self) -> &[Vec2] {
        &self.outline
    }
}

/// One of the four boundary walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl WallSide {
    pub const ALL: [WallSide; 4] = [WallSide::Top, WallSide::Right, WallSide::Bottom, WallSide::Left];

    fn index(self) -> usize {
        self as usize
    }

    /// Center and size of this wall on a canvas.
    fn layout(self, canvas: CanvasSize, thickness: f32) -> (Vec2, ShapeKind) {
        let CanvasSize { width: w, height: h } = canvas;
        match self {
            WallSide::Top => (Vec2::new(w * 0.5, 0.0), ShapeKind::Rectangle { width: w, height: thickness }),
            WallSide::Right => (Vec2::new(w, h * 0.5), ShapeKind::Rectangle { width: thickness, height: h }),
            WallSide::Bottom => (Vec2::new(w * 0.5, h), ShapeKind::Rectangle { width: w, height: thickness }),
            WallSide::Left => (Vec2::new(0.0, h * 0.5), ShapeKind::Rectangle { width: thickness, height: h }),
        }
    }
}

/// What a press did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PressOutcome {
    /// Picked up an existing body.
    Selected(BodyId),
    /// Hit nothing and spawned these bodies.
    Spawned(Vec<BodyId>),
}

/// Complete simulation context.
pub struct Sketch {
    config: SketchConfig,
    canvas: CanvasSize,
    world: PhysicsWorld,
    bodies: Vec<TrackedBody>,
    walls: [RigidBodyHandle; 4],
    selection: Selection,
    spawner: SpawnContext,
    pointer: Vec2,
    next_id: u64,
}

fn check_container(width: f32, height: f32) -> Result<(), SketchError> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(SketchError::DegenerateContainer { width, height })
    }
}

impl Sketch {
    /// Lay out a canvas in a `container_w` x `container_h` container, build
    /// the walls and drop the seed box.
    pub fn new(config: SketchConfig, container_w: f32, container_h: f32) -> Result<Self, SketchError> {
        config.validate()?;
        check_container(container_w, container_h)?;

        let canvas = canvas_size(container_w, container_h, config.aspect);
        let mut world = PhysicsWorld::new(config.gravity_scale, config.pointer_stiffness);

        let walls = WallSide::ALL.map(|side| {
            let (position, shape) = side.layout(canvas, config.wall_thickness);
            world.add_body(&BodyDesc::fixed(shape, position))
        });

        info!(
            "Canvas {}x{} in {}x{} container (aspect {})",
            canvas.width, canvas.height, container_w, container_h, config.aspect
        );

        let spawner = SpawnContext::new(config.seed, config.spawn_spread);
        let mut sketch = Self {
            config,
            canvas,
            world,
            bodies: Vec::new(),
            walls,
            selection: Selection::default(),
            spawner,
            pointer: Vec2::ZERO,
            next_id: 0,
        };

        sketch.add_body(Spawn {
            shape: ShapeKind::SEED_BOX,
            material: Material::DEFAULT,
            position: Vec2::new(canvas.width * 0.5, canvas.height * 0.2),
        });

        Ok(sketch)
    }

    // ========== Queries ==========

    #[inline]
    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    #[inline]
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    #[inline]
    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    #[inline]
    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    /// Tracked bodies in insertion order.
    #[inline]
    pub fn bodies(&self) -> &[TrackedBody] {
        &self.bodies
    }

    #[inline]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[inline]
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// The dock for the current canvas.
    pub fn zone(&self) -> GravityZone {
        GravityZone::for_canvas(self.canvas.width, self.config.zone_depth)
    }

    fn find(&self, id: BodyId) -> Option<&TrackedBody> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn body_position(&self, id: BodyId) -> Option<Vec2> {
        self.world.position(self.find(id)?.handle)
    }

    pub fn body_velocity(&self, id: BodyId) -> Option<Vec2> {
        self.world.velocity(self.find(id)?.handle)
    }

    pub fn set_body_velocity(&mut self, id: BodyId, velocity: Vec2) {
        if let Some(handle) = self.find(id).map(|b| b.handle) {
            self.world.set_velocity(handle, velocity);
        }
    }

    pub fn wall_position(&self, side: WallSide) -> Option<Vec2> {
        self.world.position(self.walls[side.index()])
    }

    fn positions(&self) -> Vec<Vec2> {
        self.bodies
            .iter()
            .map(|b| self.world.position(b.handle).unwrap_or(Vec2::NAN))
            .collect()
    }

    // ========== Body bookkeeping ==========

    /// Create a body in the world and start tracking it.
    pub fn add_body(&mut self, spawn: Spawn) -> BodyId {
        let handle = self
            .world
            .add_body(&BodyDesc::dynamic(spawn.shape, spawn.position, spawn.material));
        let id = BodyId(self.next_id);
        self.next_id += 1;

        self.bodies.push(TrackedBody {
            id,
            handle,
            shape: spawn.shape,
            material: spawn.material,
            outline: spawn.shape.outline(),
        });
        id
    }

    /// Stop tracking a body and remove it from the world.
    pub fn remove_body(&mut self, id: BodyId) -> Option<TrackedBody> {
        let index = self.bodies.iter().position(|b| b.id == id)?;
        let body = self.bodies.remove(index);
        self.world.remove_body(body.handle);
        self.selection.forget(id);
        Some(body)
    }

    // ========== Canvas ==========

    /// Re-fit the canvas to a new container and move the right and bottom
    /// walls onto the new edges.
    pub fn resize(&mut self, container_w: f32, container_h: f32) -> Result<CanvasSize, SketchError> {
        check_container(container_w, container_h)?;
        self.canvas = canvas_size(container_w, container_h, self.config.aspect);

        let CanvasSize { width: w, height: h } = self.canvas;
        self.world
            .set_position(self.walls[WallSide::Right.index()], Vec2::new(w, h * 0.5));
        self.world
            .set_position(self.walls[WallSide::Bottom.index()], Vec2::new(w * 0.5, h));

        info!("Resized canvas to {}x{}", w, h);
        Ok(self.canvas)
    }

    // ========== Pointer ==========

    pub fn set_pointer(&mut self, pointer: Vec2) {
        self.pointer = pointer;
        self.world.move_pointer(pointer);
    }

    /// Pointer pressed: select a body near the pointer, or spawn a burst.
    pub fn press(&mut self) -> PressOutcome {
        self.selection.clear();
        self.world.press_pointer(self.pointer);

        let positions = self.positions();
        if let Some(index) = first_hit(&positions, self.pointer, self.config.hit_radius) {
            let id = self.bodies[index].id;
            self.selection.select(id);
            debug!("Selected body {:?}", id);
            return PressOutcome::Selected(id);
        }

        let spawns = self.spawner.burst(self.pointer);
        debug!("Spawning {} shapes at {:?}", spawns.len(), self.pointer);
        for spawn in &spawns {
            debug!("  {} at {:?}", spawn.shape.name(), spawn.position);
        }
        PressOutcome::Spawned(spawns.into_iter().map(|s| self.add_body(s)).collect())
    }

    /// Pointer released: drop any selection and let go of the dragged body.
    pub fn release(&mut self) {
        if let Some(id) = self.selection.release() {
            debug!("Released body {:?}", id);
        }
        self.world.release_pointer();
    }

    /// Double-click: shatter the newest body near the pointer into
    /// fragments. Returns the id of the removed body.
    pub fn double_click(&mut self) -> Option<BodyId> {
        let positions = self.positions();
        let index = last_hit(&positions, self.pointer, self.config.hit_radius)?;
        let origin = positions[index];
        let id = self.bodies[index].id;

        self.remove_body(id);
        let fragments = self.spawner.fragments(origin, self.config.fragment_count);
        debug!("Shattered body {:?} into {} fragments", id, fragments.len());
        for spawn in fragments {
            self.add_body(spawn);
        }
        Some(id)
    }

    /// Apply this frame's events in order, each at the pointer position it
    /// happened at, then move the pointer to where it is now.
    pub fn handle_input(&mut self, input: &Input) {
        for event in input.events() {
            self.set_pointer(event.position());
            match event {
                PointerEvent::Pressed { .. } => {
                    self.press();
                }
                PointerEvent::Released { .. } => self.release(),
                PointerEvent::DoubleClicked { .. } => {
                    self.double_click();
                }
            }
        }
        self.set_pointer(input.pointer());
    }

    // ========== Frame ==========

    /// Advance physics one frame, then run the dock rule.
    pub fn step(&mut self) {
        self.world.step();
        let zone = self.zone();
        zone.apply(&mut self.world, self.bodies.iter().map(|b| b.handle));
    }

    /// One full frame update: input, then physics.
    pub fn update(&mut self, input: &Input) {
        self.handle_input(input);
        self.step();
    }

    /// Background color driven by the pointer: x → red, y → blue.
    pub fn background(&self) -> Color {
        let red = map_range(self.pointer.x, 0.0, self.canvas.width, 0.0, 255.0);
        let blue = map_range(self.pointer.y, 0.0, self.canvas.height, 0.0, 255.0);
        Color::from_channels(red, 0.0, blue, 255.0)
    }

    /// Draw commands for the current state.
    pub fn render(&self) -> Vec<DrawCommand> {
        let zone = self.zone();
        let mut commands = Vec::with_capacity(self.bodies.len() + 2);

        commands.push(DrawCommand::Clear(self.background()));
        commands.push(DrawCommand::Rect {
            origin: Vec2::new(zone.left, 0.0),
            size: Vec2::new(zone.width(), zone.depth),
            fill: OVERLAY_FILL,
        });

        commands.extend(self.bodies.iter().filter_map(|body| {
            let points = self.world.to_world(body.handle, &body.outline)?;
            Some(DrawCommand::Polygon {
                points,
                fill: Some(OVERLAY_FILL),
                stroke: None,
            })
        }));

        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sketch() -> Sketch {
        let config = SketchConfig {
            seed: Some(9),
            ..SketchConfig::default()
        };
        Sketch::new(config, 800.0, 600.0).unwrap()
    }

    #[test]
    fn test_startup_state() {
        let sketch = sketch();
        assert_eq!(sketch.canvas(), CanvasSize::new(800.0, 600.0));
        assert_eq!(sketch.bodies().len(), 1);
        assert_eq!(sketch.world().body_count(), 5);

        let seed = sketch.bodies()[0].id;
        let p = sketch.body_position(seed).unwrap();
        assert!((p - Vec2::new(400.0, 120.0)).length() < 1e-3);
        assert_eq!(sketch.wall_position(WallSide::Top), Some(Vec2::new(400.0, 0.0)));
        assert_eq!(sketch.wall_position(WallSide::Left), Some(Vec2::new(0.0, 300.0)));
    }

    #[test]
    fn test_degenerate_container() {
        assert!(matches!(
            Sketch::new(SketchConfig::default(), 0.0, 600.0),
            Err(SketchError::DegenerateContainer { .. })
        ));
        let mut sketch = sketch();
        assert!(sketch.resize(800.0, f32::NAN).is_err());
        assert_eq!(sketch.canvas(), CanvasSize::new(800.0, 600.0));
    }

    #[test]
    fn test_remove_keeps_world_in_sync() {
        let mut sketch = sketch();
        let id = sketch.add_body(Spawn {
            shape: ShapeKind::SPAWN_CIRCLE,
            material: Material::SPAWN_ROUND,
            position: Vec2::new(100.0, 400.0),
        });
        assert_eq!(sketch.world().dynamic_body_count(), 2);

        let removed = sketch.remove_body(id).unwrap();
        assert!(!sketch.world().contains(removed.handle));
        assert_eq!(sketch.world().dynamic_body_count(), sketch.bodies().len());
        assert!(sketch.remove_body(id).is_none());
    }

    #[test]
    fn test_background_follows_pointer() {
        let mut sketch = sketch();
        sketch.set_pointer(Vec2::new(800.0, 0.0));
        assert_eq!(sketch.background(), Color::rgba(255, 0, 0, 255));
        sketch.set_pointer(Vec2::new(0.0, 600.0));
        assert_eq!(sketch.background(), Color::rgba(0, 0, 255, 255));
        sketch.set_pointer(Vec2::new(-50.0, 2000.0));
        assert_eq!(sketch.background(), Color::rgba(0, 0, 255, 255));
    }

    #[test]
    fn test_render_order() {
        let sketch = sketch();
        let commands = sketch.render();
        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[0], DrawCommand::Clear(_)));
        match &commands[1] {
            DrawCommand::Rect { origin, size, fill } => {
                assert!((origin.x - 800.0 / 3.0).abs() < 1e-3);
                assert_eq!(origin.y, 0.0);
                assert!((size.x - 800.0 / 3.0).abs() < 1e-3);
                assert_eq!(size.y, 300.0);
                assert_eq!(*fill, OVERLAY_FILL);
            }
            other => panic!("expected overlay rect, got {:?}", other),
        }
        match &commands[2] {
            DrawCommand::Polygon { points, stroke, .. } => {
                assert_eq!(points.len(), 4);
                assert_eq!(*stroke, None);
            }
            other => panic!("expected polygon, got {:?}", other),
        }
    }
}

//! Shapes and materials for sketch bodies.
//!
//! A [`ShapeKind`] describes geometry only; where the body sits and how it
//! moves is owned by the physics world. Each shape can produce its outline
//! in body-local coordinates, centered on the body's center of mass, which
//! the renderer transforms by the body's current pose every frame.

use std::f32::consts::TAU;

use glam::Vec2;

/// Geometry of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    /// Axis-aligned (in local space) box.
    Rectangle { width: f32, height: f32 },
    /// Disc. Rendered as a regular polygon.
    Circle { radius: f32 },
    /// Equilateral triangle inscribed in a circle of `radius`.
    Triangle { radius: f32 },
}

impl ShapeKind {
    /// Spawned by a click: 50 x 50 box.
    pub const SPAWN_RECTANGLE: Self = ShapeKind::Rectangle { width: 50.0, height: 50.0 };
    /// Spawned by a click: radius 30 disc.
    pub const SPAWN_CIRCLE: Self = ShapeKind::Circle { radius: 30.0 };
    /// Spawned by a click: radius 40 triangle.
    pub const SPAWN_TRIANGLE: Self = ShapeKind::Triangle { radius: 40.0 };
    /// Produced by a double-click.
    pub const FRAGMENT: Self = ShapeKind::Circle { radius: 10.0 };
    /// The box dropped at startup.
    pub const SEED_BOX: Self = ShapeKind::Rectangle { width: 60.0, height: 60.0 };

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle { .. } => "rectangle",
            ShapeKind::Circle { .. } => "circle",
            ShapeKind::Triangle { .. } => "triangle",
        }
    }

    /// Outline vertices in body-local space, in winding order.
    pub fn outline(&self) -> Vec<Vec2> {
        match *self {
            ShapeKind::Rectangle { width, height } => {
                let (hw, hh) = (width * 0.5, height * 0.5);
                vec![
                    Vec2::new(-hw, -hh),
                    Vec2::new(hw, -hh),
                    Vec2::new(hw, hh),
                    Vec2::new(-hw, hh),
                ]
            }
            ShapeKind::Circle { radius } => regular_polygon(circle_sides(radius), radius),
            ShapeKind::Triangle { radius } => regular_polygon(3, radius),
        }
    }
}

/// Number of sides used to draw a circle: `ceil(clamp(r, 10, 25))`.
pub fn circle_sides(radius: f32) -> usize {
    radius.clamp(10.0, 25.0).ceil() as usize
}

/// Vertices of a regular polygon centered at the origin.
///
/// The first vertex sits half a sector past the +x axis. With +y down a
/// triangle has vertices at 60°, 180° and 300°: it points toward -x and its
/// flat edge is vertical on the +x side.
pub fn regular_polygon(sides: usize, radius: f32) -> Vec<Vec2> {
    let sector = TAU / sides as f32;
    let offset = sector * 0.5;
    (0..sides)
        .map(|i| {
            let angle = offset + i as f32 * sector;
            Vec2::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

/// Surface and damping properties of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Bounciness, 0 = no bounce.
    pub restitution: f32,
    /// Coulomb friction coefficient.
    pub friction: f32,
    /// Fraction of velocity lost per 60 Hz tick to air drag.
    pub air_friction: f32,
}

impl Material {
    /// Matches the defaults a plain body gets.
    pub const DEFAULT: Self = Self {
        restitution: 0.0,
        friction: 0.1,
        air_friction: 0.01,
    };

    pub const SPAWN_RECTANGLE: Self = Self {
        restitution: 0.6,
        friction: 0.05,
        air_friction: 0.01,
    };

    /// Shared by spawned circles and triangles.
    pub const SPAWN_ROUND: Self = Self {
        restitution: 0.7,
        friction: 0.05,
        air_friction: 0.01,
    };

    pub const FRAGMENT: Self = Self {
        restitution: 0.5,
        friction: 0.05,
        air_friction: 0.01,
    };

    /// Per-tick air friction expressed as continuous linear damping (1/s).
    #[inline]
    pub fn linear_damping(&self) -> f32 {
        self.air_friction * 60.0
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_outline() {
        let outline = ShapeKind::Rectangle { width: 50.0, height: 20.0 }.outline();
        assert_eq!(outline.len(), 4);
        assert_eq!(outline[0], Vec2::new(-25.0, -10.0));
        assert_eq!(outline[2], Vec2::new(25.0, 10.0));
    }

    #[test]
    fn test_circle_sides() {
        assert_eq!(circle_sides(30.0), 25);
        assert_eq!(circle_sides(10.0), 10);
        assert_eq!(circle_sides(4.0), 10);
        assert_eq!(circle_sides(12.5), 13);
        assert_eq!(ShapeKind::FRAGMENT.outline().len(), 10);
    }

    #[test]
    fn test_polygon_vertices_on_radius() {
        for v in ShapeKind::SPAWN_TRIANGLE.outline() {
            assert!((v.length() - 40.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_triangle_centered() {
        let centroid: Vec2 = ShapeKind::SPAWN_TRIANGLE.outline().iter().sum::<Vec2>() / 3.0;
        assert!(centroid.length() < 1e-3);
    }

    #[test]
    fn test_triangle_points_left() {
        let outline = ShapeKind::Triangle { radius: 10.0 }.outline();
        assert!((outline[1] - Vec2::new(-10.0, 0.0)).length() < 1e-4);
        // the other two share x, forming a vertical edge
        assert!((outline[0].x - outline[2].x).abs() < 1e-4);
        assert!((outline[0].x - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_names() {
        assert_eq!(ShapeKind::SEED_BOX.name(), "rectangle");
        assert_eq!(ShapeKind::FRAGMENT.name(), "circle");
        assert_eq!(ShapeKind::SPAWN_TRIANGLE.name(), "triangle");
    }

    #[test]
    fn test_linear_damping() {
        assert!((Material::FRAGMENT.linear_damping() - 0.6).abs() < 1e-6);
    }
}

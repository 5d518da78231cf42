//! Tessellation of draw commands into triangle lists.
//!
//! Every primitive becomes plain triangles: rectangles are two triangles,
//! filled polygons a fan from their first vertex (sketch bodies are convex)
//! and strokes one thin quad per edge.

use glam::Vec2;

use crate::draw::{Color, DrawCommand};
use crate::shader::Vertex;
use crate::sizing::CanvasSize;

/// Outline width in logical pixels.
pub const STROKE_WIDTH: f32 = 1.0;

fn vertex(p: Vec2, color: [f32; 4]) -> Vertex {
    Vertex {
        position: p.to_array(),
        color,
    }
}

fn push_quad(out: &mut Vec<Vertex>, corners: [Vec2; 4], color: [f32; 4]) {
    let [a, b, c, d] = corners;
    out.extend([a, b, c, a, c, d].map(|p| vertex(p, color)));
}

fn push_rect(out: &mut Vec<Vertex>, origin: Vec2, size: Vec2, color: Color) {
    push_quad(
        out,
        [
            origin,
            origin + Vec2::new(size.x, 0.0),
            origin + size,
            origin + Vec2::new(0.0, size.y),
        ],
        color.to_linear(),
    );
}

fn push_fill(out: &mut Vec<Vertex>, points: &[Vec2], color: Color) {
    let color = color.to_linear();
    for pair in points.windows(2).skip(1) {
        out.extend([points[0], pair[0], pair[1]].map(|p| vertex(p, color)));
    }
}

fn push_stroke(out: &mut Vec<Vertex>, points: &[Vec2], color: Color) {
    let color = color.to_linear();
    let half = STROKE_WIDTH * 0.5;
    for (i, &a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        let Some(dir) = (b - a).try_normalize() else {
            continue;
        };
        let n = dir.perp() * half;
        push_quad(out, [a + n, b + n, b - n, a - n], color);
    }
}

/// Append triangles for `commands` to `out`.
pub fn tessellate(commands: &[DrawCommand], canvas: CanvasSize, out: &mut Vec<Vertex>) {
    for command in commands {
        match command {
            DrawCommand::Clear(color) => {
                push_rect(out, Vec2::ZERO, Vec2::new(canvas.width, canvas.height), *color);
            }
            DrawCommand::Rect { origin, size, fill } => push_rect(out, *origin, *size, *fill),
            DrawCommand::Polygon { points, fill, stroke } => {
                if points.len() < 3 {
                    continue;
                }
                if let Some(fill) = fill {
                    push_fill(out, points, *fill);
                }
                if let Some(stroke) = stroke {
                    push_stroke(out, points, *stroke);
                }
            }
        }
    }
}

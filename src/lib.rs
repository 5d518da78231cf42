//! # physketch
//!
//! An interactive 2D physics sketch. Shapes fall inside a walled canvas;
//! a "floating dock" in the top middle third cancels their downward motion.
//!
//! - **Click** empty space to spawn a burst of 1–9 random shapes.
//! - **Click and drag** a shape to throw it around.
//! - **Double-click** a shape to shatter it into five small fragments.
//! - **Move** the pointer to shift the background color.
//!
//! Rigid-body dynamics come from [rapier2d]; windowing and drawing from
//! winit and wgpu. This crate is the glue: canvas layout, input handling,
//! the dock rule and turning bodies into draw commands.
//!
//! ## Quick Start
//!
//! ```ignore
//! use physketch::prelude::*;
//!
//! fn main() -> Result<(), SketchError> {
//!     physketch::run(SketchConfig::default())
//! }
//! ```
//!
//! ## Headless
//!
//! [`Sketch`] has no window or GPU dependency, so a session can be driven
//! from code:
//!
//! ```ignore
//! use physketch::prelude::*;
//!
//! let mut sketch = Sketch::new(SketchConfig::default(), 800.0, 600.0)?;
//! sketch.set_pointer(Vec2::new(200.0, 400.0));
//! sketch.press();
//! sketch.release();
//! for _ in 0..60 {
//!     sketch.step();
//! }
//! let commands = sketch.render();
//! ```
//!
//! ## Frame order
//!
//! | Step | What happens |
//! |------|--------------|
//! | 1 | Pointer events are applied in the order they arrived |
//! | 2 | Physics advances one 1/60 s step |
//! | 3 | The dock rule zeroes vertical velocity inside the dock |
//! | 4 | [`Sketch::render`] emits background, dock overlay, body outlines |
//!
//! [rapier2d]: https://rapier.rs

pub mod config;
pub mod controller;
pub mod draw;
mod error;
mod gpu;
pub mod gravity_zone;
pub mod input;
pub mod physics;
pub mod pointer;
mod shader;
pub mod shape;
pub mod sizing;
pub mod sketch;
pub mod spawn;
mod window;

pub use config::SketchConfig;
pub use controller::{BodyId, DragState, Selection};
pub use draw::{Color, DrawCommand};
pub use error::{ConfigError, GpuError, SketchError};
pub use glam::Vec2;
pub use gravity_zone::GravityZone;
pub use input::{Input, MouseButton, PointerEvent};
pub use physics::{BodyDesc, PhysicsWorld};
pub use shape::{Material, ShapeKind};
pub use sizing::{canvas_size, AspectRatio, CanvasSize};
pub use sketch::{PressOutcome, Sketch, TrackedBody, WallSide};
pub use spawn::{Spawn, SpawnContext};
pub use window::{run, App};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use physketch::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::SketchConfig;
    pub use crate::controller::{BodyId, DragState};
    pub use crate::draw::{Color, DrawCommand};
    pub use crate::error::SketchError;
    pub use crate::input::{Input, PointerEvent};
    pub use crate::shape::{Material, ShapeKind};
    pub use crate::sizing::{AspectRatio, CanvasSize};
    pub use crate::sketch::{PressOutcome, Sketch, WallSide};
    pub use crate::Vec2;
}

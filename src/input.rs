//! Pointer input for the sketch.
//!
//! [`Input`] turns raw winit window events into canvas-space pointer state
//! and an ordered queue of [`PointerEvent`]s for the current frame. Window
//! systems do not report double-clicks, so they are synthesized here: a
//! release that completes the second of two presses close together in time
//! and space queues a [`PointerEvent::DoubleClicked`] after the release,
//! the same sequence a browser delivers.
//!
//! Hosts other than the window (tests, benches, replays) can drive the
//! queue directly with [`Input::press`], [`Input::release`] and
//! [`Input::set_pointer`].

use std::time::{Duration, Instant};

use glam::Vec2;
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};

/// Max distance between two presses of a double-click, in logical pixels.
const DOUBLE_CLICK_SLOP: f32 = 5.0;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    fn from_winit(btn: WinitMouseButton) -> Option<Self> {
        match btn {
            WinitMouseButton::Left => Some(MouseButton::Left),
            WinitMouseButton::Right => Some(MouseButton::Right),
            WinitMouseButton::Middle => Some(MouseButton::Middle),
            _ => None,
        }
    }
}

/// A discrete pointer action, in the order it happened, with the pointer
/// position at that moment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Pressed { at: Vec2 },
    Released { at: Vec2 },
    DoubleClicked { at: Vec2 },
}

impl PointerEvent {
    /// Where the pointer was when the event happened.
    #[inline]
    pub fn position(&self) -> Vec2 {
        match *self {
            PointerEvent::Pressed { at }
            | PointerEvent::Released { at }
            | PointerEvent::DoubleClicked { at } => at,
        }
    }
}

/// Pointer state and this frame's event queue.
#[derive(Debug)]
pub struct Input {
    /// Pointer in logical pixels relative to the canvas origin.
    pointer: Vec2,
    events: Vec<PointerEvent>,
    held: bool,
    scale_factor: f64,
    double_click_window: Duration,
    /// Time and place of the last press that could start a double-click.
    last_press: Option<(Instant, Vec2)>,
    /// The press in progress is the second of a double-click.
    armed: bool,
}

impl Input {
    /// Create an input tracker. Two presses within `double_click_window`
    /// form a double-click.
    pub fn new(double_click_window: Duration) -> Self {
        Self {
            pointer: Vec2::ZERO,
            events: Vec::new(),
            held: false,
            scale_factor: 1.0,
            double_click_window,
            last_press: None,
            armed: false,
        }
    }

    // ========== Queries ==========

    /// Pointer position in canvas coordinates.
    #[inline]
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Events since the last [`begin_frame`](Self::begin_frame), oldest first.
    #[inline]
    pub fn events(&self) -> &[PointerEvent] {
        &self.events
    }

    /// Whether the primary button is down.
    #[inline]
    pub fn held(&self) -> bool {
        self.held
    }

    #[inline]
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    // ========== Driving ==========

    pub fn set_pointer(&mut self, pointer: Vec2) {
        self.pointer = pointer;
    }

    /// Record a primary-button press at the current pointer.
    pub fn press(&mut self, at: Instant) {
        self.press_button(MouseButton::Left, at);
    }

    /// Record a press of any button. Only the primary button can start or
    /// complete a double-click.
    pub fn press_button(&mut self, button: MouseButton, at: Instant) {
        self.held = true;
        self.events.push(PointerEvent::Pressed { at: self.pointer });
        if button != MouseButton::Left {
            return;
        }

        let continues = self.last_press.is_some_and(|(t, p)| {
            at.saturating_duration_since(t) <= self.double_click_window
                && p.distance(self.pointer) <= DOUBLE_CLICK_SLOP
        });

        if continues {
            self.armed = true;
            self.last_press = None;
        } else {
            self.armed = false;
            self.last_press = Some((at, self.pointer));
        }
    }

    /// Record a primary-button release.
    pub fn release(&mut self) {
        self.release_button(MouseButton::Left);
    }

    /// Record a release of any button.
    pub fn release_button(&mut self, button: MouseButton) {
        self.held = false;
        self.events.push(PointerEvent::Released { at: self.pointer });
        if button == MouseButton::Left && std::mem::take(&mut self.armed) {
            self.events.push(PointerEvent::DoubleClicked { at: self.pointer });
        }
    }

    /// Clear per-frame state. Call after the frame consumed the events.
    pub fn begin_frame(&mut self) {
        self.events.clear();
    }

    /// Physical-to-logical pixel ratio of the window.
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor;
    }

    /// Process a winit window event that arrived at `now`.
    pub(crate) fn handle_event(&mut self, event: &WindowEvent, now: Instant) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(self.scale_factor);
                self.set_pointer(Vec2::new(logical.x, logical.y));
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = MouseButton::from_winit(*button) else {
                    return;
                };
                match state {
                    ElementState::Pressed => self.press_button(button, now),
                    ElementState::Released => self.release_button(button),
                }
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.set_scale_factor(*scale_factor);
            }

            _ => {}
        }
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new(Duration::from_millis(300))
    }
}

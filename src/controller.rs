//! Pointer controller state.
//!
//! Pressing near a body selects it for dragging; releasing lets go. The
//! actual drag is done by the physics world's pointer constraint, this
//! module only tracks which body the user is holding and answers the
//! approximate "which body is under the pointer" question.
//!
//! Hit-testing is by distance to the body's center against a fixed radius,
//! regardless of the body's real outline.

use glam::Vec2;

/// Stable identifier of a tracked body. Never reused within a sketch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// Which body is held, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<BodyId>,
    state: DragState,
}

impl Selection {
    #[inline]
    pub fn state(&self) -> DragState {
        self.state
    }

    #[inline]
    pub fn selected(&self) -> Option<BodyId> {
        self.selected
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.state == DragState::Dragging
    }

    /// Start dragging `id`.
    pub fn select(&mut self, id: BodyId) {
        self.selected = Some(id);
        self.state = DragState::Dragging;
    }

    /// Forget any selection.
    pub fn clear(&mut self) {
        self.selected = None;
        self.state = DragState::Idle;
    }

    /// Pointer released. Returns the body that was being dragged.
    pub fn release(&mut self) -> Option<BodyId> {
        if !self.is_dragging() {
            return None;
        }
        let released = self.selected;
        self.clear();
        released
    }

    /// Drop the selection if it refers to `id`.
    pub fn forget(&mut self, id: BodyId) {
        if self.selected == Some(id) {
            self.clear();
        }
    }
}

/// Index of the first position within `radius` of `pointer`, oldest first.
pub fn first_hit(positions: &[Vec2], pointer: Vec2, radius: f32) -> Option<usize> {
    positions.iter().position(|p| p.distance(pointer) < radius)
}

/// Index of the last position within `radius` of `pointer`, newest first.
pub fn last_hit(positions: &[Vec2], pointer: Vec2, radius: f32) -> Option<usize> {
    positions.iter().rposition(|p| p.distance(pointer) < radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_cycle() {
        let mut sel = Selection::default();
        assert_eq!(sel.state(), DragState::Idle);
        assert_eq!(sel.release(), None);

        sel.select(BodyId(3));
        assert!(sel.is_dragging());
        assert_eq!(sel.selected(), Some(BodyId(3)));

        assert_eq!(sel.release(), Some(BodyId(3)));
        assert_eq!(sel, Selection::default());
    }

    #[test]
    fn test_forget() {
        let mut sel = Selection::default();
        sel.select(BodyId(1));
        sel.forget(BodyId(2));
        assert!(sel.is_dragging());
        sel.forget(BodyId(1));
        assert!(!sel.is_dragging());
    }

    #[test]
    fn test_hit_order() {
        let positions = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(100.0, 0.0),
        ];
        let pointer = Vec2::new(5.0, 0.0);
        assert_eq!(first_hit(&positions, pointer, 30.0), Some(0));
        assert_eq!(last_hit(&positions, pointer, 30.0), Some(1));
        assert_eq!(first_hit(&positions, Vec2::new(50.0, 50.0), 30.0), None);
    }

    #[test]
    fn test_hit_radius_is_strict() {
        let positions = [Vec2::new(30.0, 0.0)];
        assert_eq!(first_hit(&positions, Vec2::ZERO, 30.0), None);
        assert_eq!(first_hit(&positions, Vec2::new(0.001, 0.0), 30.0), Some(0));
    }
}

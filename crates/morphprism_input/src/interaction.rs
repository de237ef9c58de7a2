//! Pointer interaction state machine
//!
//! A single-threaded, per-event synchronous state machine with three mutually
//! exclusive modes:
//!
//! - `Idle`: moves only update the cursor baseline for the next drag.
//! - `Rotating`: entered by a press outside the control bar; moves accumulate
//!   rotation angles from the drag delta.
//! - `AdjustingMorph`: entered by a press inside the control bar; the morph
//!   factor tracks the absolute cursor x within the bar (it snaps to wherever
//!   the pointer is, including on the press itself).
//!
//! Release from either active mode returns to `Idle`. Every event is valid in
//! every mode, so there is no invalid-transition path.

use winit::event::{ElementState, MouseButton};

/// Which interaction is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    /// No button held
    Idle,
    /// Left button held outside the control bar: drag rotates the solid
    Rotating,
    /// Left button held on the control bar: drag sets the morph factor
    AdjustingMorph,
}

/// Screen-pixel rectangle of the control bar hit region
///
/// Anchored to the window: the bar sits in a lower strip of the window,
/// bounded horizontally to a central band. Hit testing uses strict
/// inequalities on all four edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlBarBounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl ControlBarBounds {
    /// Build bounds anchored to the bottom of a window
    ///
    /// `top_offset` and `bottom_offset` are distances up from the window's
    /// bottom edge (top_offset > bottom_offset).
    pub fn anchored(
        left: f32,
        width: f32,
        top_offset: f32,
        bottom_offset: f32,
        window_height: f32,
    ) -> Self {
        Self {
            left,
            right: left + width,
            top: window_height - top_offset,
            bottom: window_height - bottom_offset,
        }
    }

    /// Horizontal span of the bar
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Whether a cursor position lands on the bar
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x > self.left && x < self.right && y > self.top && y < self.bottom
    }

    /// Morph factor for an absolute cursor x, clamped to [0, 1]
    pub fn morph_at(&self, x: f32) -> f32 {
        ((x - self.left) / self.width()).clamp(0.0, 1.0)
    }
}

/// Interaction state: rotation angles, morph factor, and the active mode
///
/// Owned by the application and updated synchronously from window events;
/// the render loop reads it once per frame. Angles are accumulated degrees,
/// unbounded by design.
pub struct InteractionState {
    mode: InteractionMode,
    angle_x: f32,
    angle_y: f32,
    morph: f32,
    last_cursor: (f32, f32),
    bar: ControlBarBounds,
    drag_sensitivity: f32,
}

impl InteractionState {
    pub fn new(bar: ControlBarBounds) -> Self {
        Self {
            mode: InteractionMode::Idle,
            angle_x: 0.0,
            angle_y: 0.0,
            morph: 0.0,
            last_cursor: (0.0, 0.0),
            bar,
            drag_sensitivity: 0.5,
        }
    }

    /// Builder: set drag sensitivity (degrees per pixel)
    pub fn with_drag_sensitivity(mut self, sensitivity: f32) -> Self {
        self.drag_sensitivity = sensitivity;
        self
    }

    /// Current interaction mode
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Accumulated rotation angles in degrees: (around X, around Y)
    pub fn angles(&self) -> (f32, f32) {
        (self.angle_x, self.angle_y)
    }

    /// Current morph factor in [0, 1]
    pub fn morph(&self) -> f32 {
        self.morph
    }

    /// Re-anchor the control bar (window resized)
    pub fn set_bar_bounds(&mut self, bar: ControlBarBounds) {
        self.bar = bar;
    }

    /// Handle a pointer-move event with absolute window coordinates
    pub fn process_cursor_moved(&mut self, x: f64, y: f64) {
        let (x, y) = (x as f32, y as f32);

        match self.mode {
            InteractionMode::Rotating => {
                let dx = x - self.last_cursor.0;
                let dy = y - self.last_cursor.1;
                self.angle_y += dx * self.drag_sensitivity;
                self.angle_x += dy * self.drag_sensitivity;
            }
            InteractionMode::AdjustingMorph => {
                self.morph = self.bar.morph_at(x);
            }
            InteractionMode::Idle => {}
        }

        // Always re-baseline so the next drag's delta starts here
        self.last_cursor = (x, y);
    }

    /// Handle a pointer-button event
    ///
    /// The press position is the last recorded cursor position (winit delivers
    /// the position through `CursorMoved` before the click).
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button != MouseButton::Left {
            return;
        }

        match state {
            ElementState::Pressed => {
                let (x, y) = self.last_cursor;
                if self.bar.contains(x, y) {
                    self.mode = InteractionMode::AdjustingMorph;
                    // Absolute mapping: snap to the press position immediately
                    self.morph = self.bar.morph_at(x);
                } else {
                    self.mode = InteractionMode::Rotating;
                }
            }
            ElementState::Released => {
                self.mode = InteractionMode::Idle;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Bar for an 800x600 window with the default geometry:
    // x in (200, 600), y in (550, 570)
    fn bar() -> ControlBarBounds {
        ControlBarBounds::anchored(200.0, 400.0, 50.0, 30.0, 600.0)
    }

    fn state() -> InteractionState {
        InteractionState::new(bar())
    }

    #[test]
    fn test_bar_anchoring() {
        let b = bar();
        assert_eq!(b.left, 200.0);
        assert_eq!(b.right, 600.0);
        assert_eq!(b.top, 550.0);
        assert_eq!(b.bottom, 570.0);
        assert_eq!(b.width(), 400.0);
    }

    #[test]
    fn test_bar_hit_test_strict_edges() {
        let b = bar();
        assert!(b.contains(400.0, 560.0));
        assert!(!b.contains(200.0, 560.0)); // on the edge, strict
        assert!(!b.contains(400.0, 550.0));
        assert!(!b.contains(100.0, 560.0));
        assert!(!b.contains(400.0, 580.0));
    }

    #[test]
    fn test_drag_outside_bar_rotates() {
        let mut s = state();
        s.process_cursor_moved(100.0, 100.0);
        s.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert_eq!(s.mode(), InteractionMode::Rotating);

        // Delta (dx = 10, dy = -5) at sensitivity 0.5
        s.process_cursor_moved(110.0, 95.0);
        let (angle_x, angle_y) = s.angles();
        assert_eq!(angle_y, 5.0);
        assert_eq!(angle_x, -2.5);
        assert_eq!(s.morph(), 0.0);
    }

    #[test]
    fn test_press_inside_bar_snaps_morph() {
        let mut s = state();
        s.process_cursor_moved(400.0, 560.0);
        s.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert_eq!(s.mode(), InteractionMode::AdjustingMorph);
        assert_eq!(s.morph(), 0.5); // (400 - 200) / 400
    }

    #[test]
    fn test_morph_tracks_absolute_x_with_clamping() {
        let mut s = state();
        s.process_cursor_moved(400.0, 560.0);
        s.process_mouse_button(MouseButton::Left, ElementState::Pressed);

        s.process_cursor_moved(200.0, 560.0);
        assert_eq!(s.morph(), 0.0);

        s.process_cursor_moved(700.0, 560.0);
        assert_eq!(s.morph(), 1.0);

        // Angles untouched while adjusting the bar
        assert_eq!(s.angles(), (0.0, 0.0));
    }

    #[test]
    fn test_release_returns_to_idle() {
        let mut s = state();

        // From Rotating
        s.process_cursor_moved(100.0, 100.0);
        s.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        s.process_mouse_button(MouseButton::Left, ElementState::Released);
        assert_eq!(s.mode(), InteractionMode::Idle);

        // From AdjustingMorph
        s.process_cursor_moved(300.0, 560.0);
        s.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        s.process_mouse_button(MouseButton::Left, ElementState::Released);
        assert_eq!(s.mode(), InteractionMode::Idle);

        // Idle moves change neither angles nor morph
        let angles = s.angles();
        let morph = s.morph();
        s.process_cursor_moved(50.0, 50.0);
        assert_eq!(s.angles(), angles);
        assert_eq!(s.morph(), morph);
    }

    #[test]
    fn test_idle_moves_rebaseline_drag_delta() {
        let mut s = state();
        s.process_cursor_moved(0.0, 0.0);
        s.process_cursor_moved(50.0, 50.0);

        // The drag delta starts from the latest idle position, not the first
        s.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        s.process_cursor_moved(60.0, 40.0);
        assert_eq!(s.angles(), (-5.0, 5.0));
    }

    #[test]
    fn test_other_buttons_ignored() {
        let mut s = state();
        s.process_cursor_moved(100.0, 100.0);
        s.process_mouse_button(MouseButton::Right, ElementState::Pressed);
        assert_eq!(s.mode(), InteractionMode::Idle);
    }

    #[test]
    fn test_custom_sensitivity() {
        let mut s = state().with_drag_sensitivity(2.0);
        s.process_cursor_moved(0.0, 0.0);
        s.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        s.process_cursor_moved(3.0, 1.0);
        assert_eq!(s.angles(), (2.0, 6.0));
    }
}

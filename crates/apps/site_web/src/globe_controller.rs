//! Pointer controller for the hero globe.
//!
//! Tracks the drag state, turns pointer deltas into rotation targets and
//! tells a click apart from the release at the end of a drag. It never
//! touches the DOM; the widget feeds it event coordinates.

use gpu::camera::Camera3D;
use runtime::RotationState;

/// Radians of rotation per pixel of mouse drag.
pub const MOUSE_SENSITIVITY: f64 = 0.005;
/// Touch drags turn a little faster than the mouse.
pub const TOUCH_SENSITIVITY: f64 = 0.008;
/// A release this close to the press point (pixels) counts as a click.
pub const CLICK_THRESHOLD_PX: f64 = 5.0;
/// Camera distance per unit of wheel `deltaY`.
pub const WHEEL_ZOOM_SCALE: f64 = 0.005 * 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

impl PointerKind {
    pub fn sensitivity(self) -> f64 {
        match self {
            PointerKind::Mouse => MOUSE_SENSITIVITY,
            PointerKind::Touch => TOUCH_SENSITIVITY,
        }
    }
}

/// CSS cursor over the globe container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Grab,
    Grabbing,
    Pointer,
}

impl Cursor {
    pub fn css(self) -> &'static str {
        match self {
            Cursor::Grab => "grab",
            Cursor::Grabbing => "grabbing",
            Cursor::Pointer => "pointer",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PointerController {
    dragging: bool,
    /// Position of the last press, kept after release for click detection.
    start_pos_px: [f64; 2],
    last_pos_px: [f64; 2],
}

impl PointerController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Mouse press. Only the primary button starts a drag; returns whether it did.
    pub fn on_pointer_down(&mut self, pos_px: [f64; 2], button: i16) -> bool {
        if button != 0 {
            return false;
        }
        self.press(pos_px);
        true
    }

    /// Touch start. Multi-touch gestures are left to the browser.
    pub fn on_touch_start(&mut self, pos_px: [f64; 2], touches: u32) -> bool {
        if touches != 1 {
            return false;
        }
        self.press(pos_px);
        true
    }

    fn press(&mut self, pos_px: [f64; 2]) {
        self.dragging = true;
        self.start_pos_px = pos_px;
        self.last_pos_px = pos_px;
    }

    /// Pointer move. While dragging, the delta since the previous move is
    /// added to the rotation targets; returns whether it was.
    pub fn on_pointer_move(
        &mut self,
        pos_px: [f64; 2],
        kind: PointerKind,
        rotation: &mut RotationState,
    ) -> bool {
        if !self.dragging {
            return false;
        }
        let dx = pos_px[0] - self.last_pos_px[0];
        let dy = pos_px[1] - self.last_pos_px[1];
        rotation.drag(dx, dy, kind.sensitivity());
        self.last_pos_px = pos_px;
        true
    }

    /// Touch move. Only single-touch drags rotate; returns whether the
    /// event was consumed (and page scrolling should be suppressed).
    pub fn on_touch_move(
        &mut self,
        pos_px: [f64; 2],
        touches: u32,
        rotation: &mut RotationState,
    ) -> bool {
        if touches != 1 {
            return false;
        }
        self.on_pointer_move(pos_px, PointerKind::Touch, rotation)
    }

    pub fn on_pointer_up(&mut self) {
        self.dragging = false;
    }

    /// Whether a click at `pos_px` is a click rather than the end of a drag.
    pub fn is_click(&self, pos_px: [f64; 2]) -> bool {
        let dx = pos_px[0] - self.start_pos_px[0];
        let dy = pos_px[1] - self.start_pos_px[1];
        (dx * dx + dy * dy).sqrt() <= CLICK_THRESHOLD_PX
    }

    /// Cursor when nothing is hovered.
    pub fn idle_cursor(&self) -> Cursor {
        if self.dragging {
            Cursor::Grabbing
        } else {
            Cursor::Grab
        }
    }
}

/// Moves the camera along its axis for a wheel event; the distance stays
/// within the camera's zoom range.
pub fn on_wheel(camera: &mut Camera3D, delta_y: f64) {
    camera.zoom_by(delta_y * WHEEL_ZOOM_SCALE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpu::camera::{MAX_DISTANCE, MIN_DISTANCE};

    fn rotation() -> RotationState {
        RotationState::at(0.0, 0.0)
    }

    #[test]
    fn short_release_is_a_click() {
        let mut ctrl = PointerController::new();
        let mut rot = rotation();
        assert!(ctrl.on_pointer_down([100.0, 100.0], 0));
        ctrl.on_pointer_move([103.0, 104.0], PointerKind::Mouse, &mut rot);
        ctrl.on_pointer_up();
        // Displacement exactly 5 px.
        assert!(ctrl.is_click([103.0, 104.0]));
    }

    #[test]
    fn drag_beyond_threshold_suppresses_click() {
        let mut ctrl = PointerController::new();
        let mut rot = rotation();
        ctrl.on_pointer_down([100.0, 100.0], 0);
        ctrl.on_pointer_move([140.0, 100.0], PointerKind::Mouse, &mut rot);
        ctrl.on_pointer_up();
        assert!(!ctrl.is_click([140.0, 100.0]));
        assert!(!ctrl.is_click([105.0, 101.0]));
    }

    #[test]
    fn mouse_drag_feeds_rotation_targets() {
        let mut ctrl = PointerController::new();
        let mut rot = rotation();
        ctrl.on_pointer_down([0.0, 0.0], 0);
        assert!(ctrl.on_pointer_move([10.0, -4.0], PointerKind::Mouse, &mut rot));
        assert!(ctrl.on_pointer_move([30.0, -4.0], PointerKind::Mouse, &mut rot));
        assert!((rot.target_y - 30.0 * MOUSE_SENSITIVITY).abs() < 1e-12);
        assert!((rot.target_x + 4.0 * MOUSE_SENSITIVITY).abs() < 1e-12);
        // Current rotation is left to the damping step.
        assert_eq!(rot.current_y, 0.0);
    }

    #[test]
    fn moves_without_a_press_do_nothing() {
        let mut ctrl = PointerController::new();
        let mut rot = rotation();
        assert!(!ctrl.on_pointer_move([50.0, 50.0], PointerKind::Mouse, &mut rot));
        assert_eq!(rot, rotation());
    }

    #[test]
    fn secondary_button_does_not_drag() {
        let mut ctrl = PointerController::new();
        assert!(!ctrl.on_pointer_down([0.0, 0.0], 2));
        assert!(!ctrl.is_dragging());
        assert_eq!(ctrl.idle_cursor(), Cursor::Grab);
    }

    #[test]
    fn touch_drag_is_single_finger_only() {
        let mut ctrl = PointerController::new();
        let mut rot = rotation();
        assert!(!ctrl.on_touch_start([0.0, 0.0], 2));
        assert!(ctrl.on_touch_start([0.0, 0.0], 1));
        assert_eq!(ctrl.idle_cursor(), Cursor::Grabbing);
        assert!(!ctrl.on_touch_move([10.0, 0.0], 2, &mut rot));
        assert!(ctrl.on_touch_move([10.0, 0.0], 1, &mut rot));
        assert!((rot.target_y - 10.0 * TOUCH_SENSITIVITY).abs() < 1e-12);
        ctrl.on_pointer_up();
        assert!(!ctrl.is_dragging());
    }

    #[test]
    fn wheel_zoom_is_clamped() {
        let mut cam = Camera3D::hero(1.0);
        on_wheel(&mut cam, 100.0);
        assert!((cam.distance() - (16.5 + 100.0 * WHEEL_ZOOM_SCALE)).abs() < 1e-12);
        on_wheel(&mut cam, 1.0e6);
        assert_eq!(cam.distance(), MAX_DISTANCE);
        on_wheel(&mut cam, -1.0e6);
        assert_eq!(cam.distance(), MIN_DISTANCE);
    }

    #[test]
    fn cursor_names() {
        assert_eq!(Cursor::Grab.css(), "grab");
        assert_eq!(Cursor::Grabbing.css(), "grabbing");
        assert_eq!(Cursor::Pointer.css(), "pointer");
    }
}

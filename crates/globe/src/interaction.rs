//! Pointer-drag rotation.
//!
//! Two states: idle and dragging. While dragging, pointer deltas rotate the
//! globe directly; releasing (or leaving the surface) returns to idle so
//! autonomous rotation resumes on the next frame. There is no inertia.

use scene::components::Orientation;

use crate::config::InteractionConfig;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Last pointer position in pixels.
        last_px: [f64; 2],
    },
}

#[derive(Debug, Clone)]
pub struct InteractionController {
    state: DragState,
    sensitivity_x: f64,
    sensitivity_y: f64,
}

impl InteractionController {
    pub fn new(config: &InteractionConfig) -> Self {
        Self {
            state: DragState::Idle,
            sensitivity_x: config.sensitivity_x,
            sensitivity_y: config.sensitivity_y,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn on_pointer_down(&mut self, pos_px: [f64; 2]) {
        self.state = DragState::Dragging { last_px: pos_px };
    }

    /// Apply the drag delta to `orientation`. Returns the applied
    /// `(d_yaw, d_pitch)`, or `None` when not dragging.
    pub fn on_pointer_move(
        &mut self,
        pos_px: [f64; 2],
        orientation: &mut Orientation,
    ) -> Option<(f64, f64)> {
        let DragState::Dragging { last_px } = self.state else {
            return None;
        };
        let dx = pos_px[0] - last_px[0];
        let dy = pos_px[1] - last_px[1];
        let delta = (dx * self.sensitivity_x, dy * self.sensitivity_y);
        orientation.rotate(delta.0, delta.1);
        self.state = DragState::Dragging { last_px: pos_px };
        Some(delta)
    }

    pub fn on_pointer_up(&mut self) {
        self.state = DragState::Idle;
    }

    /// Same as release: a drag that leaves the surface must not stay stuck.
    pub fn on_pointer_leave(&mut self) {
        self.on_pointer_up();
    }
}

#[cfg(test)]
mod tests {
    use super::{DragState, InteractionController};
    use crate::config::InteractionConfig;
    use scene::components::Orientation;

    fn controller() -> InteractionController {
        InteractionController::new(&InteractionConfig {
            sensitivity_x: 0.01,
            sensitivity_y: 0.002,
            pitch_clamp_rad: None,
        })
    }

    #[test]
    fn move_while_idle_does_nothing() {
        let mut c = controller();
        let mut o = Orientation::identity();
        assert_eq!(c.on_pointer_move([50.0, 50.0], &mut o), None);
        assert_eq!(o, Orientation::identity());
    }

    #[test]
    fn drag_applies_scaled_deltas() {
        let mut c = controller();
        let mut o = Orientation::identity();
        c.on_pointer_down([100.0, 100.0]);
        c.on_pointer_move([120.0, 90.0], &mut o);
        c.on_pointer_move([130.0, 95.0], &mut o);

        assert!((o.yaw_rad - 30.0 * 0.01).abs() < 1e-12);
        assert!((o.pitch_rad - (-5.0 * 0.002)).abs() < 1e-12);
        assert_eq!(c.state(), DragState::Dragging { last_px: [130.0, 95.0] });
    }

    #[test]
    fn up_and_leave_both_release() {
        let mut c = controller();
        c.on_pointer_down([0.0, 0.0]);
        c.on_pointer_up();
        assert!(!c.is_dragging());

        c.on_pointer_down([0.0, 0.0]);
        c.on_pointer_leave();
        assert!(!c.is_dragging());

        // Releasing while idle is harmless.
        c.on_pointer_leave();
        assert_eq!(c.state(), DragState::Idle);
    }

    #[test]
    fn new_press_resets_anchor() {
        let mut c = controller();
        let mut o = Orientation::identity();
        c.on_pointer_down([0.0, 0.0]);
        c.on_pointer_up();
        c.on_pointer_down([500.0, 500.0]);
        let delta = c.on_pointer_move([501.0, 500.0], &mut o).unwrap();
        assert!((delta.0 - 0.01).abs() < 1e-12);
        assert_eq!(delta.1, 0.0);
    }
}

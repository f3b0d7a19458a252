use crate::flight::FlightState;
use crate::frame::MAX_FRAME_DT_S;
use crate::rotation::RotationState;

/// Rates are tuned per frame at this refresh rate.
pub const REFERENCE_FPS: f64 = 60.0;

/// Everything the hero globe animates, independent of the renderer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WidgetState {
    pub rotation: RotationState,
    pub flights: Vec<FlightState>,
    pub dragging: bool,
}

impl WidgetState {
    pub fn new(route_count: usize) -> Self {
        Self {
            rotation: RotationState::default(),
            flights: (0..route_count).map(FlightState::staggered).collect(),
            dragging: false,
        }
    }
}

/// Advances the widget by `dt_s` seconds.
///
/// `dt_s` is clamped to `[0, MAX_FRAME_DT_S]` and converted to a number of
/// reference frames, so a 60 Hz display sees exactly the per-frame rates.
/// Order: damp current rotation towards the target, then nudge the yaw
/// target unless dragging, then move the aircraft.
pub fn step(state: &WidgetState, dt_s: f64) -> WidgetState {
    let dt_s = if dt_s.is_finite() {
        dt_s.clamp(0.0, MAX_FRAME_DT_S)
    } else {
        0.0
    };
    let frames = dt_s * REFERENCE_FPS;

    let mut next = state.clone();
    next.rotation.damp(frames);
    if !next.dragging {
        next.rotation.auto_rotate(frames);
    }
    for flight in &mut next.flights {
        flight.advance(frames);
    }
    next
}

#[cfg(test)]
mod tests {
    use super::{WidgetState, step};
    use crate::rotation::{AUTO_ROTATE_PER_FRAME, INITIAL_ROTATION};

    const DT: f64 = 1.0 / 60.0;

    #[test]
    fn starts_at_initial_rotation() {
        let s = WidgetState::new(6);
        assert_eq!(s.rotation.current_x, INITIAL_ROTATION.0);
        assert_eq!(s.rotation.current_y, INITIAL_ROTATION.1);
        assert_eq!(s.flights.len(), 6);
    }

    #[test]
    fn auto_rotation_increases_target_monotonically() {
        let mut s = WidgetState::new(0);
        let mut prev_target = s.rotation.target_y;
        for _ in 0..120 {
            s = step(&s, DT);
            let delta = s.rotation.target_y - prev_target;
            assert!((delta - AUTO_ROTATE_PER_FRAME).abs() < 1e-12);
            // Current lags behind the target, never passes it.
            assert!(s.rotation.current_y <= s.rotation.target_y);
            prev_target = s.rotation.target_y;
        }
    }

    #[test]
    fn dragging_freezes_auto_rotation() {
        let mut s = WidgetState::new(0);
        s.dragging = true;
        let before = s.rotation.target_y;
        s = step(&s, DT);
        assert_eq!(s.rotation.target_y, before);
    }

    #[test]
    fn current_converges_without_oscillation() {
        let mut s = WidgetState::new(0);
        s.dragging = true;
        s.rotation.target_x = 1.5;
        let mut prev_gap = (s.rotation.target_x - s.rotation.current_x).abs();
        for _ in 0..600 {
            s = step(&s, DT);
            let gap = s.rotation.target_x - s.rotation.current_x;
            assert!(gap > 0.0);
            assert!(gap < prev_gap);
            prev_gap = gap;
        }
        assert!(prev_gap < 1e-9);
    }

    #[test]
    fn huge_or_negative_dt_is_clamped() {
        let s = WidgetState::new(1);
        let paused = step(&s, 30.0);
        let capped = step(&s, 0.1);
        assert_eq!(paused, capped);
        assert_eq!(step(&s, -1.0), s);
    }

    #[test]
    fn flights_advance_at_fixed_rate() {
        let s = WidgetState::new(1);
        let next = step(&s, DT);
        assert!((next.flights[0].progress - s.flights[0].progress - 0.003).abs() < 1e-12);
    }
}

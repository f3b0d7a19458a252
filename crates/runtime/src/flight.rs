use foundation::math::{QuadraticBezier3, Quat, TangentFrame, Vec3};

/// Route progress added per 60 Hz frame.
pub const FLIGHT_SPEED_PER_FRAME: f64 = 0.003;

const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_749_894_9;

/// Polyline resolution for the arc-length lookup of the heading.
const ARC_LENGTH_DIVISIONS: usize = 200;

/// Progress of one aircraft along its route, in `[0, 1)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FlightState {
    pub route: usize,
    pub progress: f64,
}

impl FlightState {
    pub fn new(route: usize, progress: f64) -> Self {
        Self {
            route,
            progress: wrap_unit(progress),
        }
    }

    /// Start position for the `route`-th aircraft. Successive routes are
    /// spread over the unit interval by the golden ratio so planes never
    /// bunch up, and the layout is the same on every load.
    pub fn staggered(route: usize) -> Self {
        Self::new(route, route as f64 * GOLDEN_RATIO_CONJUGATE)
    }

    pub fn advance(&mut self, frames: f64) {
        self.progress = wrap_unit(self.progress + FLIGHT_SPEED_PER_FRAME * frames);
    }
}

fn wrap_unit(t: f64) -> f64 {
    if !t.is_finite() {
        return 0.0;
    }
    let w = t.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs.
    if w >= 1.0 { 0.0 } else { w }
}

/// Where an aircraft is and which way it faces at a given progress.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FlightPose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl FlightPose {
    /// Samples `curve` at `t`: position from the curve parameter, heading
    /// from the tangent at arc-length fraction `t`, oriented by the tangent
    /// frame (up = away from the globe centre, forward = along the route).
    pub fn sample(curve: &QuadraticBezier3, t: f64) -> Self {
        let position = curve.point_at(t);
        let heading = curve.tangent_at(curve.t_at_arc_fraction(t, ARC_LENGTH_DIVISIONS));
        let orientation = TangentFrame::on_sphere(position, heading)
            .map(|frame| frame.orientation())
            .unwrap_or_default();
        Self {
            position,
            orientation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FlightPose, FlightState};
    use foundation::math::{QuadraticBezier3, Vec3};

    #[test]
    fn progress_wraps_modulo_one() {
        let mut f = FlightState::new(0, 0.999);
        f.advance(1.0);
        assert!((f.progress - 0.002).abs() < 1e-9);
        assert_eq!(FlightState::new(0, -0.25).progress, 0.75);
        assert_eq!(FlightState::new(0, 1.0).progress, 0.0);
    }

    #[test]
    fn staggered_starts_are_distinct_and_in_range() {
        let starts: Vec<f64> = (0..6).map(|i| FlightState::staggered(i).progress).collect();
        for (i, a) in starts.iter().enumerate() {
            assert!((0.0..1.0).contains(a));
            for b in &starts[i + 1..] {
                assert!((a - b).abs() > 0.05);
            }
        }
    }

    #[test]
    fn pose_faces_along_route_with_belly_to_globe() {
        let curve = QuadraticBezier3::new(
            Vec3::new(-6.0, 0.0, 0.0),
            Vec3::new(0.0, 9.0, 0.0),
            Vec3::new(6.0, 0.0, 0.0),
        );
        let pose = FlightPose::sample(&curve, 0.5);
        assert!((pose.position - Vec3::new(0.0, 4.5, 0.0)).length() < 1e-12);
        let nose = pose.orientation.rotate(Vec3::Z);
        let top = pose.orientation.rotate(Vec3::Y);
        assert!((nose - Vec3::X).length() < 1e-9);
        assert!((top - Vec3::Y).length() < 1e-9);
    }

    #[test]
    fn heading_uses_arc_length_fraction() {
        let curve = QuadraticBezier3::new(
            Vec3::new(-6.0, 0.0, 0.0),
            Vec3::new(-5.0, 8.0, 0.0),
            Vec3::new(6.0, 0.0, 0.0),
        );
        let t = 0.3;
        let pose = FlightPose::sample(&curve, t);
        assert!((pose.position - curve.point_at(t)).length() < 1e-12);

        let expected = curve.tangent_at(curve.t_at_arc_fraction(t, 200));
        let nose = pose.orientation.rotate(Vec3::Z);
        let radial = pose.position.normalize();
        let flattened = (expected - radial.scale(expected.dot(radial))).normalize();
        assert!((nose - flattened).length() < 1e-6);
        assert!((curve.tangent_at(t) - expected).length() > 1e-3);
    }
}

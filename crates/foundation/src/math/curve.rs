use super::Vec3;

/// Quadratic Bezier curve `B(t) = (1-t)^2 p0 + 2(1-t)t p1 + t^2 p2`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct QuadraticBezier3 {
    pub p0: Vec3,
    pub p1: Vec3,
    pub p2: Vec3,
}

impl QuadraticBezier3 {
    pub fn new(p0: Vec3, p1: Vec3, p2: Vec3) -> Self {
        Self { p0, p1, p2 }
    }

    pub fn point_at(&self, t: f64) -> Vec3 {
        let u = 1.0 - t;
        self.p0.scale(u * u) + self.p1.scale(2.0 * u * t) + self.p2.scale(t * t)
    }

    /// First derivative `B'(t)`.
    pub fn derivative_at(&self, t: f64) -> Vec3 {
        (self.p1 - self.p0).scale(2.0 * (1.0 - t)) + (self.p2 - self.p1).scale(2.0 * t)
    }

    /// Unit direction of travel at `t`.
    ///
    /// Falls back to the chord direction where the derivative vanishes
    /// (only possible for degenerate control points).
    pub fn tangent_at(&self, t: f64) -> Vec3 {
        self.derivative_at(t)
            .try_normalize()
            .unwrap_or_else(|| (self.p2 - self.p0).normalize())
    }

    /// Curve parameter at which a fraction `u` of the arc length has been
    /// travelled, from a `divisions`-segment polyline approximation.
    pub fn t_at_arc_fraction(&self, u: f64, divisions: usize) -> f64 {
        let distances = cumulative_distances(&self.points(divisions));
        let total = distances.last().copied().unwrap_or(0.0);
        let u = u.clamp(0.0, 1.0);
        if total <= 0.0 {
            return u;
        }
        let target = u * total;
        let upper = distances
            .partition_point(|&d| d < target)
            .clamp(1, distances.len() - 1);
        let (d0, d1) = (distances[upper - 1], distances[upper]);
        let frac = if d1 > d0 { (target - d0) / (d1 - d0) } else { 0.0 };
        ((upper - 1) as f64 + frac) / (distances.len() - 1) as f64
    }

    /// `divisions + 1` evenly parameterized samples, endpoints included.
    pub fn points(&self, divisions: usize) -> Vec<Vec3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.point_at(i as f64 / divisions as f64))
            .collect()
    }
}

/// Cumulative distance along a polyline, starting at 0 for the first vertex.
///
/// Used as the per-vertex line distance for dashed rendering.
pub fn cumulative_distances(points: &[Vec3]) -> Vec<f64> {
    let mut out = Vec::with_capacity(points.len());
    let mut acc = 0.0;
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            acc += p.distance(points[i - 1]);
        }
        out.push(acc);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{QuadraticBezier3, cumulative_distances};
    use crate::math::Vec3;

    fn curve() -> QuadraticBezier3 {
        QuadraticBezier3::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        )
    }

    #[test]
    fn endpoints_are_interpolated() {
        let c = curve();
        assert_eq!(c.point_at(0.0), c.p0);
        assert_eq!(c.point_at(1.0), c.p2);
        assert_eq!(c.point_at(0.5), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn tangent_is_unit_and_level_at_apex() {
        let c = curve();
        let t = c.tangent_at(0.5);
        assert!((t.length() - 1.0).abs() < 1e-12);
        assert!((t - Vec3::X).length() < 1e-12);
    }

    #[test]
    fn degenerate_curve_uses_chord() {
        let p = Vec3::new(1.0, 1.0, 1.0);
        let c = QuadraticBezier3::new(p, p, Vec3::new(2.0, 1.0, 1.0));
        assert_eq!(c.tangent_at(0.0), Vec3::X);
    }

    #[test]
    fn sampling_includes_both_ends() {
        let pts = curve().points(50);
        assert_eq!(pts.len(), 51);
        assert_eq!(pts[0], Vec3::ZERO);
        assert_eq!(pts[50], Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn arc_fraction_maps_to_equal_lengths() {
        let c = QuadraticBezier3::new(
            Vec3::ZERO,
            Vec3::new(0.2, 3.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
        );
        assert_eq!(c.t_at_arc_fraction(0.0, 200), 0.0);
        assert!((c.t_at_arc_fraction(1.0, 200) - 1.0).abs() < 1e-12);

        let fine = cumulative_distances(&c.points(4000));
        let total = fine[4000];
        let t = c.t_at_arc_fraction(0.5, 200);
        let half = cumulative_distances(&curve_prefix(&c, t, 4000));
        assert!((half[4000] - total * 0.5).abs() < total * 1e-3);
        // Uneven control points: arc length and parameter disagree.
        assert!((t - 0.5).abs() > 0.01);
    }

    #[test]
    fn symmetric_curve_midpoint_is_unchanged() {
        let t = curve().t_at_arc_fraction(0.5, 200);
        assert!((t - 0.5).abs() < 1e-9);
    }

    fn curve_prefix(c: &QuadraticBezier3, t_end: f64, n: usize) -> Vec<Vec3> {
        (0..=n).map(|i| c.point_at(t_end * i as f64 / n as f64)).collect()
    }

    #[test]
    fn distances_accumulate() {
        let d = cumulative_distances(&[Vec3::ZERO, Vec3::X, Vec3::new(1.0, 2.0, 0.0)]);
        assert_eq!(d, vec![0.0, 1.0, 3.0]);
    }
}

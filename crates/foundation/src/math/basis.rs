use super::{Quat, Vec3};

/// Orthonormal frame for an object travelling over a sphere.
///
/// `up` is the outward radial direction at the object's position, `right`
/// is `up x tangent`, and `forward` is re-derived as `right x up` so the
/// three axes are exactly orthogonal even when the tangent is not tangent
/// to the sphere.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TangentFrame {
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

impl TangentFrame {
    /// Builds the frame at `position` (relative to the sphere centre) for a
    /// direction of travel `tangent`.
    ///
    /// Returns `None` when the position is at the centre or the tangent is
    /// parallel to the radial direction.
    pub fn on_sphere(position: Vec3, tangent: Vec3) -> Option<Self> {
        let up = position.try_normalize()?;
        let tangent = tangent.try_normalize()?;
        let right = up.cross(tangent).try_normalize()?;
        let forward = right.cross(up).normalize();
        Some(Self { right, up, forward })
    }

    /// Orientation whose local X/Y/Z axes map to `right`, `up`, `forward`.
    ///
    /// `right = up x forward`, so the basis is right-handed and the result is
    /// a proper rotation: a model whose nose points down local +Z flies nose
    /// first.
    pub fn orientation(&self) -> Quat {
        Quat::from_basis(self.right, self.up, self.forward)
    }
}

#[cfg(test)]
mod tests {
    use super::TangentFrame;
    use crate::math::Vec3;

    fn assert_vec_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-9, "expected {a:?} ~= {b:?}");
    }

    #[test]
    fn frame_is_orthonormal() {
        let f = TangentFrame::on_sphere(Vec3::new(0.0, 6.0, 0.0), Vec3::new(1.0, 0.3, 0.0))
            .expect("frame");
        assert!(f.right.dot(f.up).abs() < 1e-12);
        assert!(f.right.dot(f.forward).abs() < 1e-12);
        assert!(f.up.dot(f.forward).abs() < 1e-12);
        assert_vec_close(f.up, Vec3::Y);
        // Radial component of the tangent is removed.
        assert_vec_close(f.forward, Vec3::X);
    }

    #[test]
    fn orientation_maps_local_axes() {
        let f = TangentFrame::on_sphere(Vec3::new(0.0, 0.0, 2.0), Vec3::Y).expect("frame");
        let q = f.orientation();
        assert_vec_close(q.rotate(Vec3::X), f.right);
        assert_vec_close(q.rotate(Vec3::Y), f.up);
        assert_vec_close(q.rotate(Vec3::Z), f.forward);
        assert!((f.up.cross(f.forward) - f.right).length() < 1e-12);
    }

    #[test]
    fn radial_tangent_has_no_frame() {
        assert!(TangentFrame::on_sphere(Vec3::Y, Vec3::Y).is_none());
        assert!(TangentFrame::on_sphere(Vec3::ZERO, Vec3::X).is_none());
    }
}

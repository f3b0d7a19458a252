//! Unit quaternions and column-major 4x4 matrices.
//!
//! Matrices are `[[f32; 4]; 4]` indexed `m[col][row]`, the layout WGSL expects.

use super::Vec3;

pub type Mat4 = [[f32; 4]; 4];

pub const MAT4_IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Unit quaternion `[x, y, z, w]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quat {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Quat = Quat {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    pub fn from_axis_angle(axis: Vec3, angle_rad: f64) -> Self {
        let axis = axis.normalize();
        let half = angle_rad * 0.5;
        let s = half.sin();
        Self::new(axis.x * s, axis.y * s, axis.z * s, half.cos())
    }

    /// Intrinsic "XYZ" Euler rotation, i.e. the matrix `Rx * Ry * Rz`.
    pub fn from_euler_xyz(x_rad: f64, y_rad: f64, z_rad: f64) -> Self {
        let qx = Self::from_axis_angle(Vec3::X, x_rad);
        let qy = Self::from_axis_angle(Vec3::Y, y_rad);
        let qz = Self::from_axis_angle(Vec3::Z, z_rad);
        qx * qy * qz
    }

    /// Quaternion of the rotation whose matrix columns are `x_axis`, `y_axis`, `z_axis`.
    ///
    /// The axes must be orthonormal.
    pub fn from_basis(x_axis: Vec3, y_axis: Vec3, z_axis: Vec3) -> Self {
        let (m11, m12, m13) = (x_axis.x, y_axis.x, z_axis.x);
        let (m21, m22, m23) = (x_axis.y, y_axis.y, z_axis.y);
        let (m31, m32, m33) = (x_axis.z, y_axis.z, z_axis.z);
        let trace = m11 + m22 + m33;

        let q = if trace > 0.0 {
            let s = 0.5 / (trace + 1.0).sqrt();
            Self::new((m32 - m23) * s, (m13 - m31) * s, (m21 - m12) * s, 0.25 / s)
        } else if m11 > m22 && m11 > m33 {
            let s = 2.0 * (1.0 + m11 - m22 - m33).sqrt();
            Self::new(0.25 * s, (m12 + m21) / s, (m13 + m31) / s, (m32 - m23) / s)
        } else if m22 > m33 {
            let s = 2.0 * (1.0 + m22 - m11 - m33).sqrt();
            Self::new((m12 + m21) / s, 0.25 * s, (m23 + m32) / s, (m13 - m31) / s)
        } else {
            let s = 2.0 * (1.0 + m33 - m11 - m22).sqrt();
            Self::new((m13 + m31) / s, (m23 + m32) / s, 0.25 * s, (m21 - m12) / s)
        };
        q.normalize()
    }

    pub fn normalize(self) -> Self {
        let n = (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt();
        if n > 1e-10 {
            Self::new(self.x / n, self.y / n, self.z / n, self.w / n)
        } else {
            Self::IDENTITY
        }
    }

    pub fn rotate(self, v: Vec3) -> Vec3 {
        let qv = Vec3::new(self.x, self.y, self.z);
        let t = qv.cross(v).scale(2.0);
        v + t.scale(self.w) + qv.cross(t)
    }

    /// Rotation matrix for this quaternion combined with translation and scale.
    pub fn to_mat4(self, translation: Vec3, scale: Vec3) -> Mat4 {
        let x_axis = self.rotate(Vec3::X).scale(scale.x);
        let y_axis = self.rotate(Vec3::Y).scale(scale.y);
        let z_axis = self.rotate(Vec3::Z).scale(scale.z);
        [
            [x_axis.x as f32, x_axis.y as f32, x_axis.z as f32, 0.0],
            [y_axis.x as f32, y_axis.y as f32, y_axis.z as f32, 0.0],
            [z_axis.x as f32, z_axis.y as f32, z_axis.z as f32, 0.0],
            [translation.x as f32, translation.y as f32, translation.z as f32, 1.0],
        ]
    }
}

/// Quaternion multiplication: `a * b` applies `b` first.
impl std::ops::Mul for Quat {
    type Output = Self;

    fn mul(self, b: Self) -> Self::Output {
        let a = self;
        Self::new(
            a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
            a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        )
    }
}

/// Column-major matrix multiply: `a * b`.
pub fn mat4_mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut c = [[0.0f32; 4]; 4];
    for col in 0..4 {
        for row in 0..4 {
            c[col][row] = a[0][row] * b[col][0]
                + a[1][row] * b[col][1]
                + a[2][row] * b[col][2]
                + a[3][row] * b[col][3];
        }
    }
    c
}

/// Transform a point (w = 1) by a column-major matrix, with perspective divide.
pub fn mat4_transform_point(m: Mat4, p: Vec3) -> Vec3 {
    let v = [p.x as f32, p.y as f32, p.z as f32, 1.0];
    let mut out = [0.0f32; 4];
    for (row, o) in out.iter_mut().enumerate() {
        *o = m[0][row] * v[0] + m[1][row] * v[1] + m[2][row] * v[2] + m[3][row] * v[3];
    }
    let w = if out[3].abs() > f32::EPSILON { out[3] } else { 1.0 };
    Vec3::new(
        (out[0] / w) as f64,
        (out[1] / w) as f64,
        (out[2] / w) as f64,
    )
}

#[cfg(test)]
mod tests {
    use super::{MAT4_IDENTITY, Quat, mat4_mul, mat4_transform_point};
    use crate::math::Vec3;

    fn assert_vec_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-6, "expected {a:?} ~= {b:?}");
    }

    #[test]
    fn identity_leaves_vectors_alone() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_vec_close(Quat::IDENTITY.rotate(v), v);
    }

    #[test]
    fn axis_angle_quarter_turn() {
        let q = Quat::from_axis_angle(Vec3::Z, std::f64::consts::FRAC_PI_2);
        assert_vec_close(q.rotate(Vec3::X), Vec3::Y);
    }

    #[test]
    fn from_basis_reproduces_columns() {
        let q0 = Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.3), 2.1);
        let x = q0.rotate(Vec3::X);
        let y = q0.rotate(Vec3::Y);
        let z = q0.rotate(Vec3::Z);
        let q = Quat::from_basis(x, y, z);
        assert_vec_close(q.rotate(Vec3::X), x);
        assert_vec_close(q.rotate(Vec3::Y), y);
        assert_vec_close(q.rotate(Vec3::Z), z);
    }

    #[test]
    fn euler_xyz_composes_as_rx_ry_rz() {
        let q = Quat::from_euler_xyz(std::f64::consts::FRAC_PI_2, std::f64::consts::FRAC_PI_2, 0.0);
        // Ry leaves +Y alone, then Rx turns it into +Z.
        assert_vec_close(q.rotate(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn mat4_translation_applies() {
        let m = Quat::IDENTITY.to_mat4(Vec3::new(1.0, 2.0, 3.0), Vec3::splat(1.0));
        let p = mat4_transform_point(mat4_mul(MAT4_IDENTITY, m), Vec3::ZERO);
        assert_vec_close(p, Vec3::new(1.0, 2.0, 3.0));
    }
}

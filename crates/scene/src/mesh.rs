//! CPU-side geometry: indexed triangle meshes and line strips.

use std::f64::consts::PI;

use foundation::math::{QuadraticBezier3, Vec3, cumulative_distances};

/// Indexed triangle mesh, ready for upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Largest distance of any vertex from the local origin.
    pub fn bounding_radius(&self) -> f32 {
        self.positions
            .iter()
            .map(|p| (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt())
            .fold(0.0, f32::max)
    }

    fn push_vertex(&mut self, position: Vec3, normal: Vec3, uv: [f64; 2]) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position.as_f32());
        self.normals.push(normal.as_f32());
        self.uvs.push([uv[0] as f32, uv[1] as f32]);
        index
    }
}

/// Latitude/longitude sphere.
///
/// Vertex `(ix, iy)` sits at polar angle `pi * iy / height_segments` and
/// azimuth `2 pi * ix / width_segments`, with `x = -r cos(az) sin(polar)` and
/// `z = r sin(az) sin(polar)`. The UVs are `(ix / width, iy / height)`, which
/// is exactly `lat_lon_to_uv` for the projected point, so an equirectangular
/// texture lines up with `lat_lon_to_vector3`.
pub fn uv_sphere(radius: f64, width_segments: u32, height_segments: u32) -> MeshData {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);
    let mut mesh = MeshData::default();
    let mut grid: Vec<Vec<u32>> = Vec::with_capacity(height_segments as usize + 1);

    for iy in 0..=height_segments {
        let v = iy as f64 / height_segments as f64;
        // Pole rows use the centre of each quad so the texture is not skewed.
        let u_offset = if iy == 0 {
            0.5 / width_segments as f64
        } else if iy == height_segments {
            -0.5 / width_segments as f64
        } else {
            0.0
        };

        let mut row = Vec::with_capacity(width_segments as usize + 1);
        for ix in 0..=width_segments {
            let u = ix as f64 / width_segments as f64;
            let azimuth = u * 2.0 * PI;
            let polar = v * PI;
            let normal = Vec3::new(
                -azimuth.cos() * polar.sin(),
                polar.cos(),
                azimuth.sin() * polar.sin(),
            );
            row.push(mesh.push_vertex(normal.scale(radius), normal, [u + u_offset, v]));
        }
        grid.push(row);
    }

    for iy in 0..height_segments as usize {
        for ix in 0..width_segments as usize {
            let a = grid[iy][ix + 1];
            let b = grid[iy][ix];
            let c = grid[iy + 1][ix];
            let d = grid[iy + 1][ix + 1];
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments as usize - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    mesh
}

/// Thin tube swept along `curve` with parallel-transported frames.
pub fn tube(
    curve: &QuadraticBezier3,
    radius: f64,
    tubular_segments: u32,
    radial_segments: u32,
) -> MeshData {
    let tubular_segments = tubular_segments.max(1);
    let radial_segments = radial_segments.max(3);
    let mut mesh = MeshData::default();

    let samples: Vec<f64> = (0..=tubular_segments)
        .map(|i| i as f64 / tubular_segments as f64)
        .collect();
    let tangents: Vec<Vec3> = samples.iter().map(|&t| curve.tangent_at(t)).collect();
    let normals = transported_normals(&tangents);

    for (i, &t) in samples.iter().enumerate() {
        let center = curve.point_at(t);
        let n = normals[i];
        let b = tangents[i].cross(n).normalize();
        for j in 0..=radial_segments {
            let angle = j as f64 / radial_segments as f64 * 2.0 * PI;
            let dir = n.scale(-angle.cos()) + b.scale(angle.sin());
            mesh.push_vertex(
                center + dir.scale(radius),
                dir,
                [
                    i as f64 / tubular_segments as f64,
                    j as f64 / radial_segments as f64,
                ],
            );
        }
    }

    let ring = radial_segments + 1;
    for j in 1..=tubular_segments {
        for i in 1..=radial_segments {
            let a = ring * (j - 1) + (i - 1);
            let b = ring * j + (i - 1);
            let c = ring * j + i;
            let d = ring * (j - 1) + i;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    mesh
}

fn transported_normals(tangents: &[Vec3]) -> Vec<Vec3> {
    let Some(&first) = tangents.first() else {
        return Vec::new();
    };

    // Start from the world axis least aligned with the first tangent.
    let (ax, ay, az) = (first.x.abs(), first.y.abs(), first.z.abs());
    let axis = if ax <= ay && ax <= az {
        Vec3::X
    } else if ay <= az {
        Vec3::Y
    } else {
        Vec3::Z
    };
    let side = first.cross(axis).normalize();
    let mut normal = first.cross(side).normalize();

    let mut out = Vec::with_capacity(tangents.len());
    out.push(normal);
    for pair in tangents.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        if let Some(axis) = prev.cross(next).try_normalize() {
            let angle = prev.dot(next).clamp(-1.0, 1.0).acos();
            normal = foundation::math::Quat::from_axis_angle(axis, angle).rotate(normal);
        }
        out.push(normal);
    }
    out
}

/// Line strip with per-vertex distance along the line, for dashed drawing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    pub points: Vec<Vec3>,
    pub distances: Vec<f64>,
}

impl Polyline {
    pub fn from_points(points: Vec<Vec3>) -> Self {
        let distances = cumulative_distances(&points);
        Self { points, distances }
    }

    pub fn length(&self) -> f64 {
        self.distances.last().copied().unwrap_or(0.0)
    }
}

//! Low-poly cargo aircraft: an extruded top-down silhouette.

use earcutr::earcut;
use foundation::math::{Quat, Vec3};

use crate::mesh::MeshData;

/// Top-down outline of a straight-winged cargo plane, nose at +Y.
pub const AIRCRAFT_OUTLINE: [[f64; 2]; 21] = [
    [0.0, 12.0],
    [2.0, 10.0],
    [2.5, 4.0],
    [15.0, 4.0],
    [15.0, -2.0],
    [2.5, -2.0],
    [2.5, -10.0],
    [7.0, -10.0],
    [7.0, -13.0],
    [2.0, -13.0],
    [0.0, -15.0],
    [-2.0, -13.0],
    [-7.0, -13.0],
    [-7.0, -10.0],
    [-2.5, -10.0],
    [-2.5, -2.0],
    [-15.0, -2.0],
    [-15.0, 4.0],
    [-2.5, 4.0],
    [-2.5, 10.0],
    [0.0, 12.0],
];

pub const AIRCRAFT_DEPTH: f64 = 1.5;
pub const AIRCRAFT_SCALE: f64 = 0.018;

/// Builds the aircraft mesh: extruded, centred on its bounding box, scaled
/// and laid flat so the nose points along local +Z and the top faces +Y.
pub fn aircraft_mesh() -> MeshData {
    let mut outline: Vec<[f64; 2]> = AIRCRAFT_OUTLINE.to_vec();
    drop_closing_duplicate(&mut outline);
    extrude(&outline, AIRCRAFT_DEPTH)
        .map(|mesh| place(mesh, AIRCRAFT_SCALE))
        .unwrap_or_default()
}

/// Prism with `outline` as cross-section, from z = 0 to z = `depth`.
///
/// Caps and walls get their own vertices so every face is flat shaded.
fn extrude(outline: &[[f64; 2]], depth: f64) -> Option<MeshData> {
    if outline.len() < 3 {
        return None;
    }
    let coords: Vec<f64> = outline.iter().flat_map(|p| [p[0], p[1]]).collect();
    let cap = earcut(&coords, &[], 2).ok()?;
    if cap.is_empty() {
        return None;
    }

    let mut mesh = MeshData::default();
    let n = outline.len() as u32;

    for (z, normal) in [(0.0, Vec3::new(0.0, 0.0, -1.0)), (depth, Vec3::Z)] {
        let base = mesh.positions.len() as u32;
        for p in outline {
            mesh.positions.push(Vec3::new(p[0], p[1], z).as_f32());
            mesh.normals.push(normal.as_f32());
            mesh.uvs.push([p[0] as f32, p[1] as f32]);
        }
        for tri in cap.chunks_exact(3) {
            let [a, b, c] = [tri[0] as u32, tri[1] as u32, tri[2] as u32];
            // Winding faces each cap outwards.
            let front_facing = triangle_area(outline, a, b, c) > 0.0;
            if front_facing == (z > 0.0) {
                mesh.indices.extend_from_slice(&[base + a, base + b, base + c]);
            } else {
                mesh.indices.extend_from_slice(&[base + a, base + c, base + b]);
            }
        }
    }

    let ccw = signed_area(outline) > 0.0;
    for i in 0..n {
        let p = outline[i as usize];
        let q = outline[((i + 1) % n) as usize];
        let (dx, dy) = (q[0] - p[0], q[1] - p[1]);
        let outward = if ccw { Vec3::new(dy, -dx, 0.0) } else { Vec3::new(-dy, dx, 0.0) };
        let normal = outward.normalize();

        let base = mesh.positions.len() as u32;
        for (xy, z) in [(p, 0.0), (q, 0.0), (q, depth), (p, depth)] {
            mesh.positions.push(Vec3::new(xy[0], xy[1], z).as_f32());
            mesh.normals.push(normal.as_f32());
            mesh.uvs.push([xy[0] as f32, z as f32]);
        }
        if ccw {
            mesh.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        } else {
            mesh.indices
                .extend_from_slice(&[base, base + 2, base + 1, base, base + 3, base + 2]);
        }
    }

    Some(mesh)
}

/// Centres the mesh on its bounding box, scales it uniformly, then turns it
/// a quarter turn about +X (local +Y becomes +Z).
fn place(mut mesh: MeshData, scale: f64) -> MeshData {
    let mut min = [f32::INFINITY; 3];
    let mut max = [f32::NEG_INFINITY; 3];
    for p in &mesh.positions {
        for k in 0..3 {
            min[k] = min[k].min(p[k]);
            max[k] = max[k].max(p[k]);
        }
    }
    let center = Vec3::new(
        ((min[0] + max[0]) * 0.5) as f64,
        ((min[1] + max[1]) * 0.5) as f64,
        ((min[2] + max[2]) * 0.5) as f64,
    );
    let lay_flat = Quat::from_axis_angle(Vec3::X, std::f64::consts::FRAC_PI_2);

    for p in &mut mesh.positions {
        let v = Vec3::new(p[0] as f64, p[1] as f64, p[2] as f64) - center;
        *p = lay_flat.rotate(v.scale(scale)).as_f32();
    }
    for n in &mut mesh.normals {
        let v = Vec3::new(n[0] as f64, n[1] as f64, n[2] as f64);
        *n = lay_flat.rotate(v).as_f32();
    }
    mesh
}

fn drop_closing_duplicate(points: &mut Vec<[f64; 2]>) {
    if points.len() >= 2 && points.first() == points.last() {
        points.pop();
    }
}

fn signed_area(points: &[[f64; 2]]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let p = points[i];
            let q = points[(i + 1) % n];
            p[0] * q[1] - q[0] * p[1]
        })
        .sum::<f64>()
        * 0.5
}

fn triangle_area(points: &[[f64; 2]], a: u32, b: u32, c: u32) -> f64 {
    signed_area(&[points[a as usize], points[b as usize], points[c as usize]])
}

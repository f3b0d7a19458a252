use super::Vec3;

/// Project a latitude/longitude pair (degrees) onto a sphere of `radius`.
///
/// Longitude is offset by 180° and X is mirrored so that the result lines up
/// with an equirectangular texture on the globe mesh:
/// `u = (lon + 180) / 360`, `v = (90 - lat) / 180`.
pub fn lat_lon_to_vector3(lat_deg: f64, lon_deg: f64, radius: f64) -> Vec3 {
    let phi = (90.0 - lat_deg).to_radians();
    let theta = (lon_deg + 180.0).to_radians();

    let x = -(radius * phi.sin() * theta.cos());
    let z = radius * phi.sin() * theta.sin();
    let y = radius * phi.cos();
    Vec3::new(x, y, z)
}

/// Texture coordinates of a latitude/longitude pair on the globe texture.
pub fn lat_lon_to_uv(lat_deg: f64, lon_deg: f64) -> [f64; 2] {
    [(lon_deg + 180.0) / 360.0, (90.0 - lat_deg) / 180.0]
}

#[cfg(test)]
mod tests {
    use super::{lat_lon_to_uv, lat_lon_to_vector3};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn norm_equals_radius_over_grid() {
        for lat in (-90..=90).step_by(15) {
            for lon in (-180..=180).step_by(20) {
                let p = lat_lon_to_vector3(lat as f64, lon as f64, 6.0);
                assert_close(p.length(), 6.0, 1e-9);
            }
        }
    }

    #[test]
    fn poles_map_to_y_axis() {
        let north = lat_lon_to_vector3(90.0, 12.0, 2.0);
        assert_close(north.y, 2.0, 1e-12);
        let south = lat_lon_to_vector3(-90.0, -40.0, 2.0);
        assert_close(south.y, -2.0, 1e-12);
    }

    #[test]
    fn prime_meridian_faces_positive_x() {
        // theta = 180° => x = -r * cos(180°) = r.
        let p = lat_lon_to_vector3(0.0, 0.0, 1.0);
        assert_close(p.x, 1.0, 1e-12);
        assert_close(p.y, 0.0, 1e-12);
        assert_close(p.z, 0.0, 1e-12);
    }

    #[test]
    fn uv_wraps_longitude_from_antimeridian() {
        assert_eq!(lat_lon_to_uv(90.0, -180.0), [0.0, 0.0]);
        assert_eq!(lat_lon_to_uv(0.0, 0.0), [0.5, 0.5]);
    }
}

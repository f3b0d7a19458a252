use foundation::math::{Mat4, Vec2, Vec3};
use scene::picking::Ray;

pub const HERO_FOV_Y_DEG: f64 = 45.0;
pub const HERO_NEAR: f64 = 0.1;
pub const HERO_FAR: f64 = 1000.0;
pub const HERO_DISTANCE: f64 = 16.5;
pub const MIN_DISTANCE: f64 = 10.0;
pub const MAX_DISTANCE: f64 = 25.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera3D {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_rad: f64,
    pub near: f64,
    pub far: f64,
    pub aspect: f64,
}

impl Camera3D {
    pub fn look_at(position: Vec3, target: Vec3, fov_y_rad: f64, near: f64, far: f64) -> Self {
        Self {
            position,
            target,
            up: Vec3::Y,
            fov_y_rad,
            near,
            far,
            aspect: 1.0,
        }
    }

    /// The hero camera: on +Z at the default distance, looking at the globe centre.
    pub fn hero(aspect: f64) -> Self {
        let mut camera = Self::look_at(
            Vec3::new(0.0, 0.0, HERO_DISTANCE),
            Vec3::ZERO,
            HERO_FOV_Y_DEG.to_radians(),
            HERO_NEAR,
            HERO_FAR,
        );
        camera.aspect = aspect;
        camera
    }

    /// Updates the aspect ratio from a viewport size; zero sizes are ignored.
    pub fn set_aspect(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn distance(&self) -> f64 {
        self.position.z
    }

    /// Moves the camera along Z by `delta`, keeping it within
    /// `[MIN_DISTANCE, MAX_DISTANCE]`.
    pub fn zoom_by(&mut self, delta: f64) {
        if !delta.is_finite() {
            return;
        }
        self.position.z = (self.position.z + delta).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = (self.target - self.position).try_normalize().unwrap_or(-Vec3::Z);
        let side = forward.cross(self.up).try_normalize().unwrap_or(Vec3::X);
        let up = side.cross(forward);
        (side, up, forward)
    }

    /// Right-handed view matrix (camera looks down its local -Z).
    pub fn view(&self) -> Mat4 {
        let (s, u, f) = self.basis();
        let eye = self.position;
        [
            [s.x as f32, u.x as f32, -f.x as f32, 0.0],
            [s.y as f32, u.y as f32, -f.y as f32, 0.0],
            [s.z as f32, u.z as f32, -f.z as f32, 0.0],
            [
                -s.dot(eye) as f32,
                -u.dot(eye) as f32,
                f.dot(eye) as f32,
                1.0,
            ],
        ]
    }

    /// Perspective projection with depth mapped to `[0, 1]`.
    pub fn projection(&self) -> Mat4 {
        let f = 1.0 / (self.fov_y_rad * 0.5).tan();
        let nf = 1.0 / (self.near - self.far);
        [
            [(f / self.aspect) as f32, 0.0, 0.0, 0.0],
            [0.0, f as f32, 0.0, 0.0],
            [0.0, 0.0, (self.far * nf) as f32, -1.0],
            [0.0, 0.0, (self.near * self.far * nf) as f32, 0.0],
        ]
    }

    pub fn view_proj(&self) -> Mat4 {
        foundation::math::mat4_mul(self.projection(), self.view())
    }

    /// Camera right and up vectors in world space, for camera-facing quads.
    pub fn billboard_axes(&self) -> (Vec3, Vec3) {
        let (s, u, _) = self.basis();
        (s, u)
    }

    /// World-space ray through a point in normalized device coordinates
    /// (`x` right, `y` up, both in `[-1, 1]`).
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let (s, u, f) = self.basis();
        let half = (self.fov_y_rad * 0.5).tan();
        let dir = f + s.scale(ndc.x * half * self.aspect) + u.scale(ndc.y * half);
        Ray::new(self.position, dir.normalize())
    }
}

/// Client-space rectangle of the element receiving pointer events.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Converts a client-space pointer position to normalized device coordinates
/// relative to `rect`. Returns `None` for an empty rectangle.
pub fn ndc_from_client(client: Vec2, rect: ClientRect) -> Option<Vec2> {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        (client.x - rect.left) / rect.width * 2.0 - 1.0,
        -((client.y - rect.top) / rect.height) * 2.0 + 1.0,
    ))
}

#[cfg(test)]
mod tests {
    use super::{Camera3D, ClientRect, MAX_DISTANCE, MIN_DISTANCE, ndc_from_client};
    use foundation::math::{Vec2, Vec3, mat4_transform_point};

    #[test]
    fn hero_camera_defaults() {
        let cam = Camera3D::hero(2.0);
        assert_eq!(cam.distance(), 16.5);
        assert!((cam.fov_y_rad.to_degrees() - 45.0).abs() < 1e-12);
        assert_eq!((cam.near, cam.far), (0.1, 1000.0));
    }

    #[test]
    fn centre_ray_points_at_globe() {
        let cam = Camera3D::hero(1.5);
        let ray = cam.ray_from_ndc(Vec2::new(0.0, 0.0));
        assert_eq!(ray.origin, Vec3::new(0.0, 0.0, 16.5));
        assert!((ray.dir - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-12);
    }

    #[test]
    fn ray_reprojects_to_same_ndc() {
        let cam = Camera3D::hero(16.0 / 9.0);
        let ndc = Vec2::new(0.4, -0.7);
        let ray = cam.ray_from_ndc(ndc);
        let p = ray.origin + ray.dir.scale(12.0);
        let clip = mat4_transform_point(cam.view_proj(), p);
        assert!((clip.x - ndc.x).abs() < 1e-4);
        assert!((clip.y - ndc.y).abs() < 1e-4);
        assert!(clip.z > 0.0 && clip.z < 1.0);
    }

    #[test]
    fn hero_billboard_axes_are_screen_aligned() {
        let (right, up) = Camera3D::hero(1.0).billboard_axes();
        assert!((right - Vec3::X).length() < 1e-12);
        assert!((up - Vec3::Y).length() < 1e-12);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = Camera3D::hero(1.0);
        cam.zoom_by(100.0 * 0.005 * 1.2);
        assert!((cam.distance() - 17.1).abs() < 1e-12);
        cam.zoom_by(1000.0);
        assert_eq!(cam.distance(), MAX_DISTANCE);
        cam.zoom_by(-1000.0);
        assert_eq!(cam.distance(), MIN_DISTANCE);
    }

    #[test]
    fn set_aspect_ignores_empty_viewports() {
        let mut cam = Camera3D::hero(1.0);
        cam.set_aspect(0.0, 300.0);
        assert_eq!(cam.aspect, 1.0);
        cam.set_aspect(800.0, 400.0);
        assert_eq!(cam.aspect, 2.0);
    }

    #[test]
    fn ndc_corners() {
        let rect = ClientRect {
            left: 100.0,
            top: 50.0,
            width: 400.0,
            height: 200.0,
        };
        assert_eq!(ndc_from_client(Vec2::new(100.0, 50.0), rect), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(ndc_from_client(Vec2::new(500.0, 250.0), rect), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(ndc_from_client(Vec2::new(300.0, 150.0), rect), Some(Vec2::new(0.0, 0.0)));
        let empty = ClientRect { width: 0.0, ..rect };
        assert_eq!(ndc_from_client(Vec2::new(0.0, 0.0), empty), None);
    }
}

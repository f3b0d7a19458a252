/// Pitch/yaw of the globe before any input (radians).
pub const INITIAL_ROTATION: (f64, f64) = (0.5, 6.11);
/// Fraction of the remaining distance closed per 60 Hz frame.
pub const ROTATION_DAMPING: f64 = 0.05;
/// Yaw added to the target per 60 Hz frame while nobody is dragging.
pub const AUTO_ROTATE_PER_FRAME: f64 = 0.001;

/// Current and target globe rotation; the current value chases the target.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RotationState {
    pub current_x: f64,
    pub current_y: f64,
    pub target_x: f64,
    pub target_y: f64,
}

impl Default for RotationState {
    fn default() -> Self {
        Self::at(INITIAL_ROTATION.0, INITIAL_ROTATION.1)
    }
}

impl RotationState {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            current_x: x,
            current_y: y,
            target_x: x,
            target_y: y,
        }
    }

    /// Adds a pointer delta (pixels) to the target: horizontal to yaw,
    /// vertical to pitch.
    pub fn drag(&mut self, dx_px: f64, dy_px: f64, sensitivity: f64) {
        self.target_y += dx_px * sensitivity;
        self.target_x += dy_px * sensitivity;
    }

    pub fn auto_rotate(&mut self, frames: f64) {
        self.target_y += AUTO_ROTATE_PER_FRAME * frames;
    }

    /// Moves the current rotation towards the target as `frames` 60 Hz
    /// frames of damping would. The step is a fraction in `[0, 1]` of the
    /// remaining distance, so it never overshoots.
    pub fn damp(&mut self, frames: f64) {
        let f = damping_fraction(frames);
        self.current_x += (self.target_x - self.current_x) * f;
        self.current_y += (self.target_y - self.current_y) * f;
    }
}

/// `1 - (1 - ROTATION_DAMPING)^frames`; exactly `ROTATION_DAMPING` for one frame.
pub fn damping_fraction(frames: f64) -> f64 {
    if frames <= 0.0 {
        return 0.0;
    }
    (1.0 - (1.0 - ROTATION_DAMPING).powf(frames)).clamp(0.0, 1.0)
}

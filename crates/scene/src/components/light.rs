use foundation::math::{Rgb, Vec3};

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Light {
    Ambient {
        color: Rgb,
        intensity: f32,
    },
    /// Light shining from `position` towards the origin.
    Directional {
        color: Rgb,
        intensity: f32,
        position: Vec3,
    },
}

impl Light {
    pub fn ambient(color: Rgb, intensity: f32) -> Self {
        Light::Ambient { color, intensity }
    }

    pub fn directional(color: Rgb, intensity: f32, position: Vec3) -> Self {
        Light::Directional {
            color,
            intensity,
            position,
        }
    }

    /// Unit vector from the origin towards the light, for directional lights.
    pub fn direction(&self) -> Option<Vec3> {
        match self {
            Light::Ambient { .. } => None,
            Light::Directional { position, .. } => position.try_normalize(),
        }
    }
}

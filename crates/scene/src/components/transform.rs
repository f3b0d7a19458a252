use foundation::math::{Mat4, Quat, Vec3};

use crate::entity::EntityId;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::splat(1.0),
        }
    }

    pub fn translate(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Maps a point from this transform's local space into its parent space.
    pub fn apply(&self, local: Vec3) -> Vec3 {
        let scaled = Vec3::new(
            local.x * self.scale.x,
            local.y * self.scale.y,
            local.z * self.scale.z,
        );
        self.rotation.rotate(scaled) + self.position
    }

    pub fn matrix(&self) -> Mat4 {
        self.rotation.to_mat4(self.position, self.scale)
    }
}

/// Scene-graph link: the entity's transform is relative to `0`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Parent(pub EntityId);

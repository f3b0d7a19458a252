use super::Material;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MeshId(pub u32);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PolylineId(pub u32);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LabelId(pub u32);

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shape3D {
    Mesh(MeshId),
    Polyline(PolylineId),
    /// Camera-facing quad of `size` world units, textured with a label raster.
    Sprite { label: LabelId, size: [f32; 2] },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Drawable3D {
    pub shape: Shape3D,
    pub material: Material,
}

impl Drawable3D {
    pub fn mesh(mesh: MeshId, material: Material) -> Self {
        Self {
            shape: Shape3D::Mesh(mesh),
            material,
        }
    }

    pub fn polyline(line: PolylineId, material: Material) -> Self {
        Self {
            shape: Shape3D::Polyline(line),
            material,
        }
    }

    pub fn sprite(label: LabelId, size: [f32; 2]) -> Self {
        Self {
            shape: Shape3D::Sprite { label, size },
            material: Material::sprite(label.0 as usize),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Visibility {
    pub visible: bool,
}

impl Visibility {
    pub fn visible() -> Self {
        Self { visible: true }
    }

    pub fn hidden() -> Self {
        Self { visible: false }
    }
}

#[cfg(test)]
mod tests {
    use super::{Drawable3D, LabelId, Shape3D};
    use crate::components::TextureSlot;

    #[test]
    fn sprite_drawable_binds_label_texture() {
        let drawable = Drawable3D::sprite(LabelId(2), [2.0, 0.5]);
        assert!(matches!(drawable.shape, Shape3D::Sprite { label: LabelId(2), .. }));
        assert_eq!(drawable.material.texture, TextureSlot::Label(2));
    }
}

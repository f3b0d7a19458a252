use foundation::math::Rgb;

/// How a surface is shaded.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shading {
    /// Lit by the scene lights (ambient + directional, Phong specular).
    Phong { specular: Rgb, shininess: f32, flat: bool },
    /// Constant colour, no lighting.
    Unlit,
    /// Dashed line; lengths are in world units along the polyline.
    Dashed { dash: f32, gap: f32 },
    /// Camera-facing textured quad.
    Sprite,
}

/// Which texture a material samples, if any.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextureSlot {
    None,
    Globe,
    Label(usize),
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    pub shading: Shading,
    pub color: Rgb,
    pub opacity: f32,
    pub emissive: Rgb,
    pub emissive_intensity: f32,
    pub texture: TextureSlot,
    pub double_sided: bool,
    pub depth_test: bool,
}

impl Material {
    pub fn unlit(color: Rgb) -> Self {
        Self {
            shading: Shading::Unlit,
            color,
            opacity: 1.0,
            emissive: Rgb::BLACK,
            emissive_intensity: 0.0,
            texture: TextureSlot::None,
            double_sided: false,
            depth_test: true,
        }
    }

    pub fn phong(color: Rgb, specular: Rgb, shininess: f32) -> Self {
        Self {
            shading: Shading::Phong {
                specular,
                shininess,
                flat: false,
            },
            ..Self::unlit(color)
        }
    }

    pub fn dashed(color: Rgb, dash: f32, gap: f32, opacity: f32) -> Self {
        Self {
            shading: Shading::Dashed { dash, gap },
            opacity,
            ..Self::unlit(color)
        }
    }

    pub fn sprite(label: usize) -> Self {
        Self {
            shading: Shading::Sprite,
            texture: TextureSlot::Label(label),
            ..Self::unlit(Rgb::WHITE)
        }
    }

    pub fn with_emissive(mut self, emissive: Rgb, intensity: f32) -> Self {
        self.emissive = emissive;
        self.emissive_intensity = intensity;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_flat_shading(mut self) -> Self {
        if let Shading::Phong { flat, .. } = &mut self.shading {
            *flat = true;
        }
        self
    }

    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0 || matches!(self.shading, Shading::Sprite)
    }
}

#[cfg(test)]
mod tests {
    use super::{Material, Shading, TextureSlot};
    use foundation::math::Rgb;

    #[test]
    fn builders_compose() {
        let m = Material::phong(Rgb::WHITE, Rgb::BLACK, 0.0)
            .with_emissive(Rgb::from_hex(0x2DBE60), 0.5)
            .with_flat_shading()
            .double_sided();
        assert!(matches!(m.shading, Shading::Phong { flat: true, .. }));
        assert!(m.double_sided);
        assert_eq!(m.emissive_intensity, 0.5);
        assert!(!m.is_transparent());
    }

    #[test]
    fn sprites_sample_their_label() {
        let m = Material::sprite(3);
        assert_eq!(m.texture, TextureSlot::Label(3));
        assert!(m.is_transparent());
    }
}

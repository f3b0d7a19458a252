//! CPU-side layouts of the GPU vertex and uniform data.

use bytemuck::{Pod, Zeroable};
use gpu::camera::Camera3D;
use gpu::renderer::{RenderCommand, RenderFrame};
use scene::components::{Light, Shading, TextureSlot};
use scene::mesh::{MeshData, Polyline};

pub const MAX_DIRECTIONAL_LIGHTS: usize = 2;

pub const MODE_PHONG: f32 = 0.0;
pub const MODE_UNLIT: f32 = 1.0;
pub const MODE_DASHED: f32 = 2.0;
pub const MODE_SPRITE: f32 = 3.0;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    /// Distance along the line from its first point.
    pub distance: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Globals {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    pub camera_right: [f32; 4],
    pub camera_up: [f32; 4],
    pub ambient: [f32; 4],
    /// Unit vectors towards each light; unused slots are zero.
    pub light_dirs: [[f32; 4]; MAX_DIRECTIONAL_LIGHTS],
    pub light_colors: [[f32; 4]; MAX_DIRECTIONAL_LIGHTS],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct DrawUniforms {
    pub model: [[f32; 4]; 4],
    /// Linear rgb, opacity.
    pub color: [f32; 4],
    pub emissive: [f32; 4],
    /// Linear rgb, shininess.
    pub specular: [f32; 4],
    /// mode, flat, textured, unused.
    pub params: [f32; 4],
    /// dash, gap, sprite width, sprite height.
    pub extra: [f32; 4],
}

pub fn mesh_vertices(mesh: &MeshData) -> Vec<MeshVertex> {
    mesh.positions
        .iter()
        .enumerate()
        .map(|(i, &position)| MeshVertex {
            position,
            normal: mesh.normals.get(i).copied().unwrap_or([0.0, 0.0, 1.0]),
            uv: mesh.uvs.get(i).copied().unwrap_or([0.0, 0.0]),
        })
        .collect()
}

pub fn line_vertices(line: &Polyline) -> Vec<LineVertex> {
    line.points
        .iter()
        .zip(&line.distances)
        .map(|(p, &d)| LineVertex {
            position: p.as_f32(),
            distance: d as f32,
        })
        .collect()
}

fn vec4(v: [f32; 3], w: f32) -> [f32; 4] {
    [v[0], v[1], v[2], w]
}

pub fn globals(frame: &RenderFrame, camera: &Camera3D) -> Globals {
    let (right, up) = camera.billboard_axes();
    let mut ambient = [0.0f32; 3];
    let mut light_dirs = [[0.0f32; 4]; MAX_DIRECTIONAL_LIGHTS];
    let mut light_colors = [[0.0f32; 4]; MAX_DIRECTIONAL_LIGHTS];
    let mut slot = 0;

    for light in &frame.lights {
        match *light {
            Light::Ambient { color, intensity } => {
                let c = color.to_linear();
                for k in 0..3 {
                    ambient[k] += c[k] * intensity;
                }
            }
            Light::Directional {
                color, intensity, ..
            } => {
                if slot >= MAX_DIRECTIONAL_LIGHTS {
                    continue;
                }
                let Some(dir) = light.direction() else {
                    continue;
                };
                light_dirs[slot] = vec4(dir.as_f32(), 0.0);
                light_colors[slot] = vec4(color.scaled(intensity).to_linear(), 0.0);
                slot += 1;
            }
        }
    }

    Globals {
        view_proj: frame.view_proj,
        camera_pos: vec4(frame.camera_position.as_f32(), 1.0),
        camera_right: vec4(right.as_f32(), 0.0),
        camera_up: vec4(up.as_f32(), 0.0),
        ambient: vec4(ambient, 0.0),
        light_dirs,
        light_colors,
    }
}

pub fn draw_uniforms(command: &RenderCommand) -> DrawUniforms {
    let m = &command.material;
    let textured = if m.texture == TextureSlot::None { 0.0 } else { 1.0 };
    let (mode, flat, specular, dash_gap) = match m.shading {
        Shading::Phong {
            specular,
            shininess,
            flat,
        } => (
            MODE_PHONG,
            if flat { 1.0 } else { 0.0 },
            vec4(specular.to_linear(), shininess),
            [0.0, 0.0],
        ),
        Shading::Unlit => (MODE_UNLIT, 0.0, [0.0; 4], [0.0, 0.0]),
        Shading::Dashed { dash, gap } => (MODE_DASHED, 0.0, [0.0; 4], [dash, gap]),
        Shading::Sprite => (MODE_SPRITE, 0.0, [0.0; 4], [0.0, 0.0]),
    };
    let size = match command.shape {
        scene::components::Shape3D::Sprite { size, .. } => size,
        _ => [0.0, 0.0],
    };

    DrawUniforms {
        model: command.model,
        color: vec4(m.color.to_linear(), m.opacity),
        emissive: vec4(m.emissive.scaled(m.emissive_intensity).to_linear(), 0.0),
        specular,
        params: [mode, flat, textured, 0.0],
        extra: [dash_gap[0], dash_gap[1], size[0], size[1]],
    }
}

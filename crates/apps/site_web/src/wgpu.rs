#[cfg(target_arch = "wasm32")]
mod imp {
    use ::wgpu::util::DeviceExt;
    use gpu::camera::Camera3D;
    use gpu::renderer::{RenderCommand, RenderFrame};
    use scene::components::{Shape3D, TextureSlot};
    use scene::prefabs::TextureImage;
    use scene::world::World;
    use std::borrow::Cow;
    use wasm_bindgen::prelude::*;

    use crate::uniforms::{
        DrawUniforms, Globals, LineVertex, MeshVertex, draw_uniforms, globals, line_vertices,
        mesh_vertices,
    };

    #[derive(Debug)]
    struct GpuMesh {
        vertex_buffer: ::wgpu::Buffer,
        index_buffer: ::wgpu::Buffer,
        index_count: u32,
    }

    #[derive(Debug)]
    struct GpuLine {
        vertex_buffer: ::wgpu::Buffer,
        vertex_count: u32,
    }

    /// Uniform buffer and bind group for one draw call of a frame.
    #[derive(Debug)]
    struct DrawSlot {
        buffer: ::wgpu::Buffer,
        bind_group: ::wgpu::BindGroup,
    }

    #[derive(Debug)]
    pub struct WgpuContext {
        pub _instance: &'static ::wgpu::Instance,
        pub surface: ::wgpu::Surface<'static>,
        pub device: ::wgpu::Device,
        pub queue: ::wgpu::Queue,
        pub config: ::wgpu::SurfaceConfiguration,
        pub _canvas: web_sys::HtmlCanvasElement,
        mesh_opaque_pipeline: ::wgpu::RenderPipeline,
        mesh_blend_pipeline: ::wgpu::RenderPipeline,
        line_pipeline: ::wgpu::RenderPipeline,
        sprite_pipeline: ::wgpu::RenderPipeline,
        globals_buffer: ::wgpu::Buffer,
        globals_bind_group: ::wgpu::BindGroup,
        draw_layout: ::wgpu::BindGroupLayout,
        draw_slots: Vec<DrawSlot>,
        texture_layout: ::wgpu::BindGroupLayout,
        sampler: ::wgpu::Sampler,
        blank_texture: ::wgpu::BindGroup,
        globe_texture: Option<::wgpu::BindGroup>,
        label_textures: Vec<::wgpu::BindGroup>,
        meshes: Vec<GpuMesh>,
        lines: Vec<GpuLine>,
        pub depth_view: ::wgpu::TextureView,
    }

    const GLOBE_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
    camera_right: vec4<f32>,
    camera_up: vec4<f32>,
    ambient: vec4<f32>,
    light_dirs: array<vec4<f32>, 2>,
    light_colors: array<vec4<f32>, 2>,
};

struct Draw {
    model: mat4x4<f32>,
    color: vec4<f32>,
    emissive: vec4<f32>,
    specular: vec4<f32>,
    // mode (0 phong, 1 unlit, 2 dashed, 3 sprite), flat, textured, unused
    params: vec4<f32>,
    // dash, gap, sprite width, sprite height
    extra: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

@group(1) @binding(0)
var<uniform> draw: Draw;

@group(2) @binding(0)
var base_tex: texture_2d<f32>;
@group(2) @binding(1)
var base_sampler: sampler;

fn premultiply(rgb: vec3<f32>, a: f32) -> vec4<f32> {
    return vec4<f32>(rgb * a, a);
}

struct MeshOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_mesh(
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
) -> MeshOut {
    let world = draw.model * vec4<f32>(position, 1.0);
    var out: MeshOut;
    out.pos = globals.view_proj * world;
    out.world_pos = world.xyz;
    out.normal = (draw.model * vec4<f32>(normal, 0.0)).xyz;
    out.uv = uv;
    return out;
}

@fragment
fn fs_mesh(in: MeshOut) -> @location(0) vec4<f32> {
    let texel = textureSample(base_tex, base_sampler, in.uv);
    let face_normal = normalize(cross(dpdx(in.world_pos), dpdy(in.world_pos)));

    var base = draw.color.rgb;
    if draw.params.z > 0.5 {
        base = base * texel.rgb;
    }
    if draw.params.x > 0.5 {
        return premultiply(base + draw.emissive.rgb, draw.color.a);
    }

    let view_dir = normalize(globals.camera_pos.xyz - in.world_pos);
    var n = normalize(in.normal);
    if draw.params.y > 0.5 {
        n = face_normal;
    }
    if dot(n, view_dir) < 0.0 {
        n = -n;
    }

    var rgb = globals.ambient.rgb * base;
    for (var i = 0u; i < 2u; i = i + 1u) {
        let l = globals.light_dirs[i].xyz;
        let diffuse = max(dot(n, l), 0.0);
        var spec = 0.0;
        if diffuse > 0.0 {
            spec = pow(max(dot(n, normalize(l + view_dir)), 0.0), max(draw.specular.w, 1.0));
        }
        rgb = rgb + globals.light_colors[i].rgb * (base * diffuse + draw.specular.rgb * spec);
    }
    return premultiply(rgb + draw.emissive.rgb, draw.color.a);
}

struct LineOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) distance: f32,
};

@vertex
fn vs_line(@location(0) position: vec3<f32>, @location(1) distance: f32) -> LineOut {
    var out: LineOut;
    out.pos = globals.view_proj * draw.model * vec4<f32>(position, 1.0);
    out.distance = distance;
    return out;
}

@fragment
fn fs_line(in: LineOut) -> @location(0) vec4<f32> {
    let period = draw.extra.x + draw.extra.y;
    if period > 0.0 && (in.distance % period) > draw.extra.x {
        discard;
    }
    return premultiply(draw.color.rgb, draw.color.a);
}

struct SpriteOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_sprite(@builtin(vertex_index) vid: u32) -> SpriteOut {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-0.5, -0.5),
        vec2<f32>(0.5, -0.5),
        vec2<f32>(0.5, 0.5),
        vec2<f32>(-0.5, -0.5),
        vec2<f32>(0.5, 0.5),
        vec2<f32>(-0.5, 0.5),
    );
    let c = corners[vid];
    let center = (draw.model * vec4<f32>(0.0, 0.0, 0.0, 1.0)).xyz;
    let world = center
        + globals.camera_right.xyz * (c.x * draw.extra.z)
        + globals.camera_up.xyz * (c.y * draw.extra.w);
    var out: SpriteOut;
    out.pos = globals.view_proj * vec4<f32>(world, 1.0);
    out.uv = vec2<f32>(c.x + 0.5, 0.5 - c.y);
    return out;
}

@fragment
fn fs_sprite(in: SpriteOut) -> @location(0) vec4<f32> {
    let texel = textureSample(base_tex, base_sampler, in.uv);
    return premultiply(texel.rgb * draw.color.rgb, texel.a * draw.color.a);
}
"#;

    fn create_depth_view(
        device: &::wgpu::Device,
        config: &::wgpu::SurfaceConfiguration,
    ) -> ::wgpu::TextureView {
        let tex = device.create_texture(&::wgpu::TextureDescriptor {
            label: Some("hero-depth"),
            size: ::wgpu::Extent3d {
                width: config.width.max(1),
                height: config.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: ::wgpu::TextureDimension::D2,
            format: ::wgpu::TextureFormat::Depth24Plus,
            usage: ::wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        tex.create_view(&::wgpu::TextureViewDescriptor::default())
    }

    fn uniform_layout_entry(binding: u32) -> ::wgpu::BindGroupLayoutEntry {
        ::wgpu::BindGroupLayoutEntry {
            binding,
            visibility: ::wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: ::wgpu::BindingType::Buffer {
                ty: ::wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }
    }

    struct PipelineSpec<'a> {
        label: &'a str,
        vs: &'a str,
        fs: &'a str,
        buffers: &'a [::wgpu::VertexBufferLayout<'a>],
        topology: ::wgpu::PrimitiveTopology,
        blend: ::wgpu::BlendState,
        depth_write: bool,
    }

    fn create_pipeline(
        device: &::wgpu::Device,
        layout: &::wgpu::PipelineLayout,
        shader: &::wgpu::ShaderModule,
        format: ::wgpu::TextureFormat,
        spec: PipelineSpec<'_>,
    ) -> ::wgpu::RenderPipeline {
        device.create_render_pipeline(&::wgpu::RenderPipelineDescriptor {
            label: Some(spec.label),
            layout: Some(layout),
            vertex: ::wgpu::VertexState {
                module: shader,
                entry_point: Some(spec.vs),
                compilation_options: Default::default(),
                buffers: spec.buffers,
            },
            fragment: Some(::wgpu::FragmentState {
                module: shader,
                entry_point: Some(spec.fs),
                compilation_options: Default::default(),
                targets: &[Some(::wgpu::ColorTargetState {
                    format,
                    blend: Some(spec.blend),
                    write_mask: ::wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: ::wgpu::PrimitiveState {
                topology: spec.topology,
                strip_index_format: None,
                front_face: ::wgpu::FrontFace::Ccw,
                // Aircraft are double sided and the globe is only seen from
                // outside, so nothing is culled.
                cull_mode: None,
                polygon_mode: ::wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(::wgpu::DepthStencilState {
                format: ::wgpu::TextureFormat::Depth24Plus,
                depth_write_enabled: spec.depth_write,
                depth_compare: ::wgpu::CompareFunction::LessEqual,
                stencil: ::wgpu::StencilState::default(),
                bias: ::wgpu::DepthBiasState::default(),
            }),
            multisample: ::wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    }

    fn create_texture_bind_group(
        device: &::wgpu::Device,
        queue: &::wgpu::Queue,
        layout: &::wgpu::BindGroupLayout,
        sampler: &::wgpu::Sampler,
        image: &TextureImage,
        label: &str,
    ) -> Result<::wgpu::BindGroup, JsValue> {
        let expected = image.width as usize * image.height as usize * 4;
        if image.width == 0 || image.height == 0 || image.rgba.len() != expected {
            return Err(JsValue::from_str(&format!(
                "{label}: {}x{} image with {} bytes",
                image.width,
                image.height,
                image.rgba.len()
            )));
        }
        let max = device.limits().max_texture_dimension_2d;
        if image.width > max || image.height > max {
            return Err(JsValue::from_str(&format!(
                "{label}: {}x{} exceeds the {max}px texture limit",
                image.width, image.height
            )));
        }

        let size = ::wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&::wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: ::wgpu::TextureDimension::D2,
            format: ::wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: ::wgpu::TextureUsages::TEXTURE_BINDING | ::wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            ::wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: ::wgpu::Origin3d::ZERO,
                aspect: ::wgpu::TextureAspect::All,
            },
            &image.rgba,
            ::wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            size,
        );
        let view = texture.create_view(&::wgpu::TextureViewDescriptor::default());
        Ok(device.create_bind_group(&::wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                ::wgpu::BindGroupEntry {
                    binding: 0,
                    resource: ::wgpu::BindingResource::TextureView(&view),
                },
                ::wgpu::BindGroupEntry {
                    binding: 1,
                    resource: ::wgpu::BindingResource::Sampler(sampler),
                },
            ],
        }))
    }

    pub async fn init_wgpu_from_canvas(
        canvas: &web_sys::HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<WgpuContext, JsValue> {
        // `wgpu::Surface` must not outlive its `wgpu::Instance`, so the
        // instance lives for the rest of the page.
        let instance: &'static ::wgpu::Instance = Box::leak(Box::new(::wgpu::Instance::new(
            &::wgpu::InstanceDescriptor {
                backends: ::wgpu::Backends::BROWSER_WEBGPU | ::wgpu::Backends::GL,
                ..Default::default()
            },
        )));

        let surface = instance
            .create_surface(::wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("surface error: {e}")))?;

        let adapter = instance
            .request_adapter(&::wgpu::RequestAdapterOptions {
                power_preference: ::wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("adapter error: {e}")))?;

        let (device, queue) = adapter
            .request_device(&::wgpu::DeviceDescriptor {
                label: Some("hero-wgpu-device"),
                required_features: ::wgpu::Features::empty(),
                required_limits: ::wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                ..Default::default()
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("device error: {e}")))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .cloned()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().cloned())
            .ok_or_else(|| JsValue::from_str("surface reports no formats"))?;
        // The canvas is see-through so the page background shows behind
        // the globe.
        let alpha_mode = if surface_caps
            .alpha_modes
            .contains(&::wgpu::CompositeAlphaMode::PreMultiplied)
        {
            ::wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            surface_caps
                .alpha_modes
                .first()
                .cloned()
                .unwrap_or(::wgpu::CompositeAlphaMode::Auto)
        };

        let max_dim = device.limits().max_texture_dimension_2d;
        let config = ::wgpu::SurfaceConfiguration {
            usage: ::wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.clamp(1, max_dim),
            height: height.clamp(1, max_dim),
            desired_maximum_frame_latency: 2,
            present_mode: ::wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let depth_view = create_depth_view(&device, &config);

        let shader = device.create_shader_module(::wgpu::ShaderModuleDescriptor {
            label: Some("hero-globe-shader"),
            source: ::wgpu::ShaderSource::Wgsl(Cow::Borrowed(GLOBE_SHADER)),
        });

        let globals_layout = device.create_bind_group_layout(&::wgpu::BindGroupLayoutDescriptor {
            label: Some("hero-globals-bgl"),
            entries: &[uniform_layout_entry(0)],
        });
        let draw_layout = device.create_bind_group_layout(&::wgpu::BindGroupLayoutDescriptor {
            label: Some("hero-draw-bgl"),
            entries: &[uniform_layout_entry(0)],
        });
        let texture_layout = device.create_bind_group_layout(&::wgpu::BindGroupLayoutDescriptor {
            label: Some("hero-texture-bgl"),
            entries: &[
                ::wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: ::wgpu::ShaderStages::FRAGMENT,
                    ty: ::wgpu::BindingType::Texture {
                        sample_type: ::wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: ::wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                ::wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: ::wgpu::ShaderStages::FRAGMENT,
                    ty: ::wgpu::BindingType::Sampler(::wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let globals_buffer = device.create_buffer(&::wgpu::BufferDescriptor {
            label: Some("hero-globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: ::wgpu::BufferUsages::UNIFORM | ::wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bind_group = device.create_bind_group(&::wgpu::BindGroupDescriptor {
            label: Some("hero-globals-bg"),
            layout: &globals_layout,
            entries: &[::wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let sampler = device.create_sampler(&::wgpu::SamplerDescriptor {
            label: Some("hero-sampler"),
            address_mode_u: ::wgpu::AddressMode::Repeat,
            address_mode_v: ::wgpu::AddressMode::ClampToEdge,
            mag_filter: ::wgpu::FilterMode::Linear,
            min_filter: ::wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let blank_texture = create_texture_bind_group(
            &device,
            &queue,
            &texture_layout,
            &sampler,
            &TextureImage {
                width: 1,
                height: 1,
                rgba: vec![255; 4],
            },
            "hero-blank-texture",
        )?;

        let pipeline_layout = device.create_pipeline_layout(&::wgpu::PipelineLayoutDescriptor {
            label: Some("hero-pipeline-layout"),
            bind_group_layouts: &[&globals_layout, &draw_layout, &texture_layout],
            immediate_size: 0,
        });

        let mesh_buffers = [::wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as ::wgpu::BufferAddress,
            step_mode: ::wgpu::VertexStepMode::Vertex,
            attributes: &[
                ::wgpu::VertexAttribute {
                    format: ::wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                ::wgpu::VertexAttribute {
                    format: ::wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
                ::wgpu::VertexAttribute {
                    format: ::wgpu::VertexFormat::Float32x2,
                    offset: 24,
                    shader_location: 2,
                },
            ],
        }];
        let line_buffers = [::wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as ::wgpu::BufferAddress,
            step_mode: ::wgpu::VertexStepMode::Vertex,
            attributes: &[
                ::wgpu::VertexAttribute {
                    format: ::wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                ::wgpu::VertexAttribute {
                    format: ::wgpu::VertexFormat::Float32,
                    offset: 12,
                    shader_location: 1,
                },
            ],
        }];

        let blended = ::wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING;
        let mesh_opaque_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            format,
            PipelineSpec {
                label: "hero-mesh-opaque",
                vs: "vs_mesh",
                fs: "fs_mesh",
                buffers: &mesh_buffers,
                topology: ::wgpu::PrimitiveTopology::TriangleList,
                blend: ::wgpu::BlendState::REPLACE,
                depth_write: true,
            },
        );
        let mesh_blend_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            format,
            PipelineSpec {
                label: "hero-mesh-blend",
                vs: "vs_mesh",
                fs: "fs_mesh",
                buffers: &mesh_buffers,
                topology: ::wgpu::PrimitiveTopology::TriangleList,
                blend: blended,
                depth_write: false,
            },
        );
        let line_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            format,
            PipelineSpec {
                label: "hero-route-lines",
                vs: "vs_line",
                fs: "fs_line",
                buffers: &line_buffers,
                topology: ::wgpu::PrimitiveTopology::LineStrip,
                blend: blended,
                depth_write: false,
            },
        );
        let sprite_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            format,
            PipelineSpec {
                label: "hero-label-sprites",
                vs: "vs_sprite",
                fs: "fs_sprite",
                buffers: &[],
                topology: ::wgpu::PrimitiveTopology::TriangleList,
                blend: blended,
                depth_write: false,
            },
        );

        Ok(WgpuContext {
            _instance: instance,
            surface,
            device,
            queue,
            config,
            _canvas: canvas.clone(),
            mesh_opaque_pipeline,
            mesh_blend_pipeline,
            line_pipeline,
            sprite_pipeline,
            globals_buffer,
            globals_bind_group,
            draw_layout,
            draw_slots: Vec::new(),
            texture_layout,
            sampler,
            blank_texture,
            globe_texture: None,
            label_textures: Vec::new(),
            meshes: Vec::new(),
            lines: Vec::new(),
            depth_view,
        })
    }

    /// Uploads every mesh and polyline of `world`. Geometry never changes
    /// after assembly; only transforms and materials do.
    pub fn upload_world(ctx: &mut WgpuContext, world: &World) {
        ctx.meshes = world
            .meshes()
            .map(|(id, mesh)| {
                let vertices = mesh_vertices(mesh);
                GpuMesh {
                    vertex_buffer: ctx.device.create_buffer_init(
                        &::wgpu::util::BufferInitDescriptor {
                            label: Some(format!("hero-mesh-{}-vertices", id.0).as_str()),
                            contents: bytemuck::cast_slice(&vertices),
                            usage: ::wgpu::BufferUsages::VERTEX,
                        },
                    ),
                    index_buffer: ctx.device.create_buffer_init(
                        &::wgpu::util::BufferInitDescriptor {
                            label: Some(format!("hero-mesh-{}-indices", id.0).as_str()),
                            contents: bytemuck::cast_slice(&mesh.indices),
                            usage: ::wgpu::BufferUsages::INDEX,
                        },
                    ),
                    index_count: mesh.indices.len() as u32,
                }
            })
            .collect();

        ctx.lines = world
            .polylines()
            .map(|(id, line)| {
                let vertices = line_vertices(line);
                GpuLine {
                    vertex_buffer: ctx.device.create_buffer_init(
                        &::wgpu::util::BufferInitDescriptor {
                            label: Some(format!("hero-line-{}-vertices", id.0).as_str()),
                            contents: bytemuck::cast_slice(&vertices),
                            usage: ::wgpu::BufferUsages::VERTEX,
                        },
                    ),
                    vertex_count: vertices.len() as u32,
                }
            })
            .collect();
    }

    /// Replaces the label textures; index `i` backs `TextureSlot::Label(i)`.
    pub fn upload_labels(ctx: &mut WgpuContext, labels: &[TextureImage]) -> Result<(), JsValue> {
        let mut textures = Vec::with_capacity(labels.len());
        for (i, image) in labels.iter().enumerate() {
            textures.push(create_texture_bind_group(
                &ctx.device,
                &ctx.queue,
                &ctx.texture_layout,
                &ctx.sampler,
                image,
                &format!("hero-label-{i}"),
            )?);
        }
        ctx.label_textures = textures;
        Ok(())
    }

    pub fn upload_globe_texture(ctx: &mut WgpuContext, image: &TextureImage) -> Result<(), JsValue> {
        let bind_group = create_texture_bind_group(
            &ctx.device,
            &ctx.queue,
            &ctx.texture_layout,
            &ctx.sampler,
            image,
            "hero-globe-texture",
        )?;
        ctx.globe_texture = Some(bind_group);
        Ok(())
    }

    pub fn resize_wgpu(ctx: &mut WgpuContext, width: u32, height: u32) {
        let max = ctx.device.limits().max_texture_dimension_2d;
        ctx.config.width = width.clamp(1, max);
        ctx.config.height = height.clamp(1, max);
        ctx.surface.configure(&ctx.device, &ctx.config);
        ctx.depth_view = create_depth_view(&ctx.device, &ctx.config);
    }

    fn ensure_draw_slots(ctx: &mut WgpuContext, count: usize) {
        while ctx.draw_slots.len() < count {
            let buffer = ctx.device.create_buffer(&::wgpu::BufferDescriptor {
                label: Some("hero-draw-uniforms"),
                size: std::mem::size_of::<DrawUniforms>() as u64,
                usage: ::wgpu::BufferUsages::UNIFORM | ::wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bind_group = ctx.device.create_bind_group(&::wgpu::BindGroupDescriptor {
                label: Some("hero-draw-bg"),
                layout: &ctx.draw_layout,
                entries: &[::wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            });
            ctx.draw_slots.push(DrawSlot { buffer, bind_group });
        }
    }

    fn texture_for<'a>(ctx: &'a WgpuContext, command: &RenderCommand) -> &'a ::wgpu::BindGroup {
        match command.material.texture {
            TextureSlot::None => &ctx.blank_texture,
            TextureSlot::Globe => ctx.globe_texture.as_ref().unwrap_or(&ctx.blank_texture),
            TextureSlot::Label(i) => ctx.label_textures.get(i).unwrap_or(&ctx.blank_texture),
        }
    }

    pub fn render_frame(
        ctx: &mut WgpuContext,
        frame: &RenderFrame,
        camera: &Camera3D,
    ) -> Result<(), JsValue> {
        let surface_frame = match ctx.surface.get_current_texture() {
            Ok(f) => f,
            Err(e) => {
                ctx.surface.configure(&ctx.device, &ctx.config);
                return Err(JsValue::from_str(&format!("surface acquire failed: {e}")));
            }
        };
        let view = surface_frame
            .texture
            .create_view(&::wgpu::TextureViewDescriptor::default());

        ctx.queue.write_buffer(
            &ctx.globals_buffer,
            0,
            bytemuck::bytes_of(&globals(frame, camera)),
        );
        ensure_draw_slots(ctx, frame.commands.len());
        for (slot, command) in ctx.draw_slots.iter().zip(&frame.commands) {
            ctx.queue
                .write_buffer(&slot.buffer, 0, bytemuck::bytes_of(&draw_uniforms(command)));
        }

        let mut encoder = ctx
            .device
            .create_command_encoder(&::wgpu::CommandEncoderDescriptor {
                label: Some("hero-frame-encoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&::wgpu::RenderPassDescriptor {
                label: Some("hero-globe-pass"),
                color_attachments: &[Some(::wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: ::wgpu::Operations {
                        load: ::wgpu::LoadOp::Clear(::wgpu::Color::TRANSPARENT),
                        store: ::wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(::wgpu::RenderPassDepthStencilAttachment {
                    view: &ctx.depth_view,
                    depth_ops: Some(::wgpu::Operations {
                        load: ::wgpu::LoadOp::Clear(1.0),
                        store: ::wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });

            rpass.set_bind_group(0, &ctx.globals_bind_group, &[]);
            // Commands arrive opaque first, so blended geometry sees a
            // complete depth buffer.
            for (slot, command) in ctx.draw_slots.iter().zip(&frame.commands) {
                rpass.set_bind_group(1, &slot.bind_group, &[]);
                rpass.set_bind_group(2, texture_for(ctx, command), &[]);
                match command.shape {
                    Shape3D::Mesh(id) => {
                        let Some(mesh) = ctx.meshes.get(id.0 as usize) else {
                            continue;
                        };
                        let pipeline = if command.material.is_transparent() {
                            &ctx.mesh_blend_pipeline
                        } else {
                            &ctx.mesh_opaque_pipeline
                        };
                        rpass.set_pipeline(pipeline);
                        rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                        rpass.set_index_buffer(
                            mesh.index_buffer.slice(..),
                            ::wgpu::IndexFormat::Uint32,
                        );
                        rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
                    }
                    Shape3D::Polyline(id) => {
                        let Some(line) = ctx.lines.get(id.0 as usize) else {
                            continue;
                        };
                        rpass.set_pipeline(&ctx.line_pipeline);
                        rpass.set_vertex_buffer(0, line.vertex_buffer.slice(..));
                        rpass.draw(0..line.vertex_count, 0..1);
                    }
                    Shape3D::Sprite { .. } => {
                        rpass.set_pipeline(&ctx.sprite_pipeline);
                        rpass.draw(0..6, 0..1);
                    }
                }
            }
        }

        ctx.queue.submit(std::iter::once(encoder.finish()));
        surface_frame.present();
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use gpu::camera::Camera3D;
    use gpu::renderer::RenderFrame;
    use scene::prefabs::TextureImage;
    use scene::world::World;
    use wasm_bindgen::prelude::JsValue;

    #[derive(Debug, Default)]
    pub struct WgpuContext;

    pub async fn init_wgpu_from_canvas(
        _canvas: &web_sys::HtmlCanvasElement,
        _width: u32,
        _height: u32,
    ) -> Result<WgpuContext, JsValue> {
        Err(JsValue::from_str(
            "wgpu initialization is only available on wasm32 targets",
        ))
    }

    pub fn upload_world(_ctx: &mut WgpuContext, _world: &World) {}

    pub fn upload_labels(_ctx: &mut WgpuContext, _labels: &[TextureImage]) -> Result<(), JsValue> {
        Err(JsValue::from_str(
            "label upload is only available on wasm32 targets",
        ))
    }

    pub fn upload_globe_texture(
        _ctx: &mut WgpuContext,
        _image: &TextureImage,
    ) -> Result<(), JsValue> {
        Err(JsValue::from_str(
            "texture upload is only available on wasm32 targets",
        ))
    }

    pub fn resize_wgpu(_ctx: &mut WgpuContext, _width: u32, _height: u32) {}

    pub fn render_frame(
        _ctx: &mut WgpuContext,
        _frame: &RenderFrame,
        _camera: &Camera3D,
    ) -> Result<(), JsValue> {
        Err(JsValue::from_str(
            "wgpu rendering is only available on wasm32 targets",
        ))
    }
}

pub use imp::{
    WgpuContext, init_wgpu_from_canvas, render_frame, resize_wgpu, upload_globe_texture,
    upload_labels, upload_world,
};

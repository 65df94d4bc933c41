use crate::constants::*;
use cake_core::{
    cylinder_mesh, pack_candles, pack_flames, CakeConfig, CakeShape, Camera, Candle,
    FlameInstance, Lighting, MeshData, MeshInstance, SceneUniforms,
};
use wgpu::util::DeviceExt;
use web_sys as web;

mod helpers;
mod texture;

use helpers::InstanceBuffer;
pub use texture::{load_or, Rgba8Image};

/// Cake textures loaded before the renderer starts.
pub struct CakeTextures {
    pub body: Rgba8Image,
    pub top: Rgba8Image,
}

impl CakeTextures {
    pub async fn load() -> Self {
        Self {
            body: load_or(CAKE_BODY_TEXTURE, FALLBACK_BODY_RGBA).await,
            top: load_or(CAKE_TOP_TEXTURE, FALLBACK_TOP_RGBA).await,
        }
    }
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    data: MeshData,
}

impl GpuMesh {
    fn new(device: &wgpu::Device, label: &str, data: MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            data,
        }
    }
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    msaa_view: wgpu::TextureView,

    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    mesh_pipeline: wgpu::RenderPipeline,
    flame_pipeline: wgpu::RenderPipeline,

    cake: GpuMesh,
    cake_instance: wgpu::Buffer,
    candle: GpuMesh,
    candle_instances: InstanceBuffer,
    flame_instances: InstanceBuffer,
    bg_body: wgpu::BindGroup,
    bg_top: wgpu::BindGroup,
    bg_plain: wgpu::BindGroup,

    // CPU staging reused every frame
    candle_scratch: Vec<MeshInstance>,
    flame_scratch: Vec<FlameInstance>,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    camera: Camera,
    lighting: Lighting,
    candle_shininess: f32,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        cake_config: &CakeConfig,
        textures: CakeTextures,
    ) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let (_, depth_view) = helpers::create_depth_texture(&device, width, height, MSAA_SAMPLES);
        let msaa_view = helpers::create_msaa_view(&device, format, width, height, MSAA_SAMPLES);

        // Scene uniforms (group 0) shared by both pipelines
        let scene_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &scene_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
        });

        // Surface texture (group 1) for the lit pipeline
        let texture_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let bg_body = texture::create_texture_bind_group(
            &device,
            &queue,
            &texture_bgl,
            &sampler,
            "cake_body",
            &textures.body,
        );
        let bg_top = texture::create_texture_bind_group(
            &device,
            &queue,
            &texture_bgl,
            &sampler,
            "cake_top",
            &textures.top,
        );
        let bg_plain = texture::create_texture_bind_group(
            &device,
            &queue,
            &texture_bgl,
            &sampler,
            "plain",
            &Rgba8Image::solid([255, 255, 255, 255]),
        );

        let mesh_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(cake_core::SCENE_WGSL.into()),
        });
        let flame_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("flame_shader"),
            source: wgpu::ShaderSource::Wgsl(cake_core::FLAME_WGSL.into()),
        });
        let mesh_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_pl"),
            bind_group_layouts: &[&scene_bgl, &texture_bgl],
            push_constant_ranges: &[],
        });
        let flame_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("flame_pl"),
            bind_group_layouts: &[&scene_bgl],
            push_constant_ranges: &[],
        });
        let mesh_pipeline =
            helpers::make_lit_pipeline(&device, &mesh_layout, &mesh_shader, format, MSAA_SAMPLES);
        let flame_pipeline = helpers::make_flame_pipeline(
            &device,
            &flame_layout,
            &flame_shader,
            format,
            MSAA_SAMPLES,
        );

        let shape = CakeShape::from_config(cake_config);
        let cake = GpuMesh::new(
            &device,
            "cake_mesh",
            cylinder_mesh(
                shape.radius_top,
                shape.radius_bottom,
                shape.height,
                shape.segments,
            ),
        );
        let cake_instance = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cake_instance"),
            contents: bytemuck::bytes_of(&MeshInstance {
                offset_shine: [0.0, 0.0, 0.0, CAKE_SHININESS],
                color: [1.0, 1.0, 1.0, 1.0],
            }),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let body = &cake_config.candle;
        let candle = GpuMesh::new(
            &device,
            "candle_mesh",
            cylinder_mesh(body.radius_top, body.radius_bottom, body.height, body.segments),
        );
        let candle_instances = InstanceBuffer::new(
            &device,
            "candle_instances",
            std::mem::size_of::<MeshInstance>(),
            INITIAL_INSTANCE_CAPACITY,
        );
        let flame_instances = InstanceBuffer::new(
            &device,
            "flame_instances",
            std::mem::size_of::<FlameInstance>(),
            INITIAL_INSTANCE_CAPACITY * cake_config.flame.particle_count,
        );

        let aspect = width.max(1) as f32 / height.max(1) as f32;
        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            msaa_view,
            scene_buffer,
            scene_bind_group,
            mesh_pipeline,
            flame_pipeline,
            cake,
            cake_instance,
            candle,
            candle_instances,
            flame_instances,
            bg_body,
            bg_top,
            bg_plain,
            candle_scratch: Vec::new(),
            flame_scratch: Vec::new(),
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: CLEAR_COLOR[3],
            },
            camera: Camera::for_cake(cake_config.cake_radius, aspect),
            lighting: Lighting::default(),
            candle_shininess: body.shininess,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            let (_, depth_view) =
                helpers::create_depth_texture(&self.device, width, height, MSAA_SAMPLES);
            self.depth_view = depth_view;
            self.msaa_view = helpers::create_msaa_view(
                &self.device,
                self.config.format,
                width,
                height,
                MSAA_SAMPLES,
            );
            self.camera.aspect = width as f32 / height as f32;
        }
    }

    /// Draw the cake, every candle still in the session and their flames.
    pub fn render(&mut self, candles: &[Candle]) -> Result<(), wgpu::SurfaceError> {
        let uniforms = SceneUniforms::pack(&self.camera, &self.lighting, candles);
        self.queue
            .write_buffer(&self.scene_buffer, 0, bytemuck::bytes_of(&uniforms));
        pack_candles(candles, self.candle_shininess, &mut self.candle_scratch);
        self.candle_instances
            .upload(&self.device, &self.queue, &self.candle_scratch);
        pack_flames(candles, &mut self.flame_scratch);
        self.flame_instances
            .upload(&self.device, &self.queue, &self.flame_scratch);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.msaa_view,
                    resolve_target: Some(&view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Discard,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rpass.set_pipeline(&self.mesh_pipeline);
            rpass.set_bind_group(0, &self.scene_bind_group, &[]);

            // Cake: body texture on the side and bottom, topper on the top
            rpass.set_vertex_buffer(0, self.cake.vertex_buffer.slice(..));
            rpass.set_vertex_buffer(1, self.cake_instance.slice(..));
            rpass.set_index_buffer(self.cake.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            rpass.set_bind_group(1, &self.bg_body, &[]);
            rpass.draw_indexed(self.cake.data.side.clone(), 0, 0..1);
            rpass.draw_indexed(self.cake.data.bottom.clone(), 0, 0..1);
            rpass.set_bind_group(1, &self.bg_top, &[]);
            rpass.draw_indexed(self.cake.data.top.clone(), 0, 0..1);

            if self.candle_instances.len > 0 {
                rpass.set_bind_group(1, &self.bg_plain, &[]);
                rpass.set_vertex_buffer(0, self.candle.vertex_buffer.slice(..));
                rpass.set_vertex_buffer(1, self.candle_instances.buffer.slice(..));
                rpass.set_index_buffer(
                    self.candle.index_buffer.slice(..),
                    wgpu::IndexFormat::Uint32,
                );
                rpass.draw_indexed(
                    0..self.candle.data.indices.len() as u32,
                    0,
                    0..self.candle_instances.len,
                );
            }

            if self.flame_instances.len > 0 {
                rpass.set_pipeline(&self.flame_pipeline);
                rpass.set_bind_group(0, &self.scene_bind_group, &[]);
                rpass.set_vertex_buffer(0, self.flame_instances.buffer.slice(..));
                rpass.draw(0..6, 0..self.flame_instances.len);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

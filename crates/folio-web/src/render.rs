//! WebGPU starfield renderer.
//!
//! Stars are camera-facing instanced quads: plain layers use a soft circular
//! mask, the glow layer a gaussian halo with a per-point twinkle computed in
//! the vertex stage. Instance buffers are written once at init (the point
//! clouds are immutable); per-frame work is one uniform write per layer.

use folio_core::{StarScene, StarUniforms, STARFIELD_WGSL};
use web_sys as web;
use wgpu::util::DeviceExt;

const QUAD_VERTICES: [f32; 12] = [
    -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
];

struct LayerDraw {
    instance_vb: wgpu::Buffer,
    instance_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    color: [f32; 3],
    opacity: f32,
    size_scale: f32,
    glow: bool,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    star_pipeline: wgpu::RenderPipeline,
    glow_pipeline: wgpu::RenderPipeline,
    quad_vb: wgpu::Buffer,
    layers: Vec<LayerDraw>,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, scene: &StarScene) -> anyhow::Result<Self> {
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
                    // Default limits to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("starfield"),
            source: wgpu::ShaderSource::Wgsl(STARFIELD_WGSL.into()),
        });

        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let bgl = device.create_bind_group_layout(&layer_bgl_descriptor());
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("star_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let star_pipeline =
            build_pipeline(&device, &pipeline_layout, &shader, format, "vs_star", "fs_star");
        let glow_pipeline =
            build_pipeline(&device, &pipeline_layout, &shader, format, "vs_glow", "fs_glow");

        let mut layers = Vec::with_capacity(scene.layers.len() + 1);
        for layer in &scene.layers {
            layers.push(build_layer_draw(
                &device,
                &bgl,
                &layer.instances(),
                layer.spec.color,
                layer.spec.opacity,
                1.0,
                false,
            ));
        }
        layers.push(build_layer_draw(
            &device,
            &bgl,
            &scene.glow.instances(),
            [1.0, 1.0, 1.0],
            1.0,
            scene.glow_size_scale(),
            true,
        ));

        Ok(Self {
            surface,
            device,
            queue,
            config,
            star_pipeline,
            glow_pipeline,
            quad_vb,
            layers,
            width,
            height,
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
        }
    }

    pub fn render(&mut self, scene: &StarScene) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let aspect = self.width.max(1) as f32 / self.height.max(1) as f32;
        let view_m = scene.camera.view_matrix();
        let proj = scene.camera.projection_matrix(aspect);
        let time = scene.time();

        // The glow draw sits one past the plain layers, same order as init.
        for (i, draw) in self.layers.iter().enumerate() {
            let model = if draw.glow {
                scene.glow.model_matrix()
            } else {
                scene.layers[i].model_matrix()
            };
            let uniforms = StarUniforms::new(
                view_m * model,
                proj,
                draw.color,
                draw.opacity,
                time,
                draw.size_scale,
            );
            self.queue
                .write_buffer(&draw.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("star_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("star_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        // Transparent clear; the page shows through the canvas
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            for draw in &self.layers {
                if draw.instance_count == 0 {
                    continue;
                }
                rpass.set_pipeline(if draw.glow {
                    &self.glow_pipeline
                } else {
                    &self.star_pipeline
                });
                rpass.set_bind_group(0, &draw.bind_group, &[]);
                rpass.set_vertex_buffer(1, draw.instance_vb.slice(..));
                rpass.draw(0..6, 0..draw.instance_count);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn layer_bgl_descriptor() -> wgpu::BindGroupLayoutDescriptor<'static> {
    wgpu::BindGroupLayoutDescriptor {
        label: Some("star_bgl"),
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
    }
}

fn build_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    vs_entry: &'static str,
    fs_entry: &'static str,
) -> wgpu::RenderPipeline {
    let vertex_buffers = [
        // slot 0: quad corners
        wgpu::VertexBufferLayout {
            array_stride: (std::mem::size_of::<f32>() * 2) as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x2,
                offset: 0,
                shader_location: 0,
            }],
        },
        // slot 1: StarInstance { pos, size, glow }
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<folio_core::StarInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 1,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32,
                    offset: 12,
                    shader_location: 2,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32,
                    offset: 16,
                    shader_location: 3,
                },
            ],
        },
    ];

    // Additive blending so overlapping stars brighten instead of occluding
    let blend = wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(vs_entry),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(vs_entry),
            buffers: &vertex_buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fs_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

fn build_layer_draw(
    device: &wgpu::Device,
    bgl: &wgpu::BindGroupLayout,
    instances: &[folio_core::StarInstance],
    color: [f32; 3],
    opacity: f32,
    size_scale: f32,
    glow: bool,
) -> LayerDraw {
    let instance_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("star_instances"),
        contents: bytemuck::cast_slice(instances),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("star_uniforms"),
        size: std::mem::size_of::<StarUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("star_bg"),
        layout: bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });
    LayerDraw {
        instance_vb,
        instance_count: instances.len() as u32,
        uniform_buffer,
        bind_group,
        color,
        opacity,
        size_scale,
        glow,
    }
}

/// Acquire the renderer, or run without one: a page with no WebGPU simply
/// shows no starfield.
pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    scene: &StarScene,
) -> Option<GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match GpuState::new(leaked_canvas, scene).await {
        Ok(gpu) => Some(gpu),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

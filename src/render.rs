use crate::core::surface::{choose_alpha_mode, choose_format, instance_descriptor};
use crate::core::{MetaballUniforms, ViewportState, METABALL_WGSL};
use crate::error::EffectError;
use web_sys as web;

// Straight alpha: (SRC_ALPHA, ONE_MINUS_SRC_ALPHA) on both colour and alpha.
const STRAIGHT_ALPHA_BLEND: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    },
};

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    viewport: ViewportState,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> Result<Self, EffectError> {
        let viewport = ViewportState::new(canvas.width().max(1), canvas.height().max(1));

        let instance = wgpu::util::new_instance_with_webgpu_detection(&instance_descriptor()).await;
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| EffectError::ContextUnavailable(e.to_string()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| EffectError::ContextUnavailable("no graphics adapter".into()))?;
        log::info!("[gpu] adapter backend={:?}", adapter.get_info().backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("metaball_device"),
                    required_features: wgpu::Features::empty(),
                    // WebGL2 fallback only guarantees the downlevel limits
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::Performance,
                },
                None,
            )
            .await
            .map_err(|e| EffectError::ContextUnavailable(format!("request_device: {e}")))?;

        let caps = surface.get_capabilities(&adapter);
        let format = choose_format(&caps.formats)
            .ok_or_else(|| EffectError::ContextUnavailable("surface reports no formats".into()))?;
        let alpha_mode = choose_alpha_mode(&caps.alpha_modes);
        log::info!("[gpu] surface format={:?} alpha={:?}", format, alpha_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: viewport.width,
            height: viewport.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = compile_shader(&device).await?;
        let (pipeline, uniform_buffer, bind_group) =
            create_pipeline(&device, &shader, format).await?;

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            uniform_buffer,
            bind_group,
            viewport,
        })
    }

    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    pub fn resize(&mut self, viewport: ViewportState) {
        if viewport.is_empty() {
            log::warn!("[gpu] ignoring zero-sized viewport");
            return;
        }
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.config.width = viewport.width;
        self.config.height = viewport.height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Clear to transparent and draw the full-screen quad once.
    pub fn render(&mut self, uniforms: &MetaballUniforms) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("metaball_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("metaball_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.draw(0..4, 0..1);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Reapply the current configuration after a lost/outdated surface.
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }
}

async fn compile_shader(device: &wgpu::Device) -> Result<wgpu::ShaderModule, EffectError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("metaball_shader"),
        source: wgpu::ShaderSource::Wgsl(METABALL_WGSL.into()),
    });
    let info = shader.get_compilation_info().await;
    let mut errors = Vec::new();
    for msg in &info.messages {
        match msg.message_type {
            wgpu::CompilationMessageType::Error => errors.push(format_message(msg)),
            wgpu::CompilationMessageType::Warning => {
                log::warn!("[gpu] shader: {}", format_message(msg))
            }
            wgpu::CompilationMessageType::Info => {}
        }
    }
    if let Some(err) = device.pop_error_scope().await {
        errors.push(err.to_string());
    }
    if errors.is_empty() {
        Ok(shader)
    } else {
        Err(EffectError::ShaderCompile(errors.join("\n")))
    }
}

fn format_message(msg: &wgpu::CompilationMessage) -> String {
    match &msg.location {
        Some(loc) => format!("{}:{}: {}", loc.line_number, loc.line_position, msg.message),
        None => msg.message.clone(),
    }
}

async fn create_pipeline(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
) -> Result<(wgpu::RenderPipeline, wgpu::Buffer, wgpu::BindGroup), EffectError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("metaball_bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("metaball_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("metaball_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleStrip,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(STRAIGHT_ALPHA_BLEND),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("metaball_uniforms"),
        size: std::mem::size_of::<MetaballUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("metaball_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });
    if let Some(err) = device.pop_error_scope().await {
        return Err(EffectError::PipelineLink(err.to_string()));
    }
    Ok((pipeline, uniform_buffer, bind_group))
}

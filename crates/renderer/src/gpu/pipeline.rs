use std::collections::HashMap;

use anyhow::{Context, Result};
use transition::ProgramVariant;

use crate::compile::{compile_transition_program, compile_vertex_shader};

use super::textures::SlotTexture;

/// Bind group layouts and the vertex stage shared by every program.
pub(crate) struct PipelineLayouts {
    pub uniform_layout: wgpu::BindGroupLayout,
    pub slot_layout: wgpu::BindGroupLayout,
    pub pipeline_layout: wgpu::PipelineLayout,
    pub vertex_module: wgpu::ShaderModule,
}

impl PipelineLayouts {
    pub fn new(device: &wgpu::Device) -> Result<Self> {
        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("transition uniform layout"),
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

        let slot_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("slot layout"),
            entries: &[
                slot_texture_entry(0),
                slot_texture_entry(1),
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("transition pipeline layout"),
            bind_group_layouts: &[&uniform_layout, &slot_layout],
            push_constant_ranges: &[],
        });

        let vertex_module = compile_vertex_shader(device)?;

        Ok(Self {
            uniform_layout,
            slot_layout,
            pipeline_layout,
            vertex_module,
        })
    }

    pub fn slot_bind_group(
        &self,
        device: &wgpu::Device,
        slots: [&SlotTexture; 2],
        sampler: &wgpu::Sampler,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("slot bind group"),
            layout: &self.slot_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(slots[0].view()),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(slots[1].view()),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }
}

fn slot_texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

pub(crate) fn build_transition_pipeline(
    device: &wgpu::Device,
    layouts: &PipelineLayouts,
    surface_format: wgpu::TextureFormat,
    variant: ProgramVariant,
) -> Result<wgpu::RenderPipeline> {
    let fragment_module = compile_transition_program(device, variant)
        .with_context(|| format!("failed to compile {}", variant.label()))?;

    Ok(device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(variant.label()),
        layout: Some(&layouts.pipeline_layout),
        vertex: wgpu::VertexState {
            module: &layouts.vertex_module,
            entry_point: Some("main"),
            buffers: &[],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &fragment_module,
            entry_point: Some("main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        multiview: None,
        cache: None,
    }))
}

/// Compiled pipelines keyed by program variant; each variant is built once.
#[derive(Default)]
pub(crate) struct PipelineCache {
    entries: HashMap<ProgramVariant, wgpu::RenderPipeline>,
}

impl PipelineCache {
    pub fn get(&self, variant: ProgramVariant) -> Option<&wgpu::RenderPipeline> {
        self.entries.get(&variant)
    }

    pub fn get_or_build(
        &mut self,
        device: &wgpu::Device,
        layouts: &PipelineLayouts,
        surface_format: wgpu::TextureFormat,
        variant: ProgramVariant,
    ) -> Result<&wgpu::RenderPipeline> {
        if !self.entries.contains_key(&variant) {
            let pipeline = build_transition_pipeline(device, layouts, surface_format, variant)?;
            tracing::debug!(program = variant.label(), "cached transition pipeline");
            self.entries.insert(variant, pipeline);
        }
        self.entries
            .get(&variant)
            .context("pipeline cache entry vanished after insert")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

//! Render pipeline for the 2D control-bar widget
//!
//! Two NDC quads drawn after the solid with the depth test disabled: a static
//! track and a handle that slides along it with the morph factor. Each quad
//! has its own uniform buffer (color plus translation), so the pass needs no
//! mid-pass buffer writes.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::prism_pipeline::DEPTH_FORMAT;
use super::types::WidgetUniforms;

/// 2D vertex for the widget quads
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct WidgetVertex {
    position: [f32; 2],
}

const fn v(x: f32, y: f32) -> WidgetVertex {
    WidgetVertex { position: [x, y] }
}

// Quads in triangle-strip order. The handle sits at the left end of the track
// and is translated right by morph * HANDLE_TRAVEL.
const WIDGET_VERTICES: [WidgetVertex; 8] = [
    // Track
    v(-0.75, -0.9),
    v(0.75, -0.9),
    v(-0.75, -0.85),
    v(0.75, -0.85),
    // Handle
    v(-0.75, -0.9),
    v(-0.65, -0.9),
    v(-0.75, -0.85),
    v(-0.65, -0.85),
];

/// Horizontal travel of the handle across the track, in NDC
const HANDLE_TRAVEL: f32 = 1.4;

/// Pipeline and per-quad uniforms for the control bar
#[allow(dead_code)] // bind_group_layout kept for potential bind group recreation
pub struct WidgetPipeline {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    vertex_buffer: wgpu::Buffer,
    track_uniform_buffer: wgpu::Buffer,
    track_bind_group: wgpu::BindGroup,
    handle_uniform_buffer: wgpu::Buffer,
    handle_bind_group: wgpu::BindGroup,
    handle_color: [f32; 4],
}

impl WidgetPipeline {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        track_color: [f32; 4],
        handle_color: [f32; 4],
    ) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Widget Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Widget Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader_source = include_str!("../shaders/widget.wgsl");
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Widget Shader"),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Widget Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<WidgetVertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x2,
                        offset: 0,
                        shader_location: 0,
                    }],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            // Shares the pass's depth attachment but ignores it, so the bar
            // always draws on top of the solid
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Always,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Widget Vertex Buffer"),
            contents: bytemuck::cast_slice(&WIDGET_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let track_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Widget Track Uniform Buffer"),
            contents: bytemuck::bytes_of(&WidgetUniforms {
                color: track_color,
                offset: [0.0; 2],
                _padding: [0.0; 2],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let handle_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Widget Handle Uniform Buffer"),
            contents: bytemuck::bytes_of(&WidgetUniforms {
                color: handle_color,
                offset: [0.0; 2],
                _padding: [0.0; 2],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let make_bind_group = |buffer: &wgpu::Buffer, label: &str| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &bind_group_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            })
        };
        let track_bind_group = make_bind_group(&track_uniform_buffer, "Widget Track Bind Group");
        let handle_bind_group = make_bind_group(&handle_uniform_buffer, "Widget Handle Bind Group");

        Self {
            pipeline,
            bind_group_layout,
            vertex_buffer,
            track_uniform_buffer,
            track_bind_group,
            handle_uniform_buffer,
            handle_bind_group,
            handle_color,
        }
    }

    /// Move the handle to reflect the current morph factor
    pub fn update_handle(&self, queue: &wgpu::Queue, morph: f32) {
        let uniforms = WidgetUniforms {
            color: self.handle_color,
            offset: [morph * HANDLE_TRAVEL, 0.0],
            _padding: [0.0; 2],
        };
        queue.write_buffer(&self.handle_uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    /// Record the track and handle draw calls
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));

        render_pass.set_bind_group(0, &self.track_bind_group, &[]);
        render_pass.draw(0..4, 0..1);

        render_pass.set_bind_group(0, &self.handle_bind_group, &[]);
        render_pass.draw(4..8, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_travel_spans_track() {
        // Handle left edge at -0.75, width 0.1; full travel lands its right
        // edge on the track's right edge at 0.75
        let left = WIDGET_VERTICES[4].position[0];
        let right = WIDGET_VERTICES[5].position[0];
        let full_travel_right_edge = left + HANDLE_TRAVEL + (right - left);
        assert!((full_travel_right_edge - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_quads_are_strip_ordered() {
        // Each quad: bottom-left, bottom-right, top-left, top-right
        for quad in WIDGET_VERTICES.chunks_exact(4) {
            assert!(quad[0].position[1] < quad[2].position[1]);
            assert!(quad[0].position[0] < quad[1].position[0]);
            assert_eq!(quad[0].position[0], quad[2].position[0]);
            assert_eq!(quad[1].position[0], quad[3].position[0]);
        }
    }
}

use anyhow::{Context, Result};

use super::layout;
use super::shader::{self, FRAGMENT_ENTRY, VERTEX_ENTRY};
use super::VertexVariant;

/// Device-independent description of the main pipeline.
///
/// A pure function of `(format, variant)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineDesc {
    pub variant: VertexVariant,
    pub format: wgpu::TextureFormat,
    pub array_stride: wgpu::BufferAddress,
    pub attributes: Vec<wgpu::VertexAttribute>,
    pub camera_entry: wgpu::BindGroupLayoutEntry,
    pub primitive: wgpu::PrimitiveState,
}

pub fn describe_pipeline(format: wgpu::TextureFormat, variant: VertexVariant) -> PipelineDesc {
    PipelineDesc {
        variant,
        format,
        array_stride: variant.array_stride(),
        attributes: variant.attributes().to_vec(),
        camera_entry: layout::camera_layout_entry(),
        primitive: layout::primitive_state(),
    }
}

/// Immutable render pipeline bound to one target format.
///
/// Rebuild it with [`build_pipeline`] if the format or variant changes.
pub struct MainPipeline {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    desc: PipelineDesc,
}

impl MainPipeline {
    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    /// Layout of bind group 0 (the camera uniform).
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn desc(&self) -> &PipelineDesc {
        &self.desc
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.desc.format
    }

    pub fn variant(&self) -> VertexVariant {
        self.desc.variant
    }
}

/// Compiles the embedded shader for `variant` into a pipeline targeting `format`.
///
/// The shader is checked against the variant's layout before any GPU object
/// is created. Errors raised by the device itself are not intercepted.
pub fn build_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    variant: VertexVariant,
) -> Result<MainPipeline> {
    let desc = describe_pipeline(format, variant);
    let source = variant.shader_source();

    shader::validate_shader(source, variant)
        .with_context(|| format!("{variant:?} shader does not match its pipeline layout"))?;

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("main-shader"),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("main-bind-group-layout"),
        entries: &[desc.camera_entry],
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("main-pipeline-layout"),
        bind_group_layouts: &[&bind_group_layout],
        immediate_size: 0,
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("main-pipeline"),
        layout: Some(&pipeline_layout),

        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some(VERTEX_ENTRY),
            compilation_options: Default::default(),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: desc.array_stride,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &desc.attributes,
            }],
        },

        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some(FRAGMENT_ENTRY),
            compilation_options: Default::default(),
            targets: &[Some(layout::color_target(format))],
        }),

        primitive: desc.primitive,
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    });

    log::debug!("built {variant:?} pipeline for {format:?}");

    Ok(MainPipeline {
        pipeline,
        bind_group_layout,
        desc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Bgra8Unorm;

    #[test]
    fn description_is_deterministic() {
        for variant in VertexVariant::ALL {
            assert_eq!(describe_pipeline(FORMAT, variant), describe_pipeline(FORMAT, variant));
        }
    }

    #[test]
    fn full_variant_layout() {
        let d = describe_pipeline(FORMAT, VertexVariant::Full);
        let offsets: Vec<_> = d.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, [0, 12, 24]);
        assert_eq!(d.array_stride, 32);
        assert_eq!(d.attributes[2].format, wgpu::VertexFormat::Float32x2);
    }

    #[test]
    fn position_only_layout() {
        let d = describe_pipeline(FORMAT, VertexVariant::PositionOnly);
        assert_eq!(d.array_stride, 8);
        assert_eq!(d.attributes.len(), 1);
        assert_eq!(d.attributes[0].offset, 0);
    }

    #[test]
    fn camera_entry_is_vertex_only_uniform() {
        let d = describe_pipeline(FORMAT, VertexVariant::Full);
        assert_eq!(d.camera_entry.binding, 0);
        assert_eq!(d.camera_entry.visibility, wgpu::ShaderStages::VERTEX);
        assert!(matches!(
            d.camera_entry.ty,
            wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: Some(size),
            } if size.get() == 64
        ));
    }

    #[test]
    fn fixed_function_state() {
        let p = describe_pipeline(FORMAT, VertexVariant::PositionOnly).primitive;
        assert_eq!(p.topology, wgpu::PrimitiveTopology::TriangleList);
        assert_eq!(p.front_face, wgpu::FrontFace::Ccw);
        assert_eq!(p.cull_mode, Some(wgpu::Face::Back));
    }

    #[test]
    fn builds_on_a_real_device() {
        let Some((device, _queue)) = crate::testing::headless_device() else { return };

        for variant in VertexVariant::ALL {
            let a = build_pipeline(&device, FORMAT, variant).expect("first build");
            let b = build_pipeline(&device, FORMAT, variant).expect("second build");
            assert_eq!(a.desc(), b.desc());
            assert_eq!(a.format(), FORMAT);
            assert_eq!(a.variant(), variant);
        }
    }
}

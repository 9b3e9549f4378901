//! Embedded WGSL sources and the load-time check that their declared
//! bindings and vertex inputs agree with the pipeline layout.

use anyhow::{anyhow, ensure, Context, Result};
use naga::{AddressSpace, Binding, Expression, ScalarKind, ShaderStage, Statement, TypeInner};

use super::layout::{CAMERA_BINDING, CAMERA_GROUP, CAMERA_UNIFORM_SIZE};
use super::VertexVariant;

pub(crate) const MESH_SHADER: &str = include_str!("shaders/mesh.wgsl");
pub(crate) const POSITION_SHADER: &str = include_str!("shaders/position.wgsl");

pub const VERTEX_ENTRY: &str = "vertexShader";
pub const FRAGMENT_ENTRY: &str = "fragmentShader";

/// Parses `source` and checks it against the layout `variant` declares.
///
/// Checked:
/// - `vertexShader` is a vertex entry point and `fragmentShader` a fragment entry point
/// - group 0 binding 0 is a uniform of at least 64 bytes, and the only
///   resource binding the shader declares
/// - only the vertex stage reads the camera
/// - every vertex input location has an attribute with the same float
///   component count, and every attribute is consumed
pub fn validate_shader(source: &str, variant: VertexVariant) -> Result<()> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| anyhow!("shader failed to parse:\n{}", e.emit_to_string(source)))?;

    let camera = check_camera_binding(&module)?;
    let vs = entry_point(&module, VERTEX_ENTRY, ShaderStage::Vertex)?;
    entry_point(&module, FRAGMENT_ENTRY, ShaderStage::Fragment)?;
    check_camera_visibility(&module, camera)?;
    check_vertex_inputs(&module, vs, variant.attributes())
}

/// Returns the camera global after checking it is the shader's only binding.
fn check_camera_binding(module: &naga::Module) -> Result<naga::Handle<naga::GlobalVariable>> {
    let mut camera = None;

    for (handle, var) in module.global_variables.iter() {
        let Some(b) = var.binding.as_ref() else { continue };
        ensure!(
            b.group == CAMERA_GROUP && b.binding == CAMERA_BINDING,
            "@group({}) @binding({}) is not in the pipeline layout",
            b.group,
            b.binding
        );
        camera = Some((handle, var));
    }

    let (handle, camera) = camera.context("shader declares nothing at @group(0) @binding(0)")?;

    ensure!(
        matches!(camera.space, AddressSpace::Uniform),
        "@group(0) @binding(0) is not a uniform buffer"
    );

    let size = u64::from(module.types[camera.ty].inner.size(module.to_ctx()));
    ensure!(
        size >= CAMERA_UNIFORM_SIZE,
        "camera uniform is {size} bytes, layout requires {CAMERA_UNIFORM_SIZE}"
    );
    Ok(handle)
}

/// The camera entry is visible to `ShaderStages::VERTEX` only.
fn check_camera_visibility(
    module: &naga::Module,
    camera: naga::Handle<naga::GlobalVariable>,
) -> Result<()> {
    for ep in &module.entry_points {
        if ep.stage == ShaderStage::Vertex {
            continue;
        }
        ensure!(
            !reads_global(module, &ep.function, camera, &mut Vec::new()),
            "{:?} entry point `{}` reads the camera, which is bound to the vertex stage only",
            ep.stage,
            ep.name
        );
    }
    Ok(())
}

/// Whether `function`, or any function it calls, reads `global`.
fn reads_global(
    module: &naga::Module,
    function: &naga::Function,
    global: naga::Handle<naga::GlobalVariable>,
    visited: &mut Vec<naga::Handle<naga::Function>>,
) -> bool {
    let direct = function
        .expressions
        .iter()
        .any(|(_, e)| matches!(*e, Expression::GlobalVariable(h) if h == global));
    if direct {
        return true;
    }

    let mut callees = Vec::new();
    collect_calls(&function.body, &mut callees);

    callees.into_iter().any(|callee| {
        if visited.contains(&callee) {
            return false;
        }
        visited.push(callee);
        reads_global(module, &module.functions[callee], global, visited)
    })
}

fn collect_calls(block: &naga::Block, out: &mut Vec<naga::Handle<naga::Function>>) {
    for stmt in block.iter() {
        match stmt {
            Statement::Call { function, .. } => out.push(*function),
            Statement::Block(inner) => collect_calls(inner, out),
            Statement::If { accept, reject, .. } => {
                collect_calls(accept, out);
                collect_calls(reject, out);
            }
            Statement::Switch { cases, .. } => {
                for case in cases {
                    collect_calls(&case.body, out);
                }
            }
            Statement::Loop { body, continuing, .. } => {
                collect_calls(body, out);
                collect_calls(continuing, out);
            }
            _ => {}
        }
    }
}

fn entry_point<'m>(
    module: &'m naga::Module,
    name: &str,
    stage: ShaderStage,
) -> Result<&'m naga::EntryPoint> {
    let ep = module
        .entry_points
        .iter()
        .find(|ep| ep.name == name)
        .with_context(|| format!("missing entry point `{name}`"))?;

    ensure!(
        ep.stage == stage,
        "entry point `{name}` is a {:?} stage, expected {stage:?}",
        ep.stage
    );
    Ok(ep)
}

/// `(location, type)` of every user-defined vertex input, including those
/// declared as members of a struct argument.
fn vertex_inputs(
    module: &naga::Module,
    ep: &naga::EntryPoint,
) -> Vec<(u32, naga::Handle<naga::Type>)> {
    let mut inputs = Vec::new();

    for arg in &ep.function.arguments {
        match &arg.binding {
            Some(Binding::Location { location, .. }) => inputs.push((*location, arg.ty)),
            Some(_) => {}
            None => {
                if let TypeInner::Struct { members, .. } = &module.types[arg.ty].inner {
                    for m in members {
                        if let Some(Binding::Location { location, .. }) = &m.binding {
                            inputs.push((*location, m.ty));
                        }
                    }
                }
            }
        }
    }

    inputs
}

fn check_vertex_inputs(
    module: &naga::Module,
    ep: &naga::EntryPoint,
    attributes: &[wgpu::VertexAttribute],
) -> Result<()> {
    let inputs = vertex_inputs(module, ep);

    for &(location, ty) in &inputs {
        let attr = attributes
            .iter()
            .find(|a| a.shader_location == location)
            .with_context(|| format!("vertex input @location({location}) has no attribute"))?;

        let want = format_components(attr.format)
            .with_context(|| format!("unsupported attribute format {:?}", attr.format))?;
        let got = type_components(&module.types[ty].inner).with_context(|| {
            format!("vertex input @location({location}) is not an f32 scalar or vector")
        })?;

        ensure!(
            got == want,
            "vertex input @location({location}) has {got} components, layout provides {:?}",
            attr.format
        );
    }

    for attr in attributes {
        ensure!(
            inputs.iter().any(|&(l, _)| l == attr.shader_location),
            "attribute at location {} is not read by the vertex stage",
            attr.shader_location
        );
    }

    Ok(())
}

fn format_components(format: wgpu::VertexFormat) -> Option<u32> {
    match format {
        wgpu::VertexFormat::Float32 => Some(1),
        wgpu::VertexFormat::Float32x2 => Some(2),
        wgpu::VertexFormat::Float32x3 => Some(3),
        wgpu::VertexFormat::Float32x4 => Some(4),
        _ => None,
    }
}

fn type_components(inner: &TypeInner) -> Option<u32> {
    let is_f32 = |s: naga::Scalar| s.kind == ScalarKind::Float && s.width == 4;
    match *inner {
        TypeInner::Scalar(s) if is_f32(s) => Some(1),
        TypeInner::Vector { size, scalar } if is_f32(scalar) => Some(size as u32),
        _ => None,
    }
}

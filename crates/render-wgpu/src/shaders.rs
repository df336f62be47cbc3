/// WGSL shader for instanced grid boxes.
///
/// `fs_solid` fills faces with the instance color; `fs_line` draws outlines
/// in a darker shade of it.
pub const GRID_SHADER: &str = r#"
struct Uniforms {
    world_view_projection: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
};

struct InstanceInput {
    @location(1) offset: vec3<f32>,
    @location(2) scale: vec3<f32>,
    @location(3) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

fn srgb_to_linear(c: vec3<f32>) -> vec3<f32> {
    return pow(c, vec3<f32>(2.2));
}

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let world_pos = vertex.position * instance.scale + instance.offset;

    var out: VertexOutput;
    out.clip_position = uniforms.world_view_projection * vec4<f32>(world_pos, 1.0);
    out.color = vec4<f32>(srgb_to_linear(instance.color.rgb), instance.color.a);
    return out;
}

@fragment
fn fs_solid(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}

@fragment
fn fs_line(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(in.color.rgb * 0.25, 1.0);
}
"#;

use std::borrow::Cow;

use anyhow::Result;
use transition::ProgramVariant;
use wgpu::naga::ShaderStage;

/// Compiles the full-screen triangle vertex shader.
pub(crate) fn compile_vertex_shader(device: &wgpu::Device) -> Result<wgpu::ShaderModule> {
    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("transition vertex"),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Borrowed(VERTEX_SHADER_GLSL),
            stage: ShaderStage::Vertex,
            defines: &[],
        },
    }))
}

pub(crate) fn compile_transition_program(
    device: &wgpu::Device,
    variant: ProgramVariant,
) -> Result<wgpu::ShaderModule> {
    let source = transition_fragment_source(variant);
    tracing::debug!(
        program = variant.label(),
        bytes = source.len(),
        "compiling transition program"
    );
    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(variant.label()),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Owned(source),
            stage: ShaderStage::Fragment,
            defines: &[],
        },
    }))
}

/// Full GLSL fragment source for `variant`: the shared [`HEADER`] followed by
/// the program body.
pub(crate) fn transition_fragment_source(variant: ProgramVariant) -> String {
    let body = match variant {
        ProgramVariant::Split => SPLIT_BODY,
        ProgramVariant::Fade => FADE_BODY,
        ProgramVariant::Noise => NOISE_BODY,
    };
    format!("{HEADER}\n{body}")
}

/// Uniform block and slot bindings shared by every transition program.
///
/// The block layout must match `TransitionUniforms` in `gpu/uniforms.rs`.
const HEADER: &str = r"#version 450
layout(location = 0) in vec2 v_uv;
layout(location = 0) out vec4 outColor;

layout(std140, set = 0, binding = 0) uniform TransitionParams {
    float progress;
    float intensity;
    float scaleX;
    float scaleY;
    float width;
    float _pad0;
    float _pad1;
    float _pad2;
    vec4 resolution1;
    vec4 resolution2;
    vec4 frame;
} ubo;

layout(set = 1, binding = 0) uniform texture2D slot1_texture;
layout(set = 1, binding = 1) uniform texture2D slot2_texture;
layout(set = 1, binding = 2) uniform sampler slot_sampler;

vec2 fit_uv(vec2 uv, vec4 resolution) {
    return (uv - vec2(0.5)) * resolution.zw + vec2(0.5);
}

vec4 sample_slot1(vec2 uv) {
    return texture(sampler2D(slot1_texture, slot_sampler), fit_uv(uv, ubo.resolution1));
}

vec4 sample_slot2(vec2 uv) {
    return texture(sampler2D(slot2_texture, slot_sampler), fit_uv(uv, ubo.resolution2));
}
";

/// Vertical strips slide in alternating directions; `intensity` is the strip count.
const SPLIT_BODY: &str = r"void main() {
    float strips = max(floor(ubo.intensity), 1.0);
    float band = floor(v_uv.x * strips);
    float dir = mod(band, 2.0) < 1.0 ? 1.0 : -1.0;
    float p = clamp(ubo.progress, 0.0, 1.0);

    vec2 uv_out = v_uv + vec2(0.0, dir * p);
    vec2 uv_in = v_uv - vec2(0.0, dir * (1.0 - p));
    float show_in = step(0.0, uv_in.y) * step(uv_in.y, 1.0);

    outColor = mix(sample_slot1(uv_out), sample_slot2(uv_in), show_in);
}
";

const FADE_BODY: &str = r"void main() {
    float p = clamp(ubo.progress, 0.0, 1.0);
    outColor = mix(sample_slot1(v_uv), sample_slot2(v_uv), p);
}
";

/// Value noise threshold sweeping across the frame; `width` softens the edge.
const NOISE_BODY: &str = r"float hash(vec2 p) {
    return fract(sin(dot(p, vec2(127.1, 311.7))) * 43758.5453123);
}

float value_noise(vec2 p) {
    vec2 i = floor(p);
    vec2 f = fract(p);
    vec2 u = f * f * (3.0 - 2.0 * f);
    float a = hash(i);
    float b = hash(i + vec2(1.0, 0.0));
    float c = hash(i + vec2(0.0, 1.0));
    float d = hash(i + vec2(1.0, 1.0));
    return mix(mix(a, b, u.x), mix(c, d, u.x), u.y);
}

void main() {
    float edge = max(ubo.width, 0.001);
    float n = value_noise(v_uv * vec2(ubo.scaleX, ubo.scaleY));
    float threshold = clamp(ubo.progress, 0.0, 1.0) * (1.0 + edge) - edge;
    float reveal = 1.0 - smoothstep(threshold, threshold + edge, n);
    outColor = mix(sample_slot1(v_uv), sample_slot2(v_uv), reveal);
}
";

/// Full-screen triangle scaled by `ubo.frame.xy`, the quad's extent in clip space.
const VERTEX_SHADER_GLSL: &str = r"#version 450
layout(location = 0) out vec2 v_uv;

layout(std140, set = 0, binding = 0) uniform TransitionParams {
    float progress;
    float intensity;
    float scaleX;
    float scaleY;
    float width;
    float _pad0;
    float _pad1;
    float _pad2;
    vec4 resolution1;
    vec4 resolution2;
    vec4 frame;
} ubo;

const vec2 positions[3] = vec2[3](
    vec2(-1.0, -3.0),
    vec2(3.0, 1.0),
    vec2(-1.0, 1.0)
);

void main() {
    uint vertex_index = uint(gl_VertexIndex);
    vec2 pos = positions[vertex_index];
    v_uv = pos * 0.5 + vec2(0.5, 0.5);
    gl_Position = vec4(pos * ubo.frame.xy, 0.0, 1.0);
}
";

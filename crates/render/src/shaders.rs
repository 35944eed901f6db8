use crate::device::{ShaderStage, StageSource};

/// Uniform block members of [`CUBE_VERTEX_SHADER`], in declaration order.
pub const TRANSFORM_UNIFORMS: &[&str] = &["model", "view", "projection"];

/// WGSL vertex stage: `projection * view * model * position`.
pub const CUBE_VERTEX_SHADER: &str = r#"
struct Transforms {
    model: mat4x4<f32>,
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> transforms: Transforms;

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    let clip = transforms.projection * transforms.view * transforms.model * vec4<f32>(position, 1.0);
    // OpenGL depth range (-w..w) to 0..w.
    return vec4<f32>(clip.xy, 0.5 * (clip.z + clip.w), clip.w);
}
"#;

/// WGSL fragment stage: opaque red.
pub const CUBE_FRAGMENT_SHADER: &str = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 0.0, 0.0, 1.0);
}
"#;

pub const CUBE_VERTEX_STAGE: StageSource<'static> = StageSource {
    stage: ShaderStage::Vertex,
    label: "cube_vertex_shader",
    source: CUBE_VERTEX_SHADER,
    entry_point: "vs_main",
};

pub const CUBE_FRAGMENT_STAGE: StageSource<'static> = StageSource {
    stage: ShaderStage::Fragment,
    label: "cube_fragment_shader",
    source: CUBE_FRAGMENT_SHADER,
    entry_point: "fs_main",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_block_declares_every_transform() {
        for name in TRANSFORM_UNIFORMS {
            assert!(
                CUBE_VERTEX_SHADER.contains(&format!("{name}: mat4x4<f32>")),
                "missing {name}"
            );
        }
    }

    #[test]
    fn entry_points_exist_in_sources() {
        for stage in [CUBE_VERTEX_STAGE, CUBE_FRAGMENT_STAGE] {
            assert!(stage.source.contains(&format!("fn {}(", stage.entry_point)));
        }
    }
}

use crate::device::{BufferHandle, VertexAttribute, VertexFormat, VertexLayout};

/// Number of vertices drawn per frame.
pub const CUBE_VERTEX_COUNT: u32 = 36;

/// Unit cube centered on the origin as 12 independent triangles.
///
/// No index buffer: triangles sharing an edge repeat the corner.
#[rustfmt::skip]
pub static CUBE_VERTICES: [[f32; 3]; 36] = [
    // front (+Z)
    [ 0.5,  0.5,  0.5], [ 0.5, -0.5,  0.5], [-0.5, -0.5,  0.5],
    [-0.5, -0.5,  0.5], [-0.5,  0.5,  0.5], [ 0.5,  0.5,  0.5],
    // back (-Z)
    [-0.5,  0.5, -0.5], [ 0.5,  0.5, -0.5], [-0.5, -0.5, -0.5],
    [ 0.5,  0.5, -0.5], [ 0.5, -0.5, -0.5], [-0.5, -0.5, -0.5],
    // right (+X)
    [ 0.5,  0.5,  0.5], [ 0.5,  0.5, -0.5], [ 0.5, -0.5,  0.5],
    [ 0.5,  0.5, -0.5], [ 0.5, -0.5,  0.5], [ 0.5, -0.5, -0.5],
    // left (-X)
    [-0.5,  0.5,  0.5], [-0.5,  0.5, -0.5], [-0.5, -0.5,  0.5],
    [-0.5,  0.5, -0.5], [-0.5, -0.5,  0.5], [-0.5, -0.5, -0.5],
    // top (+Y)
    [ 0.5,  0.5,  0.5], [-0.5,  0.5,  0.5], [-0.5,  0.5, -0.5],
    [-0.5,  0.5, -0.5], [ 0.5,  0.5,  0.5], [ 0.5,  0.5, -0.5],
    // bottom (-Y)
    [ 0.5, -0.5,  0.5], [-0.5, -0.5,  0.5], [-0.5, -0.5, -0.5],
    [-0.5, -0.5, -0.5], [ 0.5, -0.5,  0.5], [ 0.5, -0.5, -0.5],
];

/// Raw bytes of [`CUBE_VERTICES`] for upload.
pub fn cube_vertex_bytes() -> &'static [u8] {
    bytemuck::cast_slice(&CUBE_VERTICES)
}

/// Single `vec3<f32>` position at location 0, tightly packed.
pub fn cube_vertex_layout(buffer: BufferHandle) -> VertexLayout {
    VertexLayout {
        buffer,
        stride: VertexFormat::Float32x3.size(),
        attributes: vec![VertexAttribute {
            location: 0,
            format: VertexFormat::Float32x3,
            offset: 0,
        }],
    }
}

/// Iterate the cube as triangles.
pub fn cube_triangles() -> impl Iterator<Item = [[f32; 3]; 3]> {
    CUBE_VERTICES
        .chunks_exact(3)
        .map(|tri| [tri[0], tri[1], tri[2]])
}

/// An axis-aligned face of the cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Face {
    /// 0 = X, 1 = Y, 2 = Z.
    pub axis: usize,
    pub positive: bool,
}

/// The face a triangle lies in, if all three corners share one coordinate.
pub fn triangle_face(tri: &[[f32; 3]; 3]) -> Option<Face> {
    (0..3).find_map(|axis| {
        let c = tri[0][axis];
        (tri[1][axis] == c && tri[2][axis] == c).then_some(Face {
            axis,
            positive: c > 0.0,
        })
    })
}

//! Vertex format for heightfield meshes.

/// A single heightfield mesh vertex.
///
/// Interleaved position + texture coordinates, 20 bytes, ready for direct
/// upload to a GPU vertex buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TerrainVertex {
    /// World-space position: the heightfield plane spans X/Z, heights go to Y.
    pub position: [f32; 3],
    /// Texture coordinates in `[0, 1]` across the full grid.
    pub uv: [f32; 2],
}

static_assertions::assert_eq_size!(TerrainVertex, [u8; 20]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_byte_layout() {
        let vertex = TerrainVertex {
            position: [1.0, 2.0, 3.0],
            uv: [0.25, 0.75],
        };
        let bytes = bytemuck::bytes_of(&vertex);
        assert_eq!(bytes.len(), 20);

        let restored: TerrainVertex = *bytemuck::from_bytes(bytes);
        assert_eq!(restored, vertex);
    }
}

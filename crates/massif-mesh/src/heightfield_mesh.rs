//! Heightfield-to-mesh conversion.
//!
//! Walks a finished [`HeightGrid`] and emits vertex positions, texture
//! coordinates, and quad topology. The grid stores a toroidal lattice one
//! sample smaller per axis than the emitted vertex sheet; the final row and
//! column re-read row and column zero through the wrapped accessor, which
//! closes the seam.

use std::sync::atomic::{AtomicBool, Ordering};

use massif_grid::HeightGrid;

use crate::vertex::TerrainVertex;

/// A quad mesh built from a heightfield.
///
/// Vertices are laid out U-major over the logical vertex sheet; indices come
/// four per quad, one quad per lattice face.
#[derive(Clone, Debug)]
pub struct HeightfieldMesh {
    /// Vertex buffer.
    pub vertices: Vec<TerrainVertex>,
    /// Quad index buffer, four indices per face.
    pub indices: Vec<u32>,
    /// Vertices along the U axis.
    pub vertices_u: u32,
    /// Vertices along the V axis.
    pub vertices_v: u32,
}

impl HeightfieldMesh {
    /// Build a mesh from a grid, running to completion.
    pub fn build(grid: &HeightGrid) -> Self {
        Self::build_inner(grid, &mut || false)
            .expect("a build that can never be cancelled always completes")
    }

    /// Build a mesh, polling `cancel` between rows.
    ///
    /// Returns `None` if the flag was set before the build finished; the
    /// partial output is discarded. Cancellation only affects this build —
    /// the grid, and any generation that produced it, are untouched.
    pub fn build_cancellable(grid: &HeightGrid, cancel: &AtomicBool) -> Option<Self> {
        Self::build_inner(grid, &mut || cancel.load(Ordering::Relaxed))
    }

    fn build_inner(grid: &HeightGrid, cancelled: &mut dyn FnMut() -> bool) -> Option<Self> {
        let segments_u = grid.segments_u();
        let segments_v = grid.segments_v();
        let vertices_u = grid.vertices_u();
        let vertices_v = grid.vertices_v();
        let half_width = grid.width() / 2.0;
        let half_length = grid.length() / 2.0;

        let mut vertices = Vec::with_capacity(vertices_u as usize * vertices_v as usize);
        for u in 0..vertices_u {
            if cancelled() {
                return None;
            }
            for v in 0..vertices_v {
                let x = u as f32 * grid.width() / segments_u as f32 - half_width;
                let y = grid.height_wrapped(i64::from(u), i64::from(v));
                let z = v as f32 * grid.length() / segments_v as f32 - half_length;
                vertices.push(TerrainVertex {
                    position: [x, y, z],
                    uv: [u as f32 / segments_u as f32, v as f32 / segments_v as f32],
                });
            }
        }

        let mut indices = Vec::with_capacity(segments_u as usize * segments_v as usize * 4);
        for u in 0..segments_u {
            if cancelled() {
                return None;
            }
            for v in 0..segments_v {
                // The V vertex count is the index stride.
                indices.push((u + 1) * vertices_v + v);
                indices.push((u + 1) * vertices_v + v + 1);
                indices.push(u * vertices_v + v + 1);
                indices.push(u * vertices_v + v);
            }
        }

        Some(Self {
            vertices,
            indices,
            vertices_u,
            vertices_v,
        })
    }

    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of quads in the mesh.
    pub fn quad_count(&self) -> usize {
        self.indices.len() / 4
    }

    /// Derive a triangle index list, two triangles per quad, for consumers
    /// that cannot draw quads directly.
    pub fn triangle_indices(&self) -> Vec<u32> {
        let mut triangles = Vec::with_capacity(self.quad_count() * 6);
        for quad in self.indices.chunks_exact(4) {
            triangles.extend([quad[0], quad[1], quad[2], quad[0], quad[2], quad[3]]);
        }
        triangles
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

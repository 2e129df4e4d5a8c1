//! Flat height buffer addressed by toroidally-wrapped lattice coordinates.
//!
//! Opposite edges of the lattice are adjacent, so any signed coordinate folds
//! back into range before indexing. The buffer holds one sample per lattice
//! cell; the logical mesh consumed downstream is one vertex larger per axis
//! and closes its seam by re-reading row and column zero.

use crate::error::GridError;

/// A heightfield over a toroidally-wrapped lattice.
///
/// Samples are stored U-major: all `segments_v` samples of `u = 0` first,
/// then `u = 1`, and so on. `width` and `length` are world-space extents and
/// play no role in indexing; they ride along for mesh construction.
#[derive(Clone, Debug)]
pub struct HeightGrid {
    width: f32,
    length: f32,
    segments_u: u32,
    segments_v: u32,
    heights: Vec<f32>,
}

impl HeightGrid {
    /// Create a square grid with `segments` faces per axis, zero-filled.
    ///
    /// Fails with [`GridError::Allocation`] if the buffer cannot be obtained
    /// and [`GridError::ZeroSegments`] for an empty lattice.
    pub fn new(width: f32, length: f32, segments: u32) -> Result<Self, GridError> {
        Self::with_segments(width, length, segments, segments)
    }

    /// Create a grid with independent face counts per axis, zero-filled.
    ///
    /// The stored stride is the V-axis count, so rectangular lattices index
    /// correctly; note that the diamond-square generator itself only accepts
    /// square lattices.
    pub fn with_segments(
        width: f32,
        length: f32,
        segments_u: u32,
        segments_v: u32,
    ) -> Result<Self, GridError> {
        let samples = Self::sample_count(segments_u, segments_v)?;
        let mut heights = Vec::new();
        heights
            .try_reserve_exact(samples)
            .map_err(|_| GridError::Allocation {
                segments_u,
                segments_v,
            })?;
        heights.resize(samples, 0.0);
        Ok(Self {
            width,
            length,
            segments_u,
            segments_v,
            heights,
        })
    }

    /// Create a square grid that takes ownership of an existing buffer.
    ///
    /// The buffer must hold exactly `segments * segments` samples; anything
    /// else fails with [`GridError::BufferSize`]. The grid becomes the sole
    /// owner of the buffer.
    pub fn from_heights(
        width: f32,
        length: f32,
        segments: u32,
        heights: Vec<f32>,
    ) -> Result<Self, GridError> {
        let expected = Self::sample_count(segments, segments)?;
        if heights.len() != expected {
            return Err(GridError::BufferSize {
                expected,
                actual: heights.len(),
            });
        }
        Ok(Self {
            width,
            length,
            segments_u: segments,
            segments_v: segments,
            heights,
        })
    }

    /// World-space extent along the U axis.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// World-space extent along the V axis.
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Number of faces along the U axis.
    pub fn segments_u(&self) -> u32 {
        self.segments_u
    }

    /// Number of faces along the V axis.
    pub fn segments_v(&self) -> u32 {
        self.segments_v
    }

    /// Number of mesh vertices along the U axis.
    pub fn vertices_u(&self) -> u32 {
        self.segments_u + 1
    }

    /// Number of mesh vertices along the V axis.
    pub fn vertices_v(&self) -> u32 {
        self.segments_v + 1
    }

    /// Total number of logical mesh vertices.
    ///
    /// This is `vertices_u * vertices_v`, one vertex larger per axis than
    /// the stored sample lattice: the final row and column of the mesh are
    /// wrapped duplicates of row and column zero, not separate samples.
    pub fn total_vertices(&self) -> usize {
        self.vertices_u() as usize * self.vertices_v() as usize
    }

    /// Read the sample at `(u, v)`, wrapping both coordinates.
    pub fn height_wrapped(&self, u: i64, v: i64) -> f32 {
        let u = Self::wrap(u, self.segments_u);
        let v = Self::wrap(v, self.segments_v);
        self.heights[self.index(u, v)]
    }

    /// Write the sample at `(u, v)`, wrapping both coordinates.
    pub fn set_height_wrapped(&mut self, u: i64, v: i64, height: f32) {
        let u = Self::wrap(u, self.segments_u);
        let v = Self::wrap(v, self.segments_v);
        let idx = self.index(u, v);
        self.heights[idx] = height;
    }

    /// Zero-fill every sample.
    pub fn clear(&mut self) {
        self.heights.fill(0.0);
    }

    /// Borrow the full sample buffer, U-major.
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Fold a signed coordinate into `0..segments`.
    ///
    /// Euclidean remainder never goes negative, so any offset wraps
    /// correctly, not just those within one lattice span of the edges.
    fn wrap(coord: i64, segments: u32) -> usize {
        coord.rem_euclid(i64::from(segments)) as usize
    }

    /// Linear offset of a wrapped `(u, v)` pair; the V count is the stride.
    fn index(&self, u: usize, v: usize) -> usize {
        u * self.segments_v as usize + v
    }

    fn sample_count(segments_u: u32, segments_v: u32) -> Result<usize, GridError> {
        if segments_u == 0 || segments_v == 0 {
            return Err(GridError::ZeroSegments);
        }
        (segments_u as usize)
            .checked_mul(segments_v as usize)
            .ok_or(GridError::Allocation {
                segments_u,
                segments_v,
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Grid error types.

/// Errors that can occur when constructing a [`crate::HeightGrid`].
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// The height buffer could not be allocated.
    #[error("failed to allocate a {segments_u}x{segments_v} height buffer")]
    Allocation { segments_u: u32, segments_v: u32 },

    /// A caller-supplied buffer does not match the lattice size.
    #[error("height buffer holds {actual} samples but the lattice needs exactly {expected}")]
    BufferSize { expected: usize, actual: usize },

    /// A lattice axis has zero segments.
    #[error("a height grid needs at least one segment per axis")]
    ZeroSegments,
}

//! Heightfield mesh construction.
//!
//! Converts a finished toroidal heightfield into a vertex sheet with quad
//! topology and per-vertex texture coordinates, with optional cooperative
//! cancellation between rows.

mod heightfield_mesh;
mod vertex;

pub use heightfield_mesh::HeightfieldMesh;
pub use vertex::TerrainVertex;

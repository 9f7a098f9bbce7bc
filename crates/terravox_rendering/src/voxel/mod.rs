//! Voxel surface extraction.
//!
//! Naive per-voxel face culling: each visible face is emitted on its own,
//! coplanar neighbors are never merged.

mod mesher;
mod palette;

pub use mesher::{Face, MeshBuffers, MeshVertex, SurfaceMesher};
pub use palette::{voxel_color, PALETTE};

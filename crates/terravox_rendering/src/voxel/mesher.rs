//! Surface Mesher - per-voxel face culling over a dense grid
//!
//! Scans the grid in storage order (`x`, then `y`, then `z`). For every
//! active voxel each of the six faces is tested against its neighbor: an
//! inactive or out-of-grid neighbor exposes the face.
//!
//! Each exposed face appends 4 positions, 4 uvs, 4 copies of the voxel's
//! color and 2 triangles `(n-4, n-3, n-2)`, `(n-4, n-2, n-1)` where `n` is
//! the vertex count after the append.

use std::time::Instant;

use bytemuck::{Pod, Zeroable};
use terravox_procedural::{VoxelGrid, VoxelType};

use super::palette::voxel_color;

// =============================================================================
// FACES
// =============================================================================

/// One of the six axis-aligned voxel faces, in emission order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Face {
    /// +Y
    Top = 0,
    /// -Y
    Bottom = 1,
    /// -X
    Left = 2,
    /// +X
    Right = 3,
    /// +Z
    Front = 4,
    /// -Z
    Back = 5,
}

impl Face {
    /// All faces in the order they are emitted for a voxel.
    pub const ALL: [Self; 6] = [
        Self::Top,
        Self::Bottom,
        Self::Left,
        Self::Right,
        Self::Front,
        Self::Back,
    ];

    /// Grid offset of the neighbor that can hide this face.
    #[must_use]
    pub const fn offset(self) -> [i64; 3] {
        match self {
            Self::Top => [0, 1, 0],
            Self::Bottom => [0, -1, 0],
            Self::Left => [-1, 0, 0],
            Self::Right => [1, 0, 0],
            Self::Front => [0, 0, 1],
            Self::Back => [0, 0, -1],
        }
    }

    /// Outward unit normal.
    #[must_use]
    pub fn normal(self) -> [f32; 3] {
        self.offset().map(|c| c as f32)
    }

    /// Quad corners relative to the voxel's minimum corner.
    #[must_use]
    pub const fn corners(self) -> [[f32; 3]; 4] {
        match self {
            Self::Top => [[0.0, 1.0, 0.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 0.0]],
            Self::Bottom => [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 1.0], [0.0, 0.0, 1.0]],
            Self::Left => [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [0.0, 1.0, 0.0]],
            Self::Right => [[1.0, 0.0, 1.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0]],
            Self::Front => [[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0]],
            Self::Back => [[1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]],
        }
    }

    /// Texture coordinates matching [`Face::corners`].
    #[must_use]
    pub const fn uvs(self) -> [[f32; 2]; 4] {
        match self {
            Self::Top => [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
            Self::Bottom => [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]],
            Self::Left => [[0.0, 0.0], [0.0, 0.0], [0.0, 1.0], [0.0, 1.0]],
            Self::Right => [[1.0, 0.0], [1.0, 1.0], [1.0, 1.0], [1.0, 0.0]],
            Self::Front => [[0.0, 1.0], [0.0, 1.0], [1.0, 1.0], [1.0, 1.0]],
            Self::Back => [[0.0, 0.0], [1.0, 0.0], [1.0, 0.0], [0.0, 0.0]],
        }
    }
}

// =============================================================================
// VERTEX FORMAT
// =============================================================================

/// Interleaved vertex for GPU upload.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Grid-local position [x, y, z]
    pub position: [f32; 3],
    /// Face normal [nx, ny, nz]
    pub normal: [f32; 3],
    /// Texture coordinates [u, v]
    pub uv: [f32; 2],
    /// RGBA color from the voxel palette
    pub color: [f32; 4],
}

// =============================================================================
// MESH BUFFERS
// =============================================================================

/// Parallel vertex streams plus the triangle index list.
///
/// `vertices`, `normals`, `uvs` and `colors` always have the same length, a
/// multiple of 4. `indices` holds 6 entries per face.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffers {
    /// Vertex positions.
    pub vertices: Vec<[f32; 3]>,
    /// Per-vertex face normals.
    pub normals: Vec<[f32; 3]>,
    /// Per-vertex texture coordinates.
    pub uvs: Vec<[f32; 2]>,
    /// Per-vertex colors.
    pub colors: Vec<[f32; 4]>,
    /// Triangle list, 3 indices per triangle.
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    /// Returns true if no face was emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of emitted quads.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex positions as raw bytes.
    #[must_use]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Indices as raw bytes.
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Builds interleaved vertices from the parallel streams.
    #[must_use]
    pub fn interleaved(&self) -> Vec<MeshVertex> {
        self.vertices
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .zip(&self.colors)
            .map(|(((&position, &normal), &uv), &color)| MeshVertex {
                position,
                normal,
                uv,
                color,
            })
            .collect()
    }

    /// Appends one quad and its two triangles.
    fn push_face(&mut self, [x, y, z]: [usize; 3], face: Face, kind: VoxelType) {
        let origin = [x as f32, y as f32, z as f32];
        let color = voxel_color(kind);
        let normal = face.normal();

        for (corner, uv) in face.corners().into_iter().zip(face.uvs()) {
            self.vertices.push([
                origin[0] + corner[0],
                origin[1] + corner[1],
                origin[2] + corner[2],
            ]);
            self.normals.push(normal);
            self.uvs.push(uv);
            self.colors.push(color);
        }

        let n = self.vertices.len() as u32;
        self.indices
            .extend_from_slice(&[n - 4, n - 3, n - 2, n - 4, n - 2, n - 1]);
    }
}

// =============================================================================
// MESHER
// =============================================================================

/// Per-voxel face-culling mesher.
#[derive(Clone, Copy, Debug, Default)]
pub struct SurfaceMesher;

impl SurfaceMesher {
    /// Creates a mesher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the faces of the voxel at `pos` that are exposed.
    ///
    /// Empty for inactive voxels.
    pub fn visible_faces(grid: &VoxelGrid, pos: [usize; 3]) -> impl Iterator<Item = Face> + '_ {
        let dims = grid.dims();
        let active = grid.at(pos).active;
        Face::ALL.into_iter().filter(move |face| {
            active
                && dims
                    .offset(pos, face.offset())
                    .map_or(true, |neighbor| !grid.at(neighbor).active)
        })
    }

    /// Extracts the visible surface of `grid`.
    #[must_use]
    pub fn extract(&self, grid: &VoxelGrid) -> MeshBuffers {
        let start = Instant::now();
        let mut mesh = MeshBuffers::default();

        for (pos, voxel) in grid.iter() {
            if !voxel.active {
                continue;
            }
            for face in Self::visible_faces(grid, pos) {
                mesh.push_face(pos, face, voxel.kind);
            }
        }

        tracing::debug!(
            "Meshed {} faces ({} vertices, {} triangles) in {:?}",
            mesh.face_count(),
            mesh.vertex_count(),
            mesh.triangle_count(),
            start.elapsed()
        );
        mesh
    }
}

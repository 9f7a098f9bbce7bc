//! Vertex colors per voxel type.
//!
//! A fixed RGBA table indexed by the `VoxelType` discriminant. Types
//! without a dedicated color (sand, air) render white.

use terravox_procedural::VoxelType;

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// RGBA color per voxel type, in discriminant order.
pub const PALETTE: [[f32; 4]; 10] = [
    WHITE,                // Air
    [0.0, 1.0, 0.0, 1.0], // Grass
    [0.5, 0.5, 0.5, 1.0], // Stone
    [0.6, 0.4, 0.0, 1.0], // Dirt
    [0.0, 0.0, 1.0, 1.0], // Water
    WHITE,                // Snow
    WHITE,                // Sand
    [0.8, 0.65, 0.0, 1.0], // DryGrass
    [0.0, 0.4, 0.3, 1.0], // TemperateGrass
    [0.82, 1.0, 0.0, 1.0], // SavannaGrass
];

/// Returns the vertex color for a voxel type.
#[inline]
#[must_use]
pub const fn voxel_color(kind: VoxelType) -> [f32; 4] {
    PALETTE[kind as usize]
}

//! # TERRAVOX Rendering
//!
//! Converts a finished [`VoxelGrid`] into triangle buffers.
//!
//! ## Architecture
//!
//! ```text
//! VoxelGrid ── SurfaceMesher ── MeshBuffers ─┬─ vertices / uvs / colors / indices
//!                   │                         └─ interleaved MeshVertex (Pod)
//!              voxel palette
//! ```
//!
//! Every exposed face of every active voxel becomes one quad. Faces on the
//! grid boundary are always exposed.
//!
//! [`VoxelGrid`]: terravox_procedural::VoxelGrid

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]
#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]

pub mod voxel;

pub use voxel::{voxel_color, Face, MeshBuffers, MeshVertex, SurfaceMesher, PALETTE};

//! # TERRAVOX
//!
//! Deterministic voxel world generation, end to end.
//!
//! ## Pipeline
//!
//! ```text
//! GenerationConfig
//!       │ validate
//!       ▼
//! ElevationModel ──► VoxelGrid::build ──► WaterCarver ──► SurfaceMesher
//!                     (column by column)   (small, then     (final grid
//!                                           large bodies)    only)
//! ```
//!
//! ## Modules
//!
//! - `pipeline`: stage orchestration and the generation report

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod pipeline;

// Re-export the stages
pub use terravox_procedural as procedural;
pub use terravox_rendering as rendering;

pub use pipeline::{generate, GeneratedWorld, GenerationReport, WorldGenerator};

//! # TERRAVOX Procedural Generation
//!
//! Deterministic voxel world generation from a seed and a configuration.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed and config always produce the same grid
//! 2. **Column-independent**: Every `(x, z)` column is generated on its own
//! 3. **Validated up front**: Bad configuration fails before allocation
//!
//! ## Core Components
//!
//! - `PerlinNoise`: seeded 2D gradient noise with fractal sampling
//! - `SplineCurve`: natural cubic remapping of noise values
//! - `BiomeSelector`: surface materials from elevation and temperature
//! - `ElevationModel`: noise channels + splines → voxel columns
//! - `VoxelGrid`: dense `[x][y][z]` occupancy grid
//! - `WaterCarver`: volume-bounded flood fill lakes
//!
//! ## Example
//!
//! ```rust
//! use terravox_procedural::{ElevationModel, GenerationConfig, VoxelGrid, WaterCarver, WorldSeed};
//!
//! let mut config = GenerationConfig::default();
//! config.world.size_x = 16;
//! config.world.size_z = 16;
//!
//! let model = ElevationModel::new(&config).unwrap();
//! let mut grid = VoxelGrid::build(config.dimensions().unwrap(), &model);
//!
//! let seed = WorldSeed::new(config.seed).derive(WorldSeed::WATER);
//! let lakes = WaterCarver::new(seed, config.water.max_attempts).carve_all(&mut grid, &config.water);
//! assert!(lakes.placed.len() + lakes.omitted > 0);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::module_name_repetitions
)]

pub mod biome;
pub mod config;
pub mod elevation;
pub mod error;
pub mod grid;
pub mod noise;
pub mod spline;
pub mod water;

pub use biome::{Biome, BiomePainter, BiomeSelector};
pub use config::{
    BiomeConfig, GenerationConfig, NoiseParams, SplineConfig, WaterBodyConfig, WaterConfig,
    WorldConfig,
};
pub use elevation::{ColumnSample, ElevationModel};
pub use error::{GenResult, GenerationError};
pub use grid::{GridDimensions, Voxel, VoxelGrid, VoxelType};
pub use noise::{NoiseStats, PerlinNoise, WorldSeed};
pub use spline::SplineCurve;
pub use water::{fill_water_body, WaterBody, WaterCarver, WaterSummary};

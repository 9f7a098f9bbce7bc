//! # Elevation Model
//!
//! Turns four noise channels into voxel columns.
//!
//! ```text
//! stone noise ──spline──┐
//!                       ├─ final value ── ×100 ── total height
//! mountain noise ─spline┘        │
//! dirt noise ──spline── dirt depth ── stone height = total − dirt
//! temperature noise ─────────────┴── BiomeSelector ── painter
//! ```
//!
//! Each column is stone up to the stone height, the biome's soil up to the
//! total height, one cover cell at the total height, and air above.

use crate::biome::{Biome, BiomePainter, BiomeSelector};
use crate::config::{GenerationConfig, NoiseParams};
use crate::error::GenResult;
use crate::grid::VoxelType;
use crate::noise::{PerlinNoise, WorldSeed};
use crate::spline::SplineCurve;

/// A noise channel together with its fractal parameters.
#[derive(Clone)]
struct NoiseChannel {
    noise: PerlinNoise,
    params: NoiseParams,
}

impl NoiseChannel {
    fn new(seed: WorldSeed, params: NoiseParams) -> Self {
        Self {
            noise: PerlinNoise::new(seed, params.scale),
            params,
        }
    }

    #[inline]
    fn enabled(&self) -> bool {
        self.params.octaves > 0
    }

    #[inline]
    fn sample(&self, x: f64, z: f64) -> f64 {
        self.noise.fractal(
            x,
            z,
            self.params.octaves,
            self.params.persistence,
            self.params.lacunarity,
        )
    }
}

/// Every intermediate signal computed for one column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnSample {
    /// Stone noise remapped through the stone spline.
    pub stone_value: f64,
    /// Mountain mass, never negative.
    pub mountain_value: f64,
    /// `stone_value + mountain_value`.
    pub final_value: f64,
    /// Y of the cover cell: `floor(final_value * 100)`.
    pub total_height: i64,
    /// Depth of the soil layer from the dirt spline.
    pub dirt_height: i64,
    /// Highest stone Y: `total_height - dirt_height`.
    pub stone_height: i64,
    /// Raw temperature noise; `None` when temperature octaves are 0.
    pub temperature: Option<f64>,
    /// Selected biome.
    pub biome: Biome,
}

impl ColumnSample {
    /// Material at height `y` for this column.
    ///
    /// The comparison order matters: when the dirt depth is negative the
    /// stone height exceeds the total height and no soil or cover appears.
    #[inline]
    #[must_use]
    pub fn voxel_at(&self, y: i64) -> VoxelType {
        let painter: BiomePainter = self.biome.painter();
        if y <= self.stone_height {
            VoxelType::Stone
        } else if y < self.total_height {
            painter.soil_material
        } else if y == self.total_height {
            painter.cover_material
        } else {
            VoxelType::Air
        }
    }
}

/// Column generator built once from a [`GenerationConfig`].
///
/// Immutable after construction; sampling only reads shared state.
#[derive(Clone)]
pub struct ElevationModel {
    stone: NoiseChannel,
    mountain: NoiseChannel,
    dirt: NoiseChannel,
    temperature: NoiseChannel,
    stone_spline: SplineCurve,
    mountain_spline: SplineCurve,
    dirt_spline: SplineCurve,
    biomes: BiomeSelector,
    height: usize,
}

impl ElevationModel {
    /// Scales a final value into a voxel height.
    pub const HEIGHT_MULTIPLIER: f64 = 100.0;

    /// Dirt depth is single-octave noise whatever the config says.
    pub const DIRT_OCTAVES: u32 = 1;

    /// Samples drawn for the stone noise diagnostics.
    const STATS_SAMPLES: usize = 1000;

    /// Builds the model: noise channels, splines and biome thresholds.
    ///
    /// # Errors
    ///
    /// Fails on invalid configuration (see [`GenerationConfig::validate`]).
    pub fn new(config: &GenerationConfig) -> GenResult<Self> {
        config.validate()?;

        let seed = WorldSeed::new(config.seed);
        let splines = &config.splines;
        let stone_points = if config.smooth_terrain {
            &splines.stone_smooth
        } else {
            &splines.stone
        };

        let model = Self {
            stone: NoiseChannel::new(seed.derive(WorldSeed::STONE), config.terrain),
            mountain: NoiseChannel::new(seed.derive(WorldSeed::MOUNTAIN), config.mountain),
            dirt: NoiseChannel::new(
                seed.derive(WorldSeed::DIRT),
                NoiseParams {
                    octaves: Self::DIRT_OCTAVES,
                    ..config.dirt
                },
            ),
            temperature: NoiseChannel::new(
                seed.derive(WorldSeed::TEMPERATURE),
                config.temperature,
            ),
            stone_spline: SplineCurve::from_pairs("stone", stone_points)?,
            mountain_spline: SplineCurve::from_pairs("mountain", &splines.mountain)?,
            dirt_spline: SplineCurve::from_pairs("dirt", &splines.dirt)?,
            biomes: BiomeSelector::new(
                config.biomes.middle_temperature,
                config.biomes.high_temperature,
            )?,
            height: config.world.height,
        };

        let stats = model
            .stone
            .noise
            .sample_stats(Self::STATS_SAMPLES, config.seed);
        tracing::debug!(
            "Stone noise stats over {} samples: min={:.4} max={:.4} mean={:.4}",
            stats.samples,
            stats.min,
            stats.max,
            stats.mean
        );

        Ok(model)
    }

    /// Column height in cells.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// The biome selector in use.
    #[must_use]
    pub const fn biomes(&self) -> &BiomeSelector {
        &self.biomes
    }

    /// Computes every signal for the column at `(x, z)`.
    ///
    /// Returns `None` when terrain octaves are 0 (the empty-world mode).
    #[must_use]
    pub fn sample_column(&self, x: i64, z: i64) -> Option<ColumnSample> {
        if !self.stone.enabled() {
            return None;
        }
        let (fx, fz) = (x as f64, z as f64);

        let stone_value = self.stone_spline.interpolate(self.stone.sample(fx, fz));
        let mountain_value = if self.mountain.enabled() {
            self.mountain_spline
                .interpolate(self.mountain.sample(fx, fz))
                .max(0.0)
        } else {
            0.0
        };

        let final_value = stone_value + mountain_value;
        let total_height = (final_value * Self::HEIGHT_MULTIPLIER).floor() as i64;
        let dirt_height = self.dirt_spline.interpolate(self.dirt.sample(fx, fz)) as i64;
        let stone_height = total_height - dirt_height;

        let temperature = self
            .temperature
            .enabled()
            .then(|| self.temperature.sample(fx, fz));
        // No temperature matches no band
        let biome = self.biomes.pick_biome(
            final_value,
            mountain_value,
            temperature.unwrap_or(f64::NAN),
        );

        Some(ColumnSample {
            stone_value,
            mountain_value,
            final_value,
            total_height,
            dirt_height,
            stone_height,
            temperature,
            biome,
        })
    }

    /// Writes the column at `(x, z)` into `out` (one entry per y).
    pub fn fill_column(&self, x: i64, z: i64, out: &mut [VoxelType]) {
        match self.sample_column(x, z) {
            Some(sample) => {
                for (y, slot) in out.iter_mut().enumerate() {
                    *slot = sample.voxel_at(y as i64);
                }
            }
            None => out.fill(VoxelType::Air),
        }
    }

    /// Returns the column at `(x, z)`, `height` cells long.
    #[must_use]
    pub fn column_at(&self, x: i64, z: i64) -> Vec<VoxelType> {
        let mut column = vec![VoxelType::Air; self.height];
        self.fill_column(x, z, &mut column);
        column
    }
}

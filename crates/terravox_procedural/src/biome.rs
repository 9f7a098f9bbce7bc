//! # Biome Classification
//!
//! Determines the surface materials of a column from its terrain signals.
//!
//! Uses a fixed precedence chain over:
//! - Mountain mass (any positive value means rock)
//! - Elevation (separates mountains from high, snow-capped mountains)
//! - Temperature (from a separate noise channel)

use crate::error::{GenResult, GenerationError};
use crate::grid::VoxelType;

/// Soil and cover materials for a biome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BiomePainter {
    /// Material between the stone layer and the surface.
    pub soil_material: VoxelType,
    /// Material of the single surface cell.
    pub cover_material: VoxelType,
}

impl BiomePainter {
    /// Creates a painter from its two materials.
    #[must_use]
    pub const fn new(soil_material: VoxelType, cover_material: VoxelType) -> Self {
        Self {
            soil_material,
            cover_material,
        }
    }
}

/// Biome types in the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Biome {
    /// Dirt under grass (the default)
    Forest = 0,
    /// Bare rock
    Mountain = 1,
    /// Rock under snow (elevation > 1.2)
    HighMountain = 2,
    /// Dirt under dry grass (hottest)
    Desert = 3,
    /// Dirt under snow (coldest)
    Snow = 4,
    /// Dirt under temperate grass (cool)
    Temperate = 5,
    /// Dirt under savanna grass (warm)
    Savanna = 6,
}

impl Biome {
    /// Every biome, in discriminant order.
    pub const ALL: [Self; 7] = [
        Self::Forest,
        Self::Mountain,
        Self::HighMountain,
        Self::Desert,
        Self::Snow,
        Self::Temperate,
        Self::Savanna,
    ];

    /// Returns the painter for this biome.
    #[must_use]
    pub const fn painter(self) -> BiomePainter {
        PAINTERS[self as usize]
    }
}

/// Painter table, indexed by `Biome` discriminant.
pub const PAINTERS: [BiomePainter; 7] = [
    BiomePainter::new(VoxelType::Dirt, VoxelType::Grass),
    BiomePainter::new(VoxelType::Stone, VoxelType::Stone),
    BiomePainter::new(VoxelType::Stone, VoxelType::Snow),
    BiomePainter::new(VoxelType::Dirt, VoxelType::DryGrass),
    BiomePainter::new(VoxelType::Dirt, VoxelType::Snow),
    BiomePainter::new(VoxelType::Dirt, VoxelType::TemperateGrass),
    BiomePainter::new(VoxelType::Dirt, VoxelType::SavannaGrass),
];

/// Biome classifier driven by temperature thresholds.
///
/// Pure: holds only the two thresholds, validated at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomeSelector {
    /// Above this (or below its negation) a column is warm/cool.
    middle_threshold: f64,
    /// Above this (or below its negation) a column is hot/cold.
    high_threshold: f64,
}

impl BiomeSelector {
    /// Elevation above which mountains are capped with snow.
    pub const HIGH_MOUNTAIN_ELEVATION: f64 = 1.2;

    /// Creates a selector.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidThresholds`] unless
    /// `middle_threshold < high_threshold`.
    pub fn new(middle_threshold: f64, high_threshold: f64) -> GenResult<Self> {
        // Also rejects NaN
        if !(middle_threshold < high_threshold) {
            return Err(GenerationError::InvalidThresholds {
                middle: middle_threshold,
                high: high_threshold,
            });
        }
        Ok(Self {
            middle_threshold,
            high_threshold,
        })
    }

    /// Returns the middle temperature threshold.
    #[must_use]
    pub const fn middle_threshold(&self) -> f64 {
        self.middle_threshold
    }

    /// Returns the high temperature threshold.
    #[must_use]
    pub const fn high_threshold(&self) -> f64 {
        self.high_threshold
    }

    /// Classifies a column. First matching rule wins.
    ///
    /// A NaN temperature falls in no band and yields [`Biome::Forest`]
    /// unless a mountain rule matches.
    #[must_use]
    pub fn pick_biome(&self, elevation: f64, mountain_value: f64, temperature: f64) -> Biome {
        if mountain_value > 0.0 && elevation <= Self::HIGH_MOUNTAIN_ELEVATION {
            Biome::Mountain
        } else if mountain_value > 0.0 {
            Biome::HighMountain
        } else if temperature > self.high_threshold {
            Biome::Desert
        } else if temperature > self.middle_threshold {
            Biome::Savanna
        } else if temperature < -self.high_threshold {
            Biome::Snow
        } else if temperature < -self.middle_threshold {
            Biome::Temperate
        } else {
            Biome::Forest
        }
    }

    /// Classifies a column and returns its painter directly.
    #[must_use]
    pub fn pick_painter(&self, elevation: f64, mountain_value: f64, temperature: f64) -> BiomePainter {
        self.pick_biome(elevation, mountain_value, temperature).painter()
    }
}

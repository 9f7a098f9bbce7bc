//! # Generation Configuration
//!
//! Every tunable of the pipeline in one plain value, loaded from TOML.
//!
//! ```toml
//! seed = 1337
//! smooth_terrain = false
//!
//! [world]
//! size_x = 128
//! size_z = 128
//! height = 200
//!
//! [terrain]
//! scale = 0.01
//! octaves = 4
//!
//! [biomes]
//! middle_temperature = 0.15
//! high_temperature = 0.3
//!
//! [water.small]
//! count = 8
//! min_volume = 50
//! max_volume = 2000
//! ```
//!
//! Missing sections and fields fall back to [`GenerationConfig::default`].
//! The config is passed by reference into each component; nothing reads it
//! from global state.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GenResult, GenerationError};
use crate::grid::GridDimensions;
use crate::spline::SplineCurve;

/// Grid extents in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Cells along X.
    pub size_x: usize,
    /// Cells along Z.
    pub size_z: usize,
    /// Cells along Y (vertical).
    pub height: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            size_x: 128,
            size_z: 128,
            height: 200,
        }
    }
}

/// Fractal parameters for one noise channel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    /// Input coordinate multiplier.
    pub scale: f64,
    /// Number of octaves; 0 disables the channel where allowed.
    pub octaves: u32,
    /// Amplitude multiplier per octave.
    pub persistence: f64,
    /// Frequency multiplier per octave.
    pub lacunarity: f64,
}

impl NoiseParams {
    /// Creates a parameter set.
    #[must_use]
    pub const fn new(scale: f64, octaves: u32, persistence: f64, lacunarity: f64) -> Self {
        Self {
            scale,
            octaves,
            persistence,
            lacunarity,
        }
    }

    fn validate(&self, field: &'static str) -> GenResult<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(GenerationError::InvalidNoise {
                field,
                reason: "scale must be finite and positive",
            });
        }
        if !self.persistence.is_finite() || !self.lacunarity.is_finite() {
            return Err(GenerationError::InvalidNoise {
                field,
                reason: "persistence and lacunarity must be finite",
            });
        }
        Ok(())
    }
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self::new(0.01, 4, 0.5, 2.0)
    }
}

/// Spline control points as `[x, y]` pairs, x strictly increasing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplineConfig {
    /// Stone noise → stone elevation (rugged terrain).
    pub stone: Vec<[f64; 2]>,
    /// Stone noise → stone elevation (used when `smooth_terrain` is set).
    pub stone_smooth: Vec<[f64; 2]>,
    /// Mountain noise → mountain mass.
    pub mountain: Vec<[f64; 2]>,
    /// Dirt noise → soil depth in cells.
    pub dirt: Vec<[f64; 2]>,
}

impl Default for SplineConfig {
    fn default() -> Self {
        Self {
            stone: vec![
                [-0.6, 0.2],
                [-0.2, 0.3],
                [-0.1, 0.5],
                [0.0, 0.5],
                [0.1, 0.55],
                [0.2, 0.7],
                [0.3, 0.6],
                [0.6, 0.4],
            ],
            stone_smooth: vec![[-0.6, 0.3], [0.0, 0.7], [0.6, 0.3]],
            mountain: vec![
                [-1.0, -0.1],
                [0.1, -0.1],
                [0.3, 0.5],
                [0.35, 0.3],
                [0.5, 0.1],
                [0.7, 1.5],
            ],
            dirt: vec![[-0.6, 5.0], [0.0, 7.0], [0.6, 12.0]],
        }
    }
}

/// Temperature thresholds for biome selection.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeConfig {
    /// Warm/cool boundary (must be below `high_temperature`).
    pub middle_temperature: f64,
    /// Hot/cold boundary.
    pub high_temperature: f64,
}

impl Default for BiomeConfig {
    fn default() -> Self {
        Self {
            middle_temperature: 0.15,
            high_temperature: 0.3,
        }
    }
}

/// One class of water bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterBodyConfig {
    /// How many bodies to attempt.
    pub count: usize,
    /// Smallest acceptable volume in cells.
    pub min_volume: usize,
    /// Largest acceptable volume in cells.
    pub max_volume: usize,
}

impl WaterBodyConfig {
    /// Creates a water body class.
    #[must_use]
    pub const fn new(count: usize, min_volume: usize, max_volume: usize) -> Self {
        Self {
            count,
            min_volume,
            max_volume,
        }
    }
}

impl Default for WaterBodyConfig {
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}

/// Lake carving settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterConfig {
    /// Skip water carving entirely.
    pub no_water: bool,
    /// Random seed points tried per body before giving up.
    pub max_attempts: u32,
    /// Small bodies, carved first.
    pub small: WaterBodyConfig,
    /// Large bodies, carved after the small ones.
    pub large: WaterBodyConfig,
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self {
            no_water: false,
            max_attempts: 1000,
            small: WaterBodyConfig::new(8, 50, 2_000),
            large: WaterBodyConfig::new(2, 2_000, 40_000),
        }
    }
}

/// Complete generation configuration.
///
/// Immutable once generation starts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Global seed; every noise channel and the water RNG derive from it.
    pub seed: u64,
    /// Use the smooth stone spline instead of the rugged one.
    pub smooth_terrain: bool,
    /// Grid extents.
    pub world: WorldConfig,
    /// Stone (terrain) noise.
    pub terrain: NoiseParams,
    /// Mountain noise.
    pub mountain: NoiseParams,
    /// Dirt depth noise. Always sampled with a single octave; `octaves`,
    /// `persistence` and `lacunarity` are ignored.
    pub dirt: NoiseParams,
    /// Temperature noise.
    pub temperature: NoiseParams,
    /// Spline control points.
    pub splines: SplineConfig,
    /// Biome thresholds.
    pub biomes: BiomeConfig,
    /// Water carving.
    pub water: WaterConfig,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: 1337,
            smooth_terrain: false,
            world: WorldConfig::default(),
            terrain: NoiseParams::new(0.01, 4, 0.5, 2.0),
            mountain: NoiseParams::new(0.005, 3, 0.5, 2.0),
            dirt: NoiseParams::new(0.02, 1, 0.5, 2.0),
            temperature: NoiseParams::new(0.004, 2, 0.5, 2.0),
            splines: SplineConfig::default(),
            biomes: BiomeConfig::default(),
            water: WaterConfig::default(),
        }
    }
}

impl GenerationConfig {
    /// Parses a configuration from TOML text and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::ConfigParse`] on malformed TOML, or any
    /// validation error.
    pub fn from_toml_str(text: &str) -> GenResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| GenerationError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::ConfigIo`] if the file cannot be read,
    /// otherwise the same errors as [`GenerationConfig::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> GenResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| GenerationError::ConfigIo {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Serializes the configuration back to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::ConfigParse`] if serialization fails.
    pub fn to_toml_string(&self) -> GenResult<String> {
        toml::to_string_pretty(self).map_err(|e| GenerationError::ConfigParse(e.to_string()))
    }

    /// Grid extents as validated dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidDimensions`] when any extent is 0.
    pub fn dimensions(&self) -> GenResult<GridDimensions> {
        GridDimensions::new(self.world.size_x, self.world.height, self.world.size_z)
    }

    /// Returns true when the terrain channel is disabled (all-air world).
    #[must_use]
    pub const fn is_empty_world(&self) -> bool {
        self.terrain.octaves == 0
    }

    /// Checks every invariant the pipeline relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> GenResult<()> {
        self.dimensions()?;

        self.terrain.validate("terrain")?;
        self.mountain.validate("mountain")?;
        self.dirt.validate("dirt")?;
        self.temperature.validate("temperature")?;

        check_spline("stone", &self.splines.stone)?;
        check_spline("stone_smooth", &self.splines.stone_smooth)?;
        check_spline("mountain", &self.splines.mountain)?;
        check_spline("dirt", &self.splines.dirt)?;

        let biomes = &self.biomes;
        // Also rejects NaN
        if !(biomes.middle_temperature < biomes.high_temperature) {
            return Err(GenerationError::InvalidThresholds {
                middle: biomes.middle_temperature,
                high: biomes.high_temperature,
            });
        }

        for (class, body) in [("small", &self.water.small), ("large", &self.water.large)] {
            if body.min_volume > body.max_volume {
                return Err(GenerationError::InvalidWaterVolume {
                    class,
                    min: body.min_volume,
                    max: body.max_volume,
                });
            }
        }
        Ok(())
    }
}

/// Validates control points by fitting them once.
fn check_spline(name: &'static str, points: &[[f64; 2]]) -> GenResult<()> {
    SplineCurve::from_pairs(name, points).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(GenerationConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = GenerationConfig::from_toml_str(
            r#"
            seed = 99

            [world]
            size_x = 16

            [water.small]
            count = 3
            min_volume = 1
            max_volume = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, 99);
        assert_eq!(config.world.size_x, 16);
        assert_eq!(config.world.height, WorldConfig::default().height);
        assert_eq!(config.water.small, WaterBodyConfig::new(3, 1, 10));
        assert_eq!(config.water.max_attempts, 1000);
        assert_eq!(config.splines, SplineConfig::default());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = GenerationConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(GenerationConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_thresholds_must_be_ordered() {
        let mut config = GenerationConfig::default();
        config.biomes.middle_temperature = 0.5;
        config.biomes.high_temperature = 0.5;

        assert_eq!(
            config.validate(),
            Err(GenerationError::InvalidThresholds {
                middle: 0.5,
                high: 0.5
            })
        );
    }

    #[test]
    fn test_empty_spline_rejected() {
        let result = GenerationConfig::from_toml_str(
            r"
            [splines]
            dirt = []
            ",
        );
        assert_eq!(result, Err(GenerationError::EmptySpline { name: "dirt" }));
    }

    #[test]
    fn test_unsorted_spline_rejected() {
        let mut config = GenerationConfig::default();
        config.splines.mountain = vec![[0.0, 1.0], [0.5, 1.0], [0.2, 0.0]];
        assert_eq!(
            config.validate(),
            Err(GenerationError::UnsortedSpline {
                name: "mountain",
                index: 2
            })
        );
    }

    #[test]
    fn test_invalid_noise_and_dimensions() {
        let mut config = GenerationConfig::default();
        config.terrain.scale = 0.0;
        assert!(matches!(
            config.validate(),
            Err(GenerationError::InvalidNoise { field: "terrain", .. })
        ));

        let mut config = GenerationConfig::default();
        config.dirt.scale = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(GenerationError::InvalidNoise { field: "dirt", .. })
        ));

        let mut config = GenerationConfig::default();
        config.dirt.octaves = 0;
        assert_eq!(config.validate(), Ok(()), "dirt octaves are not read");

        let mut config = GenerationConfig::default();
        config.world.height = 0;
        assert!(matches!(
            config.validate(),
            Err(GenerationError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_inverted_water_volume_rejected() {
        let mut config = GenerationConfig::default();
        config.water.large = WaterBodyConfig::new(1, 100, 10);
        assert_eq!(
            config.validate(),
            Err(GenerationError::InvalidWaterVolume {
                class: "large",
                min: 100,
                max: 10
            })
        );
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            GenerationConfig::from_toml_str("seed = \"not a number\""),
            Err(GenerationError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            GenerationConfig::from_toml_file("/definitely/not/here.toml"),
            Err(GenerationError::ConfigIo { .. })
        ));
    }

    #[test]
    fn test_zero_terrain_octaves_is_allowed() {
        let mut config = GenerationConfig::default();
        config.terrain.octaves = 0;
        assert_eq!(config.validate(), Ok(()));
        assert!(config.is_empty_world());
    }
}

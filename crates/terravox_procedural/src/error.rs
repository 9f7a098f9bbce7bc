//! # Generation Error Types
//!
//! All errors that can occur while configuring or querying the generator.

use thiserror::Error;

/// Errors that can occur in the generation pipeline.
///
/// Every variant except [`GenerationError::OutOfBounds`] is fatal and is
/// raised at construction time, before any grid is allocated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// A spline was given no control points.
    #[error("spline `{name}` has no control points")]
    EmptySpline {
        /// Which spline.
        name: &'static str,
    },

    /// A spline needs at least two points to interpolate.
    #[error("spline `{name}` needs at least 2 control points, got {count}")]
    SplineTooShort {
        /// Which spline.
        name: &'static str,
        /// Number of points supplied.
        count: usize,
    },

    /// Control point x values must be strictly increasing.
    #[error("spline `{name}` x values must be strictly increasing (point {index})")]
    UnsortedSpline {
        /// Which spline.
        name: &'static str,
        /// Index of the first offending point.
        index: usize,
    },

    /// A control point coordinate was NaN or infinite.
    #[error("spline `{name}` has a non-finite control point at index {index}")]
    NonFiniteSpline {
        /// Which spline.
        name: &'static str,
        /// Index of the offending point.
        index: usize,
    },

    /// Biome temperature thresholds are not ordered.
    #[error("middle temperature threshold {middle} must be below high threshold {high}")]
    InvalidThresholds {
        /// Middle threshold.
        middle: f64,
        /// High threshold.
        high: f64,
    },

    /// Grid dimensions must all be non-zero.
    #[error("invalid grid dimensions {size_x}x{height}x{size_z}")]
    InvalidDimensions {
        /// Width along X.
        size_x: usize,
        /// Height along Y.
        height: usize,
        /// Depth along Z.
        size_z: usize,
    },

    /// Noise parameters for a field are unusable.
    #[error("invalid noise parameters for `{field}`: {reason}")]
    InvalidNoise {
        /// Which noise field.
        field: &'static str,
        /// What is wrong.
        reason: &'static str,
    },

    /// Water body volume bounds are inverted.
    #[error("water body `{class}` min volume {min} exceeds max volume {max}")]
    InvalidWaterVolume {
        /// Small or large.
        class: &'static str,
        /// Minimum volume.
        min: usize,
        /// Maximum volume.
        max: usize,
    },

    /// A voxel query fell outside the grid.
    #[error("voxel ({x}, {y}, {z}) is outside the {size_x}x{height}x{size_z} grid")]
    OutOfBounds {
        /// Queried X.
        x: i64,
        /// Queried Y.
        y: i64,
        /// Queried Z.
        z: i64,
        /// Grid width.
        size_x: usize,
        /// Grid height.
        height: usize,
        /// Grid depth.
        size_z: usize,
    },

    /// Configuration file could not be read.
    #[error("failed to read configuration `{path}`: {message}")]
    ConfigIo {
        /// File path.
        path: String,
        /// Underlying I/O message.
        message: String,
    },

    /// Configuration file is not valid TOML for this schema.
    #[error("invalid configuration: {0}")]
    ConfigParse(String),
}

/// Result type for generation operations.
pub type GenResult<T> = Result<T, GenerationError>;

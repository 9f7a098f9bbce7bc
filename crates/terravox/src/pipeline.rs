//! # Generation Pipeline
//!
//! Runs the stages strictly in order. Water carving finishes before the
//! mesher reads the grid; the grid is never mutated after that.

use std::fmt;
use std::time::{Duration, Instant};

use terravox_procedural::{
    ElevationModel, GenResult, GenerationConfig, GridDimensions, VoxelGrid, VoxelType,
    WaterCarver, WaterSummary, WorldSeed,
};
use terravox_rendering::{MeshBuffers, SurfaceMesher};

/// Per-stage timings and counts for one generated world.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Grid extents `[size_x, height, size_z]`.
    pub dimensions: [usize; 3],
    /// Time spent building the grid.
    pub build_time: Duration,
    /// Time spent carving water.
    pub water_time: Duration,
    /// Time spent meshing.
    pub mesh_time: Duration,
    /// Active cells before water carving.
    pub solid_cells: usize,
    /// Water bodies committed.
    pub water_bodies_placed: usize,
    /// Water bodies omitted after exhausting their attempts.
    pub water_bodies_omitted: usize,
    /// Cells converted to water.
    pub water_cells: usize,
    /// Quads in the final mesh.
    pub face_count: usize,
}

impl GenerationReport {
    /// Sum of all stage timings.
    #[must_use]
    pub fn total_time(&self) -> Duration {
        self.build_time + self.water_time + self.mesh_time
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.dimensions;
        writeln!(f, "  Grid:          {x} x {y} x {z}")?;
        writeln!(f, "  Solid cells:   {}", self.solid_cells)?;
        writeln!(
            f,
            "  Water bodies:  {} placed, {} omitted ({} cells)",
            self.water_bodies_placed, self.water_bodies_omitted, self.water_cells
        )?;
        writeln!(f, "  Mesh faces:    {}", self.face_count)?;
        writeln!(f, "  Build:         {:?}", self.build_time)?;
        writeln!(f, "  Water:         {:?}", self.water_time)?;
        writeln!(f, "  Mesh:          {:?}", self.mesh_time)?;
        write!(f, "  Total:         {:?}", self.total_time())
    }
}

/// Output of a full generation run.
#[derive(Clone, Debug)]
pub struct GeneratedWorld {
    /// Final voxel grid, water included.
    pub grid: VoxelGrid,
    /// Surface mesh of the final grid.
    pub mesh: MeshBuffers,
    /// Lakes carved into the grid.
    pub water: WaterSummary,
    /// Timings and counts.
    pub report: GenerationReport,
}

/// Validated configuration plus the elevation model built from it.
#[derive(Clone)]
pub struct WorldGenerator {
    config: GenerationConfig,
    dims: GridDimensions,
    model: ElevationModel,
}

impl WorldGenerator {
    /// Validates `config` and builds the elevation model.
    ///
    /// # Errors
    ///
    /// Returns the first configuration error; nothing is allocated then.
    pub fn new(config: GenerationConfig) -> GenResult<Self> {
        let model = ElevationModel::new(&config)?;
        let dims = config.dimensions()?;
        Ok(Self {
            config,
            dims,
            model,
        })
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// The elevation model in use.
    #[must_use]
    pub const fn model(&self) -> &ElevationModel {
        &self.model
    }

    /// Runs every stage and returns the world with its report.
    #[must_use]
    pub fn generate(&self) -> GeneratedWorld {
        let config = &self.config;
        tracing::info!(
            "Generating {}x{}x{} world (seed {})",
            self.dims.size_x,
            self.dims.height,
            self.dims.size_z,
            config.seed
        );

        let start = Instant::now();
        let mut grid = VoxelGrid::build(self.dims, &self.model);
        let build_time = start.elapsed();
        let solid_cells = grid.active_count();

        let start = Instant::now();
        let water_seed = WorldSeed::new(config.seed).derive(WorldSeed::WATER);
        let water = WaterCarver::new(water_seed, config.water.max_attempts)
            .with_empty_world(config.is_empty_world())
            .carve_all(&mut grid, &config.water);
        let water_time = start.elapsed();

        let start = Instant::now();
        let mesh = SurfaceMesher::new().extract(&grid);
        let mesh_time = start.elapsed();

        let report = GenerationReport {
            dimensions: [self.dims.size_x, self.dims.height, self.dims.size_z],
            build_time,
            water_time,
            mesh_time,
            solid_cells,
            water_bodies_placed: water.placed.len(),
            water_bodies_omitted: water.omitted,
            water_cells: grid.count(VoxelType::Water),
            face_count: mesh.face_count(),
        };
        tracing::info!(
            "World ready: {} faces, {} water cells in {:?}",
            report.face_count,
            report.water_cells,
            report.total_time()
        );

        GeneratedWorld {
            grid,
            mesh,
            water,
            report,
        }
    }
}

/// Validates `config` and runs the whole pipeline.
///
/// # Errors
///
/// Returns the first configuration error.
pub fn generate(config: &GenerationConfig) -> GenResult<GeneratedWorld> {
    WorldGenerator::new(config.clone()).map(|generator| generator.generate())
}

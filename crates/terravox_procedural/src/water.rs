//! # Water Carving
//!
//! Randomized, volume-bounded flood fill that turns connected air pockets
//! into lakes.
//!
//! ## Per attempt
//!
//! 1. Pick a random column `(x, z)`.
//! 2. Scan down from the top for the first air cell resting on a solid one.
//!    That cell's `y` is the water table (`surface_y`).
//! 3. Breadth-first search over 6-connected air cells with `y <= surface_y`.
//! 4. Commit the visited cells as water if the volume lies in
//!    `[min_volume, max_volume]`, otherwise discard and retry.
//!
//! After `max_attempts` failed attempts the body is silently omitted.
//!
//! All attempts of one carver draw from a single seeded ChaCha stream, so
//! the outcome is a pure function of the seed and the grid it is given.

use std::collections::{HashSet, VecDeque};
use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{WaterBodyConfig, WaterConfig};
use crate::grid::{VoxelGrid, VoxelType};
use crate::noise::WorldSeed;

/// The six axis-aligned neighbor offsets.
const NEIGHBORS: [[i64; 3]; 6] = [
    [1, 0, 0],
    [-1, 0, 0],
    [0, 1, 0],
    [0, -1, 0],
    [0, 0, 1],
    [0, 0, -1],
];

/// A committed lake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaterBody {
    /// Cell the flood started from.
    pub origin: [usize; 3],
    /// Water table: no cell of the body lies above it.
    pub surface_y: usize,
    /// Number of cells converted to water.
    pub volume: usize,
    /// Attempts used, including the successful one.
    pub attempts: u32,
}

/// Outcome of carving every configured body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WaterSummary {
    /// Bodies that were placed, small ones first.
    pub placed: Vec<WaterBody>,
    /// Bodies omitted after exhausting their attempts.
    pub omitted: usize,
}

impl WaterSummary {
    /// Total cells converted to water.
    #[must_use]
    pub fn water_cells(&self) -> usize {
        self.placed.iter().map(|body| body.volume).sum()
    }
}

/// Stateful lake placer owning the water RNG stream.
#[derive(Clone, Debug)]
pub struct WaterCarver {
    rng: ChaCha8Rng,
    max_attempts: u32,
    empty_world: bool,
}

impl WaterCarver {
    /// Default attempt cap per body.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

    /// Creates a carver drawing from `seed`.
    #[must_use]
    pub fn new(seed: WorldSeed, max_attempts: u32) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed.value()),
            max_attempts,
            empty_world: false,
        }
    }

    /// Marks the grid as generated without terrain.
    ///
    /// In this mode the water table is the top of the grid and the volume
    /// bounds are ignored, so one fill floods every reachable cell.
    #[must_use]
    pub const fn with_empty_world(mut self, empty_world: bool) -> Self {
        self.empty_world = empty_world;
        self
    }

    /// Carves every body described by `config`: small ones, then large ones.
    pub fn carve_all(&mut self, grid: &mut VoxelGrid, config: &WaterConfig) -> WaterSummary {
        let mut summary = WaterSummary::default();
        if config.no_water {
            tracing::debug!("Water carving disabled");
            return summary;
        }

        let start = Instant::now();
        for (class, body) in [("small", config.small), ("large", config.large)] {
            self.carve_class(grid, class, body, &mut summary);
        }

        tracing::info!(
            "Carved {} water bodies ({} cells, {} omitted) in {:?}",
            summary.placed.len(),
            summary.water_cells(),
            summary.omitted,
            start.elapsed()
        );
        summary
    }

    fn carve_class(
        &mut self,
        grid: &mut VoxelGrid,
        class: &str,
        body: WaterBodyConfig,
        summary: &mut WaterSummary,
    ) {
        for n in 0..body.count {
            match self.fill(grid, body.min_volume, body.max_volume) {
                Some(placed) => {
                    tracing::debug!(
                        "Placed {} water body #{} at {:?}: volume {}, surface y={}, {} attempts",
                        class,
                        n,
                        placed.origin,
                        placed.volume,
                        placed.surface_y,
                        placed.attempts
                    );
                    summary.placed.push(placed);
                }
                None => {
                    tracing::warn!(
                        "Omitted {} water body #{} after {} attempts (volume {}..={})",
                        class,
                        n,
                        self.max_attempts,
                        body.min_volume,
                        body.max_volume
                    );
                    summary.omitted += 1;
                }
            }
        }
    }

    /// Tries to place one body with volume in `[min_volume, max_volume]`.
    ///
    /// Returns `None` when every attempt fails; the grid is then unchanged.
    pub fn fill(
        &mut self,
        grid: &mut VoxelGrid,
        min_volume: usize,
        max_volume: usize,
    ) -> Option<WaterBody> {
        let (min_volume, max_volume) = if self.empty_world {
            (0, usize::MAX)
        } else {
            (min_volume, max_volume)
        };

        let dims = grid.dims();
        for attempt in 1..=self.max_attempts {
            let x = self.rng.gen_range(0..dims.size_x);
            let z = self.rng.gen_range(0..dims.size_z);

            let Some(surface_y) = self.surface_at(grid, x, z) else {
                continue;
            };
            // Already a lake here
            if surface_y
                .checked_sub(1)
                .is_some_and(|below| grid.at([x, below, z]).kind == VoxelType::Water)
            {
                continue;
            }
            let origin = [x, surface_y, z];
            if !grid.at(origin).kind.is_air() {
                continue;
            }

            let (visited, volume) = flood_region(grid, origin, surface_y, max_volume);
            if (min_volume..=max_volume).contains(&volume) {
                for &index in &visited {
                    grid.flood(index);
                }
                return Some(WaterBody {
                    origin,
                    surface_y,
                    volume,
                    attempts: attempt,
                });
            }
        }
        None
    }

    /// Water table for column `(x, z)`: the first air cell, scanning down,
    /// that sits directly on a non-air cell. The bottom layer is never
    /// treated as ground.
    fn surface_at(&self, grid: &VoxelGrid, x: usize, z: usize) -> Option<usize> {
        let height = grid.dims().height;
        if self.empty_world {
            return Some(height - 1);
        }
        (1..height.saturating_sub(1)).rev().find_map(|y| {
            let ground = !grid.at([x, y, z]).kind.is_air();
            let above = grid.at([x, y + 1, z]).kind.is_air();
            (ground && above).then_some(y + 1)
        })
    }
}

/// Breadth-first search from `origin` over air cells at or below
/// `surface_y`. Stops early once the volume exceeds `max_volume`.
///
/// Returns the visited flat indices and the counted volume.
fn flood_region(
    grid: &VoxelGrid,
    origin: [usize; 3],
    surface_y: usize,
    max_volume: usize,
) -> (HashSet<usize>, usize) {
    let dims = grid.dims();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    let mut volume = 0usize;

    visited.insert(dims.index(origin[0], origin[1], origin[2]));
    queue.push_back(origin);

    while let Some(pos) = queue.pop_front() {
        if grid.at(pos).kind.is_air() {
            volume += 1;
            if volume > max_volume {
                break;
            }
        }

        for delta in NEIGHBORS {
            let Some(next) = dims.offset(pos, delta) else {
                continue;
            };
            if next[1] > surface_y || !grid.at(next).kind.is_air() {
                continue;
            }
            if visited.insert(dims.index(next[0], next[1], next[2])) {
                queue.push_back(next);
            }
        }
    }

    (visited, volume)
}

/// Places a single water body using a fresh RNG seeded with `rng_seed`.
///
/// An all-air grid is treated as an empty world (see
/// [`WaterCarver::with_empty_world`]). Returns true if a body was placed.
pub fn fill_water_body(
    grid: &mut VoxelGrid,
    min_volume: usize,
    max_volume: usize,
    rng_seed: u64,
) -> bool {
    let empty_world = grid.active_count() == 0;
    WaterCarver::new(WorldSeed::new(rng_seed), WaterCarver::DEFAULT_MAX_ATTEMPTS)
        .with_empty_world(empty_world)
        .fill(grid, min_volume, max_volume)
        .is_some()
}

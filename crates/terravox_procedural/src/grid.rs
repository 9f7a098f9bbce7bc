//! # Voxel Grid
//!
//! A dense, bounded 3D array of typed cells.
//!
//! ## Layout
//!
//! Cells are indexed `[x][y][z]` with `z` fastest, matching the order the
//! surface mesher scans them. Each cell stores its type and an `active`
//! flag; `active` is true exactly for non-air cells when the grid is built.
//!
//! ## Mutation
//!
//! The grid is written once, column by column, from an [`ElevationModel`].
//! After that the only mutation path is water carving (air → active water).
//!
//! [`ElevationModel`]: crate::elevation::ElevationModel

use std::time::Instant;

use crate::elevation::ElevationModel;
use crate::error::{GenResult, GenerationError};

/// Cell material.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum VoxelType {
    /// Empty space
    #[default]
    Air = 0,
    /// Forest cover
    Grass = 1,
    /// Bedrock and mountain rock
    Stone = 2,
    /// Soil
    Dirt = 3,
    /// Carved lakes
    Water = 4,
    /// Cold and high-mountain cover
    Snow = 5,
    /// Sand
    Sand = 6,
    /// Desert cover
    DryGrass = 7,
    /// Temperate cover
    TemperateGrass = 8,
    /// Savanna cover
    SavannaGrass = 9,
}

impl VoxelType {
    /// Every voxel type, in discriminant order.
    pub const ALL: [Self; 10] = [
        Self::Air,
        Self::Grass,
        Self::Stone,
        Self::Dirt,
        Self::Water,
        Self::Snow,
        Self::Sand,
        Self::DryGrass,
        Self::TemperateGrass,
        Self::SavannaGrass,
    ];

    /// Returns true for empty space.
    #[inline]
    #[must_use]
    pub const fn is_air(self) -> bool {
        matches!(self, Self::Air)
    }
}

/// A single cell in the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Voxel {
    /// Cell material.
    pub kind: VoxelType,
    /// Whether the cell is solid for meshing and occlusion.
    pub active: bool,
}

impl Voxel {
    /// Empty cell.
    pub const AIR: Self = Self {
        kind: VoxelType::Air,
        active: false,
    };

    /// Active water cell.
    pub const WATER: Self = Self {
        kind: VoxelType::Water,
        active: true,
    };

    /// Creates a cell whose activity follows its type.
    #[inline]
    #[must_use]
    pub const fn new(kind: VoxelType) -> Self {
        Self {
            kind,
            active: !kind.is_air(),
        }
    }
}

/// Grid extents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridDimensions {
    /// Cells along X.
    pub size_x: usize,
    /// Cells along Y (vertical).
    pub height: usize,
    /// Cells along Z.
    pub size_z: usize,
}

impl GridDimensions {
    /// Creates dimensions, rejecting any zero extent.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidDimensions`] when any extent is 0.
    pub fn new(size_x: usize, height: usize, size_z: usize) -> GenResult<Self> {
        if size_x == 0 || height == 0 || size_z == 0 {
            return Err(GenerationError::InvalidDimensions {
                size_x,
                height,
                size_z,
            });
        }
        Ok(Self {
            size_x,
            height,
            size_z,
        })
    }

    /// Total number of cells.
    #[inline]
    #[must_use]
    pub const fn volume(&self) -> usize {
        self.size_x * self.height * self.size_z
    }

    /// Returns true if the signed coordinate lies inside the grid.
    #[inline]
    #[must_use]
    pub fn contains(&self, x: i64, y: i64, z: i64) -> bool {
        usize::try_from(x).is_ok_and(|x| x < self.size_x)
            && usize::try_from(y).is_ok_and(|y| y < self.height)
            && usize::try_from(z).is_ok_and(|z| z < self.size_z)
    }

    /// Flat index of an in-bounds cell.
    #[inline]
    #[must_use]
    pub const fn index(&self, x: usize, y: usize, z: usize) -> usize {
        (x * self.height + y) * self.size_z + z
    }

    /// Inverse of [`GridDimensions::index`].
    #[inline]
    #[must_use]
    pub const fn position(&self, index: usize) -> [usize; 3] {
        let z = index % self.size_z;
        let rest = index / self.size_z;
        [rest / self.height, rest % self.height, z]
    }

    /// Returns the in-bounds neighbor of `(x, y, z)` offset by `delta`.
    #[inline]
    #[must_use]
    pub fn offset(&self, [x, y, z]: [usize; 3], [dx, dy, dz]: [i64; 3]) -> Option<[usize; 3]> {
        let nx = x.checked_add_signed(dx as isize)?;
        let ny = y.checked_add_signed(dy as isize)?;
        let nz = z.checked_add_signed(dz as isize)?;
        (nx < self.size_x && ny < self.height && nz < self.size_z).then_some([nx, ny, nz])
    }

    fn out_of_bounds(&self, x: i64, y: i64, z: i64) -> GenerationError {
        GenerationError::OutOfBounds {
            x,
            y,
            z,
            size_x: self.size_x,
            height: self.height,
            size_z: self.size_z,
        }
    }
}

/// The world's voxel occupancy grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelGrid {
    /// Extents.
    dims: GridDimensions,
    /// Cell data, `[x][y][z]` flattened.
    cells: Vec<Voxel>,
}

impl VoxelGrid {
    /// Creates an all-air grid.
    #[must_use]
    pub fn empty(dims: GridDimensions) -> Self {
        Self {
            dims,
            cells: vec![Voxel::AIR; dims.volume()],
        }
    }

    /// Creates a grid whose cell types come from `kind_at([x, y, z])`.
    ///
    /// Cells are visited in grid order.
    #[must_use]
    pub fn from_fn(
        dims: GridDimensions,
        mut kind_at: impl FnMut([usize; 3]) -> VoxelType,
    ) -> Self {
        let cells = (0..dims.volume())
            .map(|index| Voxel::new(kind_at(dims.position(index))))
            .collect();
        Self { dims, cells }
    }

    /// Builds the grid column by column from an elevation model.
    ///
    /// Columns are independent, so the result does not depend on the order
    /// they are visited.
    #[must_use]
    pub fn build(dims: GridDimensions, model: &ElevationModel) -> Self {
        let start = Instant::now();
        let mut grid = Self::empty(dims);
        let mut column = vec![VoxelType::Air; dims.height];

        for x in 0..dims.size_x {
            for z in 0..dims.size_z {
                model.fill_column(x as i64, z as i64, &mut column);
                grid.write_column(x, z, &column);
            }
        }

        tracing::info!(
            "Built {}x{}x{} voxel grid in {:?} ({} solid cells)",
            dims.size_x,
            dims.height,
            dims.size_z,
            start.elapsed(),
            grid.active_count()
        );
        grid
    }

    /// Writes a full y-column of freshly generated cells.
    fn write_column(&mut self, x: usize, z: usize, column: &[VoxelType]) {
        for (y, &kind) in column.iter().enumerate().take(self.dims.height) {
            let index = self.dims.index(x, y, z);
            self.cells[index] = Voxel::new(kind);
        }
    }

    /// Returns the grid extents.
    #[inline]
    #[must_use]
    pub const fn dims(&self) -> GridDimensions {
        self.dims
    }

    /// Gets the cell at `(x, y, z)`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::OutOfBounds`] outside the grid.
    pub fn get(&self, x: i64, y: i64, z: i64) -> GenResult<Voxel> {
        self.cell(x, y, z)
            .ok_or_else(|| self.dims.out_of_bounds(x, y, z))
    }

    /// Gets the cell at `(x, y, z)`, or `None` outside the grid.
    #[inline]
    #[must_use]
    pub fn cell(&self, x: i64, y: i64, z: i64) -> Option<Voxel> {
        if self.dims.contains(x, y, z) {
            Some(self.cells[self.dims.index(x as usize, y as usize, z as usize)])
        } else {
            None
        }
    }

    /// Gets the cell at an in-bounds unsigned position.
    #[inline]
    #[must_use]
    pub fn at(&self, [x, y, z]: [usize; 3]) -> Voxel {
        self.cells[self.dims.index(x, y, z)]
    }

    /// Returns true if the cell is active; out-of-bounds cells are not.
    #[inline]
    #[must_use]
    pub fn is_active(&self, x: i64, y: i64, z: i64) -> bool {
        self.cell(x, y, z).is_some_and(|voxel| voxel.active)
    }

    /// Rounds a local position to the nearest cell and reports occupancy.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::OutOfBounds`] when the rounded cell is
    /// outside the grid.
    pub fn is_active_at(&self, position: [f32; 3]) -> GenResult<bool> {
        let [x, y, z] = position.map(|c| c.round() as i64);
        self.get(x, y, z).map(|voxel| voxel.active)
    }

    /// Converts an in-bounds air cell into active water.
    ///
    /// Returns false (and changes nothing) if the cell is not air.
    pub(crate) fn flood(&mut self, index: usize) -> bool {
        let cell = &mut self.cells[index];
        if cell.kind.is_air() {
            *cell = Voxel::WATER;
            true
        } else {
            false
        }
    }

    #[cfg(test)]
    pub(crate) fn set_for_test(&mut self, [x, y, z]: [usize; 3], kind: VoxelType) {
        let index = self.dims.index(x, y, z);
        self.cells[index] = Voxel::new(kind);
    }

    /// Raw cell slice in `[x][y][z]` order.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[Voxel] {
        &self.cells
    }

    /// Iterates all cells with their positions, in grid order.
    pub fn iter(&self) -> impl Iterator<Item = ([usize; 3], Voxel)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, &voxel)| (self.dims.position(index), voxel))
    }

    /// Number of active cells.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|voxel| voxel.active).count()
    }

    /// Number of cells of the given type.
    #[must_use]
    pub fn count(&self, kind: VoxelType) -> usize {
        self.cells.iter().filter(|voxel| voxel.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(x: usize, y: usize, z: usize) -> GridDimensions {
        GridDimensions::new(x, y, z).unwrap()
    }

    #[test]
    fn test_voxel_activity_follows_type() {
        for kind in VoxelType::ALL {
            assert_eq!(Voxel::new(kind).active, kind != VoxelType::Air);
        }
    }

    #[test]
    fn test_index_roundtrip() {
        let d = dims(4, 5, 6);
        for x in 0..4 {
            for y in 0..5 {
                for z in 0..6 {
                    assert_eq!(d.position(d.index(x, y, z)), [x, y, z]);
                }
            }
        }
        assert_eq!(d.index(0, 0, 1), 1, "z is the fastest axis");
    }

    #[test]
    fn test_out_of_bounds_is_error() {
        let grid = VoxelGrid::empty(dims(2, 3, 4));

        assert!(grid.get(1, 2, 3).is_ok());
        assert_eq!(
            grid.get(2, 0, 0),
            Err(GenerationError::OutOfBounds {
                x: 2,
                y: 0,
                z: 0,
                size_x: 2,
                height: 3,
                size_z: 4
            })
        );
        assert!(grid.get(-1, 0, 0).is_err());
        assert!(grid.get(0, 3, 0).is_err());
        assert!(grid.get(0, 0, 4).is_err());
        assert!(!grid.is_active(-1, 0, 0));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(GridDimensions::new(0, 1, 1).is_err());
        assert!(GridDimensions::new(1, 0, 1).is_err());
        assert!(GridDimensions::new(1, 1, 0).is_err());
    }

    #[test]
    fn test_offset() {
        let d = dims(3, 3, 3);
        assert_eq!(d.offset([0, 0, 0], [-1, 0, 0]), None);
        assert_eq!(d.offset([2, 1, 1], [1, 0, 0]), None);
        assert_eq!(d.offset([1, 1, 1], [0, 1, -1]), Some([1, 2, 0]));
    }

    #[test]
    fn test_write_column_and_flood() {
        let mut grid = VoxelGrid::empty(dims(2, 4, 2));
        grid.write_column(
            1,
            0,
            &[VoxelType::Stone, VoxelType::Dirt, VoxelType::Grass, VoxelType::Air],
        );

        assert_eq!(grid.get(1, 2, 0).unwrap(), Voxel::new(VoxelType::Grass));
        assert_eq!(grid.active_count(), 3);

        let stone = grid.dims().index(1, 0, 0);
        assert!(!grid.flood(stone), "Only air can become water");
        let air = grid.dims().index(1, 3, 0);
        assert!(grid.flood(air));
        assert_eq!(grid.get(1, 3, 0).unwrap(), Voxel::WATER);
        assert_eq!(grid.count(VoxelType::Water), 1);
    }

    #[test]
    fn test_is_active_at_rounds() {
        let mut grid = VoxelGrid::empty(dims(3, 3, 3));
        grid.write_column(1, 1, &[VoxelType::Stone, VoxelType::Air, VoxelType::Air]);

        assert_eq!(grid.is_active_at([0.6, -0.4, 1.2]), Ok(true));
        assert_eq!(grid.is_active_at([1.0, 1.0, 1.0]), Ok(false));
        assert!(grid.is_active_at([3.6, 0.0, 0.0]).is_err());
    }

    #[test]
    fn test_iter_in_grid_order() {
        let grid = VoxelGrid::empty(dims(2, 2, 2));
        let positions: Vec<[usize; 3]> = grid.iter().map(|(pos, _)| pos).collect();
        assert_eq!(positions[0], [0, 0, 0]);
        assert_eq!(positions[1], [0, 0, 1]);
        assert_eq!(positions[2], [0, 1, 0]);
        assert_eq!(positions[4], [1, 0, 0]);
    }

    #[test]
    fn test_from_fn() {
        let grid = VoxelGrid::from_fn(dims(3, 3, 3), |pos| {
            if pos == [1, 1, 1] {
                VoxelType::Stone
            } else {
                VoxelType::Air
            }
        });

        assert_eq!(grid.active_count(), 1);
        assert_eq!(grid.get(1, 1, 1).unwrap(), Voxel::new(VoxelType::Stone));
        assert!(!grid.is_active(1, 1, 0));

        let mut visited = Vec::new();
        let layered = VoxelGrid::from_fn(dims(1, 3, 2), |pos| {
            visited.push(pos);
            if pos[1] == 0 {
                VoxelType::Stone
            } else {
                VoxelType::Air
            }
        });
        assert_eq!(visited.len(), 6);
        assert_eq!(visited[1], [0, 0, 1], "visited in grid order");
        assert_eq!(layered.count(VoxelType::Stone), 2);
    }
}

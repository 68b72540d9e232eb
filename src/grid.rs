use serde::{Deserialize, Serialize};
use std::fmt;

/// Grid dimensions along each axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl Dimensions {
    pub fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Total number of cells in a grid of this size
    pub fn cell_count(&self) -> usize {
        self.x * self.y * self.z
    }

    /// Check if a coordinate lies inside the grid
    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.x < self.x && coord.y < self.y && coord.z < self.z
    }
}

/// A 0-indexed grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl Coordinate {
    pub fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Apply a neighbor offset. Returns None if any axis would go below zero.
    pub fn offset(&self, dx: i32, dy: i32, dz: i32) -> Option<Coordinate> {
        Some(Coordinate {
            x: self.x.checked_add_signed(dx as isize)?,
            y: self.y.checked_add_signed(dy as isize)?,
            z: self.z.checked_add_signed(dz as isize)?,
        })
    }

    /// Same position in the 1-indexed convention used by exports
    pub fn one_indexed(&self) -> (usize, usize, usize) {
        (self.x + 1, self.y + 1, self.z + 1)
    }
}

impl fmt::Display for Coordinate {
    /// Formats 1-indexed, matching the report and CSV files
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y, z) = self.one_indexed();
        write!(f, "{}, {}, {}", x, y, z)
    }
}

/// Per-cell growth state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Evaluated as a growth candidate, whatever the outcome
    pub checked: bool,
    /// Holds a generated value
    pub coded: bool,
    /// Only meaningful when `coded` is set
    pub value: f64,
}

impl Cell {
    /// Value held by cells that were never coded
    pub const MISSING_VALUE: f64 = -1.0;

    pub fn coded(value: f64) -> Self {
        Self {
            checked: true,
            coded: true,
            value,
        }
    }

    /// Coded value, or None for cells without one
    pub fn coded_value(&self) -> Option<f64> {
        self.coded.then_some(self.value)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            checked: false,
            coded: false,
            value: Cell::MISSING_VALUE,
        }
    }
}

/// Dense 3D block model stored as a flat vector
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    dims: Dimensions,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocate a grid with every cell unchecked and uncoded.
    /// Dimensions are validated upstream by `ModelParams::validate`.
    pub fn new(dims: Dimensions) -> Self {
        Self {
            dims,
            cells: vec![Cell::default(); dims.cell_count()],
        }
    }

    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    /// Flat offset for a coordinate: `z * nx * ny + x * ny + y`
    #[inline]
    fn index_of(&self, coord: Coordinate) -> usize {
        assert!(
            self.dims.contains(coord),
            "coordinate ({}, {}, {}) outside grid {}x{}x{}",
            coord.x,
            coord.y,
            coord.z,
            self.dims.x,
            self.dims.y,
            self.dims.z
        );
        coord.z * self.dims.x * self.dims.y + coord.x * self.dims.y + coord.y
    }

    /// Read a cell. Panics if the coordinate is outside the grid.
    pub fn get(&self, coord: Coordinate) -> Cell {
        self.cells[self.index_of(coord)]
    }

    /// Overwrite a cell. Panics if the coordinate is outside the grid.
    pub fn set(&mut self, coord: Coordinate, cell: Cell) {
        let idx = self.index_of(coord);
        self.cells[idx] = cell;
    }

    /// Mutable access to a cell. Panics if the coordinate is outside the grid.
    pub fn get_mut(&mut self, coord: Coordinate) -> &mut Cell {
        let idx = self.index_of(coord);
        &mut self.cells[idx]
    }

    /// Visit every cell in export order: z outermost, then y, x fastest
    pub fn iter_export_order(&self) -> impl Iterator<Item = (Coordinate, Cell)> + '_ {
        let dims = self.dims;
        (0..dims.z).flat_map(move |z| {
            (0..dims.y).flat_map(move |y| {
                (0..dims.x).map(move |x| {
                    let coord = Coordinate::new(x, y, z);
                    (coord, self.get(coord))
                })
            })
        })
    }

    /// Number of coded cells
    #[cfg(test)]
    pub fn coded_count(&self) -> usize {
        self.cells.iter().filter(|c| c.coded).count()
    }

    /// Min and max over coded values, None if nothing is coded
    pub fn coded_range(&self) -> Option<(f64, f64)> {
        self.cells
            .iter()
            .filter_map(Cell::coded_value)
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

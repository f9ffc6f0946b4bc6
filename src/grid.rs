//! The 3×3 grid a byte is laid out on before its bits are reordered.
//!
//! ```text
//!   b7 b6 b5        3 2 3
//!   b4 b3 b2        2 4 2     position bias
//!   b1 b0 --        3 2 3
//! ```
//!
//! The first eight cells in row-major order carry the byte's bits, most
//! significant first. The bottom-right cell is always blank.

use serde::Serialize;
use std::fmt;

/// Grid edge length
pub const GRID_SIZE: usize = 3;

/// Cells that carry a bit (the ninth is blank)
pub const BIT_CELLS: usize = 8;

/// Spatial weight per cell: center > corner > edge
pub const POSITION_BIAS: [[u8; GRID_SIZE]; GRID_SIZE] = [[3, 2, 3], [2, 4, 2], [3, 2, 3]];

/// Base weight of a cell holding a 1 bit
pub const ONE_WEIGHT: u8 = 10;

/// Base weight of a cell holding a 0 bit
pub const ZERO_WEIGHT: u8 = 5;

/// A cell position inside the grid. Always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    pub const CENTER: Coord = Coord { row: 1, col: 1 };
    pub const BLANK: Coord = Coord { row: 2, col: 2 };

    /// Returns `None` for positions outside the 3×3 grid
    pub fn new(row: usize, col: usize) -> Option<Self> {
        if row < GRID_SIZE && col < GRID_SIZE {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Coordinate of the `index`-th cell in row-major order
    pub fn from_index(index: usize) -> Option<Self> {
        Self::new(index / GRID_SIZE, index % GRID_SIZE)
    }

    pub fn row(self) -> usize {
        self.row as usize
    }

    pub fn col(self) -> usize {
        self.col as usize
    }

    /// Row-major scan index (0..9)
    pub fn index(self) -> usize {
        self.row() * GRID_SIZE + self.col()
    }

    pub fn bias(self) -> u8 {
        POSITION_BIAS[self.row()][self.col()]
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Weight of a cell: the bit value dominates, position breaks ties
pub fn weight(bit: bool, coord: Coord) -> u8 {
    let base = if bit { ONE_WEIGHT } else { ZERO_WEIGHT };
    base + coord.bias()
}

/// A byte materialized on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    bits: [bool; BIT_CELLS],
}

impl Grid {
    pub fn from_byte(byte: u8) -> Self {
        let mut bits = [false; BIT_CELLS];
        for (i, bit) in bits.iter_mut().enumerate() {
            *bit = (byte >> (7 - i)) & 1 == 1;
        }
        Self { bits }
    }

    /// Bit stored at `coord`, or `None` for the blank cell
    pub fn get(&self, coord: Coord) -> Option<bool> {
        self.bits.get(coord.index()).copied()
    }

    /// Occupied cells in row-major scan order
    pub fn cells(&self) -> impl Iterator<Item = (Coord, bool)> + '_ {
        (0..GRID_SIZE * GRID_SIZE).filter_map(move |index| {
            let coord = Coord::from_index(index)?;
            self.get(coord).map(|bit| (coord, bit))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_rejects_out_of_range() {
        assert!(Coord::new(3, 0).is_none());
        assert!(Coord::new(0, 3).is_none());
        assert!(Coord::from_index(9).is_none());
        assert_eq!(Coord::new(2, 1).unwrap().index(), 7);
    }

    #[test]
    fn test_grid_layout_msb_first() {
        // 0b1000_0001: first cell and eighth cell set
        let grid = Grid::from_byte(0x81);
        assert_eq!(grid.get(Coord::new(0, 0).unwrap()), Some(true));
        assert_eq!(grid.get(Coord::new(2, 1).unwrap()), Some(true));
        assert_eq!(grid.get(Coord::CENTER), Some(false));
        assert_eq!(grid.get(Coord::BLANK), None);
    }

    #[test]
    fn test_blank_cell_never_listed() {
        for byte in [0x00u8, 0xFF, 0x5A] {
            let cells: Vec<_> = Grid::from_byte(byte).cells().collect();
            assert_eq!(cells.len(), BIT_CELLS);
            assert!(cells.iter().all(|(c, _)| *c != Coord::BLANK));
        }
    }

    #[test]
    fn test_weight_rule() {
        assert_eq!(weight(true, Coord::CENTER), 14);
        assert_eq!(weight(false, Coord::CENTER), 9);
        assert_eq!(weight(true, Coord::new(0, 1).unwrap()), 12);
        assert_eq!(weight(false, Coord::new(0, 0).unwrap()), 8);
        // Any 1 outweighs any 0
        assert!(weight(true, Coord::new(1, 0).unwrap()) > weight(false, Coord::CENTER));
    }
}

use crate::grid::{weight, Coord, Grid, BIT_CELLS};
use std::fmt;
use std::sync::OnceLock;

/// Weighted order of a byte's eight bit cells
pub type Order = [Coord; BIT_CELLS];

/// Ordering table for all 256 byte values
///
/// Each entry lists the byte's occupied cells by descending weight. Equal
/// weights keep row-major scan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternTable {
    orders: Vec<Order>,
}

impl PatternTable {
    /// Build the table from the fixed grid mapping and position bias
    pub fn build() -> Self {
        let orders = (0..=u8::MAX).map(weighted_order).collect();
        Self { orders }
    }

    /// Process-wide table, built on first use
    pub fn global() -> &'static PatternTable {
        static TABLE: OnceLock<PatternTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            tracing::debug!("building directional pattern table");
            PatternTable::build()
        })
    }

    pub fn order(&self, byte: u8) -> &Order {
        &self.orders[byte as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &Order)> + '_ {
        (0..=u8::MAX).zip(self.orders.iter())
    }
}

/// One line per byte value: `0x41 01000001 -> (0,1) (2,1) ...`
impl fmt::Display for PatternTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (byte, order) in self.iter() {
            write!(f, "0x{:02x} {:08b} ->", byte, byte)?;
            for coord in order {
                write!(f, " {}", coord)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn weighted_order(byte: u8) -> Order {
    let grid = Grid::from_byte(byte);
    let mut weighted: Vec<(Coord, u8)> = grid
        .cells()
        .map(|(coord, bit)| (coord, weight(bit, coord)))
        .collect();

    // slice::sort_by is stable
    weighted.sort_by(|a, b| b.1.cmp(&a.1));

    let mut order = [Coord::CENTER; BIT_CELLS];
    for (slot, (coord, _)) in order.iter_mut().zip(weighted) {
        *slot = coord;
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: usize, col: usize) -> Coord {
        Coord::new(row, col).unwrap()
    }

    #[test]
    fn test_build_is_deterministic() {
        assert_eq!(PatternTable::build(), PatternTable::build());
        assert_eq!(&PatternTable::build(), PatternTable::global());
    }

    #[test]
    fn test_zero_byte_tie_order() {
        let table = PatternTable::build();
        let expected = [
            c(1, 1),
            c(0, 0),
            c(0, 2),
            c(2, 0),
            c(0, 1),
            c(1, 0),
            c(1, 2),
            c(2, 1),
        ];
        assert_eq!(table.order(0x00), &expected);
    }

    #[test]
    fn test_ones_rank_before_zeros() {
        // 0x41 = 01000001: the two set cells lead, then center, corners, edges
        let table = PatternTable::build();
        let expected = [
            c(0, 1),
            c(2, 1),
            c(1, 1),
            c(0, 0),
            c(0, 2),
            c(2, 0),
            c(1, 0),
            c(1, 2),
        ];
        assert_eq!(table.order(0x41), &expected);
    }

    #[test]
    fn test_every_order_is_a_permutation_of_the_bit_cells() {
        let table = PatternTable::build();
        for (_, order) in table.iter() {
            let mut indices: Vec<usize> = order.iter().map(|c| c.index()).collect();
            indices.sort_unstable();
            assert_eq!(indices, (0..BIT_CELLS).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_display_lists_all_bytes() {
        let dump = PatternTable::build().to_string();
        assert_eq!(dump.lines().count(), 256);
        assert!(dump.starts_with("0x00 00000000 -> (1,1) (0,0)"));
        assert!(dump.contains("\n0x41 01000001 -> (0,1) (2,1) (1,1) (0,0) (0,2) (2,0) (1,0) (1,2)\n"));
    }
}

use crate::error::{DirhashError, Result};
use crate::grid::{Grid, BIT_CELLS};
use crate::pattern::{Order, PatternTable};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Eight ASCII `'0'`/`'1'` characters, a permutation of one byte's bits
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitString([u8; BIT_CELLS]);

impl BitString {
    pub fn as_bytes(&self) -> &[u8; BIT_CELLS] {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        // Only ever holds ASCII digits
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Pack MSB-first into a single byte
    pub fn to_byte(self) -> u8 {
        self.0
            .iter()
            .fold(0u8, |acc, &ch| (acc << 1) | u8::from(ch == b'1'))
    }

    pub fn count_ones(&self) -> usize {
        self.0.iter().filter(|&&ch| ch == b'1').count()
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitString({})", self.as_str())
    }
}

/// Produce the reordered bit string for a byte
///
/// `prev` and `next` are the neighbouring bytes in the stream (0 past either
/// end). Implementations must be pure.
pub trait ByteTransform: Sync {
    fn transform(&self, byte: u8, prev: u8, next: u8) -> BitString;
}

/// Reads the grid in the byte's precomputed weighted order
#[derive(Debug, Clone, Copy)]
pub struct StaticTransform<'t> {
    table: &'t PatternTable,
}

impl<'t> StaticTransform<'t> {
    pub fn new(table: &'t PatternTable) -> Self {
        Self { table }
    }
}

impl Default for StaticTransform<'static> {
    fn default() -> Self {
        Self::new(PatternTable::global())
    }
}

impl ByteTransform for StaticTransform<'_> {
    fn transform(&self, byte: u8, _prev: u8, _next: u8) -> BitString {
        read_cells(&Grid::from_byte(byte), self.table.order(byte))
    }
}

/// Rotates the weighted order by a seed taken from the neighbouring bytes
#[derive(Debug, Clone, Copy)]
pub struct ContextTransform<'t> {
    table: &'t PatternTable,
}

impl<'t> ContextTransform<'t> {
    pub fn new(table: &'t PatternTable) -> Self {
        Self { table }
    }
}

impl Default for ContextTransform<'static> {
    fn default() -> Self {
        Self::new(PatternTable::global())
    }
}

impl ByteTransform for ContextTransform<'_> {
    fn transform(&self, byte: u8, prev: u8, next: u8) -> BitString {
        let seed = shift_seed(byte, prev, next);
        let order = rotate(self.table.order(byte), seed);
        read_cells(&Grid::from_byte(byte), &order)
    }
}

/// `(byte + prev + next) mod 9`
///
/// Rotation is mod 8, so seeds 0 and 8 give the same order. Kept for
/// compatibility with existing digests.
pub fn shift_seed(byte: u8, prev: u8, next: u8) -> u8 {
    ((byte as u16 + prev as u16 + next as u16) % 9) as u8
}

/// Cyclic left rotation: `rotated[i] = order[(i + seed) mod 8]`
pub fn rotate(order: &Order, seed: u8) -> Order {
    std::array::from_fn(|i| order[(i + seed as usize) % BIT_CELLS])
}

fn read_cells(grid: &Grid, order: &Order) -> BitString {
    let mut out = [b'0'; BIT_CELLS];
    let mut idx = 0;
    for &coord in order {
        // The blank cell is skipped
        if let Some(bit) = grid.get(coord) {
            out[idx] = if bit { b'1' } else { b'0' };
            idx += 1;
        }
    }
    BitString(out)
}

/// Which transform variant a run uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransformMode {
    Static,
    #[default]
    Context,
}

impl TransformMode {
    pub fn transformer<'t>(self, table: &'t PatternTable) -> Box<dyn ByteTransform + 't> {
        match self {
            TransformMode::Static => Box::new(StaticTransform::new(table)),
            TransformMode::Context => Box::new(ContextTransform::new(table)),
        }
    }
}

impl std::str::FromStr for TransformMode {
    type Err = DirhashError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "static" => Ok(Self::Static),
            "context" => Ok(Self::Context),
            _ => Err(DirhashError::UnsupportedAlgorithm(format!("mode: {}", s))),
        }
    }
}

impl fmt::Display for TransformMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformMode::Static => f.write_str("static"),
            TransformMode::Context => f.write_str("context"),
        }
    }
}

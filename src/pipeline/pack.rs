use crate::error::{DirhashError, Result};
use crate::grid::BIT_CELLS;
use crate::transform::BitString;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the per-byte outputs are turned into the packed buffer
///
/// Both strategies produce identical bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Assembly {
    /// Pack each output straight into the buffer
    #[default]
    Direct,
    /// Build the textual bitstream first, then pack it
    Concat,
}

impl std::str::FromStr for Assembly {
    type Err = DirhashError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "concat" => Ok(Self::Concat),
            _ => Err(DirhashError::UnsupportedAlgorithm(format!("assembly: {}", s))),
        }
    }
}

impl fmt::Display for Assembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Assembly::Direct => f.write_str("direct"),
            Assembly::Concat => f.write_str("concat"),
        }
    }
}

/// What gets fed to the digest for each chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Bitstream packed MSB-first into bytes
    #[default]
    Packed,
    /// Bitstream as ASCII `'0'`/`'1'` characters (legacy digests)
    Ascii,
}

impl std::str::FromStr for Encoding {
    type Err = DirhashError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "packed" => Ok(Self::Packed),
            "ascii" => Ok(Self::Ascii),
            _ => Err(DirhashError::UnsupportedAlgorithm(format!("encoding: {}", s))),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Packed => f.write_str("packed"),
            Encoding::Ascii => f.write_str("ascii"),
        }
    }
}

/// Render a chunk's outputs into the buffer handed to the digest
pub fn encode(outputs: &[BitString], encoding: Encoding, assembly: Assembly) -> Result<Vec<u8>> {
    match encoding {
        Encoding::Packed => assemble(outputs, assembly),
        Encoding::Ascii => Ok(bitstream(outputs)?.into_bytes()),
    }
}

/// Packed buffer for a chunk's outputs, in index order
pub fn assemble(outputs: &[BitString], assembly: Assembly) -> Result<Vec<u8>> {
    match assembly {
        Assembly::Direct => assemble_direct(outputs),
        Assembly::Concat => pack_bits(bitstream(outputs)?.as_bytes()),
    }
}

/// Concatenated `'0'`/`'1'` text of all outputs
pub fn bitstream(outputs: &[BitString]) -> Result<String> {
    let len = outputs.len() * BIT_CELLS;
    let mut bits = String::new();
    bits.try_reserve_exact(len)
        .map_err(|_| DirhashError::Allocation {
            what: "chunk bitstream",
            bytes: len,
        })?;
    for out in outputs {
        bits.push_str(out.as_str());
    }
    Ok(bits)
}

/// Pack ASCII bits MSB-first; the last partial byte is zero-padded
pub fn pack_bits(bits: &[u8]) -> Result<Vec<u8>> {
    let byte_len = bits.len().div_ceil(8);
    let mut packed = zeroed(byte_len, "packed buffer")?;
    for (i, &bit) in bits.iter().enumerate() {
        if bit == b'1' {
            packed[i / 8] |= 1 << (7 - (i % 8));
        }
    }
    Ok(packed)
}

fn assemble_direct(outputs: &[BitString]) -> Result<Vec<u8>> {
    let mut packed = zeroed(outputs.len(), "packed buffer")?;
    for (slot, out) in packed.iter_mut().zip(outputs) {
        *slot = out.to_byte();
    }
    Ok(packed)
}

fn zeroed(len: usize, what: &'static str) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| DirhashError::Allocation { what, bytes: len })?;
    buf.resize(len, 0);
    Ok(buf)
}

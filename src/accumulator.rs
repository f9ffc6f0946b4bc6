use crate::error::{DirhashError, Result};
use digest::{ExtendableOutput, Update, XofReader};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};
use sha3::Shake256;
use std::fmt;

/// Requested digest width in bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "u32", into = "u32")]
pub enum DigestWidth {
    #[default]
    Bits256,
    Bits512,
    Bits1024,
    Bits2048,
}

impl DigestWidth {
    pub fn bits(self) -> u32 {
        match self {
            DigestWidth::Bits256 => 256,
            DigestWidth::Bits512 => 512,
            DigestWidth::Bits1024 => 1024,
            DigestWidth::Bits2048 => 2048,
        }
    }

    /// Digest length in bytes
    pub fn output_len(self) -> usize {
        self.bits() as usize / 8
    }

    /// Widths above 512 bits are served by SHAKE256
    pub fn is_xof(self) -> bool {
        matches!(self, DigestWidth::Bits1024 | DigestWidth::Bits2048)
    }
}

impl TryFrom<u32> for DigestWidth {
    type Error = DirhashError;
    fn try_from(bits: u32) -> Result<Self> {
        match bits {
            256 => Ok(Self::Bits256),
            512 => Ok(Self::Bits512),
            1024 => Ok(Self::Bits1024),
            2048 => Ok(Self::Bits2048),
            other => Err(DirhashError::UnsupportedWidth(other)),
        }
    }
}

impl From<DigestWidth> for u32 {
    fn from(width: DigestWidth) -> u32 {
        width.bits()
    }
}

impl std::str::FromStr for DigestWidth {
    type Err = DirhashError;
    fn from_str(s: &str) -> Result<Self> {
        let bits: u32 = s
            .trim()
            .parse()
            .map_err(|_| DirhashError::InvalidWidth(s.to_string()))?;
        Self::try_from(bits)
    }
}

impl fmt::Display for DigestWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// Incremental digest state for one run
///
/// `finalize` takes `self`, so no update can follow it.
pub enum Accumulator {
    Sha256(Sha256),
    Sha512(Sha512),
    Shake256 { hasher: Shake256, output_len: usize },
}

impl Accumulator {
    pub fn new(width: DigestWidth) -> Self {
        match width {
            DigestWidth::Bits256 => Accumulator::Sha256(Sha256::new()),
            DigestWidth::Bits512 => Accumulator::Sha512(Sha512::new()),
            DigestWidth::Bits1024 | DigestWidth::Bits2048 => Accumulator::Shake256 {
                hasher: Shake256::default(),
                output_len: width.output_len(),
            },
        }
    }

    pub fn update(&mut self, data: &[u8]) {
        match self {
            Accumulator::Sha256(h) => Digest::update(h, data),
            Accumulator::Sha512(h) => Digest::update(h, data),
            Accumulator::Shake256 { hasher, .. } => Update::update(hasher, data),
        }
    }

    pub fn finalize(self) -> Vec<u8> {
        match self {
            Accumulator::Sha256(h) => Digest::finalize(h).to_vec(),
            Accumulator::Sha512(h) => Digest::finalize(h).to_vec(),
            Accumulator::Shake256 { hasher, output_len } => finalize_xof(hasher, output_len),
        }
    }

    pub fn algorithm_name(&self) -> &'static str {
        match self {
            Accumulator::Sha256(_) => "sha256",
            Accumulator::Sha512(_) => "sha512",
            Accumulator::Shake256 { .. } => "shake256",
        }
    }

    pub fn output_len(&self) -> usize {
        match self {
            Accumulator::Sha256(_) => 32,
            Accumulator::Sha512(_) => 64,
            Accumulator::Shake256 { output_len, .. } => *output_len,
        }
    }
}

/// Squeeze exactly `length` bytes out of the sponge
fn finalize_xof(hasher: Shake256, length: usize) -> Vec<u8> {
    let mut out = vec![0u8; length];
    let mut reader = hasher.finalize_xof();
    reader.read(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHA256_EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn test_width_parse() {
        assert_eq!("256".parse::<DigestWidth>().unwrap(), DigestWidth::Bits256);
        assert_eq!("2048".parse::<DigestWidth>().unwrap(), DigestWidth::Bits2048);
        assert!(matches!(
            "384".parse::<DigestWidth>(),
            Err(DirhashError::UnsupportedWidth(384))
        ));
        assert!(matches!(
            "big".parse::<DigestWidth>(),
            Err(DirhashError::InvalidWidth(_))
        ));
    }

    #[test]
    fn test_output_lengths() {
        for (width, len) in [
            (DigestWidth::Bits256, 32),
            (DigestWidth::Bits512, 64),
            (DigestWidth::Bits1024, 128),
            (DigestWidth::Bits2048, 256),
        ] {
            let acc = Accumulator::new(width);
            assert_eq!(acc.output_len(), len);
            assert_eq!(acc.finalize().len(), len);
        }
    }

    #[test]
    fn test_empty_sha256() {
        let acc = Accumulator::new(DigestWidth::Bits256);
        assert_eq!(acc.algorithm_name(), "sha256");
        assert_eq!(hex::encode(acc.finalize()), SHA256_EMPTY);
    }

    #[test]
    fn test_update_order_matters() {
        let mut ab = Accumulator::new(DigestWidth::Bits256);
        ab.update(b"a");
        ab.update(b"b");
        let mut ba = Accumulator::new(DigestWidth::Bits256);
        ba.update(b"b");
        ba.update(b"a");
        assert_ne!(ab.finalize(), ba.finalize());
    }

    #[test]
    fn test_split_updates_match_single_update() {
        let mut split = Accumulator::new(DigestWidth::Bits1024);
        split.update(b"direct");
        split.update(b"ional");
        let mut whole = Accumulator::new(DigestWidth::Bits1024);
        whole.update(b"directional");
        assert_eq!(split.finalize(), whole.finalize());
    }

    #[test]
    fn test_xof_prefix_property() {
        // SHAKE output of 1024 bits is a prefix of the 2048-bit output
        let mut short = Accumulator::new(DigestWidth::Bits1024);
        short.update(b"xof");
        let mut long = Accumulator::new(DigestWidth::Bits2048);
        long.update(b"xof");
        let short = short.finalize();
        let long = long.finalize();
        assert_eq!(&long[..short.len()], &short[..]);
    }

    #[test]
    fn test_width_serde() {
        let json = serde_json::to_string(&DigestWidth::Bits512).unwrap();
        assert_eq!(json, "512");
        let width: DigestWidth = serde_json::from_str("1024").unwrap();
        assert_eq!(width, DigestWidth::Bits1024);
        assert!(serde_json::from_str::<DigestWidth>("100").is_err());
    }
}

use crate::accumulator::DigestWidth;
use crate::error::{DirhashError, Result};
use crate::pipeline::{Assembly, Encoding};
use crate::transform::TransformMode;

pub const DEFAULT_CHUNK_SIZE: usize = 512;
pub const DEFAULT_WORKERS: usize = 4;

/// Options for a directional hash run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashOptions {
    pub width: DigestWidth,
    /// Bytes read per chunk
    pub chunk_size: usize,
    /// Worker threads transforming each chunk
    pub workers: usize,
    pub mode: TransformMode,
    pub encoding: Encoding,
    pub assembly: Assembly,
}

impl Default for HashOptions {
    fn default() -> Self {
        Self {
            width: DigestWidth::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            workers: DEFAULT_WORKERS,
            mode: TransformMode::default(),
            encoding: Encoding::default(),
            assembly: Assembly::default(),
        }
    }
}

impl HashOptions {
    /// Reject settings the pipeline cannot run with, before any input is touched
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(DirhashError::InvalidChunkSize(self.chunk_size));
        }
        if self.workers == 0 {
            return Err(DirhashError::InvalidWorkerCount(self.workers));
        }
        Ok(())
    }
}

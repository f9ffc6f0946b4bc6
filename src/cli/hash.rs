use crate::accumulator::DigestWidth;
use crate::error::Result;
use crate::options::HashOptions;
use crate::pipeline::{hash_reader, Encoding};
use crate::transform::TransformMode;
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Outcome of hashing one file
#[derive(Debug, Clone, Serialize)]
pub struct HashReport {
    pub file: PathBuf,
    pub algorithm: &'static str,
    pub bits: DigestWidth,
    pub mode: TransformMode,
    pub encoding: Encoding,
    pub chunk_size: usize,
    pub workers: usize,
    /// Input bytes hashed
    pub bytes: u64,
    /// Lowercase hex digest
    pub digest: String,
}

impl HashReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Directional hash of a file
///
/// Options are validated before the file is opened.
pub fn hash_file(path: &Path, options: &HashOptions) -> Result<HashReport> {
    options.validate()?;
    let file = File::open(path)?;
    let output = hash_reader(BufReader::new(file), options)?;

    Ok(HashReport {
        file: path.to_path_buf(),
        algorithm: output.algorithm,
        bits: options.width,
        mode: options.mode,
        encoding: options.encoding,
        chunk_size: options.chunk_size,
        workers: options.workers,
        bytes: output.input_len,
        digest: output.to_hex(),
    })
}

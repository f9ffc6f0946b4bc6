//! Directional Hash - weighted bit-reordering in front of SHA-2 / SHAKE256
//!
//! Every input byte is laid out on a 3×3 grid and its eight bits are read
//! back in a fixed weighted order (optionally rotated by a seed taken from
//! the neighbouring bytes). The reordered bitstream is packed and streamed
//! into a standard digest.
//!
//! ## Transform Pipeline
//!
//! ```text
//! Input → Chunk (+1 byte lookahead) → Transform (parallel) → Pack → Digest update → … → Finalize → Hex
//! ```
//!
//! - **Pattern table**: built once, 256 weighted orders
//! - **Transform**: `static` (table order) or `context` (rotated by `(byte + prev + next) mod 9`)
//! - **Pack**: MSB-first, zero-padded; or the raw `'0'`/`'1'` text with `ascii` encoding
//! - **Digest**: SHA-256, SHA-512, or SHAKE256 for 1024/2048-bit output
//!
//! ## Example
//!
//! ```no_run
//! use directional_hash::cli::hash_file;
//! use directional_hash::HashOptions;
//! use std::path::Path;
//!
//! let report = hash_file(Path::new("input.bin"), &HashOptions::default()).unwrap();
//! println!("{}", report.digest);
//! ```

pub mod accumulator;
pub mod cli;
pub mod error;
pub mod grid;
pub mod options;
pub mod pattern;
pub mod pipeline;
pub mod transform;

pub use accumulator::{Accumulator, DigestWidth};
pub use error::{DirhashError, Result};
pub use options::HashOptions;
pub use pattern::PatternTable;
pub use pipeline::{hash_bytes, hash_reader, DigestOutput, Pipeline};
pub use transform::{BitString, ByteTransform, ContextTransform, StaticTransform, TransformMode};

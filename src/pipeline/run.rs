use crate::accumulator::Accumulator;
use crate::error::Result;
use crate::options::HashOptions;
use crate::pattern::PatternTable;
use crate::pipeline::chunk::ChunkReader;
use crate::pipeline::pack::encode;
use crate::pipeline::parallel::WorkerPool;
use crate::transform::ByteTransform;
use std::io::Read;
use tracing::{debug, trace};

/// Result of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestOutput {
    pub algorithm: &'static str,
    pub bytes: Vec<u8>,
    /// Input bytes consumed
    pub input_len: u64,
    pub chunks: u64,
}

impl DigestOutput {
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

/// Read → transform → pack → digest loop over one input
pub struct Pipeline<'t> {
    options: HashOptions,
    transform: Box<dyn ByteTransform + 't>,
    pool: WorkerPool,
}

impl<'t> Pipeline<'t> {
    pub fn new(options: &HashOptions, table: &'t PatternTable) -> Result<Self> {
        options.validate()?;
        let pool = WorkerPool::new(options.workers)?;
        Ok(Self {
            options: *options,
            transform: options.mode.transformer(table),
            pool,
        })
    }

    pub fn options(&self) -> &HashOptions {
        &self.options
    }

    /// Hash everything `reader` yields
    ///
    /// Either returns the full digest or an error; nothing partial escapes.
    pub fn run<R: Read>(&self, reader: R) -> Result<DigestOutput> {
        let opts = &self.options;
        debug!(
            width = opts.width.bits(),
            chunk_size = opts.chunk_size,
            workers = opts.workers,
            mode = %opts.mode,
            encoding = %opts.encoding,
            "starting directional hash"
        );

        let mut chunks = ChunkReader::new(reader, opts.chunk_size)?;
        let mut accumulator = Accumulator::new(opts.width);
        let mut outputs = Vec::new();
        let mut count = 0u64;

        while let Some(chunk) = chunks.next_chunk()? {
            trace!(
                index = chunk.index,
                len = chunk.len(),
                prev = chunk.prev,
                next = chunk.next,
                "chunk"
            );
            self.pool
                .transform_chunk(&chunk, self.transform.as_ref(), &mut outputs)?;
            let buffer = encode(&outputs, opts.encoding, opts.assembly)?;
            accumulator.update(&buffer);
            count += 1;
        }

        let algorithm = accumulator.algorithm_name();
        let bytes = accumulator.finalize();
        debug!(algorithm, chunks = count, input_len = chunks.bytes_read(), "finalized");

        Ok(DigestOutput {
            algorithm,
            bytes,
            input_len: chunks.bytes_read(),
            chunks: count,
        })
    }
}

/// Hash a reader with the process-wide pattern table
pub fn hash_reader<R: Read>(reader: R, options: &HashOptions) -> Result<DigestOutput> {
    Pipeline::new(options, PatternTable::global())?.run(reader)
}

/// Hash an in-memory buffer
pub fn hash_bytes(data: &[u8], options: &HashOptions) -> Result<DigestOutput> {
    hash_reader(data, options)
}

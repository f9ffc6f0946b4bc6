use crate::error::{DirhashError, Result};
use crate::pipeline::chunk::Chunk;
use crate::transform::{BitString, ByteTransform};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

/// Bounded pool that transforms the bytes of one chunk at a time
pub struct WorkerPool {
    pool: ThreadPool,
    workers: usize,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(DirhashError::InvalidWorkerCount(workers));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("dirhash-worker-{}", i))
            .build()
            .map_err(|e| DirhashError::ThreadPool(e.to_string()))?;
        Ok(Self { pool, workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Transform every byte of `chunk` into `out`, indexed by byte position
    ///
    /// Returns once all tasks have finished, so `out` is complete and in
    /// input order regardless of which worker ran which byte.
    pub fn transform_chunk<T>(
        &self,
        chunk: &Chunk,
        transform: &T,
        out: &mut Vec<BitString>,
    ) -> Result<()>
    where
        T: ByteTransform + ?Sized,
    {
        out.clear();
        out.try_reserve_exact(chunk.len())
            .map_err(|_| DirhashError::Allocation {
                what: "transform results",
                bytes: chunk.len() * std::mem::size_of::<BitString>(),
            })?;

        self.pool.install(|| {
            chunk
                .bytes
                .par_iter()
                .enumerate()
                .map(|(j, &byte)| {
                    let (prev, next) = chunk.neighbours(j);
                    transform.transform(byte, prev, next)
                })
                .collect_into_vec(out);
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::PatternTable;
    use crate::transform::{ContextTransform, StaticTransform};

    fn chunk(bytes: &[u8]) -> Chunk {
        Chunk {
            index: 0,
            bytes: bytes.to_vec(),
            prev: 0,
            next: 0,
        }
    }

    #[test]
    fn test_zero_workers_rejected() {
        assert!(matches!(
            WorkerPool::new(0),
            Err(DirhashError::InvalidWorkerCount(0))
        ));
    }

    #[test]
    fn test_results_follow_input_order() {
        let data: Vec<u8> = (0..=255u8).collect();
        let transform = StaticTransform::new(PatternTable::global());
        let pool = WorkerPool::new(4).unwrap();
        let mut out = Vec::new();
        pool.transform_chunk(&chunk(&data), &transform, &mut out).unwrap();

        assert_eq!(out.len(), data.len());
        for (j, &byte) in data.iter().enumerate() {
            assert_eq!(out[j], transform.transform(byte, 0, 0));
        }
    }

    #[test]
    fn test_worker_count_does_not_change_output() {
        let data: Vec<u8> = (0..16u32).map(|i| (i * 37 % 251) as u8).collect();
        let transform = ContextTransform::new(PatternTable::global());
        let input = chunk(&data);

        let mut reference = Vec::new();
        WorkerPool::new(1)
            .unwrap()
            .transform_chunk(&input, &transform, &mut reference)
            .unwrap();

        for workers in 2..=data.len() {
            let mut out = Vec::new();
            WorkerPool::new(workers)
                .unwrap()
                .transform_chunk(&input, &transform, &mut out)
                .unwrap();
            assert_eq!(out, reference, "workers={}", workers);
        }
    }

    #[test]
    fn test_output_buffer_is_reused() {
        let pool = WorkerPool::new(2).unwrap();
        let transform = StaticTransform::default();
        let mut out = Vec::new();
        pool.transform_chunk(&chunk(b"long input here"), &transform, &mut out)
            .unwrap();
        pool.transform_chunk(&chunk(b"ab"), &transform, &mut out).unwrap();
        assert_eq!(out.len(), 2);
    }
}

use crate::error::{DirhashError, Result};
use std::io::{ErrorKind, Read};

/// A window of input bytes plus the context on either side of it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Position of this chunk in the stream (0-based)
    pub index: u64,
    pub bytes: Vec<u8>,
    /// Last byte of the previous chunk, 0 for the first chunk
    pub prev: u8,
    /// First byte of the following chunk, 0 at end of stream
    pub next: u8,
}

impl Chunk {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// `(prev, next)` neighbours of byte `j`
    pub fn neighbours(&self, j: usize) -> (u8, u8) {
        let prev = if j > 0 { self.bytes[j - 1] } else { self.prev };
        let next = self.bytes.get(j + 1).copied().unwrap_or(self.next);
        (prev, next)
    }
}

/// Reads fixed-size chunks with a one-byte lookahead
///
/// The lookahead byte is pulled from the source after each chunk and becomes
/// the first byte of the next one, so the source is never seeked.
pub struct ChunkReader<R> {
    inner: R,
    chunk_size: usize,
    lookahead: Option<u8>,
    prev: u8,
    index: u64,
    bytes_read: u64,
    finished: bool,
}

impl<R: Read> ChunkReader<R> {
    pub fn new(inner: R, chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(DirhashError::InvalidChunkSize(chunk_size));
        }
        Ok(Self {
            inner,
            chunk_size,
            lookahead: None,
            prev: 0,
            index: 0,
            bytes_read: 0,
            finished: false,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Bytes handed out so far
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Next chunk, or `None` once the source is exhausted
    pub fn next_chunk(&mut self) -> Result<Option<Chunk>> {
        if self.finished {
            return Ok(None);
        }

        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(self.chunk_size)
            .map_err(|_| DirhashError::Allocation {
                what: "input chunk",
                bytes: self.chunk_size,
            })?;

        if let Some(byte) = self.lookahead.take() {
            bytes.push(byte);
        }
        let want = (self.chunk_size - bytes.len()) as u64;
        self.inner.by_ref().take(want).read_to_end(&mut bytes)?;

        if bytes.is_empty() {
            self.finished = true;
            return Ok(None);
        }

        // A short chunk means the source ran dry; skip the peek
        if bytes.len() == self.chunk_size {
            self.lookahead = self.peek_byte()?;
        }
        if self.lookahead.is_none() {
            self.finished = true;
        }

        let chunk = Chunk {
            index: self.index,
            prev: self.prev,
            next: self.lookahead.unwrap_or(0),
            bytes,
        };

        self.prev = chunk.bytes[chunk.len() - 1];
        self.index += 1;
        self.bytes_read += chunk.len() as u64;
        Ok(Some(chunk))
    }

    fn peek_byte(&mut self) -> Result<Option<u8>> {
        let mut one = [0u8; 1];
        loop {
            match self.inner.read(&mut one) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(one[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl<R: Read> Iterator for ChunkReader<R> {
    type Item = Result<Chunk>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_chunk().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn chunks(data: &[u8], size: usize) -> Vec<Chunk> {
        ChunkReader::new(Cursor::new(data.to_vec()), size)
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        assert!(matches!(
            ChunkReader::new(Cursor::new(Vec::new()), 0),
            Err(DirhashError::InvalidChunkSize(0))
        ));
    }

    #[test]
    fn test_empty_input_yields_no_chunks() {
        assert!(chunks(b"", 4).is_empty());
    }

    #[test]
    fn test_boundary_context() {
        let got = chunks(b"abcdefghij", 4);
        assert_eq!(got.len(), 3);

        assert_eq!(got[0].bytes, b"abcd");
        assert_eq!((got[0].prev, got[0].next), (0, b'e'));

        assert_eq!(got[1].bytes, b"efgh");
        assert_eq!((got[1].prev, got[1].next), (b'd', b'i'));

        assert_eq!(got[2].bytes, b"ij");
        assert_eq!((got[2].prev, got[2].next), (b'h', 0));
        assert_eq!(got[2].index, 2);
    }

    #[test]
    fn test_exact_multiple_has_no_trailing_chunk() {
        let got = chunks(b"abcdefgh", 4);
        assert_eq!(got.len(), 2);
        assert_eq!(got[1].next, 0);
    }

    #[test]
    fn test_neighbours() {
        let got = chunks(b"xyz", 8);
        let chunk = &got[0];
        assert_eq!(chunk.neighbours(0), (0, b'y'));
        assert_eq!(chunk.neighbours(1), (b'x', b'z'));
        assert_eq!(chunk.neighbours(2), (b'y', 0));
    }

    #[test]
    fn test_single_byte_chunks() {
        let got = chunks(b"abc", 1);
        assert_eq!(got.len(), 3);
        assert_eq!(got[1].neighbours(0), (b'a', b'c'));
    }

    #[test]
    fn test_bytes_read_tracks_input() {
        let mut reader = ChunkReader::new(Cursor::new(vec![7u8; 1000]), 64).unwrap();
        while reader.next_chunk().unwrap().is_some() {}
        assert_eq!(reader.bytes_read(), 1000);
        assert!(reader.next_chunk().unwrap().is_none());
    }
}

//! Deflate streams made only of stored (uncompressed) blocks.

use std::iter::FusedIterator;

/// Largest payload a stored block can carry, bounded by its 16-bit LEN field.
pub const MAX_STORED_LEN: usize = u16::MAX as usize;

/// BFINAL bit, LEN and NLEN.
const BLOCK_HEADER_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredBlock<'a> {
    is_final: bool,
    len: u16,
    data: &'a [u8],
}

impl<'a> StoredBlock<'a> {
    /// Returns `None` if `data` does not fit in a single stored block.
    pub fn new(data: &'a [u8], is_final: bool) -> Option<Self> {
        let len = u16::try_from(data.len()).ok()?;
        Some(Self {
            is_final,
            len,
            data,
        })
    }

    fn from_segment(data: &'a [u8], is_final: bool) -> Self {
        debug_assert!(
            data.len() <= MAX_STORED_LEN,
            "stored block segment of {} bytes",
            data.len()
        );
        Self {
            is_final,
            len: data.len() as u16,
            data,
        }
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn len(&self) -> u16 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Appends the block header (BTYPE 00) followed by the raw payload.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.push(u8::from(self.is_final));
        out.extend(self.len.to_le_bytes());
        out.extend((!self.len).to_le_bytes());
        out.extend_from_slice(self.data);
    }
}

/// Splits a buffer into stored blocks of at most [`MAX_STORED_LEN`] bytes.
///
/// Always yields at least one block; an empty input becomes a single empty
/// final block.
#[derive(Debug, Clone)]
pub struct StoredBlocks<'a> {
    remaining: &'a [u8],
    finished: bool,
}

impl<'a> StoredBlocks<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            remaining: data,
            finished: false,
        }
    }
}

impl<'a> Iterator for StoredBlocks<'a> {
    type Item = StoredBlock<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let (segment, rest) = self
            .remaining
            .split_at(self.remaining.len().min(MAX_STORED_LEN));
        self.remaining = rest;
        self.finished = rest.is_empty();
        Some(StoredBlock::from_segment(segment, self.finished))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = if self.finished {
            0
        } else {
            block_count(self.remaining.len())
        };
        (count, Some(count))
    }
}

impl ExactSizeIterator for StoredBlocks<'_> {}
impl FusedIterator for StoredBlocks<'_> {}

pub fn block_count(data_len: usize) -> usize {
    data_len.div_ceil(MAX_STORED_LEN).max(1)
}

/// Size of the deflate stream [`encode_stored`] produces for `data_len` bytes.
pub fn encoded_len(data_len: usize) -> usize {
    block_count(data_len) * BLOCK_HEADER_LEN + data_len
}

pub fn encode_stored_into(out: &mut Vec<u8>, data: &[u8]) {
    out.reserve(encoded_len(data.len()));
    let mut blocks = 0usize;
    for block in StoredBlocks::new(data) {
        block.write_to(out);
        blocks += 1;
    }
    log::trace!("wrote {blocks} stored block(s) for {} bytes", data.len());
}

pub fn encode_stored(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(data.len()));
    encode_stored_into(&mut out, data);
    out
}

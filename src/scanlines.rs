use std::{iter::FusedIterator, slice::ChunksExact};

/// Filter type 0: the row is stored unchanged.
pub const FILTER_NONE: u8 = 0;

/// Rows of RGB pixels paired with the filter byte that precedes them.
pub struct Scanlines<'a> {
    rows: ChunksExact<'a, u8>,
}

impl<'a> Scanlines<'a> {
    /// `row_len` is the unfiltered row size in bytes and must be non-zero.
    pub fn new(pixels: &'a [u8], row_len: usize) -> Self {
        Self {
            rows: pixels.chunks_exact(row_len),
        }
    }
}

impl<'a> Iterator for Scanlines<'a> {
    type Item = (u8, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next().map(|row| (FILTER_NONE, row))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl ExactSizeIterator for Scanlines<'_> {}
impl FusedIterator for Scanlines<'_> {}

/// Prepends the filter byte to every row, keeping row order.
pub(crate) fn filter_scanlines(pixels: &[u8], row_len: usize) -> Vec<u8> {
    let scanlines = Scanlines::new(pixels, row_len);
    let mut filtered = Vec::with_capacity(pixels.len() + scanlines.len());
    for (filter, row) in scanlines {
        filtered.push(filter);
        filtered.extend_from_slice(row);
    }
    filtered
}

use crate::{adler::adler32, deflate};

/// CM 8 (deflate) with a 32K window, no preset dictionary, FLEVEL 0.
/// `0x7801` is a multiple of 31 so FCHECK needs no adjustment.
pub const ZLIB_HEADER: [u8; 2] = [0x78, 0x01];

const TRAILER_LEN: usize = 4;

pub fn wrapped_len(data_len: usize) -> usize {
    ZLIB_HEADER.len() + deflate::encoded_len(data_len) + TRAILER_LEN
}

/// Wraps `data` in a zlib stream of stored blocks.
pub fn wrap(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(wrapped_len(data.len()));
    out.extend(ZLIB_HEADER);
    deflate::encode_stored_into(&mut out, data);
    // Adler-32 covers the uncompressed payload, not the block framing.
    out.extend(adler32(data).to_be_bytes());
    out
}

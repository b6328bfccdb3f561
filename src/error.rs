use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("expected {expected} bytes of RGB data for a {width}x{height} image, got {actual}")]
    InputSizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("image dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },
    #[error("a {width}x{height} image does not fit in memory")]
    ImageTooLarge { width: u32, height: u32 },
    #[error("{} chunk data is {length} bytes, more than a PNG chunk can hold", String::from_utf8_lossy(.chunk_type))]
    ChunkTooLarge { chunk_type: [u8; 4], length: usize },
}

mod adler;
pub mod chunks;
mod crc;
pub mod deflate;
mod error;
pub mod output;
mod png;
pub mod scanlines;
pub mod zlib;

pub use adler::adler32;
pub use crc::{crc32, Crc32};
pub use error::EncodeError;
pub use png::{encode, PNG};

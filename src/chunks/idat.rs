use std::borrow::Cow;

use nom::IResult;

use super::PngChunk;
use crate::zlib;

/// Image data. All stored blocks of the zlib stream live in a single IDAT.
#[derive(Debug)]
pub struct IDATChunk<T> {
    pub data: T,
}

impl IDATChunk<Vec<u8>> {
    pub fn from_scanlines(filtered: &[u8]) -> Self {
        Self {
            data: zlib::wrap(filtered),
        }
    }
}

impl<'a, T> PngChunk<'a> for IDATChunk<T>
where
    T: AsRef<[u8]> + From<&'a [u8]>,
{
    const HEADER: &'static [u8; 4] = b"IDAT";

    fn from_data(chunk_data: &'a [u8]) -> IResult<&'a [u8], Self> {
        Ok((
            &chunk_data[chunk_data.len()..],
            IDATChunk {
                data: chunk_data.into(),
            },
        ))
    }

    fn data(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.data.as_ref())
    }
}

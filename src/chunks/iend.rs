use std::borrow::Cow;

use nom::{combinator::eof, IResult};

use super::PngChunk;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IENDChunk;

impl<'a> PngChunk<'a> for IENDChunk {
    const HEADER: &'static [u8; 4] = b"IEND";

    fn from_data(chunk_data: &'a [u8]) -> IResult<&'a [u8], Self> {
        let (rest, _) = eof(chunk_data)?;
        Ok((rest, Self))
    }

    fn data(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(&[])
    }
}

use std::borrow::Cow;

use anyhow::anyhow;
use nom::{
    bytes::complete::{tag, take},
    combinator::{map_opt, map_res, verify},
    multi::length_data,
    number::complete::be_u32,
    IResult,
};

use crate::{crc::Crc32, error::EncodeError};

pub mod idat;
pub mod iend;
pub mod ihdr;

pub const SIGNATURE: &[u8; 8] = b"\x89PNG\x0d\x0a\x1a\x0a";

/// Largest length a chunk may declare (2^31 - 1).
pub const MAX_CHUNK_LEN: usize = i32::MAX as usize;

/// Length, type and CRC fields around the chunk data.
pub const CHUNK_OVERHEAD: usize = 12;

pub trait PngChunk<'a>: Sized {
    const HEADER: &'static [u8; 4];

    fn from_data(chunk_data: &'a [u8]) -> IResult<&'a [u8], Self>;
    fn data(&self) -> Cow<'_, [u8]>;

    fn write_to(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        write_chunk(out, Self::HEADER, &self.data())
    }

    fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        let mut bytes = Vec::new();
        self.write_to(&mut bytes)?;
        Ok(bytes)
    }
}

/// Appends one framed chunk: BE length, type, data, BE CRC of type and data.
pub fn write_chunk(
    out: &mut Vec<u8>,
    chunk_type: &[u8; 4],
    data: &[u8],
) -> Result<(), EncodeError> {
    let length = u32::try_from(data.len())
        .ok()
        .filter(|&len| len as usize <= MAX_CHUNK_LEN)
        .ok_or(EncodeError::ChunkTooLarge {
            chunk_type: *chunk_type,
            length: data.len(),
        })?;
    let mut crc = Crc32::new();
    crc.update(chunk_type);
    crc.update(data);

    out.reserve(data.len() + CHUNK_OVERHEAD);
    out.extend(length.to_be_bytes());
    out.extend(chunk_type);
    out.extend_from_slice(data);
    out.extend(crc.finish().to_be_bytes());
    log::trace!(
        "wrote {} chunk with {} data bytes",
        String::from_utf8_lossy(chunk_type),
        data.len()
    );
    Ok(())
}

pub fn parse_signature(input: &[u8]) -> IResult<&[u8], &[u8]> {
    tag(SIGNATURE.as_slice())(input)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawChunk<'a> {
    pub chunk_type: &'a [u8; 4],
    pub data: &'a [u8],
}

impl<'a> RawChunk<'a> {
    pub fn is<C: PngChunk<'a>>(&self) -> bool {
        self.chunk_type == C::HEADER
    }

    pub fn parse<C: PngChunk<'a>>(&self) -> anyhow::Result<C> {
        if !self.is::<C>() {
            anyhow::bail!(
                "expected a {} chunk, found {}",
                String::from_utf8_lossy(C::HEADER),
                String::from_utf8_lossy(self.chunk_type)
            );
        }
        let (_, chunk) = C::from_data(self.data).map_err(|e| {
            anyhow!(
                "malformed {} chunk: {}",
                String::from_utf8_lossy(C::HEADER),
                e.map(|err| err.code)
            )
        })?;
        Ok(chunk)
    }
}

/// Reads chunks after the signature until IEND, checking every CRC.
pub fn iter_chunks(source: &[u8]) -> ChunkIter<'_> {
    ChunkIter {
        source,
        offset: 0,
        finished: false,
    }
}

pub struct ChunkIter<'a> {
    source: &'a [u8],
    offset: usize,
    finished: bool,
}

impl<'a> Iterator for ChunkIter<'a> {
    type Item = anyhow::Result<RawChunk<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match valid_chunk(self.source) {
            Ok((rest, chunk)) => {
                self.offset += self.source.len() - rest.len();
                self.source = rest;
                if chunk.is::<iend::IENDChunk>() {
                    self.finished = true;
                }
                Some(Ok(chunk))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(anyhow!(
                    "invalid chunk at offset {}: {}",
                    self.offset,
                    e.map(|err| err.code)
                )))
            }
        }
    }
}

fn valid_chunk(input: &[u8]) -> IResult<&[u8], RawChunk<'_>> {
    let type_length = 4;
    let declared_length = verify(be_u32, |len: &u32| *len as usize <= MAX_CHUNK_LEN);
    let (rest, body) =
        length_data(map_opt(declared_length, |len: u32| len.checked_add(type_length)))(input)?;
    let (data, chunk_type) = map_res(take(type_length), <&[u8; 4]>::try_from)(body)?;
    let mut crc = Crc32::new();
    crc.update(body);
    let expected = crc.finish();
    let (rest, _) = verify(be_u32, |found: &u32| *found == expected)(rest)?;
    Ok((rest, RawChunk { chunk_type, data }))
}

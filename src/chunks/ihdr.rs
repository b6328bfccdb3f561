use std::borrow::Cow;

use anyhow::anyhow;
use nom::{
    combinator::{eof, map_res},
    number::complete::{be_u32, u8},
    sequence::{terminated, tuple},
    IResult,
};

use super::PngChunk;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IHDRChunk {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: ColorType,
    pub compression_method: u8,
    pub filter_method: u8,
    pub interlace_method: u8,
}

impl IHDRChunk {
    pub(crate) const DATA_LEN: usize = 13;

    /// Header for 8-bit truecolor, deflate, adaptive filtering, no interlace.
    pub fn rgb8(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bit_depth: 8,
            color_type: ColorType::Truecolor,
            compression_method: 0,
            filter_method: 0,
            interlace_method: 0,
        }
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.color_type.channel_count() as usize * usize::max(self.bit_depth as usize / 8, 1)
    }

    /// Unfiltered row size in bytes, or `None` on overflow.
    pub fn row_len(&self) -> Option<usize> {
        (self.width as usize).checked_mul(self.bytes_per_pixel())
    }
}

impl<'a> PngChunk<'a> for IHDRChunk {
    const HEADER: &'static [u8; 4] = b"IHDR";

    fn from_data(chunk_data: &'a [u8]) -> IResult<&'a [u8], Self> {
        let (rest, (width, height, bit_depth, color_type, methods)) = terminated(
            tuple((
                be_u32,
                be_u32,
                u8,
                map_res(u8, ColorType::try_from),
                tuple((u8, u8, u8)),
            )),
            eof,
        )(chunk_data)?;
        let (compression_method, filter_method, interlace_method) = methods;
        Ok((
            rest,
            IHDRChunk {
                width,
                height,
                bit_depth,
                color_type,
                compression_method,
                filter_method,
                interlace_method,
            },
        ))
    }

    fn data(&self) -> Cow<'_, [u8]> {
        let mut bytes = Vec::with_capacity(Self::DATA_LEN);
        bytes.extend(self.width.to_be_bytes());
        bytes.extend(self.height.to_be_bytes());
        bytes.extend([
            self.bit_depth,
            self.color_type as u8,
            self.compression_method,
            self.filter_method,
            self.interlace_method,
        ]);
        Cow::Owned(bytes)
    }
}

/// Only truecolor is written; other PNG color types are rejected when read.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ColorType {
    #[default]
    Truecolor = 2,
}

impl ColorType {
    pub fn channel_count(&self) -> u8 {
        match self {
            Self::Truecolor => 3,
        }
    }
}

impl TryFrom<u8> for ColorType {
    type Error = anyhow::Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Self::Truecolor),
            i => Err(anyhow!("unsupported color type {i}")),
        }
    }
}

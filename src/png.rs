use crate::{
    chunks::{
        idat::IDATChunk, iend::IENDChunk, ihdr::IHDRChunk, PngChunk, CHUNK_OVERHEAD,
        MAX_CHUNK_LEN, SIGNATURE,
    },
    error::EncodeError,
    scanlines::filter_scanlines,
    zlib,
};

/// An 8-bit RGB image whose pixel buffer has been checked against its size.
#[derive(Debug, Clone, Copy)]
pub struct PNG<'a> {
    header: IHDRChunk,
    row_len: usize,
    pixels: &'a [u8],
}

impl<'a> PNG<'a> {
    /// `pixels` is row-major RGB without padding, `3 * width * height` bytes.
    pub fn from_rgb(width: u32, height: u32, pixels: &'a [u8]) -> Result<Self, EncodeError> {
        if width == 0 || height == 0 {
            return Err(EncodeError::ZeroDimension { width, height });
        }
        let header = IHDRChunk::rgb8(width, height);
        let too_large = EncodeError::ImageTooLarge { width, height };
        let row_len = header.row_len().ok_or(too_large.clone())?;
        let expected = row_len.checked_mul(height as usize).ok_or(too_large)?;
        if pixels.len() != expected {
            return Err(EncodeError::InputSizeMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            header,
            row_len,
            pixels,
        })
    }

    pub fn header(&self) -> &IHDRChunk {
        &self.header
    }

    pub fn pixels(&self) -> &'a [u8] {
        self.pixels
    }

    /// Length of the filtered scanlines: one filter byte per row plus the pixels.
    fn filtered_len(&self) -> Option<usize> {
        self.pixels.len().checked_add(self.header.height as usize)
    }

    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let IHDRChunk { width, height, .. } = self.header;
        let filtered_len = self
            .filtered_len()
            .ok_or(EncodeError::ImageTooLarge { width, height })?;
        let idat_len = zlib::wrapped_len(filtered_len);
        if idat_len > MAX_CHUNK_LEN {
            return Err(EncodeError::ChunkTooLarge {
                chunk_type: *<IDATChunk<Vec<u8>> as PngChunk>::HEADER,
                length: idat_len,
            });
        }

        let filtered = filter_scanlines(self.pixels, self.row_len);
        debug_assert_eq!(filtered.len(), filtered_len);
        let idat = IDATChunk::from_scanlines(&filtered);
        log::debug!(
            "encoding {width}x{height} image: {} bytes of scanlines, {} byte zlib stream",
            filtered.len(),
            idat.data.len()
        );

        let mut bytes = Vec::with_capacity(
            SIGNATURE.len() + 3 * CHUNK_OVERHEAD + IHDRChunk::DATA_LEN + idat.data.len(),
        );
        bytes.extend(SIGNATURE);
        self.header.write_to(&mut bytes)?;
        idat.write_to(&mut bytes)?;
        IENDChunk.write_to(&mut bytes)?;
        Ok(bytes)
    }
}

/// Encodes row-major RGB pixels as a PNG whose image data is stored uncompressed.
pub fn encode(width: u32, height: u32, pixels: &[u8]) -> Result<Vec<u8>, EncodeError> {
    PNG::from_rgb(width, height, pixels)?.encode()
}

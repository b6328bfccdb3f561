use miniz_oxide::inflate::decompress_to_vec_zlib;
use proptest::prelude::*;
use stored_png::{
    chunks::{self, idat::IDATChunk, ihdr::IHDRChunk, RawChunk},
    deflate::{StoredBlocks, MAX_STORED_LEN},
    encode, EncodeError,
};

fn decode(png_bytes: &[u8]) -> (png::OutputInfo, Vec<u8>) {
    let decoder = png::Decoder::new(png_bytes);
    let mut reader = decoder.read_info().expect("valid PNG header");
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).expect("valid PNG image data");
    buf.truncate(info.buffer_size());
    (info, buf)
}

fn read_chunks(png_bytes: &[u8]) -> Vec<RawChunk<'_>> {
    let (rest, _) = chunks::parse_signature(png_bytes).expect("PNG signature");
    chunks::iter_chunks(rest)
        .collect::<anyhow::Result<_>>()
        .expect("well-formed chunks")
}

fn gradient(width: u32, height: u32) -> Vec<u8> {
    (0..height)
        .flat_map(|y| (0..width).flat_map(move |x| [x as u8, y as u8, (x ^ y) as u8]))
        .collect()
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[test]
fn single_pixel_snapshot() {
    let png_bytes = encode(1, 1, &[0xff, 0x00, 0x00]).unwrap();
    insta::assert_snapshot!(hex(&png_bytes), @"89504e470d0a1a0a0000000d4948445200000001000000010802000000907753de0000000f494441547801010400fbff00ff0000030101008d1de5820000000049454e44ae426082");
}

#[test]
fn decoder_reads_back_pixels() {
    let pixels = gradient(17, 9);
    let png_bytes = encode(17, 9, &pixels).unwrap();
    let (info, decoded) = decode(&png_bytes);
    assert_eq!((info.width, info.height), (17, 9));
    assert_eq!(info.color_type, png::ColorType::Rgb);
    assert_eq!(info.bit_depth, png::BitDepth::Eight);
    assert_eq!(decoded, pixels);
}

#[test]
fn file_is_ihdr_idat_iend() {
    let png_bytes = encode(3, 2, &gradient(3, 2)).unwrap();
    let chunks = read_chunks(&png_bytes);
    let types: Vec<_> = chunks.iter().map(|c| c.chunk_type).collect();
    assert_eq!(types, [b"IHDR", b"IDAT", b"IEND"]);

    let header: IHDRChunk = chunks[0].parse().unwrap();
    assert_eq!(header, IHDRChunk::rgb8(3, 2));
    assert!(chunks[2].data.is_empty());
}

#[test]
fn idat_holds_zero_filtered_scanlines() {
    let pixels = gradient(2, 3);
    let png_bytes = encode(2, 3, &pixels).unwrap();
    let chunks = read_chunks(&png_bytes);
    let idat: IDATChunk<&[u8]> = chunks[1].parse().unwrap();

    let scanlines = decompress_to_vec_zlib(idat.data).unwrap();
    let expected: Vec<u8> = pixels
        .chunks(6)
        .flat_map(|row| std::iter::once(0).chain(row.iter().copied()))
        .collect();
    assert_eq!(scanlines, expected);
}

#[test]
fn large_image_spans_several_stored_blocks_in_one_idat() {
    let (width, height) = (200, 150);
    let pixels = gradient(width, height);
    let png_bytes = encode(width, height, &pixels).unwrap();

    let chunks = read_chunks(&png_bytes);
    assert_eq!(chunks.iter().filter(|c| c.chunk_type == b"IDAT").count(), 1);
    let zlib = chunks[1].data;
    assert_eq!(&zlib[..2], &[0x78, 0x01]);
    // First block is full and not final.
    assert_eq!(&zlib[2..7], &[0x00, 0xff, 0xff, 0x00, 0x00]);

    let filtered_len = pixels.len() + height as usize;
    assert_eq!(StoredBlocks::new(&vec![0; filtered_len]).len(), 2);
    assert_eq!(decode(&png_bytes).1, pixels);
}

#[test]
fn mismatched_buffer_is_rejected() {
    let err = encode(4, 4, &gradient(4, 3)).unwrap_err();
    assert_eq!(
        err,
        EncodeError::InputSizeMismatch {
            width: 4,
            height: 4,
            expected: 48,
            actual: 36,
        }
    );
    assert_eq!(
        err.to_string(),
        "expected 48 bytes of RGB data for a 4x4 image, got 36"
    );
}

fn image() -> impl Strategy<Value = (u32, u32, Vec<u8>)> {
    (1u32..24, 1u32..24).prop_flat_map(|(width, height)| {
        (
            Just(width),
            Just(height),
            proptest::collection::vec(any::<u8>(), (3 * width * height) as usize),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn round_trips_through_decoder((width, height, pixels) in image()) {
        let png_bytes = encode(width, height, &pixels).unwrap();
        let (info, decoded) = decode(&png_bytes);
        prop_assert_eq!((info.width, info.height), (width, height));
        prop_assert_eq!(decoded, pixels);
    }

    #[test]
    fn chunk_lengths_and_crcs_match((width, height, pixels) in image()) {
        let png_bytes = encode(width, height, &pixels).unwrap();
        let mut rest = &png_bytes[8..];
        while !rest.is_empty() {
            let length = u32::from_be_bytes(rest[..4].try_into().unwrap()) as usize;
            let crc_start = 8 + length;
            let crc = u32::from_be_bytes(rest[crc_start..crc_start + 4].try_into().unwrap());
            prop_assert_eq!(crc, stored_png::crc32(&rest[4..crc_start]));
            rest = &rest[crc_start + 4..];
        }
    }

    #[test]
    fn stored_blocks_reassemble_input(len in 0usize..(MAX_STORED_LEN * 3)) {
        let data: Vec<u8> = (0..len).map(|i| (i * 31 % 251) as u8).collect();
        let blocks: Vec<_> = StoredBlocks::new(&data).collect();

        prop_assert!(blocks.iter().all(|b| b.data().len() <= MAX_STORED_LEN));
        prop_assert_eq!(blocks.iter().filter(|b| b.is_final()).count(), 1);
        prop_assert!(blocks.last().unwrap().is_final());
        let joined: Vec<u8> = blocks.iter().flat_map(|b| b.data()).copied().collect();
        prop_assert_eq!(&joined, &data);

        let stream = stored_png::zlib::wrap(&data);
        prop_assert_eq!(decompress_to_vec_zlib(&stream).unwrap(), data.as_slice());
    }
}

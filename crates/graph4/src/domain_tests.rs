//! Domain-critical regression tests for graph4.
//!
//! Each test pins down one property that downstream MSX loaders or users
//! rely on, and says what broke if it fails.

#[cfg(test)]
mod domain_tests {
    use crate::api::{EncodeError, Graph4Encoder};
    use crate::color::{reduce_channel, MsxColor, Rgb8};
    use crate::container::{Header, OutputFormat};
    use crate::dither::DitherAlgorithm;
    use crate::input::{ChannelLayout, SourceImage};
    use crate::pack::{pack_rows, unpack_rows, ViewportHeight, PAGE_BYTES};
    use crate::palette::{Palette, PalettePolicy};
    use pretty_assertions::assert_eq;

    /// Deterministic pseudo-random bytes (xorshift), no external crates.
    fn noise(len: usize, seed: u32) -> Vec<u8> {
        let mut state = seed.max(1);
        (0..len)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state >> 24) as u8
            })
            .collect()
    }

    fn rgba_from_colors(colors: &[MsxColor]) -> Vec<u8> {
        colors
            .iter()
            .flat_map(|c| {
                let rgb = c.to_rgb();
                [rgb.r, rgb.g, rgb.b, 255]
            })
            .collect()
    }

    // ========================================================================
    // Color reduction
    // ========================================================================

    /// If this breaks, it means: the 8-bit to 3-bit reducer is no longer
    /// monotonic or escapes 0..=7, so brighter inputs could map to darker
    /// MSX colors.
    #[test]
    fn test_reduce_monotonic_and_bounded() {
        let mut prev = 0;
        for c in 0..=255u8 {
            let r = reduce_channel(c);
            assert!(r <= 7, "REGRESSION: reduce({c}) = {r} out of range");
            assert!(r >= prev, "REGRESSION: reduce({c}) = {r} < reduce({}) = {prev}", c - 1);
            prev = r;
        }
    }

    // ========================================================================
    // Palette
    // ========================================================================

    /// If this breaks, it means: an image that already fits in 16 colors
    /// gets a palette that is not exactly its own colors sorted by use.
    #[test]
    fn test_small_image_palette_is_exact() {
        // 10 colors, color i used i + 1 times
        let mut pixels = Vec::new();
        let colors: Vec<MsxColor> = (0..10u16).map(|i| MsxColor::from_code(i * 50 + 3)).collect();
        for (i, &c) in colors.iter().enumerate() {
            pixels.extend(std::iter::repeat(c).take(i + 1));
        }
        let width = pixels.len();
        let data = rgba_from_colors(&pixels);
        let image = SourceImage::new(&data, width, 1, ChannelLayout::Rgba).unwrap();

        let result = Graph4Encoder::new().dithering(false).quantize(&image).unwrap();

        let expected: Vec<MsxColor> = colors.iter().rev().copied().collect();
        assert_eq!(&result.palette().entries()[..10], expected.as_slice());
        assert!(!result.stats().overflowed());
        // Without dithering every pixel hits its exact color
        for (i, &idx) in result.indices().iter().enumerate() {
            assert_eq!(result.palette().get(idx as usize), pixels[i]);
        }
    }

    /// If this breaks, it means: the fallback for images with too many
    /// colors panics or emits a malformed palette.
    #[test]
    fn test_overflow_is_not_an_error() {
        let data = noise(256 * 64 * 4, 7);
        let image = SourceImage::new(&data, 256, 64, ChannelLayout::Rgb).err();
        assert!(image.is_some(), "RGBA-sized buffer must not pass as RGB");

        let image = SourceImage::new(&data, 256, 64, ChannelLayout::Rgba).unwrap();
        for policy in [PalettePolicy::MostFrequent, PalettePolicy::MergeNearest] {
            let result = Graph4Encoder::new()
                .palette_policy(policy)
                .quantize(&image)
                .unwrap();
            assert!(result.stats().overflowed());
            assert_eq!(result.palette().used_colors(), 16);
        }
    }

    // ========================================================================
    // Transparency
    // ========================================================================

    /// If this breaks, it means: some dithering setting lets diffused error
    /// or the nearest-color search move a transparent pixel off index 0.
    #[test]
    fn test_transparent_pixels_always_index_zero() {
        let mut data = noise(256 * 32 * 4, 99);
        for (i, px) in data.chunks_exact_mut(4).enumerate() {
            if i % 7 == 0 {
                px[3] = 0;
            } else if i % 11 == 0 {
                px.copy_from_slice(&[255, 0, 255, 200]);
            } else {
                px[3] = 255;
            }
        }
        let image = SourceImage::new(&data, 256, 32, ChannelLayout::Rgba).unwrap();

        let settings = [
            (false, 1.0, DitherAlgorithm::FloydSteinberg),
            (true, 0.0, DitherAlgorithm::FloydSteinberg),
            (true, 1.0, DitherAlgorithm::FloydSteinberg),
            (true, 0.5, DitherAlgorithm::Atkinson),
            (true, 1.0, DitherAlgorithm::JarvisJudiceNinke),
        ];
        for (dither, strength, algo) in settings {
            let result = Graph4Encoder::new()
                .reserve_index0(true)
                .transparent_color(Some(Rgb8::new(255, 0, 255)))
                .dithering(dither)
                .dither_strength(strength)
                .algorithm(algo)
                .quantize(&image)
                .unwrap();
            for (i, &idx) in result.indices().iter().enumerate() {
                let transparent = i % 7 == 0 || i % 11 == 0;
                assert_eq!(
                    transparent,
                    idx == 0,
                    "REGRESSION: pixel {i} (transparent: {transparent}) got index {idx} \
                     with dither={dither} strength={strength} algo={algo}"
                );
            }
        }
    }

    // ========================================================================
    // Packing
    // ========================================================================

    /// If this breaks, it means: nibble order or row packing changed, and
    /// every exported picture is garbled on real hardware.
    #[test]
    fn test_pack_unpack_round_trip() {
        let packed = noise(128 * 50, 3);
        assert_eq!(pack_rows(&unpack_rows(&packed), 256), packed);
    }

    // ========================================================================
    // Containers
    // ========================================================================

    /// If this breaks, it means: the SC5 body no longer has the fixed size
    /// legacy loaders expect, or the palette moved out of its last 32 bytes.
    #[test]
    fn test_combined_single_page_size_and_palette_tail() {
        let data = noise(256 * 212 * 4, 11);
        let image = SourceImage::new(&data, 256, 212, ChannelLayout::Rgba).unwrap();
        let encoder = Graph4Encoder::new();

        let indexed = encoder.quantize(&image).unwrap();
        let container = encoder.pack(&indexed, OutputFormat::Combined).unwrap();
        let body = container.segment("SC5").unwrap().body();

        assert_eq!(body.len(), 256 * 128 + 32);
        assert_eq!(&body[body.len() - 32..], &indexed.palette().to_bytes());
    }

    /// If this breaks, it means: split output leaks palette bytes into the
    /// pattern file or pads one of them.
    #[test]
    fn test_split_sizes_add_up() {
        for height in [1, 212, 213, 848] {
            let data = vec![0x80; 256 * height * 3];
            let image = SourceImage::new(&data, 256, height, ChannelLayout::Rgb).unwrap();
            let container = Graph4Encoder::new()
                .encode(&image, OutputFormat::Split)
                .unwrap();

            let pattern = container.segment("SR5").unwrap().body().len();
            let palette = container.segment("PAL").unwrap().body().len();
            let pages = height.div_ceil(212);
            assert_eq!(pattern, pages * PAGE_BYTES);
            assert_eq!(pattern + palette, pages * PAGE_BYTES + 32);
        }
    }

    /// If this breaks, it means: the COPY size limit moved.
    #[test]
    fn test_raw_height_limit() {
        let encoder = Graph4Encoder::new();

        let ok = vec![0u8; 256 * 212 * 3];
        let image = SourceImage::new(&ok, 256, 212, ChannelLayout::Rgb).unwrap();
        assert!(encoder.encode(&image, OutputFormat::Raw).is_ok());

        let too_tall = vec![0u8; 256 * 213 * 3];
        let image = SourceImage::new(&too_tall, 256, 213, ChannelLayout::Rgb).unwrap();
        assert!(matches!(
            encoder.encode(&image, OutputFormat::Raw),
            Err(EncodeError::InvalidGeometry { height: 213, max_height: 212, .. })
        ));
    }

    /// If this breaks, it means: the fixed framing bytes changed.
    #[test]
    fn test_legacy_header_bytes() {
        assert_eq!(MsxColor::WHITE.register_bytes(), [0x77, 0x07]);

        let data = vec![255u8; 256 * 212 * 3];
        let image = SourceImage::new(&data, 256, 212, ChannelLayout::Rgb).unwrap();
        let container = Graph4Encoder::new().encode(&image, OutputFormat::Raw).unwrap();

        let dat = container.segment("DAT").unwrap().to_bytes();
        assert_eq!(&dat[..4], &[0x00, 0x01, 0xD4, 0x00]);
        let pal = container.segment("PAL").unwrap().to_bytes();
        assert_eq!(&pal[..7], &[0xFE, 0x80, 0x76, 0xA0, 0x76, 0x00, 0x00]);
        assert_eq!(&pal[7..9], &[0x77, 0x07]);
    }

    /// If this breaks, it means: tall images no longer continue at the top
    /// of the next page.
    #[test]
    fn test_viewport_row_starts_next_page() {
        let height = 193;
        let mut data = vec![0u8; 256 * height * 3];
        // Row 192 is white, everything else black
        data[192 * 256 * 3..193 * 256 * 3].fill(255);
        let image = SourceImage::new(&data, 256, height, ChannelLayout::Rgb).unwrap();

        let container = Graph4Encoder::new()
            .viewport_height(ViewportHeight::Lines192)
            .dithering(false)
            .bsave_header(false)
            .encode(&image, OutputFormat::Split)
            .unwrap();
        let sr5 = container.segment("SR5").unwrap();
        let palette = Palette::new(&[MsxColor::BLACK, MsxColor::WHITE], false).unwrap();
        assert_eq!(sr5.header(), None::<&Header>);
        // Black covers more pixels, so it is index 0 and white is index 1
        assert_eq!(&sr5.to_bytes()[PAGE_BYTES..PAGE_BYTES + 128], &[0x11; 128]);
        assert!(sr5.to_bytes()[..PAGE_BYTES].iter().all(|&b| b == 0));
        let pal = container.segment("PAL").unwrap().body().to_vec();
        assert_eq!(pal, palette.to_bytes().to_vec());
    }

    // ========================================================================
    // Dithering
    // ========================================================================

    /// If this breaks, it means: strength 0 still diffuses something, so
    /// "dithering at 0%" differs from "dithering off".
    #[test]
    fn test_zero_strength_matches_disabled() {
        let data = noise(256 * 48 * 3, 21);
        let image = SourceImage::new(&data, 256, 48, ChannelLayout::Rgb).unwrap();

        let off = Graph4Encoder::new().dithering(false).quantize(&image).unwrap();
        for algo in [DitherAlgorithm::FloydSteinberg, DitherAlgorithm::SierraTwoRow] {
            let zero = Graph4Encoder::new()
                .algorithm(algo)
                .dither_strength(0.0)
                .quantize(&image)
                .unwrap();
            assert_eq!(zero.indices(), off.indices(), "REGRESSION: {algo} at strength 0");
        }
    }

    /// If this breaks, it means: randomness or uninitialized state crept
    /// into the pipeline.
    #[test]
    fn test_repeated_runs_identical() {
        let data = noise(256 * 100 * 4, 5);
        let image = SourceImage::new(&data, 256, 100, ChannelLayout::Rgba).unwrap();
        let encoder = Graph4Encoder::new().dither_strength(0.75);

        let first = encoder.encode(&image, OutputFormat::Combined).unwrap();
        let second = encoder.encode(&image, OutputFormat::Combined).unwrap();
        assert_eq!(first, second);
    }
}

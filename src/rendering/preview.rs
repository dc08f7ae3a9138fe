//! PNG preview of an in-memory result.
//!
//! The preview is a 4-bit indexed PNG whose `PLTE` holds the 16 palette
//! entries expanded back to 8-bit. With index 0 reserved, a `tRNS` chunk
//! makes it transparent.

use graph4::{pack_rows, IndexedImage};

use crate::error::ExportError;

/// Render `image` as an optimized PNG.
pub fn render_preview(image: &IndexedImage) -> Result<Vec<u8>, ExportError> {
    let plte: Vec<u8> = image
        .palette()
        .entries()
        .iter()
        .flat_map(|c| {
            let rgb = c.to_rgb();
            [rgb.r, rgb.g, rgb.b]
        })
        .collect();
    let trns = image.palette().is_index0_reserved().then(|| vec![0u8]);

    // Two indices per byte, left pixel in the high nibble: PNG's 4-bit layout
    let packed = pack_rows(image.indices(), image.width());

    // Encode PNG (fast settings, oxipng will re-compress)
    let png_bytes = encode_png(
        image.width() as u32,
        image.height() as u32,
        &plte,
        trns,
        &packed,
    )?;

    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    )
    .unwrap_or(png_bytes);
    Ok(optimized)
}

/// Encode 4-bit packed indices as an indexed PNG.
fn encode_png(
    width: u32,
    height: u32,
    plte: &[u8],
    trns: Option<Vec<u8>>,
    packed: &[u8],
) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(png::BitDepth::Four);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        encoder.set_palette(plte.to_vec());
        if let Some(trns) = trns {
            encoder.set_trns(trns);
        }
        let mut writer = encoder
            .write_header()
            .map_err(|e| ExportError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(packed)
            .map_err(|e| ExportError::PngEncode(e.to_string()))?;
    }
    Ok(buf)
}

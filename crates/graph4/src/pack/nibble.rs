use super::geometry::{PageGeometry, BYTES_PER_ROW, SCREEN_WIDTH};

#[inline]
fn pack_pair(left: u8, right: u8) -> u8 {
    (left & 0x0F) << 4 | (right & 0x0F)
}

/// Pack a 256-wide index image into whole VRAM pages.
///
/// Image row `y` lands on page `y / viewport`, page row `y % viewport`.
/// Everything not covered by the image stays zero.
///
/// # Panics
///
/// Panics if `indices` is not `256 * height` long or the height exceeds the
/// geometry. The encoder validates both before packing.
pub fn pack_pages(indices: &[u8], height: usize, geometry: &PageGeometry) -> Vec<u8> {
    assert_eq!(indices.len(), SCREEN_WIDTH * height, "index buffer size");
    assert!(height <= geometry.max_rows(), "image taller than its pages");

    let mut out = vec![0u8; geometry.pattern_len()];
    for (y, row) in indices.chunks_exact(SCREEN_WIDTH).enumerate() {
        let start = geometry.row_offset(y);
        for (byte, pair) in out[start..start + BYTES_PER_ROW]
            .iter_mut()
            .zip(row.chunks_exact(2))
        {
            *byte = pack_pair(pair[0], pair[1]);
        }
    }
    out
}

/// Pack rows back to back with no page padding.
///
/// Each row takes `ceil(width / 2)` bytes; an odd last pixel gets a zero low
/// nibble.
///
/// ```
/// use graph4::pack_rows;
///
/// assert_eq!(pack_rows(&[1, 2, 3, 4, 5, 6], 3), vec![0x12, 0x30, 0x45, 0x60]);
/// ```
pub fn pack_rows(indices: &[u8], width: usize) -> Vec<u8> {
    if width == 0 {
        return Vec::new();
    }
    let row_bytes = width.div_ceil(2);
    let mut out = Vec::with_capacity(row_bytes * indices.len().div_ceil(width));
    for row in indices.chunks(width) {
        for pair in row.chunks(2) {
            out.push(pack_pair(pair[0], pair.get(1).copied().unwrap_or(0)));
        }
    }
    out
}

/// Split every byte into two indices, high nibble first.
pub fn unpack_rows(packed: &[u8]) -> Vec<u8> {
    packed.iter().flat_map(|&b| [b >> 4, b & 0x0F]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::{ViewportHeight, PAGE_BYTES};

    #[test]
    fn test_high_nibble_is_left_pixel() {
        assert_eq!(pack_rows(&[0xA, 0x5], 2), vec![0xA5]);
    }

    #[test]
    fn test_unpack_then_pack_is_identity() {
        let packed: Vec<u8> = (0..=255u8).collect();
        let indices = unpack_rows(&packed);
        assert_eq!(indices.len(), 512);
        assert!(indices.iter().all(|&i| i < 16));
        assert_eq!(pack_rows(&indices, 256), packed);
    }

    #[test]
    fn test_single_page_layout() {
        let geometry = PageGeometry::for_height(2, ViewportHeight::Lines212).unwrap();
        let mut indices = vec![0u8; 512];
        indices[0] = 1;
        indices[255] = 2;
        indices[256] = 3;

        let out = pack_pages(&indices, 2, &geometry);
        assert_eq!(out.len(), PAGE_BYTES);
        assert_eq!(out[0], 0x10);
        assert_eq!(out[127], 0x02);
        assert_eq!(out[128], 0x30);
        assert!(out[256..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_row_viewport_starts_next_page() {
        let height = 193;
        let geometry = PageGeometry::for_height(height, ViewportHeight::Lines192).unwrap();
        let mut indices = vec![0u8; 256 * height];
        indices[192 * 256] = 0xF;
        indices[192 * 256 + 1] = 0xE;

        let out = pack_pages(&indices, height, &geometry);
        assert_eq!(out.len(), 2 * PAGE_BYTES);
        assert_eq!(out[PAGE_BYTES], 0xFE);
        // Rows 192..256 of page 0 are padding
        assert!(out[192 * 128..PAGE_BYTES].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_pack_rows_matches_pages_for_one_screen() {
        let indices: Vec<u8> = (0..256 * 212).map(|i| (i % 16) as u8).collect();
        let geometry = PageGeometry::for_height(212, ViewportHeight::Lines212).unwrap();
        let pages = pack_pages(&indices, 212, &geometry);
        let rows = pack_rows(&indices, 256);
        assert_eq!(rows.len(), 128 * 212);
        assert_eq!(&pages[..rows.len()], rows.as_slice());
    }
}

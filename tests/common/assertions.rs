//! Assertion helpers for tests.

use pretty_assertions::assert_eq;

/// Assert a `BSAVE` header with the given addresses.
pub fn assert_bsave(bytes: &[u8], start: u16, end: u16) {
    assert!(bytes.len() >= 7, "file too short for a BSAVE header");
    assert_eq!(bytes[0], 0xFE, "BSAVE magic");
    assert_eq!(u16::from_le_bytes([bytes[1], bytes[2]]), start, "start address");
    assert_eq!(u16::from_le_bytes([bytes[3], bytes[4]]), end, "end address");
    assert_eq!(u16::from_le_bytes([bytes[5], bytes[6]]), 0, "exec address");
}

/// Assert a 32-byte palette block holds `colors` (3-bit r, g, b) first.
pub fn assert_palette_starts_with(palette: &[u8], colors: &[(u8, u8, u8)]) {
    assert_eq!(palette.len(), 32, "palette block size");
    for (i, &(r, g, b)) in colors.iter().enumerate() {
        assert_eq!(
            [palette[i * 2], palette[i * 2 + 1]],
            [r << 4 | b, g],
            "palette entry {i}"
        );
    }
}

//! Nibble packing into GRAPHICS 4 VRAM pages.
//!
//! Two pixels share one byte, the left pixel in the high nibble. A page is
//! 256 rows of 128 bytes; only the first `viewport` rows of each page carry
//! image data, so a tall image continues on the next page.

mod geometry;
mod nibble;

pub use geometry::{PageGeometry, ViewportHeight, BYTES_PER_ROW, MAX_PAGES, PAGE_BYTES, PAGE_ROWS, SCREEN_WIDTH};
pub use nibble::{pack_pages, pack_rows, unpack_rows};

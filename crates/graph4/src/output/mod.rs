//! In-memory result of the quantizer.

mod indexed_image;

pub use indexed_image::IndexedImage;

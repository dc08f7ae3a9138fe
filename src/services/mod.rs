pub mod exporter;
pub mod image_loader;

pub use exporter::{run_export, write_files, ExportOutcome};
pub use image_loader::{decode_png, load_png, LoadedImage};

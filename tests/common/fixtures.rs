//! Test fixtures: synthetic PNG inputs and export settings.

use std::path::{Path, PathBuf};

use msx_g4::models::{ExportConfig, ExportSettings};

/// Output file names of a job, sorted.
pub fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Encode 8-bit RGBA pixels as a PNG file.
pub fn write_rgba_png(path: &Path, width: u32, height: u32, rgba: &[u8]) {
    let file = std::fs::File::create(path).unwrap();
    let mut encoder = png::Encoder::new(std::io::BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(rgba).unwrap();
}

/// A vertical 8-band color chart, `height` rows tall and 256 wide.
///
/// Every band is a pure MSX color, so without dithering the palette is
/// exactly these 8 colors.
pub fn color_bars(height: usize) -> Vec<u8> {
    const BANDS: [[u8; 3]; 8] = [
        [0, 0, 0],
        [255, 0, 0],
        [0, 255, 0],
        [0, 0, 255],
        [255, 255, 0],
        [0, 255, 255],
        [255, 0, 255],
        [255, 255, 255],
    ];
    let mut rgba = Vec::with_capacity(256 * height * 4);
    for _ in 0..height {
        for x in 0..256 {
            let [r, g, b] = BANDS[x / 32];
            rgba.extend_from_slice(&[r, g, b, 255]);
        }
    }
    rgba
}

/// Same as [`color_bars`] with a fully transparent square in the top-left.
pub fn color_bars_with_hole(height: usize) -> Vec<u8> {
    let mut rgba = color_bars(height);
    for y in 0..16.min(height) {
        for x in 0..16 {
            rgba[(y * 256 + x) * 4 + 3] = 0;
        }
    }
    rgba
}

/// Write `rgba` as `input.png` in `dir` and return its path.
pub fn input_png(dir: &Path, height: usize, rgba: &[u8]) -> PathBuf {
    let path = dir.join("input.png");
    write_rgba_png(&path, 256, height as u32, rgba);
    path
}

/// Resolved settings writing to `dir` with the given YAML on top.
pub fn settings(dir: &Path, yaml: &str) -> ExportSettings {
    let mut config = ExportConfig::from_yaml(yaml).unwrap();
    config.output_dir = dir.to_path_buf();
    config.resolve().unwrap()
}

//! End-to-end export tests: PNG file in, MSX files out.

mod common;

use common::*;
use graph4::{EncodeError, PAGE_BYTES};
use msx_g4::error::ExportError;
use msx_g4::services::{load_png, run_export, ExportOutcome};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn export(dir: &TempDir, height: usize, rgba: &[u8], yaml: &str) -> Result<ExportOutcome, ExportError> {
    let input = input_png(dir.path(), height, rgba);
    let out = dir.path().join("out");
    let loaded = load_png(&input)?;
    run_export(&loaded.source()?, &settings(&out, yaml))
}

#[test]
fn test_combined_export() {
    let dir = TempDir::new().unwrap();
    let outcome = export(&dir, 212, &color_bars(212), "dithering: false").unwrap();

    let out = dir.path().join("out");
    assert_eq!(dir_entries(&out), vec!["NONAME.SC5"]);
    assert_eq!(outcome.paths().len(), 1);

    let sc5 = std::fs::read(out.join("NONAME.SC5")).unwrap();
    assert_eq!(sc5.len(), 7 + PAGE_BYTES + 32);
    assert_bsave(&sc5, 0, (PAGE_BYTES + 32) as u16);

    // Equal band widths: palette in 9-bit code order
    let palette = &sc5[sc5.len() - 32..];
    assert_palette_starts_with(
        palette,
        &[(0, 0, 0), (0, 0, 7), (0, 7, 0), (0, 7, 7), (7, 0, 0)],
    );
    // Stamped copy in the VRAM palette table
    assert_eq!(&sc5[7 + 0x7680..7 + 0x76A0], palette);

    // Band 0 is black (index 0), band 1 is red (index 4)
    assert_eq!(sc5[7], 0x00);
    assert_eq!(sc5[7 + 16], 0x44);
}

#[test]
fn test_split_export_with_transparency() {
    let dir = TempDir::new().unwrap();
    let yaml = "reserve_index_0: true\noutput_format: split\nname: BARS\ndithering: false";
    export(&dir, 100, &color_bars_with_hole(100), yaml).unwrap();

    let out = dir.path().join("out");
    assert_eq!(dir_entries(&out), vec!["BARS.PAL", "BARS.SR5"]);

    let sr5 = std::fs::read(out.join("BARS.SR5")).unwrap();
    assert_eq!(sr5.len(), 7 + PAGE_BYTES);
    // Transparent corner is index 0, the rest of band 0 is black at index >= 1
    assert_eq!(sr5[7], 0x00);
    assert_ne!(sr5[7 + 8], 0x00);

    let pal = std::fs::read(out.join("BARS.PAL")).unwrap();
    assert_eq!(&pal[..7], &[0xFE, 0x80, 0x76, 0xA0, 0x76, 0x00, 0x00]);
    assert_eq!(&pal[7..9], &[0x00, 0x00], "sentinel is black");
}

#[test]
fn test_raw_copy_export() {
    let dir = TempDir::new().unwrap();
    export(&dir, 212, &color_bars(212), "output_format: raw").unwrap();

    let out = dir.path().join("out");
    assert_eq!(dir_entries(&out), vec!["NONAME.DAT", "NONAME.PAL"]);
    let dat = std::fs::read(out.join("NONAME.DAT")).unwrap();
    assert_eq!(&dat[..4], &[0x00, 0x01, 0xD4, 0x00]);
    assert_eq!(dat.len(), 4 + 128 * 212);
}

#[test]
fn test_raw_rejects_tall_image() {
    let dir = TempDir::new().unwrap();
    let err = export(&dir, 213, &color_bars(213), "output_format: raw").unwrap_err();

    assert!(matches!(
        err,
        ExportError::Encode(EncodeError::InvalidGeometry { height: 213, max_height: 212, .. })
    ));
    assert!(!dir.path().join("out").exists(), "nothing may be created");
}

#[test]
fn test_multi_page_headerless_with_extras() {
    let dir = TempDir::new().unwrap();
    let yaml = "output_format: headerless\nexport_palette: true\npalette_text: true\nviewport_height: 192";
    export(&dir, 400, &color_bars(400), yaml).unwrap();

    let out = dir.path().join("out");
    assert_eq!(
        dir_entries(&out),
        vec!["NONAME.PAL", "NONAME.RAW", "NONAME.TXT"]
    );
    let raw = std::fs::read(out.join("NONAME.RAW")).unwrap();
    assert_eq!(raw.len(), 128 * 400);
    let text = std::fs::read_to_string(out.join("NONAME.TXT")).unwrap();
    assert_eq!(text.lines().count(), 17);
}

#[test]
fn test_in_memory_export_touches_nothing() {
    let dir = TempDir::new().unwrap();
    let outcome = export(&dir, 50, &color_bars(50), "write_to_disk: false").unwrap();

    let image = outcome.image();
    assert_eq!((image.width(), image.height()), (256, 50));
    assert_eq!(image.palette().used_colors(), 8);
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_split_four_pages_saturates_bsave_end() {
    let dir = TempDir::new().unwrap();
    export(&dir, 848, &color_bars(848), "output_format: split").unwrap();

    let sr5 = std::fs::read(dir.path().join("out").join("NONAME.SR5")).unwrap();
    assert_eq!(sr5.len(), 7 + 4 * PAGE_BYTES);
    assert_bsave(&sr5, 0, 0xFFFF);
}

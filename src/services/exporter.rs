//! The export job: quantize, frame and write.
//!
//! All output files of a job are built in memory, staged as temporary files
//! next to their final location and only then renamed into place. If any
//! step fails the staged files are dropped and files already renamed by
//! this job are removed again.

use graph4::{IndexedImage, SourceImage};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::ExportError;
use crate::models::ExportSettings;

/// What an export job produced.
#[derive(Debug)]
pub enum ExportOutcome {
    /// Files written, in write order.
    Written {
        paths: Vec<PathBuf>,
        image: IndexedImage,
    },
    /// `write_to_disk` was off; nothing touched the filesystem.
    InMemory(IndexedImage),
}

impl ExportOutcome {
    pub fn image(&self) -> &IndexedImage {
        match self {
            ExportOutcome::Written { image, .. } => image,
            ExportOutcome::InMemory(image) => image,
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        match self {
            ExportOutcome::Written { paths, .. } => paths,
            ExportOutcome::InMemory(_) => &[],
        }
    }
}

/// Run one export job.
///
/// On the disk path the image size is checked against the output format
/// before anything else happens.
pub fn run_export(
    image: &SourceImage<'_>,
    settings: &ExportSettings,
) -> Result<ExportOutcome, ExportError> {
    let encoder = &settings.encoder;

    if !settings.write_to_disk {
        let indexed = encoder.quantize(image)?;
        log_palette(&indexed);
        return Ok(ExportOutcome::InMemory(indexed));
    }

    encoder.check_geometry(image.width(), image.height(), settings.format)?;
    let indexed = encoder.quantize(image)?;
    log_palette(&indexed);
    let container = encoder.pack(&indexed, settings.format)?;

    let mut files: Vec<(String, Vec<u8>)> = container
        .into_segments()
        .into_iter()
        .map(|s| (format!("{}.{}", settings.name, s.extension()), s.to_bytes()))
        .collect();
    if settings.palette_text {
        files.push((
            format!("{}.TXT", settings.name),
            indexed.palette().to_text().into_bytes(),
        ));
    }

    let paths = write_files(&settings.output_dir, &files)?;
    for (path, (_, bytes)) in paths.iter().zip(&files) {
        tracing::info!(path = %path.display(), bytes = bytes.len(), "Wrote file");
    }

    Ok(ExportOutcome::Written {
        paths,
        image: indexed,
    })
}

fn log_palette(image: &IndexedImage) {
    let stats = image.stats();
    tracing::debug!(
        distinct = stats.distinct_colors,
        capacity = stats.capacity,
        transparent = stats.transparent_pixels,
        "Built palette"
    );
    if stats.overflowed() {
        tracing::warn!(
            distinct = stats.distinct_colors,
            capacity = stats.capacity,
            "Image has more colors than palette slots, using fallback policy"
        );
    }
}

/// Write `files` into `dir` as one unit.
///
/// Returns the final paths. Either every file is in place afterwards or
/// none written by this call is.
pub fn write_files(dir: &Path, files: &[(String, Vec<u8>)]) -> Result<Vec<PathBuf>, ExportError> {
    std::fs::create_dir_all(dir).map_err(|e| ExportError::io(dir, e))?;

    let mut staged = Vec::with_capacity(files.len());
    for (name, bytes) in files {
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ExportError::io(dir, e))?;
        tmp.write_all(bytes)
            .and_then(|_| tmp.flush())
            .map_err(|e| ExportError::io(tmp.path(), e))?;
        staged.push((tmp, dir.join(name)));
    }

    let mut persisted: Vec<PathBuf> = Vec::with_capacity(staged.len());
    for (tmp, target) in staged {
        if let Err(e) = tmp.persist(&target) {
            for path in &persisted {
                if let Err(remove_err) = std::fs::remove_file(path) {
                    tracing::warn!(path = %path.display(), %remove_err, "Failed to roll back file");
                }
            }
            return Err(ExportError::io(target, e.error));
        }
        persisted.push(target);
    }

    Ok(persisted)
}

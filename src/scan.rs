//! Filesystem scanning and image-set grouping.
//!
//! Stage 1 of the pipeline: walk the input tree, keep TIFF exports that are
//! not thumbnails, parse each file name, and insert every image into the
//! [`ImageIndex`] keyed by (date, barcode, well, site, channel).
//!
//! Two conditions degrade rather than fail:
//! - a name missing the `YYMMDD-` prefix parses through the fallback grammar
//!   with today's date, and a warning is recorded;
//! - two files landing on the same full key path are a collision: the later
//!   file wins and a warning is recorded.
//!
//! A name matching neither grammar aborts the whole scan. Nothing is written
//! anywhere at this stage, so an abort leaves no partial output behind.

use crate::index::{ImageIndex, ImageKey, ImageRecord, SiteKey};
use crate::naming;
use chrono::Local;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("file name not matching any known pattern: '{0}'")]
    UnparseableName(String),
    #[error("no image files found under {0}")]
    NoImages(PathBuf),
}

/// Grouped images plus the warnings accumulated while grouping.
///
/// Warnings are one line per occurrence, ready to print to stderr.
#[derive(Debug)]
pub struct ScanResult {
    pub index: ImageIndex,
    pub warnings: Vec<String>,
}

/// Recursively scan `root` and group every TIFF export into an image index.
///
/// `barcode_override` replaces the parsed barcode for every file; the
/// per-file date still comes from the parse (or from today's date when the
/// fallback grammar fired).
pub fn scan(root: &Path, barcode_override: Option<&str>) -> Result<ScanResult, ScanError> {
    let mut index = ImageIndex::new();
    let mut warnings = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if !naming::has_image_extension(entry.path()) {
            continue;
        }
        let filename = entry.file_name().to_string_lossy().to_string();
        if naming::is_thumbnail(&filename) {
            continue;
        }

        let info = naming::parse_image_name(&filename)
            .ok_or_else(|| ScanError::UnparseableName(filename.clone()))?;

        let barcode = match barcode_override {
            Some(b) => b.to_string(),
            None => info.barcode.clone(),
        };
        let date = match &info.date {
            Some(d) => d.clone(),
            None => {
                let today = Local::now().format("%y%m%d").to_string();
                warnings.push(format!(
                    "Unable to parse date and barcode from image file name ({}), \
                     falling back to a more relaxed pattern, using \"{}\" as barcode \
                     and {} as date.",
                    filename, info.barcode, today
                ));
                today
            }
        };

        let abs = std::path::absolute(entry.path())?;
        let directory = abs.parent().unwrap_or(Path::new("/")).to_path_buf();

        let key = ImageKey {
            date,
            barcode,
            well: info.well.clone(),
            site: SiteKey::new(&info.site),
            channel: info.channel,
        };
        let record = ImageRecord {
            filename: filename.clone(),
            directory,
        };
        if let Some(displaced) = index.insert(key, record) {
            warnings.push(format!(
                "Image {} maps to the same (date, barcode, well, site, channel) \
                 as {}; keeping the newer file.",
                filename, displaced.filename
            ));
        }
    }

    if index.is_empty() {
        return Err(ScanError::NoImages(root.to_path_buf()));
    }

    Ok(ScanResult { index, warnings })
}

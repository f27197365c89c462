//! # Archive Extractor
//!
//! Materializes a zip archive under a destination directory, preserving
//! relative paths.
//!
//! Every entry name is confined to the destination before anything is
//! written for it: absolute names and names containing `..` abort the whole
//! extraction with [`ExtractError::UnsafeEntry`]. Extraction stops at the
//! first failure and leaves already-written files in place; callers extract
//! into a staging directory they can discard (see [`crate::store`]).

use std::fs;
use std::io::{self, Read, Seek};
use std::path::{Component, Path, PathBuf};

use zip::ZipArchive;

use crate::error::ExtractError;

/// Counts reported after a successful extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Regular files written.
    pub files: usize,
    /// Directory entries created.
    pub directories: usize,
    /// Decompressed bytes written.
    pub bytes: u64,
}

/// Open a random-access zip reader over the payload.
///
/// Only the central directory is read here, so a payload that is not an
/// archive is rejected before any storage is touched.
pub fn open_archive<R: Read + Seek>(reader: R) -> Result<ZipArchive<R>, ExtractError> {
    ZipArchive::new(reader).map_err(ExtractError::InvalidArchive)
}

/// Extract every entry of `archive` under `destination`.
pub fn extract_archive<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    destination: &Path,
) -> Result<ExtractSummary, ExtractError> {
    let mut summary = ExtractSummary::default();

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|source| ExtractError::Entry { index, source })?;

        let name = entry.name().to_string();
        let relative = match entry.enclosed_name() {
            Some(path) => confine(&name, path.to_path_buf())?,
            None => return Err(ExtractError::UnsafeEntry { name }),
        };
        let output_path = destination.join(&relative);

        if entry.is_dir() {
            create_dir_all(&output_path)?;
            summary.directories += 1;
            continue;
        }

        if let Some(parent) = output_path.parent() {
            create_dir_all(parent)?;
        }
        let mut outfile = fs::File::create(&output_path).map_err(|source| ExtractError::Io {
            path: output_path.clone(),
            source,
        })?;
        let written = copy_entry(&mut entry, &mut outfile, &name, &output_path)?;

        tracing::trace!(entry = %name, bytes = written, "extracted archive entry");
        summary.files += 1;
        summary.bytes += written;
    }

    Ok(summary)
}

/// Reject any relative path that is not made of plain segments.
///
/// `enclosed_name` already refuses absolute paths and paths that climb above
/// the root; this additionally refuses `..` anywhere, even when it would be
/// cancelled by an earlier segment.
fn confine(name: &str, path: PathBuf) -> Result<PathBuf, ExtractError> {
    let plain = path
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if plain {
        Ok(path)
    } else {
        Err(ExtractError::UnsafeEntry {
            name: name.to_string(),
        })
    }
}

fn create_dir_all(path: &Path) -> Result<(), ExtractError> {
    fs::create_dir_all(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Stream one entry into its output file.
///
/// Read-side failures surface as `InvalidData`/`UnexpectedEof` from the
/// decompressor or CRC check and are attributed to the archive.
fn copy_entry(
    entry: &mut impl Read,
    outfile: &mut fs::File,
    name: &str,
    output_path: &Path,
) -> Result<u64, ExtractError> {
    io::copy(entry, outfile).map_err(|source| match source.kind() {
        io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => ExtractError::Corrupt {
            name: name.to_string(),
            source,
        },
        _ => ExtractError::Io {
            path: output_path.to_path_buf(),
            source,
        },
    })
}

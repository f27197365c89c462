//! Build storage error types.

use std::io;
use std::path::PathBuf;

use s42_core::BuildVersion;
use thiserror::Error;
use zip::result::ZipError;

/// Errors from unpacking an uploaded archive.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The payload could not be opened as a zip archive.
    #[error("payload is not a valid zip archive: {0}")]
    InvalidArchive(#[source] ZipError),

    /// An entry is absolute or climbs out of the destination with `..`.
    #[error("archive entry \"{name}\" escapes the destination directory")]
    UnsafeEntry { name: String },

    /// The central directory record for an entry could not be read.
    #[error("failed to read archive entry #{index}: {source}")]
    Entry {
        index: usize,
        #[source]
        source: ZipError,
    },

    /// Entry data failed to decompress or did not match its checksum.
    #[error("archive entry \"{name}\" is corrupt: {source}")]
    Corrupt {
        name: String,
        #[source]
        source: io::Error,
    },

    /// Writing to the destination failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ExtractError {
    /// Whether the failure is caused by the uploaded payload rather than the server.
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::InvalidArchive(_) | Self::UnsafeEntry { .. } | Self::Corrupt { .. } => true,
            Self::Entry { source, .. } => !matches!(source, ZipError::Io(_)),
            Self::Io { .. } => false,
        }
    }
}

/// Errors reading a game's build directory.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The directory could not be enumerated.
    #[error("build directory {} unavailable: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    /// The directory does not exist, which is the normal state of a game with no uploads.
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Unavailable { source, .. } => source.kind() == io::ErrorKind::NotFound,
        }
    }
}

/// Errors from publishing an upload as a new build.
#[derive(Error, Debug)]
pub enum PublishError {
    /// The archive was rejected or could not be extracted.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Existing builds could not be listed, so no version could be allocated.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Creating or promoting the staging directory failed.
    #[error("staging I/O failed at {}: {source}", path.display())]
    Staging {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The allocated version directory appeared before promotion.
    #[error("build version {0} already exists")]
    VersionTaken(BuildVersion),

    /// The blocking extraction worker panicked or was cancelled.
    #[error("build worker failed: {0}")]
    Worker(String),
}

//! Alignment file ingestion
//!
//! Validates files before reading them, checking for:
//! - File existence and permissions
//! - File size limits
//! - Binary content
//!
//! and then runs file-type detection and the FASTA parser.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::msa::{detect_file_type, parse_fasta, AlignmentMatrix, FileKind};

/// Maximum file size in bytes (50 MB)
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Errors that can occur when opening an alignment file
#[derive(Debug, Clone, PartialEq)]
pub enum IngestError {
    /// File does not exist
    NotFound,
    /// Permission denied to read file
    PermissionDenied,
    /// Path is a directory, not a file
    IsDirectory,
    /// File appears to be binary (contains null bytes)
    BinaryFile,
    /// File exceeds size limit
    TooLarge { size_mb: f64 },
    /// Neither the extension nor the content looks like an alignment
    NotAlignment,
    /// Other I/O error
    IoError(String),
}

impl IngestError {
    /// Get a user-friendly error message
    pub fn user_message(&self, filename: &str) -> String {
        match self {
            Self::NotFound => format!("File not found: {}", filename),
            Self::PermissionDenied => format!("Permission denied: {}", filename),
            Self::IsDirectory => format!("Cannot open directory: {}", filename),
            Self::BinaryFile => format!("Cannot open binary file: {}", filename),
            Self::TooLarge { size_mb } => {
                format!(
                    "{} is too large ({:.1} MB, max {} MB)",
                    filename,
                    size_mb,
                    MAX_FILE_SIZE / (1024 * 1024)
                )
            }
            Self::NotAlignment => format!("Not an alignment file: {}", filename),
            Self::IoError(msg) => format!("Error opening {}: {}", filename, msg),
        }
    }
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "file not found"),
            Self::PermissionDenied => write!(f, "permission denied"),
            Self::IsDirectory => write!(f, "is a directory"),
            Self::BinaryFile => write!(f, "binary file"),
            Self::TooLarge { size_mb } => write!(f, "file too large ({:.1} MB)", size_mb),
            Self::NotAlignment => write!(f, "not an alignment file"),
            Self::IoError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for IngestError {}

impl From<std::io::Error> for IngestError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => IngestError::NotFound,
            std::io::ErrorKind::PermissionDenied => IngestError::PermissionDenied,
            _ => IngestError::IoError(e.to_string()),
        }
    }
}

/// How a file reached the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestSource {
    /// Picked explicitly (dialog, command line); no type sniffing
    Picked,
    /// Dropped onto the window; must pass file-type detection
    Dropped,
}

/// A successfully parsed alignment file
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub path: PathBuf,
    pub filename: String,
    pub data: AlignmentMatrix,
}

/// A file that could not be opened
#[derive(Debug, Clone)]
pub struct RejectedFile {
    pub path: PathBuf,
    pub error: IngestError,
}

impl RejectedFile {
    pub fn user_message(&self) -> String {
        self.error.user_message(&filename_for_display(&self.path))
    }
}

/// Validate a file before attempting to open it
///
/// Checks existence, directory-ness, read permission and the size limit.
/// Binary content is checked separately by [`is_likely_binary`].
pub fn validate_file_for_opening(path: &Path) -> Result<(), IngestError> {
    let metadata = fs::metadata(path)?;

    if metadata.is_dir() {
        return Err(IngestError::IsDirectory);
    }

    if metadata.len() > MAX_FILE_SIZE {
        return Err(IngestError::TooLarge {
            size_mb: metadata.len() as f64 / (1024.0 * 1024.0),
        });
    }

    Ok(())
}

/// Check if a file is likely binary by scanning its first 8KB for null bytes
///
/// Returns `false` on any read error (let the actual read fail with a better error).
pub fn is_likely_binary(path: &Path) -> bool {
    let Ok(mut file) = File::open(path) else {
        return false;
    };

    let mut buffer = [0u8; 8192];
    let Ok(bytes_read) = file.read(&mut buffer) else {
        return false;
    };

    buffer[..bytes_read].contains(&0)
}

/// Get the filename from a path for display
pub fn filename_for_display(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

/// Validate, read and parse one alignment file.
///
/// Files without any records still load (as an empty alignment) when picked
/// explicitly; dropped files must additionally pass file-type detection.
pub fn load_alignment_file(path: &Path, source: IngestSource) -> Result<LoadedFile, IngestError> {
    validate_file_for_opening(path)?;
    if is_likely_binary(path) {
        return Err(IngestError::BinaryFile);
    }

    let bytes = fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    let filename = filename_for_display(path);

    if source == IngestSource::Dropped && detect_file_type(&filename, &text) != FileKind::Alignment
    {
        return Err(IngestError::NotAlignment);
    }

    let data = parse_fasta(&text);
    tracing::info!(
        file = %filename,
        rows = data.row_count(),
        cols = data.col_count(),
        "alignment loaded"
    );
    if data.is_ragged() {
        tracing::warn!(file = %filename, "alignment rows differ in length");
    }

    Ok(LoadedFile {
        path: path.to_path_buf(),
        filename,
        data,
    })
}

/// Load a batch of files, keeping their order
pub fn load_all(paths: &[PathBuf], source: IngestSource) -> Vec<Result<LoadedFile, RejectedFile>> {
    paths
        .iter()
        .map(|path| {
            load_alignment_file(path, source).map_err(|error| {
                tracing::warn!("Rejected {}: {}", path.display(), error);
                RejectedFile {
                    path: path.clone(),
                    error,
                }
            })
        })
        .collect()
}

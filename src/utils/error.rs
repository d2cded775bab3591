use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MuError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {path}")]
    PathNotFound { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("File already exists: {path}")]
    FileExists { path: PathBuf },

    #[error("Source and destination are the same: {path}")]
    SameSourceAndDest { path: PathBuf },

    #[error("Copy failed: {src} -> {dest}: {reason}")]
    CopyFailed {
        src: PathBuf,
        dest: PathBuf,
        reason: String,
    },

    #[error("Move failed: {src} -> {dest}: {reason}")]
    MoveFailed {
        src: PathBuf,
        dest: PathBuf,
        reason: String,
    },

    #[error("Delete failed: {path}: {reason}")]
    DeleteFailed { path: PathBuf, reason: String },

    #[error("Rename failed: {src} -> {dest}: {reason}")]
    RenameFailed {
        src: PathBuf,
        dest: PathBuf,
        reason: String,
    },

    #[error("Unsupported archive format: {path}")]
    ArchiveUnsupportedFormat { path: PathBuf },

    #[error("Failed to list archive {path}: {reason}")]
    ArchiveListFailed { path: PathBuf, reason: String },

    #[error("Failed to read {entry} from archive {path}: {reason}")]
    ArchiveReadFailed {
        path: PathBuf,
        entry: String,
        reason: String,
    },

    #[error("Archive requires a password: {path}")]
    ArchivePasswordRequired { path: PathBuf },

    #[error("Entry {entry} not found in archive {path}")]
    ArchiveEntryNotFound { path: PathBuf, entry: String },

    #[error("Archive is read-only: {path}")]
    ArchiveReadOnly { path: PathBuf },

    #[error("Theme not found: {name}")]
    ThemeNotFound { name: String },

    #[error("Invalid theme data in {source_name}: {reason}")]
    ThemeParse { source_name: String, reason: String },

    #[error("Illegal theme operation: {0}")]
    IllegalThemeOperation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

pub type Result<T> = std::result::Result<T, MuError>;

impl MuError {
    /// io::Error를 경로 정보가 있는 에러로 변환 (권한 오류 구분)
    pub fn from_io(path: &std::path::Path, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::PermissionDenied => MuError::PermissionDenied {
                path: path.to_path_buf(),
            },
            std::io::ErrorKind::NotFound => MuError::PathNotFound {
                path: path.to_path_buf(),
            },
            _ => MuError::Io(error),
        }
    }
}

//! Error types for the notebook core.

use std::path::PathBuf;
use thiserror::Error;

/// All errors the notebook core can report. None of them are fatal.
#[derive(Debug, Error)]
pub enum NotesError {
    /// A note index did not point into the collection.
    #[error("Index {index} is out of range for {len} notes")]
    IndexOutOfRange { index: usize, len: usize },

    /// A 1-based saved file selection did not point into the listing.
    #[error("Selection {selection} is out of range for {count} saved files")]
    InvalidSelection { selection: usize, count: usize },

    /// A snapshot file does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A snapshot file exists but does not hold a readable collection.
    #[error("Corrupt snapshot {}: {source}", .path.display())]
    CorruptData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A filesystem operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file could not be read or parsed.
    #[error("Config error: {0}")]
    Config(String),
}

/// Coarse classification of a [`NotesError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UserInput,
    NotFound,
    CorruptData,
    IoFailure,
    Config,
}

/// Convenience alias that pins the error type to [`NotesError`].
pub type Result<T> = std::result::Result<T, NotesError>;

impl NotesError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::IndexOutOfRange { .. } | Self::InvalidSelection { .. } => ErrorKind::UserInput,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::CorruptData { .. } => ErrorKind::CorruptData,
            Self::Io(_) => ErrorKind::IoFailure,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Returns a short message suitable for showing to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::IndexOutOfRange { .. } => "Invalid note index".to_string(),
            Self::InvalidSelection { .. } => "Invalid file number".to_string(),
            Self::NotFound(path) => format!("File {} does not exist", path.display()),
            Self::CorruptData { path, .. } => {
                format!("File {} is not a readable notebook", path.display())
            }
            Self::Io(e) => format!("File error: {e}"),
            Self::Config(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_taxonomy() {
        let e = NotesError::IndexOutOfRange { index: 3, len: 2 };
        assert_eq!(e.kind(), ErrorKind::UserInput);

        let e = NotesError::InvalidSelection {
            selection: 0,
            count: 2,
        };
        assert_eq!(e.kind(), ErrorKind::UserInput);

        let e = NotesError::NotFound(PathBuf::from("missing.json"));
        assert_eq!(e.kind(), ErrorKind::NotFound);

        let e = NotesError::from(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        assert_eq!(e.kind(), ErrorKind::IoFailure);
    }

    #[test]
    fn test_corrupt_data_message_names_file() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e = NotesError::CorruptData {
            path: PathBuf::from("broken.json"),
            source,
        };
        assert_eq!(e.kind(), ErrorKind::CorruptData);
        assert!(e.to_string().contains("broken.json"));
        assert!(e.user_message().contains("broken.json"));
    }
}

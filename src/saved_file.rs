use std::path::PathBuf;

/// One snapshot file found in the notes directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub path: PathBuf,
    pub name: String,
}

impl SavedFile {
    pub fn new(path: PathBuf, name: String) -> Self {
        SavedFile { path, name }
    }
}

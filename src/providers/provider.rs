use crate::collection::Collection;
use crate::error::Result;
use crate::saved_file::SavedFile;
use std::path::PathBuf;

/// Persistence for whole-collection snapshots.
pub trait NotesProvider {
    /// Writes a snapshot of `collection`. Returns `None` when there was nothing to save.
    fn save(&self, collection: &Collection) -> Result<Option<PathBuf>>;
    /// Appends every note of the snapshot `name` to `into`. Returns the number appended.
    fn load(&self, name: &str, into: &mut Collection) -> Result<usize>;
    fn list_saved_files(&self) -> Result<Vec<SavedFile>>;
    /// Removes the file at 1-based `selection` of a previous listing.
    fn delete_saved_file(&self, listing: &[SavedFile], selection: usize) -> Result<SavedFile>;
}

use crate::collection::Collection;
use crate::config::Config;
use crate::error::{NotesError, Result};
use crate::saved_file::SavedFile;
use crate::NotesProvider;
use log::{debug, info, warn};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Stores snapshots as JSON files in the configured notes directory.
pub struct FileSystemNotesProvider<'a> {
    config: &'a Config,
}

impl<'a> FileSystemNotesProvider<'a> {
    pub fn new(config: &'a Config) -> FileSystemNotesProvider<'a> {
        FileSystemNotesProvider { config }
    }

    /// Picks a file name for a snapshot of `collection`.
    ///
    /// The first word of the first note that has any text wins. If no note has
    /// text, the first note's date is used. An empty collection has no name.
    pub fn default_filename_for(&self, collection: &Collection) -> Option<String> {
        let first = collection.notes().first()?;
        let stem = collection
            .notes()
            .iter()
            .find_map(|note| note.text().split_whitespace().next())
            .map(|word| word.replace(['/', '\\'], "_"))
            .unwrap_or_else(|| first.created_on().to_string());

        Some(format!("{}.{}", stem, self.config.get_snapshot_extension()))
    }

    // Only guards a single collision: `foo.json` becomes `foo1.json`.
    fn collision_name(&self, file_name: &str) -> String {
        let extension = format!(".{}", self.config.get_snapshot_extension());
        let stem = file_name.strip_suffix(&extension).unwrap_or(file_name);
        format!("{stem}1{extension}")
    }

    fn is_snapshot_name(&self, name: &str) -> bool {
        name.ends_with(&format!(".{}", self.config.get_snapshot_extension()))
    }

    // The snapshot is written to a temp file in `directory` and renamed over
    // `path`, so a failed write leaves no partial file behind.
    fn write_snapshot(
        &self,
        directory: &Path,
        path: &Path,
        collection: &Collection,
    ) -> Result<()> {
        let mut temp_file = NamedTempFile::new_in(directory)?;
        {
            let mut writer = BufWriter::new(temp_file.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, collection).map_err(io::Error::from)?;
            writer.flush()?;
        }
        temp_file.as_file().sync_all()?;
        temp_file.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl<'a> NotesProvider for FileSystemNotesProvider<'a> {
    fn save(&self, collection: &Collection) -> Result<Option<PathBuf>> {
        let Some(file_name) = self.default_filename_for(collection) else {
            info!("collection is empty, nothing to save");
            return Ok(None);
        };

        let directory = self.config.get_notes_directory();
        let mut path = directory.join(&file_name);
        if path.exists() {
            let renamed = self.collision_name(&file_name);
            debug!("{} already exists, saving as {}", file_name, renamed);
            path = directory.join(renamed);
        }

        if let Err(e) = self.write_snapshot(directory, &path, collection) {
            warn!("could not save {}: {}", path.display(), e);
            return Err(e);
        }

        info!("saved {} notes to {}", collection.len(), path.display());
        Ok(Some(path))
    }

    fn load(&self, name: &str, into: &mut Collection) -> Result<usize> {
        let path = self.config.get_notes_directory().join(name);

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("snapshot {} does not exist", path.display());
                return Err(NotesError::NotFound(path));
            }
            Err(e) => {
                warn!("could not read {}: {}", path.display(), e);
                return Err(NotesError::Io(e));
            }
        };

        let snapshot: Collection = match serde_json::from_slice(&bytes) {
            Ok(snapshot) => snapshot,
            Err(source) => {
                warn!("snapshot {} is unreadable: {}", path.display(), source);
                return Err(NotesError::CorruptData { path, source });
            }
        };

        let count = snapshot.len();
        into.append(snapshot);
        info!("loaded {} notes from {}", count, path.display());
        Ok(count)
    }

    fn list_saved_files(&self) -> Result<Vec<SavedFile>> {
        let mut saved_files = Vec::new();
        for entry in fs::read_dir(self.config.get_notes_directory())? {
            let entry = entry?;
            let path = entry.path();
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if path.is_file() && self.is_snapshot_name(&name) {
                saved_files.push(SavedFile::new(path, name));
            }
        }

        Ok(saved_files)
    }

    fn delete_saved_file(&self, listing: &[SavedFile], selection: usize) -> Result<SavedFile> {
        if selection == 0 || selection > listing.len() {
            warn!("selection {} is outside 1..={}", selection, listing.len());
            return Err(NotesError::InvalidSelection {
                selection,
                count: listing.len(),
            });
        }

        let saved_file = &listing[selection - 1];
        match fs::remove_file(&saved_file.path) {
            Ok(()) => {
                info!("deleted {}", saved_file.path.display());
                Ok(saved_file.clone())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("{} vanished before it could be deleted", saved_file.path.display());
                Err(NotesError::NotFound(saved_file.path.clone()))
            }
            Err(e) => {
                warn!("could not delete {}: {}", saved_file.path.display(), e);
                Err(NotesError::Io(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::Note;
    use chrono::NaiveDate;

    fn provider_config() -> Config {
        Config::with_directory("/nonexistent")
    }

    #[test]
    fn test_default_filename_uses_first_word() {
        let config = provider_config();
        let provider = FileSystemNotesProvider::new(&config);

        let mut collection = Collection::new();
        collection.add("hello world", Vec::new());
        collection.add("second note", Vec::new());

        assert_eq!(
            provider.default_filename_for(&collection).as_deref(),
            Some("hello.json")
        );
    }

    #[test]
    fn test_default_filename_skips_blank_notes() {
        let config = provider_config();
        let provider = FileSystemNotesProvider::new(&config);

        let mut collection = Collection::new();
        collection.add("   ", Vec::new());
        collection.add("  groceries today", Vec::new());

        assert_eq!(
            provider.default_filename_for(&collection).as_deref(),
            Some("groceries.json")
        );
    }

    #[test]
    fn test_default_filename_falls_back_to_date() {
        let config = provider_config();
        let provider = FileSystemNotesProvider::new(&config);
        let date = NaiveDate::from_ymd_opt(2023, 1, 9).unwrap();

        let mut collection = Collection::new();
        collection.push(Note::created_at("", Vec::new(), date));
        collection.push(Note::created_at(" \t", Vec::new(), date.succ_opt().unwrap()));

        assert_eq!(
            provider.default_filename_for(&collection).as_deref(),
            Some("2023-01-09.json")
        );
    }

    #[test]
    fn test_default_filename_for_empty_collection() {
        let config = provider_config();
        let provider = FileSystemNotesProvider::new(&config);
        assert!(provider.default_filename_for(&Collection::new()).is_none());
    }

    #[test]
    fn test_default_filename_stays_inside_directory() {
        let config = provider_config();
        let provider = FileSystemNotesProvider::new(&config);

        let mut collection = Collection::new();
        collection.add("../escape attempt", Vec::new());

        assert_eq!(
            provider.default_filename_for(&collection).as_deref(),
            Some(".._escape.json")
        );
    }

    #[test]
    fn test_collision_name_inserts_one_before_extension() {
        let config = provider_config();
        let provider = FileSystemNotesProvider::new(&config);
        assert_eq!(provider.collision_name("foo.json"), "foo1.json");
        assert_eq!(provider.collision_name("2023-01-09.json"), "2023-01-091.json");
    }
}

//! Core of a small personal notebook: an ordered collection of dated,
//! keyworded notes and a file-based snapshot store for it.
//!
//! [`Collection`] owns every mutation and query. [`FileSystemNotesProvider`]
//! saves a collection as one snapshot file in the configured directory and
//! loads snapshots back into a working collection.

pub mod collection;
pub mod config;
pub mod error;
pub mod note;
pub mod providers;
pub mod saved_file;

pub use collection::Collection;
pub use config::Config;
pub use error::{ErrorKind, NotesError, Result};
pub use note::{Describe, Note};
pub use providers::{FileSystemNotesProvider, NotesProvider};
pub use saved_file::SavedFile;

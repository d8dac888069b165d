pub mod file_system_provider;
pub mod provider;

pub use file_system_provider::FileSystemNotesProvider;
pub use provider::NotesProvider;

use crate::error::{NotesError, Result};
use crate::note::Note;
use log::debug;
use serde::{Deserialize, Serialize};

/// The ordered set of notes being worked on.
///
/// Indices are positions, not identifiers: deleting a note shifts every
/// later note down by one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    notes: Vec<Note>,
}

impl Collection {
    pub fn new() -> Self {
        Collection { notes: Vec::new() }
    }

    /// Appends a new note and returns its index.
    pub fn add(&mut self, text: impl Into<String>, keywords: Vec<String>) -> usize {
        self.notes.push(Note::new(text, keywords));
        debug!("added note at index {}", self.notes.len() - 1);
        self.notes.len() - 1
    }

    /// Updates the note at `index`.
    ///
    /// An empty `text` or empty `keywords` keeps the current value; there is
    /// no way to clear a field through this call.
    pub fn edit(
        &mut self,
        index: usize,
        text: Option<&str>,
        keywords: Option<Vec<String>>,
    ) -> Result<&Note> {
        let len = self.notes.len();
        let note = self
            .notes
            .get_mut(index)
            .ok_or(NotesError::IndexOutOfRange { index, len })?;

        if let Some(text) = text.filter(|t| !t.is_empty()) {
            note.set_text(text.to_string());
        }
        if let Some(keywords) = keywords.filter(|k| !k.is_empty()) {
            note.set_keywords(keywords);
        }

        debug!("edited note at index {index}");
        Ok(&*note)
    }

    /// Removes and returns the note at `index`.
    pub fn delete(&mut self, index: usize) -> Result<Note> {
        if index >= self.notes.len() {
            return Err(NotesError::IndexOutOfRange {
                index,
                len: self.notes.len(),
            });
        }

        debug!("deleted note at index {index}");
        Ok(self.notes.remove(index))
    }

    /// Notes whose text contains `query`, ignoring case.
    pub fn search_by_text(&self, query: &str) -> Vec<&Note> {
        let query = query.to_lowercase();
        self.notes
            .iter()
            .filter(|note| note.text().to_lowercase().contains(&query))
            .collect()
    }

    /// Notes carrying `keyword` exactly, ignoring case.
    pub fn search_by_keyword(&self, keyword: &str) -> Vec<&Note> {
        let keyword = keyword.to_lowercase();
        self.notes
            .iter()
            .filter(|note| note.keywords().iter().any(|k| k.to_lowercase() == keyword))
            .collect()
    }

    /// Stable sort by creation date; same-day notes keep their relative order.
    pub fn sort_by_date(&mut self, descending: bool) {
        if descending {
            self.notes.sort_by(|a, b| b.created_on().cmp(&a.created_on()));
        } else {
            self.notes.sort_by_key(|note| note.created_on());
        }
        debug!("sorted {} notes by date (descending: {descending})", self.notes.len());
    }

    /// Index/note pairs in the current order.
    pub fn list(&self) -> impl Iterator<Item = (usize, &Note)> + '_ {
        self.notes.iter().enumerate()
    }

    /// Moves every note of `other` to the end of this collection.
    pub fn append(&mut self, other: Collection) {
        self.notes.extend(other.notes);
    }

    pub fn get(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn push(&mut self, note: Note) {
        self.notes.push(note);
    }
}

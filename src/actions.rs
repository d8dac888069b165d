use crate::prompt::{flash_warning, heading, prompt, prompt_number, prompt_yesno};

use anyhow::Result;
use log::debug;
use std::io::{BufRead, Write};
use terminal_notebook::{Collection, Describe, Note, NotesError, NotesProvider};

/// Splits comma-separated keywords, dropping blanks.
pub fn parse_keywords(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

fn show_results<W: Write>(stdout: &mut W, results: &[&Note]) -> Result<()> {
    if results.is_empty() {
        writeln!(stdout, "Nothing found")?;
    }
    for note in results {
        writeln!(stdout, "{}\n", note.describe())?;
    }
    Ok(())
}

// Recoverable core errors are shown and the menu carries on. Anything else
// (closed input, broken terminal) bubbles up.
fn report<W: Write, T>(
    stdout: &mut W,
    result: terminal_notebook::Result<T>,
) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            debug!("recoverable error ({:?}): {}", e.kind(), e);
            flash_warning(stdout, &e.user_message())?;
            Ok(None)
        }
    }
}

pub fn create_note<R: BufRead, W: Write>(
    collection: &mut Collection,
    stdout: &mut W,
    stdin: &mut R,
) -> Result<()> {
    let text = prompt(stdout, stdin, "Note text: ")?;
    let keywords = prompt(stdout, stdin, "Keywords (comma separated): ")?;

    let index = collection.add(text, parse_keywords(&keywords));
    writeln!(stdout, "Note {} created", index)?;
    Ok(())
}

pub fn edit_note<R: BufRead, W: Write>(
    collection: &mut Collection,
    stdout: &mut W,
    stdin: &mut R,
) -> Result<()> {
    let index = prompt_number(stdout, stdin, "Index of the note to edit: ")?;
    if index >= collection.len() {
        report(
            stdout,
            Err::<(), _>(NotesError::IndexOutOfRange {
                index,
                len: collection.len(),
            }),
        )?;
        return Ok(());
    }

    let text = prompt(stdout, stdin, "New text (blank keeps current): ")?;
    let keywords = prompt(stdout, stdin, "New keywords (blank keeps current): ")?;

    let edited = collection.edit(index, Some(text.as_str()), Some(parse_keywords(&keywords)));
    if let Some(note) = report(stdout, edited)? {
        writeln!(stdout, "{}", note.describe())?;
    }
    Ok(())
}

pub fn delete_note<R: BufRead, W: Write>(
    collection: &mut Collection,
    stdout: &mut W,
    stdin: &mut R,
) -> Result<()> {
    let index = prompt_number(stdout, stdin, "Index of the note to delete: ")?;
    if report(stdout, collection.delete(index))?.is_some() {
        writeln!(stdout, "Note deleted")?;
    }
    Ok(())
}

pub fn search_by_text<R: BufRead, W: Write>(
    collection: &Collection,
    stdout: &mut W,
    stdin: &mut R,
) -> Result<()> {
    let query = prompt(stdout, stdin, "Text to search for: ")?;
    show_results(stdout, &collection.search_by_text(&query))
}

pub fn search_by_keyword<R: BufRead, W: Write>(
    collection: &Collection,
    stdout: &mut W,
    stdin: &mut R,
) -> Result<()> {
    let keyword = prompt(stdout, stdin, "Keyword to search for: ")?;
    show_results(stdout, &collection.search_by_keyword(&keyword))
}

pub fn show_notes<W: Write>(collection: &Collection, stdout: &mut W) -> Result<()> {
    if collection.is_empty() {
        writeln!(stdout, "No notes yet")?;
    }
    for (index, note) in collection.list() {
        writeln!(stdout, "Index:{}. {}\n", index, note.describe())?;
    }
    Ok(())
}

pub fn sort_notes<R: BufRead, W: Write>(
    collection: &mut Collection,
    stdout: &mut W,
    stdin: &mut R,
) -> Result<()> {
    let descending = prompt_yesno(stdout, stdin, "Newest first? [y/N] ")?;
    collection.sort_by_date(descending);
    show_notes(collection, stdout)
}

fn choose_saved_file<T: NotesProvider, R: BufRead, W: Write>(
    notes_provider: &T,
    stdout: &mut W,
    stdin: &mut R,
    prompt_string: &str,
) -> Result<Option<(Vec<terminal_notebook::SavedFile>, usize)>> {
    let Some(saved_files) = report(stdout, notes_provider.list_saved_files())? else {
        return Ok(None);
    };
    if saved_files.is_empty() {
        writeln!(stdout, "No saved files")?;
        return Ok(None);
    }

    heading(stdout, "Saved files:")?;
    for (i, saved_file) in saved_files.iter().enumerate() {
        writeln!(stdout, "{} - {}", i + 1, saved_file.name)?;
    }

    let selection = prompt_number(stdout, stdin, prompt_string)?;
    Ok(Some((saved_files, selection)))
}

pub fn load_snapshot<T: NotesProvider, R: BufRead, W: Write>(
    collection: &mut Collection,
    notes_provider: &T,
    stdout: &mut W,
    stdin: &mut R,
) -> Result<()> {
    let Some((saved_files, selection)) =
        choose_saved_file(notes_provider, stdout, stdin, "Number of the file to load: ")?
    else {
        return Ok(());
    };

    let Some(saved_file) = selection
        .checked_sub(1)
        .and_then(|i| saved_files.get(i))
    else {
        report(
            stdout,
            Err::<(), _>(NotesError::InvalidSelection {
                selection,
                count: saved_files.len(),
            }),
        )?;
        return Ok(());
    };

    let before = collection.len();
    if let Some(count) = report(stdout, notes_provider.load(&saved_file.name, collection))? {
        writeln!(stdout, "Loaded {} notes from {}", count, saved_file.name)?;
        for (index, note) in collection.list().skip(before) {
            writeln!(stdout, "Index:{}. {}\n", index, note.describe())?;
        }
    }
    Ok(())
}

pub fn delete_saved_file<T: NotesProvider, R: BufRead, W: Write>(
    notes_provider: &T,
    stdout: &mut W,
    stdin: &mut R,
) -> Result<()> {
    let Some((saved_files, selection)) =
        choose_saved_file(notes_provider, stdout, stdin, "Number of the file to delete: ")?
    else {
        return Ok(());
    };

    if let Some(saved_file) = selection.checked_sub(1).and_then(|i| saved_files.get(i)) {
        let affirmative = prompt_yesno(
            stdout,
            stdin,
            &format!("Are you sure you want to delete {}? [y/N] ", saved_file.name),
        )?;
        if !affirmative {
            return Ok(());
        }
    }

    let deleted = notes_provider.delete_saved_file(&saved_files, selection);
    if let Some(deleted) = report(stdout, deleted)? {
        writeln!(stdout, "File {} deleted", deleted.name)?;
    }
    Ok(())
}

/// Returns `false` when the save failed and the notes are still unsaved.
pub fn save<T: NotesProvider, W: Write>(
    collection: &Collection,
    notes_provider: &T,
    stdout: &mut W,
) -> Result<bool> {
    match report(stdout, notes_provider.save(collection))? {
        Some(Some(path)) => writeln!(stdout, "Saved to {}", path.display())?,
        Some(None) => writeln!(stdout, "No notes to save")?,
        None => return Ok(false),
    }
    Ok(true)
}

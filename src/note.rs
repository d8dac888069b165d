use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Anything that can render itself as a human-readable block of text.
pub trait Describe {
    fn describe(&self) -> String;
}

/// A single text entry with its keywords and the day it was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    text: String,
    keywords: Vec<String>,
    created_on: NaiveDate,
}

impl Note {
    /// Creates a note stamped with today's local date.
    pub fn new(text: impl Into<String>, keywords: Vec<String>) -> Self {
        Note::created_at(text, keywords, Local::now().date_naive())
    }

    pub(crate) fn created_at(
        text: impl Into<String>,
        keywords: Vec<String>,
        created_on: NaiveDate,
    ) -> Self {
        Note {
            text: text.into(),
            keywords,
            created_on,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn created_on(&self) -> NaiveDate {
        self.created_on
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }

    pub(crate) fn set_keywords(&mut self, keywords: Vec<String>) {
        self.keywords = keywords;
    }
}

impl Describe for Note {
    fn describe(&self) -> String {
        format!(
            "Text: {}\nKeywords: {}\nDate: {}",
            self.text,
            self.keywords.join(", "),
            self.created_on
        )
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 5, 17).expect("valid date")
    }

    #[test]
    fn test_describe_with_keywords() {
        let note = Note::created_at(
            "buy milk",
            vec!["home".to_string(), "errands".to_string()],
            fixed_date(),
        );

        assert_eq!(
            note.describe(),
            "Text: buy milk\nKeywords: home, errands\nDate: 2023-05-17"
        );
    }

    #[test]
    fn test_describe_without_keywords() {
        let note = Note::created_at("", Vec::new(), fixed_date());
        assert_eq!(note.describe(), "Text: \nKeywords: \nDate: 2023-05-17");
        assert_eq!(note.to_string(), note.describe());
    }

    #[test]
    fn test_new_note_is_dated_today() {
        let before = Local::now().date_naive();
        let note = Note::new("hello", Vec::new());
        let after = Local::now().date_naive();

        assert!(before <= note.created_on() && note.created_on() <= after);
        assert!(note.keywords().is_empty());
    }
}

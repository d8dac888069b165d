use crate::error::{NotesError, Result};
use log::LevelFilter;
use std::path::{Path, PathBuf};
use toml::Table;
use toml::Value;

const DEFAULT_NOTES_DIRECTORY: &str = ".";
const DEFAULT_SNAPSHOT_EXTENSION: &str = "json";
const DEFAULT_LOG_FILE: &str = "notebook.log";
const DEFAULT_LOG_LEVEL: &str = "info";

fn _expand_homedir(path: &str) -> String {
    if path.starts_with('~') {
        match home::home_dir() {
            Some(home_dir) => path.replacen('~', &home_dir.to_string_lossy(), 1),
            None => path.to_string(),
        }
    } else {
        path.to_string()
    }
}

fn _get_str<'a>(config: &'a Table, key: &str, default: &'a str) -> Result<&'a str> {
    match config.get(key) {
        None => Ok(default),
        Some(Value::String(value)) => Ok(value.as_str()),
        Some(other) => Err(NotesError::Config(format!(
            "`{key}` must be a string, found {}",
            other.type_str()
        ))),
    }
}

pub fn parse_level(level: &str) -> Result<LevelFilter> {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => Ok(LevelFilter::Off),
        "error" => Ok(LevelFilter::Error),
        "warn" | "warning" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        other => Err(NotesError::Config(format!(
            "unsupported log level `{other}`; expected off|error|warn|info|debug|trace"
        ))),
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    notes_directory: PathBuf,
    snapshot_extension: String,
    log_file: PathBuf,
    log_level: LevelFilter,
}

impl Config {
    pub fn new(config: Table) -> Result<Self> {
        let notes_directory = _get_str(&config, "notes_directory", DEFAULT_NOTES_DIRECTORY)?;
        let snapshot_extension =
            _get_str(&config, "snapshot_extension", DEFAULT_SNAPSHOT_EXTENSION)?;
        let log_level = _get_str(&config, "log_level", DEFAULT_LOG_LEVEL)?;

        let log_file = match config.get("log_file") {
            None => std::env::temp_dir().join(DEFAULT_LOG_FILE),
            Some(_) => PathBuf::from(_expand_homedir(_get_str(&config, "log_file", "")?)),
        };

        let snapshot_extension = snapshot_extension.trim_start_matches('.');
        if snapshot_extension.is_empty() {
            return Err(NotesError::Config(
                "`snapshot_extension` cannot be empty".to_string(),
            ));
        }

        Ok(Config {
            notes_directory: PathBuf::from(_expand_homedir(notes_directory)),
            snapshot_extension: snapshot_extension.to_owned(),
            log_file,
            log_level: parse_level(log_level)?,
        })
    }

    /// Reads a TOML config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let table = match std::fs::read_to_string(path) {
            Ok(contents) => contents.parse::<Table>().map_err(|e| {
                NotesError::Config(format!(
                    "Unable to parse {}. Make sure it is valid toml: {e}",
                    path.display()
                ))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Table::new(),
            Err(e) => return Err(NotesError::Io(e)),
        };

        Config::new(table)
    }

    /// Defaults rooted at an explicit notes directory.
    pub fn with_directory(directory: impl Into<PathBuf>) -> Self {
        Config {
            notes_directory: directory.into(),
            snapshot_extension: DEFAULT_SNAPSHOT_EXTENSION.to_string(),
            log_file: std::env::temp_dir().join(DEFAULT_LOG_FILE),
            log_level: LevelFilter::Info,
        }
    }

    /// The default location of the config file, `~/.notebook.toml`.
    pub fn default_path() -> PathBuf {
        let mut config_file = home::home_dir().unwrap_or_default();
        config_file.push(".notebook.toml");
        config_file
    }

    pub fn generate() -> Table {
        let mut table = Table::new();
        table.insert(
            String::from("notes_directory"),
            Value::String(String::from(DEFAULT_NOTES_DIRECTORY)),
        );
        table.insert(
            String::from("snapshot_extension"),
            Value::String(String::from(DEFAULT_SNAPSHOT_EXTENSION)),
        );
        table.insert(
            String::from("log_file"),
            Value::String(
                std::env::temp_dir()
                    .join(DEFAULT_LOG_FILE)
                    .to_string_lossy()
                    .into_owned(),
            ),
        );
        table.insert(
            String::from("log_level"),
            Value::String(String::from(DEFAULT_LOG_LEVEL)),
        );

        table
    }

    pub fn set_notes_directory(&mut self, directory: impl Into<PathBuf>) {
        self.notes_directory = directory.into();
    }

    pub fn set_log_level(&mut self, level: LevelFilter) {
        self.log_level = level;
    }

    pub fn get_notes_directory(&self) -> &Path {
        &self.notes_directory
    }

    pub fn get_snapshot_extension(&self) -> &str {
        &self.snapshot_extension
    }

    pub fn get_log_file(&self) -> &Path {
        &self.log_file
    }

    pub fn get_log_level(&self) -> LevelFilter {
        self.log_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_uses_defaults() {
        let config = Config::new(Table::new()).unwrap();
        assert_eq!(config.get_notes_directory(), Path::new("."));
        assert_eq!(config.get_snapshot_extension(), "json");
        assert_eq!(config.get_log_level(), LevelFilter::Info);
    }

    #[test]
    fn test_values_are_read_from_table() {
        let table: Table = r#"
            notes_directory = "/tmp/notes"
            snapshot_extension = ".nb"
            log_level = "DEBUG"
            log_file = "/tmp/notes.log"
        "#
        .parse()
        .unwrap();

        let config = Config::new(table).unwrap();
        assert_eq!(config.get_notes_directory(), Path::new("/tmp/notes"));
        assert_eq!(config.get_snapshot_extension(), "nb");
        assert_eq!(config.get_log_level(), LevelFilter::Debug);
        assert_eq!(config.get_log_file(), Path::new("/tmp/notes.log"));
    }

    #[test]
    fn test_non_string_value_is_rejected() {
        let table: Table = "notes_directory = 5".parse().unwrap();
        let err = Config::new(table).unwrap_err();
        assert!(err.to_string().contains("notes_directory"));
    }

    #[test]
    fn test_unknown_log_level_is_rejected() {
        assert!(parse_level("loud").is_err());
        assert_eq!(parse_level(" warning ").unwrap(), LevelFilter::Warn);
    }

    #[test]
    fn test_generated_table_round_trips() {
        let generated = Config::generate();
        let config = Config::new(generated.clone()).unwrap();
        assert_eq!(config.get_snapshot_extension(), "json");
        assert!(toml::to_string(&generated).unwrap().contains("notes_directory"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.get_snapshot_extension(), "json");
    }

    #[test]
    fn test_malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "notes_directory = ").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Config);
    }
}

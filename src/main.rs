mod actions;
mod prompt;

use crate::prompt::{clear, flash_warning, heading, prompt};
use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use std::io::{stdin, stdout, BufRead, Write};
use std::path::PathBuf;
use terminal_notebook::config::parse_level;
use terminal_notebook::{Collection, Config, FileSystemNotesProvider, NotesProvider};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config file to read instead of ~/.notebook.toml.
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Directory holding saved notebooks.
    #[arg(short = 'd', long)]
    directory: Option<PathBuf>,

    #[arg(short = 'l', long)]
    log_level: Option<String>,

    /// Print a default config file and exit.
    #[arg(long, default_value_t = false)]
    print_config: bool,
}

enum AppState {
    Running,
    Quitting,
}

const MENU: [&str; 10] = [
    "1 - Create a note",
    "2 - Edit a note",
    "3 - Delete a note",
    "4 - Search by text",
    "5 - Search by keyword",
    "6 - Show notes",
    "7 - Sort by creation date",
    "8 - Load a saved notebook",
    "9 - Delete a saved notebook",
    "10 - Save and exit",
];

fn run_menu<T: NotesProvider, R: BufRead, W: Write>(
    collection: &mut Collection,
    notes_provider: &T,
    stdout: &mut W,
    stdin: &mut R,
) -> Result<()> {
    let mut state = AppState::Running;

    while let AppState::Running = state {
        heading(stdout, "Choose an action:")?;
        for line in MENU {
            writeln!(stdout, "{}", line)?;
        }

        let choice = prompt(stdout, stdin, "Your choice: ")?;
        clear(stdout)?;
        match choice.as_str() {
            "1" => actions::create_note(collection, stdout, stdin)?,
            "2" => actions::edit_note(collection, stdout, stdin)?,
            "3" => actions::delete_note(collection, stdout, stdin)?,
            "4" => actions::search_by_text(collection, stdout, stdin)?,
            "5" => actions::search_by_keyword(collection, stdout, stdin)?,
            "6" => actions::show_notes(collection, stdout)?,
            "7" => actions::sort_notes(collection, stdout, stdin)?,
            "8" => actions::load_snapshot(collection, notes_provider, stdout, stdin)?,
            "9" => actions::delete_saved_file(notes_provider, stdout, stdin)?,
            "10" => {
                if actions::save(collection, notes_provider, stdout)? {
                    state = AppState::Quitting;
                }
            }
            other => flash_warning(stdout, &format!("Unknown choice '{}'", other))?,
        }
        writeln!(stdout)?;
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_config {
        print!("{}", toml::to_string(&Config::generate())?);
        return Ok(());
    }

    let config_file = args.config.unwrap_or_else(Config::default_path);
    let mut config = Config::load(&config_file)
        .with_context(|| format!("could not read config {}", config_file.display()))?;
    if let Some(directory) = args.directory {
        config.set_notes_directory(directory);
    }
    if let Some(level) = args.log_level {
        config.set_log_level(parse_level(&level)?);
    }

    let log_file = config.get_log_file();
    simple_logging::log_to_file(log_file, config.get_log_level())
        .with_context(|| format!("could not open log file {}", log_file.display()))?;
    info!(
        "starting with notes directory {}",
        config.get_notes_directory().display()
    );

    let notes_provider = FileSystemNotesProvider::new(&config);
    let mut collection = Collection::new();
    let mut stdout = stdout();
    let mut stdin = stdin().lock();

    clear(&mut stdout)?;
    let result = run_menu(&mut collection, &notes_provider, &mut stdout, &mut stdin);
    if let Err(e) = &result {
        error!("menu stopped: {:#}", e);
    }
    result
}

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use uuid::Uuid;

use super::format::{SHORT_ID_LEN, entry_row, short_id};
use crate::classifier::PromptClassifier;
use crate::clipboard::copy_to_system_clipboard;
use crate::config::Config;
use crate::export::export_entry;
use crate::gateway::{Gateway, HttpBackend};
use crate::history::{HistoryFilter, HistoryStore};
use crate::models::{HistoryEntry, LanguageFilter, LanguageTag};
use crate::session::{Session, SessionError};
use crate::storage::FileStore;
use crate::utils::strip_ansi_codes;

/// Shown when the generation backend cannot produce a result
pub const BACKEND_FAILURE_NOTICE: &str =
    "Failed to generate code. Please ensure the backend server is running.";

const CLEAR_CONFIRMATION: &str = "Are you sure you want to clear all history?";

#[derive(Parser)]
#[command(name = "code-copilot")]
#[command(version)]
#[command(about = "Generate code from natural-language prompts and browse past results", long_about = None)]
pub struct Cli {
    /// Base URL of the code-generation backend
    #[arg(long, global = true, env = "CODE_COPILOT_BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Directory holding history and preferences
    #[arg(long, global = true, env = "CODE_COPILOT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Backend request timeout in seconds
    #[arg(long, global = true, env = "CODE_COPILOT_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check whether a prompt would be accepted for generation
    Check { prompt: String },

    /// Generate code for a prompt and record it in history
    Generate {
        prompt: String,
        /// Target language (see `languages`)
        #[arg(short, long, default_value = "javascript", value_parser = parse_language)]
        language: LanguageTag,
    },

    /// List history entries, newest first
    History {
        /// Filter terms: words, "quoted phrases", lang:<tag>, fav:yes|no
        filter: Vec<String>,
        /// Only entries in this language ("all" for every language)
        #[arg(short, long)]
        language: Option<String>,
        /// Only favorite entries
        #[arg(long)]
        favorites: bool,
    },

    /// Print an entry's prompt and code
    Show {
        /// 1-based position in the (filtered) listing, or an id prefix
        selector: String,
        /// Filter the listing the position refers to
        filter: Vec<String>,
    },

    /// Toggle an entry's favorite flag
    Favorite {
        /// 1-based position in the (filtered) listing, or an id prefix
        selector: String,
        /// Filter the listing the position refers to
        filter: Vec<String>,
    },

    /// Delete all history
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Write an entry's code to generated-code.<ext>
    Export {
        /// 1-based position in the listing, or an id prefix
        selector: String,
        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },

    /// Copy an entry's code to the system clipboard
    Copy {
        /// 1-based position in the listing, or an id prefix
        selector: String,
    },

    /// Show or toggle dark mode
    Theme {
        #[arg(long)]
        toggle: bool,
    },

    /// Show statistics about the history
    Stats,

    /// List supported languages
    Languages,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    let config = Config::resolve(cli.backend_url, cli.data_dir, cli.timeout_secs)?;
    let session = open_session(&config)?;

    match command {
        Commands::Check { prompt } => check(&session, &prompt)?,
        Commands::Generate { prompt, language } => generate(&session, &prompt, language).await?,
        Commands::History { filter, language, favorites } => {
            let mut filter = parse_filter(&filter)?;
            if let Some(language) = language {
                filter.language = LanguageFilter::from_tag(&language);
            }
            if favorites {
                filter.favorites_only = true;
            }
            list_history(&session.history(), &filter);
        }
        Commands::Show { selector, filter } => {
            let filter = parse_filter(&filter)?;
            let history = session.history();
            let entry = resolve_selector(&history, &filter, &selector)?;
            show_entry(entry);
        }
        Commands::Favorite { selector, filter } => {
            let filter = parse_filter(&filter)?;
            toggle_favorite(&mut session.history(), &filter, &selector)?;
        }
        Commands::Clear { yes } => clear(&mut session.history(), yes)?,
        Commands::Export { selector, out } => {
            let history = session.history();
            let entry = resolve_selector(&history, &HistoryFilter::new(), &selector)?;
            let path = export_entry(entry, &out)?;
            println!("Saved {}", path.display());
        }
        Commands::Copy { selector } => {
            let history = session.history();
            let entry = resolve_selector(&history, &HistoryFilter::new(), &selector)?;
            copy_to_system_clipboard(entry)?;
            println!(
                "Copied {} code to clipboard ({} bytes)",
                strip_ansi_codes(entry.language.label()),
                entry.code.len()
            );
        }
        Commands::Theme { toggle } => theme(&session, toggle),
        Commands::Stats => show_stats(&session.history(), &config),
        Commands::Languages => show_languages(),
    }

    Ok(())
}

fn open_session(config: &Config) -> Result<Session> {
    let storage = Arc::new(FileStore::new(&config.data_dir));
    let backend = HttpBackend::new(&config.backend_url, config.timeout)
        .context("Failed to set up the generation backend client")?;

    Ok(Session::load(PromptClassifier::default(), Gateway::new(Arc::new(backend)), storage))
}

fn parse_language(value: &str) -> Result<LanguageTag, String> {
    let language = LanguageTag::from_tag(value);
    if language.is_known() {
        Ok(language)
    } else {
        Err(format!("unsupported language '{}' (run `code-copilot languages`)", value))
    }
}

/// Filter words arrive pre-split by the shell; rejoin them for the filter parser
fn parse_filter(words: &[String]) -> Result<HistoryFilter> {
    HistoryFilter::parse(&words.join(" ")).context("Invalid history filter")
}

fn check(session: &Session, prompt: &str) -> Result<()> {
    match session.check_prompt(prompt) {
        Ok(assessment) => {
            println!("accepted");
            println!("  matched: {}", assessment.positive_matches.join(", "));
            Ok(())
        }
        Err(SessionError::RejectedPrompt(assessment)) => {
            println!("rejected");
            if !assessment.negative_matches.is_empty() {
                println!("  off-topic terms: {}", assessment.negative_matches.join(", "));
            }
            Err(SessionError::RejectedPrompt(assessment).into())
        }
        Err(e) => Err(e.into()),
    }
}

async fn generate(session: &Session, prompt: &str, language: LanguageTag) -> Result<()> {
    let written = match session.submit(prompt, language).await {
        Ok(written) => written,
        Err(e @ SessionError::Gateway(_)) => {
            return Err(anyhow::Error::new(e).context(BACKEND_FAILURE_NOTICE));
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(e) = &written.persist_error {
        eprintln!("Warning: result was not saved to history: {}", e);
    }

    let entry = written.into_value();
    eprintln!("Generated {} code (id {})", entry.language.label(), short_id(&entry));
    println!("{}", strip_ansi_codes(&entry.code));
    Ok(())
}

fn list_history(history: &HistoryStore, filter: &HistoryFilter) {
    let view = history.query(filter);
    if view.is_empty() {
        if history.is_empty() {
            println!("No history yet");
        } else {
            println!("No entries match the filter");
        }
        return;
    }

    let now = Utc::now();
    for (index, entry) in view.iter().enumerate() {
        println!("{}", entry_row(index + 1, entry, &now));
    }
}

/// Resolve a selector to an entry.
///
/// A number shorter than a listed short id is a 1-based position in the view
/// produced by `filter`; anything else is matched as an id prefix against the
/// whole history.
pub fn resolve_selector<'a>(
    history: &'a HistoryStore,
    filter: &HistoryFilter,
    selector: &str,
) -> Result<&'a HistoryEntry> {
    let selector = selector.trim();

    if selector.len() < SHORT_ID_LEN
        && let Ok(position) = selector.parse::<usize>()
    {
        let view = history.query(filter);
        return position
            .checked_sub(1)
            .and_then(|index| view.get(index))
            .ok_or_else(|| anyhow!("No entry at position {} ({} listed)", position, view.count()));
    }

    match history.find_by_id_prefix(selector).as_slice() {
        [] => bail!("No history entry matches '{}'", selector),
        [entry] => Ok(*entry),
        matches => bail!("Id prefix '{}' is ambiguous ({} entries match)", selector, matches.len()),
    }
}

fn show_entry(entry: &HistoryEntry) {
    println!("Id:       {}", entry.id);
    println!("Language: {}", strip_ansi_codes(entry.language.label()));
    println!("Created:  {}", entry.timestamp.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("Favorite: {}", if entry.favorite { "yes" } else { "no" });
    println!("Prompt:   {}", strip_ansi_codes(&entry.prompt));
    println!();
    println!("{}", strip_ansi_codes(&entry.code));
}

fn toggle_favorite(history: &mut HistoryStore, filter: &HistoryFilter, selector: &str) -> Result<()> {
    let id: Uuid = resolve_selector(history, filter, selector)?.id;
    let written = history
        .toggle_favorite_by_id(id)
        .ok_or_else(|| anyhow!("History entry {} disappeared", id))?;

    if let Some(e) = &written.persist_error {
        eprintln!("Warning: change was not saved: {}", e);
    }

    let entry = written.into_value();
    let state = if entry.favorite { "Marked as favorite" } else { "Removed from favorites" };
    println!("{}: {}", state, short_id(&entry));
    Ok(())
}

fn clear(history: &mut HistoryStore, yes: bool) -> Result<()> {
    if history.is_empty() {
        println!("History is already empty");
        return Ok(());
    }

    if !yes && !confirm(CLEAR_CONFIRMATION)? {
        println!("Cancelled");
        return Ok(());
    }

    let written = history.clear();
    if let Some(e) = &written.persist_error {
        eprintln!("Warning: stored history could not be removed: {}", e);
    }
    println!("Cleared {} entries", written.value);
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    eprint!("{} [y/N] ", question);
    io::stderr().flush().ok();

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer).context("Failed to read confirmation")?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn theme(session: &Session, toggle: bool) {
    let mut preferences = session.preferences();

    let dark_mode = if toggle {
        let written = preferences.toggle_dark_mode();
        if let Some(e) = &written.persist_error {
            eprintln!("Warning: theme change was not saved: {}", e);
        }
        written.value
    } else {
        preferences.dark_mode()
    };

    println!("{}", if dark_mode { "dark" } else { "light" });
}

fn show_stats(history: &HistoryStore, config: &Config) {
    let stats = history.stats();

    println!("Code Generation History");
    println!("=======================");
    println!("Total entries: {}", stats.total);
    println!("  Favorites: {}", stats.favorites);
    for (language, count) in &stats.by_language {
        println!("  {}: {}", strip_ansi_codes(language.label()), count);
    }
    println!();
    println!("Data directory: {}", config.data_dir.display());

    if let Some(oldest) = stats.oldest {
        println!("Oldest entry: {}", oldest.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(newest) = stats.newest {
        println!("Newest entry: {}", newest.format("%Y-%m-%d %H:%M:%S"));
    }
}

fn show_languages() {
    for language in LanguageTag::SUPPORTED.iter() {
        println!("{:<12} {:<12} {}", language.as_str(), language.label(), language.extension());
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::{info, warn};

use subscout::config::Config;
use subscout::engine::Engine;
use subscout::language::{self, Language};
use subscout::output::terminal;
use subscout::session::{Session, SessionRepo};
use subscout::SubscoutError;

/// subscout: find the words you don't know yet in a subtitle file.
///
/// Scans a subtitle, filters out words you have already learned, and lists
/// the rest by frequency so you can study the most useful ones first.
#[derive(Parser)]
#[command(name = "subscout", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the home directory and known-word stores
    Init,

    /// Detect the language of a subtitle file
    Detect {
        file: PathBuf,
    },

    /// List the styles declared by an .ass subtitle
    Styles {
        file: PathBuf,
    },

    /// Upload a subtitle, process it, and list unknown words
    Scan {
        file: PathBuf,

        /// Style to extract (required for .ass files)
        #[arg(long)]
        style: Option<String>,

        /// Only show this many words (default: all)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Process a session that is still waiting for a style
    Process {
        session: String,

        #[arg(long)]
        style: Option<String>,

        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show the words of a session
    Show {
        session: String,

        #[arg(long)]
        limit: Option<usize>,
    },

    /// Mark words of a session as learned
    Learn {
        session: String,

        /// Words to mark
        words: Vec<String>,

        /// Read additional words from a file, one per line
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Save learned words and print the top unknown words
    Finalize {
        session: String,
    },

    /// List saved sessions
    Sessions,

    /// List known words for a language (en or jp)
    Known {
        language: Language,
    },

    /// Show system status (store sizes, dictionaries, sessions)
    Status,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("subscout=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Init => {
            info!("Initializing subscout home...");
            config.ensure_dirs()?;
            let engine = Engine::new(config);
            for language in Language::ALL {
                let count = engine.store(language)?.count()?;
                println!("Known words ({language}): {count}");
            }
            println!("Home initialized at: {}", engine.config().home_dir.display());
            if let Err(e) = engine.config().require_english_dict() {
                println!("\n{} {e}", "Warning:".yellow());
            }
            match engine.config().require_japanese_dict() {
                Ok(path) => println!("Japanese dictionary: {}", path.display()),
                Err(e) => println!("{} {e}", "Note:".dimmed()),
            }
            println!("\nsubscout is ready. Next step: subscout scan <subtitle file>");
        }

        Commands::Detect { file } => {
            let bytes = read_file(&file)?;
            let content = subscout::subtitle::decode(&bytes, &file)?;
            println!(
                "{}: {} (CJK ratio {:.3})",
                file.display(),
                language::detect(&content),
                language::cjk_ratio(&content)
            );
        }

        Commands::Styles { file } => {
            let styles = subscout::subtitle::extract_styles(&file);
            if styles.is_empty() {
                println!("No styles found in {}", file.display());
            } else {
                for style in styles {
                    println!("  {style}");
                }
            }
        }

        Commands::Scan { file, style, limit } => {
            config.ensure_dirs()?;
            let engine = Engine::new(config);
            let repo = SessionRepo::new(engine.config());

            let bytes = read_file(&file)?;
            let filename = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let (mut session, preview) = Session::upload(engine.config(), &filename, &bytes)?;

            println!(
                "Session {} created for {} (looks like {})",
                session.id.bold(),
                session.filename,
                preview.language
            );
            if !preview.styles.is_empty() {
                println!("  Styles: {}", preview.styles.join(", "));
            }

            process_and_report(&engine, &repo, &mut session, style.as_deref(), limit)?;
        }

        Commands::Process {
            session,
            style,
            limit,
        } => {
            let engine = Engine::new(config);
            let repo = SessionRepo::new(engine.config());
            let mut session = repo.load(&session)?;
            process_and_report(&engine, &repo, &mut session, style.as_deref(), limit)?;
        }

        Commands::Show { session, limit } => {
            let repo = SessionRepo::new(&config);
            let session = repo.load(&session)?;
            terminal::display_vocabulary(&session, limit);
            if let Some(summary) = session.summary() {
                terminal::display_summary(summary);
            }
        }

        Commands::Learn {
            session,
            mut words,
            file,
        } => {
            let repo = SessionRepo::new(&config);
            let mut session = repo.load(&session)?;

            if let Some(path) = file {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read word file {}", path.display()))?;
                words.extend(
                    content
                        .lines()
                        .map(str::trim)
                        .filter(|w| !w.is_empty())
                        .map(str::to_string),
                );
            }

            let changed = session.mark_learned(&words)?;
            repo.save(&session)?;

            let learned = session.items().iter().filter(|i| i.learned).count();
            println!(
                "Marked {changed} new word(s) as learned ({learned} of {} in this session).",
                session.items().len()
            );
            if changed < words.len() {
                println!(
                    "{}",
                    "Some words were already marked or are not in this session.".dimmed()
                );
            }
        }

        Commands::Finalize { session } => {
            let engine = Engine::new(config);
            let repo = SessionRepo::new(engine.config());
            let mut session = repo.load(&session)?;

            let summary = session.finalize(&engine)?.clone();
            repo.save(&session)?;
            terminal::display_summary(&summary);
        }

        Commands::Sessions => {
            let sessions = SessionRepo::new(&config).list()?;
            terminal::display_sessions(&sessions);
        }

        Commands::Known { language } => {
            let engine = Engine::new(config);
            let store = engine.store(language)?;
            let words = store.list_all()?;
            terminal::display_known_words(language.code(), &words);
        }

        Commands::Status => {
            let engine = Engine::new(config);
            subscout::status::show(&engine)?;
        }
    }

    Ok(())
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Process a session, save it whatever the outcome, and print the words.
///
/// A missing or wrong style leaves the session in `created` so the user can
/// retry with `subscout process <id> --style <name>`.
fn process_and_report(
    engine: &Engine,
    repo: &SessionRepo,
    session: &mut Session,
    style: Option<&str>,
    limit: Option<usize>,
) -> Result<()> {
    let result = session.process(engine, style).map(|_| ());
    repo.save(session)?;

    match result {
        Ok(()) => {
            terminal::display_vocabulary(session, limit);
            println!(
                "Mark words with: subscout learn {} <word>...\nThen run: subscout finalize {}",
                session.id, session.id
            );
            Ok(())
        }
        Err(SubscoutError::StyleRequired { available }) => {
            println!("This subtitle has several styles: {}", available.join(", "));
            println!("Pick one with: subscout process {} --style <name>", session.id);
            Ok(())
        }
        Err(e @ SubscoutError::StyleNotFound { .. }) => {
            warn!(session = %session.id, error = %e, "Style not found");
            println!("{} {e}", "Error:".red());
            println!("Retry with: subscout process {} --style <name>", session.id);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

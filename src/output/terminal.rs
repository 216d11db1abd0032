// Colored terminal output for word lists and session summaries.
//
// This module handles all terminal-specific formatting. The main.rs command
// handlers delegate here.

use colored::Colorize;

use crate::output::truncate_chars;
use crate::session::{FinalizeSummary, Session, SessionState, VocabularyItem};

/// Words longer than this are cut in tables so the columns stay aligned.
const WORD_COLUMN: usize = 24;

/// Display the unknown words of a processed session.
pub fn display_vocabulary(session: &Session, limit: Option<usize>) {
    let items = session.items();
    if items.is_empty() {
        println!("No unknown words found. Everything in this subtitle is already known.");
        return;
    }

    let language = session.language().map(|l| l.to_string()).unwrap_or_default();
    println!(
        "\n{}",
        format!("=== Unknown words ({} words, {language}) ===", items.len()).bold()
    );
    println!();

    println!(
        "  {:>5}  {:<24} {:>5}  {}",
        "Rank".dimmed(),
        "Word".dimmed(),
        "Freq".dimmed(),
        "Learned".dimmed(),
    );
    println!("  {}", "-".repeat(46).dimmed());

    let shown = limit.unwrap_or(items.len()).min(items.len());
    for (i, item) in items.iter().take(shown).enumerate() {
        print_item(i + 1, item);
    }

    if shown < items.len() {
        println!("  {}", format!("... {} more", items.len() - shown).dimmed());
    }
    println!();
}

fn print_item(rank: usize, item: &VocabularyItem) {
    let marker = if item.learned {
        "✓".green().to_string()
    } else {
        String::new()
    };
    println!(
        "  {:>4}.  {:<24} {:>5}  {}",
        rank,
        truncate_chars(&item.word, WORD_COLUMN),
        item.frequency,
        marker
    );
}

/// Display the result of `finalize`.
pub fn display_summary(summary: &FinalizeSummary) {
    println!(
        "\n{}",
        format!(
            "=== Session finalized: {} of {} words learned ===",
            summary.learned_count, summary.total_count
        )
        .bold()
    );

    if summary.top_words.is_empty() {
        println!("  No unknown words left.");
        return;
    }

    println!("\n  Top unknown words to study:");
    for (i, word) in summary.top_words.iter().enumerate() {
        println!("  {:>4}. {}", i + 1, word.bright_yellow());
    }
    println!();
}

/// One line per saved session.
pub fn display_sessions(sessions: &[Session]) {
    if sessions.is_empty() {
        println!("No sessions yet. Run `subscout scan <file>` to start one.");
        return;
    }

    for session in sessions {
        let state = match session.state() {
            SessionState::Created => "created".dimmed(),
            SessionState::Processed => "processed".bright_yellow(),
            SessionState::Finalized => "finalized".green(),
        };
        let learned = session.items().iter().filter(|i| i.learned).count();
        println!(
            "  {}  {:<10} {:>2}  {:>5} words  {:>5} learned  {}",
            session.id,
            state,
            session.language().map(|l| l.code()).unwrap_or("--"),
            session.items().len(),
            learned,
            session.filename
        );
    }
}

/// Print known words in columns.
pub fn display_known_words(language: &str, words: &[String]) {
    println!(
        "\n{}",
        format!("=== Known words ({language}): {} ===", words.len()).bold()
    );
    for chunk in words.chunks(6) {
        let row: Vec<String> = chunk
            .iter()
            .map(|w| format!("{:<16}", truncate_chars(w, 15)))
            .collect();
        println!("  {}", row.join(" "));
    }
    println!();
}

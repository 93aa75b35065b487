//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Flashcards - spaced repetition review scheduler
#[derive(Debug, Parser)]
#[command(name = "flashcards", about = "Spaced repetition flashcards", version)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to SQLite database (overrides config)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a card
    Add {
        front: String,
        back: String,

        /// Deck to add the card to
        #[arg(short, long, default_value = "")]
        deck: String,
    },

    /// Show one card
    Show { id: i64 },

    /// List cards, newest first
    List {
        #[arg(short, long)]
        deck: Option<String>,
    },

    /// Edit the deck or content of a card
    Edit {
        id: i64,

        #[arg(long)]
        deck: Option<String>,

        #[arg(long)]
        front: Option<String>,

        #[arg(long)]
        back: Option<String>,
    },

    /// Delete a card
    Delete { id: i64 },

    /// List deck names
    Decks,

    /// Show cards due for review, earliest first
    Due {
        #[arg(short, long)]
        deck: Option<String>,

        /// Maximum number of cards (default 20)
        #[arg(short, long, allow_negative_numbers = true)]
        limit: Option<i64>,
    },

    /// Record a review: 1=again, 2=hard, 3=good, 4=easy
    Review {
        id: i64,

        #[arg(allow_negative_numbers = true)]
        score: i64,
    },

    /// Interactive study session over the due cards
    Study {
        #[arg(short, long)]
        deck: Option<String>,

        #[arg(short, long, allow_negative_numbers = true)]
        limit: Option<i64>,
    },

    /// Import a deck from a JSON file
    Import { file: PathBuf },

    /// Export a deck to a JSON file
    Export { deck: String, file: PathBuf },
}

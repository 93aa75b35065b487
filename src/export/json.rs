//! JSON import/export module for flashcard decks.
//! Provides functionality to save and load Deck structures to/from JSON files.

use crate::error::Result;
use crate::models::Deck;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use tracing::info;

/// Exports a deck to a JSON file at the specified path.
/// Returns an error if file creation or writing fails.
pub fn export_json_to_path(deck: &Deck, path: &Path) -> Result<()> {
    let json_string = serde_json::to_string_pretty(deck)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    info!(deck = %deck.name, path = %path.display(), "deck exported");
    Ok(())
}

/// Imports a deck from a JSON file.
/// Returns an error if the file doesn't exist or contains invalid JSON.
pub fn import_json(path: &Path) -> Result<Deck> {
    let file = File::open(path)?;
    let deck: Deck = serde_json::from_reader(BufReader::new(file))?;

    info!(deck = %deck.name, path = %path.display(), "deck read from file");
    Ok(deck)
}

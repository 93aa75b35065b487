//! Database operations for the card store
//!
//! Handles SQLite initialization and CRUD for card records. Timestamps are
//! stored as UTC Unix milliseconds so that ordering by `next_review` in SQL
//! matches ordering of the in-memory values.

use crate::models::{Card, CardId, NewCard, SrsState};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};
use std::path::Path;
use tracing::debug;

const CARD_COLUMNS: &str =
    "id, deck_name, front, back, ease, interval, next_review, created_at, updated_at";

/// Opens (or creates) the card database at `path` and ensures the schema exists
pub fn init_database(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    conn.busy_timeout(std::time::Duration::from_secs(5))?;
    init_schema(&conn)?;
    debug!(?path, "card database opened");
    Ok(conn)
}

/// Ephemeral database, used by tests and dry runs
pub fn init_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    init_schema(&conn)?;
    debug!("in-memory card database opened");
    Ok(conn)
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS cards (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            deck_name TEXT NOT NULL,
            front TEXT NOT NULL,
            back TEXT NOT NULL,
            ease REAL NOT NULL DEFAULT 2.5,
            interval INTEGER NOT NULL DEFAULT 0,
            next_review INTEGER NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_deck_name ON cards(deck_name);
        CREATE INDEX IF NOT EXISTS idx_next_review ON cards(next_review);",
    )
}

fn to_millis(time: DateTime<Utc>) -> i64 {
    time.timestamp_millis()
}

fn from_millis(idx: usize, millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(idx, millis))
}

fn card_from_row(row: &Row<'_>) -> Result<Card> {
    Ok(Card {
        id: CardId(row.get(0)?),
        deck_name: row.get(1)?,
        front: row.get(2)?,
        back: row.get(3)?,
        state: SrsState {
            ease: row.get(4)?,
            interval: row.get(5)?,
            next_review: from_millis(6, row.get(6)?)?,
        },
        created_at: from_millis(7, row.get(7)?)?,
        updated_at: from_millis(8, row.get(8)?)?,
    })
}

/// Inserts a new card with its scheduling state seeded for `now`
pub fn insert_card(new_card: &NewCard, now: DateTime<Utc>, conn: &Connection) -> Result<Card> {
    let state = SrsState::new(now);

    conn.execute(
        "INSERT INTO cards (deck_name, front, back, ease, interval, next_review, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
        params![
            new_card.deck_name,
            new_card.front,
            new_card.back,
            state.ease,
            state.interval,
            to_millis(state.next_review),
            to_millis(now),
        ],
    )?;
    let id = CardId(conn.last_insert_rowid());
    debug!(%id, deck = %new_card.deck_name, "card inserted");

    // Read back so the returned record carries the stored precision.
    get_card(id, conn)?.ok_or(rusqlite::Error::QueryReturnedNoRows)
}

pub fn get_card(id: CardId, conn: &Connection) -> Result<Option<Card>> {
    conn.query_row(
        &format!("SELECT {CARD_COLUMNS} FROM cards WHERE id = ?1"),
        params![id.0],
        card_from_row,
    )
    .optional()
}

/// Retrieves all cards, optionally for one deck, newest first
pub fn get_all_cards(deck_name: Option<&str>, conn: &Connection) -> Result<Vec<Card>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {CARD_COLUMNS} FROM cards
         WHERE (?1 IS NULL OR deck_name = ?1)
         ORDER BY created_at DESC, id DESC"
    ))?;

    let cards = stmt
        .query_map(params![deck_name], card_from_row)?
        .collect::<Result<Vec<Card>>>()?;

    Ok(cards)
}

/// Retrieves at most `limit` cards whose next review is at or before `now`,
/// optionally for one deck, earliest due first (ties by id)
pub fn get_due_candidates(
    deck_name: Option<&str>,
    now: DateTime<Utc>,
    limit: usize,
    conn: &Connection,
) -> Result<Vec<Card>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {CARD_COLUMNS} FROM cards
         WHERE next_review <= ?1 AND (?2 IS NULL OR deck_name = ?2)
         ORDER BY next_review ASC, id ASC
         LIMIT ?3"
    ))?;
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);

    let cards = stmt
        .query_map(params![to_millis(now), deck_name, limit], card_from_row)?
        .collect::<Result<Vec<Card>>>()?;

    Ok(cards)
}

/// Retrieves the distinct deck names in use, sorted
pub fn get_all_decks(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT DISTINCT deck_name FROM cards ORDER BY deck_name")?;
    let decks = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<String>>>()?;
    Ok(decks)
}

/// Rewrites the content fields of a card. Scheduling columns are left alone.
///
/// Returns false if no card has this id.
pub fn update_card_content(card: &Card, now: DateTime<Utc>, conn: &Connection) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE cards SET deck_name = ?1, front = ?2, back = ?3, updated_at = ?4
         WHERE id = ?5",
        params![card.deck_name, card.front, card.back, to_millis(now), card.id.0],
    )?;
    Ok(changed == 1)
}

/// Stores the scheduling state produced by a review
///
/// Returns false if no card has this id.
pub fn update_review_state(
    id: CardId,
    state: &SrsState,
    now: DateTime<Utc>,
    conn: &Connection,
) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE cards SET ease = ?1, interval = ?2, next_review = ?3, updated_at = ?4
         WHERE id = ?5",
        params![
            state.ease,
            state.interval,
            to_millis(state.next_review),
            to_millis(now),
            id.0
        ],
    )?;
    Ok(changed == 1)
}

/// Removes a card. Returns false if no card has this id.
pub fn delete_card(id: CardId, conn: &Connection) -> Result<bool> {
    let changed = conn.execute("DELETE FROM cards WHERE id = ?1", params![id.0])?;
    debug!(%id, existed = changed == 1, "card deleted");
    Ok(changed == 1)
}

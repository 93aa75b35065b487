//! Review service: the layer between callers and the card store.
//!
//! Validates caller input (quality scores, batch limits, card content), reads
//! the clock once per operation and runs every read-modify-write of a card
//! inside a single immediate transaction so concurrent reviews cannot lose
//! updates.

use crate::clock::Clock;
use crate::database::db;
use crate::error::{Error, Result};
use crate::models::{
    Card, CardId, CardUpdate, DEFAULT_DECK, DEFAULT_DUE_LIMIT, Deck, Flashcard, NewCard, Quality,
    advance, select_due, validate_limit,
};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, warn};

pub struct ReviewService {
    conn: Mutex<Connection>,
    clock: Arc<dyn Clock>,
}

impl ReviewService {
    pub fn new(conn: Connection, clock: Arc<dyn Clock>) -> Self {
        Self {
            conn: Mutex::new(conn),
            clock,
        }
    }

    pub fn open(path: &Path, clock: Arc<dyn Clock>) -> Result<Self> {
        Ok(Self::new(db::init_database(path)?, clock))
    }

    pub fn open_in_memory(clock: Arc<dyn Clock>) -> Result<Self> {
        Ok(Self::new(db::init_in_memory()?, clock))
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        // Poisoning is safe to ignore: an unfinished Transaction rolls back on drop.
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn create_card(&self, new_card: NewCard) -> Result<Card> {
        let new_card = normalize_new_card(new_card)?;

        let conn = self.lock();
        let now = self.clock.now();
        let card = db::insert_card(&new_card, now, &conn)?;
        info!(id = %card.id, deck = %card.deck_name, "card created");
        Ok(card)
    }

    pub fn get_card(&self, id: CardId) -> Result<Card> {
        let conn = self.lock();
        db::get_card(id, &conn)?.ok_or(Error::NotFound(id))
    }

    /// All cards, optionally for one deck, newest first.
    pub fn list_cards(&self, deck_name: Option<&str>) -> Result<Vec<Card>> {
        let conn = self.lock();
        Ok(db::get_all_cards(deck_name, &conn)?)
    }

    pub fn list_decks(&self) -> Result<Vec<String>> {
        let conn = self.lock();
        Ok(db::get_all_decks(&conn)?)
    }

    /// Edits deck and content fields. The schedule of the card is never touched
    /// here; only a review can move it.
    pub fn update_card(&self, id: CardId, update: CardUpdate) -> Result<Card> {
        validate_update(&update)?;

        let conn = self.lock();
        let tx = Transaction::new_unchecked(&conn, TransactionBehavior::Immediate)?;
        let now = self.clock.now();
        let mut card = db::get_card(id, &tx)?.ok_or(Error::NotFound(id))?;
        if update.is_empty() {
            return Ok(card);
        }

        if let Some(deck_name) = update.deck_name {
            card.deck_name = deck_name;
        }
        if let Some(front) = update.front {
            card.front = front;
        }
        if let Some(back) = update.back {
            card.back = back;
        }
        db::update_card_content(&card, now, &tx)?;
        let card = db::get_card(id, &tx)?.ok_or(Error::NotFound(id))?;
        tx.commit()?;

        info!(%id, "card updated");
        Ok(card)
    }

    pub fn delete_card(&self, id: CardId) -> Result<()> {
        let conn = self.lock();
        if !db::delete_card(id, &conn)? {
            return Err(Error::NotFound(id));
        }
        info!(%id, "card deleted");
        Ok(())
    }

    /// Applies a raw score from a caller. Scores outside 1..=4 are rejected
    /// before the card is read.
    pub fn submit_review(&self, id: CardId, score: i64) -> Result<Card> {
        let quality = Quality::try_from(score).inspect_err(|_| {
            warn!(%id, score, "rejected review with invalid score");
        })?;
        self.review(id, quality)
    }

    /// Fetches the card, runs the scheduler and stores the new state in one
    /// transaction.
    pub fn review(&self, id: CardId, quality: Quality) -> Result<Card> {
        let conn = self.lock();
        let tx = Transaction::new_unchecked(&conn, TransactionBehavior::Immediate)?;
        // Read inside the transaction so commit order follows clock order.
        let now = self.clock.now();
        let card = db::get_card(id, &tx)?.ok_or(Error::NotFound(id))?;
        let state = advance(&card.state, quality, now);
        db::update_review_state(id, &state, now, &tx)?;
        let card = db::get_card(id, &tx)?.ok_or(Error::NotFound(id))?;
        tx.commit()?;

        info!(
            %id,
            %quality,
            ease = card.state.ease,
            interval = card.state.interval,
            next_review = %card.state.next_review,
            "card reviewed"
        );
        Ok(card)
    }

    /// Next batch of due cards, earliest due first. `limit` defaults to 20.
    pub fn due_cards(&self, deck_name: Option<&str>, limit: Option<i64>) -> Result<Vec<Card>> {
        let limit = limit.unwrap_or(DEFAULT_DUE_LIMIT);
        let max_rows = validate_limit(limit).inspect_err(|_| {
            warn!(limit, "rejected due query with invalid limit");
        })?;

        let (candidates, now) = {
            let conn = self.lock();
            let now = self.clock.now();
            (db::get_due_candidates(deck_name, now, max_rows, &conn)?, now)
        };
        select_due(&candidates, deck_name, now, limit)
    }

    /// Creates one fresh card per flashcard of the deck, all or nothing.
    pub fn import_deck(&self, deck: &Deck) -> Result<Vec<Card>> {
        let new_cards = deck
            .flashcards
            .iter()
            .map(|fc| normalize_new_card(NewCard::new(&deck.name, &fc.front, &fc.back)))
            .collect::<Result<Vec<_>>>()?;

        let conn = self.lock();
        let tx = Transaction::new_unchecked(&conn, TransactionBehavior::Immediate)?;
        let now = self.clock.now();
        let mut cards = Vec::with_capacity(new_cards.len());
        for new_card in &new_cards {
            cards.push(db::insert_card(new_card, now, &tx)?);
        }
        tx.commit()?;

        info!(deck = %deck.name, cards = cards.len(), "deck imported");
        Ok(cards)
    }

    /// Content of a deck in creation order. Scheduling state is not exported.
    pub fn export_deck(&self, deck_name: &str) -> Result<Deck> {
        let cards = self.list_cards(Some(deck_name))?;
        if cards.is_empty() {
            return Err(Error::DeckNotFound(deck_name.to_string()));
        }

        let flashcards = cards
            .into_iter()
            .rev()
            .map(|card| Flashcard::new(card.front, card.back))
            .collect();

        Ok(Deck {
            name: deck_name.to_string(),
            flashcards,
        })
    }
}

fn normalize_new_card(mut new_card: NewCard) -> Result<NewCard> {
    if new_card.front.trim().is_empty() || new_card.back.trim().is_empty() {
        warn!("rejected card without front or back");
        return Err(Error::InvalidCard("front and back are required".to_string()));
    }
    if new_card.deck_name.trim().is_empty() {
        new_card.deck_name = DEFAULT_DECK.to_string();
    }
    Ok(new_card)
}

fn validate_update(update: &CardUpdate) -> Result<()> {
    let fields = [
        ("deck_name", &update.deck_name),
        ("front", &update.front),
        ("back", &update.back),
    ];
    for (name, value) in fields {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            warn!(field = name, "rejected empty field in card update");
            return Err(Error::InvalidCard(format!("{name} cannot be empty")));
        }
    }
    Ok(())
}

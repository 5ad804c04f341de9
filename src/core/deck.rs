//! Deck construction.
//!
//! A deck is an ordered sequence of symbols where every symbol appears on
//! exactly two cards. Decks are immutable once built; a restart replaces the
//! deck wholesale rather than mutating it.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::config::Symbol;
use super::rng::GameRng;
use crate::error::SetupError;

/// An ordered sequence of paired symbols forming the game's cards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Symbol>,
}

impl Deck {
    /// Build an unshuffled deck containing each symbol exactly twice.
    ///
    /// Length is `2 × symbols.len()`. No ordering guarantee beyond that.
    #[must_use]
    pub fn generate(symbols: &[Symbol]) -> Self {
        let cards = symbols.iter().chain(symbols.iter()).copied().collect();
        Self { cards }
    }

    /// Build and uniformly shuffle a deck for the given symbol set.
    #[must_use]
    pub fn shuffled(symbols: &[Symbol], rng: &mut GameRng) -> Self {
        let mut deck = Self::generate(symbols);
        rng.shuffle(&mut deck.cards);
        deck
    }

    /// Build a deck from an explicit card layout.
    ///
    /// Used for scripted sessions (replays, tests). The layout must still be
    /// a valid pairing: even length, every symbol appearing exactly twice.
    pub fn from_cards(cards: Vec<Symbol>) -> Result<Self, SetupError> {
        if cards.len() % 2 != 0 {
            return Err(SetupError::OddDeck(cards.len()));
        }

        let mut counts: FxHashMap<Symbol, usize> = FxHashMap::default();
        for &card in &cards {
            *counts.entry(card).or_insert(0) += 1;
        }
        // Report the first offender in layout order, not map order.
        for &card in &cards {
            if counts[&card] != 2 {
                return Err(SetupError::UnpairedSymbol(card));
            }
        }

        Ok(Self { cards })
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True for a deck with no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of symbol pairs, i.e. the matched-pair count needed to win.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    /// Symbol at a position, `None` if out of range.
    #[must_use]
    pub fn symbol_at(&self, position: usize) -> Option<Symbol> {
        self.cards.get(position).copied()
    }

    /// All cards in order.
    #[must_use]
    pub fn cards(&self) -> &[Symbol] {
        &self.cards
    }
}

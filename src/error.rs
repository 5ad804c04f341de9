//! Setup error taxonomy.
//!
//! Only session construction can fail. Gameplay operations never error:
//! blocked or out-of-range selections are observable no-ops (the board can
//! not be crashed from player input), so there is no runtime error type.

use thiserror::Error;

use crate::core::Symbol;

/// Errors raised while building a session or deck.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    /// The configured symbol set is empty.
    #[error("symbol set is empty")]
    NoSymbols,

    /// The same symbol was configured twice.
    #[error("duplicate symbol in set: {0}")]
    DuplicateSymbol(Symbol),

    /// A scripted deck has an odd number of cards.
    #[error("deck has {0} cards, expected an even count")]
    OddDeck(usize),

    /// A scripted deck contains a symbol that doesn't appear exactly twice.
    #[error("symbol {0} does not appear exactly twice")]
    UnpairedSymbol(Symbol),
}

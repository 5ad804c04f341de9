//! Session event stream.
//!
//! The session queues an event for every observable state change; rendering
//! layers drain the queue after each operation instead of relying on
//! implicit re-render triggers. Events are plain data and serializable so a
//! frontend on the far side of a serialization boundary can consume them.

use serde::{Deserialize, Serialize};

use crate::core::Symbol;

/// Something observable happened in the session.
///
/// Pair positions are reported in selection order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A fresh deck was dealt (initial start or restart).
    SessionStarted {
        /// Cards in the new deck.
        card_count: usize,
    },

    /// A card was flipped face-up by a selection.
    CardRevealed { position: usize, symbol: Symbol },

    /// Two selected cards matched and stay face-up.
    PairMatched {
        positions: [usize; 2],
        symbol: Symbol,
        /// Running matched-pair total after this match.
        matched_pairs: usize,
    },

    /// Two selected cards didn't match; the board is locked until they are
    /// hidden again.
    MismatchPending { positions: [usize; 2] },

    /// A mismatched pair's hide delay elapsed and both cards flipped back.
    CardsHidden { positions: [usize; 2] },

    /// Every pair has been matched.
    GameWon {
        /// Total pairs on the board.
        pair_count: usize,
    },
}

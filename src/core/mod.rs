//! Core engine types: RNG, configuration, deck construction.
//!
//! These are the building blocks the session is assembled from. None of them
//! know about gameplay; they only describe what the cards are and how they
//! get shuffled.

pub mod config;
pub mod deck;
pub mod rng;

pub use config::{SessionConfig, Symbol};
pub use deck::Deck;
pub use rng::{GameRng, GameRngState};

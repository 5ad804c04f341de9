//! Session configuration types.
//!
//! A session is configured at startup with the symbol set to pair up and the
//! mismatch-hide delay. The engine never hardcodes a symbol set - callers
//! define them, and the defaults only exist as a convenience for frontends.

use std::time::Duration;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::SetupError;

/// A card symbol. The engine doesn't interpret symbols - they're opaque
/// glyphs that are only ever compared for equality and handed to renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(pub char);

impl Symbol {
    /// Create a new symbol from a glyph.
    #[must_use]
    pub const fn new(glyph: char) -> Self {
        Self(glyph)
    }

    /// Get the raw glyph.
    #[must_use]
    pub const fn glyph(self) -> char {
        self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Configuration for a game session.
///
/// Each symbol appears on exactly two cards, so a config with `n` symbols
/// produces a `2n`-card deck.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Symbols to pair up. Must be non-empty and free of duplicates.
    pub symbols: Vec<Symbol>,

    /// How long a mismatched pair stays revealed before it is hidden again.
    pub mismatch_delay: Duration,
}

impl SessionConfig {
    /// Delay used when none is configured.
    pub const DEFAULT_MISMATCH_DELAY: Duration = Duration::from_millis(1000);

    /// The six fruit glyphs of the classic board.
    pub const FRUIT: [Symbol; 6] = [
        Symbol::new('🍎'),
        Symbol::new('🍌'),
        Symbol::new('🍒'),
        Symbol::new('🍇'),
        Symbol::new('🍉'),
        Symbol::new('🍍'),
    ];

    /// Create a configuration with the given symbol set and the default
    /// mismatch delay.
    pub fn new(symbols: impl Into<Vec<Symbol>>) -> Self {
        Self {
            symbols: symbols.into(),
            mismatch_delay: Self::DEFAULT_MISMATCH_DELAY,
        }
    }

    /// Set the mismatch-hide delay.
    #[must_use]
    pub fn with_mismatch_delay(mut self, delay: Duration) -> Self {
        self.mismatch_delay = delay;
        self
    }

    /// Number of cards a deck built from this config will have.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.symbols.len() * 2
    }

    /// Validate the configuration.
    ///
    /// A duplicate symbol would break the "each symbol appears exactly twice"
    /// deck invariant, so it is rejected here rather than surfacing later as
    /// a deck that can never be won correctly.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.symbols.is_empty() {
            return Err(SetupError::NoSymbols);
        }

        let mut seen = FxHashSet::default();
        for &symbol in &self.symbols {
            if !seen.insert(symbol) {
                return Err(SetupError::DuplicateSymbol(symbol));
            }
        }

        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(Self::FRUIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.symbols.len(), 6);
        assert_eq!(config.card_count(), 12);
        assert_eq!(config.mismatch_delay, Duration::from_millis(1000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_symbols_rejected() {
        let config = SessionConfig::new(Vec::<Symbol>::new());
        assert_eq!(config.validate(), Err(SetupError::NoSymbols));
    }

    #[test]
    fn test_duplicate_symbols_rejected() {
        let a = Symbol::new('A');
        let config = SessionConfig::new(vec![a, Symbol::new('B'), a]);
        assert_eq!(config.validate(), Err(SetupError::DuplicateSymbol(a)));
    }

    #[test]
    fn test_with_mismatch_delay() {
        let config = SessionConfig::default().with_mismatch_delay(Duration::from_millis(250));
        assert_eq!(config.mismatch_delay, Duration::from_millis(250));
    }

    #[test]
    fn test_symbol_display() {
        assert_eq!(Symbol::new('🍎').to_string(), "🍎");
        assert_eq!(Symbol::new('A').glyph(), 'A');
    }
}

//! # pairmatch
//!
//! A memory-matching card game engine.
//!
//! ## Design Principles
//!
//! 1. **Explicit state**: The game is a mutable [`GameSession`] driven by
//!    discrete operations, not implicit framework re-renders. Renderers poll
//!    session state and drain a queue of [`SessionEvent`]s.
//!
//! 2. **Configuration over constants**: Symbol sets and the mismatch delay
//!    are passed in via [`SessionConfig`], never hardcoded.
//!
//! 3. **Deterministic by seed**: All shuffling goes through [`GameRng`]
//!    (ChaCha8, Fisher–Yates). Same seed, same deck.
//!
//! 4. **Explicit time**: Operations that involve the mismatch-hide delay take
//!    `Instant` parameters. The engine never samples the clock, so tests
//!    drive time directly.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, deck construction
//! - `session`: The game session state machine
//! - `timer`: Deferred mismatch-hide task with generation-based cancellation
//! - `events`: Session event stream for rendering layers

pub mod core;
pub mod error;
pub mod events;
pub mod session;
pub mod timer;

// Re-export commonly used types
pub use crate::core::{Deck, GameRng, GameRngState, SessionConfig, Symbol};
pub use crate::error::SetupError;
pub use crate::events::SessionEvent;
pub use crate::session::{GameSession, IgnoreReason, SelectOutcome};
pub use crate::timer::HideTask;

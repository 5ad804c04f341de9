//! The game session state machine.
//!
//! A [`GameSession`] owns the shuffled deck, the face-up flags, the 0-2
//! pending selections awaiting comparison, the matched-pair count, and the
//! optional comparison lock (a pending [`HideTask`]). All mutation happens
//! through [`GameSession::select`], [`GameSession::tick`], and
//! [`GameSession::restart`].
//!
//! ## Invariants
//!
//! - Pending selection holds at most 2 positions, all currently face-up.
//! - The comparison lock is held iff a hide task is pending, and while held
//!   no selection is accepted.
//! - Matched pairs only ever grow, up to `deck.pair_count()`, until restart.
//!
//! ## Time
//!
//! The session never reads the clock. `select` takes `now` to stamp the hide
//! deadline and `tick` takes `now` to decide whether it has passed, so a
//! host can drive real time (`Instant::now()`) and tests can drive fabricated
//! instants without sleeping.

use std::collections::VecDeque;
use std::time::Instant;

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{Deck, GameRng, SessionConfig, Symbol};
use crate::error::SetupError;
use crate::events::SessionEvent;
use crate::timer::HideTask;

/// Result of a [`GameSession::select`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The selection was blocked by a precondition; nothing changed.
    Ignored(IgnoreReason),
    /// First card of a pair revealed; awaiting a second selection.
    Revealed,
    /// Second card revealed and it matched the first.
    Matched,
    /// Second card revealed and it didn't match; the board is locked until
    /// the hide delay elapses.
    Mismatched,
}

/// Why a selection was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Position is not a valid deck index.
    OutOfRange,
    /// A mismatched pair's hide delay is still pending.
    Locked,
    /// The card is already face-up.
    AlreadyFaceUp,
}

/// A memory-matching game session.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: SessionConfig,
    rng: GameRng,
    deck: Deck,
    face_up: Vec<bool>,
    pending: SmallVec<[usize; 2]>,
    matched_pairs: usize,
    hide_task: Option<HideTask>,
    generation: u64,
    events: VecDeque<SessionEvent>,
}

impl GameSession {
    /// Start a session: validate the config, shuffle a fresh deck, and deal
    /// it all face-down.
    pub fn new(config: SessionConfig, seed: u64) -> Result<Self, SetupError> {
        config.validate()?;
        let mut rng = GameRng::new(seed);
        let deck = Deck::shuffled(&config.symbols, &mut rng);
        Ok(Self::assemble(config, rng, deck))
    }

    /// Start a session over an explicit card layout (replays, tests).
    ///
    /// The deck is used as-is for this incarnation; a later [`restart`]
    /// reshuffles from the config's symbol set as usual.
    ///
    /// [`restart`]: GameSession::restart
    pub fn from_deck(config: SessionConfig, deck: Deck, seed: u64) -> Result<Self, SetupError> {
        config.validate()?;
        Ok(Self::assemble(config, GameRng::new(seed), deck))
    }

    fn assemble(config: SessionConfig, rng: GameRng, deck: Deck) -> Self {
        let card_count = deck.len();
        let mut session = Self {
            config,
            rng,
            deck,
            face_up: vec![false; card_count],
            pending: SmallVec::new(),
            matched_pairs: 0,
            hide_task: None,
            generation: 0,
            events: VecDeque::new(),
        };
        session.events.push_back(SessionEvent::SessionStarted { card_count });
        session
    }

    /// Discard the board and deal a fresh shuffled deck.
    ///
    /// Atomic from the player's perspective: face-up flags, pending
    /// selection, matched count, and the comparison lock are all reset
    /// together. The generation bump invalidates any hide task scheduled
    /// against the old deck.
    pub fn restart(&mut self) {
        self.generation += 1;
        self.hide_task = None;
        self.deck = Deck::shuffled(&self.config.symbols, &mut self.rng);
        self.face_up = vec![false; self.deck.len()];
        self.pending.clear();
        self.matched_pairs = 0;
        debug!(generation = self.generation, "session restarted");
        self.events.push_back(SessionEvent::SessionStarted {
            card_count: self.deck.len(),
        });
    }

    /// Select the card at `position`.
    ///
    /// A no-op (no state change, no error) when the position is out of
    /// range, the card is already face-up, or the board is comparison-locked
    /// by a pending mismatch. Otherwise the card is revealed; if it is the
    /// second of a pair the comparison resolves immediately - a match stays
    /// face-up for good, a mismatch locks the board and schedules the pair
    /// to be hidden at `now + mismatch_delay`.
    pub fn select(&mut self, position: usize, now: Instant) -> SelectOutcome {
        let Some(symbol) = self.deck.symbol_at(position) else {
            trace!(position, "select ignored: out of range");
            return SelectOutcome::Ignored(IgnoreReason::OutOfRange);
        };
        if self.hide_task.is_some() {
            trace!(position, "select ignored: comparison lock held");
            return SelectOutcome::Ignored(IgnoreReason::Locked);
        }
        if self.face_up[position] {
            trace!(position, "select ignored: already face-up");
            return SelectOutcome::Ignored(IgnoreReason::AlreadyFaceUp);
        }
        debug_assert!(self.pending.len() < 2, "pending pair left unresolved");

        self.face_up[position] = true;
        self.pending.push(position);
        self.events.push_back(SessionEvent::CardRevealed { position, symbol });

        if self.pending.len() < 2 {
            return SelectOutcome::Revealed;
        }

        let (a, b) = (self.pending[0], self.pending[1]);
        if self.deck.symbol_at(a) == self.deck.symbol_at(b) {
            self.matched_pairs += 1;
            self.pending.clear();
            debug!(a, b, matched_pairs = self.matched_pairs, "pair matched");
            self.events.push_back(SessionEvent::PairMatched {
                positions: [a, b],
                symbol,
                matched_pairs: self.matched_pairs,
            });
            if self.is_won() {
                self.events.push_back(SessionEvent::GameWon {
                    pair_count: self.deck.pair_count(),
                });
            }
            SelectOutcome::Matched
        } else {
            // Pending stays populated until the task fires; the lock keeps
            // further selections out in the meantime.
            let due = now + self.config.mismatch_delay;
            self.hide_task = Some(HideTask::new([a, b], due, self.generation));
            debug!(a, b, "mismatch, board locked");
            self.events
                .push_back(SessionEvent::MismatchPending { positions: [a, b] });
            SelectOutcome::Mismatched
        }
    }

    /// Fire the pending hide task if its deadline has passed.
    ///
    /// Returns true if a pair was hidden. A task scheduled by a previous
    /// incarnation (stale generation) is discarded without touching the
    /// board.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(task) = self.hide_task else {
            return false;
        };
        if task.is_stale(self.generation) {
            self.hide_task = None;
            return false;
        }
        if !task.is_due(now) {
            return false;
        }

        let [a, b] = task.positions();
        self.face_up[a] = false;
        self.face_up[b] = false;
        self.pending.clear();
        self.hide_task = None;
        debug!(a, b, "mismatched pair hidden, board unlocked");
        self.events
            .push_back(SessionEvent::CardsHidden { positions: [a, b] });
        true
    }

    /// True once every pair has been matched (and the deck is non-empty).
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.matched_pairs * 2 == self.deck.len() && !self.deck.is_empty()
    }

    /// True while a mismatched pair's hide delay is pending.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.hide_task.is_some()
    }

    /// Number of cards on the board.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.deck.len()
    }

    /// Whether the card at `position` is currently face-up.
    ///
    /// Out-of-range positions read as face-down.
    #[must_use]
    pub fn is_face_up(&self, position: usize) -> bool {
        self.face_up.get(position).copied().unwrap_or(false)
    }

    /// The symbol at `position` if it is currently visible to the player.
    #[must_use]
    pub fn visible_symbol(&self, position: usize) -> Option<Symbol> {
        if self.is_face_up(position) {
            self.deck.symbol_at(position)
        } else {
            None
        }
    }

    /// Confirmed matched pairs so far.
    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    /// Positions currently awaiting comparison, in selection order.
    #[must_use]
    pub fn pending_selection(&self) -> &[usize] {
        &self.pending
    }

    /// The scheduled hide task, if the board is locked.
    #[must_use]
    pub fn pending_hide(&self) -> Option<&HideTask> {
        self.hide_task.as_ref()
    }

    /// Deadline of the pending hide task, for hosts that sleep until it.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.hide_task.map(|t| t.due())
    }

    /// Session incarnation counter; bumped by every restart.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The session configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The current deck.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Take all events queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn scripted(layout: &str) -> GameSession {
        let cards = layout.chars().map(Symbol::new).collect();
        let deck = Deck::from_cards(cards).unwrap();
        // Config symbols only matter on restart.
        let config = SessionConfig::new(vec![Symbol::new('A'), Symbol::new('B')]);
        GameSession::from_deck(config, deck, 42).unwrap()
    }

    #[test]
    fn test_new_session_starts_face_down() {
        let session = GameSession::new(SessionConfig::default(), 42).unwrap();

        assert_eq!(session.card_count(), 12);
        assert!((0..12).all(|i| !session.is_face_up(i)));
        assert!(session.pending_selection().is_empty());
        assert_eq!(session.matched_pairs(), 0);
        assert!(!session.is_won());
        assert!(!session.is_locked());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = GameSession::new(SessionConfig::new(Vec::<Symbol>::new()), 42);
        assert_eq!(err.err(), Some(SetupError::NoSymbols));
    }

    #[test]
    fn test_first_selection_reveals() {
        let mut session = scripted("ABAB");
        let now = Instant::now();

        assert_eq!(session.select(0, now), SelectOutcome::Revealed);
        assert!(session.is_face_up(0));
        assert_eq!(session.visible_symbol(0), Some(Symbol::new('A')));
        assert_eq!(session.pending_selection(), &[0]);
    }

    #[test]
    fn test_select_same_card_twice_is_noop() {
        let mut session = scripted("ABAB");
        let now = Instant::now();

        session.select(0, now);
        let outcome = session.select(0, now);

        assert_eq!(
            outcome,
            SelectOutcome::Ignored(IgnoreReason::AlreadyFaceUp)
        );
        assert_eq!(session.pending_selection(), &[0]);
        assert_eq!(session.matched_pairs(), 0);
    }

    #[test]
    fn test_select_out_of_range_is_noop() {
        let mut session = scripted("ABAB");
        let now = Instant::now();

        assert_eq!(
            session.select(99, now),
            SelectOutcome::Ignored(IgnoreReason::OutOfRange)
        );
        assert!(session.pending_selection().is_empty());
    }

    #[test]
    fn test_visible_symbol_hidden_card() {
        let session = scripted("ABAB");
        assert_eq!(session.visible_symbol(0), None);
        assert_eq!(session.visible_symbol(99), None);
    }

    #[test]
    fn test_match_stays_face_up_without_lock() {
        let mut session = scripted("ABAB");
        let now = Instant::now();

        session.select(0, now);
        assert_eq!(session.select(2, now), SelectOutcome::Matched);

        assert_eq!(session.matched_pairs(), 1);
        assert!(session.is_face_up(0));
        assert!(session.is_face_up(2));
        assert!(!session.is_locked());
        assert!(session.pending_selection().is_empty());
    }

    #[test]
    fn test_mismatch_locks_and_hides_after_delay() {
        let mut session = scripted("ABBA");
        let t0 = Instant::now();

        session.select(0, t0);
        assert_eq!(session.select(1, t0), SelectOutcome::Mismatched);

        assert!(session.is_locked());
        assert!(session.is_face_up(0));
        assert!(session.is_face_up(1));
        assert_eq!(session.next_deadline(), Some(t0 + Duration::from_millis(1000)));

        // Not due yet.
        assert!(!session.tick(t0 + Duration::from_millis(500)));
        assert!(session.is_locked());

        assert!(session.tick(t0 + Duration::from_millis(1000)));
        assert!(!session.is_face_up(0));
        assert!(!session.is_face_up(1));
        assert!(!session.is_locked());
        assert!(session.pending_selection().is_empty());
    }

    #[test]
    fn test_select_while_locked_is_noop() {
        let mut session = scripted("ABBA");
        let t0 = Instant::now();

        session.select(0, t0);
        session.select(1, t0);

        assert_eq!(
            session.select(2, t0),
            SelectOutcome::Ignored(IgnoreReason::Locked)
        );
        assert!(!session.is_face_up(2));
        assert_eq!(session.pending_selection(), &[0, 1]);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut session = scripted("ABAB");
        let now = Instant::now();

        session.select(0, now);
        session.select(2, now);
        assert_eq!(session.matched_pairs(), 1);

        session.restart();

        assert_eq!(session.generation(), 1);
        assert_eq!(session.matched_pairs(), 0);
        assert!(session.pending_selection().is_empty());
        assert!(!session.is_locked());
        assert!((0..session.card_count()).all(|i| !session.is_face_up(i)));
        // Restart reshuffles from the config's symbol set.
        assert_eq!(session.card_count(), 4);
    }

    #[test]
    fn test_stale_hide_task_never_touches_new_deck() {
        let mut session = scripted("ABBA");
        let t0 = Instant::now();

        session.select(0, t0);
        session.select(1, t0);
        let stale_deadline = session.next_deadline().unwrap();

        session.restart();
        session.select(0, t0);

        // The old task's deadline passing must not flip the new board.
        assert!(!session.tick(stale_deadline + Duration::from_secs(1)));
        assert!(session.is_face_up(0));
        assert_eq!(session.pending_selection(), &[0]);
    }

    #[test]
    fn test_events_are_queued_and_drained() {
        let mut session = scripted("ABAB");
        let now = Instant::now();

        assert_eq!(
            session.drain_events(),
            vec![SessionEvent::SessionStarted { card_count: 4 }]
        );

        session.select(0, now);
        session.select(2, now);

        let events = session.drain_events();
        assert_eq!(
            events,
            vec![
                SessionEvent::CardRevealed {
                    position: 0,
                    symbol: Symbol::new('A'),
                },
                SessionEvent::CardRevealed {
                    position: 2,
                    symbol: Symbol::new('A'),
                },
                SessionEvent::PairMatched {
                    positions: [0, 2],
                    symbol: Symbol::new('A'),
                    matched_pairs: 1,
                },
            ]
        );
        assert!(session.drain_events().is_empty());
    }
}

//! Deferred mismatch-hide task.
//!
//! When two revealed cards don't match they stay face-up for a fixed delay
//! before flipping back down. That delay is represented as an explicit
//! [`HideTask`] with a deadline instead of an untracked callback, and the
//! task carries the generation of the session that scheduled it: a restart
//! bumps the session generation, so a task left over from the previous deck
//! is stale and fires as a no-op rather than mutating the new board.

use std::time::Instant;

/// A scheduled flip-down of a mismatched pair.
///
/// While one of these is pending the session is comparison-locked: no new
/// selections are accepted until the task fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HideTask {
    positions: [usize; 2],
    due: Instant,
    generation: u64,
}

impl HideTask {
    /// Create a task for the given pair, due at `due`, tied to the session
    /// incarnation `generation`.
    pub(crate) fn new(positions: [usize; 2], due: Instant, generation: u64) -> Self {
        Self {
            positions,
            due,
            generation,
        }
    }

    /// The two positions to hide, in selection order.
    #[must_use]
    pub fn positions(&self) -> [usize; 2] {
        self.positions
    }

    /// When the pair should flip back down.
    #[must_use]
    pub fn due(&self) -> Instant {
        self.due
    }

    /// Generation of the session incarnation that scheduled this task.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True once the deadline has passed.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }

    /// True if the session has been restarted since this task was scheduled.
    #[must_use]
    pub fn is_stale(&self, current_generation: u64) -> bool {
        self.generation != current_generation
    }
}

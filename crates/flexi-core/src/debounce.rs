#![forbid(unsafe_code)]

//! Leading-edge debounce gates.
//!
//! A [`DebounceGate`] lets the first signal through and then suppresses
//! signals until a cooldown has elapsed. Suppressed signals are dropped, not
//! queued: this is a leading-edge gate, the action runs at the start of a
//! burst and never at its end.
//!
//! # Invariants
//!
//! 1. A signal arriving with no active cooldown passes and arms the cooldown.
//! 2. A signal arriving during the cooldown is dropped and re-arms the
//!    cooldown from its own arrival time, so a continuous burst is acted on
//!    exactly once.
//! 3. `cancel()` and `set_cooldown()` leave no pending deadline behind.
//! 4. [`DebounceGate::sample`] drops without re-arming; the cooldown still
//!    ends at the deadline set by the last passed signal.
//!
//! # Usage
//!
//! ```
//! use flexi_core::debounce::{DebounceGate, Gate};
//! use std::time::Duration;
//! use web_time::Instant;
//!
//! let mut gate = DebounceGate::new(Duration::from_millis(100));
//! let t0 = Instant::now();
//! assert_eq!(gate.signal(t0), Gate::Pass);
//! assert_eq!(gate.signal(t0 + Duration::from_millis(40)), Gate::Drop);
//! assert_eq!(gate.signal(t0 + Duration::from_millis(200)), Gate::Pass);
//! ```

use std::time::Duration;
use web_time::Instant;

/// Outcome of offering a signal to a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Act on the signal now.
    Pass,
    /// Cooldown active; the signal is discarded.
    Drop,
}

impl Gate {
    #[must_use]
    pub const fn passed(self) -> bool {
        matches!(self, Gate::Pass)
    }
}

/// Leading-edge debounce state for one signal channel.
#[derive(Debug, Clone)]
pub struct DebounceGate {
    cooldown: Duration,
    /// Deadline of the active cooldown. `None` when the gate is open.
    cooling_until: Option<Instant>,
    passed: u64,
    dropped: u64,
}

impl DebounceGate {
    #[must_use]
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            cooling_until: None,
            passed: 0,
            dropped: 0,
        }
    }

    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// Offer a signal arriving at `now`.
    pub fn signal(&mut self, now: Instant) -> Gate {
        self.expire(now);
        let gate = if self.cooling_until.is_some() {
            self.dropped += 1;
            Gate::Drop
        } else {
            self.passed += 1;
            Gate::Pass
        };
        self.cooling_until = Some(now + self.cooldown);
        gate
    }

    /// Offer a sampled signal. A drop leaves the active cooldown as it is,
    /// so periodic sampling cannot hold the gate shut.
    pub fn sample(&mut self, now: Instant) -> Gate {
        self.expire(now);
        if self.cooling_until.is_some() {
            self.dropped += 1;
            return Gate::Drop;
        }
        self.passed += 1;
        self.cooling_until = Some(now + self.cooldown);
        Gate::Pass
    }

    /// Clear the cooldown flag if its deadline has passed.
    pub fn expire(&mut self, now: Instant) {
        if self.cooling_until.is_some_and(|until| now >= until) {
            self.cooling_until = None;
        }
    }

    /// Whether a signal arriving at `now` would be dropped.
    #[must_use]
    pub fn is_cooling(&self, now: Instant) -> bool {
        self.cooling_until.is_some_and(|until| now < until)
    }

    /// Deadline of the active cooldown, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.cooling_until
    }

    /// Drop any active cooldown.
    pub fn cancel(&mut self) {
        self.cooling_until = None;
    }

    /// Change the cooldown length. Any active cooldown is cancelled.
    pub fn set_cooldown(&mut self, cooldown: Duration) {
        self.cooldown = cooldown;
        self.cancel();
    }

    #[must_use]
    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Number of signals let through.
    #[must_use]
    pub fn passed_count(&self) -> u64 {
        self.passed
    }

    /// Number of signals dropped.
    #[must_use]
    pub fn dropped_count(&self) -> u64 {
        self.dropped
    }
}

//! Recalculation sequencing for interactive callers.
//!
//! Slider-driven callers coalesce rapid edits behind a short debounce
//! window and may have a recalculation in flight when the next edit lands.
//! Only the most recently issued recalculation is authoritative; a result
//! that arrives for an older ticket, or after cancellation, is discarded.
//!
//! The gate owns no timers or threads. Callers pass in instants and decide
//! how to run the work.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Coalescing window between an edit and the recalculation it triggers.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Identifies one issued recalculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecalcTicket(u64);

impl RecalcTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct RecalcGate {
    latest: u64,
    in_flight: bool,
    debounce: Duration,
}

impl Default for RecalcGate {
    fn default() -> Self {
        RecalcGate::new(DEFAULT_DEBOUNCE)
    }
}

impl RecalcGate {
    pub fn new(debounce: Duration) -> Self {
        RecalcGate {
            latest: 0,
            in_flight: false,
            debounce,
        }
    }

    /// Start a recalculation, superseding any earlier ticket.
    pub fn issue(&mut self) -> RecalcTicket {
        self.latest += 1;
        self.in_flight = true;
        RecalcTicket(self.latest)
    }

    /// True while `ticket` is the latest issued and still unresolved.
    pub fn is_current(&self, ticket: RecalcTicket) -> bool {
        self.in_flight && ticket.0 == self.latest
    }

    /// Accept a finished result. Returns it only for the current ticket,
    /// and only once; stale results come back as `None`.
    pub fn complete<T>(&mut self, ticket: RecalcTicket, result: T) -> Option<T> {
        if !self.is_current(ticket) {
            return None;
        }
        self.in_flight = false;
        Some(result)
    }

    /// Abandon the in-flight recalculation without issuing a new one.
    pub fn cancel(&mut self) {
        self.in_flight = false;
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Whether the debounce window since `last_change` has passed at `now`.
    pub fn debounce_elapsed(&self, last_change: Instant, now: Instant) -> bool {
        now.saturating_duration_since(last_change) >= self.debounce
    }
}

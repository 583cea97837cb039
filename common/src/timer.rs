//! Per-second update timer.
//!
//! The engine never sleeps or spawns; it only tells an [`UpdateTimer`] when
//! the next redraw is due. Hosts either map that onto their own timer
//! facility or use [`DeadlineTimer`] and poll it from their main loop.
//!
//! All times are plain milliseconds from a host-chosen epoch.

/// One-shot timer the engine re-arms after every tick.
pub trait UpdateTimer {
    /// Arm the timer to fire `delay_ms` after `now_ms`, replacing any pending tick.
    fn schedule(
        &mut self,
        now_ms: u64,
        delay_ms: u64,
    );

    /// Drop the pending tick, if any.
    fn cancel(&mut self);

    fn is_pending(&self) -> bool;
}

/// Timer that stores an absolute deadline and is polled by the host loop.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeadlineTimer {
    deadline: Option<u64>,
}

impl DeadlineTimer {
    pub const fn new() -> Self { Self { deadline: None } }

    #[inline]
    pub const fn deadline(&self) -> Option<u64> { self.deadline }

    /// Returns `true` once when the deadline has passed and disarms the timer.
    pub fn poll(
        &mut self,
        now_ms: u64,
    ) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl UpdateTimer for DeadlineTimer {
    fn schedule(
        &mut self,
        now_ms: u64,
        delay_ms: u64,
    ) {
        self.deadline = Some(now_ms.saturating_add(delay_ms));
    }

    fn cancel(&mut self) { self.deadline = None; }

    fn is_pending(&self) -> bool { self.deadline.is_some() }
}

// =============================================================================
// Unit Tests
// =============================================================================

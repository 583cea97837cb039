//! Update timing.
//!
//! In interactive mode the face is redrawn once a second. Each tick is
//! scheduled so that it lands on the next whole second of the wall clock,
//! which keeps the seconds digits in step with the system time.

/// Redraw period in interactive mode, in milliseconds.
pub const INTERACTIVE_UPDATE_RATE_MS: u64 = 1000;

const _: () = assert!(INTERACTIVE_UPDATE_RATE_MS > 0);

/// Delay from `now_ms` until the next whole update period.
///
/// Always in `1..=INTERACTIVE_UPDATE_RATE_MS`: a call exactly on a period
/// boundary waits a full period rather than firing immediately.
#[inline]
pub const fn next_tick_delay_ms(now_ms: u64) -> u64 { INTERACTIVE_UPDATE_RATE_MS - now_ms % INTERACTIVE_UPDATE_RATE_MS }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_tick_aligns_to_second() {
        assert_eq!(next_tick_delay_ms(1_700_000_000_250), 750);
        assert_eq!(next_tick_delay_ms(999), 1);
        assert_eq!((12_345 + next_tick_delay_ms(12_345)) % 1000, 0);
    }

    #[test]
    fn test_next_tick_on_boundary_waits_full_period() {
        assert_eq!(next_tick_delay_ms(0), INTERACTIVE_UPDATE_RATE_MS);
        assert_eq!(next_tick_delay_ms(5_000), INTERACTIVE_UPDATE_RATE_MS);
    }
}

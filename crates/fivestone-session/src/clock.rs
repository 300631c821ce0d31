//! Lazy clock arithmetic.
//!
//! Sessions never run a background timer. Instead they remember one
//! [`Instant`] — the calibration point, set when the current player's
//! turn began — and charge the elapsed time against that player's
//! remaining budget whenever an event (a move, a disconnect, a timeout
//! probe) forces the clock to be settled. Between events the clock is
//! conceptually ticking but no state changes.

use std::time::{Duration, Instant};

/// The result of settling a clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockCharge {
    /// The elapsed time fit inside the budget; this much was spent.
    Spent(Duration),
    /// The elapsed time met or exceeded the budget. The flag has fallen.
    Exhausted,
}

/// Charges the time elapsed since `calibration` against `remaining`.
///
/// Exactly consuming the budget counts as [`ClockCharge::Exhausted`]:
/// a player with zero time left has lost, even if no further time
/// passes. `now` earlier than `calibration` charges nothing; monotonic
/// clocks shouldn't go backwards, but callers pass `now` in and tests
/// construct arbitrary instants.
pub fn charge(remaining: Duration, calibration: Instant, now: Instant) -> ClockCharge {
    let elapsed = now.saturating_duration_since(calibration);
    if elapsed >= remaining {
        ClockCharge::Exhausted
    } else {
        ClockCharge::Spent(elapsed)
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charge_within_budget_spends_elapsed() {
        let t0 = Instant::now();
        let now = t0 + Duration::from_secs(30);

        let charge = charge(Duration::from_secs(120), t0, now);

        assert_eq!(charge, ClockCharge::Spent(Duration::from_secs(30)));
    }

    #[test]
    fn test_charge_exactly_at_budget_exhausts() {
        let t0 = Instant::now();
        let now = t0 + Duration::from_secs(120);

        let charge = charge(Duration::from_secs(120), t0, now);

        assert_eq!(charge, ClockCharge::Exhausted);
    }

    #[test]
    fn test_charge_over_budget_exhausts() {
        let t0 = Instant::now();
        let now = t0 + Duration::from_secs(130);

        let charge = charge(Duration::from_secs(120), t0, now);

        assert_eq!(charge, ClockCharge::Exhausted);
    }

    #[test]
    fn test_charge_zero_budget_exhausts_immediately() {
        let t0 = Instant::now();

        let charge = charge(Duration::ZERO, t0, t0);

        assert_eq!(charge, ClockCharge::Exhausted);
    }

    #[test]
    fn test_charge_backwards_now_spends_nothing() {
        let t0 = Instant::now();
        let earlier = t0 - Duration::from_secs(5);

        let charge = charge(Duration::from_secs(120), t0, earlier);

        assert_eq!(charge, ClockCharge::Spent(Duration::ZERO));
    }
}

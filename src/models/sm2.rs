//! SM-2 style spaced repetition scheduler.
//!
//! The scheduler maps a card's current state and a recall grade to its next state:
//! - Again and Hard reset the interval to 0, take 0.2 off the ease and bring the
//!   card back after one minute so it is drilled again in the same session
//! - Good and Easy advance the interval (0 → 1 day → 6 days → interval × ease)
//! - Easy additionally raises the ease by 0.15
//! - Ease always stays within [1.3, 2.5]

use super::{MAX_EASE, MIN_EASE, Quality, SrsState};
use chrono::{DateTime, Duration, Utc};

/// Ease lost on a failed review.
pub const FAIL_EASE_PENALTY: f64 = 0.2;
/// Ease gained on an Easy review.
pub const EASY_EASE_BONUS: f64 = 0.15;
/// Delay before a failed card is shown again.
pub const RELEARN_DELAY_MINUTES: i64 = 1;
/// Upper bound on the interval, roughly a century.
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

/// Calculates the state a card moves to after being reviewed with `quality` at `now`.
pub fn advance(state: &SrsState, quality: Quality, now: DateTime<Utc>) -> SrsState {
    match quality {
        Quality::Again | Quality::Hard => SrsState {
            ease: clamp_ease(state.ease - FAIL_EASE_PENALTY),
            interval: 0,
            next_review: now + Duration::minutes(RELEARN_DELAY_MINUTES),
        },
        Quality::Good | Quality::Easy => {
            let interval = next_interval(state.interval, state.ease);
            let ease = match quality {
                Quality::Easy => state.ease + EASY_EASE_BONUS,
                _ => state.ease,
            };

            SrsState {
                ease: clamp_ease(ease),
                interval,
                next_review: now + Duration::days(i64::from(interval)),
            }
        }
    }
}

/// Interval after a successful review, driven by the current interval rather
/// than a repetition count.
fn next_interval(interval: u32, ease: f64) -> u32 {
    match interval {
        0 => 1,
        1 => 6,
        n => {
            let grown = (f64::from(n) * ease).floor();
            if grown >= f64::from(MAX_INTERVAL_DAYS) {
                MAX_INTERVAL_DAYS
            } else {
                grown as u32
            }
        }
    }
}

fn clamp_ease(ease: f64) -> f64 {
    if ease.is_nan() {
        return MIN_EASE;
    }
    ease.clamp(MIN_EASE, MAX_EASE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
    }

    fn state(ease: f64, interval: u32) -> SrsState {
        SrsState {
            ease,
            interval,
            next_review: t0(),
        }
    }

    #[test]
    fn test_first_review() {
        let next = advance(&state(2.5, 0), Quality::Good, t0());
        assert_eq!(next.interval, 1);
        assert_eq!(next.ease, 2.5);
        assert_eq!(next.next_review, t0() + Duration::days(1));
    }

    #[test]
    fn test_second_review() {
        let next = advance(&state(2.5, 1), Quality::Good, t0());
        assert_eq!(next.interval, 6);
        assert_eq!(next.next_review, t0() + Duration::days(6));
    }

    #[test]
    fn test_third_review_multiplies_by_ease() {
        let next = advance(&state(2.5, 6), Quality::Good, t0());
        assert_eq!(next.interval, 15);

        let next = advance(&state(1.3, 6), Quality::Good, t0());
        assert_eq!(next.interval, 7); // floor(7.8)
    }

    #[test]
    fn test_growth_uses_ease_before_easy_bonus() {
        let next = advance(&state(2.0, 10), Quality::Easy, t0());
        assert_eq!(next.interval, 20);
        assert!((next.ease - 2.15).abs() < EPS);
    }

    #[test]
    fn test_failure_resets() {
        for quality in [Quality::Again, Quality::Hard] {
            let next = advance(&state(2.5, 10), quality, t0());
            assert_eq!(next.interval, 0);
            assert!((next.ease - 2.3).abs() < EPS);
            assert_eq!(next.next_review, t0() + Duration::minutes(1));
        }
    }

    #[test]
    fn test_hard_does_not_advance_interval() {
        let next = advance(&state(2.5, 1), Quality::Hard, t0());
        assert_eq!(next.interval, 0);
    }

    #[test]
    fn test_easy_ceiling() {
        let next = advance(&state(2.5, 0), Quality::Easy, t0());
        assert_eq!(next.ease, 2.5);
    }

    #[test]
    fn test_easy_from_floor() {
        let next = advance(&state(1.3, 0), Quality::Easy, t0());
        assert!((next.ease - 1.45).abs() < EPS);
    }

    #[test]
    fn test_ef_floor() {
        let mut s = state(2.5, 20);
        for _ in 0..50 {
            s = advance(&s, Quality::Again, t0());
            assert!(s.ease >= MIN_EASE);
        }
        assert_eq!(s.ease, MIN_EASE);
    }

    #[test]
    fn test_out_of_range_ease_is_normalized() {
        let next = advance(&state(3.4, 2), Quality::Good, t0());
        assert_eq!(next.ease, MAX_EASE);
        assert_eq!(next.interval, 6); // floor(2 * 3.4)
    }

    #[test]
    fn test_interval_saturates() {
        let next = advance(&state(2.5, MAX_INTERVAL_DAYS - 1), Quality::Good, t0());
        assert_eq!(next.interval, MAX_INTERVAL_DAYS);
    }

    #[test]
    fn test_scenario_good_good_again() {
        let mut s = SrsState::new(t0());

        s = advance(&s, Quality::Good, t0());
        assert_eq!(s.interval, 1);
        assert_eq!(s.next_review, t0() + Duration::days(1));

        let t1 = s.next_review;
        s = advance(&s, Quality::Good, t1);
        assert_eq!(s.interval, 6);
        assert_eq!(s.next_review, t1 + Duration::days(6));

        let t2 = s.next_review;
        s = advance(&s, Quality::Again, t2);
        assert_eq!(s.interval, 0);
        assert!((s.ease - 2.3).abs() < EPS);
        assert_eq!(s.next_review, t2 + Duration::minutes(1));
    }

    fn any_quality() -> impl Strategy<Value = Quality> {
        prop::sample::select(Quality::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_ease_stays_in_bounds(
            ease in MIN_EASE..=MAX_EASE,
            interval in 0u32..5_000,
            qualities in prop::collection::vec(any_quality(), 1..40),
        ) {
            let mut s = state(ease, interval);
            for q in qualities {
                s = advance(&s, q, t0());
                prop_assert!(s.ease >= MIN_EASE && s.ease <= MAX_EASE);
            }
        }

        #[test]
        fn prop_failure_always_relearns(
            ease in MIN_EASE..=MAX_EASE,
            interval in 0u32..5_000,
            quality in prop::sample::select(vec![Quality::Again, Quality::Hard]),
        ) {
            let next = advance(&state(ease, interval), quality, t0());
            prop_assert_eq!(next.interval, 0);
            prop_assert_eq!(next.next_review, t0() + Duration::minutes(1));
        }

        #[test]
        fn prop_success_never_shrinks_interval(
            ease in MIN_EASE..=MAX_EASE,
            interval in 0u32..5_000,
            quality in prop::sample::select(vec![Quality::Good, Quality::Easy]),
        ) {
            let next = advance(&state(ease, interval), quality, t0());
            prop_assert!(next.interval >= interval.max(1));
            prop_assert_eq!(next.next_review, t0() + Duration::days(i64::from(next.interval)));
        }

        #[test]
        fn prop_advance_is_deterministic(
            ease in MIN_EASE..=MAX_EASE,
            interval in 0u32..5_000,
            quality in any_quality(),
        ) {
            let s = state(ease, interval);
            prop_assert_eq!(advance(&s, quality, t0()), advance(&s, quality, t0()));
        }
    }
}

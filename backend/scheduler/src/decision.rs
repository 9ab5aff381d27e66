//! The payout-day decision, kept pure so it tests without a clock.

use chrono::{Datelike, NaiveDate, Weekday};

/// True when `today` is the payout weekday and no payout has been stamped
/// for it yet. Guarantees at most one automatic payout per calendar day
/// regardless of how often the scheduler ticks.
pub fn should_run_payout(
    today: NaiveDate,
    payout_weekday: Weekday,
    last_payout: Option<NaiveDate>,
) -> bool {
    today.weekday() == payout_weekday && last_payout != Some(today)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn fires_on_payout_day_with_no_prior_stamp() {
        // 2025-06-06 is a Friday.
        assert!(should_run_payout(date(2025, 6, 6), Weekday::Fri, None));
    }

    #[test]
    fn fires_when_last_stamp_is_a_previous_week() {
        assert!(should_run_payout(
            date(2025, 6, 6),
            Weekday::Fri,
            Some(date(2025, 5, 30))
        ));
    }

    #[test]
    fn idempotent_within_the_same_day() {
        assert!(!should_run_payout(
            date(2025, 6, 6),
            Weekday::Fri,
            Some(date(2025, 6, 6))
        ));
    }

    #[test]
    fn silent_on_every_other_weekday() {
        for day in 2..=5 {
            // Mon 2025-06-02 .. Thu 2025-06-05
            assert!(!should_run_payout(date(2025, 6, day), Weekday::Fri, None));
        }
        assert!(!should_run_payout(date(2025, 6, 7), Weekday::Fri, None));
    }

    #[test]
    fn manual_stamp_suppresses_the_automatic_run() {
        // A manual payout earlier the same Friday stamped the date; the
        // hourly check must then stay quiet for the rest of the day.
        let friday = date(2025, 6, 6);
        assert!(!should_run_payout(friday, Weekday::Fri, Some(friday)));
    }
}

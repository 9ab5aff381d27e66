//! Hourly tick loop driving automatic payouts.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate, Weekday};
use tokio::time;
use tracing::{debug, error, info, warn};

use tallyforge_core::PayoutTrigger;
use tallyforge_ledger::{ContributionStore, LAST_PAYOUT_DATE};
use tallyforge_payroll::PayoutEngine;

use crate::decision::should_run_payout;

const DEFAULT_TICK: Duration = Duration::from_secs(3600);

pub struct PayoutScheduler {
    store: Arc<ContributionStore>,
    engine: Arc<PayoutEngine>,
    payout_weekday: Weekday,
    tick_interval: Duration,
}

impl PayoutScheduler {
    pub fn new(
        store: Arc<ContributionStore>,
        engine: Arc<PayoutEngine>,
        payout_weekday: Weekday,
    ) -> Self {
        Self {
            store,
            engine,
            payout_weekday,
            tick_interval: DEFAULT_TICK,
        }
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Run the tick loop until the task is dropped.
    ///
    /// The date stamp is written by the engine on success only, so a failed
    /// payout is retried on the next tick rather than skipped for a week.
    pub async fn run(self) {
        info!(
            payout_weekday = %self.payout_weekday,
            tick_secs = self.tick_interval.as_secs(),
            "Payout scheduler started"
        );

        let mut ticker = time::interval(self.tick_interval);

        loop {
            ticker.tick().await;

            let today = Local::now().date_naive();
            let last_payout = match self.store.get_setting(LAST_PAYOUT_DATE).await {
                Ok(value) => value.and_then(|s| parse_stamp(&s)),
                Err(e) => {
                    warn!(error = %e, "Could not read last payout date; skipping tick");
                    continue;
                }
            };

            if !should_run_payout(today, self.payout_weekday, last_payout) {
                debug!(%today, ?last_payout, "Not a payout tick");
                continue;
            }

            info!(%today, "Payout day — running automatic payout");
            if let Err(e) = self.engine.run_payout(PayoutTrigger::Automatic).await {
                error!(error = %e, "Automatic payout failed; will retry next tick");
            }
        }
    }
}

fn parse_stamp(raw: &str) -> Option<NaiveDate> {
    match raw.parse::<NaiveDate>() {
        Ok(date) => Some(date),
        Err(e) => {
            warn!(raw, error = %e, "Unparseable last payout date in settings");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamp_parsing_tolerates_garbage() {
        assert_eq!(
            parse_stamp("2025-06-06"),
            NaiveDate::from_ymd_opt(2025, 6, 6)
        );
        assert_eq!(parse_stamp("last friday"), None);
        assert_eq!(parse_stamp(""), None);
    }
}

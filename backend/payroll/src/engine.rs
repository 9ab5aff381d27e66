//! The payout engine.
//!
//! Orchestrates the ledger, role resolution, and the report sink. The order
//! of operations is load-bearing: the report must be published before the
//! week is cleared, so a delivery failure can never silently destroy a
//! week's ledger.

use std::cmp::Ordering;
use std::sync::Arc;

use anyhow::Result;
use chrono::Local;
use tracing::{info, warn};

use tallyforge_core::{
    Membership, PayoutLine, PayoutReport, PayoutTrigger, ReportSink, Role, TallyError,
};
use tallyforge_ledger::{ContributionStore, LAST_PAYOUT_DATE};

use crate::report::{render_empty_notice, render_report};

/// A user's mid-week standing, for the `status` command.
#[derive(Debug, Clone)]
pub struct UserStatus {
    pub total: f64,
    pub role: Option<Role>,
    pub estimate: f64,
}

pub struct PayoutEngine {
    store: Arc<ContributionStore>,
    membership: Arc<dyn Membership>,
    sink: Arc<dyn ReportSink>,
    payments_channel_id: u64,
    currency: String,
}

impl PayoutEngine {
    pub fn new(
        store: Arc<ContributionStore>,
        membership: Arc<dyn Membership>,
        sink: Arc<dyn ReportSink>,
        payments_channel_id: u64,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            store,
            membership,
            sink,
            payments_channel_id,
            currency: currency.into(),
        }
    }

    /// Run a payout: publish the report, clear the week, stamp the date.
    ///
    /// The date is stamped for BOTH triggers so a manual payout suppresses
    /// the same-day automatic run. On a sink failure the ledger is left
    /// untouched and no date is stamped.
    pub async fn run_payout(&self, trigger: PayoutTrigger) -> Result<PayoutReport> {
        let today = Local::now().date_naive();
        let totals = self.store.weekly_totals().await?;

        if totals.is_empty() {
            info!(%trigger, "Payout requested but the week has no receipts");
            self.publish(&render_empty_notice(trigger)).await?;
            self.stamp(today).await?;
            return Ok(PayoutReport { trigger, day: today, lines: Vec::new() });
        }

        let mut lines = Vec::with_capacity(totals.len());
        for (user_id, total) in totals {
            let labels = match self.membership.role_labels_of(&user_id).await {
                Ok(labels) => labels,
                Err(e) => {
                    warn!(%user_id, error = %e, "Role lookup failed; treating as roleless");
                    Default::default()
                }
            };
            let role = Role::resolve(&labels);
            let percentage = role.map(|r| r.percentage()).unwrap_or(0.0);
            lines.push(PayoutLine {
                user_id,
                total,
                role,
                salary: total * percentage,
            });
        }

        lines.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));

        let text = render_report(trigger, &lines, &self.currency);
        self.publish(&text).await?;

        let cleared = self.store.clear_current_week().await?;
        self.stamp(today).await?;

        info!(%trigger, users = lines.len(), cleared, "Payout completed");
        Ok(PayoutReport { trigger, day: today, lines })
    }

    /// Clear the current week without paying out (the `reset_week` command).
    pub async fn clear_week(&self) -> Result<usize> {
        self.store.clear_current_week().await
    }

    /// Current weekly total, resolved role, and salary estimate for one user.
    pub async fn status_of(&self, user_id: &str) -> Result<UserStatus> {
        let total = self.store.user_weekly_total(user_id).await?;
        let labels = self.membership.role_labels_of(user_id).await.unwrap_or_default();
        let role = Role::resolve(&labels);
        let percentage = role.map(|r| r.percentage()).unwrap_or(0.0);
        Ok(UserStatus { total, role, estimate: total * percentage })
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    async fn publish(&self, text: &str) -> Result<()> {
        self.sink
            .send(self.payments_channel_id, text)
            .await
            .map_err(|e| TallyError::ReportDelivery(e.to_string()))?;
        Ok(())
    }

    async fn stamp(&self, today: chrono::NaiveDate) -> Result<()> {
        self.store.set_setting(LAST_PAYOUT_DATE, &today.to_string()).await
    }
}

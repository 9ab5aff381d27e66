//! Built-in command handlers.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use tallyforge_core::PayoutTrigger;
use tallyforge_payroll::PayoutEngine;

use crate::dispatch::{CommandContext, CommandHandler, CommandResponse};
use crate::registry::CommandRegistry;
use crate::types::CommandInvocation;

/// Replies with the sender's weekly total, role, and salary estimate.
pub struct StatusHandler {
    pub engine: Arc<PayoutEngine>,
}

#[async_trait]
impl CommandHandler for StatusHandler {
    async fn handle(&self, ctx: &CommandContext, _inv: &CommandInvocation) -> Result<CommandResponse> {
        let status = self.engine.status_of(&ctx.sender_id).await?;
        let currency = self.engine.currency();

        let role_display = match status.role {
            Some(role) => format!("{} ({}%)", role.label(), role.percent_display()),
            None => "No role".to_string(),
        };

        Ok(CommandResponse::ok(format!(
            "<@{}>\n🧾 Current weekly total: **{:.2}{}**\n🏅 Role: **{}**\n💰 Salary estimate: **{:.2}{}**",
            ctx.sender_id, status.total, currency, role_display, status.estimate, currency
        )))
    }
}

/// Forces a manual payout run.
pub struct PayoutNowHandler {
    pub engine: Arc<PayoutEngine>,
}

#[async_trait]
impl CommandHandler for PayoutNowHandler {
    async fn handle(&self, _ctx: &CommandContext, _inv: &CommandInvocation) -> Result<CommandResponse> {
        let report = self.engine.run_payout(PayoutTrigger::Manual).await?;
        let text = if report.is_empty() {
            "✅ Payout ran, but the week had no receipts. Nothing was cleared.".to_string()
        } else {
            format!(
                "✅ Manual payout published for {} member(s); the week has been cleared.",
                report.lines.len()
            )
        };
        Ok(CommandResponse::ok(text))
    }
}

/// Clears the current week without paying out; receipts are simply dropped.
pub struct ResetWeekHandler {
    pub engine: Arc<PayoutEngine>,
}

#[async_trait]
impl CommandHandler for ResetWeekHandler {
    async fn handle(&self, _ctx: &CommandContext, _inv: &CommandInvocation) -> Result<CommandResponse> {
        let deleted = self.engine.clear_week().await?;
        Ok(CommandResponse::ok(format!(
            "♻️ Current week cleared ({} receipt(s) deleted).",
            deleted
        )))
    }
}

/// Lists the registered commands.
pub struct HelpHandler {
    pub registry: Arc<CommandRegistry>,
    pub prefix: String,
}

#[async_trait]
impl CommandHandler for HelpHandler {
    async fn handle(&self, _ctx: &CommandContext, _inv: &CommandInvocation) -> Result<CommandResponse> {
        let mut lines = vec!["**Commands**".to_string()];
        for def in self.registry.all() {
            let admin = if def.admin_only { " (admin)" } else { "" };
            lines.push(format!(
                "`{}{}`{} — {}",
                self.prefix,
                def.primary_alias(),
                admin,
                def.description
            ));
        }
        Ok(CommandResponse::ok(lines.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    use chrono::{Duration, Local};
    use tallyforge_core::{week_range, Membership, ReportSink};
    use tallyforge_ledger::ContributionStore;

    struct WorkerOnly;

    #[async_trait]
    impl Membership for WorkerOnly {
        async fn role_labels_of(&self, user_id: &str) -> Result<HashSet<String>> {
            let mut labels = HashSet::new();
            if user_id == "100" {
                labels.insert("Worker".to_string());
            }
            Ok(labels)
        }
    }

    #[derive(Default)]
    struct NullSink {
        sent: Mutex<usize>,
    }

    #[async_trait]
    impl ReportSink for NullSink {
        async fn send(&self, _channel_id: u64, _text: &str) -> Result<()> {
            *self.sent.lock().unwrap() += 1;
            Ok(())
        }
    }

    async fn engine_with_receipts() -> (Arc<PayoutEngine>, Arc<ContributionStore>) {
        let store = Arc::new(ContributionStore::in_memory().unwrap());
        let (monday, _) = week_range(Local::now().date_naive());
        store.record_on("100", monday, 100.0).await.unwrap();
        store.record_on("100", monday + Duration::days(1), 50.0).await.unwrap();
        let engine = Arc::new(PayoutEngine::new(
            store.clone(),
            Arc::new(WorkerOnly),
            Arc::new(NullSink::default()),
            42,
            "€",
        ));
        (engine, store)
    }

    fn ctx(sender: &str) -> CommandContext {
        CommandContext {
            sender_id: sender.into(),
            channel_id: 1,
            is_admin: true,
        }
    }

    fn inv(key: &str) -> CommandInvocation {
        CommandInvocation {
            key: key.into(),
            raw_alias: key.into(),
            raw_args: String::new(),
        }
    }

    #[tokio::test]
    async fn status_reports_total_role_and_estimate() {
        let (engine, _store) = engine_with_receipts().await;
        let handler = StatusHandler { engine };

        let resp = handler.handle(&ctx("100"), &inv("status")).await.unwrap();
        assert!(resp.text.contains("150.00€"));
        assert!(resp.text.contains("Worker (15%)"));
        assert!(resp.text.contains("22.50€"));
    }

    #[tokio::test]
    async fn status_for_roleless_user_shows_no_role() {
        let (engine, _store) = engine_with_receipts().await;
        let handler = StatusHandler { engine };

        let resp = handler.handle(&ctx("999"), &inv("status")).await.unwrap();
        assert!(resp.text.contains("0.00€"));
        assert!(resp.text.contains("No role"));
    }

    #[tokio::test]
    async fn payout_now_clears_the_week() {
        let (engine, store) = engine_with_receipts().await;
        let handler = PayoutNowHandler { engine };

        let resp = handler.handle(&ctx("100"), &inv("payout_now")).await.unwrap();
        assert!(resp.text.contains("Manual payout published"));
        assert!(store.weekly_totals().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reset_week_deletes_without_paying() {
        let (engine, store) = engine_with_receipts().await;
        let handler = ResetWeekHandler { engine };

        let resp = handler.handle(&ctx("100"), &inv("reset_week")).await.unwrap();
        assert!(resp.text.contains("2 receipt(s)"));
        assert!(store.weekly_totals().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn help_lists_every_command_with_prefix() {
        let handler = HelpHandler {
            registry: Arc::new(CommandRegistry::builtin()),
            prefix: "!".into(),
        };

        let resp = handler.handle(&ctx("100"), &inv("help")).await.unwrap();
        assert!(resp.text.contains("`!status`"));
        assert!(resp.text.contains("`!payout_now` (admin)"));
        assert!(resp.text.contains("`!reset_week` (admin)"));
    }
}

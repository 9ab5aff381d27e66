//! Payout report rendering for the payments channel.

use tallyforge_core::{PayoutLine, PayoutTrigger};

fn title(trigger: PayoutTrigger) -> &'static str {
    match trigger {
        PayoutTrigger::Automatic => "📢 **Weekly Payout (Automatic)**",
        PayoutTrigger::Manual => "📢 **Weekly Payout (Manual)**",
    }
}

/// Notice published when the payout day arrives with no recorded receipts.
pub fn render_empty_notice(trigger: PayoutTrigger) -> String {
    format!(
        "{}\n\nNo receipts were recorded for this week.",
        title(trigger)
    )
}

/// Render the full report, one block per user. `lines` must already be
/// sorted by total, descending.
pub fn render_report(trigger: PayoutTrigger, lines: &[PayoutLine], currency: &str) -> String {
    let mut out = vec![title(trigger).to_string(), String::new()];

    for line in lines {
        let role_display = match line.role {
            Some(role) => format!("{} ({}%)", role.label(), role.percent_display()),
            None => "No role".to_string(),
        };
        out.push(format!(
            "👤 <@{}>\n   🧾 Receipt total: **{:.2}{}**\n   🏅 Role: **{}**\n   💰 Salary: **{:.2}{}**\n",
            line.user_id, line.total, currency, role_display, line.salary, currency
        ));
    }

    out.join("\n")
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Opaque Discord user identifier, stored and compared as a string.
pub type UserId = String;

/// A single receipt total attributed to one user on one calendar day.
///
/// Immutable once recorded; multiple contributions per user per day are
/// additive. Rows are only ever deleted in bulk by a week-clear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub user_id: UserId,
    pub day: NaiveDate,
    pub value: f64,
}

/// What caused a payout run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutTrigger {
    /// Fired by the scheduler on the payout weekday.
    Automatic,
    /// Forced by a privileged command or the CLI.
    Manual,
}

impl std::fmt::Display for PayoutTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayoutTrigger::Automatic => write!(f, "automatic"),
            PayoutTrigger::Manual => write!(f, "manual"),
        }
    }
}

/// One user's row in a payout report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutLine {
    pub user_id: UserId,
    /// Sum of the user's contributions inside the week window.
    pub total: f64,
    /// Highest-priority payroll role held, if any.
    pub role: Option<Role>,
    /// `total * role percentage` (0.0 for roleless users).
    pub salary: f64,
}

/// The outcome of a payout run. Lines are sorted by total, descending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutReport {
    pub trigger: PayoutTrigger,
    pub day: NaiveDate,
    pub lines: Vec<PayoutLine>,
}

impl PayoutReport {
    /// True when the week had no recorded receipts at all.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

pub mod store;

pub use store::ContributionStore;

/// Settings key holding the ISO date of the last completed payout.
pub const LAST_PAYOUT_DATE: &str = "last_payout_date";

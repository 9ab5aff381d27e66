pub mod decision;
pub mod tick;

pub use decision::should_run_payout;
pub use tick::PayoutScheduler;

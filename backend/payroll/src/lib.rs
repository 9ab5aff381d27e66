pub mod engine;
pub mod report;

pub use engine::{PayoutEngine, UserStatus};
pub use report::{render_empty_notice, render_report};

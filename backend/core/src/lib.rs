pub mod error;
pub mod extract;
pub mod role;
pub mod traits;
pub mod types;
pub mod week;

pub use error::TallyError;
pub use extract::extract_amounts;
pub use role::Role;
pub use traits::{Membership, ReportSink};
pub use types::{Contribution, PayoutLine, PayoutReport, PayoutTrigger, UserId};
pub use week::week_range;

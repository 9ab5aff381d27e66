//! Payroll week boundaries.

use chrono::{Datelike, Duration, NaiveDate};

/// Return the Monday and Friday of the week containing `today`, inclusive on
/// both ends. The same range is used for querying and for clearing.
///
/// Saturday/Sunday contributions fall outside every week's range and are
/// never aggregated, yet remain in storage until independently cleared.
pub fn week_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    let friday = monday + Duration::days(4);
    (monday, friday)
}

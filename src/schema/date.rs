//! Timezone-stable parsing of authored date defaults.
//!
//! Accepted shapes: RFC 3339, `YYYY-MM-DD HH:MM:SS`, and bare `YYYY-MM-DD`.
//! Inputs without an offset are interpreted as UTC so that the same schema
//! text resolves identically regardless of host locale or timezone.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Parses an authored date string. Returns `None` when the text is not a
/// valid calendar date/time in any accepted shape.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&ndt));
    }
    if let Ok(nd) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&nd.and_hms_opt(0, 0, 0)?));
    }
    None
}

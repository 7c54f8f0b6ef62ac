use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use std::collections::BTreeMap;
use tracing::warn;

/// Slots that share a UTC calendar date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotGroup {
    pub date: NaiveDate,
    /// Display lines, e.g. `09:00 AM UTC (2025-01-02T09:00:00Z)`
    pub times: Vec<String>,
}

/// Parse an RFC 3339 timestamp into UTC
pub fn parse_utc(timestamp: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(timestamp)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Group slot start times by date, ascending by `YYYY-MM-DD` key.
/// Times keep their input order within a group.
pub fn group_by_date<'a>(start_times: impl IntoIterator<Item = &'a str>) -> Vec<SlotGroup> {
    let mut groups: BTreeMap<String, SlotGroup> = BTreeMap::new();

    for raw in start_times {
        let Some(start) = parse_utc(raw) else {
            warn!("Skipping slot with unparseable start time: {}", raw);
            continue;
        };

        let key = start.format("%Y-%m-%d").to_string();
        groups
            .entry(key)
            .or_insert_with(|| SlotGroup {
                date: start.date_naive(),
                times: Vec::new(),
            })
            .times
            .push(format!("{} ({})", start.format("%I:%M %p UTC"), raw));
    }

    groups.into_values().collect()
}

/// e.g. `Thursday, January 2, 2025`
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Render a timestamp in the given IANA timezone, falling back to UTC
pub fn format_in_timezone(timestamp: &str, timezone: &str) -> Option<String> {
    let start = parse_utc(timestamp)?;
    let tz: Tz = timezone.parse().unwrap_or(Tz::UTC);
    Some(
        start
            .with_timezone(&tz)
            .format("%A, %B %-d, %Y at %I:%M %p %Z")
            .to_string(),
    )
}

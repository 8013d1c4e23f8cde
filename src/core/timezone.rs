//! Renders timestamps in the fixed display offset

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

/// Layout of user-facing timestamps.
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M:%S";
/// Layout of `create_date` as sent by the upstream provider.
pub const UPSTREAM_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const SECONDS_PER_HOUR: i32 = 3600;
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = -3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimezoneFormatter {
    offset: FixedOffset,
}

impl TimezoneFormatter {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Builds a formatter for a whole-hour offset east of UTC (negative is west).
    pub fn from_offset_hours(hours: i32) -> Result<Self> {
        let offset = hours
            .checked_mul(SECONDS_PER_HOUR)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| anyhow!("Invalid UTC offset: {hours} hours"))?;
        Ok(Self::new(offset))
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn format_utc(&self, instant: DateTime<Utc>) -> String {
        instant
            .with_timezone(&self.offset)
            .format(DISPLAY_FORMAT)
            .to_string()
    }

    /// Converts Unix seconds (UTC) into the display offset.
    pub fn format_epoch(&self, seconds: i64) -> Result<String> {
        let instant = Utc
            .timestamp_opt(seconds, 0)
            .single()
            .ok_or_else(|| anyhow!("Timestamp out of range: {seconds}"))?;
        Ok(self.format_utc(instant))
    }

    /// Treats a naive value as UTC and converts it into the display offset.
    pub fn format_naive_utc(&self, naive: NaiveDateTime) -> String {
        self.format_utc(naive.and_utc())
    }

    /// Treats a naive value as wall-clock time already in the display offset.
    /// The clock value is kept, only the layout changes.
    pub fn format_naive_local(&self, naive: NaiveDateTime) -> String {
        naive.format(DISPLAY_FORMAT).to_string()
    }
}

impl Default for TimezoneFormatter {
    fn default() -> Self {
        Self::new(FixedOffset::west_opt(3 * SECONDS_PER_HOUR).unwrap())
    }
}

pub fn parse_upstream_datetime(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, UPSTREAM_FORMAT)
        .with_context(|| format!("Failed to parse upstream date: {value}"))
}

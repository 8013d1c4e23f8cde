//! Quote records and historical range queries

use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Display;

use super::error::RateError;

/// Layout of the dates sent to the upstream historical endpoint.
pub const RANGE_DATE_FORMAT: &str = "%Y%m%d";

pub const MISSING_RANGE: &str = "Either date range or number of days must be provided";

/// Latest quote for a currency pair. Only `create_date` is rewritten, every
/// other field (`code`, `bid`, `ask`, ...) is kept as sent upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub create_date: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Upstream sends epoch seconds as a string, but numbers are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UnixTimestamp {
    Seconds(i64),
    Text(String),
}

impl UnixTimestamp {
    pub fn seconds(&self) -> Result<i64> {
        match self {
            UnixTimestamp::Seconds(s) => Ok(*s),
            UnixTimestamp::Text(text) => text
                .trim()
                .parse()
                .with_context(|| format!("Invalid timestamp: {text}")),
        }
    }
}

impl Display for UnixTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnixTimestamp::Seconds(s) => write!(f, "{s}"),
            UnixTimestamp::Text(text) => write!(f, "{text}"),
        }
    }
}

/// One element of the historical series. `date` is derived locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalQuote {
    pub timestamp: UnixTimestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Raw query parameters of the historical endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoricalParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub days: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateRangeQuery {
    Explicit { start_date: String, end_date: String },
    TrailingDays(i64),
}

/// Dates actually sent upstream, both `YYYYMMDD`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRange {
    pub start_date: String,
    pub end_date: String,
}

impl TryFrom<HistoricalParams> for DateRangeQuery {
    type Error = RateError;

    fn try_from(params: HistoricalParams) -> Result<Self, Self::Error> {
        let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());

        match (
            non_empty(params.start_date),
            non_empty(params.end_date),
            params.days,
        ) {
            (Some(start_date), Some(end_date), _) => Ok(DateRangeQuery::Explicit {
                start_date,
                end_date,
            }),
            (_, _, Some(days)) => Ok(DateRangeQuery::TrailingDays(days)),
            _ => Err(RateError::BadRequest(MISSING_RANGE)),
        }
    }
}

impl DateRangeQuery {
    /// Explicit dates pass through untouched. A trailing window ends on `today`.
    /// Negative windows are not rejected and produce an inverted range.
    pub fn resolve(self, today: NaiveDate) -> Result<ResolvedRange> {
        match self {
            DateRangeQuery::Explicit {
                start_date,
                end_date,
            } => Ok(ResolvedRange {
                start_date,
                end_date,
            }),
            DateRangeQuery::TrailingDays(days) => {
                let start = TimeDelta::try_days(days)
                    .and_then(|window| today.checked_sub_signed(window))
                    .ok_or_else(|| anyhow!("Day window out of range: {days}"))?;
                Ok(ResolvedRange {
                    start_date: start.format(RANGE_DATE_FORMAT).to_string(),
                    end_date: today.format(RANGE_DATE_FORMAT).to_string(),
                })
            }
        }
    }
}

use anyhow::{Context, anyhow};
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use super::RateSettings;
use crate::core::config::CreateDateMode;
use crate::core::error::LATEST_FAILED;
use crate::core::timezone::parse_upstream_datetime;
use crate::core::{Quote, RateError, UpstreamClient};

/// Fetches the current quote and rewrites its `create_date` for display.
#[instrument(name = "LatestRate", skip_all)]
pub async fn fetch_latest(
    upstream: &dyn UpstreamClient,
    settings: &RateSettings,
) -> Result<Quote, RateError> {
    let url = settings.api.latest_url();
    let response = upstream.get(&url).await?;

    if !response.is_success() {
        warn!(status = response.status, "Upstream rejected latest rate request");
        return Err(RateError::upstream(response.status, LATEST_FAILED));
    }

    let key = settings.api.quote_key();
    let mut payload: Map<String, Value> = serde_json::from_str(&response.body)
        .with_context(|| format!("Failed to parse latest rate response for {key}"))?;
    let raw = payload
        .remove(&key)
        .ok_or_else(|| anyhow!("No quote found for currency pair: {key}"))?;
    let mut quote: Quote = serde_json::from_value(raw)
        .with_context(|| format!("Malformed quote for currency pair: {key}"))?;

    let created = parse_upstream_datetime(&quote.create_date)?;
    quote.create_date = match settings.create_date {
        CreateDateMode::Convert => settings.formatter.format_naive_utc(created),
        CreateDateMode::Relabel => settings.formatter.format_naive_local(created),
    };
    debug!(create_date = %quote.create_date, "Latest quote ready");

    Ok(quote)
}

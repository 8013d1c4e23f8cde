use anyhow::Context;
use chrono::NaiveDate;
use tracing::{debug, instrument, warn};

use super::RateSettings;
use crate::core::error::HISTORICAL_FAILED;
use crate::core::{DateRangeQuery, HistoricalQuote, RateError, UpstreamClient};

/// Fetches the quote series for the resolved range and adds a display `date`
/// to every element. Upstream order is kept.
#[instrument(name = "HistoricalRates", skip(upstream, settings))]
pub async fn fetch_historical(
    upstream: &dyn UpstreamClient,
    settings: &RateSettings,
    query: DateRangeQuery,
    today: NaiveDate,
) -> Result<Vec<HistoricalQuote>, RateError> {
    let range = query.resolve(today)?;
    let url = settings.api.historical_url(&range)?;
    let response = upstream.get(&url).await?;

    if !response.is_success() {
        warn!(
            status = response.status,
            start_date = %range.start_date,
            end_date = %range.end_date,
            "Upstream rejected historical rates request"
        );
        return Err(RateError::upstream(response.status, HISTORICAL_FAILED));
    }

    let mut quotes: Vec<HistoricalQuote> = serde_json::from_str(&response.body)
        .context("Failed to parse historical rates response")?;

    for quote in quotes.iter_mut() {
        let seconds = quote.timestamp.seconds()?;
        quote.date = Some(settings.formatter.format_epoch(seconds)?);
    }
    debug!(count = quotes.len(), "Historical quotes ready");

    Ok(quotes)
}

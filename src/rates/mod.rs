//! Latest and historical quote retrieval

pub mod historical;
pub mod latest;

use anyhow::Result;
use chrono::NaiveDate;
use std::sync::Arc;

use crate::core::config::{AppConfig, CreateDateMode};
use crate::core::{
    DateRangeQuery, HistoricalQuote, Quote, RateError, TimezoneFormatter, UpstreamClient,
};
use crate::providers::AwesomeApi;

/// Immutable settings shared by both rate operations.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSettings {
    pub api: AwesomeApi,
    pub formatter: TimezoneFormatter,
    pub create_date: CreateDateMode,
}

impl RateSettings {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(RateSettings {
            api: AwesomeApi::new(&config.provider.base_url, &config.provider.currency_pair),
            formatter: config.formatter()?,
            create_date: config.provider.create_date,
        })
    }
}

/// Entry point used by the HTTP layer. Cheap to clone.
#[derive(Clone)]
pub struct RateService {
    upstream: Arc<dyn UpstreamClient>,
    settings: Arc<RateSettings>,
}

impl RateService {
    pub fn new(upstream: Arc<dyn UpstreamClient>, settings: RateSettings) -> Self {
        RateService {
            upstream,
            settings: Arc::new(settings),
        }
    }

    pub async fn latest(&self) -> Result<Quote, RateError> {
        latest::fetch_latest(self.upstream.as_ref(), &self.settings).await
    }

    pub async fn historical(
        &self,
        query: DateRangeQuery,
        today: NaiveDate,
    ) -> Result<Vec<HistoricalQuote>, RateError> {
        historical::fetch_historical(self.upstream.as_ref(), &self.settings, query, today).await
    }
}

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, instrument};

use crate::core::{ResolvedRange, UpstreamClient, UpstreamResponse};

const USER_AGENT: &str = concat!("cambio/", env!("CARGO_PKG_VERSION"));

/// Endpoint layout of the AwesomeAPI exchange-rate service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwesomeApi {
    base_url: String,
    currency_pair: String,
}

impl AwesomeApi {
    pub fn new(base_url: &str, currency_pair: &str) -> Self {
        AwesomeApi {
            base_url: base_url.trim_end_matches('/').to_string(),
            currency_pair: currency_pair.to_string(),
        }
    }

    pub fn latest_url(&self) -> String {
        format!("{}/json/last/{}", self.base_url, self.currency_pair)
    }

    pub fn historical_url(&self, range: &ResolvedRange) -> Result<String> {
        let endpoint = format!("{}/{}/", self.base_url, self.currency_pair);
        let url = Url::parse_with_params(
            &endpoint,
            &[
                ("start_date", range.start_date.as_str()),
                ("end_date", range.end_date.as_str()),
            ],
        )
        .with_context(|| format!("Invalid historical endpoint: {endpoint}"))?;
        Ok(url.into())
    }

    /// Key of the quote object in the latest-rate payload, e.g. `USDBRL`.
    pub fn quote_key(&self) -> String {
        self.currency_pair.replace('-', "")
    }
}

/// `UpstreamClient` backed by reqwest. A new client is built for every call,
/// so nothing is shared between requests.
#[derive(Debug, Clone, Default)]
pub struct HttpUpstream;

impl HttpUpstream {
    pub fn new() -> Self {
        HttpUpstream
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstream {
    #[instrument(name = "UpstreamGet", skip(self))]
    async fn get(&self, url: &str) -> Result<UpstreamResponse> {
        debug!("Requesting {}", url);

        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to get response text for URL: {url}"))?;

        debug!(status, bytes = body.len(), "Received upstream response");
        Ok(UpstreamResponse { status, body })
    }
}

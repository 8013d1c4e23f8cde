//! Outbound HTTP capability used by the rate handlers

use anyhow::Result;
use async_trait::async_trait;

/// Status and raw body of a single upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Only a plain 200 carries a usable payload.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Issues one GET request. Transport failures are errors; any HTTP status
    /// is a successful call.
    async fn get(&self, url: &str) -> Result<UpstreamResponse>;
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::sync::Mutex;

    /// Replies with a canned response and records every requested URL.
    pub struct FakeUpstream {
        response: UpstreamResponse,
        requests: Mutex<Vec<String>>,
    }

    impl FakeUpstream {
        pub fn new(status: u16, body: &str) -> Self {
            Self {
                response: UpstreamResponse::new(status, body),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl UpstreamClient for FakeUpstream {
        async fn get(&self, url: &str) -> Result<UpstreamResponse> {
            self.requests.lock().unwrap().push(url.to_string());
            Ok(self.response.clone())
        }
    }

    /// Fails every call as if the network were down.
    pub struct UnreachableUpstream;

    #[async_trait]
    impl UpstreamClient for UnreachableUpstream {
        async fn get(&self, url: &str) -> Result<UpstreamResponse> {
            Err(anyhow::anyhow!("Connection refused for URL: {url}"))
        }
    }
}

use thiserror::Error;

pub const LATEST_FAILED: &str = "Failed to fetch latest rate";
pub const HISTORICAL_FAILED: &str = "Failed to fetch historical rates";

/// Terminal outcome of a rate request that did not produce a body.
#[derive(Debug, Error)]
pub enum RateError {
    /// The request did not carry a usable parameter combination.
    #[error("{0}")]
    BadRequest(&'static str),

    /// The provider answered with a non-success status. Its body is not kept.
    #[error("{detail}")]
    Upstream { status: u16, detail: &'static str },

    /// Transport failures and payloads that could not be processed.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl RateError {
    pub fn upstream(status: u16, detail: &'static str) -> Self {
        RateError::Upstream { status, detail }
    }
}

//! Core business types and abstractions

pub mod config;
pub mod error;
pub mod log;
pub mod quote;
pub mod timezone;
pub mod upstream;

// Re-export main types for cleaner imports
pub use error::RateError;
pub use quote::{DateRangeQuery, HistoricalParams, HistoricalQuote, Quote, ResolvedRange};
pub use timezone::TimezoneFormatter;
pub use upstream::{UpstreamClient, UpstreamResponse};

//! Remote customer data source abstraction.
//!
//! The grid and the chart leaves talk to [`CustomerApi`], never to a
//! concrete transport. Implementations:
//! - [`HttpApi`]: reqwest against the real REST service (`client` feature)
//! - [`MockApi`]: deterministic in-memory dataset for tests and `--mock`

pub mod mock;

#[cfg(feature = "client")]
pub mod http;

pub use mock::MockApi;

#[cfg(feature = "client")]
pub use http::HttpApi;

use chrono::NaiveDate;

use crate::grid::QueryState;
use crate::models::{
    BrandCount, FilterField, GenderAgeCount, GenderCount, LoginTrends, Page,
};

/// Error types for remote fetches.
///
/// A stale (superseded) response is not an error and never reaches this
/// type's consumers; an empty page is a valid non-error result.
#[derive(Debug, Clone)]
pub enum ApiError {
    /// Transport-level failure (connection refused, timeout, TLS).
    Transport(String),
    /// Non-success HTTP status.
    Status(u16),
    /// Response body did not match the expected shape.
    Decode(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "request failed: {}", msg),
            ApiError::Status(code) => write!(f, "server returned HTTP {}", code),
            ApiError::Decode(msg) => write!(f, "unexpected response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Abstraction over the remote customer data source.
///
/// Object-safe and shared across fetch worker threads as
/// `Arc<dyn CustomerApi>`; every method is a blocking request issued off the
/// UI thread.
pub trait CustomerApi: Send + Sync {
    /// One page of customers for the given query intent.
    fn fetch_page(&self, query: &QueryState) -> Result<Page, ApiError>;

    /// Distinct known values for one filterable field.
    fn filter_options(&self, field: &FilterField) -> Result<Vec<String>, ApiError>;

    /// Customer counts by gender.
    fn gender_summary(&self) -> Result<Vec<GenderCount>, ApiError>;

    /// Customer counts by gender and age group.
    fn gender_age_summary(&self) -> Result<Vec<GenderAgeCount>, ApiError>;

    /// Customer counts by device brand.
    fn brand_device_summary(&self) -> Result<Vec<BrandCount>, ApiError>;

    /// Hourly login counts for `date`, or for the server's default day when
    /// `None` is passed.
    fn login_trends(&self, date: Option<NaiveDate>) -> Result<LoginTrends, ApiError>;
}

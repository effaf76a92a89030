//! reqwest-backed implementation of [`CustomerApi`].
//!
//! Blocking client, always called from fetch worker threads — the UI thread
//! never waits on the network. URLs are built with explicit path segments so
//! field names containing spaces (`/customers/filters/Location Type`) are
//! percent-encoded correctly.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Url;
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::grid::QueryState;
use crate::models::{
    BrandCount, DataEnvelope, FilterField, GenderAgeCount, GenderCount, LoginPoint, LoginTrends,
    Page,
};

use super::{ApiError, CustomerApi};

/// Response header carrying the server's suggested trends date when the
/// request did not name one.
const DEFAULT_DATE_HEADER: &str = "x-default-date";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the customer REST service.
pub struct HttpApi {
    base: Url,
    client: Client,
}

impl HttpApi {
    /// Build a client for `base_url` (e.g. `http://127.0.0.1:3000/api`).
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base = Url::parse(base_url).map_err(|e| ApiError::Transport(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::Transport(format!(
                "not a usable base URL: {}",
                base_url
            )));
        }
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { base, client })
    }

    /// `base` extended with extra path segments (each one percent-encoded).
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn send(&self, url: Url) -> Result<Response, ApiError> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        Ok(response)
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        self.send(url)?
            .json()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl CustomerApi for HttpApi {
    fn fetch_page(&self, query: &QueryState) -> Result<Page, ApiError> {
        let mut url = self.url(&["customers"]);
        url.query_pairs_mut().extend_pairs(query.params());
        self.get_json(url)
    }

    fn filter_options(&self, field: &FilterField) -> Result<Vec<String>, ApiError> {
        let url = self.url(&["customers", "filters", field.options_segment]);
        let envelope: DataEnvelope<String> = self.get_json(url)?;
        Ok(envelope.data)
    }

    fn gender_summary(&self) -> Result<Vec<GenderCount>, ApiError> {
        let url = self.url(&["customers", "summary", "gender"]);
        let envelope: DataEnvelope<GenderCount> = self.get_json(url)?;
        Ok(envelope.data)
    }

    fn gender_age_summary(&self) -> Result<Vec<GenderAgeCount>, ApiError> {
        let url = self.url(&["customers", "summary", "gender-age"]);
        let envelope: DataEnvelope<GenderAgeCount> = self.get_json(url)?;
        Ok(envelope.data)
    }

    fn brand_device_summary(&self) -> Result<Vec<BrandCount>, ApiError> {
        let url = self.url(&["customers", "summary", "brand-device"]);
        let envelope: DataEnvelope<BrandCount> = self.get_json(url)?;
        Ok(envelope.data)
    }

    fn login_trends(&self, date: Option<NaiveDate>) -> Result<LoginTrends, ApiError> {
        let mut url = self.url(&["customers", "trends", "login"]);
        if let Some(date) = date {
            url.query_pairs_mut()
                .append_pair("date", &date.format("%Y-%m-%d").to_string());
        }

        let response = self.send(url)?;
        // Only meaningful when the server picked the day itself.
        let default_date = if date.is_none() {
            response
                .headers()
                .get(DEFAULT_DATE_HEADER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        } else {
            None
        };
        let envelope: DataEnvelope<LoginPoint> = response
            .json()
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        Ok(LoginTrends {
            points: envelope.data,
            default_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> HttpApi {
        HttpApi::new("http://127.0.0.1:3000/api").unwrap()
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(HttpApi::new("not a url").is_err());
        assert!(HttpApi::new("mailto:a@b").is_err());
        assert!(HttpApi::new("http://127.0.0.1:3000/api").is_ok());
    }

    #[test]
    fn page_url_carries_the_query_params() {
        let api = api();
        let query = QueryState::default()
            .with_search("ava")
            .with_filter("gender", "Male")
            .with_sort("Name")
            .with_page_index(2);
        let mut url = api.url(&["customers"]);
        url.query_pairs_mut().extend_pairs(query.params());

        assert_eq!(url.path(), "/api/customers");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("page".to_string(), "3".to_string())));
        assert!(pairs.contains(&("limit".to_string(), "10".to_string())));
        assert!(pairs.contains(&("sortBy".to_string(), "Name".to_string())));
        assert!(pairs.contains(&("sortOrder".to_string(), "asc".to_string())));
        assert!(pairs.contains(&("search".to_string(), "ava".to_string())));
        assert!(pairs.contains(&("gender".to_string(), "Male".to_string())));
    }

    #[test]
    fn removed_filter_never_reaches_the_url() {
        let api = api();
        let query = QueryState::default()
            .with_filter("gender", "Male")
            .with_filter("gender", "");
        let mut url = api.url(&["customers"]);
        url.query_pairs_mut().extend_pairs(query.params());
        assert!(url.query_pairs().all(|(k, _)| k != "gender"));
    }

    #[test]
    fn filter_segments_with_spaces_are_percent_encoded() {
        let api = api();
        let url = api.url(&["customers", "filters", "Location Type"]);
        assert_eq!(url.path(), "/api/customers/filters/Location%20Type");
    }

    #[test]
    fn base_url_with_trailing_slash_joins_cleanly() {
        let api = HttpApi::new("http://127.0.0.1:3000/api/").unwrap();
        let url = api.url(&["customers", "summary", "gender"]);
        assert_eq!(url.path(), "/api/customers/summary/gender");
    }
}

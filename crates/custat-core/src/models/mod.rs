//! Wire data models for the customer API.
//!
//! Field names follow the server's JSON schema verbatim (serde renames);
//! display transformations (derived age, long date format) happen at render
//! time and never touch the stored row.

mod fields;

pub use fields::{COLUMNS, Column, FILTER_FIELDS, FilterField};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One customer record as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "Number")]
    pub number: u64,
    #[serde(rename = "Name of Location")]
    pub location_name: String,
    #[serde(rename = "Login Hour")]
    pub login_hour: String,
    /// `MM/DD/YYYY` as sent by the server.
    #[serde(rename = "Login Date")]
    pub login_date: String,
    #[serde(rename = "Name")]
    pub name: String,
    /// Stored as a birth year; the displayed age is derived at render time.
    #[serde(rename = "Age")]
    pub age: i32,
    pub gender: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "No Telp")]
    pub phone: String,
    #[serde(rename = "Brand Device")]
    pub brand_device: String,
    #[serde(rename = "Digital Interest")]
    pub digital_interest: String,
    #[serde(rename = "Location Type")]
    pub location_type: String,
}

/// Server-computed pagination metadata. The client never recomputes totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub limit: u64,
}

/// One page of customers plus its pagination metadata.
///
/// Replaced wholesale on each accepted response; a stale page is never
/// merged with a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(rename = "data")]
    pub rows: Vec<Customer>,
    pub pagination: Pagination,
}

/// Generic `{ "data": [...] }` envelope used by the list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: Vec<T>,
}

/// Gender aggregate from `/customers/summary/gender`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenderCount {
    pub gender: String,
    pub count: u64,
}

/// Gender-by-age-group aggregate from `/customers/summary/gender-age`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenderAgeCount {
    pub gender: String,
    #[serde(rename = "ageGroup")]
    pub age_group: String,
    pub count: u64,
}

/// Device brand aggregate from `/customers/summary/brand-device`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandCount {
    pub brand: String,
    pub count: u64,
}

/// One hourly bucket from `/customers/trends/login`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginPoint {
    pub hour: i64,
    #[serde(rename = "loginCount")]
    pub login_count: u64,
}

/// Hourly login counts for one day, plus the date the server picked when
/// the request did not name one (`x-default-date` response header).
#[derive(Debug, Clone, PartialEq)]
pub struct LoginTrends {
    pub points: Vec<LoginPoint>,
    pub default_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_decodes_from_wire_names() {
        let raw = r#"{
            "Number": 7,
            "Name of Location": "Central Mall",
            "Login Hour": "13:44",
            "Login Date": "12/29/2023",
            "Name": "Ava Carter",
            "Age": 1990,
            "gender": "Female",
            "Email": "ava@example.com",
            "No Telp": "0812-000-111",
            "Brand Device": "Samsung",
            "Digital Interest": "Gaming",
            "Location Type": "urban"
        }"#;
        let c: Customer = serde_json::from_str(raw).unwrap();
        assert_eq!(c.number, 7);
        assert_eq!(c.location_name, "Central Mall");
        assert_eq!(c.age, 1990);
        assert_eq!(c.location_type, "urban");
    }

    #[test]
    fn page_decodes_envelope_and_pagination() {
        let raw = r#"{
            "data": [],
            "pagination": { "currentPage": 3, "totalPages": 10, "totalItems": 95, "limit": 10 }
        }"#;
        let page: Page = serde_json::from_str(raw).unwrap();
        assert!(page.rows.is_empty());
        assert_eq!(page.pagination.current_page, 3);
        assert_eq!(page.pagination.total_items, 95);
    }

    #[test]
    fn summary_rows_decode() {
        let raw = r#"{ "data": [ { "gender": "Male", "ageGroup": "20-29", "count": 12 } ] }"#;
        let env: DataEnvelope<GenderAgeCount> = serde_json::from_str(raw).unwrap();
        assert_eq!(env.data[0].age_group, "20-29");

        let raw = r#"{ "data": [ { "hour": 13, "loginCount": 44 } ] }"#;
        let env: DataEnvelope<LoginPoint> = serde_json::from_str(raw).unwrap();
        assert_eq!(env.data[0].login_count, 44);
    }
}

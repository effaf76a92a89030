//! In-memory mock data source for tests and offline demo mode.
//!
//! `MockApi` holds a deterministic generated dataset and reproduces the
//! server-side query semantics (search, equality filters, sort, pagination,
//! distinct option lists, aggregates), so the full TUI can run without a
//! backend and tests never touch the network.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use chrono::NaiveDate;

use crate::grid::QueryState;
use crate::models::{
    BrandCount, Customer, FilterField, GenderAgeCount, GenderCount, LoginPoint, LoginTrends, Page,
    Pagination,
};

use super::{ApiError, CustomerApi};

const FIRST_NAMES: &[&str] = &[
    "Ava", "Bima", "Citra", "Dewi", "Eko", "Fajar", "Gita", "Hana", "Indra", "Joko", "Kartika",
    "Lina", "Made", "Nadia", "Oscar", "Putri", "Rizky", "Sari", "Tono", "Wulan",
];
const LAST_NAMES: &[&str] = &[
    "Carter", "Hartono", "Wijaya", "Santoso", "Pratama", "Lestari", "Gunawan", "Saputra",
    "Utami", "Halim",
];
const LOCATIONS: &[&str] = &[
    "Central Mall", "Harbor Plaza", "Station Square", "City Library", "Airport Lounge",
    "Campus Cafe", "Riverside Park", "Grand Hotel",
];
const LOCATION_TYPES: &[&str] = &["urban", "sub urban", "rural"];
const GENDERS: &[&str] = &["Male", "Female"];
const BRANDS: &[&str] = &["Samsung", "Apple", "Xiaomi", "Oppo", "Vivo", "Realme"];
const INTERESTS: &[&str] = &[
    "Social Media", "Gaming", "E-commerce", "News", "Streaming", "Podcast",
];

/// Reference year for the mock's age-group aggregation; the dataset's birth
/// years are generated against it so group boundaries are stable.
const REFERENCE_YEAR: i32 = 2024;

/// Days the generated logins are spread over (MM/DD/YYYY, wire format).
const LOGIN_DATES: &[&str] = &[
    "12/25/2023", "12/26/2023", "12/27/2023", "12/28/2023", "12/29/2023", "12/30/2023",
    "12/31/2023",
];

/// Deterministic in-memory implementation of [`CustomerApi`].
pub struct MockApi {
    customers: Vec<Customer>,
    /// When set, `fetch_page` fails with a transport error. Lets tests and
    /// demos exercise the error affordance on demand.
    fail_pages: AtomicBool,
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockApi {
    /// Mock with the standard generated dataset.
    pub fn new() -> Self {
        Self {
            customers: generate_customers(240),
            fail_pages: AtomicBool::new(false),
        }
    }

    /// Mock over an explicit dataset.
    pub fn with_customers(customers: Vec<Customer>) -> Self {
        Self {
            customers,
            fail_pages: AtomicBool::new(false),
        }
    }

    /// Toggle page-fetch failures.
    pub fn set_fail_pages(&self, fail: bool) {
        self.fail_pages.store(fail, AtomicOrdering::SeqCst);
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    fn filtered(&self, query: &QueryState) -> Vec<&Customer> {
        self.customers
            .iter()
            .filter(|c| matches_search(c, &query.search))
            .filter(|c| {
                query.filters.iter().all(|(param, value)| {
                    // Unknown filter params are ignored, like a real server
                    // ignoring unexpected query keys.
                    filter_value(c, param).is_none_or(|field| field == value)
                })
            })
            .collect()
    }
}

fn generate_customers(count: usize) -> Vec<Customer> {
    (0..count)
        .map(|i| {
            let first = FIRST_NAMES[i % FIRST_NAMES.len()];
            let last = LAST_NAMES[(i / FIRST_NAMES.len() + i) % LAST_NAMES.len()];
            let age_offset = (i * 7 + 3) % 55; // ages 17..72 against REFERENCE_YEAR
            Customer {
                number: i as u64 + 1,
                name: format!("{} {}", first, last),
                email: format!(
                    "{}.{}{}@example.com",
                    first.to_lowercase(),
                    last.to_lowercase(),
                    i
                ),
                gender: GENDERS[i % GENDERS.len()].to_string(),
                age: REFERENCE_YEAR - 17 - age_offset as i32,
                phone: format!("0812-{:04}-{:04}", (i * 37) % 10000, (i * 91) % 10000),
                location_name: LOCATIONS[i % LOCATIONS.len()].to_string(),
                location_type: LOCATION_TYPES[i % LOCATION_TYPES.len()].to_string(),
                // Multipliers coprime to the pool sizes so every value occurs.
                brand_device: BRANDS[(i * 5 + 1) % BRANDS.len()].to_string(),
                digital_interest: INTERESTS[(i * 7 + 2) % INTERESTS.len()].to_string(),
                login_date: LOGIN_DATES[i % LOGIN_DATES.len()].to_string(),
                login_hour: format!("{:02}:{:02}", (i * 5) % 24, (i * 17) % 60),
            }
        })
        .collect()
}

fn matches_search(c: &Customer, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    [
        &c.name,
        &c.email,
        &c.gender,
        &c.phone,
        &c.location_name,
        &c.location_type,
        &c.brand_device,
        &c.digital_interest,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// Field value addressed by a server filter param, `None` for unknown params.
fn filter_value<'a>(c: &'a Customer, param: &str) -> Option<&'a str> {
    match param {
        "gender" => Some(&c.gender),
        "locationType" => Some(&c.location_type),
        "brandDevice" => Some(&c.brand_device),
        "digitalInterest" => Some(&c.digital_interest),
        _ => None,
    }
}

/// Compare two customers on a raw sort field name.
fn compare_on(a: &Customer, b: &Customer, field: &str) -> Ordering {
    match field {
        "Number" => a.number.cmp(&b.number),
        "Name" => a.name.cmp(&b.name),
        "Email" => a.email.cmp(&b.email),
        "gender" => a.gender.cmp(&b.gender),
        "Age" => a.age.cmp(&b.age),
        "Name of Location" => a.location_name.cmp(&b.location_name),
        "Location Type" => a.location_type.cmp(&b.location_type),
        "Brand Device" => a.brand_device.cmp(&b.brand_device),
        "Digital Interest" => a.digital_interest.cmp(&b.digital_interest),
        "Login Date" => {
            let parse = |s: &str| NaiveDate::parse_from_str(s, "%m/%d/%Y").ok();
            parse(&a.login_date).cmp(&parse(&b.login_date))
        }
        "Login Hour" => a.login_hour.cmp(&b.login_hour),
        _ => Ordering::Equal,
    }
}

fn age_group(age: i32) -> &'static str {
    match age {
        i32::MIN..=19 => "0-19",
        20..=29 => "20-29",
        30..=39 => "30-39",
        40..=49 => "40-49",
        50..=59 => "50-59",
        _ => "60+",
    }
}

impl CustomerApi for MockApi {
    fn fetch_page(&self, query: &QueryState) -> Result<Page, ApiError> {
        if self.fail_pages.load(AtomicOrdering::SeqCst) {
            return Err(ApiError::Transport("mock fetch failure".to_string()));
        }

        let mut matched = self.filtered(query);
        if let Some(sort) = &query.sort {
            matched.sort_by(|a, b| {
                let cmp = compare_on(a, b, &sort.field);
                if sort.descending { cmp.reverse() } else { cmp }
            });
        }

        let limit = query.page_size.max(1) as u64;
        let total_items = matched.len() as u64;
        let total_pages = total_items.div_ceil(limit);
        // Requested pages beyond the end clamp like the real server does.
        let current_page = (query.page_index as u64 + 1).min(total_pages.max(1));

        let start = ((current_page - 1) * limit) as usize;
        let rows: Vec<Customer> = matched
            .into_iter()
            .skip(start)
            .take(limit as usize)
            .cloned()
            .collect();

        Ok(Page {
            rows,
            pagination: Pagination {
                current_page,
                total_pages,
                total_items,
                limit,
            },
        })
    }

    fn filter_options(&self, field: &FilterField) -> Result<Vec<String>, ApiError> {
        let mut values: Vec<String> = Vec::new();
        for c in &self.customers {
            if let Some(value) = filter_value(c, field.param)
                && !values.iter().any(|v| v == value)
            {
                values.push(value.to_string());
            }
        }
        values.sort();
        Ok(values)
    }

    fn gender_summary(&self) -> Result<Vec<GenderCount>, ApiError> {
        let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
        for c in &self.customers {
            *counts.entry(c.gender.as_str()).or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(gender, count)| GenderCount {
                gender: gender.to_string(),
                count,
            })
            .collect())
    }

    fn gender_age_summary(&self) -> Result<Vec<GenderAgeCount>, ApiError> {
        let mut counts: BTreeMap<(&str, &str), u64> = BTreeMap::new();
        for c in &self.customers {
            let group = age_group(REFERENCE_YEAR - c.age);
            *counts.entry((c.gender.as_str(), group)).or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .map(|((gender, group), count)| GenderAgeCount {
                gender: gender.to_string(),
                age_group: group.to_string(),
                count,
            })
            .collect())
    }

    fn brand_device_summary(&self) -> Result<Vec<BrandCount>, ApiError> {
        let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
        for c in &self.customers {
            *counts.entry(c.brand_device.as_str()).or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(brand, count)| BrandCount {
                brand: brand.to_string(),
                count,
            })
            .collect())
    }

    fn login_trends(&self, date: Option<NaiveDate>) -> Result<LoginTrends, ApiError> {
        let default_date = NaiveDate::parse_from_str(LOGIN_DATES[0], "%m/%d/%Y").ok();
        let target = date.or(default_date);

        let mut per_hour: BTreeMap<i64, u64> = BTreeMap::new();
        for c in &self.customers {
            let login_day = NaiveDate::parse_from_str(&c.login_date, "%m/%d/%Y").ok();
            if login_day != target {
                continue;
            }
            if let Some(hour) = c.login_hour.split(':').next().and_then(|h| h.parse().ok()) {
                *per_hour.entry(hour).or_default() += 1;
            }
        }

        Ok(LoginTrends {
            points: per_hour
                .into_iter()
                .map(|(hour, login_count)| LoginPoint { hour, login_count })
                .collect(),
            default_date: if date.is_none() { default_date } else { None },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FILTER_FIELDS;

    #[test]
    fn pagination_metadata_is_consistent() {
        let api = MockApi::new();
        let page = api.fetch_page(&QueryState::default()).unwrap();
        assert_eq!(page.pagination.current_page, 1);
        assert_eq!(page.pagination.limit, 10);
        assert_eq!(page.pagination.total_items, 240);
        assert_eq!(page.pagination.total_pages, 24);
        assert!(page.rows.len() as u64 <= page.pagination.limit);
    }

    #[test]
    fn page_beyond_the_end_clamps() {
        let api = MockApi::new();
        let page = api
            .fetch_page(&QueryState::default().with_page_index(9999))
            .unwrap();
        assert_eq!(page.pagination.current_page, page.pagination.total_pages);
        assert!(!page.rows.is_empty());
    }

    #[test]
    fn search_narrows_across_fields() {
        let api = MockApi::new();
        let all = api.fetch_page(&QueryState::default()).unwrap();
        let narrowed = api
            .fetch_page(&QueryState::default().with_search("samsung"))
            .unwrap();
        assert!(narrowed.pagination.total_items > 0);
        assert!(narrowed.pagination.total_items < all.pagination.total_items);
        assert!(
            narrowed
                .rows
                .iter()
                .all(|c| c.brand_device.eq_ignore_ascii_case("samsung"))
        );
    }

    #[test]
    fn no_match_yields_an_empty_page() {
        let api = MockApi::new();
        let page = api
            .fetch_page(&QueryState::default().with_search("zzz-no-such-customer"))
            .unwrap();
        assert!(page.rows.is_empty());
        assert_eq!(page.pagination.total_items, 0);
        assert_eq!(page.pagination.total_pages, 0);
        assert_eq!(page.pagination.current_page, 1);
    }

    #[test]
    fn equality_filter_applies_and_unknown_params_are_ignored() {
        let api = MockApi::new();
        let filtered = api
            .fetch_page(&QueryState::default().with_filter("gender", "Female"))
            .unwrap();
        assert!(filtered.rows.iter().all(|c| c.gender == "Female"));

        let unknown = api
            .fetch_page(&QueryState::default().with_filter("notAField", "x"))
            .unwrap();
        assert_eq!(unknown.pagination.total_items, 240);
    }

    #[test]
    fn sorting_follows_field_and_direction() {
        let api = MockApi::new();
        let asc = api
            .fetch_page(&QueryState::default().with_sort("Age"))
            .unwrap();
        let ages: Vec<i32> = asc.rows.iter().map(|c| c.age).collect();
        assert!(ages.windows(2).all(|w| w[0] <= w[1]));

        let desc = api
            .fetch_page(&QueryState::default().with_sort("Age").with_sort("Age"))
            .unwrap();
        let ages: Vec<i32> = desc.rows.iter().map(|c| c.age).collect();
        assert!(ages.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn filter_options_are_distinct_and_sorted() {
        let api = MockApi::new();
        for field in FILTER_FIELDS {
            let options = api.filter_options(field).unwrap();
            assert!(!options.is_empty(), "{} has options", field.label);
            assert!(options.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn summaries_cover_the_whole_dataset() {
        let api = MockApi::new();
        let genders = api.gender_summary().unwrap();
        assert_eq!(genders.iter().map(|g| g.count).sum::<u64>(), 240);

        let by_age = api.gender_age_summary().unwrap();
        assert_eq!(by_age.iter().map(|g| g.count).sum::<u64>(), 240);

        let brands = api.brand_device_summary().unwrap();
        assert_eq!(brands.iter().map(|b| b.count).sum::<u64>(), 240);
    }

    #[test]
    fn login_trends_default_date_comes_from_the_header_path() {
        let api = MockApi::new();
        let trends = api.login_trends(None).unwrap();
        assert!(trends.default_date.is_some());
        assert!(!trends.points.is_empty());

        // An explicit date gets no default-date hint.
        let explicit = api.login_trends(trends.default_date).unwrap();
        assert!(explicit.default_date.is_none());
        assert_eq!(explicit.points, trends.points);
    }

    #[test]
    fn induced_failure_only_affects_pages() {
        let api = MockApi::new();
        api.set_fail_pages(true);
        assert!(api.fetch_page(&QueryState::default()).is_err());
        assert!(api.gender_summary().is_ok());
        api.set_fail_pages(false);
        assert!(api.fetch_page(&QueryState::default()).is_ok());
    }
}

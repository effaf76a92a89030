//! Immutable grid query state and its pure transitions.
//!
//! Every user interaction produces a new [`QueryState`] snapshot through one
//! of the `with_*` transitions; nothing is mutated in place. The page index
//! resets to 0 on any transition that changes the result set (search, filter,
//! sort, page size) — page navigation is the one transition that preserves
//! the rest of the state.

use std::collections::BTreeMap;

/// Page sizes offered by the page-size selector.
pub const PAGE_SIZES: &[usize] = &[10, 25, 50, 100];

/// Default page size at mount.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Requested sort column and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Raw field name as the server expects it in `sortBy`.
    pub field: String,
    pub descending: bool,
}

/// Snapshot of the grid's pagination, sort, and filter intent. Pure data,
/// no I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    /// Zero-based page index (the wire `page` param is one-based).
    pub page_index: usize,
    pub page_size: usize,
    pub sort: Option<SortSpec>,
    /// Free-text search; empty means no search param is sent.
    pub search: String,
    /// Per-field filters keyed by the server's query param name. Keys are
    /// unique; no entry is ever stored with an empty value.
    pub filters: BTreeMap<String, String>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            sort: None,
            search: String::new(),
            filters: BTreeMap::new(),
        }
    }
}

impl QueryState {
    /// Replace the search text. Resets the page index.
    pub fn with_search(&self, text: &str) -> Self {
        Self {
            page_index: 0,
            search: text.to_string(),
            ..self.clone()
        }
    }

    /// Replace or remove the filter for `param`. An empty value removes the
    /// entry entirely — it is never stored as an empty string. Resets the
    /// page index.
    ///
    /// Filter keys are not validated against a schema; unknown params pass
    /// through unchanged (the server is authoritative on validity).
    pub fn with_filter(&self, param: &str, value: &str) -> Self {
        let mut filters = self.filters.clone();
        if value.is_empty() {
            filters.remove(param);
        } else {
            filters.insert(param.to_string(), value.to_string());
        }
        Self {
            page_index: 0,
            filters,
            ..self.clone()
        }
    }

    /// Sort by `field`: selecting the current sort field flips the direction,
    /// selecting any other field starts ascending. Resets the page index.
    pub fn with_sort(&self, field: &str) -> Self {
        let sort = match &self.sort {
            Some(current) if current.field == field => Some(SortSpec {
                field: current.field.clone(),
                descending: !current.descending,
            }),
            _ => Some(SortSpec {
                field: field.to_string(),
                descending: false,
            }),
        };
        Self {
            page_index: 0,
            sort,
            ..self.clone()
        }
    }

    /// Navigate to `index`. Everything else is preserved.
    pub fn with_page_index(&self, index: usize) -> Self {
        Self {
            page_index: index,
            ..self.clone()
        }
    }

    /// Change the page size. Resets the page index.
    pub fn with_page_size(&self, size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: size,
            ..self.clone()
        }
    }

    /// Outgoing query pairs for the page endpoint. `page` is one-based;
    /// sort, search, and filter params are omitted entirely when unset.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), (self.page_index + 1).to_string()),
            ("limit".to_string(), self.page_size.to_string()),
        ];
        if let Some(sort) = &self.sort {
            params.push(("sortBy".to_string(), sort.field.clone()));
            params.push((
                "sortOrder".to_string(),
                if sort.descending { "desc" } else { "asc" }.to_string(),
            ));
        }
        if !self.search.is_empty() {
            params.push(("search".to_string(), self.search.clone()));
        }
        for (param, value) in &self.filters {
            params.push((param.clone(), value.clone()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn every_transition_except_page_navigation_resets_page_index() {
        let state = QueryState::default().with_page_index(7);
        assert_eq!(state.page_index, 7);

        assert_eq!(state.with_search("ava").page_index, 0);
        assert_eq!(state.with_filter("gender", "Male").page_index, 0);
        assert_eq!(state.with_sort("Name").page_index, 0);
        assert_eq!(state.with_page_size(25).page_index, 0);
        assert_eq!(state.with_page_index(3).page_index, 3);
    }

    #[test]
    fn page_navigation_preserves_everything_else() {
        let state = QueryState::default()
            .with_search("mall")
            .with_filter("gender", "Female")
            .with_sort("Age");
        let next = state.with_page_index(4);
        assert_eq!(next.search, state.search);
        assert_eq!(next.filters, state.filters);
        assert_eq!(next.sort, state.sort);
        assert_eq!(next.page_size, state.page_size);
    }

    #[test]
    fn sort_toggle_flips_once_per_selection() {
        let state = QueryState::default().with_sort("Name");
        assert_eq!(
            state.sort,
            Some(SortSpec {
                field: "Name".to_string(),
                descending: false
            })
        );

        // Second click flips, third flips back.
        let state = state.with_sort("Name");
        assert!(state.sort.as_ref().is_some_and(|s| s.descending));
        let state = state.with_sort("Name");
        assert!(state.sort.as_ref().is_some_and(|s| !s.descending));

        // Switching fields always starts ascending.
        let state = state.with_sort("Name").with_sort("Age");
        assert_eq!(
            state.sort,
            Some(SortSpec {
                field: "Age".to_string(),
                descending: false
            })
        );
    }

    #[test]
    fn empty_filter_value_removes_the_entry() {
        let state = QueryState::default().with_filter("gender", "Male");
        assert_eq!(state.filters.get("gender").map(String::as_str), Some("Male"));

        let state = state.with_filter("gender", "");
        assert!(!state.filters.contains_key("gender"));
        // And the outgoing request carries no gender param at all.
        assert_eq!(param(&state.params(), "gender"), None);
    }

    #[test]
    fn filter_keys_stay_unique_on_replacement() {
        let state = QueryState::default()
            .with_filter("brandDevice", "Samsung")
            .with_filter("brandDevice", "Apple");
        assert_eq!(state.filters.len(), 1);
        assert_eq!(
            state.filters.get("brandDevice").map(String::as_str),
            Some("Apple")
        );
    }

    #[test]
    fn unknown_filter_params_pass_through() {
        let state = QueryState::default().with_filter("notAField", "x");
        assert_eq!(param(&state.params(), "notAField"), Some("x"));
    }

    #[test]
    fn params_render_one_based_page_and_omit_unset() {
        let state = QueryState::default();
        let params = state.params();
        assert_eq!(param(&params, "page"), Some("1"));
        assert_eq!(param(&params, "limit"), Some("10"));
        assert_eq!(param(&params, "sortBy"), None);
        assert_eq!(param(&params, "search"), None);

        let state = state
            .with_sort("Login Date")
            .with_sort("Login Date")
            .with_search("ava")
            .with_page_index(2);
        let params = state.params();
        assert_eq!(param(&params, "page"), Some("3"));
        assert_eq!(param(&params, "sortBy"), Some("Login Date"));
        assert_eq!(param(&params, "sortOrder"), Some("desc"));
        assert_eq!(param(&params, "search"), Some("ava"));
    }
}

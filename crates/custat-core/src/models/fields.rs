//! Field configuration: filterable fields and table columns.
//!
//! The server's filter query params do not match the raw display field names
//! (`locationType` vs `Location Type`), and the mapping is not derivable from
//! the client side. It is therefore carried here as configuration.

/// One selectable filter field.
pub struct FilterField {
    /// Human-facing label.
    pub label: &'static str,
    /// Query parameter key the server expects for this filter.
    pub param: &'static str,
    /// Path segment of the filter-options endpoint
    /// (`/customers/filters/{segment}`); may contain spaces.
    pub options_segment: &'static str,
}

/// Filterable fields, in display order.
pub const FILTER_FIELDS: &[FilterField] = &[
    FilterField {
        label: "Gender",
        param: "gender",
        options_segment: "gender",
    },
    FilterField {
        label: "Location Type",
        param: "locationType",
        options_segment: "Location Type",
    },
    FilterField {
        label: "Brand Device",
        param: "brandDevice",
        options_segment: "Brand Device",
    },
    FilterField {
        label: "Digital Interest",
        param: "digitalInterest",
        options_segment: "Digital Interest",
    },
];

/// One customer table column.
pub struct Column {
    /// Column header.
    pub header: &'static str,
    /// Raw field name sent as `sortBy`; `None` for computed columns.
    pub sort_field: Option<&'static str>,
    /// Preferred rendering width.
    pub width: u16,
}

impl Column {
    pub fn sortable(&self) -> bool {
        self.sort_field.is_some()
    }
}

/// Customer table columns, in display order. The leading `No.` column is the
/// computed per-page row number and cannot be sorted.
pub const COLUMNS: &[Column] = &[
    Column {
        header: "No.",
        sort_field: None,
        width: 5,
    },
    Column {
        header: "Customer Name",
        sort_field: Some("Name"),
        width: 18,
    },
    Column {
        header: "Email",
        sort_field: Some("Email"),
        width: 26,
    },
    Column {
        header: "Gender",
        sort_field: Some("gender"),
        width: 7,
    },
    Column {
        header: "Age",
        sort_field: Some("Age"),
        width: 4,
    },
    Column {
        header: "Location",
        sort_field: Some("Name of Location"),
        width: 16,
    },
    Column {
        header: "Loc. Type",
        sort_field: Some("Location Type"),
        width: 10,
    },
    Column {
        header: "Brand",
        sort_field: Some("Brand Device"),
        width: 10,
    },
    Column {
        header: "Interest",
        sort_field: Some("Digital Interest"),
        width: 14,
    },
    Column {
        header: "Login Date",
        sort_field: Some("Login Date"),
        width: 18,
    },
    Column {
        header: "Hour",
        sort_field: Some("Login Hour"),
        width: 6,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_params_are_unique() {
        for (i, a) in FILTER_FIELDS.iter().enumerate() {
            for b in &FILTER_FIELDS[i + 1..] {
                assert_ne!(a.param, b.param);
            }
        }
    }

    #[test]
    fn row_number_column_is_not_sortable() {
        assert!(!COLUMNS[0].sortable());
        assert!(COLUMNS[1..].iter().all(Column::sortable));
    }
}

//! Pure transforms behind the aggregate chart views.
//!
//! Each chart leaf fetches its summary endpoint once, runs one of these
//! transforms, and renders the result; nothing here performs I/O.

use crate::models::{BrandCount, GenderAgeCount, GenderCount, LoginPoint};

/// Label used for empty category values.
const UNKNOWN_LABEL: &str = "Unknown";

/// Fixed display order of the age groups the server aggregates into;
/// unexpected group labels sort after these.
pub const AGE_GROUP_ORDER: &[&str] = &["0-19", "20-29", "30-39", "40-49", "50-59", "60+"];

/// Labelled counts for a one-dimensional distribution chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakdown {
    pub entries: Vec<(String, u64)>,
}

impl Breakdown {
    pub fn from_genders(rows: &[GenderCount]) -> Self {
        Self {
            entries: rows
                .iter()
                .map(|r| (display_label(&r.gender), r.count))
                .collect(),
        }
    }

    pub fn from_brands(rows: &[BrandCount]) -> Self {
        Self {
            entries: rows
                .iter()
                .map(|r| (display_label(&r.brand), r.count))
                .collect(),
        }
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Share of the total for one entry, in percent.
    pub fn percentage(&self, count: u64) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            count as f64 * 100.0 / total as f64
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn display_label(raw: &str) -> String {
    if raw.is_empty() {
        UNKNOWN_LABEL.to_string()
    } else {
        raw.to_string()
    }
}

/// Gender counts pivoted into one series per gender over the ordered age
/// groups, missing cells filled with zero.
#[derive(Debug, Clone, PartialEq)]
pub struct AgeGroupMatrix {
    pub groups: Vec<String>,
    /// `(gender label, count per group)`, aligned with `groups`.
    pub series: Vec<(String, Vec<u64>)>,
}

impl AgeGroupMatrix {
    pub fn from_counts(rows: &[GenderAgeCount]) -> Self {
        let mut groups: Vec<String> = Vec::new();
        let mut genders: Vec<String> = Vec::new();
        for row in rows {
            if !groups.iter().any(|g| *g == row.age_group) {
                groups.push(row.age_group.clone());
            }
            let gender = display_label(&row.gender);
            if !genders.iter().any(|g| *g == gender) {
                genders.push(gender);
            }
        }
        groups.sort_by_key(|g| group_rank(g));

        let series = genders
            .into_iter()
            .map(|gender| {
                let counts = groups
                    .iter()
                    .map(|group| {
                        rows.iter()
                            .filter(|r| {
                                r.age_group == *group && display_label(&r.gender) == gender
                            })
                            .map(|r| r.count)
                            .sum()
                    })
                    .collect();
                (gender, counts)
            })
            .collect();

        Self { groups, series }
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|(_, counts)| counts.iter().all(|c| *c == 0))
    }
}

fn group_rank(group: &str) -> usize {
    AGE_GROUP_ORDER
        .iter()
        .position(|g| *g == group)
        .unwrap_or(AGE_GROUP_ORDER.len())
}

/// Login counts bucketed into the 24 hours of one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourlySeries {
    pub counts: [u64; 24],
}

impl HourlySeries {
    /// Out-of-range hours are dropped; duplicate hours keep the last value.
    pub fn from_points(points: &[LoginPoint]) -> Self {
        let mut counts = [0u64; 24];
        for point in points {
            if (0..24).contains(&point.hour) {
                counts[point.hour as usize] = point.login_count;
            }
        }
        Self { counts }
    }

    /// An all-zero day renders the "no data" affordance.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|c| *c == 0)
    }

    pub fn max(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakdown_labels_empty_values_unknown() {
        let rows = vec![
            GenderCount {
                gender: "Male".to_string(),
                count: 10,
            },
            GenderCount {
                gender: String::new(),
                count: 2,
            },
        ];
        let breakdown = Breakdown::from_genders(&rows);
        assert_eq!(breakdown.entries[1].0, "Unknown");
        assert_eq!(breakdown.total(), 12);
    }

    #[test]
    fn breakdown_percentages_sum_sensibly() {
        let rows = vec![
            BrandCount {
                brand: "Samsung".to_string(),
                count: 3,
            },
            BrandCount {
                brand: "Apple".to_string(),
                count: 1,
            },
        ];
        let breakdown = Breakdown::from_brands(&rows);
        assert!((breakdown.percentage(3) - 75.0).abs() < f64::EPSILON);
        assert_eq!(Breakdown { entries: vec![] }.percentage(5), 0.0);
    }

    #[test]
    fn age_groups_come_out_in_fixed_order() {
        let rows = vec![
            GenderAgeCount {
                gender: "Male".to_string(),
                age_group: "60+".to_string(),
                count: 1,
            },
            GenderAgeCount {
                gender: "Female".to_string(),
                age_group: "0-19".to_string(),
                count: 2,
            },
            GenderAgeCount {
                gender: "Male".to_string(),
                age_group: "30-39".to_string(),
                count: 3,
            },
        ];
        let matrix = AgeGroupMatrix::from_counts(&rows);
        assert_eq!(matrix.groups, vec!["0-19", "30-39", "60+"]);
    }

    #[test]
    fn missing_matrix_cells_are_zero_filled() {
        let rows = vec![
            GenderAgeCount {
                gender: "Male".to_string(),
                age_group: "20-29".to_string(),
                count: 5,
            },
            GenderAgeCount {
                gender: "Female".to_string(),
                age_group: "30-39".to_string(),
                count: 7,
            },
        ];
        let matrix = AgeGroupMatrix::from_counts(&rows);
        assert_eq!(matrix.groups, vec!["20-29", "30-39"]);
        let male = &matrix.series[0];
        let female = &matrix.series[1];
        assert_eq!((male.0.as_str(), male.1.as_slice()), ("Male", &[5, 0][..]));
        assert_eq!(
            (female.0.as_str(), female.1.as_slice()),
            ("Female", &[0, 7][..])
        );
    }

    #[test]
    fn hourly_series_fills_24_buckets_and_drops_out_of_range() {
        let points = vec![
            LoginPoint {
                hour: 0,
                login_count: 4,
            },
            LoginPoint {
                hour: 23,
                login_count: 9,
            },
            LoginPoint {
                hour: 24,
                login_count: 99,
            },
            LoginPoint {
                hour: -1,
                login_count: 99,
            },
        ];
        let series = HourlySeries::from_points(&points);
        assert_eq!(series.counts[0], 4);
        assert_eq!(series.counts[23], 9);
        assert_eq!(series.counts.iter().sum::<u64>(), 13);
        assert_eq!(series.max(), 9);
        assert!(!series.is_empty());
        assert!(HourlySeries::from_points(&[]).is_empty());
    }
}

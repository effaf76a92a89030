//! Main application state.

use chrono::NaiveDate;
use ratatui::widgets::TableState as RatatuiTableState;
use tracing::debug;

use crate::charts::{AgeGroupMatrix, Breakdown, HourlySeries};
use crate::grid::GridController;
use crate::models::Customer;
use crate::tui::event::{Event, SummaryOutcome, TrendsOutcome};

use super::{ChartLoad, InputMode, PopupState, Tab};

/// Login-trends leaf state: the loaded series plus the date selection flow.
#[derive(Debug, Default)]
pub struct TrendsState {
    pub load: ChartLoad<HourlySeries>,
    /// Date the displayed series belongs to (server default until known).
    pub date: Option<NaiveDate>,
    /// Date input buffer (`d` on the TRD tab).
    pub input: String,
    /// Last date parse error to display in the popup.
    pub input_error: Option<String>,
    /// Date of the most recently issued trends fetch; outcomes for any
    /// other request are stale and dropped.
    pub requested: Option<NaiveDate>,
}

/// Main application state.
pub struct AppState {
    /// Current active tab.
    pub current_tab: Tab,
    /// Input mode.
    pub input_mode: InputMode,
    /// Search input buffer.
    pub search_input: String,
    /// Active popup state. Only one popup can be open at a time.
    pub popup: PopupState,
    /// Temporary status message shown in the header.
    pub status_message: Option<String>,
    /// The customer grid: query state, sequenced fetches, current page.
    pub grid: GridController<Event>,
    /// Selected row index within the current page.
    pub selected_row: usize,
    /// Ratatui table state for the customer table (enables auto-scrolling).
    pub table_state: RatatuiTableState,
    /// Gender distribution chart (DEM tab).
    pub gender_chart: ChartLoad<Breakdown>,
    /// Gender by age group chart (DEM tab).
    pub age_chart: ChartLoad<AgeGroupMatrix>,
    /// Device brand chart (DEV tab).
    pub brand_chart: ChartLoad<Breakdown>,
    /// Login trends chart (TRD tab).
    pub trends: TrendsState,
}

impl AppState {
    pub fn new(grid: GridController<Event>) -> Self {
        Self {
            current_tab: Tab::Customers,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            popup: PopupState::None,
            status_message: None,
            grid,
            selected_row: 0,
            table_state: RatatuiTableState::default(),
            gender_chart: ChartLoad::Loading,
            age_chart: ChartLoad::Loading,
            brand_chart: ChartLoad::Loading,
            trends: TrendsState::default(),
        }
    }

    /// Switches to a new tab, dropping any tab-specific popup.
    pub fn switch_tab(&mut self, new_tab: Tab) {
        if self.current_tab != new_tab {
            self.current_tab = new_tab;
            if !matches!(self.popup, PopupState::Help { .. }) {
                self.popup = PopupState::None;
            }
        }
    }

    /// Customer under the cursor, if the page has rows.
    pub fn selected_customer(&self) -> Option<&Customer> {
        self.grid.rows().get(self.selected_row)
    }

    pub fn select_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn select_down(&mut self) {
        let max = self.grid.rows().len().saturating_sub(1);
        self.selected_row = (self.selected_row + 1).min(max);
    }

    pub fn select_first(&mut self) {
        self.selected_row = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_row = self.grid.rows().len().saturating_sub(1);
    }

    /// Clamp the cursor after the page contents changed.
    pub fn clamp_selection(&mut self) {
        let len = self.grid.rows().len();
        if len == 0 {
            self.selected_row = 0;
        } else if self.selected_row >= len {
            self.selected_row = len - 1;
        }
    }

    /// Store one completed chart summary on its leaf.
    pub fn apply_summary(&mut self, outcome: SummaryOutcome) {
        match outcome {
            SummaryOutcome::Gender(Ok(rows)) => {
                self.gender_chart = ChartLoad::Ready(Breakdown::from_genders(&rows));
            }
            SummaryOutcome::Gender(Err(err)) => {
                self.gender_chart = ChartLoad::Failed(err.to_string());
            }
            SummaryOutcome::GenderAge(Ok(rows)) => {
                self.age_chart = ChartLoad::Ready(AgeGroupMatrix::from_counts(&rows));
            }
            SummaryOutcome::GenderAge(Err(err)) => {
                self.age_chart = ChartLoad::Failed(err.to_string());
            }
            SummaryOutcome::BrandDevice(Ok(rows)) => {
                self.brand_chart = ChartLoad::Ready(Breakdown::from_brands(&rows));
            }
            SummaryOutcome::BrandDevice(Err(err)) => {
                self.brand_chart = ChartLoad::Failed(err.to_string());
            }
        }
    }

    /// Store one completed trends fetch, dropping outcomes of superseded
    /// date selections.
    pub fn apply_trends(&mut self, outcome: TrendsOutcome) {
        if outcome.requested != self.trends.requested {
            debug!(requested = ?outcome.requested, "discarding stale trends result");
            return;
        }
        match outcome.result {
            Ok(trends) => {
                if self.trends.date.is_none() {
                    // Adopt the server's suggested day for the date control.
                    self.trends.date = trends.default_date;
                }
                self.trends.load = ChartLoad::Ready(HourlySeries::from_points(&trends.points));
            }
            Err(err) => {
                self.trends.load = ChartLoad::Failed(err.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::mpsc;

    use super::*;
    use crate::api::{ApiError, MockApi};
    use crate::models::{LoginPoint, LoginTrends};

    fn state() -> AppState {
        let (tx, _rx) = mpsc::channel();
        // Keep the receiver alive long enough for construction-time sends.
        std::mem::forget(_rx);
        AppState::new(GridController::new(Arc::new(MockApi::new()), tx))
    }

    #[test]
    fn tab_cycle_is_closed() {
        let mut tab = Tab::Customers;
        for _ in 0..Tab::all().len() {
            tab = tab.next();
        }
        assert_eq!(tab, Tab::Customers);
        assert_eq!(Tab::Customers.prev(), Tab::Trends);
    }

    #[test]
    fn summary_outcomes_land_on_their_leaf() {
        let mut state = state();
        state.apply_summary(SummaryOutcome::Gender(Err(ApiError::Status(500))));
        assert!(matches!(state.gender_chart, ChartLoad::Failed(_)));
        // Other leaves are untouched.
        assert!(matches!(state.age_chart, ChartLoad::Loading));
        assert!(matches!(state.brand_chart, ChartLoad::Loading));
    }

    #[test]
    fn stale_trends_outcome_is_dropped() {
        let mut state = state();
        let date = NaiveDate::from_ymd_opt(2023, 12, 29);
        state.trends.requested = date;

        // Outcome of the older default-day request arrives late.
        state.apply_trends(TrendsOutcome {
            requested: None,
            result: Ok(LoginTrends {
                points: vec![LoginPoint {
                    hour: 1,
                    login_count: 99,
                }],
                default_date: None,
            }),
        });
        assert!(matches!(state.trends.load, ChartLoad::Loading));

        state.apply_trends(TrendsOutcome {
            requested: date,
            result: Ok(LoginTrends {
                points: Vec::new(),
                default_date: None,
            }),
        });
        assert!(matches!(state.trends.load, ChartLoad::Ready(_)));
    }

    #[test]
    fn default_date_is_adopted_once() {
        let mut state = state();
        let server_day = NaiveDate::from_ymd_opt(2023, 12, 25);
        state.apply_trends(TrendsOutcome {
            requested: None,
            result: Ok(LoginTrends {
                points: Vec::new(),
                default_date: server_day,
            }),
        });
        assert_eq!(state.trends.date, server_day);
    }
}

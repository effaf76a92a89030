//! Grid controller: the single point of truth for the customer table.
//!
//! Combines the query snapshot, the latest accepted page, and the
//! loading/error flags, and turns user interactions into query transitions
//! plus sequenced fetches. Previously displayed rows stay visible while a
//! fetch is in flight and after a failed fetch — stale-but-valid data beats
//! a blank table.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

use tracing::warn;

use crate::api::{ApiError, CustomerApi};
use crate::models::{Customer, FILTER_FIELDS, Page, Pagination};

use super::query::QueryState;
use super::sequencer::{FetchOutcome, FetchSequencer};

/// Grid lifecycle phase.
///
/// `Loading` is re-entered on every query transition, from any phase;
/// `Ready` and `Errored` are both re-enterable arbitrarily often.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridPhase {
    /// Constructed but no fetch issued yet.
    #[default]
    Idle,
    /// A fetch for the current query is outstanding.
    Loading,
    /// The latest accepted fetch succeeded.
    Ready,
    /// The latest accepted fetch failed; the previous page is retained.
    Errored,
}

/// Completion of one filter-option load (fire-and-forget, per field).
#[derive(Debug)]
pub struct OptionsOutcome {
    /// Server query param of the field the options belong to.
    pub param: String,
    pub result: Result<Vec<String>, ApiError>,
}

/// Orchestrates the query state model and the fetch sequencer, and exposes
/// the current page plus pagination metadata to the view.
pub struct GridController<E> {
    api: Arc<dyn CustomerApi>,
    tx: Sender<E>,
    sequencer: FetchSequencer<E>,
    query: QueryState,
    page: Option<Page>,
    phase: GridPhase,
    error: Option<String>,
    /// Options per filter param; a failed load degrades to an empty list.
    options: BTreeMap<String, Vec<String>>,
}

impl<E> GridController<E>
where
    E: From<FetchOutcome> + From<OptionsOutcome> + Send + 'static,
{
    /// Create the controller and fire the initial page fetch plus one
    /// fire-and-forget options fetch per filterable field. The controller
    /// starts in `Loading`.
    pub fn new(api: Arc<dyn CustomerApi>, tx: Sender<E>) -> Self {
        let mut controller = Self {
            sequencer: FetchSequencer::new(Arc::clone(&api), tx.clone()),
            api,
            tx,
            query: QueryState::default(),
            page: None,
            phase: GridPhase::Idle,
            error: None,
            options: BTreeMap::new(),
        };
        controller.load_filter_options();
        controller.issue_current();
        controller
    }

    // --- interactions -----------------------------------------------------

    pub fn set_search(&mut self, text: &str) {
        self.apply(self.query.with_search(text));
    }

    pub fn set_filter(&mut self, param: &str, value: &str) {
        self.apply(self.query.with_filter(param, value));
    }

    pub fn set_sort(&mut self, field: &str) {
        self.apply(self.query.with_sort(field));
    }

    pub fn set_page_index(&mut self, index: usize) {
        self.apply(self.query.with_page_index(index));
    }

    pub fn set_page_size(&mut self, size: usize) {
        self.apply(self.query.with_page_size(size));
    }

    /// Re-issue the current query unconditionally.
    pub fn refresh(&mut self) {
        self.issue_current();
    }

    /// Adopt `next` and fetch it. A transition that lands on the identical
    /// snapshot (e.g. page-prev while already on the first page) is a
    /// no-op rather than a duplicate request.
    fn apply(&mut self, next: QueryState) {
        if next == self.query && self.phase != GridPhase::Idle {
            return;
        }
        self.query = next;
        self.issue_current();
    }

    fn issue_current(&mut self) {
        self.phase = GridPhase::Loading;
        self.sequencer.issue(&self.query);
    }

    // --- results ----------------------------------------------------------

    /// Feed one completed fetch through the sequencer. Stale outcomes are
    /// dropped and leave the state untouched; returns whether the outcome
    /// was applied.
    pub fn on_fetch(&mut self, outcome: FetchOutcome) -> bool {
        match self.sequencer.accept(outcome) {
            Some(Ok(page)) => {
                self.page = Some(page);
                self.error = None;
                self.phase = GridPhase::Ready;
                true
            }
            Some(Err(err)) => {
                self.error = Some(err.to_string());
                self.phase = GridPhase::Errored;
                true
            }
            None => false,
        }
    }

    /// Store one filter field's option list. A failed load leaves the
    /// field with no options and never touches the grid error state.
    pub fn on_options(&mut self, outcome: OptionsOutcome) {
        match outcome.result {
            Ok(values) => {
                self.options.insert(outcome.param, values);
            }
            Err(err) => {
                warn!(param = %outcome.param, error = %err, "filter options failed to load");
                self.options.insert(outcome.param, Vec::new());
            }
        }
    }

    fn load_filter_options(&self) {
        for field in FILTER_FIELDS {
            let api = Arc::clone(&self.api);
            let tx = self.tx.clone();
            thread::spawn(move || {
                let result = api.filter_options(field);
                let _ = tx.send(E::from(OptionsOutcome {
                    param: field.param.to_string(),
                    result,
                }));
            });
        }
    }

    // --- view accessors ---------------------------------------------------

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn phase(&self) -> GridPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == GridPhase::Loading
    }

    /// Error message of the latest accepted fetch, if it failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Rows of the latest accepted page (possibly stale while loading or
    /// errored). Empty before the first accepted response.
    pub fn rows(&self) -> &[Customer] {
        self.page.as_ref().map(|p| p.rows.as_slice()).unwrap_or(&[])
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.page.as_ref().map(|p| &p.pagination)
    }

    /// Known option values for a filter param (empty until loaded).
    pub fn options_for(&self, param: &str) -> &[String] {
        self.options.get(param).map(Vec::as_slice).unwrap_or(&[])
    }

    /// One-based ordinal of the first displayed item, 0 when there are no
    /// items at all.
    pub fn start_item(&self) -> u64 {
        match self.pagination() {
            Some(p) if p.total_items > 0 => (p.current_page - 1) * p.limit + 1,
            _ => 0,
        }
    }

    /// One-based ordinal of the last displayed item, 0 when there are no
    /// items at all.
    pub fn end_item(&self) -> u64 {
        match self.pagination() {
            Some(p) if p.total_items > 0 => (p.current_page * p.limit).min(p.total_items),
            _ => 0,
        }
    }

    /// Display number for the row at `row_index` within the current page.
    /// Presentation only; never stored with the row.
    pub fn row_number(&self, row_index: usize) -> u64 {
        match self.pagination() {
            Some(p) => (p.current_page - 1) * p.limit + row_index as u64 + 1,
            None => row_index as u64 + 1,
        }
    }

    /// Whether a previous page exists.
    pub fn can_prev(&self) -> bool {
        self.pagination().is_some_and(|p| p.current_page > 1)
    }

    /// Whether a next page exists.
    pub fn can_next(&self) -> bool {
        self.pagination()
            .is_some_and(|p| p.current_page < p.total_pages)
    }

    /// True once an accepted response reported zero matching items — the
    /// explicit "no data" display state, distinct from an error.
    pub fn is_empty(&self) -> bool {
        self.phase == GridPhase::Ready
            && self.pagination().is_some_and(|p| p.total_items == 0)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Receiver};
    use std::time::Duration;

    use super::*;
    use crate::api::MockApi;
    use crate::grid::GridEvent;

    fn controller() -> (GridController<GridEvent>, Receiver<GridEvent>) {
        let (tx, rx) = mpsc::channel();
        (GridController::new(Arc::new(MockApi::new()), tx), rx)
    }

    /// Drains events until the next page outcome arrives.
    fn next_page_outcome(rx: &Receiver<GridEvent>) -> FetchOutcome {
        loop {
            match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
                GridEvent::Page(outcome) => return outcome,
                GridEvent::Options(_) => {}
            }
        }
    }

    fn settle(controller: &mut GridController<GridEvent>, rx: &Receiver<GridEvent>) {
        let outcome = next_page_outcome(rx);
        assert!(controller.on_fetch(outcome));
    }

    #[test]
    fn starts_loading_and_reaches_ready() {
        let (mut ctl, rx) = controller();
        assert_eq!(ctl.phase(), GridPhase::Loading);
        assert!(ctl.rows().is_empty());

        settle(&mut ctl, &rx);
        assert_eq!(ctl.phase(), GridPhase::Ready);
        assert!(!ctl.rows().is_empty());
        assert!(ctl.error().is_none());
    }

    #[test]
    fn rows_stay_visible_while_loading() {
        let (mut ctl, rx) = controller();
        settle(&mut ctl, &rx);
        let shown = ctl.rows().len();
        assert!(shown > 0);

        ctl.set_page_index(1);
        assert!(ctl.is_loading());
        // Optimistic: the old rows are still there during the fetch.
        assert_eq!(ctl.rows().len(), shown);
    }

    #[test]
    fn failure_after_success_keeps_rows_and_sets_error() {
        let api = Arc::new(MockApi::new());
        let (tx, rx) = mpsc::channel();
        let mut ctl: GridController<GridEvent> = GridController::new(api.clone(), tx);
        settle(&mut ctl, &rx);
        let shown = ctl.rows().len();
        assert!(shown > 0);

        api.set_fail_pages(true);
        ctl.refresh();
        settle(&mut ctl, &rx);

        assert_eq!(ctl.phase(), GridPhase::Errored);
        assert!(ctl.error().is_some());
        assert_eq!(ctl.rows().len(), shown);

        // Errored is not terminal: the next transition loads again and can
        // recover.
        api.set_fail_pages(false);
        ctl.set_page_index(1);
        assert_eq!(ctl.phase(), GridPhase::Loading);
        settle(&mut ctl, &rx);
        assert_eq!(ctl.phase(), GridPhase::Ready);
        assert!(ctl.error().is_none());
    }

    #[test]
    fn stale_outcome_is_ignored_entirely() {
        let (mut ctl, rx) = controller();
        let first = next_page_outcome(&rx);

        // Supersede the initial fetch before its outcome is applied.
        ctl.set_page_index(1);
        assert!(!ctl.on_fetch(first));
        assert!(ctl.is_loading());
        assert!(ctl.rows().is_empty());

        settle(&mut ctl, &rx);
        assert_eq!(ctl.phase(), GridPhase::Ready);
        assert_eq!(ctl.pagination().unwrap().current_page, 2);
    }

    #[test]
    fn identical_transition_is_not_reissued() {
        let (mut ctl, rx) = controller();
        settle(&mut ctl, &rx);

        // Already on the first page; navigating to it again changes nothing.
        ctl.set_page_index(0);
        assert_eq!(ctl.phase(), GridPhase::Ready);
        // Queued options completions may still drain, but no new page fetch
        // may appear.
        while let Ok(event) = rx.recv_timeout(Duration::from_millis(200)) {
            assert!(
                matches!(event, GridEvent::Options(_)),
                "no new fetch expected"
            );
        }
    }

    #[test]
    fn start_and_end_item_pagination_arithmetic() {
        let (mut ctl, rx) = controller();
        let sequence = next_page_outcome(&rx).sequence;

        let page = Page {
            rows: Vec::new(),
            pagination: Pagination {
                current_page: 3,
                total_pages: 3,
                total_items: 25,
                limit: 10,
            },
        };
        assert!(ctl.on_fetch(FetchOutcome {
            sequence,
            result: Ok(page),
        }));
        assert_eq!(ctl.start_item(), 21);
        assert_eq!(ctl.end_item(), 25);
        assert!(ctl.can_prev());
        assert!(!ctl.can_next());
    }

    #[test]
    fn empty_result_is_a_display_state_not_an_error() {
        let (mut ctl, rx) = controller();
        let sequence = next_page_outcome(&rx).sequence;

        let page = Page {
            rows: Vec::new(),
            pagination: Pagination {
                current_page: 1,
                total_pages: 0,
                total_items: 0,
                limit: 10,
            },
        };
        assert!(ctl.on_fetch(FetchOutcome {
            sequence,
            result: Ok(page),
        }));
        assert!(ctl.is_empty());
        assert!(ctl.error().is_none());
        assert_eq!(ctl.start_item(), 0);
        assert_eq!(ctl.end_item(), 0);
        assert!(!ctl.can_prev());
        assert!(!ctl.can_next());
    }

    #[test]
    fn row_numbering_is_page_relative() {
        let (mut ctl, rx) = controller();
        let sequence = next_page_outcome(&rx).sequence;
        let page = Page {
            rows: Vec::new(),
            pagination: Pagination {
                current_page: 3,
                total_pages: 5,
                total_items: 50,
                limit: 10,
            },
        };
        assert!(ctl.on_fetch(FetchOutcome {
            sequence,
            result: Ok(page),
        }));
        assert_eq!(ctl.row_number(0), 21);
        assert_eq!(ctl.row_number(9), 30);
    }

    #[test]
    fn failed_option_load_degrades_to_no_options() {
        let (mut ctl, _rx) = controller();
        ctl.on_options(OptionsOutcome {
            param: "gender".to_string(),
            result: Err(ApiError::Status(500)),
        });
        assert!(ctl.options_for("gender").is_empty());
        // The grid itself is unaffected.
        assert!(ctl.error().is_none());

        ctl.on_options(OptionsOutcome {
            param: "brandDevice".to_string(),
            result: Ok(vec!["Samsung".to_string(), "Apple".to_string()]),
        });
        assert_eq!(ctl.options_for("brandDevice").len(), 2);
    }
}

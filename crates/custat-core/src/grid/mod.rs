//! Remote-synchronized grid: query state, fetch sequencing, controller.
//!
//! The grid's view state (page, page size, sort, search, per-column
//! filters) lives in an immutable [`QueryState`] snapshot; every user
//! interaction produces a new snapshot and a sequenced fetch, and only the
//! response to the most recently issued request is ever applied — stale
//! in-flight responses are discarded by issuance order, not completion
//! order.

mod controller;
mod query;
mod sequencer;

pub use controller::{GridController, GridPhase, OptionsOutcome};
pub use query::{DEFAULT_PAGE_SIZE, PAGE_SIZES, QueryState, SortSpec};
pub use sequencer::{FetchOutcome, FetchSequencer, FetchTicket};

/// Union of the grid's asynchronous completions, for consumers that drive
/// a [`GridController`] from a single plain channel (tests, headless use).
/// The TUI has its own event enum with the same `From` conversions.
#[derive(Debug)]
pub enum GridEvent {
    Page(FetchOutcome),
    Options(OptionsOutcome),
}

impl From<FetchOutcome> for GridEvent {
    fn from(outcome: FetchOutcome) -> Self {
        GridEvent::Page(outcome)
    }
}

impl From<OptionsOutcome> for GridEvent {
    fn from(outcome: OptionsOutcome) -> Self {
        GridEvent::Options(outcome)
    }
}

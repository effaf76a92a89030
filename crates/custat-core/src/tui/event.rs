//! Event handling for the TUI.
//!
//! One mpsc channel carries everything: terminal input polled by a
//! background thread, timer ticks, and the completions of fetch worker
//! threads (page fetches, filter options, chart summaries, trends). All
//! state transitions are serialized through this single queue, so no state
//! is ever mutated concurrently.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};

use crate::api::ApiError;
use crate::grid::{FetchOutcome, OptionsOutcome};
use crate::models::{BrandCount, GenderAgeCount, GenderCount, LoginTrends};

/// Completion of one chart summary fetch.
#[derive(Debug)]
pub enum SummaryOutcome {
    Gender(Result<Vec<GenderCount>, ApiError>),
    GenderAge(Result<Vec<GenderAgeCount>, ApiError>),
    BrandDevice(Result<Vec<BrandCount>, ApiError>),
}

/// Completion of one login-trends fetch.
#[derive(Debug)]
pub struct TrendsOutcome {
    /// Date the request was issued for (`None` = server default day).
    pub requested: Option<NaiveDate>,
    pub result: Result<LoginTrends, ApiError>,
}

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// Timer tick (periodic redraw).
    Tick,
    /// Keyboard input.
    Key(KeyEvent),
    /// Terminal resize (width).
    Resize(u16),
    /// A page fetch completed (possibly stale; the controller decides).
    Page(FetchOutcome),
    /// A filter-options fetch completed.
    Options(OptionsOutcome),
    /// A chart summary fetch completed.
    Summary(SummaryOutcome),
    /// A login-trends fetch completed.
    Trends(TrendsOutcome),
}

impl From<FetchOutcome> for Event {
    fn from(outcome: FetchOutcome) -> Self {
        Event::Page(outcome)
    }
}

impl From<OptionsOutcome> for Event {
    fn from(outcome: OptionsOutcome) -> Self {
        Event::Options(outcome)
    }
}

impl From<SummaryOutcome> for Event {
    fn from(outcome: SummaryOutcome) -> Self {
        Event::Summary(outcome)
    }
}

impl From<TrendsOutcome> for Event {
    fn from(outcome: TrendsOutcome) -> Self {
        Event::Trends(outcome)
    }
}

/// Event handler that polls for terminal events in a separate thread.
///
/// Fetch worker threads obtain their own [`Sender`] via [`sender`] and feed
/// completions into the same queue.
///
/// [`sender`]: EventHandler::sender
pub struct EventHandler {
    rx: Receiver<Event>,
    tx: Sender<Event>,
}

impl EventHandler {
    /// Creates a new event handler with the specified tick rate.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();

        thread::spawn(move || {
            loop {
                // Poll for events with timeout
                if event::poll(tick_rate).unwrap_or(false) {
                    if let Ok(evt) = event::read() {
                        let event = match evt {
                            CrosstermEvent::Key(key) => Event::Key(key),
                            CrosstermEvent::Resize(w, _) => Event::Resize(w),
                            _ => continue,
                        };
                        if event_tx.send(event).is_err() {
                            break;
                        }
                    }
                } else {
                    // Timeout - send tick
                    if event_tx.send(Event::Tick).is_err() {
                        break;
                    }
                }
            }
        });

        Self { rx, tx }
    }

    /// A sender feeding this handler's queue, for fetch worker threads.
    pub fn sender(&self) -> Sender<Event> {
        self.tx.clone()
    }

    /// Receives the next event, blocking until one is available.
    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}

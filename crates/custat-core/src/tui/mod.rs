//! Terminal user interface for the custat dashboard.
//!
//! Tabbed ratatui frontend: the customer grid plus one tab per aggregate
//! chart. A single event queue carries terminal input, timer ticks, and
//! fetch completions, so every state transition runs on the UI thread.

mod app;
mod event;
mod input;
mod render;
pub(crate) mod state;
pub(crate) mod style;
mod widgets;

pub use app::App;
pub use event::{Event, EventHandler, SummaryOutcome, TrendsOutcome};
pub use state::{AppState, ChartLoad, InputMode, PopupState, Tab};

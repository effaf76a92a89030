//! custat-core — shared library for the custat dashboard.
//!
//! Provides:
//! - `models` — wire data models and field configuration
//! - `grid` — query state, fetch sequencing, grid controller
//! - `charts` — pure transforms behind the aggregate chart views
//! - `api` — remote data source abstraction (trait + mock)
//! - `fmt` — shared display formatting helpers
//!
//! With `client` feature (default):
//! - `api::http` — reqwest-backed implementation
//!
//! With `tui` feature (default):
//! - `tui` — TUI rendering (ratatui/crossterm), state, input, widgets

pub mod api;
pub mod charts;
pub mod fmt;
pub mod grid;
pub mod models;

#[cfg(feature = "tui")]
pub mod tui;

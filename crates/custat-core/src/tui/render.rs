//! Main rendering logic for the TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::fmt::format_count;

use super::state::{AppState, InputMode, PopupState, Tab};
use super::style::Styles;
use super::widgets::{
    render_customer_detail, render_customers, render_demographics, render_devices,
    render_filter_select, render_header, render_help, render_quit_confirm, render_trends,
    render_trends_date,
};

/// Main render function.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    // Main layout: header, content, footer
    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(8),    // Content area
        Constraint::Length(1), // Footer / status
    ])
    .split(area);

    render_header(frame, chunks[0], state);
    render_content(frame, chunks[1], state);
    render_footer(frame, chunks[2], state);

    // Popups (rendered last to overlay everything).
    match &state.popup {
        PopupState::Help { scroll } => render_help(frame, area, *scroll),
        PopupState::FilterSelect { field, selected } => {
            render_filter_select(frame, area, state, *field, *selected);
        }
        PopupState::CustomerDetail { scroll } => render_customer_detail(frame, area, state, *scroll),
        PopupState::QuitConfirm => render_quit_confirm(frame, area),
        PopupState::None => {}
    }

    // Trends date popup is tied to the input mode, not PopupState.
    if state.input_mode == InputMode::TrendsDate {
        render_trends_date(
            frame,
            area,
            &state.trends.input,
            state.trends.input_error.as_deref(),
        );
    }
}

/// Renders content based on current tab.
fn render_content(frame: &mut Frame, area: Rect, state: &mut AppState) {
    match state.current_tab {
        Tab::Customers => render_customers(frame, area, state),
        Tab::Demographics => render_demographics(frame, area, state),
        Tab::Devices => render_devices(frame, area, state),
        Tab::Trends => render_trends(frame, area, state),
    }
}

/// Footer: pagination summary on the left, error or key hints on the right.
fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::horizontal([Constraint::Min(40), Constraint::Length(52)]).split(area);

    let left = match state.current_tab {
        Tab::Customers => match state.grid.pagination() {
            Some(p) if p.total_items > 0 => Line::from(vec![
                Span::raw(format!(
                    "Showing {} - {} of {} items",
                    state.grid.start_item(),
                    state.grid.end_item(),
                    format_count(p.total_items)
                )),
                Span::styled(
                    format!("  page {}/{}  {}/page", p.current_page, p.total_pages, p.limit),
                    Styles::dim(),
                ),
            ]),
            Some(_) => Line::from(Span::styled("No items to display.", Styles::empty())),
            None => Line::from(""),
        },
        Tab::Trends => match state.trends.date {
            Some(date) => Line::from(format!("Logins on {}", date.format("%Y-%m-%d"))),
            None => Line::from(""),
        },
        _ => Line::from(""),
    };
    frame.render_widget(Paragraph::new(left), chunks[0]);

    let right = if let Some(error) = state.grid.error() {
        Line::from(Span::styled(format!("Error: {}", error), Styles::error()))
    } else {
        let hints = match state.current_tab {
            Tab::Customers => "/ search  f filter  s/r sort  n/p page  z size  ? help",
            Tab::Trends => "d date  ? help  q quit",
            _ => "Tab switch  ? help  q quit",
        };
        Line::from(Span::styled(hints, Styles::dim()))
    };
    frame.render_widget(Paragraph::new(right).right_aligned(), chunks[1]);
}

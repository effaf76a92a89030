//! Header bar: title, tabs, loading indicator, search/status.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::state::{AppState, InputMode, Tab};
use crate::tui::style::Styles;

/// Renders the header bar.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::horizontal([
        Constraint::Length(9),  // Title
        Constraint::Min(24),    // Tabs
        Constraint::Length(12), // Loading indicator
        Constraint::Length(40), // Search input / status
    ])
    .split(area);

    let title = Paragraph::new(" custat ").style(Styles::header());
    frame.render_widget(title, chunks[0]);

    // Tabs
    let tabs: Vec<Span> = Tab::all()
        .iter()
        .enumerate()
        .flat_map(|(i, tab)| {
            let style = if *tab == state.current_tab {
                Styles::tab_active()
            } else {
                Styles::tab_inactive()
            };
            let num = format!(" {}:", i + 1);
            let name = format!("{} ", tab.name());
            vec![Span::styled(num, Styles::dim()), Span::styled(name, style)]
        })
        .collect();
    let tabs_widget = Paragraph::new(Line::from(tabs)).style(Styles::header());
    frame.render_widget(tabs_widget, chunks[1]);

    // Loading indicator: previously displayed rows stay on screen while a
    // fetch is outstanding.
    let loading = if state.grid.is_loading() {
        Paragraph::new(" Loading ...").style(Styles::loading())
    } else {
        Paragraph::new("").style(Styles::header())
    };
    frame.render_widget(loading, chunks[2]);

    // Search input, status message, or the applied search
    let (right_content, right_style) = if state.input_mode == InputMode::Search {
        (format!("Search: {}█", state.search_input), Styles::input())
    } else if let Some(msg) = &state.status_message {
        (msg.clone(), Styles::loading())
    } else if !state.grid.query().search.is_empty() {
        (format!("/{}", state.grid.query().search), Styles::header())
    } else {
        (String::new(), Styles::header())
    };
    let right = Paragraph::new(right_content).style(right_style);
    frame.render_widget(right, chunks[3]);
}

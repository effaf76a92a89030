//! Filter selection popup (CUS tab).
//!
//! One column of values per filterable field; the option lists come from
//! the one-time filter-options fetch. A field whose options failed to load
//! degrades to its "All" entry only.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::models::FILTER_FIELDS;
use crate::tui::state::AppState;
use crate::tui::style::Styles;

use super::centered_popup;

pub fn render_filter_select(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    field: usize,
    selected: usize,
) {
    let field_spec = &FILTER_FIELDS[field];
    let options = state.grid.options_for(field_spec.param);

    let height = (options.len() as u16 + 7).clamp(9, area.height);
    let popup_area = centered_popup(area, 40, height);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" Filter: {} ", field_spec.label))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut lines: Vec<Line> = Vec::new();

    // Field switcher strip
    let fields: Vec<Span> = FILTER_FIELDS
        .iter()
        .enumerate()
        .map(|(i, f)| {
            let style = if i == field {
                Styles::tab_active()
            } else {
                Styles::tab_inactive()
            };
            Span::styled(format!(" {} ", f.label), style)
        })
        .collect();
    lines.push(Line::from(fields));
    lines.push(Line::from(""));

    // Option list: "All" first, then the known values.
    let applied = state.grid.query().filters.get(field_spec.param);
    let mut entries = vec!["All".to_string()];
    entries.extend(options.iter().cloned());
    for (i, entry) in entries.iter().enumerate() {
        let marker = match applied {
            None if i == 0 => "●",
            Some(value) if *value == *entry => "●",
            _ => " ",
        };
        let style = if i == selected {
            Styles::selected()
        } else {
            Styles::default()
        };
        lines.push(Line::from(Span::styled(
            format!(" {} {}", marker, entry),
            style,
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::styled(" apply   ", Styles::dim()),
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::styled(" field   ", Styles::dim()),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(" cancel", Styles::dim()),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

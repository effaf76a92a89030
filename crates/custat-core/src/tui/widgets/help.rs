//! Help popup.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::style::Styles;

use super::centered_popup;

const BINDINGS: &[(&str, &str)] = &[
    ("Tab / Shift-Tab", "next / previous tab"),
    ("1-4", "jump to tab"),
    ("j / k, ↑ / ↓", "move row selection"),
    ("n / p, → / ←", "next / previous page"),
    ("z", "cycle page size (10/25/50/100)"),
    ("s", "sort by the next column"),
    ("r", "reverse the sort direction"),
    ("/", "search all columns (live)"),
    ("f", "filter by field value"),
    ("Enter", "customer detail"),
    ("u", "refresh the table"),
    ("d", "pick trends date (TRD tab)"),
    ("?", "toggle this help"),
    ("q", "quit"),
];

pub fn render_help(frame: &mut Frame, area: Rect, scroll: usize) {
    let popup_area = centered_popup(area, 50, BINDINGS.len() as u16 + 4);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let lines: Vec<Line> = BINDINGS
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("  {:<16}", keys), Style::default().fg(Color::Yellow)),
                Span::styled(*action, Styles::default()),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).scroll((scroll as u16, 0));
    frame.render_widget(paragraph, inner);
}

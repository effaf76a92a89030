//! Quit confirmation dialog.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::centered_popup;

pub fn render_quit_confirm(frame: &mut Frame, area: Rect) {
    let popup_area = centered_popup(area, 40, 5);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Quit ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let lines = vec![
        Line::from("Quit custat?"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter/q", Style::default().fg(Color::Yellow)),
            Span::styled(" yes   ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc/n", Style::default().fg(Color::Yellow)),
            Span::styled(" no", Style::default().fg(Color::DarkGray)),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        inner,
    );
}

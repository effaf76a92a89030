//! Device brand distribution chart (DEV tab).

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph};

use crate::tui::state::AppState;
use crate::tui::style::Styles;

use super::chart_body;

pub fn render_devices(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Brand Device Distribution ")
        .borders(Borders::ALL)
        .style(Styles::default());

    let breakdown = match chart_body(frame, area, &block, &state.brand_chart) {
        Some(data) if !data.is_empty() => data,
        Some(_) => {
            frame.render_widget(
                Paragraph::new("No brand device summary data available.")
                    .style(Styles::empty())
                    .block(block),
                area,
            );
            return;
        }
        None => return,
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Chart on top, share legend below.
    let legend_height = breakdown.entries.len().min(8) as u16;
    let chunks =
        Layout::vertical([Constraint::Min(5), Constraint::Length(legend_height)]).split(inner);

    let bars: Vec<Bar> = breakdown
        .entries
        .iter()
        .enumerate()
        .map(|(i, (label, count))| {
            Bar::default()
                .label(Line::from(label.clone()))
                .value(*count)
                .style(Styles::series(i))
        })
        .collect();
    let chart = BarChart::default()
        .bar_width(8)
        .bar_gap(2)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, chunks[0]);

    let legend: Vec<Line> = breakdown
        .entries
        .iter()
        .enumerate()
        .map(|(i, (label, count))| {
            Line::from(vec![
                Span::styled("■ ", Styles::series(i)),
                Span::raw(format!(
                    "{}: {} ({:.2}%)",
                    label,
                    count,
                    breakdown.percentage(*count)
                )),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(legend), chunks[1]);
}

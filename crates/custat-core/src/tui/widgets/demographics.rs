//! Demographics charts (DEM tab): gender distribution and gender by age
//! group.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph};

use crate::charts::{AgeGroupMatrix, Breakdown};
use crate::tui::state::{AppState, ChartLoad};
use crate::tui::style::Styles;

use super::chart_body;

pub fn render_demographics(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks =
        Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)]).split(area);

    render_gender(frame, chunks[0], &state.gender_chart);
    render_gender_age(frame, chunks[1], &state.age_chart);
}

fn render_gender(frame: &mut Frame, area: Rect, load: &ChartLoad<Breakdown>) {
    let block = Block::default()
        .title(" Gender Distribution ")
        .borders(Borders::ALL)
        .style(Styles::default());

    let breakdown = match chart_body(frame, area, &block, load) {
        Some(data) if !data.is_empty() => data,
        Some(_) => {
            frame.render_widget(
                Paragraph::new("No gender summary data available.")
                    .style(Styles::empty())
                    .block(block),
                area,
            );
            return;
        }
        None => return,
    };

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
        .block(block)
        .bar_width(9)
        .bar_gap(2)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

fn render_gender_age(frame: &mut Frame, area: Rect, load: &ChartLoad<AgeGroupMatrix>) {
    let block = Block::default()
        .title(" Gender by Age Group ")
        .borders(Borders::ALL)
        .style(Styles::default());

    let matrix = match chart_body(frame, area, &block, load) {
        Some(data) if !data.is_empty() => data,
        Some(_) => {
            frame.render_widget(
                Paragraph::new("No gender summary data available.")
                    .style(Styles::empty())
                    .block(block),
                area,
            );
            return;
        }
        None => return,
    };

    // One group per age bracket, one bar per gender within it.
    let mut chart = BarChart::default()
        .block(block)
        .bar_width(4)
        .bar_gap(1)
        .group_gap(3);
    for (group_idx, group) in matrix.groups.iter().enumerate() {
        let bars: Vec<Bar> = matrix
            .series
            .iter()
            .enumerate()
            .map(|(series_idx, (_, counts))| {
                Bar::default()
                    .value(counts.get(group_idx).copied().unwrap_or(0))
                    .style(Styles::series(series_idx))
            })
            .collect();
        chart = chart.data(BarGroup::default().label(Line::from(group.clone())).bars(&bars));
    }
    frame.render_widget(chart, area);
}

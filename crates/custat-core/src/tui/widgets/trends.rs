//! Login trends line chart (TRD tab): hourly logins for one day.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::symbols;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};

use crate::tui::state::AppState;
use crate::tui::style::Styles;

use super::chart_body;

pub fn render_trends(frame: &mut Frame, area: Rect, state: &AppState) {
    let title = match state.trends.date {
        Some(date) => format!(" Login Trends — {} ", date.format("%Y-%m-%d")),
        None => " Login Trends ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Styles::default());

    let series = match chart_body(frame, area, &block, &state.trends.load) {
        Some(data) if !data.is_empty() => data,
        Some(_) => {
            frame.render_widget(
                Paragraph::new("No data").style(Styles::empty()).block(block),
                area,
            );
            return;
        }
        None => return,
    };

    let points: Vec<(f64, f64)> = series
        .counts
        .iter()
        .enumerate()
        .map(|(hour, count)| (hour as f64, *count as f64))
        .collect();
    let max = series.max().max(1);

    let dataset = Dataset::default()
        .name("logins")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Styles::series(0))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .title("Hour of Day")
                .style(Styles::dim())
                .bounds([0.0, 23.0])
                .labels(["0:00", "6:00", "12:00", "18:00", "23:00"]),
        )
        .y_axis(
            Axis::default()
                .title("Logins")
                .style(Styles::dim())
                .bounds([0.0, max as f64])
                .labels(["0".to_string(), (max / 2).to_string(), max.to_string()]),
        );
    frame.render_widget(chart, area);
}

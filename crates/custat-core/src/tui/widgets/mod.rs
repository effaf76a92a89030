//! TUI widgets.

mod customers;
mod demographics;
mod detail;
mod devices;
mod filter_select;
mod header;
mod help;
mod quit_confirm;
mod trends;
mod trends_date;

pub use customers::render_customers;
pub use demographics::render_demographics;
pub use detail::render_customer_detail;
pub use devices::render_devices;
pub use filter_select::render_filter_select;
pub use header::render_header;
pub use help::render_help;
pub use quit_confirm::render_quit_confirm;
pub use trends::render_trends;
pub use trends_date::render_trends_date;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::{Block, Paragraph};

use super::state::ChartLoad;
use super::style::Styles;

/// Shared loading/error handling for the chart leaves: returns the data
/// when ready, otherwise renders the placeholder and returns `None`.
pub(crate) fn chart_body<'a, T>(
    frame: &mut Frame,
    area: Rect,
    block: &Block,
    load: &'a ChartLoad<T>,
) -> Option<&'a T> {
    match load {
        ChartLoad::Ready(data) => Some(data),
        ChartLoad::Loading => {
            frame.render_widget(
                Paragraph::new("Loading chart...")
                    .style(Styles::loading())
                    .block(block.clone()),
                area,
            );
            None
        }
        ChartLoad::Failed(error) => {
            frame.render_widget(
                Paragraph::new(format!("Failed to load: {}", error))
                    .style(Styles::error())
                    .block(block.clone()),
                area,
            );
            None
        }
    }
}

/// Centered popup area: `percent_width` of `area`, clamped, `height` rows.
pub(crate) fn centered_popup(area: Rect, percent_width: u16, height: u16) -> Rect {
    let width = (area.width * percent_width / 100).clamp(40, 90).min(area.width);
    let height = height.min(area.height);
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

//! Customer detail popup (CUS tab).

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::fmt::{current_year, derived_age, format_login_date};
use crate::tui::state::AppState;
use crate::tui::style::Styles;

use super::centered_popup;

pub fn render_customer_detail(frame: &mut Frame, area: Rect, state: &AppState, scroll: usize) {
    let Some(customer) = state.selected_customer() else {
        return;
    };

    let popup_area = centered_popup(area, 60, 16);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" Customer #{} ", customer.number))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let detail = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<18}", label), Styles::dim()),
            Span::raw(value),
        ])
    };

    let lines = vec![
        detail("Name", customer.name.clone()),
        detail("Email", customer.email.clone()),
        detail("Phone", customer.phone.clone()),
        detail("Gender", customer.gender.clone()),
        detail(
            "Age",
            format!(
                "{} (born {})",
                derived_age(customer.age, current_year()),
                customer.age
            ),
        ),
        detail("Location", customer.location_name.clone()),
        detail("Location Type", customer.location_type.clone()),
        detail("Brand Device", customer.brand_device.clone()),
        detail("Digital Interest", customer.digital_interest.clone()),
        detail("Login Date", format_login_date(&customer.login_date)),
        detail("Login Hour", customer.login_hour.clone()),
        Line::from(""),
        Line::from(Span::styled("Esc close   j/k scroll", Styles::dim())),
    ];

    let paragraph = Paragraph::new(lines).scroll((scroll as u16, 0));
    frame.render_widget(paragraph, inner);
}

//! Customer table widget (CUS tab).

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table};

use crate::fmt::{current_year, derived_age, format_login_date};
use crate::models::{COLUMNS, Customer};
use crate::tui::state::AppState;
use crate::tui::style::Styles;

/// Renders the customer table with sort indicator and selection.
pub fn render_customers(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let block = Block::default()
        .title(" Customer Data ")
        .borders(Borders::ALL)
        .style(Styles::default());

    if state.grid.rows().is_empty() {
        // Distinct affordances: first load vs an empty result set. An error
        // with no rows to fall back on lands here too (message in footer).
        let message = if state.grid.is_empty() {
            Paragraph::new("No data available with current filters.").style(Styles::empty())
        } else if state.grid.is_loading() {
            Paragraph::new("Loading ...").style(Styles::loading())
        } else {
            Paragraph::new("").style(Styles::default())
        };
        frame.render_widget(message.block(block), area);
        return;
    }

    // Header with sort indicator
    let sort = &state.grid.query().sort;
    let headers: Vec<Span> = COLUMNS
        .iter()
        .map(|col| {
            let indicator = match (sort, col.sort_field) {
                (Some(s), Some(field)) if s.field == field => {
                    if s.descending { "▼" } else { "▲" }
                }
                _ => "",
            };
            Span::styled(format!("{}{}", col.header, indicator), Styles::table_header())
        })
        .collect();
    let header = Row::new(headers).style(Styles::table_header()).height(1);

    let year = current_year();
    let rows: Vec<Row> = state
        .grid
        .rows()
        .iter()
        .enumerate()
        .map(|(idx, customer)| {
            let cells = row_cells(customer, state.grid.row_number(idx), year);
            Row::new(cells.into_iter().map(Span::raw)).height(1)
        })
        .collect();

    let constraints: Vec<Constraint> = COLUMNS
        .iter()
        .map(|col| Constraint::Length(col.width))
        .collect();

    let table = Table::new(rows, constraints)
        .header(header)
        .block(block)
        .column_spacing(1)
        .row_highlight_style(Styles::selected());

    state.table_state.select(Some(state.selected_row));
    frame.render_widget(Clear, area);
    frame.render_stateful_widget(table, area, &mut state.table_state);
}

/// Cell texts for one row, aligned with [`COLUMNS`]. Display transforms
/// only — the stored row is untouched.
fn row_cells(customer: &Customer, row_number: u64, year: i32) -> Vec<String> {
    vec![
        row_number.to_string(),
        customer.name.clone(),
        customer.email.clone(),
        customer.gender.clone(),
        derived_age(customer.age, year).to_string(),
        customer.location_name.clone(),
        customer.location_type.clone(),
        customer.brand_device.clone(),
        customer.digital_interest.clone(),
        format_login_date(&customer.login_date),
        customer.login_hour.clone(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> Customer {
        Customer {
            number: 1,
            name: "Ava Carter".to_string(),
            email: "ava@example.com".to_string(),
            gender: "Female".to_string(),
            age: 1990,
            phone: "0812".to_string(),
            location_name: "Central Mall".to_string(),
            location_type: "urban".to_string(),
            brand_device: "Samsung".to_string(),
            digital_interest: "Gaming".to_string(),
            login_date: "12/29/2023".to_string(),
            login_hour: "13:44".to_string(),
        }
    }

    #[test]
    fn cells_line_up_with_the_column_table() {
        let cells = row_cells(&customer(), 21, 2026);
        assert_eq!(cells.len(), COLUMNS.len());
        assert_eq!(cells[0], "21");
        assert_eq!(cells[4], "36");
        assert_eq!(cells[9], "December 29, 2023");
    }
}

//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::grid::PAGE_SIZES;
use crate::models::{COLUMNS, FILTER_FIELDS};

use super::state::{AppState, InputMode, PopupState, Tab};

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Fetch trends for the date typed into the date popup.
    ApplyTrendsDate,
}

/// Handles key input and updates state.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if matches!(state.popup, PopupState::QuitConfirm) {
        return handle_quit_confirm(state, key);
    }
    match state.input_mode {
        InputMode::Normal => handle_normal_mode(state, key),
        InputMode::Search => handle_search_mode(state, key),
        InputMode::TrendsDate => handle_trends_date_mode(state, key),
    }
}

fn handle_quit_confirm(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.popup = PopupState::None;
            KeyAction::Quit
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.popup = PopupState::None;
            KeyAction::Quit
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            state.popup = PopupState::None;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// Handles keys in normal mode.
fn handle_normal_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if let PopupState::FilterSelect { .. } = state.popup {
        return handle_filter_select(state, key);
    }

    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.popup = PopupState::QuitConfirm;
            KeyAction::None
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,

        // Tab navigation (blocked while a tab-specific popup is open)
        KeyCode::Tab
        | KeyCode::BackTab
        | KeyCode::Char('1')
        | KeyCode::Char('2')
        | KeyCode::Char('3')
        | KeyCode::Char('4')
            if matches!(state.popup, PopupState::CustomerDetail { .. }) =>
        {
            state.status_message = Some("Close popup (Esc) before switching tabs".to_string());
            KeyAction::None
        }
        KeyCode::Tab => {
            state.switch_tab(state.current_tab.next());
            KeyAction::None
        }
        KeyCode::BackTab => {
            state.switch_tab(state.current_tab.prev());
            KeyAction::None
        }
        KeyCode::Char('1') => {
            state.switch_tab(Tab::Customers);
            KeyAction::None
        }
        KeyCode::Char('2') => {
            state.switch_tab(Tab::Demographics);
            KeyAction::None
        }
        KeyCode::Char('3') => {
            state.switch_tab(Tab::Devices);
            KeyAction::None
        }
        KeyCode::Char('4') => {
            state.switch_tab(Tab::Trends);
            KeyAction::None
        }

        // Row navigation (or popup scroll if a scrollable popup is open)
        KeyCode::Up | KeyCode::Char('k') => {
            match &mut state.popup {
                PopupState::Help { scroll } | PopupState::CustomerDetail { scroll } => {
                    *scroll = scroll.saturating_sub(1);
                }
                _ => state.select_up(),
            }
            KeyAction::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            match &mut state.popup {
                PopupState::Help { scroll } | PopupState::CustomerDetail { scroll } => {
                    *scroll = scroll.saturating_add(1);
                }
                _ => state.select_down(),
            }
            KeyAction::None
        }
        KeyCode::Home => {
            state.select_first();
            KeyAction::None
        }
        KeyCode::End => {
            state.select_last();
            KeyAction::None
        }

        // Page navigation (CUS tab)
        KeyCode::Right | KeyCode::Char('n') => {
            if state.current_tab == Tab::Customers && state.grid.can_next() {
                let index = state.grid.query().page_index;
                state.grid.set_page_index(index + 1);
                state.select_first();
            }
            KeyAction::None
        }
        KeyCode::Left | KeyCode::Char('p') => {
            if state.current_tab == Tab::Customers && state.grid.can_prev() {
                let index = state.grid.query().page_index;
                state.grid.set_page_index(index.saturating_sub(1));
                state.select_first();
            }
            KeyAction::None
        }

        // Page size cycle (CUS tab)
        KeyCode::Char('z') | KeyCode::Char('Z') => {
            if state.current_tab == Tab::Customers {
                state.grid.set_page_size(next_page_size(state.grid.query().page_size));
                state.select_first();
            }
            KeyAction::None
        }

        // Sorting (CUS tab): s cycles the sorted column, r flips direction
        KeyCode::Char('s') | KeyCode::Char('S') => {
            if state.current_tab == Tab::Customers
                && let Some(field) = next_sort_field(state)
            {
                state.grid.set_sort(&field);
                state.select_first();
            }
            KeyAction::None
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            if state.current_tab == Tab::Customers
                && let Some(sort) = state.grid.query().sort.clone()
            {
                // Re-selecting the current field flips the direction.
                state.grid.set_sort(&sort.field);
                state.select_first();
            }
            KeyAction::None
        }

        // Search mode (CUS tab)
        KeyCode::Char('/') => {
            if state.current_tab == Tab::Customers {
                state.input_mode = InputMode::Search;
                state.search_input.clear();
            }
            KeyAction::None
        }

        // Filter popup (CUS tab)
        KeyCode::Char('f') | KeyCode::Char('F') => {
            if state.current_tab == Tab::Customers {
                state.popup = PopupState::FilterSelect {
                    field: 0,
                    selected: applied_option_index(state, 0),
                };
            }
            KeyAction::None
        }

        // Manual refresh
        KeyCode::Char('u') | KeyCode::Char('U') => {
            if state.current_tab == Tab::Customers {
                state.grid.refresh();
            }
            KeyAction::None
        }

        // Trends date entry (TRD tab)
        KeyCode::Char('d') | KeyCode::Char('D') => {
            if state.current_tab == Tab::Trends {
                state.input_mode = InputMode::TrendsDate;
                state.trends.input.clear();
                state.trends.input_error = None;
            }
            KeyAction::None
        }

        // Customer detail popup (Enter on CUS tab)
        KeyCode::Enter => {
            if state.current_tab == Tab::Customers {
                state.popup = match state.popup {
                    PopupState::CustomerDetail { .. } => PopupState::None,
                    _ if state.selected_customer().is_some() => {
                        PopupState::CustomerDetail { scroll: 0 }
                    }
                    _ => PopupState::None,
                };
            }
            KeyAction::None
        }

        // Help
        KeyCode::Char('?') | KeyCode::Char('H') => {
            state.popup = match state.popup {
                PopupState::Help { .. } => PopupState::None,
                _ => PopupState::Help { scroll: 0 },
            };
            KeyAction::None
        }

        // Close popups with Escape
        KeyCode::Esc => {
            state.status_message = None;
            if state.popup.is_open() {
                state.popup = PopupState::None;
            }
            KeyAction::None
        }

        _ => KeyAction::None,
    }
}

/// Handles keys in search mode. The search is applied live: every edit
/// issues a sequenced fetch, and the sequencer discards whatever becomes
/// stale.
fn handle_search_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => {
            // Cancel search
            state.input_mode = InputMode::Normal;
            state.search_input.clear();
            state.grid.set_search("");
            state.select_first();
            KeyAction::None
        }
        KeyCode::Enter => {
            // Confirm search and return to normal mode
            state.input_mode = InputMode::Normal;
            KeyAction::None
        }
        KeyCode::Backspace => {
            state.search_input.pop();
            let text = state.search_input.clone();
            state.grid.set_search(&text);
            state.select_first();
            KeyAction::None
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(KeyModifiers::ALT)
            {
                return KeyAction::None;
            }
            state.search_input.push(c);
            let text = state.search_input.clone();
            state.grid.set_search(&text);
            state.select_first();
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

fn handle_trends_date_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => {
            state.input_mode = InputMode::Normal;
            state.trends.input.clear();
            state.trends.input_error = None;
            KeyAction::None
        }
        KeyCode::Enter => KeyAction::ApplyTrendsDate,
        KeyCode::Backspace => {
            state.trends.input.pop();
            state.trends.input_error = None;
            KeyAction::None
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(KeyModifiers::ALT)
            {
                return KeyAction::None;
            }
            state.trends.input.push(c);
            state.trends.input_error = None;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// Handles keys while the filter selection popup is open.
fn handle_filter_select(state: &mut AppState, key: KeyEvent) -> KeyAction {
    let PopupState::FilterSelect { field, selected } = state.popup else {
        return KeyAction::None;
    };
    // One "All" entry ahead of the known option values.
    let option_count = state.grid.options_for(FILTER_FIELDS[field].param).len() + 1;

    match key.code {
        KeyCode::Esc => {
            state.popup = PopupState::None;
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => {
            let field = (field + FILTER_FIELDS.len() - 1) % FILTER_FIELDS.len();
            state.popup = PopupState::FilterSelect {
                field,
                selected: applied_option_index(state, field),
            };
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
            let field = (field + 1) % FILTER_FIELDS.len();
            state.popup = PopupState::FilterSelect {
                field,
                selected: applied_option_index(state, field),
            };
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.popup = PopupState::FilterSelect {
                field,
                selected: selected.saturating_sub(1),
            };
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.popup = PopupState::FilterSelect {
                field,
                selected: (selected + 1).min(option_count - 1),
            };
        }
        KeyCode::Enter => {
            let field_spec = &FILTER_FIELDS[field];
            let value = if selected == 0 {
                // "All" removes the filter.
                String::new()
            } else {
                state
                    .grid
                    .options_for(field_spec.param)
                    .get(selected - 1)
                    .cloned()
                    .unwrap_or_default()
            };
            state.grid.set_filter(field_spec.param, &value);
            state.select_first();
            state.popup = PopupState::None;
        }
        _ => {}
    }
    KeyAction::None
}

/// Index of the currently applied filter value in the popup's option list
/// (0 = "All" when no filter is applied).
fn applied_option_index(state: &AppState, field: usize) -> usize {
    let field_spec = &FILTER_FIELDS[field];
    match state.grid.query().filters.get(field_spec.param) {
        Some(applied) => state
            .grid
            .options_for(field_spec.param)
            .iter()
            .position(|v| v == applied)
            .map(|i| i + 1)
            .unwrap_or(0),
        None => 0,
    }
}

/// Next page size in the cycle 10 → 25 → 50 → 100 → 10.
fn next_page_size(current: usize) -> usize {
    let pos = PAGE_SIZES.iter().position(|&s| s == current);
    match pos {
        Some(i) => PAGE_SIZES[(i + 1) % PAGE_SIZES.len()],
        None => PAGE_SIZES[0],
    }
}

/// Field of the next sortable column after the currently sorted one.
fn next_sort_field(state: &AppState) -> Option<String> {
    let sortable: Vec<&str> = COLUMNS.iter().filter_map(|c| c.sort_field).collect();
    if sortable.is_empty() {
        return None;
    }
    let next = match &state.grid.query().sort {
        Some(sort) => match sortable.iter().position(|f| *f == sort.field) {
            Some(i) => sortable[(i + 1) % sortable.len()],
            None => sortable[0],
        },
        None => sortable[0],
    };
    Some(next.to_string())
}

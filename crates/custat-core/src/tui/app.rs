//! Main TUI application.

use std::io;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::api::CustomerApi;
use crate::grid::GridController;

use super::event::{Event, EventHandler, SummaryOutcome, TrendsOutcome};
use super::input::{KeyAction, handle_key};
use super::render::render;
use super::state::{AppState, ChartLoad, InputMode};

/// Main TUI application.
pub struct App {
    api: Arc<dyn CustomerApi>,
    events: EventHandler,
    state: AppState,
    should_quit: bool,
}

impl App {
    /// Creates the app: the grid fires its initial page and filter-option
    /// fetches, and each chart leaf fires its one-time summary fetch.
    pub fn new(api: Arc<dyn CustomerApi>, tick_rate: Duration) -> Self {
        let events = EventHandler::new(tick_rate);
        let grid = GridController::new(Arc::clone(&api), events.sender());
        let app = Self {
            state: AppState::new(grid),
            api,
            events,
            should_quit: false,
        };
        app.spawn_chart_fetches();
        app
    }

    /// Runs the TUI application.
    pub fn run(mut self) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Main loop
        loop {
            terminal.draw(|frame| render(frame, &mut self.state))?;

            match self.events.next() {
                Ok(Event::Tick) => {}
                Ok(Event::Key(key)) => match handle_key(&mut self.state, key) {
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::ApplyTrendsDate => self.apply_trends_date(),
                    KeyAction::None => {}
                },
                Ok(Event::Resize(_)) => {}
                Ok(Event::Page(outcome)) => {
                    if self.state.grid.on_fetch(outcome) {
                        self.state.clamp_selection();
                    }
                }
                Ok(Event::Options(outcome)) => self.state.grid.on_options(outcome),
                Ok(Event::Summary(outcome)) => self.state.apply_summary(outcome),
                Ok(Event::Trends(outcome)) => self.state.apply_trends(outcome),
                Err(_) => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    /// One-time summary fetch per chart leaf, plus the initial trends fetch
    /// for the server's default day. Fire-and-forget; each leaf fails on
    /// its own.
    fn spawn_chart_fetches(&self) {
        let tx = self.events.sender();

        let api = Arc::clone(&self.api);
        let gender_tx = tx.clone();
        thread::spawn(move || {
            let result = api.gender_summary();
            let _ = gender_tx.send(Event::from(SummaryOutcome::Gender(result)));
        });

        let api = Arc::clone(&self.api);
        let age_tx = tx.clone();
        thread::spawn(move || {
            let result = api.gender_age_summary();
            let _ = age_tx.send(Event::from(SummaryOutcome::GenderAge(result)));
        });

        let api = Arc::clone(&self.api);
        let brand_tx = tx.clone();
        thread::spawn(move || {
            let result = api.brand_device_summary();
            let _ = brand_tx.send(Event::from(SummaryOutcome::BrandDevice(result)));
        });

        self.spawn_trends_fetch(tx, None);
    }

    fn spawn_trends_fetch(&self, tx: Sender<Event>, date: Option<NaiveDate>) {
        let api = Arc::clone(&self.api);
        thread::spawn(move || {
            let result = api.login_trends(date);
            let _ = tx.send(Event::from(TrendsOutcome {
                requested: date,
                result,
            }));
        });
    }

    /// Parse the typed date and re-fetch the trends leaf for it.
    fn apply_trends_date(&mut self) {
        let input = self.state.trends.input.trim();
        match NaiveDate::parse_from_str(input, "%Y-%m-%d") {
            Ok(date) => {
                self.state.input_mode = InputMode::Normal;
                self.state.trends.input.clear();
                self.state.trends.input_error = None;
                self.state.trends.date = Some(date);
                self.state.trends.requested = Some(date);
                self.state.trends.load = ChartLoad::Loading;
                self.spawn_trends_fetch(self.events.sender(), Some(date));
            }
            Err(_) => {
                self.state.trends.input_error = Some("expected YYYY-MM-DD".to_string());
            }
        }
    }
}

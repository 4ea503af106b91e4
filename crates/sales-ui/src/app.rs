//! Dashboard application state and TUI event loop.
//!
//! [`App`] owns the loaded snapshot and the region picker.  Every selector
//! change recomputes the [`DashboardView`] from the snapshot; nothing is
//! re-read from disk.

use std::io;
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame, Terminal,
};
use tracing::debug;

use sales_core::models::{RegionFilter, SalesRecord};
use sales_data::analysis::{dashboard_view, DashboardView};

use crate::chart_view;
use crate::components::{Header, RegionPicker};
use crate::insights_view;
use crate::themes::Theme;

const KEY_HINT: &str = "←/→ change region · 1-5 jump · q quit";

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the sales dashboard.
pub struct App {
    pub theme: Theme,
    pub product: String,
    pub cutoff: NaiveDate,
    pub picker: RegionPicker,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    snapshot: Vec<SalesRecord>,
    view: DashboardView,
}

impl App {
    pub fn new(
        theme_name: &str,
        product: String,
        cutoff: NaiveDate,
        snapshot: Vec<SalesRecord>,
        initial: &RegionFilter,
    ) -> Self {
        let picker = RegionPicker::from_filter(initial);
        let view = dashboard_view(&snapshot, &picker.filter(), cutoff);
        Self {
            theme: Theme::from_name(theme_name),
            product,
            cutoff,
            picker,
            should_quit: false,
            snapshot,
            view,
        }
    }

    pub fn selected_filter(&self) -> RegionFilter {
        self.picker.filter()
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    /// Apply one key press.  Returns `true` when the selection changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        let before = self.picker.selected_index();
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => self.picker.next(),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => self.picker.previous(),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                self.picker.select(index);
            }
            _ => {}
        }

        let changed = self.picker.selected_index() != before;
        if changed {
            self.refresh();
        }
        changed
    }

    /// Recompute the view for the current selection.
    pub fn refresh(&mut self) {
        let filter = self.picker.filter();
        self.view = dashboard_view(&self.snapshot, &filter, self.cutoff);
        debug!(
            region = self.picker.value(),
            days = self.view.totals.len(),
            "Dashboard view refreshed"
        );
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the interactive dashboard until the user quits.
    ///
    /// Returns the selection active at exit so the caller can persist it.
    pub fn run(mut self) -> io::Result<RegionFilter> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => {
                        self.handle_key(key);
                    }
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                break Ok(self.selected_filter());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the full dashboard into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let [header, picker, totals, regions, insights, footer] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Min(8),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let header_lines = Header::new(&self.product, self.cutoff, &self.theme).to_lines();
        frame.render_widget(Paragraph::new(header_lines), header);

        self.render_picker(frame, picker);

        let title = format!("Total Daily Sales ({})", self.view.filter.label());
        chart_view::render_sales_chart(frame, totals, &title, &self.view.totals, self.cutoff, &self.theme);
        chart_view::render_regional_chart(frame, regions, &self.view.regions, self.cutoff, &self.theme);
        insights_view::render_insights(frame, insights, &self.view.summary, self.cutoff, &self.theme);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(KEY_HINT, self.theme.dim))),
            footer,
        );
    }

    fn render_picker(&self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title("Select Region")
            .border_style(self.theme.border);
        frame.render_widget(Paragraph::new(self.picker.to_line(&self.theme)).block(block), area);
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use rust_decimal::Decimal;
    use sales_core::models::Region;

    fn record(day: u32, sales: i64, region: Region) -> SalesRecord {
        SalesRecord {
            sales: Decimal::from(sales),
            date: NaiveDate::from_ymd_opt(2021, 1, day).unwrap(),
            region,
        }
    }

    fn snapshot() -> Vec<SalesRecord> {
        vec![
            record(10, 30, Region::North),
            record(10, 10, Region::South),
            record(20, 15, Region::North),
            record(20, 20, Region::South),
        ]
    }

    fn cutoff() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 1, 15).unwrap()
    }

    fn app() -> App {
        App::new("dark", "pink morsel".to_string(), cutoff(), snapshot(), &RegionFilter::All)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_app_creation_defaults() {
        let app = app();
        assert!(!app.should_quit);
        assert_eq!(app.selected_filter(), RegionFilter::All);
        assert_eq!(app.view().totals.len(), 2);
        assert_eq!(app.view().totals[0].total_sales, Decimal::from(40));
        assert_eq!(app.view().regions.len(), 2);
    }

    #[test]
    fn test_app_starts_from_initial_filter() {
        let app = App::new(
            "light",
            "pink morsel".to_string(),
            cutoff(),
            snapshot(),
            &RegionFilter::Only(Region::South),
        );
        assert_eq!(app.picker.value(), "south");
        assert_eq!(app.view().totals[0].total_sales, Decimal::from(10));
    }

    #[test]
    fn test_right_arrow_selects_next_region() {
        let mut app = app();
        assert!(app.handle_key(press(KeyCode::Right)));
        assert_eq!(app.selected_filter(), RegionFilter::Only(Region::North));

        let summary = app.view().summary.as_ref().unwrap();
        assert_eq!(summary.before, Decimal::from(30));
        assert_eq!(summary.after, Decimal::from(15));
        assert_eq!(summary.percent_change, Decimal::from(-50));
    }

    #[test]
    fn test_left_arrow_wraps_to_last_option() {
        let mut app = app();
        app.handle_key(press(KeyCode::Left));
        assert_eq!(app.selected_filter(), RegionFilter::Only(Region::West));
        assert!(app.view().totals.is_empty());
        assert!(app.view().summary.as_ref().unwrap_err().is_insufficient_data());
        // Regional chart keeps the full snapshot.
        assert_eq!(app.view().regions.len(), 2);
    }

    #[test]
    fn test_number_keys_jump() {
        let mut app = app();
        assert!(app.handle_key(press(KeyCode::Char('3'))));
        assert_eq!(app.picker.value(), "south");
        assert!(!app.handle_key(press(KeyCode::Char('3'))));
        assert!(!app.handle_key(press(KeyCode::Char('9'))));
        assert_eq!(app.picker.value(), "south");
    }

    #[test]
    fn test_quit_keys() {
        for key in [
            press(KeyCode::Char('q')),
            press(KeyCode::Esc),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut app = app();
            assert!(!app.handle_key(key));
            assert!(app.should_quit);
        }
    }

    #[test]
    fn test_release_events_ignored() {
        let mut app = app();
        let mut key = press(KeyCode::Right);
        key.kind = KeyEventKind::Release;
        assert!(!app.handle_key(key));
        assert_eq!(app.selected_filter(), RegionFilter::All);
    }

    #[test]
    fn test_render_full_dashboard() {
        let app = app();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("PINK MORSEL SALES ANALYSIS"));
        assert!(text.contains("Select Region"));
        assert!(text.contains("Total Daily Sales (All Regions)"));
        assert!(text.contains("Sales by Region"));
        assert!(text.contains("Key Insights"));
    }
}

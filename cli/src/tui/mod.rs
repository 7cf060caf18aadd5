pub mod app;
pub mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::tui::app::{App, InputMode};
use crate::Service;

pub fn run(service: Service) -> Result<()> {
    let mut app = App::new(service, Local::now().date_naive())?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        let Event::Key(key) = event::read()? else { continue };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.input_mode {
            InputMode::Normal => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Tab => app.toggle_tab(),
                KeyCode::Left | KeyCode::Char('h') => app.move_days(-1),
                KeyCode::Right | KeyCode::Char('l') => app.move_days(1),
                KeyCode::Up | KeyCode::Char('k') => app.move_days(-7),
                KeyCode::Down | KeyCode::Char('j') => app.move_days(7),
                KeyCode::Char('[') | KeyCode::PageUp => app.move_months(-1),
                KeyCode::Char(']') | KeyCode::PageDown => app.move_months(1),
                KeyCode::Char('t') => app.go_to_today(),
                KeyCode::Char('J') => app.next_climb(),
                KeyCode::Char('K') => app.previous_climb(),
                KeyCode::Char('a') => app.enter_log_mode(),
                KeyCode::Char('d') | KeyCode::Delete => app.delete_climb(),
                _ => {}
            },
            InputMode::Logging => match key.code {
                KeyCode::Enter => app.submit_log(),
                KeyCode::Esc => app.exit_input_mode(),
                KeyCode::Char(c) => app.input_char(c),
                KeyCode::Backspace => app.delete_char(),
                KeyCode::Left => app.move_cursor_left(),
                KeyCode::Right => app.move_cursor_right(),
                _ => {}
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::app::{App, Tab};
    use cragbook_core::{
        ClimbingDraft, ClimbingGrade, ClimbingResult, FileJournalRepository, FilePhotoStorage, JournalService,
        MoodKind, PlaceKind, RouteKind, WeatherKind,
    };
    use chrono::{Local, NaiveDate, TimeZone};

    fn temp_service() -> crate::Service {
        let dir = std::env::temp_dir().join(format!("cragbook-tui-{}", uuid::Uuid::new_v4()));
        JournalService::new(
            FileJournalRepository::new(&dir).unwrap(),
            FilePhotoStorage::new(&dir).unwrap(),
        )
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_navigation_follows_selection_across_months() {
        let mut app = App::new(temp_service(), ymd(2026, 1, 31)).unwrap();
        assert_eq!(app.month, ymd(2026, 1, 1));

        app.move_days(1);
        assert_eq!(app.selected, ymd(2026, 2, 1));
        assert_eq!(app.month, ymd(2026, 2, 1));

        app.move_months(-2);
        assert_eq!(app.selected, ymd(2025, 12, 1));

        app.go_to_today();
        assert_eq!(app.selected, ymd(2026, 1, 31));

        app.toggle_tab();
        assert_eq!(app.tab, Tab::Stats);
    }

    #[test]
    fn test_log_and_delete_on_selected_day() {
        let service = temp_service();
        let place = service.add_place("Gym".to_string(), PlaceKind::Climbing, String::new()).unwrap();
        let route = service
            .add_route(place.id, "Warmup".to_string(), ClimbingGrade::G5c, RouteKind::Boulder, String::new())
            .unwrap();
        service
            .add_climbing(
                ClimbingDraft {
                    date: Local.with_ymd_and_hms(2026, 3, 4, 19, 0, 0).unwrap(),
                    place_id: place.id,
                    route_id: route.id,
                    weather: WeatherKind::Rain,
                    result: ClimbingResult::Fail,
                    attempts: 2,
                    mood: MoodKind::Sad,
                    note: String::new(),
                },
                &[],
            )
            .unwrap();

        let mut app = App::new(service, ymd(2026, 3, 4)).unwrap();
        assert_eq!(app.page.climbings.len(), 1);

        app.enter_log_mode();
        for c in format!("route:{} mood:laugh sent it", &route.id.to_string()[..8]).chars() {
            app.input_char(c);
        }
        app.submit_log();

        assert_eq!(app.page.climbings.len(), 2);
        assert_eq!(app.message.as_deref(), Some("Logged Warmup 5c"));
        let logged = app.page.climbings.iter().find(|c| c.mood == MoodKind::Laugh).unwrap();
        assert_eq!(logged.note, "sent it");
        assert_eq!(logged.date.date_naive(), ymd(2026, 3, 4));

        app.delete_climb();
        assert_eq!(app.page.climbings.len(), 1);
        assert_eq!(app.state.selected(), Some(0));
    }
}

use anyhow::Result;
use chrono::{Duration, Local, NaiveDate, NaiveTime, TimeZone};
use cragbook_core::calendar::{add_months, month_start};
use cragbook_core::usecase::calendar::{CalendarPage, CalendarUseCase};
use cragbook_core::usecase::statistics::StatisticsUseCase;
use cragbook_core::StatisticsReport;
use ratatui::widgets::TableState;

use crate::{build_draft, Service};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Calendar,
    Stats,
}

pub enum InputMode {
    Normal,
    Logging,
}

pub struct App {
    pub service: Service,
    pub today: NaiveDate,
    pub tab: Tab,
    pub month: NaiveDate,
    pub selected: NaiveDate,
    pub page: CalendarPage,
    pub report: StatisticsReport,
    pub state: TableState,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub message: Option<String>,
}

impl App {
    pub fn new(service: Service, today: NaiveDate) -> Result<App> {
        let month = month_start(&today);
        let page = CalendarUseCase::new(service.repo()).get_page(month, today)?;
        let report = StatisticsUseCase::new(service.repo()).get_report(today)?;

        let mut app = App {
            service,
            today,
            tab: Tab::Calendar,
            month,
            selected: today,
            page,
            report,
            state: TableState::default(),
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            message: None,
        };
        app.reset_selection();
        Ok(app)
    }

    pub fn toggle_tab(&mut self) {
        self.tab = match self.tab {
            Tab::Calendar => Tab::Stats,
            Tab::Stats => Tab::Calendar,
        };
    }

    /// Moves the selected day; the shown month follows the selection.
    pub fn move_days(&mut self, days: i64) {
        self.select(self.selected + Duration::days(days));
    }

    /// Shows the neighbouring month, keeping the day of month when it exists.
    pub fn move_months(&mut self, months: i32) {
        self.select(add_months(self.selected, months));
    }

    pub fn go_to_today(&mut self) {
        self.select(self.today);
    }

    fn select(&mut self, date: NaiveDate) {
        self.selected = date;
        self.month = month_start(&date);
        self.reload();
        self.reset_selection();
    }

    pub fn next_climb(&mut self) {
        if self.page.climbings.is_empty() { return; }

        let i = match self.state.selected() {
            Some(i) if i + 1 < self.page.climbings.len() => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous_climb(&mut self) {
        if self.page.climbings.is_empty() { return; }

        let i = match self.state.selected() {
            Some(0) | None => self.page.climbings.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn delete_climb(&mut self) {
        let Some(i) = self.state.selected() else { return };
        let Some(climb) = self.page.climbings.get(i) else { return };

        let id = climb.id;
        match self.service.delete_climbing(&id) {
            Ok(()) => self.message = Some("Climb deleted".to_string()),
            Err(e) => self.message = Some(format!("Error: {}", e)),
        }
        self.reload();

        // Adjust selection after reload
        if self.page.climbings.is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(i.min(self.page.climbings.len() - 1)));
        }
    }

    fn reset_selection(&mut self) {
        self.state.select(if self.page.climbings.is_empty() { None } else { Some(0) });
    }

    fn reload(&mut self) {
        let repo = self.service.repo();
        match CalendarUseCase::new(repo).get_page(self.month, self.selected) {
            Ok(page) => self.page = page,
            Err(e) => self.message = Some(format!("Error: {}", e)),
        }
        if let Ok(report) = StatisticsUseCase::new(repo).get_report(self.today) {
            self.report = report;
        }
    }

    pub fn enter_log_mode(&mut self) {
        self.input_mode = InputMode::Logging;
        self.input.clear();
        self.cursor_position = 0;
        self.message = None;
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self.byte_index(self.cursor_position);
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index = self.byte_index(self.cursor_position - 1);
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.input.chars().take(chars).map(|c| c.len_utf8()).sum()
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    /// Logs a climb on the selected day from the input line.
    pub fn submit_log(&mut self) {
        if self.input.trim().is_empty() {
            self.exit_input_mode();
            return;
        }

        let args: Vec<String> = self.input.split_whitespace().map(|s| s.to_string()).collect();
        self.message = Some(match self.log_on_selected_day(&args) {
            Ok(text) => text,
            Err(e) => format!("Error: {}", e),
        });

        self.input.clear();
        self.cursor_position = 0;
        self.exit_input_mode();
        self.reload();
        self.reset_selection();
    }

    fn log_on_selected_day(&self, args: &[String]) -> Result<String> {
        let noon = self.selected.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN));
        let default_date = Local
            .from_local_datetime(&noon)
            .earliest()
            .unwrap_or_else(Local::now);

        let (draft, route) = build_draft(&self.service, args, default_date)?;
        self.service.add_climbing(draft, &[])?;
        Ok(format!("Logged {} {}", route.name, route.grade))
    }
}

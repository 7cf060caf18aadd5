use crate::calendar::{build_calendar_month, month_start, CalendarMonth};
use crate::repository::JournalRepository;
use crate::service::dto::ClimbingDto;
use anyhow::Result;
use chrono::NaiveDate;

/// One screen of the calendar: the month grid plus the climbs of the
/// selected day.
#[derive(Debug, Clone)]
pub struct CalendarPage {
    pub month: CalendarMonth,
    pub selected: NaiveDate,
    pub climbings: Vec<ClimbingDto>,
}

pub struct CalendarUseCase<'a, R: JournalRepository> {
    repo: &'a R,
}

impl<'a, R: JournalRepository> CalendarUseCase<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    pub fn get_month(&self, month: NaiveDate) -> Result<CalendarMonth> {
        let journal = self.repo.load()?;
        let dates: Vec<_> = journal.climbings.iter().map(|c| c.date).collect();
        Ok(build_calendar_month(&month_start(&month), &dates))
    }

    /// Page for `month` with `selected` highlighted. The selection may lie
    /// outside the month.
    pub fn get_page(&self, month: NaiveDate, selected: NaiveDate) -> Result<CalendarPage> {
        let journal = self.repo.load()?;
        let dates: Vec<_> = journal.climbings.iter().map(|c| c.date).collect();

        let mut climbings: Vec<_> = journal
            .climbings
            .iter()
            .filter(|c| c.date.date_naive() == selected)
            .collect();
        climbings.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(CalendarPage {
            month: build_calendar_month(&month_start(&month), &dates),
            selected,
            climbings: climbings.into_iter().map(|c| ClimbingDto::from_entity(c, &journal)).collect(),
        })
    }
}

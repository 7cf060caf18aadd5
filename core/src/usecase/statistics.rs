use crate::repository::JournalRepository;
use crate::stats::{build_report, StatisticsReport};
use anyhow::Result;
use chrono::NaiveDate;

pub struct StatisticsUseCase<'a, R: JournalRepository> {
    repo: &'a R,
}

impl<'a, R: JournalRepository> StatisticsUseCase<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    /// Builds the statistics screen as seen on `today`.
    pub fn get_report(&self, today: NaiveDate) -> Result<StatisticsReport> {
        let journal = self.repo.load()?;
        Ok(build_report(&journal.climbings, &journal.routes, today))
    }
}

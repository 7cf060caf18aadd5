
#[cfg(test)]
mod tests {
    use crate::usecase::calendar::CalendarUseCase;
    use crate::usecase::statistics::StatisticsUseCase;
    use crate::repository::JournalRepository;
    use crate::model::{
        Climbing, ClimbingDraft, ClimbingGrade, ClimbingResult, Journal, MoodKind, Place, PlaceKind, Route,
        RouteKind, WeatherKind,
    };
    use crate::stats::Recommendation;
    use chrono::{Local, NaiveDate, TimeZone};
    use anyhow::Result;

    struct MockJournalRepo {
        journal: Journal,
    }

    impl JournalRepository for MockJournalRepo {
        fn load(&self) -> Result<Journal> { Ok(self.journal.clone()) }
        fn save(&self, _journal: &Journal) -> Result<()> { unimplemented!() }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn climb(place: &Place, route_id: uuid::Uuid, date: (i32, u32, u32, u32), mood: MoodKind) -> Climbing {
        let (y, m, d, h) = date;
        Climbing::new(
            ClimbingDraft {
                date: Local.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap(),
                place_id: place.id,
                route_id,
                weather: WeatherKind::Wind,
                result: ClimbingResult::Fail,
                attempts: 3,
                mood,
                note: String::new(),
            },
            Vec::new(),
        )
    }

    fn fixture() -> (MockJournalRepo, Route) {
        let place = Place::new("Kalymnos".to_string(), PlaceKind::Natural, String::new());
        let r5b = Route::new(place.id, "Slab".to_string(), ClimbingGrade::G5b, RouteKind::Sports, String::new());
        let r6a = Route::new(place.id, "Roof".to_string(), ClimbingGrade::G6a, RouteKind::Sports, String::new());
        let dangling = uuid::Uuid::new_v4();

        let climbings = vec![
            climb(&place, r5b.id, (2026, 1, 10, 10), MoodKind::Happy),
            climb(&place, r6a.id, (2026, 2, 14, 10), MoodKind::Happy),
            climb(&place, r5b.id, (2026, 4, 2, 9), MoodKind::Sad),
            climb(&place, r6a.id, (2026, 4, 2, 17), MoodKind::Happy),
            climb(&place, dangling, (2026, 5, 1, 12), MoodKind::Neutral),
            climb(&place, r6a.id, (2025, 12, 31, 12), MoodKind::Angry),
        ];

        let journal = Journal {
            places: vec![place],
            routes: vec![r5b, r6a.clone()],
            climbings,
            ..Journal::default()
        };
        (MockJournalRepo { journal }, r6a)
    }

    #[test]
    fn test_statistics_report_for_reference_date() {
        let (repo, _) = fixture();
        let usecase = StatisticsUseCase::new(&repo);

        let report = usecase.get_report(ymd(2026, 4, 20)).unwrap();

        let months: Vec<_> = report.points.iter().map(|p| (p.month_index, p.max_grade_rank)).collect();
        assert_eq!(months, vec![(1, 2), (2, 4), (4, 4)]);
        assert_eq!(report.segments.len(), 2);
        assert!(report.segments[0].is_connected());
        assert!(!report.segments[1].is_connected());

        // The May climb is after the reference month; it still counts for moods.
        // Neutral and Sad tie and keep declaration order.
        let moods: Vec<_> = report.moods.iter().map(|m| (m.mood, m.percent)).collect();
        assert_eq!(moods, vec![(MoodKind::Happy, 60), (MoodKind::Neutral, 20), (MoodKind::Sad, 20)]);

        assert_eq!(report.recommendation, Recommendation::Try(ClimbingGrade::G6aPlus));
    }

    #[test]
    fn test_calendar_page_lists_selected_day_newest_first() {
        let (repo, r6a) = fixture();
        let usecase = CalendarUseCase::new(&repo);

        let page = usecase.get_page(ymd(2026, 4, 15), ymd(2026, 4, 2)).unwrap();

        assert_eq!(page.month.first_day, ymd(2026, 4, 1));
        assert_eq!(page.climbings.len(), 2);
        assert_eq!(page.climbings[0].grade, Some(r6a.grade));
        assert_eq!(page.climbings[1].grade_text, "5b");
        assert_eq!(page.climbings[0].place_name, "Kalymnos");

        let active: Vec<_> = page
            .month
            .cells()
            .filter(|(_, active)| *active)
            .filter_map(|(cell, _)| cell.date)
            .collect();
        assert_eq!(active, vec![ymd(2026, 4, 2), ymd(2026, 5, 1)]);
    }

    #[test]
    fn test_calendar_month_across_year_boundary() {
        let (repo, _) = fixture();
        let usecase = CalendarUseCase::new(&repo);

        // January 2026 starts on a Thursday; Dec 31 is a leading cell.
        let month = usecase.get_month(ymd(2026, 1, 31)).unwrap();
        let (cell, active) = month.cells().nth(2).unwrap();
        assert_eq!(cell.date, Some(ymd(2025, 12, 31)));
        assert!(!cell.is_in_current_month);
        assert!(active);
    }
}

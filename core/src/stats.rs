//! Aggregates behind the statistics screen.
//!
//! Everything here is a pure function of the climb list, a grade lookup and
//! the caller's reference date. Climbs whose route can't be resolved are
//! left out of grade-based aggregates instead of failing.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

use crate::model::{Climbing, ClimbingGrade, MoodKind, Route};

pub const DEFAULT_MOOD_LIMIT: usize = 4;

/// Resolves the grade of a route by its ID.
pub trait GradeLookup {
    fn grade_of(&self, route_id: &Uuid) -> Option<ClimbingGrade>;
}

impl GradeLookup for [Route] {
    fn grade_of(&self, route_id: &Uuid) -> Option<ClimbingGrade> {
        self.iter().find(|r| r.id == *route_id).map(|r| r.grade)
    }
}

impl GradeLookup for Vec<Route> {
    fn grade_of(&self, route_id: &Uuid) -> Option<ClimbingGrade> {
        self.as_slice().grade_of(route_id)
    }
}

impl GradeLookup for HashMap<Uuid, ClimbingGrade> {
    fn grade_of(&self, route_id: &Uuid) -> Option<ClimbingGrade> {
        self.get(route_id).copied()
    }
}

pub fn grade_index(routes: &[Route]) -> HashMap<Uuid, ClimbingGrade> {
    routes.iter().map(|r| (r.id, r.grade)).collect()
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyDifficultyPoint {
    pub month_index: u32,
    pub max_grade_rank: u8,
}

/// Hardest grade climbed in each month of `today`'s year, up to and
/// including `today`'s month, ordered by month.
pub fn monthly_max_difficulty<L: GradeLookup + ?Sized>(
    climbs: &[Climbing],
    lookup: &L,
    today: NaiveDate,
) -> Vec<MonthlyDifficultyPoint> {
    let mut best: BTreeMap<u32, u8> = BTreeMap::new();

    for climb in climbs {
        if climb.date.year() != today.year() {
            continue;
        }
        let month = climb.date.month();
        if month > today.month() {
            continue;
        }
        let Some(grade) = lookup.grade_of(&climb.route_id) else {
            continue;
        };

        let entry = best.entry(month).or_insert(grade.rank());
        *entry = (*entry).max(grade.rank());
    }

    best.into_iter()
        .map(|(month_index, max_grade_rank)| MonthlyDifficultyPoint { month_index, max_grade_rank })
        .collect()
}

/// A run of points in consecutive months. A single point is drawn as an
/// isolated marker, longer runs as a connected line.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DifficultySegment {
    pub points: Vec<MonthlyDifficultyPoint>,
}

impl DifficultySegment {
    pub fn is_connected(&self) -> bool {
        self.points.len() >= 2
    }

    pub fn months(&self) -> Vec<u32> {
        self.points.iter().map(|p| p.month_index).collect()
    }
}

/// Expects `points` sorted by month, as returned by [`monthly_max_difficulty`].
pub fn split_into_segments(points: &[MonthlyDifficultyPoint]) -> Vec<DifficultySegment> {
    let mut segments = Vec::new();
    let mut current: Vec<MonthlyDifficultyPoint> = Vec::new();

    for point in points {
        if let Some(prev) = current.last() {
            if point.month_index != prev.month_index + 1 {
                segments.push(DifficultySegment { points: std::mem::take(&mut current) });
            }
        }
        current.push(*point);
    }

    if !current.is_empty() {
        segments.push(DifficultySegment { points: current });
    }
    segments
}

/// Y-axis range of the difficulty chart. It always spans the whole grade
/// scale so charts from different years line up.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DifficultyDomain {
    pub min: u8,
    pub max: u8,
    pub axis_values: Vec<u8>,
}

pub fn difficulty_domain() -> DifficultyDomain {
    let mut ranks: Vec<u8> = ClimbingGrade::ALL.iter().map(|g| g.rank()).collect();
    ranks.sort_unstable();

    let (Some(&min), Some(&max)) = (ranks.first(), ranks.last()) else {
        return DifficultyDomain { min: 0, max: 1, axis_values: vec![0, 1] };
    };

    let middle = rank_closest_to((min as i32 + max as i32) / 2, &ranks);
    let axis_values: BTreeSet<u8> = [min, middle, max].into_iter().collect();

    DifficultyDomain {
        min,
        max,
        axis_values: axis_values.into_iter().collect(),
    }
}

fn rank_closest_to(target: i32, ranks: &[u8]) -> u8 {
    let mut best = ranks[0];
    for &rank in ranks {
        if (rank as i32 - target).abs() < (best as i32 - target).abs() {
            best = rank;
        }
    }
    best
}

/// Axis label for a rank; off-scale ranks get the nearest grade's label.
pub fn grade_label(rank: i32) -> &'static str {
    u8::try_from(rank)
        .ok()
        .and_then(ClimbingGrade::from_rank)
        .unwrap_or_else(|| ClimbingGrade::nearest_to_rank(rank))
        .label()
}

pub fn short_month_title(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "",
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodStat {
    pub mood: MoodKind,
    pub percent: u32,
}

/// Most frequent moods in `today`'s year.
///
/// Each percentage is rounded on its own, so the list may not add up to
/// exactly 100. Equal counts keep `MoodKind` declaration order.
pub fn top_moods(climbs: &[Climbing], today: NaiveDate, limit: usize) -> Vec<MoodStat> {
    let mut counts: BTreeMap<MoodKind, usize> = BTreeMap::new();
    let mut total = 0usize;

    for climb in climbs.iter().filter(|c| c.date.year() == today.year()) {
        *counts.entry(climb.mood).or_default() += 1;
        total += 1;
    }

    if total == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(MoodKind, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(limit)
        .map(|(mood, count)| MoodStat {
            mood,
            percent: (count as f64 / total as f64 * 100.0).round() as u32,
        })
        .collect()
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    /// Nothing climbed yet.
    StartWith(ClimbingGrade),
    Try(ClimbingGrade),
    /// Already at the top of the scale.
    KeepGoing,
}

impl Recommendation {
    pub fn grade(&self) -> Option<ClimbingGrade> {
        match self {
            Recommendation::StartWith(g) | Recommendation::Try(g) => Some(*g),
            Recommendation::KeepGoing => None,
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::StartWith(g) => write!(f, "Start with {} - you're ready!", g),
            Recommendation::Try(g) => write!(f, "Try {} - you're ready!", g),
            Recommendation::KeepGoing => f.write_str("Keep going - you're ready!"),
        }
    }
}

/// Picks the next grade to try: the easiest grade above the best one
/// climbed so far that hasn't been climbed yet.
pub fn recommend_next_grade<L: GradeLookup + ?Sized>(climbs: &[Climbing], lookup: &L) -> Recommendation {
    let done: HashSet<ClimbingGrade> = climbs
        .iter()
        .filter_map(|c| lookup.grade_of(&c.route_id))
        .collect();

    let Some(best) = done.iter().copied().max_by_key(|g| g.rank()) else {
        return Recommendation::StartWith(ClimbingGrade::easiest());
    };

    let mut scale = ClimbingGrade::ALL;
    scale.sort_by_key(|g| g.rank());
    let harder: Vec<ClimbingGrade> = scale.into_iter().filter(|g| g.rank() > best.rank()).collect();

    if let Some(next) = harder.iter().find(|g| !done.contains(*g)) {
        return Recommendation::Try(*next);
    }
    match harder.first() {
        Some(next) => Recommendation::Try(*next),
        None => Recommendation::KeepGoing,
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StatisticsReport {
    pub points: Vec<MonthlyDifficultyPoint>,
    pub segments: Vec<DifficultySegment>,
    pub domain: DifficultyDomain,
    pub moods: Vec<MoodStat>,
    pub recommendation: Recommendation,
}

pub fn build_report(climbs: &[Climbing], routes: &[Route], today: NaiveDate) -> StatisticsReport {
    let grades = grade_index(routes);
    let points = monthly_max_difficulty(climbs, &grades, today);
    let segments = split_into_segments(&points);

    StatisticsReport {
        points,
        segments,
        domain: difficulty_domain(),
        moods: top_moods(climbs, today, DEFAULT_MOOD_LIMIT),
        recommendation: recommend_next_grade(climbs, &grades),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClimbingDraft, ClimbingResult, RouteKind, WeatherKind};
    use chrono::{Local, TimeZone};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
    }

    fn route(grade: ClimbingGrade) -> Route {
        Route::new(Uuid::new_v4(), format!("Route {}", grade), grade, RouteKind::Sports, String::new())
    }

    fn climb(route: &Route, y: i32, m: u32, d: u32, mood: MoodKind) -> Climbing {
        Climbing::new(
            ClimbingDraft {
                date: Local.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(),
                place_id: route.place_id,
                route_id: route.id,
                weather: WeatherKind::Sun,
                result: ClimbingResult::Complete,
                attempts: 1,
                mood,
                note: String::new(),
            },
            Vec::new(),
        )
    }

    fn point(month_index: u32, max_grade_rank: u8) -> MonthlyDifficultyPoint {
        MonthlyDifficultyPoint { month_index, max_grade_rank }
    }

    #[test]
    fn test_monthly_max_keeps_hardest_grade_per_month() {
        let easy = route(ClimbingGrade::G5a);
        let hard = route(ClimbingGrade::G6b);
        let routes = vec![easy.clone(), hard.clone()];
        let climbs = vec![
            climb(&hard, 2026, 1, 3, MoodKind::Happy),
            climb(&easy, 2026, 1, 20, MoodKind::Happy),
            climb(&easy, 2026, 2, 1, MoodKind::Happy),
            climb(&hard, 2026, 4, 9, MoodKind::Happy),
        ];

        let points = monthly_max_difficulty(&climbs, &routes, today());
        assert_eq!(points, vec![point(1, 6), point(2, 1), point(4, 6)]);
    }

    #[test]
    fn test_monthly_max_filters_other_years_future_months_and_unknown_routes() {
        let known = route(ClimbingGrade::G7a);
        let dangling = route(ClimbingGrade::G8a);
        let routes = vec![known.clone()];
        let climbs = vec![
            climb(&known, 2025, 3, 1, MoodKind::Happy),
            climb(&known, 2026, 7, 1, MoodKind::Happy),
            climb(&dangling, 2026, 3, 1, MoodKind::Happy),
            climb(&known, 2026, 6, 30, MoodKind::Happy),
        ];

        let points = monthly_max_difficulty(&climbs, &routes, today());
        assert_eq!(points, vec![point(6, 10)]);
    }

    #[test]
    fn test_split_into_segments() {
        let segments = split_into_segments(&[point(1, 3), point(2, 4), point(4, 5)]);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].months(), vec![1, 2]);
        assert!(segments[0].is_connected());
        assert_eq!(segments[1].months(), vec![4]);
        assert!(!segments[1].is_connected());

        assert!(split_into_segments(&[]).is_empty());
        let all: Vec<_> = (1..=6).map(|m| point(m, 1)).collect();
        assert_eq!(split_into_segments(&all).len(), 1);
    }

    #[test]
    fn test_domain_spans_full_scale() {
        let domain = difficulty_domain();
        assert_eq!(domain.min, 0);
        assert_eq!(domain.max, 21);
        assert_eq!(domain.axis_values, vec![0, 10, 21]);
        let labels: Vec<_> = domain.axis_values.iter().map(|&r| grade_label(r as i32)).collect();
        assert_eq!(labels, vec!["4", "7a", "8c+"]);
    }

    #[test]
    fn test_grade_label_falls_back_to_nearest() {
        assert_eq!(grade_label(5), "6a+");
        assert_eq!(grade_label(-2), "4");
        assert_eq!(grade_label(30), "8c+");
        assert_eq!(short_month_title(9), "Sep");
        assert_eq!(short_month_title(13), "");
    }

    #[test]
    fn test_top_moods_rounds_each_percentage() {
        let r = route(ClimbingGrade::G6a);
        let climbs = vec![
            climb(&r, 2026, 1, 1, MoodKind::Happy),
            climb(&r, 2026, 2, 1, MoodKind::Happy),
            climb(&r, 2026, 3, 1, MoodKind::Sad),
            climb(&r, 2025, 3, 1, MoodKind::Angry),
        ];

        let moods = top_moods(&climbs, today(), DEFAULT_MOOD_LIMIT);
        assert_eq!(
            moods,
            vec![
                MoodStat { mood: MoodKind::Happy, percent: 67 },
                MoodStat { mood: MoodKind::Sad, percent: 33 },
            ]
        );
    }

    #[test]
    fn test_top_moods_limit_and_tie_order() {
        let r = route(ClimbingGrade::G6a);
        let moods = [
            MoodKind::VerySad,
            MoodKind::Laugh,
            MoodKind::Neutral,
            MoodKind::HappyBig,
            MoodKind::Angry,
            MoodKind::Angry,
        ];
        let climbs: Vec<_> = moods.iter().map(|&m| climb(&r, 2026, 5, 1, m)).collect();

        let top = top_moods(&climbs, today(), 4);
        let kinds: Vec<_> = top.iter().map(|s| s.mood).collect();
        assert_eq!(kinds, vec![MoodKind::Angry, MoodKind::HappyBig, MoodKind::Neutral, MoodKind::Laugh]);
        assert_eq!(top[0].percent, 33);
        assert_eq!(top[1].percent, 17);

        assert!(top_moods(&[], today(), 4).is_empty());
    }

    #[test]
    fn test_recommend_skips_to_first_unclimbed_harder_grade() {
        let routes: Vec<Route> = [ClimbingGrade::G5a, ClimbingGrade::G5b, ClimbingGrade::G6a]
            .into_iter()
            .map(route)
            .collect();
        let climbs: Vec<_> = routes.iter().map(|r| climb(r, 2026, 1, 1, MoodKind::Happy)).collect();

        let rec = recommend_next_grade(&climbs, &routes);
        assert_eq!(rec, Recommendation::Try(ClimbingGrade::G6aPlus));
        assert_eq!(rec.to_string(), "Try 6a+ - you're ready!");
    }

    #[test]
    fn test_recommend_boundaries() {
        let empty: Vec<Route> = Vec::new();
        let rec = recommend_next_grade(&[], &empty);
        assert_eq!(rec, Recommendation::StartWith(ClimbingGrade::G4));
        assert!(rec.to_string().contains('4'));

        let routes: Vec<Route> = ClimbingGrade::ALL.into_iter().map(route).collect();
        let climbs: Vec<_> = routes.iter().map(|r| climb(r, 2024, 1, 1, MoodKind::Happy)).collect();
        let rec = recommend_next_grade(&climbs, &routes);
        assert_eq!(rec, Recommendation::KeepGoing);
        assert_eq!(rec.grade(), None);
        assert_eq!(rec.to_string(), "Keep going - you're ready!");
    }

    #[test]
    fn test_recommend_ignores_unknown_routes() {
        let known = route(ClimbingGrade::G6c);
        let unknown = route(ClimbingGrade::G8a);
        let climbs = vec![climb(&known, 2026, 1, 1, MoodKind::Happy), climb(&unknown, 2026, 1, 2, MoodKind::Happy)];

        let rec = recommend_next_grade(&climbs, &grade_index(&[known]));
        assert_eq!(rec, Recommendation::Try(ClimbingGrade::G6cPlus));
    }

    #[test]
    fn test_build_report_assembles_all_parts() {
        let r = route(ClimbingGrade::G6b);
        let climbs = vec![
            climb(&r, 2026, 1, 1, MoodKind::Happy),
            climb(&r, 2026, 2, 1, MoodKind::Happy),
            climb(&r, 2026, 4, 1, MoodKind::Sad),
        ];

        let report = build_report(&climbs, std::slice::from_ref(&r), today());
        assert_eq!(report.points.len(), 3);
        assert_eq!(report.segments.len(), 2);
        assert_eq!(report.domain.axis_values, vec![0, 10, 21]);
        assert_eq!(report.moods[0].mood, MoodKind::Happy);
        assert_eq!(report.recommendation, Recommendation::Try(ClimbingGrade::G6bPlus));
    }
}

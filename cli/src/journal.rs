use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use cragbook_core::calendar::WEEKDAY_TITLES;
use cragbook_core::usecase::calendar::CalendarUseCase;
use cragbook_core::{Climbing, ClimbingDto, DayCell, Journal, PhotoStorage, PlaceSummary, Route};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Style};
use tabled::{Table, Tabled};

use crate::Service;

const NOTE_PREVIEW_CHARS: usize = 32;

#[derive(Tabled)]
struct ClimbRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Place")]
    place: String,
    #[tabled(rename = "Route")]
    route: String,
    #[tabled(rename = "Grade")]
    grade: String,
    #[tabled(rename = "Result")]
    result: String,
    #[tabled(rename = "Att")]
    attempts: u32,
    #[tabled(rename = "Mood")]
    mood: String,
    #[tabled(rename = "Note")]
    note: String,
}

#[derive(Tabled)]
struct PlaceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Routes")]
    routes: String,
    #[tabled(rename = "Difficulty")]
    difficulty: String,
}

#[derive(Tabled)]
struct RouteRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Place")]
    place: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Grade")]
    grade: String,
    #[tabled(rename = "Kind")]
    kind: String,
}

fn short_id(id: &uuid::Uuid) -> String {
    id.to_string()[..8].to_string()
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .modify(Rows::first(), Color::FG_CYAN);
    table.to_string()
}

pub fn print_climbings(climbings: &[ClimbingDto]) {
    if climbings.is_empty() {
        println!("No climbs logged yet.");
        return;
    }

    let rows = climbings
        .iter()
        .map(|c| ClimbRow {
            id: short_id(&c.id),
            date: c.date.format("%Y-%m-%d %H:%M").to_string(),
            place: c.place_name.clone(),
            route: c.route_name.clone().unwrap_or_else(|| "-".to_string()),
            grade: c.grade_text.clone(),
            result: c.result.to_string(),
            attempts: c.attempts,
            mood: format!("{} {}", c.mood.glyph(), c.mood),
            note: preview(&c.note),
        })
        .collect();

    println!("{}", render::<ClimbRow>(rows));
}

fn preview(note: &str) -> String {
    if note.chars().count() > NOTE_PREVIEW_CHARS {
        let cut: String = note.chars().take(NOTE_PREVIEW_CHARS - 1).collect();
        format!("{}…", cut)
    } else {
        note.to_string()
    }
}

pub fn print_climbing_detail<P: PhotoStorage>(climbing: &Climbing, journal: &Journal, photos: &P) {
    let dto = ClimbingDto::from_entity(climbing, journal);

    println!("\x1b[1;36m{} {}\x1b[0m", dto.route_name.as_deref().unwrap_or("-"), dto.grade_text);
    println!("  ID:       {}", dto.id);
    println!("  Date:     {}", dto.date.format("%Y-%m-%d %H:%M"));
    match dto.place_kind {
        Some(kind) => println!("  Place:    {} ({})", dto.place_name, kind),
        None => println!("  Place:    {}", dto.place_name),
    }
    println!("  Weather:  {}", dto.weather);
    println!("  Result:   {} in {} attempt(s)", dto.result, dto.attempts);
    println!("  Mood:     {} {}", dto.mood.glyph(), dto.mood);
    if !dto.note.is_empty() {
        println!("  Note:     {}", dto.note);
    }
    for photo in &climbing.photos {
        println!("  Photo:    {}", photos.path(&photo.filename).display());
    }
}

pub fn print_places(summaries: &[PlaceSummary]) {
    if summaries.is_empty() {
        println!("No places yet. Add one with `cragbook place add <name>`.");
        return;
    }

    let rows = summaries
        .iter()
        .map(|s| PlaceRow {
            id: short_id(&s.place.id),
            name: s.place.name.clone(),
            kind: s.place.kind.to_string(),
            routes: s.subtitle(),
            difficulty: s.bottom_text(),
        })
        .collect();

    println!("{}", render::<PlaceRow>(rows));
}

pub fn print_routes(routes: &[Route], journal: &Journal) {
    if routes.is_empty() {
        println!("No routes found.");
        return;
    }

    let rows = routes
        .iter()
        .map(|r| RouteRow {
            id: short_id(&r.id),
            place: journal
                .places
                .iter()
                .find(|p| p.id == r.place_id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            name: r.name.clone(),
            grade: r.grade.to_string(),
            kind: r.kind.to_string(),
        })
        .collect();

    println!("{}", render::<RouteRow>(rows));
}

/// Prints the month grid, then the climbs of that month.
pub fn print_calendar(service: &Service, month: NaiveDate) -> Result<()> {
    let usecase = CalendarUseCase::new(service.repo());
    let calendar = usecase.get_month(month)?;

    println!("\n\x1b[1;36m{} {}\x1b[0m", calendar.title(), calendar.first_day.year());
    println!("{}", WEEKDAY_TITLES.iter().map(|t| format!("{:>5} ", t)).collect::<String>());

    let cells: Vec<_> = calendar.cells().collect();
    for week in cells.chunks(7) {
        let line: String = week.iter().map(|(cell, active)| cell_text(cell, *active)).collect();
        println!("{}", line);
    }

    let first = calendar.first_day;
    let in_month: Vec<ClimbingDto> = service
        .climbings_newest_first()?
        .into_iter()
        .filter(|c| c.date.year() == first.year() && c.date.month() == first.month())
        .collect();

    println!();
    print_climbings(&in_month);
    Ok(())
}

fn cell_text(cell: &DayCell, active: bool) -> String {
    let mark = if active { "*" } else { " " };
    match cell.day_number {
        None => " ".repeat(6),
        Some(day) if cell.is_in_current_month => format!("   {:>2}{}", day, mark),
        Some(day) => format!(" [{:>2}]{}", day, mark),
    }
}

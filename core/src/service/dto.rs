use serde::Serialize;
use chrono::{DateTime, Local};
use uuid::Uuid;

use crate::calendar::day_month_text;
use crate::model::{Climbing, ClimbingGrade, ClimbingResult, Journal, MoodKind, Place, PlaceKind, WeatherKind};

pub const UNKNOWN_PLACE: &str = "Unknown";
pub const UNKNOWN_GRADE: &str = "-";

/// A climb flattened with its place and route names for list views.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ClimbingDto {
    pub id: Uuid,
    pub date: DateTime<Local>,
    pub date_text: String, // dd.MM
    pub place_name: String,
    pub place_kind: Option<PlaceKind>,
    pub route_name: Option<String>,
    pub grade: Option<ClimbingGrade>,
    pub grade_text: String,
    pub weather: WeatherKind,
    pub result: ClimbingResult,
    pub attempts: u32,
    pub mood: MoodKind,
    pub photo_count: usize,
    pub note: String,
}

impl ClimbingDto {
    pub fn from_entity(climbing: &Climbing, journal: &Journal) -> Self {
        let place = journal.places.iter().find(|p| p.id == climbing.place_id);
        let route = journal.routes.iter().find(|r| r.id == climbing.route_id);

        Self {
            id: climbing.id,
            date: climbing.date,
            date_text: day_month_text(&climbing.date),
            place_name: place.map(|p| p.name.clone()).unwrap_or_else(|| UNKNOWN_PLACE.to_string()),
            place_kind: place.map(|p| p.kind),
            route_name: route.map(|r| r.name.clone()),
            grade: route.map(|r| r.grade),
            grade_text: route
                .map(|r| r.grade.label().to_string())
                .unwrap_or_else(|| UNKNOWN_GRADE.to_string()),
            weather: climbing.weather,
            result: climbing.result,
            attempts: climbing.attempts,
            mood: climbing.mood,
            photo_count: climbing.photos.len(),
            note: climbing.note.clone(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PlaceSummary {
    pub place: Place,
    pub route_count: usize,
    pub best_grade: Option<ClimbingGrade>,
}

impl PlaceSummary {
    pub fn from_entity(place: Place, journal: &Journal) -> Self {
        let routes: Vec<_> = journal.routes.iter().filter(|r| r.place_id == place.id).collect();
        let best_grade = routes.iter().map(|r| r.grade).max_by_key(|g| g.rank());

        Self {
            place,
            route_count: routes.len(),
            best_grade,
        }
    }

    pub fn subtitle(&self) -> String {
        format!("Routes: {}", self.route_count)
    }

    pub fn bottom_text(&self) -> String {
        match self.best_grade {
            Some(grade) => format!("Difficulty: {}", grade),
            None => "No routes yet".to_string(),
        }
    }
}

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Local};
use uuid::Uuid;

use crate::model::kinds::{ClimbingResult, MoodKind, WeatherKind};

pub const MAX_PHOTOS: usize = 3;
pub const MAX_NOTE_CHARS: usize = 150;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ClimbingPhoto {
    pub id: Uuid,
    pub filename: String,
}

impl ClimbingPhoto {
    pub fn new(filename: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename,
        }
    }
}

/// One recorded session on a route.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Climbing {
    pub id: Uuid,
    pub date: DateTime<Local>,

    pub place_id: Uuid,
    pub route_id: Uuid,

    pub weather: WeatherKind,
    pub result: ClimbingResult,
    pub attempts: u32,

    pub mood: MoodKind,
    pub photos: Vec<ClimbingPhoto>,
    pub note: String,
}

/// Everything the user chooses when logging a climb.
#[derive(Debug, Clone)]
pub struct ClimbingDraft {
    pub date: DateTime<Local>,
    pub place_id: Uuid,
    pub route_id: Uuid,
    pub weather: WeatherKind,
    pub result: ClimbingResult,
    pub attempts: u32,
    pub mood: MoodKind,
    pub note: String,
}

impl Climbing {
    pub fn new(draft: ClimbingDraft, photos: Vec<ClimbingPhoto>) -> Self {
        let mut climbing = Self {
            id: Uuid::new_v4(),
            date: draft.date,
            place_id: draft.place_id,
            route_id: draft.route_id,
            weather: draft.weather,
            result: draft.result,
            attempts: draft.attempts,
            mood: draft.mood,
            photos,
            note: draft.note,
        };
        climbing.clamp();
        climbing
    }

    /// Enforces the stored limits: at least one attempt, at most three
    /// photos and a 150 character note.
    pub fn clamp(&mut self) {
        self.attempts = self.attempts.max(1);
        self.photos.truncate(MAX_PHOTOS);
        self.note = truncate_chars(&self.note, MAX_NOTE_CHARS);
    }
}

pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

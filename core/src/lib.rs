pub mod calendar;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod stats;
pub mod time;
pub mod usecase;

pub use model::{
    Climbing, ClimbingDraft, ClimbingGrade, ClimbingPhoto, ClimbingResult, Journal, MoodKind, Place, PlaceKind,
    Route, RouteKind, WeatherKind,
};
pub use repository::{FileJournalRepository, FilePhotoStorage, JournalRepository, PhotoStorage};
pub use input::{parse_args, expand_key, resolve_id, ParsedInput};
pub use time::{parse_climb_date, parse_month};
pub use error::{JournalError, ParseKindError};
pub use service::journal_service::JournalService;
pub use service::dto::{ClimbingDto, PlaceSummary};
pub use stats::{build_report, Recommendation, StatisticsReport};
pub use calendar::{build_calendar_month, CalendarMonth, DayCell};

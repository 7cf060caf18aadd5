pub mod climbing;
pub mod grade;
pub mod journal;
pub mod kinds;
pub mod place;

pub use climbing::{Climbing, ClimbingDraft, ClimbingPhoto};
pub use grade::ClimbingGrade;
pub use journal::Journal;
pub use kinds::{ClimbingResult, MoodKind, PlaceKind, RouteKind, WeatherKind};
pub use place::{Place, Route};

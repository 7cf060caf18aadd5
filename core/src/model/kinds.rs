use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseKindError;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceKind {
    Natural,
    Climbing,
}

impl PlaceKind {
    pub const ALL: [PlaceKind; 2] = [PlaceKind::Natural, PlaceKind::Climbing];

    pub fn title(self) -> &'static str {
        match self {
            PlaceKind::Natural => "Natural",
            PlaceKind::Climbing => "Climbing",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKind {
    Sports,
    Crack,
    Boulder,
}

impl RouteKind {
    pub const ALL: [RouteKind; 3] = [RouteKind::Sports, RouteKind::Crack, RouteKind::Boulder];

    pub fn title(self) -> &'static str {
        match self {
            RouteKind::Sports => "Sports",
            RouteKind::Crack => "Crack",
            RouteKind::Boulder => "Boulder",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum WeatherKind {
    Snow,
    PartlyRain,
    HeavySnow,
    Rain,
    Sun,
    Thunder,
    Wind,
    Night,
}

impl WeatherKind {
    pub const ALL: [WeatherKind; 8] = [
        WeatherKind::Snow,
        WeatherKind::PartlyRain,
        WeatherKind::HeavySnow,
        WeatherKind::Rain,
        WeatherKind::Sun,
        WeatherKind::Thunder,
        WeatherKind::Wind,
        WeatherKind::Night,
    ];

    pub fn key(self) -> &'static str {
        match self {
            WeatherKind::Snow => "snow",
            WeatherKind::PartlyRain => "partlyRain",
            WeatherKind::HeavySnow => "heavySnow",
            WeatherKind::Rain => "rain",
            WeatherKind::Sun => "sun",
            WeatherKind::Thunder => "thunder",
            WeatherKind::Wind => "wind",
            WeatherKind::Night => "night",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            WeatherKind::Snow => "weather_snow",
            WeatherKind::PartlyRain => "weather_partly_rain",
            WeatherKind::HeavySnow => "weather_snow_heavy",
            WeatherKind::Rain => "weather_rain",
            WeatherKind::Sun => "weather_sun",
            WeatherKind::Thunder => "weather_thunder",
            WeatherKind::Wind => "weather_wind",
            WeatherKind::Night => "weather_night",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ClimbingResult {
    Complete,
    Fail,
}

impl ClimbingResult {
    pub const ALL: [ClimbingResult; 2] = [ClimbingResult::Complete, ClimbingResult::Fail];

    pub fn title(self) -> &'static str {
        match self {
            ClimbingResult::Complete => "Complete",
            ClimbingResult::Fail => "Fail",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ClimbingResult::Complete => "result_success",
            ClimbingResult::Fail => "result_fail",
        }
    }
}

/// How the climber felt after a session.
///
/// Declaration order doubles as the tie-break order for mood statistics.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum MoodKind {
    HappyBig,
    Happy,
    Neutral,
    Sad,
    Playful,
    Laugh,
    Angry,
    VerySad,
}

impl MoodKind {
    pub const ALL: [MoodKind; 8] = [
        MoodKind::HappyBig,
        MoodKind::Happy,
        MoodKind::Neutral,
        MoodKind::Sad,
        MoodKind::Playful,
        MoodKind::Laugh,
        MoodKind::Angry,
        MoodKind::VerySad,
    ];

    pub fn key(self) -> &'static str {
        match self {
            MoodKind::HappyBig => "happyBig",
            MoodKind::Happy => "happy",
            MoodKind::Neutral => "neutral",
            MoodKind::Sad => "sad",
            MoodKind::Playful => "playful",
            MoodKind::Laugh => "laugh",
            MoodKind::Angry => "angry",
            MoodKind::VerySad => "verySad",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            MoodKind::HappyBig => "Great",
            MoodKind::Happy => "Good",
            MoodKind::Neutral => "Neutral",
            MoodKind::Sad => "Sad",
            MoodKind::Playful => "Playful",
            MoodKind::Laugh => "Fun",
            MoodKind::Angry => "Angry",
            MoodKind::VerySad => "Upset",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            MoodKind::HappyBig => "mood_happy_big",
            MoodKind::Happy => "mood_happy",
            MoodKind::Neutral => "mood_neutral",
            MoodKind::Sad => "mood_sad",
            MoodKind::Playful => "mood_playful",
            MoodKind::Laugh => "mood_laugh",
            MoodKind::Angry => "mood_angry",
            MoodKind::VerySad => "mood_very_sad",
        }
    }

    /// Short glyph used by the terminal views in place of the icon asset.
    pub fn glyph(self) -> &'static str {
        match self {
            MoodKind::HappyBig => ":D",
            MoodKind::Happy => ":)",
            MoodKind::Neutral => ":|",
            MoodKind::Sad => ":(",
            MoodKind::Playful => ";P",
            MoodKind::Laugh => "XD",
            MoodKind::Angry => ">:(",
            MoodKind::VerySad => ":'(",
        }
    }
}

fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

fn parse_from<T: Copy>(
    kind: &'static str,
    input: &str,
    all: &[T],
    names: impl Fn(T) -> Vec<&'static str>,
) -> Result<T, ParseKindError> {
    let needle = squash(input);
    for &item in all {
        if names(item).iter().any(|n| squash(n) == needle) {
            return Ok(item);
        }
    }
    let expected: Vec<&str> = all.iter().map(|&i| names(i)[0]).collect();
    Err(ParseKindError::new(kind, input, &expected))
}

impl FromStr for PlaceKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_from("place kind", s, &Self::ALL, |k| vec![k.title()])
    }
}

impl FromStr for RouteKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_from("route kind", s, &Self::ALL, |k| vec![k.title()])
    }
}

impl FromStr for WeatherKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_from("weather", s, &Self::ALL, |k| vec![k.key()])
    }
}

impl FromStr for ClimbingResult {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_from("result", s, &Self::ALL, |k| match k {
            ClimbingResult::Complete => vec!["complete", "done", "send"],
            ClimbingResult::Fail => vec!["fail", "failed"],
        })
    }
}

impl FromStr for MoodKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_from("mood", s, &Self::ALL, |k| vec![k.key(), k.title()])
    }
}

impl fmt::Display for PlaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl fmt::Display for WeatherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl fmt::Display for ClimbingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl fmt::Display for MoodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

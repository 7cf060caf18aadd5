use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseKindError;

/// French sport-climbing grades tracked by the journal.
///
/// Difficulty comparisons go through [`ClimbingGrade::rank`], never through
/// declaration order or the textual label.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClimbingGrade {
    #[serde(rename = "4")]
    G4,
    #[serde(rename = "5a")]
    G5a,
    #[serde(rename = "5b")]
    G5b,
    #[serde(rename = "5c")]
    G5c,
    #[serde(rename = "6a")]
    G6a,
    #[serde(rename = "6a+")]
    G6aPlus,
    #[serde(rename = "6b")]
    G6b,
    #[serde(rename = "6b+")]
    G6bPlus,
    #[serde(rename = "6c")]
    G6c,
    #[serde(rename = "6c+")]
    G6cPlus,
    #[serde(rename = "7a")]
    G7a,
    #[serde(rename = "7a+")]
    G7aPlus,
    #[serde(rename = "7b")]
    G7b,
    #[serde(rename = "7b+")]
    G7bPlus,
    #[serde(rename = "7c")]
    G7c,
    #[serde(rename = "7c+")]
    G7cPlus,
    #[serde(rename = "8a")]
    G8a,
    #[serde(rename = "8a+")]
    G8aPlus,
    #[serde(rename = "8b")]
    G8b,
    #[serde(rename = "8b+")]
    G8bPlus,
    #[serde(rename = "8c")]
    G8c,
    #[serde(rename = "8c+")]
    G8cPlus,
}

impl ClimbingGrade {
    /// Every grade, easiest first.
    pub const ALL: [ClimbingGrade; 22] = [
        ClimbingGrade::G4,
        ClimbingGrade::G5a,
        ClimbingGrade::G5b,
        ClimbingGrade::G5c,
        ClimbingGrade::G6a,
        ClimbingGrade::G6aPlus,
        ClimbingGrade::G6b,
        ClimbingGrade::G6bPlus,
        ClimbingGrade::G6c,
        ClimbingGrade::G6cPlus,
        ClimbingGrade::G7a,
        ClimbingGrade::G7aPlus,
        ClimbingGrade::G7b,
        ClimbingGrade::G7bPlus,
        ClimbingGrade::G7c,
        ClimbingGrade::G7cPlus,
        ClimbingGrade::G8a,
        ClimbingGrade::G8aPlus,
        ClimbingGrade::G8b,
        ClimbingGrade::G8bPlus,
        ClimbingGrade::G8c,
        ClimbingGrade::G8cPlus,
    ];

    pub fn rank(self) -> u8 {
        match self {
            ClimbingGrade::G4 => 0,
            ClimbingGrade::G5a => 1,
            ClimbingGrade::G5b => 2,
            ClimbingGrade::G5c => 3,
            ClimbingGrade::G6a => 4,
            ClimbingGrade::G6aPlus => 5,
            ClimbingGrade::G6b => 6,
            ClimbingGrade::G6bPlus => 7,
            ClimbingGrade::G6c => 8,
            ClimbingGrade::G6cPlus => 9,
            ClimbingGrade::G7a => 10,
            ClimbingGrade::G7aPlus => 11,
            ClimbingGrade::G7b => 12,
            ClimbingGrade::G7bPlus => 13,
            ClimbingGrade::G7c => 14,
            ClimbingGrade::G7cPlus => 15,
            ClimbingGrade::G8a => 16,
            ClimbingGrade::G8aPlus => 17,
            ClimbingGrade::G8b => 18,
            ClimbingGrade::G8bPlus => 19,
            ClimbingGrade::G8c => 20,
            ClimbingGrade::G8cPlus => 21,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ClimbingGrade::G4 => "4",
            ClimbingGrade::G5a => "5a",
            ClimbingGrade::G5b => "5b",
            ClimbingGrade::G5c => "5c",
            ClimbingGrade::G6a => "6a",
            ClimbingGrade::G6aPlus => "6a+",
            ClimbingGrade::G6b => "6b",
            ClimbingGrade::G6bPlus => "6b+",
            ClimbingGrade::G6c => "6c",
            ClimbingGrade::G6cPlus => "6c+",
            ClimbingGrade::G7a => "7a",
            ClimbingGrade::G7aPlus => "7a+",
            ClimbingGrade::G7b => "7b",
            ClimbingGrade::G7bPlus => "7b+",
            ClimbingGrade::G7c => "7c",
            ClimbingGrade::G7cPlus => "7c+",
            ClimbingGrade::G8a => "8a",
            ClimbingGrade::G8aPlus => "8a+",
            ClimbingGrade::G8b => "8b",
            ClimbingGrade::G8bPlus => "8b+",
            ClimbingGrade::G8c => "8c",
            ClimbingGrade::G8cPlus => "8c+",
        }
    }

    pub fn easiest() -> Self {
        ClimbingGrade::G4
    }

    pub fn hardest() -> Self {
        ClimbingGrade::G8cPlus
    }

    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|g| g.rank() == rank)
    }

    /// Grade whose rank is closest to `rank`; the easier grade wins a tie.
    pub fn nearest_to_rank(rank: i32) -> Self {
        let mut best = Self::easiest();
        for grade in Self::ALL {
            if (grade.rank() as i32 - rank).abs() < (best.rank() as i32 - rank).abs() {
                best = grade;
            }
        }
        best
    }
}

impl fmt::Display for ClimbingGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ClimbingGrade {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|g| g.label() == needle)
            .ok_or_else(|| {
                let labels: Vec<&str> = Self::ALL.iter().map(|g| g.label()).collect();
                ParseKindError::new("grade", s, &labels)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_are_unique_and_follow_all_order() {
        for (i, grade) in ClimbingGrade::ALL.iter().enumerate() {
            assert_eq!(grade.rank() as usize, i);
        }
    }

    #[test]
    fn test_parse_label() {
        assert_eq!("6a+".parse::<ClimbingGrade>().unwrap(), ClimbingGrade::G6aPlus);
        assert_eq!(" 7B ".parse::<ClimbingGrade>().unwrap(), ClimbingGrade::G7b);
        assert!("9a".parse::<ClimbingGrade>().is_err());
    }

    #[test]
    fn test_nearest_to_rank() {
        assert_eq!(ClimbingGrade::nearest_to_rank(-3), ClimbingGrade::G4);
        assert_eq!(ClimbingGrade::nearest_to_rank(10), ClimbingGrade::G7a);
        assert_eq!(ClimbingGrade::nearest_to_rank(40), ClimbingGrade::G8cPlus);
    }

    #[test]
    fn test_serde_uses_label() {
        let json = serde_json::to_string(&ClimbingGrade::G6bPlus).unwrap();
        assert_eq!(json, "\"6b+\"");
        let back: ClimbingGrade = serde_json::from_str("\"8a\"").unwrap();
        assert_eq!(back, ClimbingGrade::G8a);
    }
}

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq)]
pub enum JournalError {
    #[error("{kind} with ID {id} not found")]
    NotFound { kind: &'static str, id: Uuid },

    #[error("cannot add a route to unknown place {0}")]
    UnknownPlace(Uuid),

    #[error("journal schema version {found} is newer than supported version {supported}")]
    UnsupportedSchema { found: u32, supported: u32 },

    #[error("ambiguous ID '{prefix}' matches {count} entries")]
    AmbiguousId { prefix: String, count: usize },
}

/// Returned when user text does not name a known grade, mood, weather, etc.
#[derive(Debug, Error, PartialEq)]
#[error("unknown {kind} '{input}' (expected one of: {expected})")]
pub struct ParseKindError {
    pub kind: &'static str,
    pub input: String,
    pub expected: String,
}

impl ParseKindError {
    pub fn new(kind: &'static str, input: &str, expected: &[&str]) -> Self {
        Self {
            kind,
            input: input.to_string(),
            expected: expected.join(", "),
        }
    }
}

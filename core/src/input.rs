use std::collections::HashMap;
use anyhow::{anyhow, Result};
use uuid::Uuid;

use crate::error::JournalError;

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub text: String,
    pub metadata: HashMap<String, String>,
}

/// Splits command words into free text and `key:value` metadata.
pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut text_parts = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() && !arg.contains(char::is_whitespace) {
                metadata.insert(key.to_string(), value.to_string());
                continue;
            }
        }
        text_parts.push(arg.as_str());
    }

    ParsedInput {
        text: text_parts.join(" "),
        metadata,
    }
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    // 1. Exact match
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// Finds the ID written in full or as a unique prefix (as shown in lists).
pub fn resolve_id(input: &str, ids: &[Uuid]) -> Result<Uuid> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return Err(anyhow!("Empty ID"));
    }
    if let Ok(id) = Uuid::parse_str(&needle) {
        if ids.contains(&id) {
            return Ok(id);
        }
    }

    let matches: Vec<Uuid> = ids
        .iter()
        .filter(|id| id.to_string().starts_with(&needle))
        .copied()
        .collect();

    match matches.len() {
        1 => Ok(matches[0]),
        0 => Err(anyhow!("No entry matches ID '{}'", input)),
        count => Err(JournalError::AmbiguousId { prefix: input.to_string(), count }.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let args = vec![
            "felt".to_string(),
            "strong".to_string(),
            "mood:happy".to_string(),
            "res:complete".to_string(),
        ];
        let parsed = parse_args(&args);
        assert_eq!(parsed.text, "felt strong");
        assert_eq!(parsed.metadata.get("mood"), Some(&"happy".to_string()));
        assert_eq!(parsed.metadata.get("res"), Some(&"complete".to_string()));
    }

    #[test]
    fn test_parse_keeps_quoted_text_with_colon() {
        let args = vec!["crux: tiny crimp".to_string(), "date:2026-03-05".to_string()];
        let parsed = parse_args(&args);
        assert_eq!(parsed.text, "crux: tiny crimp");
        assert_eq!(parsed.metadata.get("date"), Some(&"2026-03-05".to_string()));
    }

    #[test]
    fn test_expand_key() {
        let candidates = vec!["route", "result", "rating", "mood", "weather"];

        assert_eq!(expand_key("ro", &candidates).unwrap(), "route");
        assert_eq!(expand_key("res", &candidates).unwrap(), "result");
        assert_eq!(expand_key("m", &candidates).unwrap(), "mood");
        assert_eq!(expand_key("weather", &candidates).unwrap(), "weather");

        // Ambiguous
        assert!(expand_key("r", &candidates).is_err());

        // Unknown
        assert!(expand_key("x", &candidates).is_err());
    }

    #[test]
    fn test_resolve_id() {
        let a = Uuid::parse_str("3fa2c0de-0000-4000-8000-000000000001").unwrap();
        let b = Uuid::parse_str("3fb90000-0000-4000-8000-000000000002").unwrap();
        let ids = vec![a, b];

        assert_eq!(resolve_id("3fa2", &ids).unwrap(), a);
        assert_eq!(resolve_id("3FB9", &ids).unwrap(), b);
        assert_eq!(resolve_id(&a.to_string(), &ids).unwrap(), a);
        assert!(resolve_id("ffff", &ids).is_err());
        assert!(resolve_id("", &ids).is_err());

        let err = resolve_id("3f", &ids).unwrap_err();
        assert_eq!(
            err.downcast_ref::<JournalError>(),
            Some(&JournalError::AmbiguousId { prefix: "3f".to_string(), count: 2 })
        );
    }
}

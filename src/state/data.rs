//! Shared data structures for the gallery
//!
//! These structs represent the data model that flows between
//! the persistence layer and the UI layer.

use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One saved creation in the gallery
///
/// Serialized as `{ "url": ..., "date": ... }`; the on-disk gallery is a
/// JSON array of these, newest first.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GalleryEntry {
    /// Public (https) location of the uploaded image
    pub url: String,
    /// ISO-8601 creation timestamp in UTC, e.g. "2024-05-01T09:30:00.000Z"
    pub date: String,
}

impl GalleryEntry {
    pub fn new(url: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            date: date.into(),
        }
    }

    /// "Created on: <local date>" label for cards
    pub fn created_label(&self) -> String {
        created_on_label(Some(&self.date))
    }
}

/// Current time as an ISO-8601 UTC string with millisecond precision
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Format "Created on: <date>" for a stored timestamp, or for today.
///
/// Unparseable timestamps are shown verbatim rather than hidden.
pub fn created_on_label(date: Option<&str>) -> String {
    let shown = match date {
        Some(raw) => match DateTime::parse_from_rfc3339(raw) {
            Ok(dt) => dt.with_timezone(&Local).format("%x").to_string(),
            Err(_) => raw.to_string(),
        },
        None => Local::now().format("%x").to_string(),
    };
    format!("Created on: {}", shown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_field_names() {
        let entry = GalleryEntry::new("https://img.example/a.png", "2024-05-01T09:30:00.000Z");
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"url":"https://img.example/a.png","date":"2024-05-01T09:30:00.000Z"}"#
        );
    }

    #[test]
    fn test_timestamp_is_rfc3339_utc() {
        let now = timestamp_now();
        assert!(now.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(&now).is_ok());
    }

    #[test]
    fn test_label_falls_back_to_raw_text() {
        let entry = GalleryEntry::new("u", "not a date");
        assert_eq!(entry.created_label(), "Created on: not a date");
        assert!(created_on_label(None).starts_with("Created on: "));
    }
}

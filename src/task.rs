//! Task data structure and its persisted shape.
//!
//! This module defines the core `Task` struct that represents a single
//! to-do item. The serde layout is fixed: camelCase keys, the due date as
//! a plain `YYYY-MM-DD` string where empty means "no due date", and the
//! creation instant as an RFC 3339 string.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::Priority;

/// A single to-do item.
///
/// `id` and `created_at` are set once at creation and never change.
/// `description` uses the empty string for "none" so every persisted
/// record carries the same set of keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub priority: Priority,
    #[serde(default, with = "due_date_string")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Serde adapter for the due-date field.
///
/// The wire value is always a string: `""` for no due date, otherwise
/// `YYYY-MM-DD`. Anything unparseable deserializes to `None` rather than
/// failing the whole record.
mod due_date_string {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
    }
}

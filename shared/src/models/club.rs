//! Club Model

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::Availability;

/// Default number of primary seats for a new club
pub const DEFAULT_CAPACITY_PRIMARY: i64 = 20;
/// Default number of waitlist seats for a new club
pub const DEFAULT_CAPACITY_WAITLIST: i64 = 5;

/// Day of the week a club meets
///
/// Declaration order is calendar order, so sorting by `Weekday` puts Monday
/// first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "PascalCase"))]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown weekday: {s}"))
    }
}

/// Club entity
///
/// `registration_start`/`registration_end` are UTC millis; the window is
/// inclusive at both ends. Class times are wall-clock times in the
/// configured school time zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Club {
    pub id: i64,
    pub name: String,
    /// Free text or HTML fragment, stored verbatim
    pub description: Option<String>,
    pub weekday: Weekday,
    pub class_start: NaiveTime,
    pub class_end: NaiveTime,
    pub registration_start: i64,
    pub registration_end: i64,
    pub capacity_primary: i64,
    pub capacity_waitlist: i64,
    pub created_at: i64,
}

/// Create club payload
///
/// Times arrive as strings so the server can report which field is
/// malformed: class times as `HH:MM`, window bounds as `YYYY-MM-DDTHH:MM`
/// in the school time zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubCreate {
    pub name: String,
    pub description: Option<String>,
    pub weekday: Weekday,
    pub class_start: String,
    pub class_end: String,
    pub registration_start: String,
    pub registration_end: String,
    pub capacity_primary: Option<i64>,
    pub capacity_waitlist: Option<i64>,
}

/// Update club payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub weekday: Option<Weekday>,
    pub class_start: Option<String>,
    pub class_end: Option<String>,
    pub registration_start: Option<String>,
    pub registration_end: Option<String>,
    pub capacity_primary: Option<i64>,
    pub capacity_waitlist: Option<i64>,
}

/// Club with live seat counts, as shown in listings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubSummary {
    #[serde(flatten)]
    pub club: Club,
    pub primary_count: i64,
    pub waitlist_count: i64,
    pub availability: Availability,
}

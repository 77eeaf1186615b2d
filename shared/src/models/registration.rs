//! Registration Model
//!
//! Registrations are immutable once written. They disappear only when their
//! club is deleted.

use serde::{Deserialize, Serialize};

/// Seat pool a registration was admitted into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum RegistrationStatus {
    Primary,
    Waitlisted,
}

/// Registration entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: i64,
    pub club_id: i64,
    /// Class/seat code, the de-facto student key
    pub student_identifier: String,
    pub student_name: String,
    pub guardian_phone: String,
    pub status: RegistrationStatus,
    pub created_at: i64,
}

/// Registration attempt payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub student_identifier: String,
    pub student_name: String,
    pub guardian_phone: String,
}

/// Admin roster row; `position` is set for waitlisted rows (1-based)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    #[serde(flatten)]
    pub registration: Registration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

/// Club roster returned to administrators
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubRoster {
    pub club_id: i64,
    pub club_name: String,
    pub primary_count: i64,
    pub waitlist_count: i64,
    pub entries: Vec<RosterEntry>,
}

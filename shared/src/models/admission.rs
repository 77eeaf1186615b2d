//! Admission outcome types
//!
//! A rejected attempt is a normal outcome, not an error: it is returned with
//! HTTP 200 and a `reason` the shell can show to the student.

use serde::{Deserialize, Serialize};

use super::{Registration, RegistrationStatus};

/// Why an attempt was not admitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RejectionReason {
    /// `now` is before the registration window
    NotYetOpen {
        #[serde(rename = "opensAt")]
        opens_at: i64,
    },
    /// `now` is after the registration window
    Closed,
    /// The student already holds a registration for this club
    AlreadyRegistered,
    /// The target club overlaps a class the student already holds
    ScheduleConflict {
        #[serde(rename = "clubId")]
        club_id: i64,
        #[serde(rename = "clubName")]
        club_name: String,
    },
    /// Both primary and waitlist pools are exhausted
    Full,
}

impl RejectionReason {
    /// User-facing message for the response envelope
    pub fn message(&self) -> String {
        match self {
            RejectionReason::NotYetOpen { .. } => "Registration has not opened yet".to_string(),
            RejectionReason::Closed => "Registration has closed".to_string(),
            RejectionReason::AlreadyRegistered => {
                "You have already registered for this club".to_string()
            }
            RejectionReason::ScheduleConflict { club_name, .. } => {
                format!("Schedule conflicts with your registered club: {club_name}")
            }
            RejectionReason::Full => "Registration is full".to_string(),
        }
    }
}

/// Result of one registration attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum AdmissionOutcome {
    Accepted {
        status: RegistrationStatus,
        /// 1-based waitlist position, present only for waitlisted admissions
        #[serde(skip_serializing_if = "Option::is_none", default)]
        position: Option<i64>,
        registration: Registration,
    },
    Rejected {
        reason: RejectionReason,
    },
}

impl AdmissionOutcome {
    pub fn message(&self) -> String {
        match self {
            AdmissionOutcome::Accepted {
                status: RegistrationStatus::Primary,
                ..
            } => "Registration successful".to_string(),
            AdmissionOutcome::Accepted { position, .. } => format!(
                "Registration successful, you are number {} on the waitlist",
                position.unwrap_or_default()
            ),
            AdmissionOutcome::Rejected { reason } => reason.message(),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, AdmissionOutcome::Accepted { .. })
    }
}

/// Advisory preview of whether a club currently takes registrations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum Availability {
    Open,
    NotYetOpen {
        #[serde(rename = "opensAt")]
        opens_at: i64,
    },
    Closed,
    Full,
}

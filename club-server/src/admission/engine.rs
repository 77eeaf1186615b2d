//! Admission decision engine
//!
//! Pure classification of a registration attempt. No I/O: the caller reads
//! the club, the student's held slots and the seat counts, and is
//! responsible for making the read and the subsequent insert atomic.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. registration window (inclusive at both ends)
//! 2. duplicate registration for this club
//! 3. schedule conflict with any held class on the same weekday
//! 4. seat assignment: primary, then waitlist, else full

use chrono::NaiveTime;
use shared::models::{Availability, Club, RegistrationStatus, RejectionReason, Weekday};
use thiserror::Error;

/// A class the student already holds, joined with its club's schedule
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct HeldSlot {
    pub club_id: i64,
    pub club_name: String,
    pub weekday: Weekday,
    pub class_start: NaiveTime,
    pub class_end: NaiveTime,
}

/// Live seat counts for one club, always recomputed from the ledger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeatCounts {
    pub primary: i64,
    pub waitlisted: i64,
}

/// Engine verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Admit {
        status: RegistrationStatus,
        /// 1-based waitlist position (`waitlisted + 1` at decision time)
        position: Option<i64>,
    },
    Reject(RejectionReason),
}

/// Structurally invalid input; a bug or corrupt row, never a rejection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdmissionError {
    #[error("club {club_id}: class start {start} is not before class end {end}")]
    InvalidSchedule {
        club_id: i64,
        start: NaiveTime,
        end: NaiveTime,
    },

    #[error("club {club_id}: registration window start is not before its end")]
    InvalidWindow { club_id: i64 },

    #[error("club {club_id}: capacities must be non-negative")]
    InvalidCapacity { club_id: i64 },

    #[error("student identifier must not be empty")]
    EmptyStudentIdentifier,

    #[error("held club {club_id} has an invalid schedule")]
    InvalidHeldSlot { club_id: i64 },
}

impl From<AdmissionError> for shared::error::AppError {
    fn from(err: AdmissionError) -> Self {
        shared::error::AppError::invalid_input(err.to_string())
    }
}

/// Check the structural invariants of a club row
pub fn validate_club(club: &Club) -> Result<(), AdmissionError> {
    if club.class_start >= club.class_end {
        return Err(AdmissionError::InvalidSchedule {
            club_id: club.id,
            start: club.class_start,
            end: club.class_end,
        });
    }
    if club.registration_start >= club.registration_end {
        return Err(AdmissionError::InvalidWindow { club_id: club.id });
    }
    if club.capacity_primary < 0 || club.capacity_waitlist < 0 {
        return Err(AdmissionError::InvalidCapacity { club_id: club.id });
    }
    Ok(())
}

/// Window check shared by [`decide`] and [`availability`]
fn window_rejection(club: &Club, now: i64) -> Option<RejectionReason> {
    if now < club.registration_start {
        Some(RejectionReason::NotYetOpen {
            opens_at: club.registration_start,
        })
    } else if now > club.registration_end {
        Some(RejectionReason::Closed)
    } else {
        None
    }
}

/// Half-open interval overlap; back-to-back classes do not overlap
fn overlaps(club: &Club, held: &HeldSlot) -> bool {
    club.weekday == held.weekday
        && club.class_start < held.class_end
        && club.class_end > held.class_start
}

/// Classify a registration attempt
pub fn decide(
    club: &Club,
    student_identifier: &str,
    now: i64,
    held: &[HeldSlot],
    counts: SeatCounts,
) -> Result<Decision, AdmissionError> {
    validate_club(club)?;
    if student_identifier.trim().is_empty() {
        return Err(AdmissionError::EmptyStudentIdentifier);
    }
    if let Some(bad) = held.iter().find(|h| h.class_start >= h.class_end) {
        return Err(AdmissionError::InvalidHeldSlot {
            club_id: bad.club_id,
        });
    }

    if let Some(reason) = window_rejection(club, now) {
        return Ok(Decision::Reject(reason));
    }

    if held.iter().any(|h| h.club_id == club.id) {
        return Ok(Decision::Reject(RejectionReason::AlreadyRegistered));
    }

    if let Some(conflict) = held.iter().find(|h| overlaps(club, h)) {
        return Ok(Decision::Reject(RejectionReason::ScheduleConflict {
            club_id: conflict.club_id,
            club_name: conflict.club_name.clone(),
        }));
    }

    let decision = if counts.primary < club.capacity_primary {
        Decision::Admit {
            status: RegistrationStatus::Primary,
            position: None,
        }
    } else if counts.waitlisted < club.capacity_waitlist {
        Decision::Admit {
            status: RegistrationStatus::Waitlisted,
            position: Some(counts.waitlisted + 1),
        }
    } else {
        Decision::Reject(RejectionReason::Full)
    };
    Ok(decision)
}

/// Advisory preview for the club page; [`decide`] is authoritative
pub fn availability(club: &Club, now: i64, counts: SeatCounts) -> Availability {
    match window_rejection(club, now) {
        Some(RejectionReason::NotYetOpen { opens_at }) => Availability::NotYetOpen { opens_at },
        Some(_) => Availability::Closed,
        None if counts.primary >= club.capacity_primary
            && counts.waitlisted >= club.capacity_waitlist =>
        {
            Availability::Full
        }
        None => Availability::Open,
    }
}

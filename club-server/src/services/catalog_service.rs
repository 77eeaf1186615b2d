//! Catalog Service - club CRUD with live seat counts
//!
//! Wall-clock inputs are parsed here in the configured zone; everything below
//! this layer only sees millis and `NaiveTime`. Writes that change a club's
//! schedule, window or capacity take the club's admission lock so they never
//! interleave with an in-flight attempt.

use std::sync::Arc;

use chrono_tz::Tz;
use shared::error::ErrorCode;
use shared::models::{
    Club, ClubCreate, ClubRoster, ClubSummary, ClubUpdate, DEFAULT_CAPACITY_PRIMARY,
    DEFAULT_CAPACITY_WAITLIST, RegistrationStatus, RosterEntry,
};
use sqlx::SqlitePool;

use crate::admission::{AdmissionService, SeatCounts, engine};
use crate::db::repository::club::{self, ClubDraft};
use crate::db::repository::registration;
use crate::utils::clock::Clock;
use crate::utils::time::{parse_class_time, parse_local_datetime};
use crate::utils::validation::{
    MAX_DESCRIPTION_LEN, MAX_NAME_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct CatalogService {
    pool: SqlitePool,
    clock: Arc<dyn Clock>,
    admission: Arc<AdmissionService>,
    timezone: Tz,
}

impl CatalogService {
    pub fn new(
        pool: SqlitePool,
        clock: Arc<dyn Clock>,
        admission: Arc<AdmissionService>,
        timezone: Tz,
    ) -> Self {
        Self {
            pool,
            clock,
            admission,
            timezone,
        }
    }

    /// All clubs, Monday first, with live counts
    pub async fn list_clubs(&self) -> AppResult<Vec<ClubSummary>> {
        let clubs = club::find_all(&self.pool).await?;
        let counts = club::count_seats_all(&self.pool).await?;
        let now = self.clock.now_millis();

        Ok(clubs
            .into_iter()
            .map(|c| {
                let seats = counts.get(&c.id).copied().unwrap_or_default();
                summarize(c, now, seats)
            })
            .collect())
    }

    pub async fn get_club(&self, id: i64) -> AppResult<ClubSummary> {
        let c = club::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::club_not_found(id))?;
        let seats = club::count_seats(&self.pool, id).await?;
        Ok(summarize(c, self.clock.now_millis(), seats))
    }

    pub async fn create_club(&self, data: ClubCreate) -> AppResult<Club> {
        let draft = self.draft_from_create(data)?;
        let created = club::create(&self.pool, &draft, self.clock.now_millis()).await?;
        tracing::info!(club_id = created.id, name = %created.name, "Club created");
        Ok(created)
    }

    /// Partial update; validation runs on the merged result
    pub async fn update_club(&self, id: i64, data: ClubUpdate) -> AppResult<Club> {
        let _guard = self.admission.lock_club(id).await;

        let existing = club::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::club_not_found(id))?;
        let draft = self.merge_update(&existing, data)?;
        let updated = club::update(&self.pool, id, &draft).await?;

        tracing::info!(club_id = id, name = %updated.name, "Club updated");
        Ok(updated)
    }

    /// Delete a club together with its registrations
    pub async fn delete_club(&self, id: i64) -> AppResult<()> {
        let deleted = {
            let _guard = self.admission.lock_club(id).await;
            club::delete(&self.pool, id).await?
        };
        self.admission.forget_club(id);

        if !deleted {
            return Err(AppError::club_not_found(id));
        }
        tracing::info!(club_id = id, "Club deleted");
        Ok(())
    }

    /// Roster: primary first, then waitlist in position order
    pub async fn list_registrations(&self, club_id: i64) -> AppResult<ClubRoster> {
        let c = club::find_by_id(&self.pool, club_id)
            .await?
            .ok_or_else(|| AppError::club_not_found(club_id))?;
        let rows = registration::find_by_club(&self.pool, club_id).await?;

        let mut primary_count = 0;
        let mut waitlist_count = 0;
        let entries = rows
            .into_iter()
            .map(|r| {
                let position = match r.status {
                    RegistrationStatus::Primary => {
                        primary_count += 1;
                        None
                    }
                    RegistrationStatus::Waitlisted => {
                        waitlist_count += 1;
                        Some(waitlist_count)
                    }
                };
                RosterEntry {
                    registration: r,
                    position,
                }
            })
            .collect();

        Ok(ClubRoster {
            club_id,
            club_name: c.name,
            primary_count,
            waitlist_count,
            entries,
        })
    }

    fn draft_from_create(&self, data: ClubCreate) -> AppResult<ClubDraft> {
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&data.description, "description", MAX_DESCRIPTION_LEN)?;

        let draft = ClubDraft {
            name: data.name.trim().to_string(),
            description: normalize_description(data.description),
            weekday: data.weekday,
            class_start: parse_class_time(&data.class_start, "classStart")?,
            class_end: parse_class_time(&data.class_end, "classEnd")?,
            registration_start: parse_local_datetime(
                &data.registration_start,
                "registrationStart",
                self.timezone,
            )?,
            registration_end: parse_local_datetime(
                &data.registration_end,
                "registrationEnd",
                self.timezone,
            )?,
            capacity_primary: data.capacity_primary.unwrap_or(DEFAULT_CAPACITY_PRIMARY),
            capacity_waitlist: data.capacity_waitlist.unwrap_or(DEFAULT_CAPACITY_WAITLIST),
        };
        check_draft(&draft)?;
        Ok(draft)
    }

    fn merge_update(&self, existing: &Club, data: ClubUpdate) -> AppResult<ClubDraft> {
        let mut draft = ClubDraft::from(existing);

        if let Some(name) = data.name {
            validate_required_text(&name, "name", MAX_NAME_LEN)?;
            draft.name = name.trim().to_string();
        }
        if data.description.is_some() {
            validate_optional_text(&data.description, "description", MAX_DESCRIPTION_LEN)?;
            draft.description = normalize_description(data.description);
        }
        if let Some(weekday) = data.weekday {
            draft.weekday = weekday;
        }
        if let Some(v) = data.class_start {
            draft.class_start = parse_class_time(&v, "classStart")?;
        }
        if let Some(v) = data.class_end {
            draft.class_end = parse_class_time(&v, "classEnd")?;
        }
        if let Some(v) = data.registration_start {
            draft.registration_start = parse_local_datetime(&v, "registrationStart", self.timezone)?;
        }
        if let Some(v) = data.registration_end {
            draft.registration_end = parse_local_datetime(&v, "registrationEnd", self.timezone)?;
        }
        if let Some(v) = data.capacity_primary {
            draft.capacity_primary = v;
        }
        if let Some(v) = data.capacity_waitlist {
            draft.capacity_waitlist = v;
        }

        check_draft(&draft)?;
        Ok(draft)
    }
}

fn summarize(club: Club, now: i64, seats: SeatCounts) -> ClubSummary {
    let availability = engine::availability(&club, now, seats);
    ClubSummary {
        club,
        primary_count: seats.primary,
        waitlist_count: seats.waitlisted,
        availability,
    }
}

/// Blank descriptions are stored as NULL
fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|d| !d.trim().is_empty())
}

fn check_draft(draft: &ClubDraft) -> AppResult<()> {
    if draft.class_start >= draft.class_end {
        return Err(AppError::with_message(
            ErrorCode::ClubScheduleInvalid,
            "Class start must be before class end",
        ));
    }
    if draft.registration_start >= draft.registration_end {
        return Err(AppError::with_message(
            ErrorCode::ClubWindowInvalid,
            "Registration start must be before registration end",
        ));
    }
    if draft.capacity_primary < 0 || draft.capacity_waitlist < 0 {
        return Err(AppError::with_message(
            ErrorCode::ClubCapacityInvalid,
            "Capacities must not be negative",
        ));
    }
    Ok(())
}

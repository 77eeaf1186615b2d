//! Club Repository

use std::collections::HashMap;

use chrono::NaiveTime;
use shared::models::{Club, Weekday};
use sqlx::{SqliteExecutor, SqlitePool};

use super::{RepoError, RepoResult};
use crate::admission::engine::SeatCounts;

const CLUB_COLUMNS: &str = "id, name, description, weekday, class_start, class_end, \
     registration_start, registration_end, capacity_primary, capacity_waitlist, created_at";

/// Validated club fields, ready to write
#[derive(Debug, Clone, PartialEq)]
pub struct ClubDraft {
    pub name: String,
    pub description: Option<String>,
    pub weekday: Weekday,
    pub class_start: NaiveTime,
    pub class_end: NaiveTime,
    pub registration_start: i64,
    pub registration_end: i64,
    pub capacity_primary: i64,
    pub capacity_waitlist: i64,
}

impl From<&Club> for ClubDraft {
    fn from(club: &Club) -> Self {
        Self {
            name: club.name.clone(),
            description: club.description.clone(),
            weekday: club.weekday,
            class_start: club.class_start,
            class_end: club.class_end,
            registration_start: club.registration_start,
            registration_end: club.registration_end,
            capacity_primary: club.capacity_primary,
            capacity_waitlist: club.capacity_waitlist,
        }
    }
}

/// All clubs ordered by weekday (Monday first), then class start
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Club>> {
    let mut clubs = sqlx::query_as::<_, Club>(&format!("SELECT {CLUB_COLUMNS} FROM club"))
        .fetch_all(pool)
        .await?;
    // weekday is stored by name; calendar order comes from the enum
    clubs.sort_by(|a, b| {
        (a.weekday, a.class_start, a.id).cmp(&(b.weekday, b.class_start, b.id))
    });
    Ok(clubs)
}

pub async fn find_by_id<'e>(
    executor: impl SqliteExecutor<'e>,
    id: i64,
) -> RepoResult<Option<Club>> {
    let club = sqlx::query_as::<_, Club>(&format!("SELECT {CLUB_COLUMNS} FROM club WHERE id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(club)
}

pub async fn create(pool: &SqlitePool, draft: &ClubDraft, now: i64) -> RepoResult<Club> {
    let club = sqlx::query_as::<_, Club>(&format!(
        "INSERT INTO club (name, description, weekday, class_start, class_end, \
         registration_start, registration_end, capacity_primary, capacity_waitlist, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING {CLUB_COLUMNS}"
    ))
    .bind(&draft.name)
    .bind(&draft.description)
    .bind(draft.weekday)
    .bind(draft.class_start)
    .bind(draft.class_end)
    .bind(draft.registration_start)
    .bind(draft.registration_end)
    .bind(draft.capacity_primary)
    .bind(draft.capacity_waitlist)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(club)
}

/// Replace every mutable field of club `id`
pub async fn update(pool: &SqlitePool, id: i64, draft: &ClubDraft) -> RepoResult<Club> {
    sqlx::query_as::<_, Club>(&format!(
        "UPDATE club SET name = ?, description = ?, weekday = ?, class_start = ?, class_end = ?, \
         registration_start = ?, registration_end = ?, capacity_primary = ?, capacity_waitlist = ? \
         WHERE id = ? RETURNING {CLUB_COLUMNS}"
    ))
    .bind(&draft.name)
    .bind(&draft.description)
    .bind(draft.weekday)
    .bind(draft.class_start)
    .bind(draft.class_end)
    .bind(draft.registration_start)
    .bind(draft.registration_end)
    .bind(draft.capacity_primary)
    .bind(draft.capacity_waitlist)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("Club {id} not found")))
}

/// Delete a club; its registrations go with it (ON DELETE CASCADE)
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM club WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Seat counts for one club
pub async fn count_seats<'e>(
    executor: impl SqliteExecutor<'e>,
    club_id: i64,
) -> RepoResult<SeatCounts> {
    let (primary, waitlisted) = sqlx::query_as::<_, (i64, i64)>(
        "SELECT \
            COALESCE(SUM(CASE WHEN status = 'primary' THEN 1 ELSE 0 END), 0), \
            COALESCE(SUM(CASE WHEN status = 'waitlisted' THEN 1 ELSE 0 END), 0) \
         FROM registration WHERE club_id = ?",
    )
    .bind(club_id)
    .fetch_one(executor)
    .await?;
    Ok(SeatCounts {
        primary,
        waitlisted,
    })
}

/// Seat counts for every club that has registrations
pub async fn count_seats_all(pool: &SqlitePool) -> RepoResult<HashMap<i64, SeatCounts>> {
    let rows = sqlx::query_as::<_, (i64, i64, i64)>(
        "SELECT club_id, \
            SUM(CASE WHEN status = 'primary' THEN 1 ELSE 0 END), \
            SUM(CASE WHEN status = 'waitlisted' THEN 1 ELSE 0 END) \
         FROM registration GROUP BY club_id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows
        .into_iter()
        .map(|(club_id, primary, waitlisted)| {
            (
                club_id,
                SeatCounts {
                    primary,
                    waitlisted,
                },
            )
        })
        .collect())
}

#[cfg(test)]
pub(crate) fn test_draft(name: &str, weekday: Weekday, start: (u32, u32), end: (u32, u32)) -> ClubDraft {
    ClubDraft {
        name: name.to_string(),
        description: Some("<p>Bring a notebook</p>".to_string()),
        weekday,
        class_start: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
        class_end: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        registration_start: 1_000,
        registration_end: 2_000,
        capacity_primary: 20,
        capacity_waitlist: 5,
    }
}

//! Registration Repository
//!
//! The ledger is append-only: rows are inserted by admission and removed
//! only by the club delete cascade.

use shared::models::{Registration, RegistrationStatus};
use sqlx::{SqliteExecutor, SqlitePool};

use super::RepoResult;
use crate::admission::engine::HeldSlot;

const REGISTRATION_COLUMNS: &str =
    "id, club_id, student_identifier, student_name, guardian_phone, status, created_at";

#[derive(Debug, Clone)]
pub struct NewRegistration<'a> {
    pub club_id: i64,
    pub student_identifier: &'a str,
    pub student_name: &'a str,
    pub guardian_phone: &'a str,
    pub status: RegistrationStatus,
    pub created_at: i64,
}

/// Every class the student currently holds, in registration order
pub async fn held_slots<'e>(
    executor: impl SqliteExecutor<'e>,
    student_identifier: &str,
) -> RepoResult<Vec<HeldSlot>> {
    let slots = sqlx::query_as::<_, HeldSlot>(
        "SELECT c.id AS club_id, c.name AS club_name, c.weekday, c.class_start, c.class_end \
         FROM registration r JOIN club c ON c.id = r.club_id \
         WHERE r.student_identifier = ? \
         ORDER BY r.created_at, r.id",
    )
    .bind(student_identifier)
    .fetch_all(executor)
    .await?;
    Ok(slots)
}

/// Append a registration
///
/// A second row for the same (club, student) fails with
/// [`super::RepoError::Duplicate`].
pub async fn insert<'e>(
    executor: impl SqliteExecutor<'e>,
    new: &NewRegistration<'_>,
) -> RepoResult<Registration> {
    let registration = sqlx::query_as::<_, Registration>(&format!(
        "INSERT INTO registration \
         (club_id, student_identifier, student_name, guardian_phone, status, created_at) \
         VALUES (?, ?, ?, ?, ?, ?) RETURNING {REGISTRATION_COLUMNS}"
    ))
    .bind(new.club_id)
    .bind(new.student_identifier)
    .bind(new.student_name)
    .bind(new.guardian_phone)
    .bind(new.status)
    .bind(new.created_at)
    .fetch_one(executor)
    .await?;
    Ok(registration)
}

/// Roster order: primary first, then by arrival
pub async fn find_by_club(pool: &SqlitePool, club_id: i64) -> RepoResult<Vec<Registration>> {
    let rows = sqlx::query_as::<_, Registration>(&format!(
        "SELECT {REGISTRATION_COLUMNS} FROM registration WHERE club_id = ? \
         ORDER BY CASE status WHEN 'primary' THEN 0 ELSE 1 END, created_at, id"
    ))
    .bind(club_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admission::engine::SeatCounts;
    use crate::db::DbService;
    use crate::db::repository::{RepoError, club};
    use shared::models::Weekday;

    fn new_reg(club_id: i64, student: &str, status: RegistrationStatus, at: i64) -> NewRegistration<'_> {
        NewRegistration {
            club_id,
            student_identifier: student,
            student_name: "Student",
            guardian_phone: "0912345678",
            status,
            created_at: at,
        }
    }

    #[tokio::test]
    async fn insert_and_count() {
        let db = DbService::in_memory().await.unwrap();
        let c = club::create(&db.pool, &club::test_draft("Chess", Weekday::Monday, (14, 0), (15, 0)), 0)
            .await
            .unwrap();

        let r = insert(&db.pool, &new_reg(c.id, "30101", RegistrationStatus::Primary, 10))
            .await
            .unwrap();
        assert_eq!(r.club_id, c.id);
        assert_eq!(r.status, RegistrationStatus::Primary);
        insert(&db.pool, &new_reg(c.id, "30102", RegistrationStatus::Waitlisted, 11))
            .await
            .unwrap();

        let expected = SeatCounts {
            primary: 1,
            waitlisted: 1,
        };
        // reading twice without a write returns the same counts
        assert_eq!(club::count_seats(&db.pool, c.id).await.unwrap(), expected);
        assert_eq!(club::count_seats(&db.pool, c.id).await.unwrap(), expected);
        assert_eq!(
            club::count_seats_all(&db.pool).await.unwrap().get(&c.id),
            Some(&expected)
        );
    }

    #[tokio::test]
    async fn duplicate_is_rejected_by_storage() {
        let db = DbService::in_memory().await.unwrap();
        let c = club::create(&db.pool, &club::test_draft("Chess", Weekday::Monday, (14, 0), (15, 0)), 0)
            .await
            .unwrap();

        insert(&db.pool, &new_reg(c.id, "30101", RegistrationStatus::Primary, 10))
            .await
            .unwrap();
        assert!(matches!(
            insert(&db.pool, &new_reg(c.id, "30101", RegistrationStatus::Primary, 11)).await,
            Err(RepoError::Duplicate(_))
        ));
    }

    #[tokio::test]
    async fn unknown_club_is_not_found() {
        let db = DbService::in_memory().await.unwrap();
        assert!(matches!(
            insert(&db.pool, &new_reg(999, "30101", RegistrationStatus::Primary, 10)).await,
            Err(RepoError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn held_slots_join_club_schedule() {
        let db = DbService::in_memory().await.unwrap();
        let chess = club::create(&db.pool, &club::test_draft("Chess", Weekday::Monday, (14, 0), (15, 0)), 0)
            .await
            .unwrap();
        let art = club::create(&db.pool, &club::test_draft("Art", Weekday::Friday, (9, 0), (11, 0)), 0)
            .await
            .unwrap();

        insert(&db.pool, &new_reg(chess.id, "30101", RegistrationStatus::Primary, 10))
            .await
            .unwrap();
        insert(&db.pool, &new_reg(art.id, "30101", RegistrationStatus::Waitlisted, 20))
            .await
            .unwrap();
        insert(&db.pool, &new_reg(art.id, "30199", RegistrationStatus::Primary, 30))
            .await
            .unwrap();

        let held = held_slots(&db.pool, "30101").await.unwrap();
        assert_eq!(held.len(), 2);
        assert_eq!(held[0].club_id, chess.id);
        assert_eq!(held[0].club_name, "Chess");
        assert_eq!(held[0].weekday, Weekday::Monday);
        assert_eq!(held[1].club_id, art.id);
        assert_eq!(held[1].class_end, art.class_end);

        assert!(held_slots(&db.pool, "nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn roster_lists_primary_first() {
        let db = DbService::in_memory().await.unwrap();
        let c = club::create(&db.pool, &club::test_draft("Chess", Weekday::Monday, (14, 0), (15, 0)), 0)
            .await
            .unwrap();

        insert(&db.pool, &new_reg(c.id, "w1", RegistrationStatus::Waitlisted, 5))
            .await
            .unwrap();
        insert(&db.pool, &new_reg(c.id, "p2", RegistrationStatus::Primary, 7))
            .await
            .unwrap();
        insert(&db.pool, &new_reg(c.id, "p1", RegistrationStatus::Primary, 6))
            .await
            .unwrap();

        let ids: Vec<String> = find_by_club(&db.pool, c.id)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.student_identifier)
            .collect();
        assert_eq!(ids, vec!["p1", "p2", "w1"]);
    }

    #[tokio::test]
    async fn deleting_club_cascades_registrations() {
        let db = DbService::in_memory().await.unwrap();
        let c = club::create(&db.pool, &club::test_draft("Chess", Weekday::Monday, (14, 0), (15, 0)), 0)
            .await
            .unwrap();
        insert(&db.pool, &new_reg(c.id, "30101", RegistrationStatus::Primary, 10))
            .await
            .unwrap();

        assert!(club::delete(&db.pool, c.id).await.unwrap());
        assert!(find_by_club(&db.pool, c.id).await.unwrap().is_empty());
        assert!(held_slots(&db.pool, "30101").await.unwrap().is_empty());
    }
}

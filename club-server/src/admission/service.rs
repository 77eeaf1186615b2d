//! Admission service
//!
//! Runs one registration attempt end to end: lock, read, decide, append.
//! Lock order is always student, then club. Every query of an attempt runs
//! in one `BEGIN IMMEDIATE` transaction on one pooled connection, so the
//! write lock is held from the first read to the commit.

use std::sync::Arc;

use shared::models::{AdmissionOutcome, RegistrationRequest, RejectionReason};
use sqlx::SqlitePool;
use tokio::sync::OwnedMutexGuard;

use super::engine::{self, Decision};
use super::locks::KeyedLocks;
use crate::db::repository::{RepoError, club, registration};
use crate::utils::clock::Clock;
use crate::utils::{AppError, AppResult};

#[derive(Debug)]
pub struct AdmissionService {
    pool: SqlitePool,
    clock: Arc<dyn Clock>,
    club_locks: KeyedLocks<i64>,
    student_locks: KeyedLocks<String>,
}

impl AdmissionService {
    pub fn new(pool: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self {
            pool,
            clock,
            club_locks: KeyedLocks::new(),
            student_locks: KeyedLocks::new(),
        }
    }

    pub fn now(&self) -> i64 {
        self.clock.now_millis()
    }

    /// Exclusive access to a club, for admin writes that must not interleave
    /// with admissions
    pub async fn lock_club(&self, club_id: i64) -> OwnedMutexGuard<()> {
        self.club_locks.lock(&club_id).await
    }

    /// Drop the lock entry of a deleted club
    pub fn forget_club(&self, club_id: i64) {
        self.club_locks.release_idle(&club_id);
    }

    /// Attempt to register a student for a club
    ///
    /// Rejections come back as `Ok(AdmissionOutcome::Rejected)`; `Err` means
    /// the club does not exist or something is broken.
    pub async fn attempt(
        &self,
        club_id: i64,
        request: &RegistrationRequest,
    ) -> AppResult<AdmissionOutcome> {
        let student = request.student_identifier.trim().to_string();

        let outcome = {
            let _student_guard = self.student_locks.lock(&student).await;
            let _club_guard = self.club_locks.lock(&club_id).await;
            self.attempt_locked(club_id, &student, request).await
        };
        self.student_locks.release_idle(&student);

        let outcome = outcome?;
        match &outcome {
            AdmissionOutcome::Accepted {
                status,
                position,
                registration,
            } => tracing::info!(
                club_id,
                student = %student,
                registration_id = registration.id,
                ?status,
                ?position,
                "Registration accepted"
            ),
            AdmissionOutcome::Rejected { reason } => tracing::info!(
                club_id,
                student = %student,
                ?reason,
                "Registration rejected"
            ),
        }
        Ok(outcome)
    }

    async fn attempt_locked(
        &self,
        club_id: i64,
        student: &str,
        request: &RegistrationRequest,
    ) -> AppResult<AdmissionOutcome> {
        let mut tx = self
            .pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let club = club::find_by_id(&mut *tx, club_id)
            .await?
            .ok_or_else(|| AppError::club_not_found(club_id))?;
        let now = self.clock.now_millis();
        let held = registration::held_slots(&mut *tx, student).await?;
        let counts = club::count_seats(&mut *tx, club_id).await?;

        let (status, position) = match engine::decide(&club, student, now, &held, counts)? {
            Decision::Reject(reason) => return Ok(AdmissionOutcome::Rejected { reason }),
            Decision::Admit { status, position } => (status, position),
        };

        let new = registration::NewRegistration {
            club_id,
            student_identifier: student,
            student_name: request.student_name.trim(),
            guardian_phone: request.guardian_phone.trim(),
            status,
            created_at: now,
        };
        let inserted = match registration::insert(&mut *tx, &new).await {
            Ok(r) => r,
            // storage-level backstop for the duplicate rule
            Err(RepoError::Duplicate(_)) => {
                return Ok(AdmissionOutcome::Rejected {
                    reason: RejectionReason::AlreadyRegistered,
                });
            }
            Err(e) => return Err(e.into()),
        };

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit registration: {e}")))?;

        Ok(AdmissionOutcome::Accepted {
            status,
            position,
            registration: inserted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::club::{ClubDraft, test_draft};
    use crate::utils::clock::ManualClock;
    use shared::models::{RegistrationStatus, Weekday};

    async fn setup(now: i64) -> (DbService, Arc<ManualClock>, Arc<AdmissionService>) {
        let db = DbService::in_memory().await.unwrap();
        let clock = Arc::new(ManualClock::new(now));
        let service = Arc::new(AdmissionService::new(db.pool.clone(), clock.clone()));
        (db, clock, service)
    }

    /// File database with a multi-connection pool, as in production
    async fn file_setup(
        now: i64,
    ) -> (tempfile::TempDir, DbService, Arc<ManualClock>, Arc<AdmissionService>) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clubs.db");
        let db = DbService::new(path.to_str().unwrap()).await.unwrap();
        let clock = Arc::new(ManualClock::new(now));
        let service = Arc::new(AdmissionService::new(db.pool.clone(), clock.clone()));
        (dir, db, clock, service)
    }

    async fn make_club(db: &DbService, draft: ClubDraft) -> i64 {
        club::create(&db.pool, &draft, 0).await.unwrap().id
    }

    fn request(student: &str) -> RegistrationRequest {
        RegistrationRequest {
            student_identifier: student.to_string(),
            student_name: format!("Student {student}"),
            guardian_phone: "0912345678".to_string(),
        }
    }

    fn small(name: &str, weekday: Weekday, start: (u32, u32), end: (u32, u32)) -> ClubDraft {
        let mut d = test_draft(name, weekday, start, end);
        d.capacity_primary = 2;
        d.capacity_waitlist = 1;
        d
    }

    #[tokio::test]
    async fn sequential_attempts_fill_pools_in_order() {
        let (db, _clock, service) = setup(1_500).await;
        let id = make_club(&db, small("Chess", Weekday::Monday, (14, 0), (15, 0))).await;

        let mut outcomes = Vec::new();
        for s in ["s1", "s2", "s3", "s4"] {
            outcomes.push(service.attempt(id, &request(s)).await.unwrap());
        }

        assert!(matches!(
            &outcomes[0],
            AdmissionOutcome::Accepted { status: RegistrationStatus::Primary, .. }
        ));
        assert!(matches!(
            &outcomes[1],
            AdmissionOutcome::Accepted { status: RegistrationStatus::Primary, .. }
        ));
        assert!(matches!(
            &outcomes[2],
            AdmissionOutcome::Accepted {
                status: RegistrationStatus::Waitlisted,
                position: Some(1),
                ..
            }
        ));
        assert_eq!(
            outcomes[3],
            AdmissionOutcome::Rejected {
                reason: RejectionReason::Full
            }
        );
    }

    #[tokio::test]
    async fn second_attempt_by_same_student_is_duplicate() {
        let (db, _clock, service) = setup(1_500).await;
        let id = make_club(&db, small("Chess", Weekday::Monday, (14, 0), (15, 0))).await;

        assert!(service.attempt(id, &request("s1")).await.unwrap().is_accepted());
        assert_eq!(
            service.attempt(id, &request(" s1 ")).await.unwrap(),
            AdmissionOutcome::Rejected {
                reason: RejectionReason::AlreadyRegistered
            }
        );
        assert_eq!(club::count_seats(&db.pool, id).await.unwrap().primary, 1);
    }

    #[tokio::test]
    async fn conflicting_schedule_is_rejected_and_not_written() {
        let (db, _clock, service) = setup(1_500).await;
        let a = make_club(&db, small("Chess", Weekday::Wednesday, (14, 0), (15, 0))).await;
        let b = make_club(&db, small("Go", Weekday::Wednesday, (14, 30), (15, 30))).await;
        let c = make_club(&db, small("Art", Weekday::Wednesday, (15, 0), (16, 0))).await;

        assert!(service.attempt(a, &request("s1")).await.unwrap().is_accepted());
        assert_eq!(
            service.attempt(b, &request("s1")).await.unwrap(),
            AdmissionOutcome::Rejected {
                reason: RejectionReason::ScheduleConflict {
                    club_id: a,
                    club_name: "Chess".into()
                }
            }
        );
        assert_eq!(club::count_seats(&db.pool, b).await.unwrap().primary, 0);
        // back-to-back is fine
        assert!(service.attempt(c, &request("s1")).await.unwrap().is_accepted());
    }

    #[tokio::test]
    async fn window_follows_the_injected_clock() {
        let (db, clock, service) = setup(999).await;
        let id = make_club(&db, small("Chess", Weekday::Monday, (14, 0), (15, 0))).await;

        assert_eq!(
            service.attempt(id, &request("s1")).await.unwrap(),
            AdmissionOutcome::Rejected {
                reason: RejectionReason::NotYetOpen { opens_at: 1_000 }
            }
        );
        clock.set(1_000);
        assert!(service.attempt(id, &request("s1")).await.unwrap().is_accepted());
        clock.set(2_001);
        assert_eq!(
            service.attempt(id, &request("s2")).await.unwrap(),
            AdmissionOutcome::Rejected {
                reason: RejectionReason::Closed
            }
        );
    }

    #[tokio::test]
    async fn unknown_club_is_an_error() {
        let (_db, _clock, service) = setup(1_500).await;
        let err = service.attempt(404, &request("s1")).await.unwrap_err();
        assert_eq!(err.code, shared::error::ErrorCode::ClubNotFound);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn parallel_attempts_admit_exactly_the_capacity() {
        let (_dir, db, _clock, service) = file_setup(1_500).await;
        let mut draft = test_draft("Robotics", Weekday::Thursday, (14, 0), (16, 0));
        draft.capacity_primary = 5;
        draft.capacity_waitlist = 3;
        let id = make_club(&db, draft).await;

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let service = service.clone();
                tokio::spawn(async move { service.attempt(id, &request(&format!("s{i}"))).await })
            })
            .collect();

        let mut primary = 0;
        let mut positions = Vec::new();
        let mut full = 0;
        for h in handles {
            match h.await.unwrap().unwrap() {
                AdmissionOutcome::Accepted {
                    status: RegistrationStatus::Primary,
                    ..
                } => primary += 1,
                AdmissionOutcome::Accepted {
                    status: RegistrationStatus::Waitlisted,
                    position,
                    ..
                } => positions.push(position.unwrap()),
                AdmissionOutcome::Rejected {
                    reason: RejectionReason::Full,
                } => full += 1,
                other => panic!("unexpected outcome: {other:?}"),
            }
        }

        positions.sort();
        assert_eq!(primary, 5);
        assert_eq!(positions, vec![1, 2, 3]);
        assert_eq!(full, 12);
        assert_eq!(
            club::count_seats(&db.pool, id).await.unwrap(),
            engine::SeatCounts {
                primary: 5,
                waitlisted: 3
            }
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn same_student_racing_overlapping_clubs_gets_one() {
        let (_dir, db, _clock, service) = file_setup(1_500).await;
        let a = make_club(&db, small("Chess", Weekday::Friday, (14, 0), (15, 0))).await;
        let b = make_club(&db, small("Go", Weekday::Friday, (14, 30), (15, 30))).await;

        let s1 = service.clone();
        let s2 = service.clone();
        let (ra, rb) = tokio::join!(
            tokio::spawn(async move { s1.attempt(a, &request("s1")).await }),
            tokio::spawn(async move { s2.attempt(b, &request("s1")).await }),
        );
        let accepted = [ra.unwrap().unwrap(), rb.unwrap().unwrap()]
            .iter()
            .filter(|o| o.is_accepted())
            .count();
        assert_eq!(accepted, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn parallel_attempts_on_distinct_clubs_all_succeed() {
        let (_dir, db, _clock, service) = file_setup(1_500).await;
        let mut ids = Vec::new();
        for i in 0..30 {
            let mut draft = test_draft(&format!("Club {i}"), Weekday::Tuesday, (14, 0), (15, 0));
            draft.capacity_primary = 20;
            draft.capacity_waitlist = 5;
            ids.push(make_club(&db, draft).await);
        }

        let handles: Vec<_> = ids
            .iter()
            .enumerate()
            .map(|(i, &id)| {
                let service = service.clone();
                tokio::spawn(async move { service.attempt(id, &request(&format!("t{i}"))).await })
            })
            .collect();

        for h in handles {
            let outcome = h.await.unwrap().unwrap();
            assert!(
                matches!(
                    outcome,
                    AdmissionOutcome::Accepted {
                        status: RegistrationStatus::Primary,
                        ..
                    }
                ),
                "unexpected outcome: {outcome:?}"
            );
        }
        for id in ids {
            assert_eq!(club::count_seats(&db.pool, id).await.unwrap().primary, 1);
        }
    }

    #[tokio::test]
    async fn attempt_waits_for_the_club_lock() {
        let (db, _clock, service) = setup(1_500).await;
        let id = make_club(&db, small("Chess", Weekday::Monday, (14, 0), (15, 0))).await;

        let guard = service.lock_club(id).await;
        let pending = {
            let service = service.clone();
            tokio::spawn(async move { service.attempt(id, &request("s1")).await })
        };
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(!pending.is_finished());
        assert_eq!(club::count_seats(&db.pool, id).await.unwrap().primary, 0);

        drop(guard);
        assert!(pending.await.unwrap().unwrap().is_accepted());
    }

    #[tokio::test]
    async fn attempt_waits_for_the_student_lock() {
        let (db, _clock, service) = setup(1_500).await;
        let id = make_club(&db, small("Chess", Weekday::Monday, (14, 0), (15, 0))).await;

        let guard = service.student_locks.lock(&"s1".to_string()).await;
        let pending = {
            let service = service.clone();
            tokio::spawn(async move { service.attempt(id, &request(" s1 ")).await })
        };
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(!pending.is_finished());

        drop(guard);
        assert!(pending.await.unwrap().unwrap().is_accepted());
        // other students are not held up by the lock
        assert!(service.attempt(id, &request("s2")).await.unwrap().is_accepted());
    }
}

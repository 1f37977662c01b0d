//! `SQLite` implementation of [`ReservationRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use munihub_app::ports::ReservationRepository;
use munihub_domain::error::PortalError;
use munihub_domain::id::{FacilityId, ReservationId};
use munihub_domain::reservation::Reservation;

use crate::codec;
use crate::error::StorageError;

struct Wrapper(Reservation);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Reservation {
            id: codec::parsed(row, "id")?,
            facility_id: codec::parsed(row, "facility_id")?,
            reserved_by: row.try_get("reserved_by")?,
            contact: row.try_get("contact")?,
            purpose: row.try_get("purpose")?,
            attendees: codec::count(row, "attendees")?,
            starts_at: codec::timestamp_col(row, "starts_at")?,
            ends_at: codec::timestamp_col(row, "ends_at")?,
            status: codec::parsed(row, "status")?,
            created_at: codec::timestamp_col(row, "created_at")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO reservations (id, facility_id, reserved_by, contact, purpose, attendees, starts_at, ends_at, status, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM reservations WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM reservations ORDER BY starts_at";
const SELECT_BY_FACILITY: &str =
    "SELECT * FROM reservations WHERE facility_id = ? ORDER BY starts_at";
const UPDATE: &str = "UPDATE reservations SET reserved_by = ?, contact = ?, purpose = ?, attendees = ?, starts_at = ?, ends_at = ?, status = ? WHERE id = ?";

/// `SQLite`-backed reservation repository.
#[derive(Clone)]
pub struct SqliteReservationRepository {
    pool: SqlitePool,
}

impl SqliteReservationRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ReservationRepository for SqliteReservationRepository {
    async fn create(&self, reservation: Reservation) -> Result<Reservation, PortalError> {
        sqlx::query(INSERT)
            .bind(reservation.id.to_string())
            .bind(reservation.facility_id.to_string())
            .bind(&reservation.reserved_by)
            .bind(&reservation.contact)
            .bind(&reservation.purpose)
            .bind(i64::from(reservation.attendees))
            .bind(codec::timestamp(&reservation.starts_at))
            .bind(codec::timestamp(&reservation.ends_at))
            .bind(reservation.status.as_str())
            .bind(codec::timestamp(&reservation.created_at))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(reservation)
    }

    async fn get_by_id(&self, id: ReservationId) -> Result<Option<Reservation>, PortalError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn get_all(&self) -> Result<Vec<Reservation>, PortalError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn list_by_facility(
        &self,
        facility_id: FacilityId,
    ) -> Result<Vec<Reservation>, PortalError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_FACILITY)
            .bind(facility_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, reservation: Reservation) -> Result<Reservation, PortalError> {
        sqlx::query(UPDATE)
            .bind(&reservation.reserved_by)
            .bind(&reservation.contact)
            .bind(&reservation.purpose)
            .bind(i64::from(reservation.attendees))
            .bind(codec::timestamp(&reservation.starts_at))
            .bind(codec::timestamp(&reservation.ends_at))
            .bind(reservation.status.as_str())
            .bind(reservation.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(reservation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility_repo::SqliteFacilityRepository;
    use crate::fixtures;
    use munihub_app::ports::FacilityRepository;
    use munihub_domain::reservation::{Facility, FacilityKind, ReservationStatus};
    use munihub_domain::time::parse_timestamp;

    async fn facility(db: &crate::pool::Database) -> Facility {
        SqliteFacilityRepository::new(db.pool().clone())
            .create(
                Facility::builder(FacilityKind::Court)
                    .name("Barangay Court")
                    .capacity(40)
                    .build()
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    fn booking(facility_id: FacilityId, from: &str, to: &str) -> Reservation {
        Reservation::builder(facility_id)
            .reserved_by("Youth Council")
            .contact("youth@example.org")
            .attendees(20)
            .period(parse_timestamp(from).unwrap(), parse_timestamp(to).unwrap())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_list_facility_reservations_by_start() {
        let db = fixtures::database().await;
        let court = facility(&db).await;
        let repo = SqliteReservationRepository::new(db.pool().clone());
        let afternoon = booking(court.id, "2026-08-01T13:00:00Z", "2026-08-01T15:00:00Z");
        let morning = booking(court.id, "2026-08-01T08:00:00Z", "2026-08-01T10:00:00Z");
        repo.create(afternoon.clone()).await.unwrap();
        repo.create(morning.clone()).await.unwrap();

        let listed = repo.list_by_facility(court.id).await.unwrap();
        assert_eq!(listed, vec![morning, afternoon]);
    }

    #[tokio::test]
    async fn should_persist_status_change() {
        let db = fixtures::database().await;
        let court = facility(&db).await;
        let repo = SqliteReservationRepository::new(db.pool().clone());
        let mut reservation = repo
            .create(booking(court.id, "2026-08-01T08:00:00Z", "2026-08-01T10:00:00Z"))
            .await
            .unwrap();
        reservation.transition(ReservationStatus::Confirmed).unwrap();

        repo.update(reservation.clone()).await.unwrap();
        let fetched = repo.get_by_id(reservation.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, ReservationStatus::Confirmed);
    }

    #[tokio::test]
    async fn should_drop_reservations_with_their_facility() {
        let db = fixtures::database().await;
        let court = facility(&db).await;
        let repo = SqliteReservationRepository::new(db.pool().clone());
        repo.create(booking(court.id, "2026-08-01T08:00:00Z", "2026-08-01T10:00:00Z"))
            .await
            .unwrap();

        SqliteFacilityRepository::new(db.pool().clone())
            .delete(court.id)
            .await
            .unwrap();
        assert!(repo.get_all().await.unwrap().is_empty());
    }
}

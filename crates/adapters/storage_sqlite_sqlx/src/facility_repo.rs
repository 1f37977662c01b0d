//! `SQLite` implementation of [`FacilityRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use munihub_app::ports::FacilityRepository;
use munihub_domain::error::PortalError;
use munihub_domain::id::FacilityId;
use munihub_domain::reservation::Facility;

use crate::codec;
use crate::error::StorageError;

struct Wrapper(Facility);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Facility {
            id: codec::parsed(row, "id")?,
            name: row.try_get("name")?,
            kind: codec::parsed(row, "kind")?,
            capacity: codec::count(row, "capacity")?,
            location: codec::location(row)?,
            description: row.try_get("description")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO facilities (id, name, kind, capacity, latitude, longitude, description) VALUES (?, ?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM facilities WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM facilities ORDER BY name COLLATE NOCASE";
const DELETE_BY_ID: &str = "DELETE FROM facilities WHERE id = ?";

/// `SQLite`-backed facility repository.
#[derive(Clone)]
pub struct SqliteFacilityRepository {
    pool: SqlitePool,
}

impl SqliteFacilityRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl FacilityRepository for SqliteFacilityRepository {
    async fn create(&self, facility: Facility) -> Result<Facility, PortalError> {
        sqlx::query(INSERT)
            .bind(facility.id.to_string())
            .bind(&facility.name)
            .bind(facility.kind.as_str())
            .bind(i64::from(facility.capacity))
            .bind(facility.location.map(|c| c.latitude))
            .bind(facility.location.map(|c| c.longitude))
            .bind(&facility.description)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(facility)
    }

    async fn get_by_id(&self, id: FacilityId) -> Result<Option<Facility>, PortalError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn get_all(&self) -> Result<Vec<Facility>, PortalError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn delete(&self, id: FacilityId) -> Result<(), PortalError> {
        sqlx::query(DELETE_BY_ID)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use munihub_domain::geo::Coordinate;
    use munihub_domain::reservation::FacilityKind;

    #[tokio::test]
    async fn should_round_trip_facility() {
        let db = fixtures::database().await;
        let repo = SqliteFacilityRepository::new(db.pool().clone());
        let facility = Facility::builder(FacilityKind::Pavilion)
            .name("Plaza Pavilion")
            .capacity(120)
            .location(Coordinate::new(14.1, 121.2).unwrap())
            .description("Covered, with stage")
            .build()
            .unwrap();

        repo.create(facility.clone()).await.unwrap();
        assert_eq!(repo.get_by_id(facility.id).await.unwrap(), Some(facility));
    }

    #[tokio::test]
    async fn should_list_facilities_by_name() {
        let db = fixtures::database().await;
        let repo = SqliteFacilityRepository::new(db.pool().clone());
        for name in ["Riverside Court", "aurora Park"] {
            repo.create(
                Facility::builder(FacilityKind::Park)
                    .name(name)
                    .capacity(10)
                    .build()
                    .unwrap(),
            )
            .await
            .unwrap();
        }

        let names: Vec<String> = repo
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["aurora Park", "Riverside Court"]);
    }
}

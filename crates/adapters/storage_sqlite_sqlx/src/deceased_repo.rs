//! `SQLite` implementation of [`DeceasedRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use munihub_app::ports::DeceasedRepository;
use munihub_domain::cemetery::Deceased;
use munihub_domain::error::PortalError;
use munihub_domain::id::{CemeteryId, DeceasedId};

use crate::codec;
use crate::error::StorageError;

struct Wrapper(Deceased);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Deceased {
            id: codec::parsed(row, "id")?,
            first_name: row.try_get("first_name")?,
            middle_name: row.try_get("middle_name")?,
            last_name: row.try_get("last_name")?,
            date_of_birth: codec::date_opt(row, "date_of_birth")?,
            date_of_death: codec::date_col(row, "date_of_death")?,
            cause_of_death: row.try_get("cause_of_death")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO deceased (id, first_name, middle_name, last_name, date_of_birth, date_of_death, cause_of_death) VALUES (?, ?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM deceased WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM deceased \
     ORDER BY last_name COLLATE NOCASE, first_name COLLATE NOCASE";
const SELECT_BY_CEMETERY: &str = "SELECT d.* FROM deceased d \
     JOIN assignments a ON a.deceased_id = d.id \
     JOIN plots p ON p.id = a.plot_id \
     JOIN blocks b ON b.id = p.block_id \
     JOIN sections s ON s.id = b.section_id \
     WHERE s.cemetery_id = ?";
const UPDATE: &str = "UPDATE deceased SET first_name = ?, middle_name = ?, last_name = ?, date_of_birth = ?, date_of_death = ?, cause_of_death = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM deceased WHERE id = ?";

/// `SQLite`-backed deceased registry.
#[derive(Clone)]
pub struct SqliteDeceasedRepository {
    pool: SqlitePool,
}

impl SqliteDeceasedRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DeceasedRepository for SqliteDeceasedRepository {
    async fn create(&self, deceased: Deceased) -> Result<Deceased, PortalError> {
        sqlx::query(INSERT)
            .bind(deceased.id.to_string())
            .bind(&deceased.first_name)
            .bind(&deceased.middle_name)
            .bind(&deceased.last_name)
            .bind(deceased.date_of_birth.as_ref().map(codec::date))
            .bind(codec::date(&deceased.date_of_death))
            .bind(&deceased.cause_of_death)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(deceased)
    }

    async fn get_by_id(&self, id: DeceasedId) -> Result<Option<Deceased>, PortalError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn get_all(&self) -> Result<Vec<Deceased>, PortalError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn list_by_cemetery(&self, cemetery_id: CemeteryId) -> Result<Vec<Deceased>, PortalError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_CEMETERY)
            .bind(cemetery_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, deceased: Deceased) -> Result<Deceased, PortalError> {
        sqlx::query(UPDATE)
            .bind(&deceased.first_name)
            .bind(&deceased.middle_name)
            .bind(&deceased.last_name)
            .bind(deceased.date_of_birth.as_ref().map(codec::date))
            .bind(codec::date(&deceased.date_of_death))
            .bind(&deceased.cause_of_death)
            .bind(deceased.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(deceased)
    }

    async fn delete(&self, id: DeceasedId) -> Result<(), PortalError> {
        sqlx::query(DELETE_BY_ID)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}

//! `SQLite` implementation of [`AssignmentRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, SqlitePool};

use munihub_app::ports::AssignmentRepository;
use munihub_domain::cemetery::Assignment;
use munihub_domain::error::PortalError;
use munihub_domain::id::{AssignmentId, CemeteryId, DeceasedId, PlotId};

use crate::codec;
use crate::error::StorageError;

struct Wrapper(Assignment);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Assignment {
            id: codec::parsed(row, "id")?,
            plot_id: codec::parsed(row, "plot_id")?,
            deceased_id: codec::parsed(row, "deceased_id")?,
            interment_date: codec::date_opt(row, "interment_date")?,
            assigned_at: codec::timestamp_col(row, "assigned_at")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO assignments (id, plot_id, deceased_id, interment_date, assigned_at) VALUES (?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM assignments WHERE id = ?";
const SELECT_BY_PLOT: &str = "SELECT * FROM assignments WHERE plot_id = ? ORDER BY assigned_at";
const SELECT_BY_DECEASED: &str = "SELECT * FROM assignments WHERE deceased_id = ?";
const SELECT_BY_CEMETERY: &str = "SELECT a.* FROM assignments a \
     JOIN plots p ON p.id = a.plot_id \
     JOIN blocks b ON b.id = p.block_id \
     JOIN sections s ON s.id = b.section_id \
     WHERE s.cemetery_id = ?";
const DELETE_BY_ID: &str = "DELETE FROM assignments WHERE id = ?";

/// `SQLite`-backed assignment repository.
#[derive(Clone)]
pub struct SqliteAssignmentRepository {
    pool: SqlitePool,
}

impl SqliteAssignmentRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl AssignmentRepository for SqliteAssignmentRepository {
    async fn create(&self, assignment: Assignment) -> Result<Assignment, PortalError> {
        sqlx::query(INSERT)
            .bind(assignment.id.to_string())
            .bind(assignment.plot_id.to_string())
            .bind(assignment.deceased_id.to_string())
            .bind(assignment.interment_date.as_ref().map(codec::date))
            .bind(codec::timestamp(&assignment.assigned_at))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(assignment)
    }

    async fn get_by_id(&self, id: AssignmentId) -> Result<Option<Assignment>, PortalError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn list_by_plot(&self, plot_id: PlotId) -> Result<Vec<Assignment>, PortalError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_PLOT)
            .bind(plot_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn find_by_deceased(
        &self,
        deceased_id: DeceasedId,
    ) -> Result<Option<Assignment>, PortalError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_DECEASED)
            .bind(deceased_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn list_by_cemetery(
        &self,
        cemetery_id: CemeteryId,
    ) -> Result<Vec<Assignment>, PortalError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_CEMETERY)
            .bind(cemetery_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn delete(&self, id: AssignmentId) -> Result<(), PortalError> {
        sqlx::query(DELETE_BY_ID)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}

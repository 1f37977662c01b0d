//! `SQLite` implementation of [`PlotRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use munihub_app::ports::PlotRepository;
use munihub_domain::cemetery::Plot;
use munihub_domain::error::PortalError;
use munihub_domain::id::{BlockId, CemeteryId, PlotId};

use crate::codec;
use crate::error::StorageError;

struct Wrapper(Plot);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Plot {
            id: codec::parsed(row, "id")?,
            block_id: codec::parsed(row, "block_id")?,
            lot: row.try_get("lot")?,
            kind: codec::parsed(row, "kind")?,
            status: codec::parsed(row, "status")?,
            capacity: codec::count(row, "capacity")?,
            location: codec::location(row)?,
        }))
    }
}

const INSERT: &str = "INSERT INTO plots (id, block_id, lot, kind, status, capacity, latitude, longitude) VALUES (?, ?, ?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM plots WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM plots";
const SELECT_BY_BLOCK: &str = "SELECT * FROM plots WHERE block_id = ? ORDER BY lot";
const SELECT_BY_CEMETERY: &str = "SELECT p.* FROM plots p \
     JOIN blocks b ON b.id = p.block_id \
     JOIN sections s ON s.id = b.section_id \
     WHERE s.cemetery_id = ?";
const UPDATE: &str = "UPDATE plots SET lot = ?, kind = ?, status = ?, capacity = ?, latitude = ?, longitude = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM plots WHERE id = ?";

/// `SQLite`-backed plot repository.
#[derive(Clone)]
pub struct SqlitePlotRepository {
    pool: SqlitePool,
}

impl SqlitePlotRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl PlotRepository for SqlitePlotRepository {
    async fn create(&self, plot: Plot) -> Result<Plot, PortalError> {
        sqlx::query(INSERT)
            .bind(plot.id.to_string())
            .bind(plot.block_id.to_string())
            .bind(&plot.lot)
            .bind(plot.kind.as_str())
            .bind(plot.status.as_str())
            .bind(i64::from(plot.capacity))
            .bind(plot.location.map(|c| c.latitude))
            .bind(plot.location.map(|c| c.longitude))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(plot)
    }

    async fn get_by_id(&self, id: PlotId) -> Result<Option<Plot>, PortalError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn get_all(&self) -> Result<Vec<Plot>, PortalError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn list_by_block(&self, block_id: BlockId) -> Result<Vec<Plot>, PortalError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_BLOCK)
            .bind(block_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn list_by_cemetery(&self, cemetery_id: CemeteryId) -> Result<Vec<Plot>, PortalError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_CEMETERY)
            .bind(cemetery_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, plot: Plot) -> Result<Plot, PortalError> {
        sqlx::query(UPDATE)
            .bind(&plot.lot)
            .bind(plot.kind.as_str())
            .bind(plot.status.as_str())
            .bind(i64::from(plot.capacity))
            .bind(plot.location.map(|c| c.latitude))
            .bind(plot.location.map(|c| c.longitude))
            .bind(plot.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(plot)
    }

    async fn delete(&self, id: PlotId) -> Result<(), PortalError> {
        sqlx::query(DELETE_BY_ID)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}

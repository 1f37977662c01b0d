//! `SQLite` implementation of [`CemeteryRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use munihub_app::ports::CemeteryRepository;
use munihub_domain::cemetery::{Block, Cemetery, Section};
use munihub_domain::error::PortalError;
use munihub_domain::id::{BlockId, CemeteryId, SectionId};

use crate::codec;
use crate::error::StorageError;

/// Wrappers for converting database rows into domain layout records.
struct CemeteryRow(Cemetery);
struct SectionRow(Section);
struct BlockRow(Block);

impl<'r> FromRow<'r, SqliteRow> for CemeteryRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Cemetery {
            id: codec::parsed(row, "id")?,
            name: row.try_get("name")?,
            address: row.try_get("address")?,
            location: codec::location(row)?,
            boundary: codec::boundary_col(row)?,
        }))
    }
}

impl<'r> FromRow<'r, SqliteRow> for SectionRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Section {
            id: codec::parsed(row, "id")?,
            cemetery_id: codec::parsed(row, "cemetery_id")?,
            name: row.try_get("name")?,
            boundary: codec::boundary_col(row)?,
        }))
    }
}

impl<'r> FromRow<'r, SqliteRow> for BlockRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Block {
            id: codec::parsed(row, "id")?,
            section_id: codec::parsed(row, "section_id")?,
            name: row.try_get("name")?,
            boundary: codec::boundary_col(row)?,
        }))
    }
}

const INSERT_CEMETERY: &str = "INSERT INTO cemeteries (id, name, address, latitude, longitude, boundary) VALUES (?, ?, ?, ?, ?, ?)";
const SELECT_CEMETERY: &str = "SELECT * FROM cemeteries WHERE id = ?";
const SELECT_CEMETERIES: &str = "SELECT * FROM cemeteries ORDER BY name COLLATE NOCASE";
const UPDATE_CEMETERY: &str = "UPDATE cemeteries SET name = ?, address = ?, latitude = ?, longitude = ?, boundary = ? WHERE id = ?";
const DELETE_CEMETERY: &str = "DELETE FROM cemeteries WHERE id = ?";

const INSERT_SECTION: &str =
    "INSERT INTO sections (id, cemetery_id, name, boundary) VALUES (?, ?, ?, ?)";
const SELECT_SECTION: &str = "SELECT * FROM sections WHERE id = ?";
const SELECT_SECTIONS: &str =
    "SELECT * FROM sections WHERE cemetery_id = ? ORDER BY name COLLATE NOCASE";
const DELETE_SECTION: &str = "DELETE FROM sections WHERE id = ?";

const INSERT_BLOCK: &str = "INSERT INTO blocks (id, section_id, name, boundary) VALUES (?, ?, ?, ?)";
const SELECT_BLOCK: &str = "SELECT * FROM blocks WHERE id = ?";
const SELECT_BLOCKS: &str = "SELECT * FROM blocks WHERE section_id = ? ORDER BY name COLLATE NOCASE";
const SELECT_BLOCKS_IN_CEMETERY: &str = "SELECT b.* FROM blocks b \
     JOIN sections s ON s.id = b.section_id \
     WHERE s.cemetery_id = ?";
const DELETE_BLOCK: &str = "DELETE FROM blocks WHERE id = ?";

/// `SQLite`-backed repository for cemeteries, sections and blocks.
#[derive(Clone)]
pub struct SqliteCemeteryRepository {
    pool: SqlitePool,
}

impl SqliteCemeteryRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl CemeteryRepository for SqliteCemeteryRepository {
    fn create_cemetery(
        &self,
        cemetery: Cemetery,
    ) -> impl Future<Output = Result<Cemetery, PortalError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT_CEMETERY)
                .bind(cemetery.id.to_string())
                .bind(&cemetery.name)
                .bind(&cemetery.address)
                .bind(cemetery.location.map(|c| c.latitude))
                .bind(cemetery.location.map(|c| c.longitude))
                .bind(codec::boundary(&cemetery.boundary)?)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(cemetery)
        }
    }

    fn get_cemetery(
        &self,
        id: CemeteryId,
    ) -> impl Future<Output = Result<Option<Cemetery>, PortalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<CemeteryRow> = sqlx::query_as(SELECT_CEMETERY)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn list_cemeteries(&self) -> impl Future<Output = Result<Vec<Cemetery>, PortalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<CemeteryRow> = sqlx::query_as(SELECT_CEMETERIES)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update_cemetery(
        &self,
        cemetery: Cemetery,
    ) -> impl Future<Output = Result<Cemetery, PortalError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE_CEMETERY)
                .bind(&cemetery.name)
                .bind(&cemetery.address)
                .bind(cemetery.location.map(|c| c.latitude))
                .bind(cemetery.location.map(|c| c.longitude))
                .bind(codec::boundary(&cemetery.boundary)?)
                .bind(cemetery.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(cemetery)
        }
    }

    fn delete_cemetery(&self, id: CemeteryId) -> impl Future<Output = Result<(), PortalError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_CEMETERY)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }

    fn create_section(
        &self,
        section: Section,
    ) -> impl Future<Output = Result<Section, PortalError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT_SECTION)
                .bind(section.id.to_string())
                .bind(section.cemetery_id.to_string())
                .bind(&section.name)
                .bind(codec::boundary(&section.boundary)?)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(section)
        }
    }

    fn get_section(
        &self,
        id: SectionId,
    ) -> impl Future<Output = Result<Option<Section>, PortalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<SectionRow> = sqlx::query_as(SELECT_SECTION)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn list_sections(
        &self,
        cemetery_id: CemeteryId,
    ) -> impl Future<Output = Result<Vec<Section>, PortalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<SectionRow> = sqlx::query_as(SELECT_SECTIONS)
                .bind(cemetery_id.to_string())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn delete_section(&self, id: SectionId) -> impl Future<Output = Result<(), PortalError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_SECTION)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }

    fn create_block(&self, block: Block) -> impl Future<Output = Result<Block, PortalError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT_BLOCK)
                .bind(block.id.to_string())
                .bind(block.section_id.to_string())
                .bind(&block.name)
                .bind(codec::boundary(&block.boundary)?)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(block)
        }
    }

    fn get_block(
        &self,
        id: BlockId,
    ) -> impl Future<Output = Result<Option<Block>, PortalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<BlockRow> = sqlx::query_as(SELECT_BLOCK)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn list_blocks(
        &self,
        section_id: SectionId,
    ) -> impl Future<Output = Result<Vec<Block>, PortalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<BlockRow> = sqlx::query_as(SELECT_BLOCKS)
                .bind(section_id.to_string())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn list_blocks_in_cemetery(
        &self,
        cemetery_id: CemeteryId,
    ) -> impl Future<Output = Result<Vec<Block>, PortalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<BlockRow> = sqlx::query_as(SELECT_BLOCKS_IN_CEMETERY)
                .bind(cemetery_id.to_string())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn delete_block(&self, id: BlockId) -> impl Future<Output = Result<(), PortalError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BLOCK)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }
}

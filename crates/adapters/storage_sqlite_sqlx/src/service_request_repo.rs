//! `SQLite` implementation of [`ServiceRequestRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use munihub_app::ports::ServiceRequestRepository;
use munihub_domain::error::PortalError;
use munihub_domain::id::ServiceRequestId;
use munihub_domain::service_request::{RequestStatus, ServiceRequest};

use crate::codec;
use crate::error::StorageError;

struct Wrapper(ServiceRequest);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(ServiceRequest {
            id: codec::parsed(row, "id")?,
            category: codec::parsed(row, "category")?,
            priority: codec::parsed(row, "priority")?,
            description: row.try_get("description")?,
            address: row.try_get("address")?,
            location: codec::location(row)?,
            reporter_name: row.try_get("reporter_name")?,
            reporter_contact: row.try_get("reporter_contact")?,
            status: codec::parsed(row, "status")?,
            created_at: codec::timestamp_col(row, "created_at")?,
            updated_at: codec::timestamp_col(row, "updated_at")?,
            resolved_at: codec::timestamp_opt(row, "resolved_at")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO service_requests (id, category, priority, description, address, latitude, longitude, reporter_name, reporter_contact, status, created_at, updated_at, resolved_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM service_requests WHERE id = ?";
const SELECT_FILTERED: &str = "SELECT * FROM service_requests \
     WHERE (? IS NULL OR status = ?) \
     ORDER BY created_at DESC";
const UPDATE: &str = "UPDATE service_requests SET priority = ?, status = ?, updated_at = ?, resolved_at = ? WHERE id = ?";

/// `SQLite`-backed service request repository.
#[derive(Clone)]
pub struct SqliteServiceRequestRepository {
    pool: SqlitePool,
}

impl SqliteServiceRequestRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ServiceRequestRepository for SqliteServiceRequestRepository {
    async fn create(&self, request: ServiceRequest) -> Result<ServiceRequest, PortalError> {
        sqlx::query(INSERT)
            .bind(request.id.to_string())
            .bind(request.category.as_str())
            .bind(request.priority.as_str())
            .bind(&request.description)
            .bind(&request.address)
            .bind(request.location.map(|c| c.latitude))
            .bind(request.location.map(|c| c.longitude))
            .bind(&request.reporter_name)
            .bind(&request.reporter_contact)
            .bind(request.status.as_str())
            .bind(codec::timestamp(&request.created_at))
            .bind(codec::timestamp(&request.updated_at))
            .bind(request.resolved_at.as_ref().map(codec::timestamp))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(request)
    }

    async fn get_by_id(&self, id: ServiceRequestId) -> Result<Option<ServiceRequest>, PortalError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn list(&self, status: Option<RequestStatus>) -> Result<Vec<ServiceRequest>, PortalError> {
        let status = status.map(|s| s.as_str());
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_FILTERED)
            .bind(status)
            .bind(status)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, request: ServiceRequest) -> Result<ServiceRequest, PortalError> {
        sqlx::query(UPDATE)
            .bind(request.priority.as_str())
            .bind(request.status.as_str())
            .bind(codec::timestamp(&request.updated_at))
            .bind(request.resolved_at.as_ref().map(codec::timestamp))
            .bind(request.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(request)
    }
}

//! `SQLite` implementation of [`PermitRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use munihub_app::ports::{PermitFilter, PermitRepository};
use munihub_domain::error::{ConflictError, PortalError};
use munihub_domain::id::PermitId;
use munihub_domain::permit::Permit;

use crate::codec;
use crate::error::StorageError;

struct Wrapper(Permit);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Permit {
            id: codec::parsed(row, "id")?,
            reference: row.try_get("reference")?,
            kind: codec::parsed(row, "kind")?,
            deceased_id: codec::parsed(row, "deceased_id")?,
            plot_id: codec::parsed_opt(row, "plot_id")?,
            applicant_name: row.try_get("applicant_name")?,
            applicant_contact: row.try_get("applicant_contact")?,
            status: codec::parsed(row, "status")?,
            remarks: row.try_get("remarks")?,
            submitted_at: codec::timestamp_col(row, "submitted_at")?,
            decided_at: codec::timestamp_opt(row, "decided_at")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO permits (id, reference, kind, deceased_id, plot_id, applicant_name, applicant_contact, status, remarks, submitted_at, decided_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM permits WHERE id = ?";
// Each filter value is bound twice: once for the NULL check, once for the match.
const SELECT_FILTERED: &str = "SELECT * FROM permits \
     WHERE (? IS NULL OR status = ?) AND (? IS NULL OR kind = ?) \
     ORDER BY submitted_at DESC";
const UPDATE: &str = "UPDATE permits SET status = ?, remarks = ?, decided_at = ? WHERE id = ?";

/// `SQLite`-backed permit repository.
#[derive(Clone)]
pub struct SqlitePermitRepository {
    pool: SqlitePool,
}

impl SqlitePermitRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl PermitRepository for SqlitePermitRepository {
    async fn create(&self, permit: Permit) -> Result<Permit, PortalError> {
        sqlx::query(INSERT)
            .bind(permit.id.to_string())
            .bind(&permit.reference)
            .bind(permit.kind.as_str())
            .bind(permit.deceased_id.to_string())
            .bind(permit.plot_id.map(|id| id.to_string()))
            .bind(&permit.applicant_name)
            .bind(&permit.applicant_contact)
            .bind(permit.status.as_str())
            .bind(&permit.remarks)
            .bind(codec::timestamp(&permit.submitted_at))
            .bind(permit.decided_at.as_ref().map(codec::timestamp))
            .execute(&self.pool)
            .await
            .map_err(|err| match err {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    PortalError::from(ConflictError::DuplicateReference {
                        reference: permit.reference.clone(),
                    })
                }
                other => StorageError::from(other).into(),
            })?;

        Ok(permit)
    }

    async fn get_by_id(&self, id: PermitId) -> Result<Option<Permit>, PortalError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn list(&self, filter: PermitFilter) -> Result<Vec<Permit>, PortalError> {
        let status = filter.status.map(|s| s.as_str());
        let kind = filter.kind.map(|k| k.as_str());
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_FILTERED)
            .bind(status)
            .bind(status)
            .bind(kind)
            .bind(kind)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    /// Only the review fields change once a permit is filed.
    async fn update(&self, permit: Permit) -> Result<Permit, PortalError> {
        sqlx::query(UPDATE)
            .bind(permit.status.as_str())
            .bind(&permit.remarks)
            .bind(permit.decided_at.as_ref().map(codec::timestamp))
            .bind(permit.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(permit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use munihub_domain::id::{DeceasedId, PlotId};
    use munihub_domain::permit::{PermitDecision, PermitKind, PermitStatus};
    use munihub_domain::time::parse_timestamp;

    fn permit(kind: PermitKind, submitted: &str) -> Permit {
        let mut builder = Permit::builder(kind, DeceasedId::new())
            .applicant_name("Rosa Cruz")
            .applicant_contact("0917-111-2222")
            .submitted_at(parse_timestamp(submitted).unwrap());
        if kind.requires_plot() {
            builder = builder.plot_id(PlotId::new());
        }
        builder.build().unwrap()
    }

    #[tokio::test]
    async fn should_round_trip_permit() {
        let db = fixtures::database().await;
        let repo = SqlitePermitRepository::new(db.pool().clone());
        let permit = permit(PermitKind::Burial, "2026-02-01T09:00:00Z");

        repo.create(permit.clone()).await.unwrap();
        assert_eq!(repo.get_by_id(permit.id).await.unwrap(), Some(permit));
    }

    #[tokio::test]
    async fn should_read_back_equal_permit_when_submitted_now() {
        let db = fixtures::database().await;
        let repo = SqlitePermitRepository::new(db.pool().clone());
        let permit = Permit::builder(PermitKind::Cremation, DeceasedId::new())
            .applicant_name("Rosa Cruz")
            .applicant_contact("0917-111-2222")
            .build()
            .unwrap();

        let created = repo.create(permit).await.unwrap();
        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(created.submitted_at, fetched.submitted_at);
        assert_eq!(created, fetched);
    }

    #[tokio::test]
    async fn should_report_conflict_when_reference_already_on_file() {
        let db = fixtures::database().await;
        let repo = SqlitePermitRepository::new(db.pool().clone());
        let first = permit(PermitKind::Burial, "2026-02-01T09:00:00Z");
        let clash = Permit {
            id: PermitId::new(),
            ..first.clone()
        };
        repo.create(first).await.unwrap();

        let result = repo.create(clash.clone()).await;
        assert!(matches!(
            result,
            Err(PortalError::Conflict(ConflictError::DuplicateReference { ref reference }))
                if *reference == clash.reference
        ));
    }

    #[tokio::test]
    async fn should_list_newest_first_and_filter() {
        let db = fixtures::database().await;
        let repo = SqlitePermitRepository::new(db.pool().clone());
        let old = permit(PermitKind::Burial, "2026-01-01T00:00:00Z");
        let new = permit(PermitKind::Cremation, "2026-03-01T00:00:00Z");
        let mut decided = permit(PermitKind::Burial, "2026-02-01T00:00:00Z");
        decided
            .decide(PermitDecision::Approve, None, parse_timestamp("2026-02-02T00:00:00Z").unwrap())
            .unwrap();
        for p in [&old, &new, &decided] {
            repo.create(p.clone()).await.unwrap();
        }

        let all: Vec<PermitId> = repo
            .list(PermitFilter::default())
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(all, vec![new.id, decided.id, old.id]);

        let burials = repo
            .list(PermitFilter {
                kind: Some(PermitKind::Burial),
                ..PermitFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(burials.len(), 2);

        let pending_burials = repo
            .list(PermitFilter {
                status: Some(PermitStatus::Pending),
                kind: Some(PermitKind::Burial),
            })
            .await
            .unwrap();
        assert_eq!(pending_burials.len(), 1);
        assert_eq!(pending_burials[0].id, old.id);
    }

    #[tokio::test]
    async fn should_persist_decision() {
        let db = fixtures::database().await;
        let repo = SqlitePermitRepository::new(db.pool().clone());
        let mut permit = repo
            .create(permit(PermitKind::Cremation, "2026-01-01T00:00:00Z"))
            .await
            .unwrap();
        permit
            .decide(
                PermitDecision::Reject,
                Some("incomplete documents".to_string()),
                parse_timestamp("2026-01-03T10:00:00Z").unwrap(),
            )
            .unwrap();

        repo.update(permit.clone()).await.unwrap();
        assert_eq!(repo.get_by_id(permit.id).await.unwrap(), Some(permit));
    }
}

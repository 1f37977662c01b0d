//! Bundle of every `SQLite` repository, sharing one pool.

use sqlx::SqlitePool;

use munihub_app::ports::Repositories;

use crate::assignment_repo::SqliteAssignmentRepository;
use crate::cemetery_repo::SqliteCemeteryRepository;
use crate::deceased_repo::SqliteDeceasedRepository;
use crate::facility_repo::SqliteFacilityRepository;
use crate::permit_repo::SqlitePermitRepository;
use crate::plot_repo::SqlitePlotRepository;
use crate::reservation_repo::SqliteReservationRepository;
use crate::service_request_repo::SqliteServiceRequestRepository;

/// Hands out repository instances backed by the same connection pool.
#[derive(Clone)]
pub struct SqliteRepositories {
    pool: SqlitePool,
}

impl SqliteRepositories {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repositories for SqliteRepositories {
    type Cemeteries = SqliteCemeteryRepository;
    type Plots = SqlitePlotRepository;
    type Deceased = SqliteDeceasedRepository;
    type Assignments = SqliteAssignmentRepository;
    type Permits = SqlitePermitRepository;
    type Facilities = SqliteFacilityRepository;
    type Reservations = SqliteReservationRepository;
    type ServiceRequests = SqliteServiceRequestRepository;

    fn cemeteries(&self) -> Self::Cemeteries {
        SqliteCemeteryRepository::new(self.pool.clone())
    }

    fn plots(&self) -> Self::Plots {
        SqlitePlotRepository::new(self.pool.clone())
    }

    fn deceased(&self) -> Self::Deceased {
        SqliteDeceasedRepository::new(self.pool.clone())
    }

    fn assignments(&self) -> Self::Assignments {
        SqliteAssignmentRepository::new(self.pool.clone())
    }

    fn permits(&self) -> Self::Permits {
        SqlitePermitRepository::new(self.pool.clone())
    }

    fn facilities(&self) -> Self::Facilities {
        SqliteFacilityRepository::new(self.pool.clone())
    }

    fn reservations(&self) -> Self::Reservations {
        SqliteReservationRepository::new(self.pool.clone())
    }

    fn service_requests(&self) -> Self::ServiceRequests {
        SqliteServiceRequestRepository::new(self.pool.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use munihub_app::ports::{AssignmentRepository, CemeteryRepository, PlotRepository, ReservationRepository};
    use munihub_app::services::burial_service::BurialService;
    use munihub_app::services::reservation_service::ReservationService;
    use munihub_domain::cemetery::{Deceased, Plot, PlotStatus};
    use munihub_domain::error::{ConflictError, PortalError};
    use munihub_domain::id::FacilityId;
    use munihub_domain::reservation::{Facility, FacilityKind, Reservation};
    use munihub_domain::time::{parse_date, parse_timestamp};

    fn deceased(first: &str, last: &str) -> Deceased {
        Deceased::builder()
            .first_name(first)
            .last_name(last)
            .date_of_death(parse_date("1950-01-01").unwrap())
            .build()
            .unwrap()
    }

    fn booking(facility: FacilityId, by: &str) -> Reservation {
        Reservation::builder(facility)
            .reserved_by(by)
            .contact("0917-555-0000")
            .attendees(10)
            .period(
                parse_timestamp("2026-06-01T10:00:00Z").unwrap(),
                parse_timestamp("2026-06-01T12:00:00Z").unwrap(),
            )
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_share_one_database_between_repositories() {
        let db = fixtures::database().await;
        let (cemetery_id, block_id) = fixtures::layout(&db).await;
        let repos = db.repositories();

        let cemetery = repos.cemeteries().get_cemetery(cemetery_id).await.unwrap();
        assert!(cemetery.is_some());
        let plot = repos
            .plots()
            .create(Plot::builder(block_id).lot("3").build().unwrap())
            .await
            .unwrap();
        assert_eq!(repos.plots().list_by_cemetery(cemetery_id).await.unwrap(), vec![plot]);
    }

    #[tokio::test]
    async fn should_run_burial_workflow_against_sqlite() {
        let db = fixtures::database().await;
        let (_, block_id) = fixtures::layout(&db).await;
        let repos = db.repositories();
        let service = BurialService::new(repos.plots(), repos.deceased(), repos.assignments());
        let plot = repos
            .plots()
            .create(Plot::builder(block_id).lot("9").build().unwrap())
            .await
            .unwrap();
        let deceased = service
            .create_deceased(
                Deceased::builder()
                    .first_name("Andres")
                    .last_name("Bonifacio")
                    .date_of_death(parse_date("1897-05-10").unwrap())
                    .build()
                    .unwrap(),
            )
            .await
            .unwrap();

        let assignment = service.assign(plot.id, deceased.id, None).await.unwrap();
        let stored = repos.plots().get_by_id(plot.id).await.unwrap().unwrap();
        assert_eq!(stored.status, PlotStatus::Occupied);

        service.unassign(assignment.id).await.unwrap();
        let stored = repos.plots().get_by_id(plot.id).await.unwrap().unwrap();
        assert_eq!(stored.status, PlotStatus::Available);
    }

    #[tokio::test]
    async fn should_not_overfill_plot_when_assignments_race() {
        let db = fixtures::database().await;
        let (_, block_id) = fixtures::layout(&db).await;
        let repos = db.repositories();
        let service = BurialService::new(repos.plots(), repos.deceased(), repos.assignments());
        let plot = repos
            .plots()
            .create(Plot::builder(block_id).lot("4").capacity(1).build().unwrap())
            .await
            .unwrap();
        let first = service.create_deceased(deceased("Jose", "Rizal")).await.unwrap();
        let second = service.create_deceased(deceased("Juan", "Luna")).await.unwrap();

        let (a, b) = tokio::join!(
            service.assign(plot.id, first.id, None),
            service.assign(plot.id, second.id, None),
        );

        assert_eq!(usize::from(a.is_ok()) + usize::from(b.is_ok()), 1);
        assert!(
            [a, b]
                .iter()
                .any(|r| matches!(r, Err(PortalError::Conflict(ConflictError::PlotFull { .. }))))
        );
        let occupants = repos.assignments().list_by_plot(plot.id).await.unwrap();
        assert_eq!(occupants.len(), 1);
    }

    #[tokio::test]
    async fn should_not_double_book_facility_when_requests_race() {
        let db = fixtures::database().await;
        let repos = db.repositories();
        let service = ReservationService::new(repos.facilities(), repos.reservations());
        let court = service
            .create_facility(
                Facility::builder(FacilityKind::Court)
                    .name("Barangay Court")
                    .capacity(40)
                    .build()
                    .unwrap(),
            )
            .await
            .unwrap();

        let (a, b) = tokio::join!(
            service.request(booking(court.id, "Youth Council")),
            service.request(booking(court.id, "Senior Citizens")),
        );

        assert_eq!(usize::from(a.is_ok()) + usize::from(b.is_ok()), 1);
        assert!(
            [a, b].iter().any(|r| matches!(
                r,
                Err(PortalError::Conflict(ConflictError::ReservationOverlap { .. }))
            ))
        );
        let stored = repos.reservations().list_by_facility(court.id).await.unwrap();
        assert_eq!(stored.len(), 1);
    }
}

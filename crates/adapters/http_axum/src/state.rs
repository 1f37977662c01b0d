//! Shared application state for axum handlers.

use std::sync::Arc;

use munihub_app::ports::Repositories;
use munihub_app::services::burial_service::BurialService;
use munihub_app::services::cemetery_service::CemeteryService;
use munihub_app::services::dashboard_service::DashboardService;
use munihub_app::services::permit_service::PermitService;
use munihub_app::services::reservation_service::ReservationService;
use munihub_app::services::search_service::SearchService;
use munihub_app::services::service_request_service::ServiceRequestService;

pub type Cemeteries<R> = CemeteryService<
    <R as Repositories>::Cemeteries,
    <R as Repositories>::Plots,
    <R as Repositories>::Deceased,
    <R as Repositories>::Assignments,
>;
pub type Burials<R> = BurialService<
    <R as Repositories>::Plots,
    <R as Repositories>::Deceased,
    <R as Repositories>::Assignments,
>;
pub type Search<R> = SearchService<
    <R as Repositories>::Cemeteries,
    <R as Repositories>::Plots,
    <R as Repositories>::Deceased,
    <R as Repositories>::Assignments,
>;
pub type Permits<R> = PermitService<
    <R as Repositories>::Permits,
    <R as Repositories>::Deceased,
    <R as Repositories>::Plots,
    <R as Repositories>::Assignments,
>;
pub type Reservations<R> =
    ReservationService<<R as Repositories>::Facilities, <R as Repositories>::Reservations>;
pub type Requests<R> = ServiceRequestService<<R as Repositories>::ServiceRequests>;
pub type Dashboard<R> = DashboardService<
    <R as Repositories>::Cemeteries,
    <R as Repositories>::Plots,
    <R as Repositories>::Deceased,
    <R as Repositories>::Permits,
    <R as Repositories>::Facilities,
    <R as Repositories>::Reservations,
    <R as Repositories>::ServiceRequests,
>;

/// Application state shared across all axum handlers.
///
/// Generic over one [`Repositories`] bundle to avoid dynamic dispatch.
/// `Clone` is implemented manually so the repository types themselves do not
/// need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<R: Repositories> {
    pub cemetery_service: Arc<Cemeteries<R>>,
    pub burial_service: Arc<Burials<R>>,
    pub search_service: Arc<Search<R>>,
    pub permit_service: Arc<Permits<R>>,
    pub reservation_service: Arc<Reservations<R>>,
    pub service_request_service: Arc<Requests<R>>,
    pub dashboard_service: Arc<Dashboard<R>>,
}

impl<R: Repositories> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            cemetery_service: Arc::clone(&self.cemetery_service),
            burial_service: Arc::clone(&self.burial_service),
            search_service: Arc::clone(&self.search_service),
            permit_service: Arc::clone(&self.permit_service),
            reservation_service: Arc::clone(&self.reservation_service),
            service_request_service: Arc::clone(&self.service_request_service),
            dashboard_service: Arc::clone(&self.dashboard_service),
        }
    }
}

impl<R: Repositories> AppState<R> {
    /// Build every service from one repository bundle.
    ///
    /// `search_limit` caps search results when a request gives no limit.
    #[must_use]
    pub fn new(repos: &R, search_limit: usize) -> Self {
        Self {
            cemetery_service: Arc::new(CemeteryService::new(
                repos.cemeteries(),
                repos.plots(),
                repos.deceased(),
                repos.assignments(),
            )),
            burial_service: Arc::new(BurialService::new(
                repos.plots(),
                repos.deceased(),
                repos.assignments(),
            )),
            search_service: Arc::new(
                SearchService::new(
                    repos.cemeteries(),
                    repos.plots(),
                    repos.deceased(),
                    repos.assignments(),
                )
                .with_default_limit(search_limit),
            ),
            permit_service: Arc::new(PermitService::new(
                repos.permits(),
                repos.deceased(),
                repos.plots(),
                repos.assignments(),
            )),
            reservation_service: Arc::new(ReservationService::new(
                repos.facilities(),
                repos.reservations(),
            )),
            service_request_service: Arc::new(ServiceRequestService::new(repos.service_requests())),
            dashboard_service: Arc::new(DashboardService::new(
                repos.cemeteries(),
                repos.plots(),
                repos.deceased(),
                repos.permits(),
                repos.facilities(),
                repos.reservations(),
                repos.service_requests(),
            )),
        }
    }
}

//! Dashboard service: portal-wide counts for the staff overview.

use munihub_domain::error::PortalError;
use munihub_domain::stats::{
    DashboardStats, PermitCounts, PlotStatusCounts, ReservationCounts, ServiceRequestCounts,
};
use munihub_domain::time::now;

use crate::ports::{
    CemeteryRepository, DeceasedRepository, FacilityRepository, PermitFilter, PermitRepository,
    PlotRepository, ReservationRepository, ServiceRequestRepository,
};

/// Application service computing [`DashboardStats`].
///
/// The seven reads are independent and run concurrently; the first failure
/// aborts the whole computation.
pub struct DashboardService<C, P, D, Pm, F, R, S> {
    cemeteries: C,
    plots: P,
    deceased: D,
    permits: Pm,
    facilities: F,
    reservations: R,
    requests: S,
}

impl<C, P, D, Pm, F, R, S> DashboardService<C, P, D, Pm, F, R, S>
where
    C: CemeteryRepository + Send + Sync,
    P: PlotRepository + Send + Sync,
    D: DeceasedRepository + Send + Sync,
    Pm: PermitRepository + Send + Sync,
    F: FacilityRepository + Send + Sync,
    R: ReservationRepository + Send + Sync,
    S: ServiceRequestRepository + Send + Sync,
{
    pub fn new(
        cemeteries: C,
        plots: P,
        deceased: D,
        permits: Pm,
        facilities: F,
        reservations: R,
        requests: S,
    ) -> Self {
        Self {
            cemeteries,
            plots,
            deceased,
            permits,
            facilities,
            reservations,
            requests,
        }
    }

    /// Fetch every collection and reduce it to counts.
    ///
    /// # Errors
    ///
    /// Returns the first storage error raised by any repository.
    #[tracing::instrument(skip(self))]
    pub async fn stats(&self) -> Result<DashboardStats, PortalError> {
        let (cemeteries, plots, deceased, permits, facilities, reservations, requests) = tokio::try_join!(
            self.cemeteries.list_cemeteries(),
            self.plots.get_all(),
            self.deceased.get_all(),
            self.permits.list(PermitFilter::default()),
            self.facilities.get_all(),
            self.reservations.get_all(),
            self.requests.list(None),
        )?;

        let generated_at = now();
        let plots = PlotStatusCounts::from_plots(&plots);
        Ok(DashboardStats {
            cemeteries: cemeteries.len(),
            occupancy_rate: plots.occupancy_rate(),
            plots,
            deceased: deceased.len(),
            permits: PermitCounts::from_permits(&permits),
            facilities: facilities.len(),
            reservations: ReservationCounts::from_reservations(&reservations, generated_at),
            service_requests: ServiceRequestCounts::from_requests(&requests),
            generated_at,
        })
    }
}

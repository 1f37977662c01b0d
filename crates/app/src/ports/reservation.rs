//! Facility and reservation repository ports.

use std::future::Future;

use munihub_domain::error::PortalError;
use munihub_domain::id::{FacilityId, ReservationId};
use munihub_domain::reservation::{Facility, Reservation};

/// Repository for bookable [`Facility`] records.
pub trait FacilityRepository {
    fn create(
        &self,
        facility: Facility,
    ) -> impl Future<Output = Result<Facility, PortalError>> + Send;

    fn get_by_id(
        &self,
        id: FacilityId,
    ) -> impl Future<Output = Result<Option<Facility>, PortalError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Facility>, PortalError>> + Send;

    /// Delete a facility together with its reservations.
    fn delete(&self, id: FacilityId) -> impl Future<Output = Result<(), PortalError>> + Send;
}

/// Repository for [`Reservation`]s.
pub trait ReservationRepository {
    fn create(
        &self,
        reservation: Reservation,
    ) -> impl Future<Output = Result<Reservation, PortalError>> + Send;

    fn get_by_id(
        &self,
        id: ReservationId,
    ) -> impl Future<Output = Result<Option<Reservation>, PortalError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Reservation>, PortalError>> + Send;

    /// Reservations of one facility, ordered by start time.
    fn list_by_facility(
        &self,
        facility_id: FacilityId,
    ) -> impl Future<Output = Result<Vec<Reservation>, PortalError>> + Send;

    fn update(
        &self,
        reservation: Reservation,
    ) -> impl Future<Output = Result<Reservation, PortalError>> + Send;
}

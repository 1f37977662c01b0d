//! Reservation service: facilities and their bookings.

use munihub_domain::error::{ConflictError, PortalError};
use munihub_domain::id::{FacilityId, ReservationId};
use munihub_domain::reservation::{Facility, Reservation, ReservationStatus};
use tokio::sync::Mutex;

use crate::ports::{FacilityRepository, ReservationRepository};

/// Application service for facility bookings.
///
/// A reservation is checked against the facility capacity and against every
/// other live reservation of the same facility when it is requested and
/// again when it is confirmed. Those checks and the write that follows
/// hold the booking lock, so two overlapping requests cannot both pass.
pub struct ReservationService<F, R> {
    facilities: F,
    reservations: R,
    bookings: Mutex<()>,
}

impl<F, R> ReservationService<F, R>
where
    F: FacilityRepository + Send + Sync,
    R: ReservationRepository + Send + Sync,
{
    pub fn new(facilities: F, reservations: R) -> Self {
        Self {
            facilities,
            reservations,
            bookings: Mutex::new(()),
        }
    }

    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip_all, fields(facility.name = %facility.name))]
    pub async fn create_facility(&self, facility: Facility) -> Result<Facility, PortalError> {
        facility.validate()?;
        self.facilities.create(facility).await
    }

    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] when no facility with `id` exists.
    pub async fn get_facility(&self, id: FacilityId) -> Result<Facility, PortalError> {
        self.facilities
            .get_by_id(id)
            .await?
            .ok_or_else(|| PortalError::not_found("Facility", id))
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_facilities(&self) -> Result<Vec<Facility>, PortalError> {
        self.facilities.get_all().await
    }

    /// Delete a facility and its reservations.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] if the facility does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn delete_facility(&self, id: FacilityId) -> Result<(), PortalError> {
        self.get_facility(id).await?;
        self.facilities.delete(id).await
    }

    /// Request a booking. The reservation starts out pending.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] if invariants fail or the party
    /// does not fit, [`PortalError::NotFound`] for an unknown facility, or
    /// [`ConflictError::ReservationOverlap`] when the slot is taken.
    #[tracing::instrument(skip_all, fields(facility.id = %reservation.facility_id))]
    pub async fn request(&self, reservation: Reservation) -> Result<Reservation, PortalError> {
        reservation.validate()?;
        let facility = self.get_facility(reservation.facility_id).await?;
        reservation.check_fits(&facility)?;
        let _guard = self.bookings.lock().await;
        self.ensure_slot_free(&reservation).await?;
        self.reservations.create(reservation).await
    }

    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] when no reservation with `id` exists.
    pub async fn get_reservation(&self, id: ReservationId) -> Result<Reservation, PortalError> {
        self.reservations
            .get_by_id(id)
            .await?
            .ok_or_else(|| PortalError::not_found("Reservation", id))
    }

    /// Reservations of one facility, by start time.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] if the facility does not exist.
    pub async fn list_reservations(
        &self,
        facility_id: FacilityId,
    ) -> Result<Vec<Reservation>, PortalError> {
        self.get_facility(facility_id).await?;
        self.reservations.list_by_facility(facility_id).await
    }

    /// Confirm a pending reservation.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] if it is not pending or
    /// [`ConflictError::ReservationOverlap`] if another booking took the slot.
    #[tracing::instrument(skip(self))]
    pub async fn confirm(&self, id: ReservationId) -> Result<Reservation, PortalError> {
        let _guard = self.bookings.lock().await;
        let mut reservation = self.get_reservation(id).await?;
        reservation.transition(ReservationStatus::Confirmed)?;
        self.ensure_slot_free(&reservation).await?;
        self.reservations.update(reservation).await
    }

    /// Cancel a pending or confirmed reservation, releasing its slot.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] if it is already cancelled.
    #[tracing::instrument(skip(self))]
    pub async fn cancel(&self, id: ReservationId) -> Result<Reservation, PortalError> {
        let mut reservation = self.get_reservation(id).await?;
        reservation.transition(ReservationStatus::Cancelled)?;
        self.reservations.update(reservation).await
    }

    async fn ensure_slot_free(&self, reservation: &Reservation) -> Result<(), PortalError> {
        let booked = self
            .reservations
            .list_by_facility(reservation.facility_id)
            .await?;
        if booked.iter().any(|other| reservation.conflicts_with(other)) {
            return Err(ConflictError::ReservationOverlap {
                facility: reservation.facility_id.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::InMemoryRepositories;
    use munihub_domain::error::ValidationError;
    use munihub_domain::reservation::FacilityKind;
    use munihub_domain::time::parse_timestamp;

    type Service = ReservationService<InMemoryRepositories, InMemoryRepositories>;

    fn make_service() -> Service {
        let repos = InMemoryRepositories::default();
        ReservationService::new(repos.clone(), repos)
    }

    async fn seed_facility(svc: &Service) -> Facility {
        let facility = Facility::builder(FacilityKind::Pavilion)
            .name("Plaza Pavilion")
            .capacity(50)
            .build()
            .unwrap();
        svc.create_facility(facility).await.unwrap()
    }

    fn booking(facility: FacilityId, from: &str, to: &str, attendees: u32) -> Reservation {
        Reservation::builder(facility)
            .reserved_by("Liza Tan")
            .contact("liza@example.org")
            .attendees(attendees)
            .period(parse_timestamp(from).unwrap(), parse_timestamp(to).unwrap())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_accept_back_to_back_bookings() {
        let svc = make_service();
        let facility = seed_facility(&svc).await;
        svc.request(booking(facility.id, "2026-05-01T08:00:00Z", "2026-05-01T10:00:00Z", 10))
            .await
            .unwrap();
        svc.request(booking(facility.id, "2026-05-01T10:00:00Z", "2026-05-01T12:00:00Z", 10))
            .await
            .unwrap();

        let listed = svc.list_reservations(facility.id).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed[0].starts_at < listed[1].starts_at);
    }

    #[tokio::test]
    async fn should_reject_overlapping_booking() {
        let svc = make_service();
        let facility = seed_facility(&svc).await;
        svc.request(booking(facility.id, "2026-05-01T08:00:00Z", "2026-05-01T10:00:00Z", 10))
            .await
            .unwrap();

        let result = svc
            .request(booking(facility.id, "2026-05-01T09:30:00Z", "2026-05-01T11:00:00Z", 10))
            .await;
        assert!(matches!(
            result,
            Err(PortalError::Conflict(ConflictError::ReservationOverlap { .. }))
        ));
    }

    #[tokio::test]
    async fn should_free_slot_when_cancelled() {
        let svc = make_service();
        let facility = seed_facility(&svc).await;
        let first = svc
            .request(booking(facility.id, "2026-05-01T08:00:00Z", "2026-05-01T10:00:00Z", 10))
            .await
            .unwrap();
        let cancelled = svc.cancel(first.id).await.unwrap();
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);

        assert!(
            svc.request(booking(facility.id, "2026-05-01T08:00:00Z", "2026-05-01T10:00:00Z", 10))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn should_reject_party_larger_than_capacity() {
        let svc = make_service();
        let facility = seed_facility(&svc).await;
        let result = svc
            .request(booking(facility.id, "2026-05-01T08:00:00Z", "2026-05-01T10:00:00Z", 51))
            .await;
        assert!(matches!(
            result,
            Err(PortalError::Validation(ValidationError::InvalidAttendees {
                attendees: 51,
                capacity: 50
            }))
        ));
    }

    #[tokio::test]
    async fn should_confirm_pending_reservation_once() {
        let svc = make_service();
        let facility = seed_facility(&svc).await;
        let pending = svc
            .request(booking(facility.id, "2026-05-01T08:00:00Z", "2026-05-01T10:00:00Z", 10))
            .await
            .unwrap();

        let confirmed = svc.confirm(pending.id).await.unwrap();
        assert_eq!(confirmed.status, ReservationStatus::Confirmed);

        let again = svc.confirm(pending.id).await;
        assert!(matches!(again, Err(PortalError::Validation(_))));
    }

    #[tokio::test]
    async fn should_return_not_found_when_facility_missing() {
        let svc = make_service();
        let result = svc
            .request(booking(FacilityId::new(), "2026-05-01T08:00:00Z", "2026-05-01T10:00:00Z", 1))
            .await;
        assert!(matches!(result, Err(PortalError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_remove_reservations_with_facility() {
        let svc = make_service();
        let facility = seed_facility(&svc).await;
        let booked = svc
            .request(booking(facility.id, "2026-05-01T08:00:00Z", "2026-05-01T10:00:00Z", 10))
            .await
            .unwrap();

        svc.delete_facility(facility.id).await.unwrap();
        assert!(matches!(
            svc.get_reservation(booked.id).await,
            Err(PortalError::NotFound(_))
        ));
    }
}

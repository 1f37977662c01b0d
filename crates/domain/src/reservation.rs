//! Parks and facilities, and the reservations made against them.

use serde::{Deserialize, Serialize};

use crate::error::{PortalError, ValidationError};
use crate::geo::Coordinate;
use crate::id::{FacilityId, ReservationId};
use crate::time::{Timestamp, now};

define_code! {
    /// Type of bookable public space.
    FacilityKind as "facility kind" {
        Park => "park",
        Pavilion => "pavilion",
        Court => "court",
        Hall => "hall",
        Field => "field",
    }
}

/// A bookable public space managed by the parks & recreation office.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub id: FacilityId,
    pub name: String,
    pub kind: FacilityKind,
    /// Maximum number of attendees per reservation.
    pub capacity: u32,
    pub location: Option<Coordinate>,
    pub description: Option<String>,
}

impl Facility {
    /// Create a builder for a facility of `kind`.
    #[must_use]
    pub fn builder(kind: FacilityKind) -> FacilityBuilder {
        FacilityBuilder {
            id: None,
            name: None,
            kind,
            capacity: None,
            location: None,
            description: None,
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] when `name` is blank, `capacity`
    /// is zero, or the location is out of range.
    pub fn validate(&self) -> Result<(), PortalError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyField("name").into());
        }
        if self.capacity == 0 {
            return Err(ValidationError::InvalidCapacity.into());
        }
        if let Some(location) = &self.location {
            location.validate()?;
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Facility`].
#[derive(Debug)]
pub struct FacilityBuilder {
    id: Option<FacilityId>,
    name: Option<String>,
    kind: FacilityKind,
    capacity: Option<u32>,
    location: Option<Coordinate>,
    description: Option<String>,
}

impl FacilityBuilder {
    #[must_use]
    pub fn id(mut self, id: FacilityId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    #[must_use]
    pub fn location(mut self, location: Coordinate) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Consume the builder, validate, and return a [`Facility`].
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] if `name` or `capacity` is
    /// missing or invalid.
    pub fn build(self) -> Result<Facility, PortalError> {
        let facility = Facility {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            kind: self.kind,
            capacity: self.capacity.unwrap_or_default(),
            location: self.location,
            description: self.description,
        };
        facility.validate()?;
        Ok(facility)
    }
}

define_code! {
    /// Lifecycle of a reservation.
    #[derive(Default)]
    ReservationStatus as "reservation status" {
        #[default]
        Pending => "pending",
        Confirmed => "confirmed",
        Cancelled => "cancelled",
    }
}

impl ReservationStatus {
    /// Whether a reservation in this status may move to `next`.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed | Self::Cancelled) | (Self::Confirmed, Self::Cancelled)
        )
    }

    /// Whether the reservation still holds its time slot.
    #[must_use]
    pub fn holds_slot(self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

/// A booking of a facility for a time range `[starts_at, ends_at)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub facility_id: FacilityId,
    pub reserved_by: String,
    pub contact: String,
    pub purpose: Option<String>,
    pub attendees: u32,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub status: ReservationStatus,
    pub created_at: Timestamp,
}

impl Reservation {
    /// Create a builder for a reservation of `facility_id`.
    #[must_use]
    pub fn builder(facility_id: FacilityId) -> ReservationBuilder {
        ReservationBuilder {
            id: None,
            facility_id,
            reserved_by: None,
            contact: None,
            purpose: None,
            attendees: 1,
            starts_at: None,
            ends_at: None,
            created_at: None,
        }
    }

    /// Check invariants that do not need the facility.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] when the requester is blank, the
    /// time range is empty or reversed, or there are no attendees.
    pub fn validate(&self) -> Result<(), PortalError> {
        if self.reserved_by.trim().is_empty() {
            return Err(ValidationError::EmptyField("reserved_by").into());
        }
        if self.contact.trim().is_empty() {
            return Err(ValidationError::EmptyField("contact").into());
        }
        if self.starts_at >= self.ends_at {
            return Err(ValidationError::InvalidTimeRange.into());
        }
        if self.attendees == 0 {
            return Err(ValidationError::EmptyField("attendees").into());
        }
        Ok(())
    }

    /// Check the attendee count against the facility.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAttendees`] when the party is larger
    /// than the facility allows.
    pub fn check_fits(&self, facility: &Facility) -> Result<(), PortalError> {
        if self.attendees > facility.capacity {
            return Err(ValidationError::InvalidAttendees {
                attendees: self.attendees,
                capacity: facility.capacity,
            }
            .into());
        }
        Ok(())
    }

    /// Half-open interval overlap. Back-to-back bookings do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.starts_at < other.ends_at && other.starts_at < self.ends_at
    }

    /// Another live reservation of the same facility competes for the slot.
    #[must_use]
    pub fn conflicts_with(&self, other: &Self) -> bool {
        self.id != other.id
            && self.facility_id == other.facility_id
            && other.status.holds_slot()
            && self.overlaps(other)
    }

    /// Move to `next`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTransition`] when not allowed.
    pub fn transition(&mut self, next: ReservationStatus) -> Result<(), PortalError> {
        if !self.status.can_transition_to(next) {
            return Err(ValidationError::InvalidTransition {
                from: self.status.as_str(),
                to: next.as_str(),
            }
            .into());
        }
        self.status = next;
        Ok(())
    }
}

/// Step-by-step builder for [`Reservation`].
#[derive(Debug)]
pub struct ReservationBuilder {
    id: Option<ReservationId>,
    facility_id: FacilityId,
    reserved_by: Option<String>,
    contact: Option<String>,
    purpose: Option<String>,
    attendees: u32,
    starts_at: Option<Timestamp>,
    ends_at: Option<Timestamp>,
    created_at: Option<Timestamp>,
}

impl ReservationBuilder {
    #[must_use]
    pub fn id(mut self, id: ReservationId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn reserved_by(mut self, name: impl Into<String>) -> Self {
        self.reserved_by = Some(name.into());
        self
    }

    #[must_use]
    pub fn contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }

    #[must_use]
    pub fn purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = Some(purpose.into());
        self
    }

    #[must_use]
    pub fn attendees(mut self, attendees: u32) -> Self {
        self.attendees = attendees;
        self
    }

    #[must_use]
    pub fn period(mut self, starts_at: Timestamp, ends_at: Timestamp) -> Self {
        self.starts_at = Some(starts_at);
        self.ends_at = Some(ends_at);
        self
    }

    #[must_use]
    pub fn created_at(mut self, at: Timestamp) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Consume the builder, validate, and return a pending [`Reservation`].
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] if the period is missing or
    /// invalid, or requester details are blank.
    pub fn build(self) -> Result<Reservation, PortalError> {
        let (Some(starts_at), Some(ends_at)) = (self.starts_at, self.ends_at) else {
            return Err(ValidationError::EmptyField("period").into());
        };
        let reservation = Reservation {
            id: self.id.unwrap_or_default(),
            facility_id: self.facility_id,
            reserved_by: self.reserved_by.unwrap_or_default(),
            contact: self.contact.unwrap_or_default(),
            purpose: self.purpose,
            attendees: self.attendees,
            starts_at,
            ends_at,
            status: ReservationStatus::Pending,
            created_at: self.created_at.unwrap_or_else(now),
        };
        reservation.validate()?;
        Ok(reservation)
    }
}

//! Water and drainage service requests filed by residents.

use serde::{Deserialize, Serialize};

use crate::error::{PortalError, ValidationError};
use crate::geo::Coordinate;
use crate::id::ServiceRequestId;
use crate::time::{Timestamp, now};

define_code! {
    /// What the resident is reporting.
    ServiceCategory as "service category" {
        WaterLeak => "water_leak",
        NoWater => "no_water",
        LowPressure => "low_pressure",
        DrainageBlockage => "drainage_blockage",
        Flooding => "flooding",
        MeterIssue => "meter_issue",
    }
}

impl ServiceCategory {
    /// Triage priority assigned when the reporter does not choose one.
    #[must_use]
    pub fn default_priority(self) -> Priority {
        match self {
            Self::Flooding => Priority::Urgent,
            Self::WaterLeak | Self::NoWater | Self::DrainageBlockage => Priority::High,
            Self::LowPressure | Self::MeterIssue => Priority::Normal,
        }
    }
}

define_code! {
    /// Triage priority.
    Priority as "priority" {
        Low => "low",
        Normal => "normal",
        High => "high",
        Urgent => "urgent",
    }
}

define_code! {
    /// Work state of a request.
    ///
    /// ```text
    /// open ──► in_progress ──► resolved ──► closed
    ///   │           ▲              │
    ///   └─► closed  └──── reopen ──┘
    /// ```
    #[derive(Default)]
    RequestStatus as "request status" {
        #[default]
        Open => "open",
        InProgress => "in_progress",
        Resolved => "resolved",
        Closed => "closed",
    }
}

impl RequestStatus {
    /// Whether a request in this status may move to `next`.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Open, Self::InProgress | Self::Closed)
                | (Self::InProgress, Self::Resolved)
                | (Self::Resolved, Self::Closed | Self::InProgress)
        )
    }

    /// Still waiting on the utility crew.
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Open | Self::InProgress)
    }
}

/// A report of a water or drainage problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: ServiceRequestId,
    pub category: ServiceCategory,
    pub priority: Priority,
    pub description: String,
    pub address: String,
    pub location: Option<Coordinate>,
    pub reporter_name: String,
    pub reporter_contact: String,
    pub status: RequestStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
}

impl ServiceRequest {
    /// Create a builder for a request in `category`.
    #[must_use]
    pub fn builder(category: ServiceCategory) -> ServiceRequestBuilder {
        ServiceRequestBuilder {
            id: None,
            category,
            priority: None,
            description: None,
            address: None,
            location: None,
            reporter_name: None,
            reporter_contact: None,
            created_at: None,
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] when a required text field is blank
    /// or the location is out of range.
    pub fn validate(&self) -> Result<(), PortalError> {
        for (value, field) in [
            (&self.description, "description"),
            (&self.address, "address"),
            (&self.reporter_name, "reporter_name"),
            (&self.reporter_contact, "reporter_contact"),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::EmptyField(field).into());
            }
        }
        if let Some(location) = &self.location {
            location.validate()?;
        }
        Ok(())
    }

    /// Move to `next`, maintaining `updated_at` and `resolved_at`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTransition`] when not allowed.
    pub fn transition(&mut self, next: RequestStatus, at: Timestamp) -> Result<(), PortalError> {
        if !self.status.can_transition_to(next) {
            return Err(ValidationError::InvalidTransition {
                from: self.status.as_str(),
                to: next.as_str(),
            }
            .into());
        }
        match next {
            RequestStatus::Resolved => self.resolved_at = Some(at),
            RequestStatus::InProgress => self.resolved_at = None,
            RequestStatus::Open | RequestStatus::Closed => {}
        }
        self.status = next;
        self.updated_at = at;
        Ok(())
    }

    /// Active and marked urgent.
    #[must_use]
    pub fn is_urgent_and_active(&self) -> bool {
        self.priority == Priority::Urgent && self.status.is_active()
    }
}

/// Step-by-step builder for [`ServiceRequest`].
#[derive(Debug)]
pub struct ServiceRequestBuilder {
    id: Option<ServiceRequestId>,
    category: ServiceCategory,
    priority: Option<Priority>,
    description: Option<String>,
    address: Option<String>,
    location: Option<Coordinate>,
    reporter_name: Option<String>,
    reporter_contact: Option<String>,
    created_at: Option<Timestamp>,
}

impl ServiceRequestBuilder {
    #[must_use]
    pub fn id(mut self, id: ServiceRequestId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    #[must_use]
    pub fn location(mut self, location: Coordinate) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn reporter(mut self, name: impl Into<String>, contact: impl Into<String>) -> Self {
        self.reporter_name = Some(name.into());
        self.reporter_contact = Some(contact.into());
        self
    }

    #[must_use]
    pub fn created_at(mut self, at: Timestamp) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Consume the builder, validate, and return an open [`ServiceRequest`].
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] if a required field is missing.
    pub fn build(self) -> Result<ServiceRequest, PortalError> {
        let created_at = self.created_at.unwrap_or_else(now);
        let request = ServiceRequest {
            id: self.id.unwrap_or_default(),
            category: self.category,
            priority: self
                .priority
                .unwrap_or_else(|| self.category.default_priority()),
            description: self.description.unwrap_or_default(),
            address: self.address.unwrap_or_default(),
            location: self.location,
            reporter_name: self.reporter_name.unwrap_or_default(),
            reporter_contact: self.reporter_contact.unwrap_or_default(),
            status: RequestStatus::Open,
            created_at,
            updated_at: created_at,
            resolved_at: None,
        };
        request.validate()?;
        Ok(request)
    }
}

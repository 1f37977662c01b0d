//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`PortalError`]
//! via `#[from]` (or an explicit `From` impl for storage adapters).

/// Top-level error returned by services and repositories.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("record not found")]
    NotFound(#[from] NotFoundError),

    #[error("conflicting state")]
    Conflict(#[from] ConflictError),

    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A domain invariant was violated by the input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("coordinate ({latitude}, {longitude}) is out of range")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("capacity must be at least 1")]
    InvalidCapacity,

    #[error("date of birth is after date of death")]
    BirthAfterDeath,

    #[error("start must be strictly before end")]
    InvalidTimeRange,

    #[error("{attendees} attendees do not fit a capacity of {capacity}")]
    InvalidAttendees { attendees: u32, capacity: u32 },

    #[error("cannot move from {from} to {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },

    #[error("{0} permits require a plot")]
    MissingPlot(&'static str),

    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("unknown {field}: {value}")]
    UnknownValue { field: &'static str, value: String },
}

/// A record looked up by id does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// The request is valid on its own but clashes with stored state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConflictError {
    #[error("plot {plot} is not accepting assignments")]
    PlotUnavailable { plot: String },

    #[error("plot {plot} is full (capacity {capacity})")]
    PlotFull { plot: String, capacity: u32 },

    #[error("plot {plot} still has occupants")]
    PlotStillOccupied { plot: String },

    #[error("deceased {deceased} is already assigned to a plot")]
    AlreadyAssigned { deceased: String },

    #[error("deceased {deceased} is not interred in plot {plot}")]
    NotInterredInPlot { deceased: String, plot: String },

    #[error("facility {facility} is already booked for that time")]
    ReservationOverlap { facility: String },

    #[error("plot {plot} has no known location")]
    PlotNotLocated { plot: String },

    #[error("permit reference {reference} is already on file")]
    DuplicateReference { reference: String },
}

impl PortalError {
    /// Shorthand for a [`NotFoundError`] wrapped in a [`PortalError`].
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        NotFoundError {
            entity,
            id: id.to_string(),
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_render_not_found_message() {
        let err = NotFoundError {
            entity: "Plot",
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Plot abc not found");
    }

    #[test]
    fn should_wrap_validation_error_when_converted() {
        let err: PortalError = ValidationError::EmptyField("name").into();
        assert!(matches!(
            err,
            PortalError::Validation(ValidationError::EmptyField("name"))
        ));
    }

    #[test]
    fn should_build_not_found_from_shorthand() {
        let err = PortalError::not_found("Permit", 42);
        assert!(matches!(err, PortalError::NotFound(NotFoundError { entity: "Permit", ref id }) if id == "42"));
    }
}

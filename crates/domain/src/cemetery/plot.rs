//! Plot: a single burial unit and its occupancy status.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::require_text;
use crate::error::{PortalError, ValidationError};
use crate::geo::Coordinate;
use crate::id::{BlockId, PlotId};

define_code! {
    /// Occupancy status of a plot, also used to color the map.
    #[derive(Default)]
    PlotStatus as "plot status" {
        /// Free to be sold or assigned.
        #[default]
        Available => "available",
        /// Held for a future interment (pre-need purchase, pending permit).
        Reserved => "reserved",
        /// At least one deceased person rests here.
        Occupied => "occupied",
        /// Closed for maintenance or otherwise unusable.
        Unavailable => "unavailable",
    }
}

impl PlotStatus {
    /// Fill color used when drawing the plot on the map.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Available => "#22c55e",
            Self::Reserved => "#f59e0b",
            Self::Occupied => "#ef4444",
            Self::Unavailable => "#9ca3af",
        }
    }

    /// Human readable label for legends.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Reserved => "Reserved",
            Self::Occupied => "Occupied",
            Self::Unavailable => "Unavailable",
        }
    }

    /// Whether new assignments may be recorded against a plot in this status.
    #[must_use]
    pub fn accepts_assignments(self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}

define_code! {
    /// Physical form of the burial unit.
    #[derive(Default)]
    PlotKind as "plot kind" {
        #[default]
        Ground => "ground",
        Niche => "niche",
        Mausoleum => "mausoleum",
        Columbarium => "columbarium",
    }
}

/// A burial unit inside a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plot {
    pub id: PlotId,
    pub block_id: BlockId,
    /// Lot number, unique within its block (e.g. "12", "12-B").
    pub lot: String,
    pub kind: PlotKind,
    pub status: PlotStatus,
    /// Maximum number of interments.
    pub capacity: u32,
    pub location: Option<Coordinate>,
}

impl Plot {
    /// Create a builder for a plot of `block_id`.
    #[must_use]
    pub fn builder(block_id: BlockId) -> PlotBuilder {
        PlotBuilder {
            id: None,
            block_id,
            lot: None,
            kind: PlotKind::default(),
            status: PlotStatus::default(),
            capacity: 1,
            location: None,
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] when `lot` is blank, `capacity` is
    /// zero, or the location is out of range.
    pub fn validate(&self) -> Result<(), PortalError> {
        require_text(&self.lot, "lot")?;
        if self.capacity == 0 {
            return Err(ValidationError::InvalidCapacity.into());
        }
        if let Some(location) = &self.location {
            location.validate()?;
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Plot`].
#[derive(Debug)]
pub struct PlotBuilder {
    id: Option<PlotId>,
    block_id: BlockId,
    lot: Option<String>,
    kind: PlotKind,
    status: PlotStatus,
    capacity: u32,
    location: Option<Coordinate>,
}

impl PlotBuilder {
    #[must_use]
    pub fn id(mut self, id: PlotId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn lot(mut self, lot: impl Into<String>) -> Self {
        self.lot = Some(lot.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: PlotKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn status(mut self, status: PlotStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    #[must_use]
    pub fn location(mut self, location: Coordinate) -> Self {
        self.location = Some(location);
        self
    }

    /// Consume the builder, validate, and return a [`Plot`].
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] if `lot` is missing or blank, or
    /// `capacity` is zero.
    pub fn build(self) -> Result<Plot, PortalError> {
        let plot = Plot {
            id: self.id.unwrap_or_default(),
            block_id: self.block_id,
            lot: self.lot.unwrap_or_default(),
            kind: self.kind,
            status: self.status,
            capacity: self.capacity,
            location: self.location,
        };
        plot.validate()?;
        Ok(plot)
    }
}

/// Human-facing coordinates of a plot: section, block and lot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlotLocator {
    pub section: String,
    pub block: String,
    pub lot: String,
}

impl fmt::Display for PlotLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.section, self.block, self.lot)
    }
}

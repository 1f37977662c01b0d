//! Assignment: links a deceased person to the plot they rest in.

use serde::{Deserialize, Serialize};

use crate::id::{AssignmentId, DeceasedId, PlotId};
use crate::time::{Date, Timestamp, now};

/// The record linking a deceased person to a plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub plot_id: PlotId,
    pub deceased_id: DeceasedId,
    pub interment_date: Option<Date>,
    pub assigned_at: Timestamp,
}

impl Assignment {
    /// Create a builder linking `deceased_id` to `plot_id`.
    #[must_use]
    pub fn builder(plot_id: PlotId, deceased_id: DeceasedId) -> AssignmentBuilder {
        AssignmentBuilder {
            id: None,
            plot_id,
            deceased_id,
            interment_date: None,
            assigned_at: None,
        }
    }
}

/// Step-by-step builder for [`Assignment`].
#[derive(Debug)]
pub struct AssignmentBuilder {
    id: Option<AssignmentId>,
    plot_id: PlotId,
    deceased_id: DeceasedId,
    interment_date: Option<Date>,
    assigned_at: Option<Timestamp>,
}

impl AssignmentBuilder {
    #[must_use]
    pub fn id(mut self, id: AssignmentId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn interment_date(mut self, date: Date) -> Self {
        self.interment_date = Some(date);
        self
    }

    #[must_use]
    pub fn assigned_at(mut self, at: Timestamp) -> Self {
        self.assigned_at = Some(at);
        self
    }

    /// Consume the builder. Assignments carry no free-form fields, so this
    /// cannot fail; occupancy rules are checked by the burial service.
    #[must_use]
    pub fn build(self) -> Assignment {
        Assignment {
            id: self.id.unwrap_or_default(),
            plot_id: self.plot_id,
            deceased_id: self.deceased_id,
            interment_date: self.interment_date,
            assigned_at: self.assigned_at.unwrap_or_else(now),
        }
    }
}

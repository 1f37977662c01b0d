//! Permits: burial, cremation and exhumation authorizations.
//!
//! A permit is filed against a [`Deceased`](crate::cemetery::Deceased) record
//! and reviewed by the municipality. Its status only moves forward:
//!
//! ```text
//! pending ──► approved ──► cancelled
//!    │
//!    ├──────► rejected
//!    └──────► cancelled
//! ```

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::error::{PortalError, ValidationError};
use crate::id::{DeceasedId, PermitId, PlotId};
use crate::time::{Timestamp, now};

define_code! {
    /// What the permit authorizes.
    PermitKind as "permit kind" {
        Burial => "burial",
        Cremation => "cremation",
        Exhumation => "exhumation",
    }
}

impl PermitKind {
    /// Prefix of the reference number.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Burial => "BUR",
            Self::Cremation => "CRM",
            Self::Exhumation => "EXH",
        }
    }

    /// Whether the permit must name the plot it concerns.
    #[must_use]
    pub fn requires_plot(self) -> bool {
        matches!(self, Self::Burial | Self::Exhumation)
    }
}

define_code! {
    /// Review state of a permit.
    #[derive(Default)]
    PermitStatus as "permit status" {
        #[default]
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
        Cancelled => "cancelled",
    }
}

impl PermitStatus {
    /// Whether a permit in this status may move to `next`.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (
                Self::Pending,
                Self::Approved | Self::Rejected | Self::Cancelled
            ) | (Self::Approved, Self::Cancelled)
        )
    }

    /// No further transitions are possible.
    #[must_use]
    pub fn is_final(self) -> bool {
        matches!(self, Self::Rejected | Self::Cancelled)
    }
}

/// A reviewer's decision on a permit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermitDecision {
    Approve,
    Reject,
    Cancel,
}

impl PermitDecision {
    /// Status reached by applying the decision.
    #[must_use]
    pub fn target(self) -> PermitStatus {
        match self {
            Self::Approve => PermitStatus::Approved,
            Self::Reject => PermitStatus::Rejected,
            Self::Cancel => PermitStatus::Cancelled,
        }
    }
}

/// An authorization request tied to a deceased record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permit {
    pub id: PermitId,
    /// Human reference, e.g. `BUR-2026-1A2B3C4D`.
    pub reference: String,
    pub kind: PermitKind,
    pub deceased_id: DeceasedId,
    pub plot_id: Option<PlotId>,
    pub applicant_name: String,
    pub applicant_contact: String,
    pub status: PermitStatus,
    pub remarks: Option<String>,
    pub submitted_at: Timestamp,
    pub decided_at: Option<Timestamp>,
}

impl Permit {
    /// Create a builder for a permit of `kind` concerning `deceased_id`.
    #[must_use]
    pub fn builder(kind: PermitKind, deceased_id: DeceasedId) -> PermitBuilder {
        PermitBuilder {
            id: None,
            kind,
            deceased_id,
            plot_id: None,
            applicant_name: None,
            applicant_contact: None,
            remarks: None,
            submitted_at: None,
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] when applicant details are blank
    /// or a burial/exhumation permit names no plot.
    pub fn validate(&self) -> Result<(), PortalError> {
        if self.applicant_name.trim().is_empty() {
            return Err(ValidationError::EmptyField("applicant_name").into());
        }
        if self.applicant_contact.trim().is_empty() {
            return Err(ValidationError::EmptyField("applicant_contact").into());
        }
        if self.kind.requires_plot() && self.plot_id.is_none() {
            return Err(ValidationError::MissingPlot(self.kind.as_str()).into());
        }
        Ok(())
    }

    /// Apply a reviewer decision, stamping the decision time.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTransition`] when the current status
    /// does not allow the decision.
    pub fn decide(
        &mut self,
        decision: PermitDecision,
        remarks: Option<String>,
        at: Timestamp,
    ) -> Result<(), PortalError> {
        let next = decision.target();
        if !self.status.can_transition_to(next) {
            return Err(ValidationError::InvalidTransition {
                from: self.status.as_str(),
                to: next.as_str(),
            }
            .into());
        }
        self.status = next;
        self.decided_at = Some(at);
        if remarks.is_some() {
            self.remarks = remarks;
        }
        Ok(())
    }
}

/// Reference number: kind prefix, submission year, first 8 hex digits of the id.
#[must_use]
pub fn reference_number(kind: PermitKind, id: PermitId, submitted_at: Timestamp) -> String {
    let hex = id.as_uuid().simple().to_string();
    format!(
        "{}-{}-{}",
        kind.prefix(),
        submitted_at.year(),
        hex[..8].to_uppercase()
    )
}

/// Step-by-step builder for [`Permit`].
#[derive(Debug)]
pub struct PermitBuilder {
    id: Option<PermitId>,
    kind: PermitKind,
    deceased_id: DeceasedId,
    plot_id: Option<PlotId>,
    applicant_name: Option<String>,
    applicant_contact: Option<String>,
    remarks: Option<String>,
    submitted_at: Option<Timestamp>,
}

impl PermitBuilder {
    #[must_use]
    pub fn id(mut self, id: PermitId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn plot_id(mut self, plot_id: PlotId) -> Self {
        self.plot_id = Some(plot_id);
        self
    }

    #[must_use]
    pub fn applicant_name(mut self, name: impl Into<String>) -> Self {
        self.applicant_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn applicant_contact(mut self, contact: impl Into<String>) -> Self {
        self.applicant_contact = Some(contact.into());
        self
    }

    #[must_use]
    pub fn remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }

    #[must_use]
    pub fn submitted_at(mut self, at: Timestamp) -> Self {
        self.submitted_at = Some(at);
        self
    }

    /// Consume the builder, validate, and return a pending [`Permit`].
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] if applicant details are missing
    /// or a required plot is absent.
    pub fn build(self) -> Result<Permit, PortalError> {
        let id = self.id.unwrap_or_default();
        let submitted_at = self.submitted_at.unwrap_or_else(now);
        let permit = Permit {
            id,
            reference: reference_number(self.kind, id, submitted_at),
            kind: self.kind,
            deceased_id: self.deceased_id,
            plot_id: self.plot_id,
            applicant_name: self.applicant_name.unwrap_or_default(),
            applicant_contact: self.applicant_contact.unwrap_or_default(),
            status: PermitStatus::Pending,
            remarks: self.remarks,
            submitted_at,
            decided_at: None,
        };
        permit.validate()?;
        Ok(permit)
    }
}

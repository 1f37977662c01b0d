//! Permit service: filing and reviewing burial, cremation and exhumation
//! permits.

use munihub_domain::cemetery::Plot;
use munihub_domain::error::{ConflictError, PortalError};
use munihub_domain::id::PermitId;
use munihub_domain::permit::{Permit, PermitDecision, PermitKind};
use munihub_domain::time::now;

use crate::ports::{AssignmentRepository, DeceasedRepository, PermitFilter, PermitRepository, PlotRepository};

/// Application service for the permit workflow.
pub struct PermitService<R, D, P, A> {
    permits: R,
    deceased: D,
    plots: P,
    assignments: A,
}

impl<R, D, P, A> PermitService<R, D, P, A>
where
    R: PermitRepository + Send + Sync,
    D: DeceasedRepository + Send + Sync,
    P: PlotRepository + Send + Sync,
    A: AssignmentRepository + Send + Sync,
{
    pub fn new(permits: R, deceased: D, plots: P, assignments: A) -> Self {
        Self {
            permits,
            deceased,
            plots,
            assignments,
        }
    }

    /// File a new permit.
    ///
    /// The deceased record and plot must exist. A burial permit needs a plot
    /// that accepts assignments; an exhumation permit needs the deceased to
    /// rest in the named plot.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] if invariants fail,
    /// [`PortalError::NotFound`] for unknown references, or a
    /// [`ConflictError`] when the plot does not fit the permit kind.
    #[tracing::instrument(skip_all, fields(permit.kind = %permit.kind, permit.reference = %permit.reference))]
    pub async fn submit(&self, permit: Permit) -> Result<Permit, PortalError> {
        permit.validate()?;
        self.deceased
            .get_by_id(permit.deceased_id)
            .await?
            .ok_or_else(|| PortalError::not_found("Deceased", permit.deceased_id))?;

        if let Some(plot_id) = permit.plot_id {
            let plot = self
                .plots
                .get_by_id(plot_id)
                .await?
                .ok_or_else(|| PortalError::not_found("Plot", plot_id))?;
            self.check_plot(&permit, &plot).await?;
        }

        let permit = self.permits.create(permit).await?;
        tracing::info!(permit.id = %permit.id, "permit submitted");
        Ok(permit)
    }

    async fn check_plot(&self, permit: &Permit, plot: &Plot) -> Result<(), PortalError> {
        match permit.kind {
            PermitKind::Burial if !plot.status.accepts_assignments() => {
                Err(ConflictError::PlotUnavailable {
                    plot: plot.id.to_string(),
                }
                .into())
            }
            PermitKind::Exhumation => {
                let resting = self.assignments.find_by_deceased(permit.deceased_id).await?;
                if resting.is_some_and(|assignment| assignment.plot_id == plot.id) {
                    Ok(())
                } else {
                    Err(ConflictError::NotInterredInPlot {
                        deceased: permit.deceased_id.to_string(),
                        plot: plot.id.to_string(),
                    }
                    .into())
                }
            }
            PermitKind::Burial | PermitKind::Cremation => Ok(()),
        }
    }

    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] when no permit with `id` exists.
    pub async fn get_permit(&self, id: PermitId) -> Result<Permit, PortalError> {
        self.permits
            .get_by_id(id)
            .await?
            .ok_or_else(|| PortalError::not_found("Permit", id))
    }

    /// Permits matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_permits(&self, filter: PermitFilter) -> Result<Vec<Permit>, PortalError> {
        self.permits.list(filter).await
    }

    /// Apply a reviewer decision.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] if the permit does not exist or
    /// [`PortalError::Validation`] when the status does not allow it.
    #[tracing::instrument(skip(self, remarks))]
    pub async fn decide(
        &self,
        id: PermitId,
        decision: PermitDecision,
        remarks: Option<String>,
    ) -> Result<Permit, PortalError> {
        let mut permit = self.get_permit(id).await?;
        permit.decide(decision, remarks, now())?;
        let permit = self.permits.update(permit).await?;
        tracing::info!(permit.status = %permit.status, "permit decided");
        Ok(permit)
    }
}

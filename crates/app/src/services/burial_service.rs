//! Burial service: deceased records and their plot assignments.

use munihub_domain::cemetery::{Assignment, Deceased, Plot, PlotStatus};
use munihub_domain::error::{ConflictError, PortalError};
use munihub_domain::id::{AssignmentId, DeceasedId, PlotId};
use munihub_domain::search::Occupant;
use munihub_domain::time::Date;
use tokio::sync::Mutex;

use crate::ports::{AssignmentRepository, DeceasedRepository, PlotRepository};

/// Application service for deceased records and interments.
///
/// Keeps a plot's status in step with its assignments: the first
/// assignment marks it occupied and removing the last one frees it.
/// Assignment changes run one at a time so the capacity check and the
/// insert cannot interleave with another request.
pub struct BurialService<P, D, A> {
    plots: P,
    deceased: D,
    assignments: A,
    interments: Mutex<()>,
}

impl<P, D, A> BurialService<P, D, A>
where
    P: PlotRepository + Send + Sync,
    D: DeceasedRepository + Send + Sync,
    A: AssignmentRepository + Send + Sync,
{
    pub fn new(plots: P, deceased: D, assignments: A) -> Self {
        Self {
            plots,
            deceased,
            assignments,
            interments: Mutex::new(()),
        }
    }

    /// Record a deceased person.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip_all, fields(deceased.id = %deceased.id))]
    pub async fn create_deceased(&self, deceased: Deceased) -> Result<Deceased, PortalError> {
        deceased.validate()?;
        self.deceased.create(deceased).await
    }

    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] when no record with `id` exists.
    pub async fn get_deceased(&self, id: DeceasedId) -> Result<Deceased, PortalError> {
        self.deceased
            .get_by_id(id)
            .await?
            .ok_or_else(|| PortalError::not_found("Deceased", id))
    }

    /// List all records, ordered by last name.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_deceased(&self) -> Result<Vec<Deceased>, PortalError> {
        self.deceased.get_all().await
    }

    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] if invariants fail or
    /// [`PortalError::NotFound`] if the record does not exist.
    #[tracing::instrument(skip_all, fields(deceased.id = %deceased.id))]
    pub async fn update_deceased(&self, deceased: Deceased) -> Result<Deceased, PortalError> {
        deceased.validate()?;
        self.get_deceased(deceased.id).await?;
        self.deceased.update(deceased).await
    }

    /// Delete a record, releasing its plot assignment first.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] if the record does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn delete_deceased(&self, id: DeceasedId) -> Result<(), PortalError> {
        self.get_deceased(id).await?;
        if let Some(assignment) = self.assignments.find_by_deceased(id).await? {
            self.unassign(assignment.id).await?;
        }
        self.deceased.delete(id).await
    }

    /// Assign a deceased person to a plot.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] if the plot or the record does not
    /// exist, or a [`ConflictError`] when the plot is unavailable or full or
    /// the person already rests elsewhere.
    #[tracing::instrument(skip(self))]
    pub async fn assign(
        &self,
        plot_id: PlotId,
        deceased_id: DeceasedId,
        interment_date: Option<Date>,
    ) -> Result<Assignment, PortalError> {
        let _guard = self.interments.lock().await;
        let plot = self.get_plot(plot_id).await?;
        self.get_deceased(deceased_id).await?;

        if !plot.status.accepts_assignments() {
            return Err(ConflictError::PlotUnavailable {
                plot: plot_id.to_string(),
            }
            .into());
        }
        if self
            .assignments
            .find_by_deceased(deceased_id)
            .await?
            .is_some()
        {
            return Err(ConflictError::AlreadyAssigned {
                deceased: deceased_id.to_string(),
            }
            .into());
        }
        let current = self.assignments.list_by_plot(plot_id).await?.len();
        if current >= plot.capacity as usize {
            return Err(ConflictError::PlotFull {
                plot: plot_id.to_string(),
                capacity: plot.capacity,
            }
            .into());
        }

        let mut builder = Assignment::builder(plot_id, deceased_id);
        if let Some(date) = interment_date {
            builder = builder.interment_date(date);
        }
        let assignment = self.assignments.create(builder.build()).await?;

        if plot.status != PlotStatus::Occupied {
            tracing::debug!(plot.id = %plot_id, "plot now occupied");
            self.plots
                .update(Plot {
                    status: PlotStatus::Occupied,
                    ..plot
                })
                .await?;
        }
        Ok(assignment)
    }

    /// Remove an assignment. The plot becomes available again once empty.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] if the assignment does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn unassign(&self, id: AssignmentId) -> Result<(), PortalError> {
        let _guard = self.interments.lock().await;
        let assignment = self
            .assignments
            .get_by_id(id)
            .await?
            .ok_or_else(|| PortalError::not_found("Assignment", id))?;
        self.assignments.delete(id).await?;

        let remaining = self.assignments.list_by_plot(assignment.plot_id).await?;
        if remaining.is_empty()
            && let Some(plot) = self.plots.get_by_id(assignment.plot_id).await?
            && plot.status == PlotStatus::Occupied
        {
            tracing::debug!(plot.id = %plot.id, "plot freed");
            self.plots
                .update(Plot {
                    status: PlotStatus::Available,
                    ..plot
                })
                .await?;
        }
        Ok(())
    }

    /// Who rests in a plot, oldest assignment first.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] if the plot does not exist.
    pub async fn occupants(&self, plot_id: PlotId) -> Result<Vec<Occupant>, PortalError> {
        self.get_plot(plot_id).await?;
        let assignments = self.assignments.list_by_plot(plot_id).await?;
        let mut occupants = Vec::with_capacity(assignments.len());
        for assignment in assignments {
            let deceased = self.get_deceased(assignment.deceased_id).await?;
            occupants.push(Occupant {
                assignment,
                deceased,
            });
        }
        Ok(occupants)
    }

    async fn get_plot(&self, id: PlotId) -> Result<Plot, PortalError> {
        self.plots
            .get_by_id(id)
            .await?
            .ok_or_else(|| PortalError::not_found("Plot", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::InMemoryRepositories;
    use munihub_domain::id::BlockId;
    use munihub_domain::time::parse_date;

    type Service = BurialService<InMemoryRepositories, InMemoryRepositories, InMemoryRepositories>;

    fn make_service() -> (Service, InMemoryRepositories) {
        let repos = InMemoryRepositories::default();
        let svc = BurialService::new(repos.clone(), repos.clone(), repos.clone());
        (svc, repos)
    }

    async fn seed_plot(repos: &InMemoryRepositories, capacity: u32, status: PlotStatus) -> Plot {
        let plot = Plot::builder(BlockId::new())
            .lot("12")
            .capacity(capacity)
            .status(status)
            .build()
            .unwrap();
        PlotRepository::create(repos, plot).await.unwrap()
    }

    async fn seed_person(svc: &Service, last_name: &str) -> Deceased {
        let deceased = Deceased::builder()
            .first_name("Maria")
            .last_name(last_name)
            .date_of_death(parse_date("2024-02-01").unwrap())
            .build()
            .unwrap();
        svc.create_deceased(deceased).await.unwrap()
    }

    #[tokio::test]
    async fn should_mark_plot_occupied_when_first_assignment_made() {
        let (svc, repos) = make_service();
        let plot = seed_plot(&repos, 2, PlotStatus::Available).await;
        let person = seed_person(&svc, "Santos").await;

        let assignment = svc
            .assign(plot.id, person.id, Some(parse_date("2024-02-04").unwrap()))
            .await
            .unwrap();
        assert_eq!(assignment.plot_id, plot.id);

        let stored = PlotRepository::get_by_id(&repos, plot.id).await.unwrap().unwrap();
        assert_eq!(stored.status, PlotStatus::Occupied);
    }

    #[tokio::test]
    async fn should_reject_assignment_when_plot_full() {
        let (svc, repos) = make_service();
        let plot = seed_plot(&repos, 1, PlotStatus::Available).await;
        let first = seed_person(&svc, "Santos").await;
        let second = seed_person(&svc, "Reyes").await;

        svc.assign(plot.id, first.id, None).await.unwrap();
        let result = svc.assign(plot.id, second.id, None).await;
        assert!(matches!(
            result,
            Err(PortalError::Conflict(ConflictError::PlotFull { capacity: 1, .. }))
        ));
    }

    #[tokio::test]
    async fn should_reject_assignment_when_plot_unavailable() {
        let (svc, repos) = make_service();
        let plot = seed_plot(&repos, 1, PlotStatus::Unavailable).await;
        let person = seed_person(&svc, "Santos").await;

        let result = svc.assign(plot.id, person.id, None).await;
        assert!(matches!(
            result,
            Err(PortalError::Conflict(ConflictError::PlotUnavailable { .. }))
        ));
    }

    #[tokio::test]
    async fn should_reject_second_assignment_of_same_person() {
        let (svc, repos) = make_service();
        let a = seed_plot(&repos, 1, PlotStatus::Available).await;
        let b = seed_plot(&repos, 1, PlotStatus::Available).await;
        let person = seed_person(&svc, "Santos").await;

        svc.assign(a.id, person.id, None).await.unwrap();
        let result = svc.assign(b.id, person.id, None).await;
        assert!(matches!(
            result,
            Err(PortalError::Conflict(ConflictError::AlreadyAssigned { .. }))
        ));
    }

    #[tokio::test]
    async fn should_allow_assignment_to_reserved_plot() {
        let (svc, repos) = make_service();
        let plot = seed_plot(&repos, 1, PlotStatus::Reserved).await;
        let person = seed_person(&svc, "Santos").await;
        assert!(svc.assign(plot.id, person.id, None).await.is_ok());
    }

    #[tokio::test]
    async fn should_free_plot_when_last_assignment_removed() {
        let (svc, repos) = make_service();
        let plot = seed_plot(&repos, 2, PlotStatus::Available).await;
        let first = seed_person(&svc, "Santos").await;
        let second = seed_person(&svc, "Reyes").await;
        let a1 = svc.assign(plot.id, first.id, None).await.unwrap();
        let a2 = svc.assign(plot.id, second.id, None).await.unwrap();

        svc.unassign(a1.id).await.unwrap();
        let stored = PlotRepository::get_by_id(&repos, plot.id).await.unwrap().unwrap();
        assert_eq!(stored.status, PlotStatus::Occupied);

        svc.unassign(a2.id).await.unwrap();
        let stored = PlotRepository::get_by_id(&repos, plot.id).await.unwrap().unwrap();
        assert_eq!(stored.status, PlotStatus::Available);
    }

    #[tokio::test]
    async fn should_return_not_found_when_unassigning_unknown_assignment() {
        let (svc, _) = make_service();
        let result = svc.unassign(AssignmentId::new()).await;
        assert!(matches!(result, Err(PortalError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_release_plot_when_deceased_deleted() {
        let (svc, repos) = make_service();
        let plot = seed_plot(&repos, 1, PlotStatus::Available).await;
        let person = seed_person(&svc, "Santos").await;
        svc.assign(plot.id, person.id, None).await.unwrap();

        svc.delete_deceased(person.id).await.unwrap();

        let stored = PlotRepository::get_by_id(&repos, plot.id).await.unwrap().unwrap();
        assert_eq!(stored.status, PlotStatus::Available);
        assert!(matches!(
            svc.get_deceased(person.id).await,
            Err(PortalError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn should_list_occupants_with_their_records() {
        let (svc, repos) = make_service();
        let plot = seed_plot(&repos, 2, PlotStatus::Available).await;
        let person = seed_person(&svc, "Santos").await;
        svc.assign(plot.id, person.id, None).await.unwrap();

        let occupants = svc.occupants(plot.id).await.unwrap();
        assert_eq!(occupants.len(), 1);
        assert_eq!(occupants[0].deceased.last_name, "Santos");
    }
}

//! Loading a [`CemeteryTree`] from the repositories.

use munihub_domain::error::PortalError;
use munihub_domain::id::CemeteryId;
use munihub_domain::search::CemeteryTree;

use crate::ports::{AssignmentRepository, CemeteryRepository, DeceasedRepository, PlotRepository};

/// Borrowed handles to the four repositories a snapshot reads from.
pub(crate) struct Sources<'a, C, P, D, A> {
    pub cemeteries: &'a C,
    pub plots: &'a P,
    pub deceased: &'a D,
    pub assignments: &'a A,
}

impl<C, P, D, A> Sources<'_, C, P, D, A>
where
    C: CemeteryRepository + Sync,
    P: PlotRepository + Sync,
    D: DeceasedRepository + Sync,
    A: AssignmentRepository + Sync,
{
    /// Read one cemetery and everything below it.
    pub async fn load(&self, id: CemeteryId) -> Result<CemeteryTree, PortalError> {
        let cemetery = self
            .cemeteries
            .get_cemetery(id)
            .await?
            .ok_or_else(|| PortalError::not_found("Cemetery", id))?;

        let (sections, blocks, plots, assignments, deceased) = tokio::try_join!(
            self.cemeteries.list_sections(id),
            self.cemeteries.list_blocks_in_cemetery(id),
            self.plots.list_by_cemetery(id),
            self.assignments.list_by_cemetery(id),
            self.deceased.list_by_cemetery(id),
        )?;

        Ok(CemeteryTree::assemble(
            cemetery,
            sections,
            blocks,
            plots,
            assignments,
            deceased,
        ))
    }

    /// Snapshots of every cemetery.
    pub async fn load_all(&self) -> Result<Vec<CemeteryTree>, PortalError> {
        let cemeteries = self.cemeteries.list_cemeteries().await?;
        let mut trees = Vec::with_capacity(cemeteries.len());
        for cemetery in cemeteries {
            trees.push(self.load(cemetery.id).await?);
        }
        Ok(trees)
    }
}

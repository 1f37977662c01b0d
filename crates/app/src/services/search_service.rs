//! Search service: finding the dead and walking to where they rest.

use munihub_domain::error::PortalError;
use munihub_domain::geo::Coordinate;
use munihub_domain::id::{CemeteryId, PlotId};
use munihub_domain::map::PlotDirections;
use munihub_domain::search::{self, DEFAULT_LIMIT, SearchHit, SearchQuery};

use crate::ports::{AssignmentRepository, CemeteryRepository, DeceasedRepository, PlotRepository};
use crate::services::snapshot::Sources;

/// Application service for record search and plot navigation.
///
/// Every call reads a fresh snapshot and scans it linearly.
pub struct SearchService<C, P, D, A> {
    cemeteries: C,
    plots: P,
    deceased: D,
    assignments: A,
    default_limit: usize,
}

impl<C, P, D, A> SearchService<C, P, D, A>
where
    C: CemeteryRepository + Send + Sync,
    P: PlotRepository + Send + Sync,
    D: DeceasedRepository + Send + Sync,
    A: AssignmentRepository + Send + Sync,
{
    pub fn new(cemeteries: C, plots: P, deceased: D, assignments: A) -> Self {
        Self {
            cemeteries,
            plots,
            deceased,
            assignments,
            default_limit: DEFAULT_LIMIT,
        }
    }

    /// Limit applied when a query does not carry one.
    #[must_use]
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    fn sources(&self) -> Sources<'_, C, P, D, A> {
        Sources {
            cemeteries: &self.cemeteries,
            plots: &self.plots,
            deceased: &self.deceased,
            assignments: &self.assignments,
        }
    }

    fn with_limit(&self, mut query: SearchQuery) -> SearchQuery {
        query.limit.get_or_insert(self.default_limit);
        query
    }

    /// Search within one cemetery.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] if the cemetery does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn search_cemetery(
        &self,
        cemetery_id: CemeteryId,
        query: SearchQuery,
    ) -> Result<Vec<SearchHit>, PortalError> {
        let tree = self.sources().load(cemetery_id).await?;
        let hits = tree.search(&self.with_limit(query));
        tracing::debug!(hits = hits.len(), "search finished");
        Ok(hits)
    }

    /// Search across every cemetery.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repositories.
    #[tracing::instrument(skip(self))]
    pub async fn search_all(&self, query: SearchQuery) -> Result<Vec<SearchHit>, PortalError> {
        let trees = self.sources().load_all().await?;
        let hits = search::search(&trees, &self.with_limit(query));
        tracing::debug!(cemeteries = trees.len(), hits = hits.len(), "search finished");
        Ok(hits)
    }

    /// Walking directions from `from` to a plot.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] if the plot or its parents do not
    /// exist, or a conflict when the plot has no known position.
    #[tracing::instrument(skip(self))]
    pub async fn navigate(
        &self,
        plot_id: PlotId,
        from: Coordinate,
    ) -> Result<PlotDirections, PortalError> {
        let cemetery_id = self.cemetery_of(plot_id).await?;
        let tree = self.sources().load(cemetery_id).await?;
        PlotDirections::find(&tree, plot_id, from)
    }

    async fn cemetery_of(&self, plot_id: PlotId) -> Result<CemeteryId, PortalError> {
        let plot = self
            .plots
            .get_by_id(plot_id)
            .await?
            .ok_or_else(|| PortalError::not_found("Plot", plot_id))?;
        let block = self
            .cemeteries
            .get_block(plot.block_id)
            .await?
            .ok_or_else(|| PortalError::not_found("Block", plot.block_id))?;
        let section = self
            .cemeteries
            .get_section(block.section_id)
            .await?
            .ok_or_else(|| PortalError::not_found("Section", block.section_id))?;
        Ok(section.cemetery_id)
    }
}

//! Cemetery service: layout and plot management, stats and map views.

use munihub_domain::cemetery::{Block, Cemetery, Plot, PlotStatus, Section};
use munihub_domain::error::{ConflictError, PortalError, ValidationError};
use munihub_domain::id::{BlockId, CemeteryId, PlotId, SectionId};
use munihub_domain::map::CemeteryMap;
use munihub_domain::stats::CemeteryStats;

use crate::ports::{AssignmentRepository, CemeteryRepository, DeceasedRepository, PlotRepository};
use crate::services::snapshot::Sources;

/// Application service for the cemetery layout and its plots.
pub struct CemeteryService<C, P, D, A> {
    cemeteries: C,
    plots: P,
    deceased: D,
    assignments: A,
}

impl<C, P, D, A> CemeteryService<C, P, D, A>
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
        }
    }

    fn sources(&self) -> Sources<'_, C, P, D, A> {
        Sources {
            cemeteries: &self.cemeteries,
            plots: &self.plots,
            deceased: &self.deceased,
            assignments: &self.assignments,
        }
    }

    /// Create a new cemetery after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip_all, fields(cemetery.name = %cemetery.name))]
    pub async fn create_cemetery(&self, cemetery: Cemetery) -> Result<Cemetery, PortalError> {
        cemetery.validate()?;
        self.cemeteries.create_cemetery(cemetery).await
    }

    /// Look up a cemetery by id.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] when no cemetery with `id` exists.
    pub async fn get_cemetery(&self, id: CemeteryId) -> Result<Cemetery, PortalError> {
        self.cemeteries
            .get_cemetery(id)
            .await?
            .ok_or_else(|| PortalError::not_found("Cemetery", id))
    }

    /// List all cemeteries.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_cemeteries(&self) -> Result<Vec<Cemetery>, PortalError> {
        self.cemeteries.list_cemeteries().await
    }

    /// Replace the details of an existing cemetery.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] if invariants fail or
    /// [`PortalError::NotFound`] if the cemetery does not exist.
    #[tracing::instrument(skip_all, fields(cemetery.id = %cemetery.id))]
    pub async fn update_cemetery(&self, cemetery: Cemetery) -> Result<Cemetery, PortalError> {
        cemetery.validate()?;
        self.get_cemetery(cemetery.id).await?;
        self.cemeteries.update_cemetery(cemetery).await
    }

    /// Delete a cemetery with all of its sections, blocks, plots and
    /// assignments.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] if the cemetery does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn delete_cemetery(&self, id: CemeteryId) -> Result<(), PortalError> {
        self.get_cemetery(id).await?;
        self.cemeteries.delete_cemetery(id).await
    }

    /// Add a section to an existing cemetery.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] if invariants fail or
    /// [`PortalError::NotFound`] if the cemetery does not exist.
    #[tracing::instrument(skip_all, fields(section.name = %section.name))]
    pub async fn create_section(&self, section: Section) -> Result<Section, PortalError> {
        section.validate()?;
        self.get_cemetery(section.cemetery_id).await?;
        self.cemeteries.create_section(section).await
    }

    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] when no section with `id` exists.
    pub async fn get_section(&self, id: SectionId) -> Result<Section, PortalError> {
        self.cemeteries
            .get_section(id)
            .await?
            .ok_or_else(|| PortalError::not_found("Section", id))
    }

    /// Sections of one cemetery.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] if the cemetery does not exist.
    pub async fn list_sections(&self, cemetery_id: CemeteryId) -> Result<Vec<Section>, PortalError> {
        self.get_cemetery(cemetery_id).await?;
        self.cemeteries.list_sections(cemetery_id).await
    }

    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] if the section does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn delete_section(&self, id: SectionId) -> Result<(), PortalError> {
        self.get_section(id).await?;
        self.cemeteries.delete_section(id).await
    }

    /// Add a block to an existing section.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] if invariants fail or
    /// [`PortalError::NotFound`] if the section does not exist.
    #[tracing::instrument(skip_all, fields(block.name = %block.name))]
    pub async fn create_block(&self, block: Block) -> Result<Block, PortalError> {
        block.validate()?;
        self.get_section(block.section_id).await?;
        self.cemeteries.create_block(block).await
    }

    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] when no block with `id` exists.
    pub async fn get_block(&self, id: BlockId) -> Result<Block, PortalError> {
        self.cemeteries
            .get_block(id)
            .await?
            .ok_or_else(|| PortalError::not_found("Block", id))
    }

    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] if the section does not exist.
    pub async fn list_blocks(&self, section_id: SectionId) -> Result<Vec<Block>, PortalError> {
        self.get_section(section_id).await?;
        self.cemeteries.list_blocks(section_id).await
    }

    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] if the block does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn delete_block(&self, id: BlockId) -> Result<(), PortalError> {
        self.get_block(id).await?;
        self.cemeteries.delete_block(id).await
    }

    /// Add a plot to an existing block.
    ///
    /// New plots cannot start out occupied; that status follows assignments.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] if invariants fail or
    /// [`PortalError::NotFound`] if the block does not exist.
    #[tracing::instrument(skip_all, fields(plot.lot = %plot.lot))]
    pub async fn create_plot(&self, plot: Plot) -> Result<Plot, PortalError> {
        plot.validate()?;
        if plot.status == PlotStatus::Occupied {
            return Err(ValidationError::InvalidTransition {
                from: PlotStatus::Available.as_str(),
                to: PlotStatus::Occupied.as_str(),
            }
            .into());
        }
        self.get_block(plot.block_id).await?;
        self.plots.create(plot).await
    }

    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] when no plot with `id` exists.
    pub async fn get_plot(&self, id: PlotId) -> Result<Plot, PortalError> {
        self.plots
            .get_by_id(id)
            .await?
            .ok_or_else(|| PortalError::not_found("Plot", id))
    }

    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] if the block does not exist.
    pub async fn list_plots(&self, block_id: BlockId) -> Result<Vec<Plot>, PortalError> {
        self.get_block(block_id).await?;
        self.plots.list_by_block(block_id).await
    }

    /// Replace the details of a plot (lot, kind, capacity, location).
    ///
    /// The stored status and block are kept; use [`Self::set_plot_status`]
    /// to change the status.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] if invariants fail,
    /// [`PortalError::NotFound`] if the plot does not exist, or
    /// [`ConflictError::PlotFull`] if the new capacity is below the number
    /// of current occupants.
    #[tracing::instrument(skip_all, fields(plot.id = %plot.id))]
    pub async fn update_plot(&self, mut plot: Plot) -> Result<Plot, PortalError> {
        let stored = self.get_plot(plot.id).await?;
        plot.status = stored.status;
        plot.block_id = stored.block_id;
        plot.validate()?;

        let occupants = self.assignments.list_by_plot(plot.id).await?.len();
        if (plot.capacity as usize) < occupants {
            return Err(ConflictError::PlotFull {
                plot: plot.id.to_string(),
                capacity: plot.capacity,
            }
            .into());
        }
        self.plots.update(plot).await
    }

    /// Set a plot's status by hand.
    ///
    /// `occupied` is only valid while the plot has occupants, and a plot
    /// with occupants cannot be moved to any other status.
    ///
    /// # Errors
    ///
    /// Returns [`ConflictError::PlotStillOccupied`] or
    /// [`ValidationError::InvalidTransition`] when the change contradicts
    /// the plot's assignments, or [`PortalError::NotFound`].
    #[tracing::instrument(skip(self))]
    pub async fn set_plot_status(&self, id: PlotId, status: PlotStatus) -> Result<Plot, PortalError> {
        let mut plot = self.get_plot(id).await?;
        let occupied = !self.assignments.list_by_plot(id).await?.is_empty();

        if occupied && status != PlotStatus::Occupied {
            return Err(ConflictError::PlotStillOccupied {
                plot: id.to_string(),
            }
            .into());
        }
        if !occupied && status == PlotStatus::Occupied {
            return Err(ValidationError::InvalidTransition {
                from: plot.status.as_str(),
                to: status.as_str(),
            }
            .into());
        }

        plot.status = status;
        self.plots.update(plot).await
    }

    /// Delete an empty plot.
    ///
    /// # Errors
    ///
    /// Returns [`ConflictError::PlotStillOccupied`] if anyone is assigned to
    /// the plot, or [`PortalError::NotFound`].
    #[tracing::instrument(skip(self))]
    pub async fn delete_plot(&self, id: PlotId) -> Result<(), PortalError> {
        self.get_plot(id).await?;
        if !self.assignments.list_by_plot(id).await?.is_empty() {
            return Err(ConflictError::PlotStillOccupied {
                plot: id.to_string(),
            }
            .into());
        }
        self.plots.delete(id).await
    }

    /// Occupancy counts for one cemetery, broken down by section.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] if the cemetery does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn cemetery_stats(&self, id: CemeteryId) -> Result<CemeteryStats, PortalError> {
        let tree = self.sources().load(id).await?;
        Ok(CemeteryStats::from_tree(&tree))
    }

    /// Shapes, plot markers and legend for drawing a cemetery.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] if the cemetery does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn cemetery_map(&self, id: CemeteryId) -> Result<CemeteryMap, PortalError> {
        let tree = self.sources().load(id).await?;
        Ok(CemeteryMap::from_tree(&tree))
    }
}

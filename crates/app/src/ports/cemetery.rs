//! Cemetery ports: persistence for the layout, plots, deceased records and
//! the assignments linking them.

use std::future::Future;

use munihub_domain::cemetery::{Assignment, Block, Cemetery, Deceased, Plot, Section};
use munihub_domain::error::PortalError;
use munihub_domain::id::{AssignmentId, BlockId, CemeteryId, DeceasedId, PlotId, SectionId};

/// Repository for the cemetery layout: cemeteries, their sections and the
/// blocks inside each section.
///
/// Deleting a parent removes everything below it.
pub trait CemeteryRepository {
    fn create_cemetery(
        &self,
        cemetery: Cemetery,
    ) -> impl Future<Output = Result<Cemetery, PortalError>> + Send;

    fn get_cemetery(
        &self,
        id: CemeteryId,
    ) -> impl Future<Output = Result<Option<Cemetery>, PortalError>> + Send;

    fn list_cemeteries(&self) -> impl Future<Output = Result<Vec<Cemetery>, PortalError>> + Send;

    fn update_cemetery(
        &self,
        cemetery: Cemetery,
    ) -> impl Future<Output = Result<Cemetery, PortalError>> + Send;

    fn delete_cemetery(&self, id: CemeteryId)
    -> impl Future<Output = Result<(), PortalError>> + Send;

    fn create_section(
        &self,
        section: Section,
    ) -> impl Future<Output = Result<Section, PortalError>> + Send;

    fn get_section(
        &self,
        id: SectionId,
    ) -> impl Future<Output = Result<Option<Section>, PortalError>> + Send;

    /// Sections of one cemetery.
    fn list_sections(
        &self,
        cemetery_id: CemeteryId,
    ) -> impl Future<Output = Result<Vec<Section>, PortalError>> + Send;

    fn delete_section(&self, id: SectionId) -> impl Future<Output = Result<(), PortalError>> + Send;

    fn create_block(&self, block: Block) -> impl Future<Output = Result<Block, PortalError>> + Send;

    fn get_block(
        &self,
        id: BlockId,
    ) -> impl Future<Output = Result<Option<Block>, PortalError>> + Send;

    /// Blocks of one section.
    fn list_blocks(
        &self,
        section_id: SectionId,
    ) -> impl Future<Output = Result<Vec<Block>, PortalError>> + Send;

    /// Blocks of every section of one cemetery.
    fn list_blocks_in_cemetery(
        &self,
        cemetery_id: CemeteryId,
    ) -> impl Future<Output = Result<Vec<Block>, PortalError>> + Send;

    fn delete_block(&self, id: BlockId) -> impl Future<Output = Result<(), PortalError>> + Send;
}

/// Repository for persisting and querying [`Plot`]s.
pub trait PlotRepository {
    fn create(&self, plot: Plot) -> impl Future<Output = Result<Plot, PortalError>> + Send;

    fn get_by_id(
        &self,
        id: PlotId,
    ) -> impl Future<Output = Result<Option<Plot>, PortalError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Plot>, PortalError>> + Send;

    fn list_by_block(
        &self,
        block_id: BlockId,
    ) -> impl Future<Output = Result<Vec<Plot>, PortalError>> + Send;

    /// Plots of every block of one cemetery.
    fn list_by_cemetery(
        &self,
        cemetery_id: CemeteryId,
    ) -> impl Future<Output = Result<Vec<Plot>, PortalError>> + Send;

    fn update(&self, plot: Plot) -> impl Future<Output = Result<Plot, PortalError>> + Send;

    fn delete(&self, id: PlotId) -> impl Future<Output = Result<(), PortalError>> + Send;
}

/// Repository for persisting and querying [`Deceased`] records.
pub trait DeceasedRepository {
    fn create(
        &self,
        deceased: Deceased,
    ) -> impl Future<Output = Result<Deceased, PortalError>> + Send;

    fn get_by_id(
        &self,
        id: DeceasedId,
    ) -> impl Future<Output = Result<Option<Deceased>, PortalError>> + Send;

    /// All records, ordered by last name then first name.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Deceased>, PortalError>> + Send;

    /// Records assigned to a plot somewhere in one cemetery.
    fn list_by_cemetery(
        &self,
        cemetery_id: CemeteryId,
    ) -> impl Future<Output = Result<Vec<Deceased>, PortalError>> + Send;

    fn update(
        &self,
        deceased: Deceased,
    ) -> impl Future<Output = Result<Deceased, PortalError>> + Send;

    fn delete(&self, id: DeceasedId) -> impl Future<Output = Result<(), PortalError>> + Send;
}

/// Repository for plot [`Assignment`]s.
pub trait AssignmentRepository {
    fn create(
        &self,
        assignment: Assignment,
    ) -> impl Future<Output = Result<Assignment, PortalError>> + Send;

    fn get_by_id(
        &self,
        id: AssignmentId,
    ) -> impl Future<Output = Result<Option<Assignment>, PortalError>> + Send;

    /// Assignments of one plot, oldest first.
    fn list_by_plot(
        &self,
        plot_id: PlotId,
    ) -> impl Future<Output = Result<Vec<Assignment>, PortalError>> + Send;

    fn find_by_deceased(
        &self,
        deceased_id: DeceasedId,
    ) -> impl Future<Output = Result<Option<Assignment>, PortalError>> + Send;

    fn list_by_cemetery(
        &self,
        cemetery_id: CemeteryId,
    ) -> impl Future<Output = Result<Vec<Assignment>, PortalError>> + Send;

    fn delete(&self, id: AssignmentId) -> impl Future<Output = Result<(), PortalError>> + Send;
}

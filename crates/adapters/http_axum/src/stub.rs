//! Repositories that store nothing, for exercising the router.
//!
//! Writes echo their input and reads find nothing.

use munihub_app::ports::{
    AssignmentRepository, CemeteryRepository, DeceasedRepository, FacilityRepository,
    PermitFilter, PermitRepository, PlotRepository, Repositories, ReservationRepository,
    ServiceRequestRepository,
};
use munihub_domain::cemetery::{Assignment, Block, Cemetery, Deceased, Plot, Section};
use munihub_domain::error::PortalError;
use munihub_domain::id::{
    AssignmentId, BlockId, CemeteryId, DeceasedId, FacilityId, PermitId, PlotId, ReservationId,
    SectionId, ServiceRequestId,
};
use munihub_domain::permit::Permit;
use munihub_domain::reservation::{Facility, Reservation};
use munihub_domain::service_request::{RequestStatus, ServiceRequest};

pub(crate) struct StubRepositories;

impl Repositories for StubRepositories {
    type Cemeteries = Self;
    type Plots = Self;
    type Deceased = Self;
    type Assignments = Self;
    type Permits = Self;
    type Facilities = Self;
    type Reservations = Self;
    type ServiceRequests = Self;

    fn cemeteries(&self) -> Self {
        Self
    }
    fn plots(&self) -> Self {
        Self
    }
    fn deceased(&self) -> Self {
        Self
    }
    fn assignments(&self) -> Self {
        Self
    }
    fn permits(&self) -> Self {
        Self
    }
    fn facilities(&self) -> Self {
        Self
    }
    fn reservations(&self) -> Self {
        Self
    }
    fn service_requests(&self) -> Self {
        Self
    }
}

impl CemeteryRepository for StubRepositories {
    async fn create_cemetery(&self, cemetery: Cemetery) -> Result<Cemetery, PortalError> {
        Ok(cemetery)
    }
    async fn get_cemetery(&self, _id: CemeteryId) -> Result<Option<Cemetery>, PortalError> {
        Ok(None)
    }
    async fn list_cemeteries(&self) -> Result<Vec<Cemetery>, PortalError> {
        Ok(vec![])
    }
    async fn update_cemetery(&self, cemetery: Cemetery) -> Result<Cemetery, PortalError> {
        Ok(cemetery)
    }
    async fn delete_cemetery(&self, _id: CemeteryId) -> Result<(), PortalError> {
        Ok(())
    }
    async fn create_section(&self, section: Section) -> Result<Section, PortalError> {
        Ok(section)
    }
    async fn get_section(&self, _id: SectionId) -> Result<Option<Section>, PortalError> {
        Ok(None)
    }
    async fn list_sections(&self, _id: CemeteryId) -> Result<Vec<Section>, PortalError> {
        Ok(vec![])
    }
    async fn delete_section(&self, _id: SectionId) -> Result<(), PortalError> {
        Ok(())
    }
    async fn create_block(&self, block: Block) -> Result<Block, PortalError> {
        Ok(block)
    }
    async fn get_block(&self, _id: BlockId) -> Result<Option<Block>, PortalError> {
        Ok(None)
    }
    async fn list_blocks(&self, _id: SectionId) -> Result<Vec<Block>, PortalError> {
        Ok(vec![])
    }
    async fn list_blocks_in_cemetery(&self, _id: CemeteryId) -> Result<Vec<Block>, PortalError> {
        Ok(vec![])
    }
    async fn delete_block(&self, _id: BlockId) -> Result<(), PortalError> {
        Ok(())
    }
}

impl PlotRepository for StubRepositories {
    async fn create(&self, plot: Plot) -> Result<Plot, PortalError> {
        Ok(plot)
    }
    async fn get_by_id(&self, _id: PlotId) -> Result<Option<Plot>, PortalError> {
        Ok(None)
    }
    async fn get_all(&self) -> Result<Vec<Plot>, PortalError> {
        Ok(vec![])
    }
    async fn list_by_block(&self, _id: BlockId) -> Result<Vec<Plot>, PortalError> {
        Ok(vec![])
    }
    async fn list_by_cemetery(&self, _id: CemeteryId) -> Result<Vec<Plot>, PortalError> {
        Ok(vec![])
    }
    async fn update(&self, plot: Plot) -> Result<Plot, PortalError> {
        Ok(plot)
    }
    async fn delete(&self, _id: PlotId) -> Result<(), PortalError> {
        Ok(())
    }
}

impl DeceasedRepository for StubRepositories {
    async fn create(&self, deceased: Deceased) -> Result<Deceased, PortalError> {
        Ok(deceased)
    }
    async fn get_by_id(&self, _id: DeceasedId) -> Result<Option<Deceased>, PortalError> {
        Ok(None)
    }
    async fn get_all(&self) -> Result<Vec<Deceased>, PortalError> {
        Ok(vec![])
    }
    async fn list_by_cemetery(&self, _id: CemeteryId) -> Result<Vec<Deceased>, PortalError> {
        Ok(vec![])
    }
    async fn update(&self, deceased: Deceased) -> Result<Deceased, PortalError> {
        Ok(deceased)
    }
    async fn delete(&self, _id: DeceasedId) -> Result<(), PortalError> {
        Ok(())
    }
}

impl AssignmentRepository for StubRepositories {
    async fn create(&self, assignment: Assignment) -> Result<Assignment, PortalError> {
        Ok(assignment)
    }
    async fn get_by_id(&self, _id: AssignmentId) -> Result<Option<Assignment>, PortalError> {
        Ok(None)
    }
    async fn list_by_plot(&self, _id: PlotId) -> Result<Vec<Assignment>, PortalError> {
        Ok(vec![])
    }
    async fn find_by_deceased(&self, _id: DeceasedId) -> Result<Option<Assignment>, PortalError> {
        Ok(None)
    }
    async fn list_by_cemetery(&self, _id: CemeteryId) -> Result<Vec<Assignment>, PortalError> {
        Ok(vec![])
    }
    async fn delete(&self, _id: AssignmentId) -> Result<(), PortalError> {
        Ok(())
    }
}

impl PermitRepository for StubRepositories {
    async fn create(&self, permit: Permit) -> Result<Permit, PortalError> {
        Ok(permit)
    }
    async fn get_by_id(&self, _id: PermitId) -> Result<Option<Permit>, PortalError> {
        Ok(None)
    }
    async fn list(&self, _filter: PermitFilter) -> Result<Vec<Permit>, PortalError> {
        Ok(vec![])
    }
    async fn update(&self, permit: Permit) -> Result<Permit, PortalError> {
        Ok(permit)
    }
}

impl FacilityRepository for StubRepositories {
    async fn create(&self, facility: Facility) -> Result<Facility, PortalError> {
        Ok(facility)
    }
    async fn get_by_id(&self, _id: FacilityId) -> Result<Option<Facility>, PortalError> {
        Ok(None)
    }
    async fn get_all(&self) -> Result<Vec<Facility>, PortalError> {
        Ok(vec![])
    }
    async fn delete(&self, _id: FacilityId) -> Result<(), PortalError> {
        Ok(())
    }
}

impl ReservationRepository for StubRepositories {
    async fn create(&self, reservation: Reservation) -> Result<Reservation, PortalError> {
        Ok(reservation)
    }
    async fn get_by_id(&self, _id: ReservationId) -> Result<Option<Reservation>, PortalError> {
        Ok(None)
    }
    async fn get_all(&self) -> Result<Vec<Reservation>, PortalError> {
        Ok(vec![])
    }
    async fn list_by_facility(&self, _id: FacilityId) -> Result<Vec<Reservation>, PortalError> {
        Ok(vec![])
    }
    async fn update(&self, reservation: Reservation) -> Result<Reservation, PortalError> {
        Ok(reservation)
    }
}

impl ServiceRequestRepository for StubRepositories {
    async fn create(&self, request: ServiceRequest) -> Result<ServiceRequest, PortalError> {
        Ok(request)
    }
    async fn get_by_id(
        &self,
        _id: ServiceRequestId,
    ) -> Result<Option<ServiceRequest>, PortalError> {
        Ok(None)
    }
    async fn list(
        &self,
        _status: Option<RequestStatus>,
    ) -> Result<Vec<ServiceRequest>, PortalError> {
        Ok(vec![])
    }
    async fn update(&self, request: ServiceRequest) -> Result<ServiceRequest, PortalError> {
        Ok(request)
    }
}

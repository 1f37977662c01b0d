//! In-memory implementations of every port, shared by service tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use munihub_domain::cemetery::{Assignment, Block, Cemetery, Deceased, Plot, Section};
use munihub_domain::error::PortalError;
use munihub_domain::id::{
    AssignmentId, BlockId, CemeteryId, DeceasedId, FacilityId, PermitId, PlotId, ReservationId,
    SectionId, ServiceRequestId,
};
use munihub_domain::permit::Permit;
use munihub_domain::reservation::{Facility, Reservation};
use munihub_domain::service_request::{RequestStatus, ServiceRequest};

use crate::ports::{
    AssignmentRepository, CemeteryRepository, DeceasedRepository, FacilityRepository,
    PermitFilter, PermitRepository, PlotRepository, Repositories, ReservationRepository,
    ServiceRequestRepository,
};

#[derive(Default)]
struct Store {
    cemeteries: HashMap<CemeteryId, Cemetery>,
    sections: HashMap<SectionId, Section>,
    blocks: HashMap<BlockId, Block>,
    plots: HashMap<PlotId, Plot>,
    deceased: HashMap<DeceasedId, Deceased>,
    assignments: HashMap<AssignmentId, Assignment>,
    permits: HashMap<PermitId, Permit>,
    facilities: HashMap<FacilityId, Facility>,
    reservations: HashMap<ReservationId, Reservation>,
    requests: HashMap<ServiceRequestId, ServiceRequest>,
}

impl Store {
    fn cemetery_of_block(&self, block_id: BlockId) -> Option<CemeteryId> {
        let block = self.blocks.get(&block_id)?;
        let section = self.sections.get(&block.section_id)?;
        Some(section.cemetery_id)
    }

    fn cemetery_of_plot(&self, plot_id: PlotId) -> Option<CemeteryId> {
        let plot = self.plots.get(&plot_id)?;
        self.cemetery_of_block(plot.block_id)
    }

    fn remove_plot(&mut self, id: PlotId) {
        self.plots.remove(&id);
        self.assignments.retain(|_, a| a.plot_id != id);
    }

    fn remove_block(&mut self, id: BlockId) {
        self.blocks.remove(&id);
        let plots: Vec<PlotId> = self
            .plots
            .values()
            .filter(|p| p.block_id == id)
            .map(|p| p.id)
            .collect();
        for plot in plots {
            self.remove_plot(plot);
        }
    }

    fn remove_section(&mut self, id: SectionId) {
        self.sections.remove(&id);
        let blocks: Vec<BlockId> = self
            .blocks
            .values()
            .filter(|b| b.section_id == id)
            .map(|b| b.id)
            .collect();
        for block in blocks {
            self.remove_block(block);
        }
    }
}

/// Every repository port over one shared in-memory store.
#[derive(Clone, Default)]
pub struct InMemoryRepositories {
    store: Arc<Mutex<Store>>,
}

impl InMemoryRepositories {
    fn with<T>(&self, f: impl FnOnce(&mut Store) -> T) -> T {
        let mut store = self.store.lock().unwrap();
        f(&mut store)
    }
}

impl Repositories for InMemoryRepositories {
    type Cemeteries = Self;
    type Plots = Self;
    type Deceased = Self;
    type Assignments = Self;
    type Permits = Self;
    type Facilities = Self;
    type Reservations = Self;
    type ServiceRequests = Self;

    fn cemeteries(&self) -> Self {
        self.clone()
    }
    fn plots(&self) -> Self {
        self.clone()
    }
    fn deceased(&self) -> Self {
        self.clone()
    }
    fn assignments(&self) -> Self {
        self.clone()
    }
    fn permits(&self) -> Self {
        self.clone()
    }
    fn facilities(&self) -> Self {
        self.clone()
    }
    fn reservations(&self) -> Self {
        self.clone()
    }
    fn service_requests(&self) -> Self {
        self.clone()
    }
}

impl CemeteryRepository for InMemoryRepositories {
    async fn create_cemetery(&self, cemetery: Cemetery) -> Result<Cemetery, PortalError> {
        self.with(|s| s.cemeteries.insert(cemetery.id, cemetery.clone()));
        Ok(cemetery)
    }

    async fn get_cemetery(&self, id: CemeteryId) -> Result<Option<Cemetery>, PortalError> {
        Ok(self.with(|s| s.cemeteries.get(&id).cloned()))
    }

    async fn list_cemeteries(&self) -> Result<Vec<Cemetery>, PortalError> {
        let mut all: Vec<Cemetery> = self.with(|s| s.cemeteries.values().cloned().collect());
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn update_cemetery(&self, cemetery: Cemetery) -> Result<Cemetery, PortalError> {
        self.with(|s| s.cemeteries.insert(cemetery.id, cemetery.clone()));
        Ok(cemetery)
    }

    async fn delete_cemetery(&self, id: CemeteryId) -> Result<(), PortalError> {
        self.with(|s| {
            s.cemeteries.remove(&id);
            let sections: Vec<SectionId> = s
                .sections
                .values()
                .filter(|section| section.cemetery_id == id)
                .map(|section| section.id)
                .collect();
            for section in sections {
                s.remove_section(section);
            }
        });
        Ok(())
    }

    async fn create_section(&self, section: Section) -> Result<Section, PortalError> {
        self.with(|s| s.sections.insert(section.id, section.clone()));
        Ok(section)
    }

    async fn get_section(&self, id: SectionId) -> Result<Option<Section>, PortalError> {
        Ok(self.with(|s| s.sections.get(&id).cloned()))
    }

    async fn list_sections(&self, cemetery_id: CemeteryId) -> Result<Vec<Section>, PortalError> {
        Ok(self.with(|s| {
            s.sections
                .values()
                .filter(|section| section.cemetery_id == cemetery_id)
                .cloned()
                .collect()
        }))
    }

    async fn delete_section(&self, id: SectionId) -> Result<(), PortalError> {
        self.with(|s| s.remove_section(id));
        Ok(())
    }

    async fn create_block(&self, block: Block) -> Result<Block, PortalError> {
        self.with(|s| s.blocks.insert(block.id, block.clone()));
        Ok(block)
    }

    async fn get_block(&self, id: BlockId) -> Result<Option<Block>, PortalError> {
        Ok(self.with(|s| s.blocks.get(&id).cloned()))
    }

    async fn list_blocks(&self, section_id: SectionId) -> Result<Vec<Block>, PortalError> {
        Ok(self.with(|s| {
            s.blocks
                .values()
                .filter(|block| block.section_id == section_id)
                .cloned()
                .collect()
        }))
    }

    async fn list_blocks_in_cemetery(
        &self,
        cemetery_id: CemeteryId,
    ) -> Result<Vec<Block>, PortalError> {
        Ok(self.with(|s| {
            s.blocks
                .values()
                .filter(|block| s.cemetery_of_block(block.id) == Some(cemetery_id))
                .cloned()
                .collect()
        }))
    }

    async fn delete_block(&self, id: BlockId) -> Result<(), PortalError> {
        self.with(|s| s.remove_block(id));
        Ok(())
    }
}

impl PlotRepository for InMemoryRepositories {
    async fn create(&self, plot: Plot) -> Result<Plot, PortalError> {
        self.with(|s| s.plots.insert(plot.id, plot.clone()));
        Ok(plot)
    }

    async fn get_by_id(&self, id: PlotId) -> Result<Option<Plot>, PortalError> {
        Ok(self.with(|s| s.plots.get(&id).cloned()))
    }

    async fn get_all(&self) -> Result<Vec<Plot>, PortalError> {
        Ok(self.with(|s| s.plots.values().cloned().collect()))
    }

    async fn list_by_block(&self, block_id: BlockId) -> Result<Vec<Plot>, PortalError> {
        Ok(self.with(|s| {
            s.plots
                .values()
                .filter(|plot| plot.block_id == block_id)
                .cloned()
                .collect()
        }))
    }

    async fn list_by_cemetery(&self, cemetery_id: CemeteryId) -> Result<Vec<Plot>, PortalError> {
        Ok(self.with(|s| {
            s.plots
                .values()
                .filter(|plot| s.cemetery_of_block(plot.block_id) == Some(cemetery_id))
                .cloned()
                .collect()
        }))
    }

    async fn update(&self, plot: Plot) -> Result<Plot, PortalError> {
        self.with(|s| s.plots.insert(plot.id, plot.clone()));
        Ok(plot)
    }

    async fn delete(&self, id: PlotId) -> Result<(), PortalError> {
        self.with(|s| s.remove_plot(id));
        Ok(())
    }
}

impl DeceasedRepository for InMemoryRepositories {
    async fn create(&self, deceased: Deceased) -> Result<Deceased, PortalError> {
        self.with(|s| s.deceased.insert(deceased.id, deceased.clone()));
        Ok(deceased)
    }

    async fn get_by_id(&self, id: DeceasedId) -> Result<Option<Deceased>, PortalError> {
        Ok(self.with(|s| s.deceased.get(&id).cloned()))
    }

    async fn get_all(&self) -> Result<Vec<Deceased>, PortalError> {
        let mut all: Vec<Deceased> = self.with(|s| s.deceased.values().cloned().collect());
        all.sort_by(|a, b| {
            (&a.last_name, &a.first_name).cmp(&(&b.last_name, &b.first_name))
        });
        Ok(all)
    }

    async fn list_by_cemetery(
        &self,
        cemetery_id: CemeteryId,
    ) -> Result<Vec<Deceased>, PortalError> {
        Ok(self.with(|s| {
            s.assignments
                .values()
                .filter(|a| s.cemetery_of_plot(a.plot_id) == Some(cemetery_id))
                .filter_map(|a| s.deceased.get(&a.deceased_id).cloned())
                .collect()
        }))
    }

    async fn update(&self, deceased: Deceased) -> Result<Deceased, PortalError> {
        self.with(|s| s.deceased.insert(deceased.id, deceased.clone()));
        Ok(deceased)
    }

    async fn delete(&self, id: DeceasedId) -> Result<(), PortalError> {
        self.with(|s| {
            s.deceased.remove(&id);
            s.assignments.retain(|_, a| a.deceased_id != id);
        });
        Ok(())
    }
}

impl AssignmentRepository for InMemoryRepositories {
    async fn create(&self, assignment: Assignment) -> Result<Assignment, PortalError> {
        self.with(|s| s.assignments.insert(assignment.id, assignment.clone()));
        Ok(assignment)
    }

    async fn get_by_id(&self, id: AssignmentId) -> Result<Option<Assignment>, PortalError> {
        Ok(self.with(|s| s.assignments.get(&id).cloned()))
    }

    async fn list_by_plot(&self, plot_id: PlotId) -> Result<Vec<Assignment>, PortalError> {
        let mut found: Vec<Assignment> = self.with(|s| {
            s.assignments
                .values()
                .filter(|a| a.plot_id == plot_id)
                .cloned()
                .collect()
        });
        found.sort_by_key(|a| a.assigned_at);
        Ok(found)
    }

    async fn find_by_deceased(
        &self,
        deceased_id: DeceasedId,
    ) -> Result<Option<Assignment>, PortalError> {
        Ok(self.with(|s| {
            s.assignments
                .values()
                .find(|a| a.deceased_id == deceased_id)
                .cloned()
        }))
    }

    async fn list_by_cemetery(
        &self,
        cemetery_id: CemeteryId,
    ) -> Result<Vec<Assignment>, PortalError> {
        Ok(self.with(|s| {
            s.assignments
                .values()
                .filter(|a| s.cemetery_of_plot(a.plot_id) == Some(cemetery_id))
                .cloned()
                .collect()
        }))
    }

    async fn delete(&self, id: AssignmentId) -> Result<(), PortalError> {
        self.with(|s| s.assignments.remove(&id));
        Ok(())
    }
}

impl PermitRepository for InMemoryRepositories {
    async fn create(&self, permit: Permit) -> Result<Permit, PortalError> {
        self.with(|s| s.permits.insert(permit.id, permit.clone()));
        Ok(permit)
    }

    async fn get_by_id(&self, id: PermitId) -> Result<Option<Permit>, PortalError> {
        Ok(self.with(|s| s.permits.get(&id).cloned()))
    }

    async fn list(&self, filter: PermitFilter) -> Result<Vec<Permit>, PortalError> {
        let mut found: Vec<Permit> = self.with(|s| {
            s.permits
                .values()
                .filter(|p| filter.matches(p))
                .cloned()
                .collect()
        });
        found.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(found)
    }

    async fn update(&self, permit: Permit) -> Result<Permit, PortalError> {
        self.with(|s| s.permits.insert(permit.id, permit.clone()));
        Ok(permit)
    }
}

impl FacilityRepository for InMemoryRepositories {
    async fn create(&self, facility: Facility) -> Result<Facility, PortalError> {
        self.with(|s| s.facilities.insert(facility.id, facility.clone()));
        Ok(facility)
    }

    async fn get_by_id(&self, id: FacilityId) -> Result<Option<Facility>, PortalError> {
        Ok(self.with(|s| s.facilities.get(&id).cloned()))
    }

    async fn get_all(&self) -> Result<Vec<Facility>, PortalError> {
        Ok(self.with(|s| s.facilities.values().cloned().collect()))
    }

    async fn delete(&self, id: FacilityId) -> Result<(), PortalError> {
        self.with(|s| {
            s.facilities.remove(&id);
            s.reservations.retain(|_, r| r.facility_id != id);
        });
        Ok(())
    }
}

impl ReservationRepository for InMemoryRepositories {
    async fn create(&self, reservation: Reservation) -> Result<Reservation, PortalError> {
        self.with(|s| s.reservations.insert(reservation.id, reservation.clone()));
        Ok(reservation)
    }

    async fn get_by_id(&self, id: ReservationId) -> Result<Option<Reservation>, PortalError> {
        Ok(self.with(|s| s.reservations.get(&id).cloned()))
    }

    async fn get_all(&self) -> Result<Vec<Reservation>, PortalError> {
        Ok(self.with(|s| s.reservations.values().cloned().collect()))
    }

    async fn list_by_facility(
        &self,
        facility_id: FacilityId,
    ) -> Result<Vec<Reservation>, PortalError> {
        let mut found: Vec<Reservation> = self.with(|s| {
            s.reservations
                .values()
                .filter(|r| r.facility_id == facility_id)
                .cloned()
                .collect()
        });
        found.sort_by_key(|r| r.starts_at);
        Ok(found)
    }

    async fn update(&self, reservation: Reservation) -> Result<Reservation, PortalError> {
        self.with(|s| s.reservations.insert(reservation.id, reservation.clone()));
        Ok(reservation)
    }
}

impl ServiceRequestRepository for InMemoryRepositories {
    async fn create(&self, request: ServiceRequest) -> Result<ServiceRequest, PortalError> {
        self.with(|s| s.requests.insert(request.id, request.clone()));
        Ok(request)
    }

    async fn get_by_id(&self, id: ServiceRequestId) -> Result<Option<ServiceRequest>, PortalError> {
        Ok(self.with(|s| s.requests.get(&id).cloned()))
    }

    async fn list(&self, status: Option<RequestStatus>) -> Result<Vec<ServiceRequest>, PortalError> {
        let mut found: Vec<ServiceRequest> = self.with(|s| {
            s.requests
                .values()
                .filter(|r| status.is_none_or(|status| r.status == status))
                .cloned()
                .collect()
        });
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn update(&self, request: ServiceRequest) -> Result<ServiceRequest, PortalError> {
        self.with(|s| s.requests.insert(request.id, request.clone()));
        Ok(request)
    }
}

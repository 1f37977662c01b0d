//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod cemetery;
pub mod permit;
pub mod reservation;
pub mod service_request;

pub use cemetery::{AssignmentRepository, CemeteryRepository, DeceasedRepository, PlotRepository};
pub use permit::{PermitFilter, PermitRepository};
pub use reservation::{FacilityRepository, ReservationRepository};
pub use service_request::ServiceRequestRepository;

/// One implementation of every repository port, handed to the composition
/// root so services can be built without naming each adapter type.
///
/// Implementations are expected to be cheap to clone (a pool handle).
pub trait Repositories: Send + Sync + 'static {
    type Cemeteries: CemeteryRepository + Send + Sync + 'static;
    type Plots: PlotRepository + Send + Sync + 'static;
    type Deceased: DeceasedRepository + Send + Sync + 'static;
    type Assignments: AssignmentRepository + Send + Sync + 'static;
    type Permits: PermitRepository + Send + Sync + 'static;
    type Facilities: FacilityRepository + Send + Sync + 'static;
    type Reservations: ReservationRepository + Send + Sync + 'static;
    type ServiceRequests: ServiceRequestRepository + Send + Sync + 'static;

    fn cemeteries(&self) -> Self::Cemeteries;
    fn plots(&self) -> Self::Plots;
    fn deceased(&self) -> Self::Deceased;
    fn assignments(&self) -> Self::Assignments;
    fn permits(&self) -> Self::Permits;
    fn facilities(&self) -> Self::Facilities;
    fn reservations(&self) -> Self::Reservations;
    fn service_requests(&self) -> Self::ServiceRequests;
}

//! # munihub-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `CemeteryRepository`: cemeteries, sections and blocks
//!   - `PlotRepository`, `DeceasedRepository`, `AssignmentRepository`
//!   - `PermitRepository`
//!   - `FacilityRepository`, `ReservationRepository`
//!   - `ServiceRequestRepository`
//!   - `Repositories`: bundles one implementation of each for wiring
//! - Define **driving/inbound ports** as use-case structs:
//!   - `CemeteryService`: layout and plot CRUD, stats, map
//!   - `BurialService`: deceased records and plot assignments
//!   - `SearchService`: record search and walking navigation
//!   - `PermitService`, `ReservationService`, `ServiceRequestService`
//!   - `DashboardService`: portal-wide counts
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `munihub-domain` only (plus `tokio` for concurrent fan-out).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;

#[cfg(test)]
mod fakes;

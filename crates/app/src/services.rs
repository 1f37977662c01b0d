//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod burial_service;
pub mod cemetery_service;
pub mod dashboard_service;
pub mod permit_service;
pub mod reservation_service;
pub mod search_service;
pub mod service_request_service;

mod snapshot;

//! # munihub-domain
//!
//! Pure domain model for the munihub municipal portal.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - **Geo** math used by the cemetery map (bounding boxes, Haversine, bearings)
//! - **Cemetery** records: cemeteries, sections, blocks, plots, deceased, assignments
//! - **Search** over a cemetery snapshot and **stats** aggregation
//! - **Permits** (burial, cremation, exhumation) and their review workflow
//! - **Reservations** of parks and facilities
//! - **Service requests** for water and drainage issues
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

#[macro_use]
mod code;

pub mod error;
pub mod id;
pub mod time;

pub mod cemetery;
pub mod geo;
pub mod map;
pub mod permit;
pub mod reservation;
pub mod search;
pub mod service_request;
pub mod stats;

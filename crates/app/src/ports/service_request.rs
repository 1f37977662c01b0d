//! Service request repository port.

use std::future::Future;

use munihub_domain::error::PortalError;
use munihub_domain::id::ServiceRequestId;
use munihub_domain::service_request::{RequestStatus, ServiceRequest};

/// Repository for water and drainage [`ServiceRequest`]s.
pub trait ServiceRequestRepository {
    fn create(
        &self,
        request: ServiceRequest,
    ) -> impl Future<Output = Result<ServiceRequest, PortalError>> + Send;

    fn get_by_id(
        &self,
        id: ServiceRequestId,
    ) -> impl Future<Output = Result<Option<ServiceRequest>, PortalError>> + Send;

    /// Requests in `status` (all when `None`), newest first.
    fn list(
        &self,
        status: Option<RequestStatus>,
    ) -> impl Future<Output = Result<Vec<ServiceRequest>, PortalError>> + Send;

    fn update(
        &self,
        request: ServiceRequest,
    ) -> impl Future<Output = Result<ServiceRequest, PortalError>> + Send;
}

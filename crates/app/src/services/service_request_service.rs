//! Service request service: water and drainage reports.

use munihub_domain::error::PortalError;
use munihub_domain::id::ServiceRequestId;
use munihub_domain::service_request::{RequestStatus, ServiceRequest};
use munihub_domain::time::now;

use crate::ports::ServiceRequestRepository;

/// Application service for resident service requests.
pub struct ServiceRequestService<R> {
    repo: R,
}

impl<R: ServiceRequestRepository + Send + Sync> ServiceRequestService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// File a new request.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip_all, fields(request.category = %request.category, request.priority = %request.priority))]
    pub async fn submit(&self, request: ServiceRequest) -> Result<ServiceRequest, PortalError> {
        request.validate()?;
        let request = self.repo.create(request).await?;
        if request.is_urgent_and_active() {
            tracing::warn!(request.id = %request.id, address = %request.address, "urgent service request filed");
        }
        Ok(request)
    }

    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] when no request with `id` exists.
    pub async fn get_request(&self, id: ServiceRequestId) -> Result<ServiceRequest, PortalError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| PortalError::not_found("ServiceRequest", id))
    }

    /// Requests in `status`, or all of them, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_requests(
        &self,
        status: Option<RequestStatus>,
    ) -> Result<Vec<ServiceRequest>, PortalError> {
        self.repo.list(status).await
    }

    /// Move a request along its workflow.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] if the request does not exist or
    /// [`PortalError::Validation`] when the move is not allowed.
    #[tracing::instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: ServiceRequestId,
        status: RequestStatus,
    ) -> Result<ServiceRequest, PortalError> {
        let mut request = self.get_request(id).await?;
        request.transition(status, now())?;
        self.repo.update(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::InMemoryRepositories;
    use munihub_domain::error::ValidationError;
    use munihub_domain::service_request::ServiceCategory;

    fn make_service() -> ServiceRequestService<InMemoryRepositories> {
        ServiceRequestService::new(InMemoryRepositories::default())
    }

    fn report(category: ServiceCategory) -> ServiceRequest {
        ServiceRequest::builder(category)
            .description("Water gushing from the main")
            .address("Rizal Ave corner Luna St")
            .reporter("Pedro Garcia", "0917-555-0101")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_submit_open_request() {
        let svc = make_service();
        let saved = svc.submit(report(ServiceCategory::WaterLeak)).await.unwrap();
        assert_eq!(saved.status, RequestStatus::Open);
        assert_eq!(svc.get_request(saved.id).await.unwrap(), saved);
    }

    #[tokio::test]
    async fn should_reject_request_when_description_blank() {
        let svc = make_service();
        let mut request = report(ServiceCategory::NoWater);
        request.description = "  ".to_string();
        let result = svc.submit(request).await;
        assert!(matches!(
            result,
            Err(PortalError::Validation(ValidationError::EmptyField("description")))
        ));
    }

    #[tokio::test]
    async fn should_walk_request_to_resolution() {
        let svc = make_service();
        let saved = svc.submit(report(ServiceCategory::Flooding)).await.unwrap();

        svc.update_status(saved.id, RequestStatus::InProgress)
            .await
            .unwrap();
        let resolved = svc
            .update_status(saved.id, RequestStatus::Resolved)
            .await
            .unwrap();
        assert!(resolved.resolved_at.is_some());

        let open = svc.list_requests(Some(RequestStatus::Open)).await.unwrap();
        assert!(open.is_empty());
        let done = svc
            .list_requests(Some(RequestStatus::Resolved))
            .await
            .unwrap();
        assert_eq!(done.len(), 1);
    }

    #[tokio::test]
    async fn should_refuse_invalid_status_move() {
        let svc = make_service();
        let saved = svc.submit(report(ServiceCategory::MeterIssue)).await.unwrap();
        let result = svc.update_status(saved.id, RequestStatus::Resolved).await;
        assert!(matches!(
            result,
            Err(PortalError::Validation(ValidationError::InvalidTransition { .. }))
        ));
    }

    #[tokio::test]
    async fn should_return_not_found_when_request_missing() {
        let svc = make_service();
        let result = svc
            .update_status(ServiceRequestId::new(), RequestStatus::Closed)
            .await;
        assert!(matches!(result, Err(PortalError::NotFound(_))));
    }
}

//! Permit repository port.

use std::future::Future;

use munihub_domain::error::PortalError;
use munihub_domain::id::PermitId;
use munihub_domain::permit::{Permit, PermitKind, PermitStatus};

/// Optional criteria for listing permits. Empty matches everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PermitFilter {
    pub status: Option<PermitStatus>,
    pub kind: Option<PermitKind>,
}

impl PermitFilter {
    #[must_use]
    pub fn matches(&self, permit: &Permit) -> bool {
        self.status.is_none_or(|status| status == permit.status)
            && self.kind.is_none_or(|kind| kind == permit.kind)
    }
}

/// Repository for persisting and querying [`Permit`]s.
pub trait PermitRepository {
    fn create(&self, permit: Permit) -> impl Future<Output = Result<Permit, PortalError>> + Send;

    fn get_by_id(
        &self,
        id: PermitId,
    ) -> impl Future<Output = Result<Option<Permit>, PortalError>> + Send;

    /// Permits passing `filter`, newest submission first.
    fn list(
        &self,
        filter: PermitFilter,
    ) -> impl Future<Output = Result<Vec<Permit>, PortalError>> + Send;

    fn update(&self, permit: Permit) -> impl Future<Output = Result<Permit, PortalError>> + Send;
}

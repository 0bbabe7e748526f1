//! Driving port for the blood request review workflow.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    BloodRequest, BloodRequestDraft, Error, RequestStatus, RequestWithRequester, UserId,
};

/// Driving port for raising and reviewing blood requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestWorkflow: Send + Sync {
    /// Store a new request in `Pending`.
    async fn create_request(&self, draft: BloodRequestDraft) -> Result<BloodRequest, Error>;

    /// Pending requests, newest first, with requester name and email.
    async fn list_pending(&self) -> Result<Vec<RequestWithRequester>, Error>;

    /// Set the status of a request. Any status may follow any other.
    /// Unknown ids fail with `not_found` and change nothing.
    async fn set_status(
        &self,
        request_id: Uuid,
        status: RequestStatus,
    ) -> Result<RequestWithRequester, Error>;

    /// The recipient's own requests, newest first.
    async fn list_for_recipient(&self, recipient: UserId) -> Result<Vec<BloodRequest>, Error>;
}

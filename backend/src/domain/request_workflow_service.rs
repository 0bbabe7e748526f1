//! Blood request workflow service.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;
use uuid::Uuid;

use crate::domain::accounts_service::map_user_error;
use crate::domain::ports::{
    BloodRequestRepository, BloodRequestRepositoryError, RequestWorkflow, UserRepository,
};
use crate::domain::{
    BloodRequest, BloodRequestDraft, Error, RequestStatus, RequestWithRequester, UserId,
    UserSummary,
};

fn map_repository_error(error: BloodRequestRepositoryError) -> Error {
    match error {
        BloodRequestRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("blood request repository unavailable: {message}"))
        }
        BloodRequestRepositoryError::Query { message } => {
            Error::internal(format!("blood request repository error: {message}"))
        }
    }
}

fn newest_first(requests: &mut [BloodRequest]) {
    requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Request service implementing the workflow driving port.
#[derive(Clone)]
pub struct RequestWorkflowService<R, U> {
    request_repo: Arc<R>,
    user_repo: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<R, U> RequestWorkflowService<R, U> {
    /// Create a workflow over the request and user repositories.
    pub fn new(request_repo: Arc<R>, user_repo: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            request_repo,
            user_repo,
            clock,
        }
    }
}

impl<R, U> RequestWorkflowService<R, U>
where
    U: UserRepository,
{
    async fn contacts_for(
        &self,
        requests: &[BloodRequest],
    ) -> Result<HashMap<UserId, UserSummary>, Error> {
        let mut ids: Vec<UserId> = requests.iter().map(|r| r.recipient).collect();
        ids.sort_unstable_by_key(|id| *id.as_uuid());
        ids.dedup();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        Ok(self
            .user_repo
            .find_by_ids(&ids)
            .await
            .map_err(map_user_error)?
            .iter()
            .map(|user| (user.id, UserSummary::contact(user)))
            .collect())
    }
}

#[async_trait]
impl<R, U> RequestWorkflow for RequestWorkflowService<R, U>
where
    R: BloodRequestRepository,
    U: UserRepository,
{
    async fn create_request(&self, draft: BloodRequestDraft) -> Result<BloodRequest, Error> {
        let request = BloodRequest {
            id: Uuid::new_v4(),
            recipient: draft.recipient,
            blood_type: draft.blood_type,
            location: draft.location,
            urgency: draft.urgency,
            status: RequestStatus::Pending,
            created_at: self.clock.utc(),
        };

        self.request_repo
            .insert(&request)
            .await
            .map_err(map_repository_error)?;

        info!(
            request_id = %request.id,
            recipient = %request.recipient,
            blood_type = %request.blood_type,
            urgency = request.urgency.as_str(),
            "blood request created"
        );
        Ok(request)
    }

    async fn list_pending(&self) -> Result<Vec<RequestWithRequester>, Error> {
        let mut requests = self
            .request_repo
            .list_by_status(RequestStatus::Pending)
            .await
            .map_err(map_repository_error)?;
        newest_first(&mut requests);

        let contacts = self.contacts_for(&requests).await?;
        Ok(requests
            .into_iter()
            .map(|request| {
                let recipient = contacts.get(&request.recipient).cloned();
                RequestWithRequester::new(request, recipient)
            })
            .collect())
    }

    async fn set_status(
        &self,
        request_id: Uuid,
        status: RequestStatus,
    ) -> Result<RequestWithRequester, Error> {
        let updated = self
            .request_repo
            .update_status(&request_id, status)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| {
                Error::not_found(format!("Request not found with id of {request_id}"))
            })?;

        info!(request_id = %updated.id, status = %updated.status, "request status changed");
        let mut contacts = self.contacts_for(std::slice::from_ref(&updated)).await?;
        let recipient = contacts.remove(&updated.recipient);
        Ok(RequestWithRequester::new(updated, recipient))
    }

    async fn list_for_recipient(&self, recipient: UserId) -> Result<Vec<BloodRequest>, Error> {
        let mut requests = self
            .request_repo
            .list_for_recipient(&recipient)
            .await
            .map_err(map_repository_error)?;
        newest_first(&mut requests);
        Ok(requests)
    }
}

#[cfg(test)]
#[path = "request_workflow_service_tests.rs"]
mod tests;

//! Blood requests held in process memory.

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::domain::ports::{BloodRequestRepository, BloodRequestRepositoryError};
use crate::domain::{BloodRequest, RequestStatus, UserId};

/// [`BloodRequestRepository`] over an in-memory list.
#[derive(Debug, Default)]
pub struct MemoryBloodRequestRepository {
    requests: RwLock<Vec<BloodRequest>>,
}

impl MemoryBloodRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn filtered(&self, keep: impl Fn(&BloodRequest) -> bool) -> Vec<BloodRequest> {
        self.requests
            .read()
            .iter()
            .filter(|request| keep(request))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl BloodRequestRepository for MemoryBloodRequestRepository {
    async fn insert(&self, request: &BloodRequest) -> Result<(), BloodRequestRepositoryError> {
        self.requests.write().push(request.clone());
        Ok(())
    }

    async fn update_status(
        &self,
        request_id: &Uuid,
        status: RequestStatus,
    ) -> Result<Option<BloodRequest>, BloodRequestRepositoryError> {
        let mut requests = self.requests.write();
        Ok(requests
            .iter_mut()
            .find(|request| &request.id == request_id)
            .map(|request| {
                request.status = status;
                request.clone()
            }))
    }

    async fn list_by_status(
        &self,
        status: RequestStatus,
    ) -> Result<Vec<BloodRequest>, BloodRequestRepositoryError> {
        Ok(self.filtered(|request| request.status == status))
    }

    async fn list_for_recipient(
        &self,
        recipient: &UserId,
    ) -> Result<Vec<BloodRequest>, BloodRequestRepositoryError> {
        Ok(self.filtered(|request| &request.recipient == recipient))
    }
}

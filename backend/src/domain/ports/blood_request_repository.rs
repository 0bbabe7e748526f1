//! Port for blood request persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BloodRequest, RequestStatus, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by blood request repository adapters.
    pub enum BloodRequestRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "blood request repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "blood request repository query failed: {message}",
    }
}

/// Port for storing blood requests and changing their status.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BloodRequestRepository: Send + Sync {
    /// Persist a new request.
    async fn insert(&self, request: &BloodRequest) -> Result<(), BloodRequestRepositoryError>;

    /// Overwrite the status of `id`, returning the updated request or `None`
    /// when no request has that id. Missing ids must leave storage untouched.
    async fn update_status(
        &self,
        id: &Uuid,
        status: RequestStatus,
    ) -> Result<Option<BloodRequest>, BloodRequestRepositoryError>;

    /// Requests currently in `status`, newest first.
    async fn list_by_status(
        &self,
        status: RequestStatus,
    ) -> Result<Vec<BloodRequest>, BloodRequestRepositoryError>;

    /// Requests raised by `recipient`, newest first.
    async fn list_for_recipient(
        &self,
        recipient: &UserId,
    ) -> Result<Vec<BloodRequest>, BloodRequestRepositoryError>;
}

/// Fixture implementation for tests that do not exercise request storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBloodRequestRepository;

#[async_trait]
impl BloodRequestRepository for FixtureBloodRequestRepository {
    async fn insert(&self, _request: &BloodRequest) -> Result<(), BloodRequestRepositoryError> {
        Ok(())
    }

    async fn update_status(
        &self,
        _id: &Uuid,
        _status: RequestStatus,
    ) -> Result<Option<BloodRequest>, BloodRequestRepositoryError> {
        Ok(None)
    }

    async fn list_by_status(
        &self,
        _status: RequestStatus,
    ) -> Result<Vec<BloodRequest>, BloodRequestRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_for_recipient(
        &self,
        _recipient: &UserId,
    ) -> Result<Vec<BloodRequest>, BloodRequestRepositoryError> {
        Ok(Vec::new())
    }
}

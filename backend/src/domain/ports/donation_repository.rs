//! Port for donation persistence.

use async_trait::async_trait;

use crate::domain::{Donation, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by donation repository adapters.
    pub enum DonationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "donation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "donation repository query failed: {message}",
    }
}

/// Port for storing donations and reading them back.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DonationRepository: Send + Sync {
    /// Persist a new donation.
    async fn insert(&self, donation: &Donation) -> Result<(), DonationRepositoryError>;

    /// Donations made by `donor`, newest `donation_date` first.
    async fn list_for_donor(&self, donor: &UserId)
    -> Result<Vec<Donation>, DonationRepositoryError>;

    /// Every donation in insertion order.
    async fn list_all(&self) -> Result<Vec<Donation>, DonationRepositoryError>;
}

/// Fixture implementation for tests that do not exercise donation storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDonationRepository;

#[async_trait]
impl DonationRepository for FixtureDonationRepository {
    async fn insert(&self, _donation: &Donation) -> Result<(), DonationRepositoryError> {
        Ok(())
    }

    async fn list_for_donor(
        &self,
        _donor: &UserId,
    ) -> Result<Vec<Donation>, DonationRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_all(&self) -> Result<Vec<Donation>, DonationRepositoryError> {
        Ok(Vec::new())
    }
}

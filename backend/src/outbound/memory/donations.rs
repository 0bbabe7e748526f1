//! Donation log held in process memory.

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::ports::{DonationRepository, DonationRepositoryError};
use crate::domain::{Donation, UserId};

/// [`DonationRepository`] appending to an in-memory log.
#[derive(Debug, Default)]
pub struct MemoryDonationRepository {
    donations: RwLock<Vec<Donation>>,
}

impl MemoryDonationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DonationRepository for MemoryDonationRepository {
    async fn insert(&self, donation: &Donation) -> Result<(), DonationRepositoryError> {
        self.donations.write().push(donation.clone());
        Ok(())
    }

    async fn list_for_donor(
        &self,
        donor: &UserId,
    ) -> Result<Vec<Donation>, DonationRepositoryError> {
        Ok(self
            .donations
            .read()
            .iter()
            .filter(|donation| &donation.donor == donor)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Donation>, DonationRepositoryError> {
        Ok(self.donations.read().clone())
    }
}

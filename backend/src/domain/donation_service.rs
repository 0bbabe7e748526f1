//! Donation recorder service.
//!
//! Recording is two writes: the donation row, then the inventory credit. They
//! are not wrapped in a transaction. If the credit fails the donation stays
//! stored, the failure is logged with the donation id, and the caller gets
//! the credit error.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::accounts_service::map_user_error;
use crate::domain::ports::{
    DonationRecorder, DonationRepository, DonationRepositoryError, InventoryLedger,
    UserRepository,
};
use crate::domain::{
    Donation, DonationDraft, DonationReceipt, DonationStatus, DonationWithDonor, Error, UserId,
    UserSummary,
};

fn map_donation_error(error: DonationRepositoryError) -> Error {
    match error {
        DonationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("donation repository unavailable: {message}"))
        }
        DonationRepositoryError::Query { message } => {
            Error::internal(format!("donation repository error: {message}"))
        }
    }
}

/// Donation service implementing the recorder driving port.
#[derive(Clone)]
pub struct DonationRecorderService<D, U> {
    donation_repo: Arc<D>,
    user_repo: Arc<U>,
    ledger: Arc<dyn InventoryLedger>,
    clock: Arc<dyn Clock>,
}

impl<D, U> DonationRecorderService<D, U> {
    /// Create a recorder that credits `ledger` for each donation.
    pub fn new(
        donation_repo: Arc<D>,
        user_repo: Arc<U>,
        ledger: Arc<dyn InventoryLedger>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            donation_repo,
            user_repo,
            ledger,
            clock,
        }
    }
}

#[async_trait]
impl<D, U> DonationRecorder for DonationRecorderService<D, U>
where
    D: DonationRepository,
    U: UserRepository,
{
    async fn record_donation(&self, draft: DonationDraft) -> Result<DonationReceipt, Error> {
        let donation = Donation {
            id: Uuid::new_v4(),
            donor: draft.donor,
            blood_type: draft.blood_type,
            donation_date: draft.donation_date.unwrap_or_else(|| self.clock.utc()),
            quantity: draft.quantity,
            status: DonationStatus::Completed,
        };

        self.donation_repo
            .insert(&donation)
            .await
            .map_err(map_donation_error)?;

        let inventory = self
            .ledger
            .credit(donation.blood_type, donation.quantity)
            .await
            .inspect_err(|err| {
                error!(
                    donation_id = %donation.id,
                    blood_type = %donation.blood_type,
                    units = %donation.quantity,
                    error = %err,
                    "donation stored but inventory credit failed"
                );
            })?;

        info!(
            donation_id = %donation.id,
            donor = %donation.donor,
            blood_type = %donation.blood_type,
            units = %donation.quantity,
            "donation recorded"
        );
        Ok(DonationReceipt {
            donation,
            inventory,
        })
    }

    async fn history_for_donor(&self, donor: UserId) -> Result<Vec<Donation>, Error> {
        let mut donations = self
            .donation_repo
            .list_for_donor(&donor)
            .await
            .map_err(map_donation_error)?;
        donations.sort_by(|a, b| b.donation_date.cmp(&a.donation_date));
        Ok(donations)
    }

    async fn list_all(&self) -> Result<Vec<DonationWithDonor>, Error> {
        let donations = self
            .donation_repo
            .list_all()
            .await
            .map_err(map_donation_error)?;

        let mut donor_ids: Vec<UserId> = donations.iter().map(|d| d.donor).collect();
        donor_ids.sort_unstable_by_key(|id| *id.as_uuid());
        donor_ids.dedup();

        let donors: HashMap<UserId, UserSummary> = self
            .user_repo
            .find_by_ids(&donor_ids)
            .await
            .map_err(map_user_error)?
            .iter()
            .map(|user| (user.id, UserSummary::donor(user)))
            .collect();

        Ok(donations
            .into_iter()
            .map(|donation| {
                let donor = donors.get(&donation.donor).cloned();
                DonationWithDonor::new(donation, donor)
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "donation_service_tests.rs"]
mod tests;
